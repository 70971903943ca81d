//! The `summary` subcommand: electoral college and balance of power at a glance.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use elections_lib::types::Chamber;
use elections_lib::{
    selector, validation, Db, ElectionConfig, Enricher, Renderer, ResultSelector, LAST_LOADED_AT,
};

use crate::output::{
    build_bop_rows, build_electoral_rows, build_race_rows, print_rows, OutputFormat,
};

#[derive(Args)]
pub struct SummaryArgs {
    /// List every race in a chamber (senate or house) instead of the totals
    #[arg(long)]
    pub races: Option<String>,
}

pub fn run(
    args: &SummaryArgs,
    db_path: &Path,
    config: &ElectionConfig,
    format: &OutputFormat,
) -> Result<()> {
    let db = Db::open(db_path)?;
    db.init()?;
    eprintln!("{}", last_load_line(db.get_meta(LAST_LOADED_AT)?.as_deref()));

    if let Some(chamber) = &args.races {
        let chamber = validation::validate_chamber(chamber)?;
        let query = selector::chamber(chamber);
        let results = ResultSelector::new(&db).select(&query)?;
        let enriched = Enricher::load(&db)?.enrich_all(results, query.projection)?;
        eprintln!("{} {} results", enriched.len(), chamber);
        return print_rows(build_race_rows(&enriched), format);
    }

    let renderer = Renderer::new(&db, config, ".")?;
    let top = renderer.top_level()?;

    let college = &top.electoral_college;
    eprintln!(
        "Electoral college: {} of 538 allocated{}",
        college.total(),
        if college.complete { "" } else { " (incomplete)" }
    );
    print_rows(build_electoral_rows(college), format)?;

    let mut bop_rows = build_bop_rows(Chamber::Senate, &top.senate_bop);
    bop_rows.extend(build_bop_rows(Chamber::House, &top.house_bop));
    eprintln!(
        "Uncalled races: senate {}, house {}",
        top.senate_bop.uncalled_races, top.house_bop.uncalled_races
    );
    print_rows(bop_rows, format)?;
    Ok(())
}

fn last_load_line(loaded_at: Option<&str>) -> String {
    match loaded_at {
        Some(at) => format!("Results last loaded at {}", at),
        None => "No results loaded yet".to_string(),
    }
}
