//! The `load` subcommand: replace stored results with an ingestion export.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use clap::Args;
use elections_lib::{read_results_csv, Db, LAST_LOADED_AT};
use tracing::info;

#[derive(Args)]
pub struct LoadArgs {
    /// CSV export of results from the ingestion tool
    pub csv: PathBuf,

    /// Skip creating default calls for newly seen results
    #[arg(long)]
    pub no_calls: bool,
}

pub fn run(args: &LoadArgs, db_path: &Path) -> Result<()> {
    let results = read_results_csv(&args.csv)?;

    let mut db = Db::open(db_path)?;
    db.init()?;
    let loaded = db.replace_results(&results)?;
    let new_calls = if args.no_calls { 0 } else { db.create_calls()? };
    db.set_meta(LAST_LOADED_AT, &Utc::now().to_rfc3339())?;
    db.close()?;

    info!(results = loaded, new_calls, "load complete");
    eprintln!(
        "Loaded {} results from {} ({} new calls)",
        loaded,
        args.csv.display(),
        new_calls
    );
    Ok(())
}
