//! The `seed` subcommand: default desk calls and race meta.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Args;
use elections_lib::ingest::{default_calendar, read_calendar_csv};
use elections_lib::{Db, ElectionConfig};

#[derive(Args)]
pub struct SeedArgs {
    /// Poll-closing calendar CSV (key,time_est,first_results_est); defaults to the bundled calendar
    #[arg(long)]
    pub calendar: Option<PathBuf>,
}

pub fn run(args: &SeedArgs, db_path: &Path, config: &ElectionConfig) -> Result<()> {
    let calendar = match &args.calendar {
        Some(path) => read_calendar_csv(path)?,
        None => default_calendar()?,
    };

    let mut db = Db::open(db_path)?;
    db.init()?;
    if db.result_count()? == 0 {
        bail!("no results loaded; run `elections load <csv>` first");
    }
    let calls = db.create_calls()?;
    let metas = db.seed_race_meta(&calendar, &config.races)?;
    db.close()?;

    eprintln!("Seeded {} new calls and {} race meta rows", calls, metas);
    Ok(())
}
