//! The `bootstrap` subcommand: create the database schema.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use elections_lib::Db;

#[derive(Args)]
pub struct BootstrapArgs {
    /// Delete an existing database first, discarding calls and race meta
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: &BootstrapArgs, db_path: &Path) -> Result<()> {
    if args.force && db_path.exists() {
        std::fs::remove_file(db_path)
            .with_context(|| format!("failed to remove {}", db_path.display()))?;
    }
    let db = Db::open(db_path)?;
    db.init()?;
    db.close()?;
    eprintln!("Initialized {}", db_path.display());
    Ok(())
}
