//! The `call` subcommand: desk edits to accept_ap and override_winner.

use std::path::Path;

use anyhow::{anyhow, bail, Result};
use clap::Args;
use elections_lib::{validation, Db};

#[derive(Args)]
pub struct CallArgs {
    /// Result id to edit
    #[arg(long, conflicts_with = "race")]
    pub result: Option<String>,

    /// Race id: sets accept_ap on every result in the race
    #[arg(long)]
    pub race: Option<String>,

    /// Trust the wire-service winner flag (true/false)
    #[arg(long)]
    pub accept_ap: Option<bool>,

    /// Mark the result as the winner regardless of the wire service (true/false)
    #[arg(long)]
    pub override_winner: Option<bool>,
}

pub fn run(args: &CallArgs, db_path: &Path) -> Result<()> {
    let db = Db::open(db_path)?;
    db.init()?;

    match (&args.result, &args.race) {
        (Some(result), None) => {
            if args.accept_ap.is_none() && args.override_winner.is_none() {
                bail!("nothing to change: pass --accept-ap and/or --override-winner");
            }
            let id = validation::validate_id(result)?;
            if !db.set_call(&id, args.accept_ap, args.override_winner)? {
                return Err(anyhow!("no call for result '{}'", id));
            }
            eprintln!("Updated call for result {}", id);
        }
        (None, Some(race)) => {
            if args.override_winner.is_some() {
                bail!("--override-winner applies to a single result; use --result");
            }
            let accept_ap = args
                .accept_ap
                .ok_or_else(|| anyhow!("--race requires --accept-ap"))?;
            let id = validation::validate_id(race)?;
            let updated = db.set_race_accept_ap(&id, accept_ap)?;
            if updated == 0 {
                return Err(anyhow!("no calls for race '{}'", id));
            }
            eprintln!("Updated {} calls in race {}", updated, id);
        }
        _ => bail!("pass exactly one of --result or --race"),
    }

    db.close()?;
    Ok(())
}
