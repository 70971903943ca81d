//! The `render` subcommand: write published JSON artifacts.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use clap::{Args, ValueEnum};
use elections_lib::{validation, Artifact, Db, ElectionConfig, Renderer};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ArtifactKind {
    /// Every artifact, clearing the output directory first
    All,
    TopLevel,
    PresidentialNational,
    BigBoard,
    Governor,
    Senate,
    House,
    BallotMeasures,
    /// Presidential county results for --state
    Counties,
    /// Per-state races for --state
    State,
}

#[derive(Args)]
pub struct RenderArgs {
    /// Directory artifacts are written to
    #[arg(long, env = "ELECTIONS_OUTPUT_DIR", default_value = ".rendered")]
    pub output_dir: PathBuf,

    /// Which artifact to render
    #[arg(long, value_enum, default_value = "all")]
    pub artifact: ArtifactKind,

    /// State postal code for counties and state artifacts (e.g. PA)
    #[arg(long)]
    pub state: Option<String>,
}

fn artifact_for(kind: ArtifactKind, state: Option<&str>) -> Result<Option<Artifact>> {
    let require_state = || -> Result<String> {
        let state = state.ok_or_else(|| anyhow!("--artifact {:?} requires --state", kind))?;
        Ok(validation::validate_state(state)?)
    };
    Ok(Some(match kind {
        ArtifactKind::All => return Ok(None),
        ArtifactKind::TopLevel => Artifact::TopLevel,
        ArtifactKind::PresidentialNational => Artifact::PresidentialNational,
        ArtifactKind::BigBoard => Artifact::PresidentialBigBoard,
        ArtifactKind::Governor => Artifact::GovernorNational,
        ArtifactKind::Senate => Artifact::SenateNational,
        ArtifactKind::House => Artifact::HouseNational,
        ArtifactKind::BallotMeasures => Artifact::BallotMeasuresNational,
        ArtifactKind::Counties => Artifact::PresidentialCounties(require_state()?),
        ArtifactKind::State => Artifact::State(require_state()?),
    }))
}

pub fn run(args: &RenderArgs, db_path: &Path, config: &ElectionConfig) -> Result<()> {
    let artifact = artifact_for(args.artifact, args.state.as_deref())?;

    let db = Db::open(db_path)?;
    db.init()?;
    let renderer = Renderer::new(&db, config, &args.output_dir)?;

    match artifact {
        Some(artifact) => {
            let path = renderer.render(&artifact)?;
            eprintln!("Wrote {}", path.display());
        }
        None => {
            let report = renderer.render_all()?;
            eprintln!(
                "Wrote {} artifacts to {}",
                report.written.len(),
                args.output_dir.display()
            );
            if !report.is_success() {
                for (artifact, err) in &report.failed {
                    eprintln!("  failed {}: {}", artifact, err);
                }
                bail!("{} artifacts failed to render", report.failed.len());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_artifacts_require_state() {
        assert!(artifact_for(ArtifactKind::Counties, None).is_err());
        assert!(artifact_for(ArtifactKind::State, Some("XX")).is_err());
        assert_eq!(
            artifact_for(ArtifactKind::Counties, Some("pa")).unwrap(),
            Some(Artifact::PresidentialCounties("PA".to_string()))
        );
    }

    #[test]
    fn test_all_and_national_kinds() {
        assert_eq!(artifact_for(ArtifactKind::All, None).unwrap(), None);
        assert_eq!(
            artifact_for(ArtifactKind::BigBoard, None).unwrap(),
            Some(Artifact::PresidentialBigBoard)
        );
    }
}
