//! Artifact rendering: select, enrich, group, write.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use elections_model::types::{Chamber, Party, RawResult};
use elections_model::{Query, ResultQuery};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::aggregate::{group, group_nested, GroupKey, UNSCHEDULED};
use crate::bop::{BalanceOfPower, ChamberSummary};
use crate::config::ElectionConfig;
use crate::electoral::{tally, ElectoralCollege};
use crate::enrich::{EnrichedResult, Enricher};
use crate::error::RenderError;
use crate::pickup::PickupStatus;
use crate::selector::{self, ResultSelector};
use crate::store::ResultStore;
use crate::validation::is_valid_state;

/// One output file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Artifact {
    TopLevel,
    PresidentialNational,
    PresidentialBigBoard,
    GovernorNational,
    SenateNational,
    HouseNational,
    BallotMeasuresNational,
    PresidentialCounties(String),
    State(String),
}

impl Artifact {
    /// Artifacts rendered once per pass, in render order.
    pub const NATIONAL: [Artifact; 7] = [
        Artifact::TopLevel,
        Artifact::PresidentialNational,
        Artifact::PresidentialBigBoard,
        Artifact::GovernorNational,
        Artifact::SenateNational,
        Artifact::HouseNational,
        Artifact::BallotMeasuresNational,
    ];

    pub fn file_name(&self) -> String {
        match self {
            Artifact::TopLevel => "top-level-results.json".to_string(),
            Artifact::PresidentialNational => "presidential-national.json".to_string(),
            Artifact::PresidentialBigBoard => "presidential-big-board.json".to_string(),
            Artifact::GovernorNational => "governor-national.json".to_string(),
            Artifact::SenateNational => "senate-national.json".to_string(),
            Artifact::HouseNational => "house-national.json".to_string(),
            Artifact::BallotMeasuresNational => "ballot-measures-national.json".to_string(),
            Artifact::PresidentialCounties(st) => {
                format!("presidential-{}-counties.json", st.to_lowercase())
            }
            Artifact::State(st) => format!("{}.json", st.to_lowercase()),
        }
    }

    /// Whether `name` is a file name some artifact is written under.
    pub fn is_artifact_file(name: &str) -> bool {
        if Artifact::NATIONAL.iter().any(|a| a.file_name() == name) {
            return true;
        }
        let state = name
            .strip_prefix("presidential-")
            .and_then(|rest| rest.strip_suffix("-counties.json"))
            .or_else(|| name.strip_suffix(".json"));
        state.is_some_and(|st| {
            st.bytes().all(|b| b.is_ascii_lowercase()) && is_valid_state(&st.to_ascii_uppercase())
        })
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// Sections of a per-state artifact, in output order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateSection {
    Senate,
    House,
    Governor,
    BallotMeasures,
}

impl StateSection {
    pub const ALL: [StateSection; 4] = [
        StateSection::Senate,
        StateSection::House,
        StateSection::Governor,
        StateSection::BallotMeasures,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            StateSection::Senate => "senate",
            StateSection::House => "house",
            StateSection::Governor => "governor",
            StateSection::BallotMeasures => "ballot_measures",
        }
    }

    pub fn query(&self, state: &str) -> ResultQuery {
        let query = match self {
            StateSection::Senate => selector::senate(),
            StateSection::House => selector::house(),
            StateSection::Governor => selector::governor(),
            StateSection::BallotMeasures => selector::ballot_measures(),
        };
        query.with_state(state)
    }
}

/// Contents of `top-level-results.json`.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct TopLevel {
    pub electoral_college: ElectoralCollege,
    pub senate_bop: ChamberSummary,
    pub house_bop: ChamberSummary,
}

/// Outcome of a batch render. Failed artifacts do not stop their siblings.
#[derive(Debug, Default)]
pub struct RenderReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(Artifact, RenderError)>,
}

impl RenderReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct Renderer<'a, S: ResultStore + ?Sized> {
    selector: ResultSelector<'a, S>,
    config: &'a ElectionConfig,
    enricher: Enricher,
    output_dir: PathBuf,
}

impl<'a, S: ResultStore + ?Sized> Renderer<'a, S> {
    /// Snapshots calls and race meta from `store` for this pass.
    pub fn new(
        store: &'a S,
        config: &'a ElectionConfig,
        output_dir: impl Into<PathBuf>,
    ) -> Result<Self, RenderError> {
        Ok(Self {
            selector: ResultSelector::new(store),
            config,
            enricher: Enricher::load(store)?,
            output_dir: output_dir.into(),
        })
    }

    fn enriched(&self, query: &ResultQuery) -> Result<Vec<EnrichedResult>, RenderError> {
        let results = self.selector.select(query)?;
        self.enricher.enrich_all(results, query.projection)
    }

    pub fn electoral_college(&self) -> Result<ElectoralCollege, RenderError> {
        let results = self.selector.select(&selector::electoral())?;
        tally(&results, self.enricher.calls())
    }

    pub fn balance_of_power(&self, chamber: Chamber) -> Result<BalanceOfPower, RenderError> {
        let prior = self.config.prior_composition.for_chamber(chamber);
        let mut bop = BalanceOfPower::new(chamber, prior);
        for result in self.enriched(&selector::chamber(chamber))? {
            if !result.npr_winner {
                continue;
            }
            let current_party = result.meta.as_ref().and_then(|m| m.current_party.as_deref());
            bop.record(
                result.source.party_code(),
                result.pickup.unwrap_or(PickupStatus::Unknown),
                current_party,
            )?;
        }
        Ok(bop)
    }

    pub fn top_level(&self) -> Result<TopLevel, RenderError> {
        Ok(TopLevel {
            electoral_college: self.electoral_college()?,
            senate_bop: self.balance_of_power(Chamber::Senate)?.summary(),
            house_bop: self.balance_of_power(Chamber::House)?.summary(),
        })
    }

    /// State and district rows keyed by state (districts as `ME-2`), followed
    /// by the national rollup carrying each party's electoral votes.
    fn presidential_national(&self) -> Result<Value, RenderError> {
        let mut rows = self.enriched(&selector::presidential(self.config))?;
        let college = self.electoral_college()?;
        for mut row in self.enriched(&selector::presidential_national_rollup(self.config))? {
            row.npr_electwon = Some(college.votes(party_of(&row.source)?));
            rows.push(row);
        }
        Ok(serde_json::to_value(group(rows, GroupKey::StatePostal))?)
    }

    fn big_board(&self) -> Result<Value, RenderError> {
        let rows = self.enriched(&selector::presidential(self.config))?;
        let nested = group_nested(
            rows,
            |r: &EnrichedResult| {
                r.meta
                    .as_ref()
                    .and_then(|m| m.first_results.clone())
                    .unwrap_or_else(|| UNSCHEDULED.to_string())
            },
            GroupKey::StatePostal,
        );
        Ok(serde_json::to_value(nested)?)
    }

    fn by_race(&self, query: &ResultQuery) -> Result<Value, RenderError> {
        Ok(serde_json::to_value(group(self.enriched(query)?, GroupKey::RaceId))?)
    }

    fn state(&self, state: &str) -> Result<Value, RenderError> {
        let mut sections = Map::new();
        for section in StateSection::ALL {
            sections.insert(section.key().to_string(), self.by_race(&section.query(state))?);
        }
        Ok(Value::Object(sections))
    }

    /// Builds an artifact's document without writing it.
    pub fn build(&self, artifact: &Artifact) -> Result<Value, RenderError> {
        match artifact {
            Artifact::TopLevel => Ok(serde_json::to_value(self.top_level()?)?),
            Artifact::PresidentialNational => self.presidential_national(),
            Artifact::PresidentialBigBoard => self.big_board(),
            Artifact::GovernorNational => self.by_race(&selector::governor()),
            Artifact::SenateNational => self.by_race(&selector::senate()),
            Artifact::HouseNational => self.by_race(&selector::house_selected(self.config)),
            Artifact::BallotMeasuresNational => self.by_race(&selector::ballot_measures()),
            Artifact::PresidentialCounties(st) => {
                let rows = self.enriched(&selector::presidential_counties(self.config, st))?;
                Ok(serde_json::to_value(group(rows, GroupKey::Fips))?)
            }
            Artifact::State(st) => self.state(st),
        }
    }

    /// Replaces one artifact on disk. The previous file is removed first, so
    /// a failed build leaves no stale copy behind.
    pub fn render(&self, artifact: &Artifact) -> Result<PathBuf, RenderError> {
        let path = self.output_dir.join(artifact.file_name());
        match fs::remove_file(&path) {
            Ok(()) => debug!(path = %path.display(), "removed stale artifact"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(source) => return Err(RenderError::Io { path, source }),
        }

        let document = self.build(artifact)?;
        let bytes = serde_json::to_vec(&document)?;

        fs::create_dir_all(&self.output_dir).map_err(|source| RenderError::Io {
            path: self.output_dir.clone(),
            source,
        })?;
        fs::write(&path, bytes).map_err(|source| RenderError::Io {
            path: path.clone(),
            source,
        })?;
        info!(artifact = %artifact, "rendered");
        Ok(path)
    }

    /// National artifacts, then presidential counties and the state artifact
    /// for each state present in the store.
    pub fn artifacts(&self) -> Result<Vec<Artifact>, RenderError> {
        let mut artifacts = Artifact::NATIONAL.to_vec();
        for state in self.selector.states()? {
            artifacts.push(Artifact::PresidentialCounties(state.clone()));
            artifacts.push(Artifact::State(state));
        }
        Ok(artifacts)
    }

    /// Removes artifacts left by earlier passes and renders every artifact in
    /// order. Other files in the output directory are left alone. Only
    /// failures to list artifacts or clear old ones abort the batch.
    pub fn render_all(&self) -> Result<RenderReport, RenderError> {
        let artifacts = self.artifacts()?;
        clear_artifacts(&self.output_dir)?;

        let mut report = RenderReport::default();
        for artifact in artifacts {
            match self.render(&artifact) {
                Ok(path) => report.written.push(path),
                Err(e) => {
                    warn!(artifact = %artifact, error = %e, "render failed");
                    report.failed.push((artifact, e));
                }
            }
        }
        info!(
            written = report.written.len(),
            failed = report.failed.len(),
            "render pass complete"
        );
        Ok(report)
    }
}

fn party_of(result: &RawResult) -> Result<Party, RenderError> {
    result
        .party_code()
        .parse()
        .map_err(|_| RenderError::UnknownParty {
            party: result.party_code().to_string(),
            result_id: result.id.clone(),
        })
}

/// Deletes every file in `dir` named like an artifact, including states no
/// longer in the store, creating `dir` if needed.
fn clear_artifacts(dir: &Path) -> Result<(), RenderError> {
    let io_err = |path: &Path, source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    };
    fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    for entry in fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let owned = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(Artifact::is_artifact_file);
        if owned {
            fs::remove_file(&path).map_err(|e| io_err(&path, e))?;
            debug!(path = %path.display(), "removed previous artifact");
        }
    }
    Ok(())
}
