//! Election configuration: candidate allowlist, curated races, prior chamber
//! composition and per-race metadata.

use std::collections::BTreeMap;
use std::path::Path;

use elections_model::types::Chamber;
use serde::{Deserialize, Serialize};

use crate::bop::BopParty;

const DEFAULT_CONFIG: &str = include_str!("../../seed_data/election.yml");

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yml::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Seats held per bucket before any race is called.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PriorComposition {
    pub senate: BTreeMap<BopParty, i64>,
    pub house: BTreeMap<BopParty, i64>,
}

impl PriorComposition {
    pub fn for_chamber(&self, chamber: Chamber) -> &BTreeMap<BopParty, i64> {
        match chamber {
            Chamber::Senate => &self.senate,
            Chamber::House => &self.house,
        }
    }
}

/// Metadata for one race, keyed by race id in [`ElectionConfig::races`].
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RaceConfig {
    pub current_party: Option<String>,
    pub race_type: Option<String>,
    pub order: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ElectionConfig {
    pub accepted_presidential_candidates: Vec<String>,
    pub selected_house_races: Vec<String>,
    pub prior_composition: PriorComposition,
    pub races: BTreeMap<String, RaceConfig>,
}

impl ElectionConfig {
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: ElectionConfig = serde_yml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for chamber in [Chamber::Senate, Chamber::House] {
            let prior = self.prior_composition.for_chamber(chamber);
            if let Some((party, seats)) = prior.iter().find(|(_, seats)| **seats < 0) {
                return Err(ConfigError::Invalid(format!(
                    "{} prior seats for {} is negative ({})",
                    chamber, party, seats
                )));
            }
            let held: i64 = prior.values().sum();
            if held > chamber.total_seats() {
                return Err(ConfigError::Invalid(format!(
                    "{} prior seats ({}) exceed chamber size ({})",
                    chamber,
                    held,
                    chamber.total_seats()
                )));
            }
        }
        Ok(())
    }
}

/// The configuration bundled with the crate.
pub fn default_election_config() -> Result<ElectionConfig, ConfigError> {
    ElectionConfig::from_yaml(DEFAULT_CONFIG)
}

pub fn load_election_config(path: impl AsRef<Path>) -> Result<ElectionConfig, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    ElectionConfig::from_yaml(&text)
}

/// One row of the poll-closing calendar, keyed by state postal code.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CalendarRow {
    pub key: String,
    pub time_est: String,
    pub first_results_est: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = default_election_config().unwrap();
        assert!(config.accepted_presidential_candidates.contains(&"Trump".to_string()));
        assert_eq!(config.prior_composition.senate[&BopParty::Dem], 34);
        assert_eq!(config.prior_composition.senate[&BopParty::Gop], 30);
        assert_eq!(config.prior_composition.senate[&BopParty::Other], 2);
        assert!(config.races.is_empty());
    }

    #[test]
    fn test_races_parse() {
        let config = ElectionConfig::from_yaml(
            r#"
races:
  "39347":
    current_party: GOP
    race_type: incumbent
    order: 3
"#,
        )
        .unwrap();
        let race = &config.races["39347"];
        assert_eq!(race.current_party.as_deref(), Some("GOP"));
        assert_eq!(race.order, Some(3));
        assert!(config.prior_composition.house.is_empty());
    }

    #[test]
    fn test_prior_overflow_rejected() {
        let err = ElectionConfig::from_yaml(
            r#"
prior_composition:
  senate:
    Dem: 60
    GOP: 50
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_unknown_bucket_rejected() {
        let err = ElectionConfig::from_yaml(
            r#"
prior_composition:
  senate:
    Whig: 1
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }
}
