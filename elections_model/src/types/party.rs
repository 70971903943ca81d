//! Party codes and legislative chambers.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::result::{US_HOUSE, US_SENATE};
use crate::errors::Error;

/// Parties eligible for electoral votes. Ordering follows declaration order
/// so tallies serialize deterministically.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Party {
    /// Democratic Party.
    #[serde(rename = "Dem")]
    Dem,

    /// Republican Party.
    #[serde(rename = "GOP")]
    Gop,

    /// Independent.
    #[serde(rename = "Ind")]
    Ind,

    /// Libertarian Party.
    #[serde(rename = "Lib")]
    Lib,

    /// Green Party.
    #[serde(rename = "Grn")]
    Grn,

    /// Better for America.
    #[serde(rename = "BFA")]
    Bfa,
}
impl Party {
    pub const ALL: [Party; 6] = [
        Party::Dem,
        Party::Gop,
        Party::Ind,
        Party::Lib,
        Party::Grn,
        Party::Bfa,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Party::Dem => "Dem",
            Party::Gop => "GOP",
            Party::Ind => "Ind",
            Party::Lib => "Lib",
            Party::Grn => "Grn",
            Party::Bfa => "BFA",
        }
    }
}
impl std::fmt::Display for Party {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
impl FromStr for Party {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Party::ALL
            .iter()
            .copied()
            .find(|p| p.code() == s)
            .ok_or_else(|| Error::UnknownParty(s.to_string()))
    }
}

/// Legislative chamber tracked for balance of power.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Chamber {
    /// US Senate.
    #[serde(rename = "senate")]
    Senate,

    /// US House of Representatives.
    #[serde(rename = "house")]
    House,
}
impl Chamber {
    pub fn total_seats(&self) -> i64 {
        match self {
            Chamber::Senate => 100,
            Chamber::House => 435,
        }
    }

    pub fn majority(&self) -> i64 {
        self.total_seats() / 2 + 1
    }

    /// Office name used by the feed for this chamber's races.
    pub fn officename(&self) -> &'static str {
        match self {
            Chamber::Senate => US_SENATE,
            Chamber::House => US_HOUSE,
        }
    }
}
impl std::fmt::Display for Chamber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Chamber::Senate => "senate",
                Chamber::House => "house",
            }
        )
    }
}
impl FromStr for Chamber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "senate" => Ok(Chamber::Senate),
            "house" => Ok(Chamber::House),
            _ => Err(Error::UnknownChamber(s.to_string())),
        }
    }
}
