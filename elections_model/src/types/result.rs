//! Result records as delivered by the ingestion tool.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::Error;

/// Unique identifier for a result row (one candidate in one reporting unit).
pub type ResultID = String;

/// Office name used by the feed for presidential races.
pub const PRESIDENT: &str = "President";
/// Office name used by the feed for gubernatorial races.
pub const GOVERNOR: &str = "Governor";
/// Office name used by the feed for Senate races.
pub const US_SENATE: &str = "U.S. Senate";
/// Office name used by the feed for House races.
pub const US_HOUSE: &str = "U.S. House";

/// Geographic level a result is reported at.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    /// Nationwide rollup (statepostal `US`).
    #[serde(rename = "national")]
    National,

    /// Statewide result.
    #[serde(rename = "state")]
    State,

    /// Congressional district (presidential split states, at-large units).
    #[serde(rename = "district")]
    District,

    /// County result.
    #[serde(rename = "county")]
    County,

    /// Township result (New England reporting units).
    #[serde(rename = "township")]
    Township,
}
impl Level {
    /// The wire name of this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::National => "national",
            Level::State => "state",
            Level::District => "district",
            Level::County => "county",
            Level::Township => "township",
        }
    }

    /// County and township results never carry a call or race meta.
    pub fn is_callable(&self) -> bool {
        !matches!(self, Level::County | Level::Township)
    }
}
impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "national" => Ok(Level::National),
            "state" => Ok(Level::State),
            "district" => Ok(Level::District),
            "county" => Ok(Level::County),
            "township" => Ok(Level::Township),
            _ => Err(Error::UnknownLevel(s.to_string())),
        }
    }
}

/// A single result row: one candidate (or ballot measure option) in one
/// reporting unit. Field names follow the ingestion tool's CSV header.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct RawResult {
    pub id: ResultID,
    pub raceid: Option<String>,
    pub racetype: Option<String>,
    pub racetypeid: Option<String>,
    pub ballotorder: Option<i64>,
    pub candidateid: Option<String>,
    pub description: Option<String>,
    pub delegatecount: Option<i64>,
    pub electiondate: Option<NaiveDate>,
    pub electtotal: Option<i64>,
    pub electwon: Option<i64>,
    pub fipscode: Option<String>,
    pub first: Option<String>,
    #[serde(deserialize_with = "flag")]
    pub incumbent: Option<bool>,
    #[serde(deserialize_with = "flag")]
    pub initialization_data: Option<bool>,
    #[serde(deserialize_with = "flag")]
    pub is_ballot_measure: Option<bool>,
    pub last: Option<String>,
    pub lastupdated: Option<String>,
    pub level: Option<Level>,
    #[serde(deserialize_with = "flag")]
    pub national: Option<bool>,
    pub officeid: Option<String>,
    pub officename: Option<String>,
    pub party: Option<String>,
    pub polid: Option<String>,
    pub polnum: Option<String>,
    pub precinctsreporting: Option<i64>,
    pub precinctsreportingpct: Option<f64>,
    pub precinctstotal: Option<i64>,
    pub reportingunitid: Option<String>,
    pub reportingunitname: Option<String>,
    #[serde(deserialize_with = "flag")]
    pub runoff: Option<bool>,
    pub seatname: Option<String>,
    pub seatnum: Option<String>,
    pub statename: Option<String>,
    pub statepostal: String,
    #[serde(deserialize_with = "flag")]
    pub test: Option<bool>,
    #[serde(deserialize_with = "flag")]
    pub uncontested: Option<bool>,
    pub votecount: Option<i64>,
    pub votepct: Option<f64>,
    #[serde(deserialize_with = "flag")]
    pub winner: Option<bool>,
}

impl RawResult {
    /// The wire-service winner flag; unset counts as not called.
    pub fn raw_winner(&self) -> bool {
        self.winner.unwrap_or(false)
    }

    /// A row with no level is treated as statewide, matching how the feed
    /// omits the level on statewide-only contests.
    pub fn effective_level(&self) -> Level {
        self.level.unwrap_or(Level::State)
    }

    /// Whether this row is expected to carry a call and race meta.
    pub fn is_callable(&self) -> bool {
        self.effective_level().is_callable()
    }

    pub fn is_office(&self, officename: &str) -> bool {
        self.officename.as_deref() == Some(officename)
    }

    pub fn is_presidential(&self) -> bool {
        self.is_office(PRESIDENT)
    }

    /// Senate and House races are the only ones where seat pickups apply.
    pub fn is_chamber_race(&self) -> bool {
        self.is_office(US_SENATE) || self.is_office(US_HOUSE)
    }

    pub fn is_ballot_measure(&self) -> bool {
        self.is_ballot_measure.unwrap_or(false)
    }

    pub fn party_code(&self) -> &str {
        self.party.as_deref().unwrap_or("")
    }
}

/// Boolean columns arrive as `True`/`False` from the CSV export and as JSON
/// booleans elsewhere; accept both.
fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    let value: Option<Flag> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(Flag::Bool(b)) => Ok(Some(b)),
        Some(Flag::Int(0)) => Ok(Some(false)),
        Some(Flag::Int(1)) => Ok(Some(true)),
        Some(Flag::Int(n)) => Err(serde::de::Error::custom(format!(
            "invalid boolean flag {}",
            n
        ))),
        Some(Flag::Text(s)) => match s.trim().to_lowercase().as_str() {
            "" => Ok(None),
            "true" | "t" | "yes" => Ok(Some(true)),
            "false" | "f" | "no" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "invalid boolean flag '{}'",
                other
            ))),
        },
    }
}
