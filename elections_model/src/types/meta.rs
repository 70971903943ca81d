//! Per-race metadata seeded at setup.

use serde::{Deserialize, Serialize};

use super::result::ResultID;

/// Scheduling and incumbency data for one callable result.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RaceMeta {
    #[serde(skip)]
    pub result_id: ResultID,

    /// Poll closing time (Eastern), as displayed.
    pub poll_closing: Option<String>,

    /// Time first results are expected (Eastern); buckets the big board.
    pub first_results: Option<String>,

    /// Party holding the seat before the election.
    pub current_party: Option<String>,

    #[serde(skip)]
    pub race_type: Option<String>,

    #[serde(skip)]
    pub order: Option<i64>,
}
