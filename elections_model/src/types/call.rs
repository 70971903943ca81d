//! Editorial desk calls attached to callable results.

use serde::{Deserialize, Serialize};

use super::result::{RawResult, ResultID};

/// The desk's call for one result. Seeded with `accept_ap = true` and
/// `override_winner = false`, then edited independently of the feed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    #[serde(skip)]
    pub result_id: ResultID,

    /// Whether the wire-service winner flag is trusted for this result.
    pub accept_ap: bool,

    /// Marks this result as the winner regardless of the wire service.
    pub override_winner: bool,
}
impl Call {
    pub fn new(result_id: impl Into<ResultID>) -> Self {
        Self {
            result_id: result_id.into(),
            accept_ap: true,
            override_winner: false,
        }
    }

    pub fn with_accept_ap(mut self, accept_ap: bool) -> Self {
        self.accept_ap = accept_ap;
        self
    }

    pub fn with_override_winner(mut self, override_winner: bool) -> Self {
        self.override_winner = override_winner;
        self
    }

    /// True when the wire service's own winner flag stands as the call.
    pub fn follows_ap(&self, result: &RawResult) -> bool {
        result.raw_winner() && self.accept_ap
    }
}
