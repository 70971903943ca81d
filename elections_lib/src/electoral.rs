//! Electoral vote tally with split-state handling.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use elections_model::types::{Call, Level, Party, RawResult};
use serde::Serialize;
use tracing::debug;

use crate::aggregate::district_key;
use crate::error::RenderError;
use crate::validation::{is_split_state, SPLIT_STATES, VALID_STATES};
use crate::winner::{call_for, is_winner};

pub const TOTAL_ELECTORAL_VOTES: i64 = 538;

/// Congressional districts of the split states.
pub const SPLIT_DISTRICTS: &[&str] = &["ME-1", "ME-2", "NE-1", "NE-2", "NE-3"];

/// Jurisdictions that must each have a called winner for the count to be
/// final: the non-split states, DC and the split-state districts.
pub fn expected_jurisdictions() -> Vec<String> {
    VALID_STATES
        .iter()
        .filter(|s| !SPLIT_STATES.contains(s))
        .chain(SPLIT_DISTRICTS.iter())
        .map(|s| s.to_string())
        .collect()
}

/// The tally as published in `top-level-results.json`.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ElectoralCollege {
    pub totals: BTreeMap<Party, i64>,
    pub complete: bool,
    pub unresolved: Vec<String>,
}

impl ElectoralCollege {
    pub fn total(&self) -> i64 {
        self.totals.values().sum()
    }

    pub fn votes(&self, party: Party) -> i64 {
        self.totals.get(&party).copied().unwrap_or(0)
    }
}

/// Accumulates electoral votes from presidential state and district rows.
#[derive(Clone, Debug)]
pub struct ElectoralVoteTallier {
    totals: BTreeMap<Party, i64>,
    resolved: BTreeSet<String>,
}

impl Default for ElectoralVoteTallier {
    fn default() -> Self {
        Self {
            totals: Party::ALL.iter().map(|p| (*p, 0)).collect(),
            resolved: BTreeSet::new(),
        }
    }
}

impl ElectoralVoteTallier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `result` if it is a called presidential winner. Statewide rows
    /// for Maine and Nebraska are skipped; their districts carry the votes.
    /// District rows of any other state repeat the statewide record and are
    /// skipped too.
    pub fn add(&mut self, result: &RawResult, call: &Call) -> Result<(), RenderError> {
        if !result.is_presidential() || !is_winner(result, call) {
            return Ok(());
        }
        let level = result.effective_level();
        let jurisdiction = match level {
            Level::State if is_split_state(&result.statepostal) => return Ok(()),
            Level::State => Some(result.statepostal.clone()),
            Level::District if is_split_state(&result.statepostal) => district_key(result),
            _ => return Ok(()),
        };

        let party: Party = result
            .party_code()
            .parse()
            .map_err(|_| RenderError::UnknownParty {
                party: result.party_code().to_string(),
                result_id: result.id.clone(),
            })?;

        // Desk overrides credit the full slate; an AP call credits what AP
        // reports as won.
        let votes = if call.follows_ap(result) {
            result.electwon.unwrap_or(0)
        } else {
            result.electtotal.unwrap_or(0)
        };
        *self.totals.entry(party).or_insert(0) += votes;
        debug!(result_id = %result.id, %party, votes, "credited electoral votes");

        if let Some(j) = jurisdiction {
            self.resolved.insert(j);
        }
        Ok(())
    }

    pub fn finish(self) -> ElectoralCollege {
        let unresolved: Vec<String> = expected_jurisdictions()
            .into_iter()
            .filter(|j| !self.resolved.contains(j))
            .collect();
        let total: i64 = self.totals.values().sum();
        ElectoralCollege {
            complete: unresolved.is_empty() && total == TOTAL_ELECTORAL_VOTES,
            totals: self.totals,
            unresolved,
        }
    }
}

/// Tallies every called winner among `results`. Calls are looked up by
/// result id; a result with no call is an error.
pub fn tally<'a>(
    results: impl IntoIterator<Item = &'a RawResult>,
    calls: &HashMap<String, Call>,
) -> Result<ElectoralCollege, RenderError> {
    let mut tallier = ElectoralVoteTallier::new();
    for result in results {
        if let Some(call) = call_for(result, calls)? {
            tallier.add(result, call)?;
        }
    }
    Ok(tallier.finish())
}
