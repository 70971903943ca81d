//! Read access to results, calls and race meta for a render pass.

use std::collections::HashMap;

use elections_model::types::{Call, RaceMeta, RawResult};
use elections_model::{Query, ResultQuery};

use crate::db::{Db, DbError};

/// The read side the render pipeline needs. A render pass only reads, so a
/// single store handle serves every artifact in a batch.
pub trait ResultStore {
    /// Results matching `query`, in ingestion order.
    fn select(&self, query: &ResultQuery) -> Result<Vec<RawResult>, DbError>;

    /// State postal codes present in the store, sorted.
    fn distinct_states(&self) -> Result<Vec<String>, DbError>;

    fn calls(&self) -> Result<HashMap<String, Call>, DbError>;

    fn race_metas(&self) -> Result<HashMap<String, RaceMeta>, DbError>;
}

impl ResultStore for Db {
    fn select(&self, query: &ResultQuery) -> Result<Vec<RawResult>, DbError> {
        self.select_results(query)
    }

    fn distinct_states(&self) -> Result<Vec<String>, DbError> {
        Db::distinct_states(self)
    }

    fn calls(&self) -> Result<HashMap<String, Call>, DbError> {
        Db::calls(self)
    }

    fn race_metas(&self) -> Result<HashMap<String, RaceMeta>, DbError> {
        Db::race_metas(self)
    }
}

/// A store held entirely in memory, filtering with [`Query::matches`].
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    results: Vec<RawResult>,
    calls: HashMap<String, Call>,
    metas: HashMap<String, RaceMeta>,
}

impl MemoryStore {
    pub fn new(results: Vec<RawResult>) -> Self {
        Self {
            results,
            ..Default::default()
        }
    }

    /// Seeds a default call for every callable result that lacks one.
    pub fn with_default_calls(mut self) -> Self {
        for result in self.results.iter().filter(|r| r.is_callable()) {
            self.calls
                .entry(result.id.clone())
                .or_insert_with(|| Call::new(result.id.clone()));
        }
        self
    }

    pub fn insert_call(&mut self, call: Call) {
        self.calls.insert(call.result_id.clone(), call);
    }

    pub fn remove_call(&mut self, result_id: &str) -> Option<Call> {
        self.calls.remove(result_id)
    }

    pub fn insert_meta(&mut self, meta: RaceMeta) {
        self.metas.insert(meta.result_id.clone(), meta);
    }
}

impl ResultStore for MemoryStore {
    fn select(&self, query: &ResultQuery) -> Result<Vec<RawResult>, DbError> {
        Ok(self
            .results
            .iter()
            .filter(|r| query.matches(r))
            .cloned()
            .collect())
    }

    fn distinct_states(&self) -> Result<Vec<String>, DbError> {
        let mut states: Vec<String> = self.results.iter().map(|r| r.statepostal.clone()).collect();
        states.sort();
        states.dedup();
        Ok(states)
    }

    fn calls(&self) -> Result<HashMap<String, Call>, DbError> {
        Ok(self.calls.clone())
    }

    fn race_metas(&self) -> Result<HashMap<String, RaceMeta>, DbError> {
        Ok(self.metas.clone())
    }
}
