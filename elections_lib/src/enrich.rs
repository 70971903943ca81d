//! Attaches calls, race meta and derived flags to selected results.

use std::collections::HashMap;

use elections_model::types::{Call, RaceMeta, RawResult};
use elections_model::Projection;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::aggregate::Geography;
use crate::error::RenderError;
use crate::pickup::PickupStatus;
use crate::store::ResultStore;
use crate::winner::{call_for, is_winner};

/// A result as published: the projected raw fields followed by the desk's
/// call, race meta and derived flags.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct EnrichedResult {
    #[serde(skip)]
    pub source: RawResult,

    #[serde(flatten)]
    pub fields: Map<String, Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub call: Option<Call>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<RaceMeta>,

    #[serde(rename = "nprWinner")]
    pub npr_winner: bool,

    /// Set for Senate and House results only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup: Option<PickupStatus>,

    /// Electoral votes the party has won nationally; national presidential
    /// rows only.
    #[serde(rename = "nprElectwon", skip_serializing_if = "Option::is_none")]
    pub npr_electwon: Option<i64>,
}

impl Geography for EnrichedResult {
    fn source(&self) -> &RawResult {
        &self.source
    }
}

/// Calls and race meta for one render pass.
#[derive(Clone, Debug, Default)]
pub struct Enricher {
    calls: HashMap<String, Call>,
    metas: HashMap<String, RaceMeta>,
}

impl Enricher {
    pub fn new(calls: HashMap<String, Call>, metas: HashMap<String, RaceMeta>) -> Self {
        Self { calls, metas }
    }

    pub fn load<S: ResultStore + ?Sized>(store: &S) -> Result<Self, RenderError> {
        Ok(Self::new(store.calls()?, store.race_metas()?))
    }

    pub fn calls(&self) -> &HashMap<String, Call> {
        &self.calls
    }

    /// Race meta is required for callable results; county and township rows
    /// carry neither call nor meta.
    fn meta_for(&self, result: &RawResult) -> Result<Option<&RaceMeta>, RenderError> {
        if !result.is_callable() {
            return Ok(None);
        }
        self.metas
            .get(&result.id)
            .map(Some)
            .ok_or_else(|| RenderError::MissingMeta {
                result_id: result.id.clone(),
            })
    }

    pub fn enrich(
        &self,
        result: RawResult,
        projection: Projection,
    ) -> Result<EnrichedResult, RenderError> {
        let call = call_for(&result, &self.calls)?.cloned();
        let meta = self.meta_for(&result)?.cloned();

        let npr_winner = match &call {
            Some(call) => is_winner(&result, call),
            None => result.raw_winner(),
        };
        let pickup = result
            .is_chamber_race()
            .then(|| PickupStatus::detect(&result, npr_winner, meta.as_ref()));

        let fields = match serde_json::to_value(&result)? {
            Value::Object(map) => projection.apply(map),
            _ => Map::new(),
        };

        Ok(EnrichedResult {
            source: result,
            fields,
            call,
            meta,
            npr_winner,
            pickup,
            npr_electwon: None,
        })
    }

    pub fn enrich_all(
        &self,
        results: Vec<RawResult>,
        projection: Projection,
    ) -> Result<Vec<EnrichedResult>, RenderError> {
        results
            .into_iter()
            .map(|r| self.enrich(r, projection))
            .collect()
    }
}
