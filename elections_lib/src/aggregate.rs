//! Grouping of results into per-geography buckets.
//!
//! Every artifact is a map from a geography key to the ordered list of
//! results in that geography. Keys and the records within each key keep
//! first-seen order, so re-rendering an unchanged store is byte-identical.

use std::collections::HashMap;
use std::sync::OnceLock;

use elections_model::types::{Level, RawResult};
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::warn;

/// A bucket identifier: state postal code, county FIPS, race id, the
/// statewide sentinel or a `"{state}-{district}"` key.
pub type GeographyKey = String;

/// Key used for statewide rows when grouping by county FIPS.
pub const STATE_SENTINEL: &str = "state";

/// Reporting-unit name of at-large district rows, which never get a bucket.
pub const AT_LARGE: &str = "At Large";

/// Big-board bucket for races with no first-results time.
pub const UNSCHEDULED: &str = "unscheduled";

/// The field an artifact groups by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupKey {
    StatePostal,
    Fips,
    RaceId,
}

/// Access to the raw record behind a grouped item.
pub trait Geography {
    fn source(&self) -> &RawResult;
}

impl Geography for RawResult {
    fn source(&self) -> &RawResult {
        self
    }
}

/// The pattern is a fixed literal that always compiles, so `None` never
/// occurs in practice; `test_trailing_digits_compiles` pins that down.
fn trailing_digits() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)$").ok()).as_ref()
}

/// `"{state}-{n}"` from the trailing number of the reporting-unit name.
/// At-large rows yield `None`; a name without a number falls back to the
/// state postal code.
pub fn district_key(result: &RawResult) -> Option<GeographyKey> {
    let name = result.reportingunitname.as_deref().unwrap_or("").trim();
    if name == AT_LARGE {
        return None;
    }
    match trailing_digits().and_then(|re| re.captures(name)) {
        Some(caps) => Some(format!("{}-{}", result.statepostal, &caps[1])),
        None => Some(result.statepostal.clone()),
    }
}

/// The bucket `result` belongs in, or `None` if it is left out.
pub fn geography_key(result: &RawResult, key: GroupKey) -> Option<GeographyKey> {
    let level = result.effective_level();
    if result.is_presidential() && level == Level::District {
        return district_key(result);
    }
    match key {
        GroupKey::StatePostal => Some(result.statepostal.clone()),
        GroupKey::RaceId => result.raceid.clone(),
        GroupKey::Fips => match level {
            Level::State | Level::National => Some(STATE_SENTINEL.to_string()),
            _ => result
                .fipscode
                .clone()
                .filter(|f| !f.is_empty())
                .or_else(|| result.reportingunitid.clone()),
        },
    }
}

/// An insertion-ordered map of key to items.
#[derive(Clone, Debug, PartialEq)]
pub struct Grouped<T> {
    index: HashMap<GeographyKey, usize>,
    groups: Vec<(GeographyKey, Vec<T>)>,
}

impl<T> Default for Grouped<T> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }
}

impl<T> Grouped<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: GeographyKey, item: T) {
        match self.index.get(&key) {
            Some(&i) => self.groups[i].1.push(item),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push((key, vec![item]));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&[T]> {
        self.index.get(key).map(|&i| self.groups[i].1.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<T: Serialize> Serialize for Grouped<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (key, items) in &self.groups {
            map.serialize_entry(key, items)?;
        }
        map.end()
    }
}

/// Groups `items` by geography. Rows without a key are dropped.
pub fn group<T: Geography>(items: impl IntoIterator<Item = T>, key: GroupKey) -> Grouped<T> {
    let mut grouped = Grouped::new();
    for item in items {
        match geography_key(item.source(), key) {
            Some(k) => grouped.push(k, item),
            None => {
                let source = item.source();
                if source.reportingunitname.as_deref() != Some(AT_LARGE) {
                    warn!(result_id = %source.id, ?key, "result has no geography key, dropped");
                }
            }
        }
    }
    grouped
}

/// Outer buckets, each holding a geography grouping.
#[derive(Clone, Debug, PartialEq)]
pub struct Nested<T> {
    buckets: Vec<(String, Grouped<T>)>,
}

impl<T> Nested<T> {
    pub fn get(&self, bucket: &str) -> Option<&Grouped<T>> {
        self.buckets.iter().find(|(k, _)| k == bucket).map(|(_, g)| g)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl<T: Serialize> Serialize for Nested<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for (bucket, grouped) in &self.buckets {
            map.serialize_entry(bucket, grouped)?;
        }
        map.end()
    }
}

/// Groups `items` under an outer bucket chosen by `outer`, then by geography
/// within each bucket.
pub fn group_nested<T, F>(items: impl IntoIterator<Item = T>, outer: F, key: GroupKey) -> Nested<T>
where
    T: Geography,
    F: Fn(&T) -> String,
{
    let mut buckets: Grouped<T> = Grouped::new();
    for item in items {
        buckets.push(outer(&item), item);
    }
    Nested {
        buckets: buckets
            .groups
            .into_iter()
            .map(|(bucket, items)| (bucket, group(items, key)))
            .collect(),
    }
}
