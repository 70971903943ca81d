//! Shared query infrastructure: the [`Query`] trait and [`QueryCommon`] fields.

use crate::types::{Level, RawResult};

/// Trait implemented by all result queries. A query renders itself as SQL
/// `WHERE` clauses for the SQLite store and as an in-memory predicate, and
/// both renditions must select the same rows.
pub trait Query {
    /// Appends ` AND ...` clauses to `sql`, pushing bound values onto `params`.
    /// Placeholders are numbered from `params.len() + 1`.
    fn add_to_sql(&self, sql: &mut String, params: &mut Vec<String>);

    /// Returns true if `result` satisfies every filter of this query.
    fn matches(&self, result: &RawResult) -> bool;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Restricts the query to one state postal code.
    fn with_state(mut self, statepostal: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().statepostal = Some(statepostal.trim().to_uppercase());
        self
    }

    /// Adds a reporting level to the accepted set.
    fn with_level(mut self, level: Level) -> Self
    where
        Self: Sized,
    {
        let levels = &mut self.get_common().levels;
        if !levels.contains(&level) {
            levels.push(level);
        }
        self
    }

    /// Adds several reporting levels to the accepted set.
    fn with_levels(mut self, levels: &[Level]) -> Self
    where
        Self: Sized,
    {
        for level in levels {
            self = self.with_level(*level);
        }
        self
    }
}

/// Filters shared by every query: state and level set. An empty level set
/// accepts every level.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryCommon {
    pub statepostal: Option<String>,
    pub levels: Vec<Level>,
}

impl QueryCommon {
    pub fn add_to_sql(&self, sql: &mut String, params: &mut Vec<String>) {
        if let Some(state) = &self.statepostal {
            params.push(state.clone());
            sql.push_str(&format!(" AND statepostal = ?{}", params.len()));
        }
        let levels: Vec<String> = self.levels.iter().map(|l| l.to_string()).collect();
        push_in_clause(sql, params, "level", &levels);
    }

    pub fn matches(&self, result: &RawResult) -> bool {
        if let Some(state) = &self.statepostal {
            if &result.statepostal != state {
                return false;
            }
        }
        if self.levels.is_empty() {
            return true;
        }
        match result.level {
            Some(level) => self.levels.contains(&level),
            None => false,
        }
    }
}

/// Appends ` AND column IN (?n, ...)`. An empty value list adds no clause.
pub(crate) fn push_in_clause(
    sql: &mut String,
    params: &mut Vec<String>,
    column: &str,
    values: &[String],
) {
    if values.is_empty() {
        return;
    }
    let placeholders: Vec<String> = values
        .iter()
        .map(|v| {
            params.push(v.clone());
            format!("?{}", params.len())
        })
        .collect();
    sql.push_str(&format!(" AND {} IN ({})", column, placeholders.join(", ")));
}
