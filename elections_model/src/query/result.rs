use crate::types::RawResult;

use super::{
    common::{push_in_clause, QueryCommon},
    Projection, Query,
};

/// Which office a query selects.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum OfficeFilter {
    /// Every office.
    #[default]
    Any,
    /// One office by its feed name (e.g. `U.S. Senate`).
    Office(String),
    /// Ballot measures, which the feed marks by flag rather than office name.
    BallotMeasures,
}

/// Whether a query covers every race of its office or a curated subset.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RaceSet {
    #[default]
    All,
    /// Only the listed race ids. An empty list selects nothing.
    Selected(Vec<String>),
}

/// Selects raw results by office, level, state, candidate allowlist and race
/// set, and names the projection the selected rows are published with.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultQuery {
    pub common: QueryCommon,
    pub office: OfficeFilter,
    pub candidates: Vec<String>,
    pub races: RaceSet,
    pub projection: Projection,
}

impl Query for ResultQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_sql(&self, sql: &mut String, params: &mut Vec<String>) {
        match &self.office {
            OfficeFilter::Any => {}
            OfficeFilter::Office(name) => {
                params.push(name.clone());
                sql.push_str(&format!(" AND officename = ?{}", params.len()));
            }
            OfficeFilter::BallotMeasures => sql.push_str(" AND is_ballot_measure = 1"),
        }
        self.common.add_to_sql(sql, params);
        push_in_clause(sql, params, "last", &self.candidates);
        match &self.races {
            RaceSet::All => {}
            RaceSet::Selected(ids) if ids.is_empty() => sql.push_str(" AND 0"),
            RaceSet::Selected(ids) => push_in_clause(sql, params, "raceid", ids),
        }
    }

    fn matches(&self, result: &RawResult) -> bool {
        let office_ok = match &self.office {
            OfficeFilter::Any => true,
            OfficeFilter::Office(name) => result.is_office(name),
            OfficeFilter::BallotMeasures => result.is_ballot_measure(),
        };
        let candidate_ok = self.candidates.is_empty()
            || result
                .last
                .as_ref()
                .is_some_and(|last| self.candidates.contains(last));
        let race_ok = match &self.races {
            RaceSet::All => true,
            RaceSet::Selected(ids) => result.raceid.as_ref().is_some_and(|id| ids.contains(id)),
        };
        office_ok && candidate_ok && race_ok && self.common.matches(result)
    }
}

impl ResultQuery {
    /// Results for one office, e.g. `ResultQuery::office("Governor")`.
    pub fn office(officename: &str) -> Self {
        Self {
            office: OfficeFilter::Office(officename.to_string()),
            ..Default::default()
        }
    }

    pub fn ballot_measures() -> Self {
        Self {
            office: OfficeFilter::BallotMeasures,
            ..Default::default()
        }
    }

    /// Restricts results to candidates whose last name is allowlisted.
    pub fn with_candidates(mut self, last_names: &[String]) -> Self {
        self.candidates.extend_from_slice(last_names);
        self
    }

    pub fn with_races(mut self, races: RaceSet) -> Self {
        self.races = races;
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }
}
