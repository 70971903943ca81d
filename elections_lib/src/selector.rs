//! Result selection for each published view.

use elections_model::types::{Chamber, Level, RawResult, GOVERNOR, PRESIDENT, US_HOUSE, US_SENATE};
use elections_model::{OfficeFilter, Projection, Query, RaceSet, ResultQuery};

use crate::config::ElectionConfig;
use crate::db::DbError;
use crate::store::ResultStore;
use crate::validation::is_valid_state;

const PRESIDENTIAL_LEVELS: &[Level] = &[Level::State, Level::District];
const COUNTY_LEVELS: &[Level] = &[Level::State, Level::District, Level::County, Level::Township];

/// Filters stored results. Curated and full race sets are the same query
/// with a different [`RaceSet`].
pub struct ResultSelector<'a, S: ResultStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: ResultStore + ?Sized> ResultSelector<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn select(&self, query: &ResultQuery) -> Result<Vec<RawResult>, DbError> {
        self.store.select(query)
    }

    /// Results for `office` at `levels`, optionally restricted to a candidate
    /// allowlist, over `races`.
    pub fn select_office(
        &self,
        office: OfficeFilter,
        levels: &[Level],
        candidates: Option<&[String]>,
        races: RaceSet,
    ) -> Result<Vec<RawResult>, DbError> {
        let mut query = ResultQuery {
            office,
            ..Default::default()
        }
        .with_levels(levels)
        .with_races(races);
        if let Some(candidates) = candidates {
            query = query.with_candidates(candidates);
        }
        self.store.select(&query)
    }

    /// States with per-state artifacts, sorted. The national rollup and
    /// territories are skipped.
    pub fn states(&self) -> Result<Vec<String>, DbError> {
        Ok(self
            .store
            .distinct_states()?
            .into_iter()
            .filter(|s| is_valid_state(s))
            .collect())
    }
}

/// Presidential state and district rows for the allowlisted candidates.
pub fn presidential(config: &ElectionConfig) -> ResultQuery {
    ResultQuery::office(PRESIDENT)
        .with_levels(PRESIDENTIAL_LEVELS)
        .with_candidates(&config.accepted_presidential_candidates)
        .with_projection(Projection::PresidentialState)
}

/// Presidential rows tallied for electoral votes. Every candidate counts.
pub fn electoral() -> ResultQuery {
    ResultQuery::office(PRESIDENT).with_levels(PRESIDENTIAL_LEVELS)
}

/// The nationwide presidential rollup.
pub fn presidential_national_rollup(config: &ElectionConfig) -> ResultQuery {
    ResultQuery::office(PRESIDENT)
        .with_level(Level::National)
        .with_candidates(&config.accepted_presidential_candidates)
        .with_projection(Projection::PresidentialState)
}

pub fn presidential_counties(config: &ElectionConfig, state: &str) -> ResultQuery {
    ResultQuery::office(PRESIDENT)
        .with_levels(COUNTY_LEVELS)
        .with_state(state)
        .with_candidates(&config.accepted_presidential_candidates)
        .with_projection(Projection::PresidentialCounty)
}

pub fn governor() -> ResultQuery {
    ResultQuery::office(GOVERNOR)
        .with_level(Level::State)
        .with_projection(Projection::Governor)
}

pub fn senate() -> ResultQuery {
    ResultQuery::office(US_SENATE)
        .with_level(Level::State)
        .with_projection(Projection::Senate)
}

/// House races curated for the national view.
pub fn house_selected(config: &ElectionConfig) -> ResultQuery {
    ResultQuery::office(US_HOUSE)
        .with_level(Level::State)
        .with_races(RaceSet::Selected(config.selected_house_races.clone()))
        .with_projection(Projection::House)
}

pub fn house() -> ResultQuery {
    ResultQuery::office(US_HOUSE)
        .with_level(Level::State)
        .with_projection(Projection::House)
}

pub fn ballot_measures() -> ResultQuery {
    ResultQuery::ballot_measures()
        .with_level(Level::State)
        .with_projection(Projection::BallotMeasure)
}

/// Every race of a chamber, for balance of power.
pub fn chamber(chamber: Chamber) -> ResultQuery {
    let projection = match chamber {
        Chamber::Senate => Projection::Senate,
        Chamber::House => Projection::House,
    };
    ResultQuery::office(chamber.officename())
        .with_level(Level::State)
        .with_projection(projection)
}
