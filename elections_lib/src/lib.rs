//! Library layer for the election results pipeline: storage, ingest, and
//! the render engine that turns results into published JSON artifacts.
//!
//! A render pass selects results from a [`ResultStore`], enriches them with
//! desk calls and race meta, tallies electoral votes and chamber balance of
//! power, and writes each artifact grouped by geography.

pub mod aggregate;
pub mod bop;
pub mod config;
pub mod db;
pub mod electoral;
pub mod enrich;
pub mod error;
pub mod format;
pub mod ingest;
pub mod pickup;
pub mod render;
pub mod selector;
pub mod store;
pub mod validation;
pub mod winner;

pub use elections_model;
pub use elections_model::types;
pub use elections_model::{OfficeFilter, Projection, Query, RaceSet, ResultQuery};

pub use aggregate::{group, group_nested, GeographyKey, GroupKey, Grouped};
pub use bop::{BalanceOfPower, BopParty, ChamberSummary};
pub use config::{
    default_election_config, load_election_config, CalendarRow, ConfigError, ElectionConfig,
    RaceConfig,
};
pub use db::{Db, DbError, LAST_LOADED_AT};
pub use electoral::{ElectoralCollege, ElectoralVoteTallier, TOTAL_ELECTORAL_VOTES};
pub use enrich::{EnrichedResult, Enricher};
pub use error::{InvalidInput, RenderError};
pub use format::{comma_filter, percent_filter};
pub use ingest::{default_calendar, read_calendar_csv, read_results_csv, IngestError};
pub use pickup::PickupStatus;
pub use render::{Artifact, RenderReport, Renderer, StateSection, TopLevel};
pub use selector::ResultSelector;
pub use store::{MemoryStore, ResultStore};
pub use winner::is_winner;
