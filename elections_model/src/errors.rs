//! Error types for the result model.

/// Errors raised when a raw code does not map onto a known model value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A reporting level outside national/state/district/county/township.
    #[error("unknown reporting level '{0}'")]
    UnknownLevel(String),
    /// A party code outside the electoral tally table.
    #[error("unknown party code '{0}'")]
    UnknownParty(String),
    /// A chamber name other than senate or house.
    #[error("unknown chamber '{0}'")]
    UnknownChamber(String),
}
