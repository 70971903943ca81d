//! Error types for the library layer.

use std::fmt;
use std::path::PathBuf;

use elections_model::types::Chamber;

use crate::db::DbError;

/// Errors that abort the artifact currently being rendered. Sibling
/// artifacts in the same batch are unaffected.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// A callable result has no seeded call row.
    #[error("result {result_id} has no call")]
    MissingCall { result_id: String },
    /// A callable result has no race meta row.
    #[error("result {result_id} has no race meta")]
    MissingMeta { result_id: String },
    /// A tallied winner's party is outside the electoral party table.
    #[error("result {result_id} has unknown party code '{party}'")]
    UnknownParty { party: String, result_id: String },
    /// More seats were called than the chamber has.
    #[error("{chamber} has more called seats than total seats")]
    SeatOverflow { chamber: Chamber },
    #[error("store error: {0}")]
    Store(#[from] DbError),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// User-provided input failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidInput(pub String);

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid input: {}", self.0)
    }
}

impl std::error::Error for InvalidInput {}
