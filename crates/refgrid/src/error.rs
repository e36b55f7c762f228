//! Error types for the refgrid library.

use std::path::PathBuf;

use thiserror::Error;

/// Error code surfaced when a schema file cannot be retrieved.
pub const ERROR_FETCHING_SCHEMA_FILE: &str = "ERROR_FETCHING_SCHEMA_FILE";

/// Main error type for refgrid operations.
#[derive(Debug, Error)]
pub enum RefgridError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A table with no rows was passed where rows are required.
    #[error("Invalid table '{table}': {message}")]
    InvalidTable { table: String, message: String },

    /// An answer entry held a table payload that could not be parsed.
    #[error("Malformed table payload in answer '{entry}': {message}")]
    MalformedTablePayload { entry: String, message: String },

    /// A record field flagged as a table could not be parsed.
    #[error("Malformed table payload in field '{field}': {message}")]
    MalformedFieldPayload { field: String, message: String },

    /// A reference identifier does not follow the `<prefix><digits>` form.
    #[error("Invalid reference '{0}': expected a one-character prefix followed by digits")]
    InvalidReference(String),

    /// Schema retrieval failed; `code` is always [`ERROR_FETCHING_SCHEMA_FILE`].
    #[error("{code}: {message}")]
    SchemaFetch { code: &'static str, message: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RefgridError {
    /// Build a schema fetch error with the fixed error code.
    pub fn schema_fetch(message: impl Into<String>) -> Self {
        Self::SchemaFetch {
            code: ERROR_FETCHING_SCHEMA_FILE,
            message: message.into(),
        }
    }
}

/// Result type alias for refgrid operations.
pub type Result<T> = std::result::Result<T, RefgridError>;
