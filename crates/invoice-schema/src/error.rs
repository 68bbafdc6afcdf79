//! Error types for schema loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or compiling a schema.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// Schema file could not be read.
    #[error("Failed to read schema {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Schema document is not valid JSON or not a valid schema.
    #[error("Failed to parse schema '{name}': {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A `pattern` keyword holds an invalid regular expression.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
