//! Error types for payload normalization.

use thiserror::Error;

/// Errors raised while reshaping a submission.
///
/// Schema violations are not errors in this sense: they are returned as
/// [`ValidationError`](crate::ValidationError) values. These variants cover
/// broken required-field contracts that the caller has to map to a response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NormalizeError {
    /// A field the normalizer relies on is absent.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the absent field.
        field: &'static str,
    },

    /// The submitted body is not a JSON object.
    #[error("Expected a JSON object, found {found}")]
    NotAnObject {
        /// JSON type of the submitted body.
        found: &'static str,
    },
}

impl NormalizeError {
    /// Returns a user-facing message suitable for a JSON error response.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingField { field } => format!("'{field}' is a required property"),
            Self::NotAnObject { .. } => "The request body must be a JSON object.".to_string(),
        }
    }
}

/// Result type alias for normalization operations.
pub type Result<T> = std::result::Result<T, NormalizeError>;
