//! Schema validation error values.
//!
//! A failed schema check produces one [`ValidationError`] per violated
//! keyword. Callers only ever surface the first one according to
//! [`ValidationError::sort_key`], which makes the reported error independent
//! of the order in which the validator happened to visit the payload.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::path::FieldPath;

/// Schema keyword that rejected a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Keyword {
    Type,
    Required,
    AdditionalProperties,
    MinItems,
    MaxItems,
    MinLength,
    MaxLength,
    Minimum,
    Maximum,
    Enum,
    Pattern,
    Format,
}

impl Keyword {
    /// Keyword as spelled in a JSON Schema document.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Required => "required",
            Self::AdditionalProperties => "additionalProperties",
            Self::MinItems => "minItems",
            Self::MaxItems => "maxItems",
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
            Self::Enum => "enum",
            Self::Pattern => "pattern",
            Self::Format => "format",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Location of the offending value inside the submission.
    pub path: FieldPath,
    /// Location of the failing keyword inside the schema.
    pub schema_path: FieldPath,
    /// The keyword that failed.
    pub validator: Keyword,
    /// Human-readable description.
    pub message: String,
    /// Underlying reason, when the keyword check had one (e.g. a date parse error).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl ValidationError {
    pub fn new(
        path: FieldPath,
        schema_path: FieldPath,
        validator: Keyword,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path,
            schema_path,
            validator,
            message: message.into(),
            cause: None,
        }
    }

    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Relocates the error under `prefix` (used for line items validated on their own).
    #[must_use]
    pub fn prefixed(self, prefix: &FieldPath) -> Self {
        Self {
            path: self.path.prefixed(prefix),
            ..self
        }
    }

    /// Ordering key: instance path, then schema path, then message.
    pub fn sort_key(&self) -> (&FieldPath, &FieldPath, &str) {
        (&self.path, &self.schema_path, &self.message)
    }

    /// Compares two errors by [`sort_key`](Self::sort_key).
    pub fn cmp_by_path(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }

    /// Returns the first error by path order, if any.
    pub fn first(errors: impl IntoIterator<Item = Self>) -> Option<Self> {
        errors.into_iter().min_by(Self::cmp_by_path)
    }

    /// Builds the body returned to HTTP callers.
    #[must_use]
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            message: self.message.clone(),
            path: Some(self.path.clone()),
            cause: self.cause.clone(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {})", self.message, self.path)
    }
}

impl std::error::Error for ValidationError {}

/// JSON error body: always a `message`, plus `path` and `cause` when known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<FieldPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl ErrorResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            cause: None,
        }
    }

    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}
