//! Error types for the invoicing API client.

use thiserror::Error;

/// Errors returned by the invoicing API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NinjaError {
    /// The API token is empty or not a valid header value.
    #[error("invalid API token: {0}")]
    InvalidToken(String),

    /// The request could not be sent or the response not received.
    #[error("network error: {0}")]
    Network(String),

    /// The API rejected the token.
    #[error("invoicing API rejected the token (HTTP {status})")]
    Unauthorized {
        /// HTTP status code.
        status: u16,
    },

    /// The API answered with a non-success status.
    #[error("invoicing API error (HTTP {status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },

    /// The response body is not the expected JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

impl NinjaError {
    /// Returns a user-friendly message suitable for a JSON error response.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidToken(_) | Self::Unauthorized { .. } => {
                "The invoicing service is not configured correctly."
            }
            Self::Network(_) => "Could not reach the invoicing service. Please try again later.",
            Self::Api { .. } => "The invoicing service rejected the request.",
            Self::JsonParse(_) => "The invoicing service returned an unexpected response.",
        }
    }

    /// HTTP status reported by the API, if it answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status } | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NinjaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::JsonParse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for NinjaError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse(err.to_string())
    }
}

/// Result type alias for invoicing API operations.
pub type Result<T> = std::result::Result<T, NinjaError>;
