//! Request failures and their HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use invoice_model::{ErrorResponse, NormalizeError, ValidationError};
use invoice_ninja::NinjaError;
use thiserror::Error;

use crate::csrf::CsrfError;

/// Why a form submission was not forwarded, or failed upstream.
#[derive(Debug, Error)]
pub enum AppError {
    /// The body is not valid JSON.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Csrf(#[from] CsrfError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    /// The payload violates a form schema.
    #[error("validation failed: {0}")]
    Validation(ValidationError),

    #[error(transparent)]
    Api(#[from] NinjaError),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl AppError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) | Self::Csrf(_) | Self::Normalize(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Api(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// JSON body sent to the browser.
    #[must_use]
    pub fn to_response(&self) -> ErrorResponse {
        match self {
            Self::InvalidBody(detail) => {
                ErrorResponse::message("The request body is not valid JSON.").with_cause(detail)
            }
            Self::Csrf(err) => ErrorResponse::message(err.to_string()),
            Self::Normalize(err) => ErrorResponse::message(err.user_message()),
            Self::Validation(err) => err.to_response(),
            Self::Api(err) => ErrorResponse::message(err.user_message()).with_cause(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_response())).into_response()
    }
}
