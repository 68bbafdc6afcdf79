//! Stateless CSRF tokens.
//!
//! A token is `"{issued_at}.{signature}"`: the Unix timestamp it was issued
//! at, and the hex SHA-256 of the server secret followed by that timestamp.
//! Any instance sharing the secret can verify it without session storage.

use chrono::Utc;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::CsrfConfig;

/// Request header that may carry the token (`X-CSRFToken`).
pub const CSRF_HEADER: &str = "x-csrftoken";

/// Reasons a submission's token is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CsrfError {
    #[error("The CSRF token is missing.")]
    Missing,
    #[error("The CSRF token is malformed.")]
    Malformed,
    #[error("The CSRF token is invalid.")]
    BadSignature,
    #[error("The CSRF token has expired.")]
    Expired,
}

/// Issues and verifies tokens for one secret.
#[derive(Debug, Clone)]
pub struct CsrfGuard {
    enabled: bool,
    secret: String,
    ttl_secs: i64,
}

impl CsrfGuard {
    pub fn new(config: &CsrfConfig) -> Self {
        Self {
            enabled: config.enabled,
            secret: config.secret.clone(),
            ttl_secs: i64::try_from(config.ttl_secs).unwrap_or(i64::MAX),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// A token issued now.
    pub fn issue(&self) -> String {
        self.issue_at(Utc::now().timestamp())
    }

    pub fn issue_at(&self, issued_at: i64) -> String {
        format!("{issued_at}.{}", self.sign(issued_at))
    }

    /// Checks a submitted token against the current time.
    ///
    /// Always succeeds when protection is disabled.
    pub fn verify(&self, token: Option<&str>) -> Result<(), CsrfError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    pub fn verify_at(&self, token: Option<&str>, now: i64) -> Result<(), CsrfError> {
        if !self.enabled {
            return Ok(());
        }
        let token = token.map(str::trim).filter(|t| !t.is_empty());
        let token = token.ok_or(CsrfError::Missing)?;

        let (timestamp, signature) = token.split_once('.').ok_or(CsrfError::Malformed)?;
        let issued_at: i64 = timestamp.parse().map_err(|_| CsrfError::Malformed)?;

        if !constant_time_eq(signature.as_bytes(), self.sign(issued_at).as_bytes()) {
            return Err(CsrfError::BadSignature);
        }

        let age = now.saturating_sub(issued_at);
        if !(0..=self.ttl_secs).contains(&age) {
            return Err(CsrfError::Expired);
        }
        Ok(())
    }

    fn sign(&self, issued_at: i64) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(issued_at.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
