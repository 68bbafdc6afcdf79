//! HTTP gateway between browser forms and the Invoice Ninja API.
//!
//! The browser fetches a blank form (`GET /newclient`, `GET /newinvoice`)
//! carrying a CSRF token, then posts the filled form back as JSON. The
//! gateway validates and reshapes the submission and forwards it to the
//! invoicing API, or answers with the first validation error.
//!
//! Modules:
//! - [`routes`]: axum handlers and the router
//! - [`config`]: TOML configuration with environment overrides
//! - [`csrf`], [`cors`]: request protection
//! - [`check`]: offline pipeline runs used by the CLI
//! - [`logging`]: subscriber setup and redaction of personal data

pub mod check;
pub mod config;
pub mod cors;
pub mod csrf;
pub mod error;
pub mod logging;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{AppConfig, ConfigError};
pub use error::AppError;
pub use routes::router;
pub use server::serve;
pub use state::AppState;
