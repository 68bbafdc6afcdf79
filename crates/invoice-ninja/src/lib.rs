//! Invoice Ninja API client.
//!
//! The gateway only needs three write operations and one lookup table from
//! the invoicing backend. They are expressed as the [`InvoicingApi`] trait so
//! the HTTP layer can be exercised without a live API.
//!
//! - [`NinjaClient`]: reqwest-based implementation for the Invoice Ninja v1 API
//! - [`NinjaConfig`]: base URL, token and timeout
//! - [`StaticData`]: countries, frequencies and other lookup tables, loaded
//!   once by [`NinjaClient::connect`]
//!
//! # Example
//!
//! ```no_run
//! use invoice_ninja::{InvoicingApi, NinjaClient, NinjaConfig};
//!
//! async fn list_countries() -> invoice_ninja::Result<()> {
//!     let config = NinjaConfig {
//!         token: "my-api-token".to_string(),
//!         ..NinjaConfig::default()
//!     };
//!     let client = NinjaClient::connect(config).await?;
//!     for country in client.countries() {
//!         println!("{} {}", country.id, country.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use api::InvoicingApi;
pub use client::{NinjaClient, TOKEN_HEADER};
pub use config::NinjaConfig;
pub use error::{NinjaError, Result};
pub use types::{Country, Frequency, StaticData};
