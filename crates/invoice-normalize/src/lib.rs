//! Normalization and validation of form submissions.
//!
//! This crate turns raw form mappings into payloads the invoicing API
//! accepts:
//!
//! - **Clients** ([`normalize_client`]): identity fields move into a nested
//!   `contact` mapping and a display `name` is derived when missing or falsy
//! - **Invoices** ([`normalize_and_validate_invoice`]): transport-only keys
//!   are stripped, the header is validated, then each line item in order;
//!   the first violation by path order is returned
//! - **Routing** ([`route_invoice`]): decides between standard and recurring
//!   invoice creation
//!
//! Every operation builds a fresh mapping; the caller's submission is never
//! modified.
//!
//! # Example
//!
//! ```
//! use invoice_normalize::{InvoiceRoute, normalize_and_validate_invoice, route_invoice};
//! use invoice_schema::SchemaSet;
//! use serde_json::json;
//!
//! let schemas = SchemaSet::embedded().unwrap();
//! let raw = json!({
//!     "csrf_token": "1700000000.abc",
//!     "client_id": 7,
//!     "recurring": "monthly",
//!     "email_invoice": true,
//!     "invoice_items": [{"qty": 1, "cost": 250}]
//! });
//!
//! let invoice = normalize_and_validate_invoice(raw.as_object().unwrap(), &schemas).unwrap();
//! assert!(invoice.get("csrf_token").is_none());
//!
//! match route_invoice(invoice) {
//!     InvoiceRoute::Recurring(payload) => assert!(payload.get("email_invoice").is_none()),
//!     InvoiceRoute::Standard(_) => unreachable!(),
//! }
//! ```

mod client;
mod invoice;
mod route;

pub use client::normalize_client;
pub use invoice::{normalize_and_validate_invoice, strip_transport_fields};
pub use route::{InvoiceRoute, is_recurring, route_invoice};
