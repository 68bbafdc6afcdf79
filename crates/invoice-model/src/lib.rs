//! Shared types for the invoice forms gateway.
//!
//! This crate provides the vocabulary used by every other crate in the
//! workspace:
//!
//! - **Payloads** ([`Payload`], [`ClientPayload`], [`InvoicePayload`]): JSON
//!   mappings as submitted by web forms and as forwarded to the invoicing API
//! - **Field paths** ([`FieldPath`], [`PathSegment`]): locations inside a
//!   payload with a total, documented ordering
//! - **Validation errors** ([`ValidationError`], [`Keyword`]): the first
//!   schema violation surfaced for a submission
//! - **Normalization errors** ([`NormalizeError`]): required-field contract
//!   failures
//!
//! # Example
//!
//! ```
//! use invoice_model::{FieldPath, PathSegment};
//!
//! let path = FieldPath::root().child("invoice_items").child(1usize);
//! assert_eq!(path.to_string(), "invoice_items[1]");
//! assert_eq!(path.segments()[1], PathSegment::Index(1));
//! ```

pub mod error;
pub mod fields;
pub mod path;
pub mod payload;
pub mod validation;

pub use error::{NormalizeError, Result};
pub use path::{FieldPath, PathSegment};
pub use payload::{ClientPayload, InvoicePayload, Payload, json_type_name, payload_from_value};
pub use validation::{ErrorResponse, Keyword, ValidationError};
