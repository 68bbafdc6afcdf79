//! Form schemas and a Draft 4 (subset) JSON Schema evaluator.
//!
//! This crate provides:
//!
//! - **Schema model** ([`Schema`]): the keywords used by the invoice, line-item
//!   and client form schemas
//! - **Evaluator** ([`SchemaValidator`]): collects every violation of a
//!   document as [`ValidationError`](invoice_model::ValidationError) values
//!   and picks the first one by path order
//! - **Default schemas** ([`embedded`]): compiled into the binary, replaceable
//!   with files through [`SchemaPaths`]
//!
//! # Supported keywords
//!
//! `type`, `enum`, `required`, `properties`, `additionalProperties`, `items`,
//! `minItems`, `maxItems`, `minLength`, `maxLength`, `pattern`, `format`
//! (`date`, `email`), `minimum`, `maximum`, `exclusiveMinimum`,
//! `exclusiveMaximum`.
//!
//! # Example
//!
//! ```
//! use invoice_schema::SchemaSet;
//! use serde_json::json;
//!
//! let schemas = SchemaSet::embedded().unwrap();
//! let error = schemas.invoice_item.first_error(&json!({"qty": 1})).unwrap();
//! assert_eq!(error.message, r#""cost" is a required property"#);
//! ```

pub mod embedded;
pub mod error;
pub mod format;
pub mod schema;
pub mod set;
pub mod validator;

pub use error::{Result, SchemaError};
pub use schema::{AdditionalProperties, JsonType, Schema, TypeSet};
pub use set::{SchemaPaths, SchemaSet};
pub use validator::SchemaValidator;
