//! Default form schemas, embedded at compile time with `include_str!()`.
//!
//! Deployments can replace any of them with a file on disk through
//! [`SchemaPaths`](crate::SchemaPaths).

/// Invoice header schema (`invoice.json`).
pub const INVOICE_SCHEMA: &str = include_str!("../data/invoice.json");

/// Invoice line-item schema (`invoice_item.json`).
pub const INVOICE_ITEM_SCHEMA: &str = include_str!("../data/invoice_item.json");

/// New client form schema (`client.json`).
pub const CLIENT_SCHEMA: &str = include_str!("../data/client.json");
