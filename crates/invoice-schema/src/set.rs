//! The three form schemas used by the gateway.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::embedded::{CLIENT_SCHEMA, INVOICE_ITEM_SCHEMA, INVOICE_SCHEMA};
use crate::error::{Result, SchemaError};
use crate::validator::SchemaValidator;

/// Optional on-disk replacements for the embedded schemas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaPaths {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_item: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<PathBuf>,
}

/// Compiled invoice, line-item and client schemas.
#[derive(Debug, Clone)]
pub struct SchemaSet {
    pub invoice: SchemaValidator,
    pub invoice_item: SchemaValidator,
    pub client: SchemaValidator,
}

impl SchemaSet {
    /// Compiles the embedded default schemas.
    pub fn embedded() -> Result<Self> {
        Self::load(&SchemaPaths::default())
    }

    /// Compiles the schemas, reading each configured path and falling back to
    /// the embedded default where no path is set.
    pub fn load(paths: &SchemaPaths) -> Result<Self> {
        Ok(Self {
            invoice: load_one("invoice", paths.invoice.as_deref(), INVOICE_SCHEMA)?,
            invoice_item: load_one(
                "invoice_item",
                paths.invoice_item.as_deref(),
                INVOICE_ITEM_SCHEMA,
            )?,
            client: load_one("client", paths.client.as_deref(), CLIENT_SCHEMA)?,
        })
    }
}

fn load_one(name: &str, path: Option<&Path>, embedded: &str) -> Result<SchemaValidator> {
    let Some(path) = path else {
        tracing::debug!(schema = name, "using embedded schema");
        return SchemaValidator::from_json_str(name, embedded);
    };

    let content = fs::read_to_string(path).map_err(|e| SchemaError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(schema = name, path = %path.display(), "loaded schema from file");
    SchemaValidator::from_json_str(&path.display().to_string(), &content)
}
