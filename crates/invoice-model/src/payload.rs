//! Submission and payload mappings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{NormalizeError, Result};

/// A JSON object as submitted by a form or forwarded to the invoicing API.
pub type Payload = Map<String, Value>;

/// Client data in the shape expected by the invoicing API.
///
/// Never carries `email`, `first_name` or `last_name` at the top level; those
/// live in the nested `contact` mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientPayload(Payload);

impl ClientPayload {
    /// Wraps a mapping produced by client normalization.
    pub fn from_normalized(payload: Payload) -> Self {
        Self(payload)
    }

    pub fn as_map(&self) -> &Payload {
        &self.0
    }

    pub fn into_inner(self) -> Payload {
        self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// Invoice data that passed header and line-item validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoicePayload(Payload);

impl InvoicePayload {
    /// Wraps a mapping that passed invoice validation.
    pub fn from_normalized(payload: Payload) -> Self {
        Self(payload)
    }

    pub fn as_map(&self) -> &Payload {
        &self.0
    }

    pub fn into_inner(self) -> Payload {
        self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a copy without `key`, leaving `self` untouched.
    #[must_use]
    pub fn without(&self, key: &str) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

/// Converts a decoded request body into a [`Payload`].
///
/// # Errors
///
/// Returns [`NormalizeError::NotAnObject`] when the body is not a JSON object.
pub fn payload_from_value(value: Value) -> Result<Payload> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(NormalizeError::NotAnObject {
            found: json_type_name(&other),
        }),
    }
}

/// JSON type name of a value, as used in schema messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
