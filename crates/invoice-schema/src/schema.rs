//! Schema document model.
//!
//! Only the Draft 4 keywords needed by the form schemas are modelled.
//! Annotation keywords such as `$schema`, `title` and `description` are
//! accepted, and any other unknown keyword is ignored.

use std::collections::BTreeMap;
use std::fmt;

use invoice_model::Payload;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON value types recognised by the `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
    Null,
}

impl JsonType {
    /// Checks whether `value` is an instance of this type.
    ///
    /// `integer` only accepts numbers stored as integers (Draft 4 semantics:
    /// `1.0` is a number but not an integer).
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::Null => value.is_null(),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of the `type` keyword: one type or a list of alternatives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(JsonType),
    Many(Vec<JsonType>),
}

impl TypeSet {
    pub fn types(&self) -> &[JsonType] {
        match self {
            Self::Single(kind) => std::slice::from_ref(kind),
            Self::Many(kinds) => kinds,
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        self.types().iter().any(|kind| kind.matches(value))
    }

    pub fn includes(&self, kind: JsonType) -> bool {
        self.types().contains(&kind)
    }
}

/// Value of `additionalProperties`: a switch or a schema for extra keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<Schema>),
}

/// A (sub)schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TypeSet>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<Value>>,

    // Objects
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<AdditionalProperties>,

    // Arrays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,

    // Strings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    // Numbers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default)]
    pub exclusive_minimum: bool,
    #[serde(default)]
    pub exclusive_maximum: bool,
}

impl Schema {
    /// Parses a schema document.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Default field values for an empty form built from this schema.
    ///
    /// Every declared property maps to `null`, except array properties which
    /// start as an empty list.
    pub fn blank_form(&self) -> Payload {
        self.properties
            .iter()
            .map(|(name, property)| {
                let is_array = property
                    .kind
                    .as_ref()
                    .is_some_and(|kind| kind.includes(JsonType::Array));
                let value = if is_array {
                    Value::Array(Vec::new())
                } else {
                    Value::Null
                };
                (name.clone(), value)
            })
            .collect()
    }

    /// Visits every pattern declared in this schema and its subschemas.
    pub(crate) fn for_each_pattern<'a>(&'a self, visit: &mut impl FnMut(&'a str)) {
        if let Some(pattern) = &self.pattern {
            visit(pattern);
        }
        for property in self.properties.values() {
            property.for_each_pattern(visit);
        }
        if let Some(AdditionalProperties::Schema(extra)) = &self.additional_properties {
            extra.for_each_pattern(visit);
        }
        if let Some(items) = &self.items {
            items.for_each_pattern(visit);
        }
    }
}
