//! Schema evaluation.
//!
//! [`SchemaValidator`] walks an instance and its schema together, collecting
//! one [`ValidationError`] per failed keyword. Evaluation never stops early;
//! callers that only want one error use [`SchemaValidator::first_error`],
//! which applies the path ordering documented on
//! [`ValidationError::sort_key`].

use std::collections::HashMap;

use invoice_model::{FieldPath, Keyword, ValidationError};
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{Result, SchemaError};
use crate::format;
use crate::schema::{AdditionalProperties, Schema};

/// A schema with its patterns compiled.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    schema: Schema,
    patterns: HashMap<String, Regex>,
}

impl SchemaValidator {
    /// Compiles `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidPattern`] if any `pattern` keyword is not
    /// a valid regular expression.
    pub fn new(schema: Schema) -> Result<Self> {
        let mut sources = Vec::new();
        schema.for_each_pattern(&mut |pattern| sources.push(pattern.to_string()));

        let mut patterns = HashMap::with_capacity(sources.len());
        for source in sources {
            if patterns.contains_key(&source) {
                continue;
            }
            let regex = Regex::new(&source).map_err(|e| SchemaError::InvalidPattern {
                pattern: source.clone(),
                source: e,
            })?;
            patterns.insert(source, regex);
        }

        Ok(Self { schema, patterns })
    }

    /// Parses and compiles a schema document.
    pub fn from_json_str(name: &str, json: &str) -> Result<Self> {
        let schema = Schema::from_json_str(json).map_err(|e| SchemaError::Parse {
            name: name.to_string(),
            source: e,
        })?;
        Self::new(schema)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns true when `instance` satisfies the schema.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.iter_errors(instance).is_empty()
    }

    /// Collects every violation, in evaluation order.
    pub fn iter_errors(&self, instance: &Value) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        self.descend(
            &self.schema,
            instance,
            &FieldPath::root(),
            &FieldPath::root(),
            &mut errors,
        );
        errors
    }

    /// Returns the violation with the smallest path, if any.
    pub fn first_error(&self, instance: &Value) -> Option<ValidationError> {
        ValidationError::first(self.iter_errors(instance))
    }

    fn descend(
        &self,
        schema: &Schema,
        instance: &Value,
        path: &FieldPath,
        schema_path: &FieldPath,
        errors: &mut Vec<ValidationError>,
    ) {
        self.check_common(schema, instance, path, schema_path, errors);

        match instance {
            Value::String(s) => self.check_string(schema, s, instance, path, schema_path, errors),
            Value::Number(_) => check_number(schema, instance, path, schema_path, errors),
            Value::Array(items) => self.check_array(schema, items, path, schema_path, errors),
            Value::Object(map) => self.check_object(schema, map, path, schema_path, errors),
            Value::Null | Value::Bool(_) => {}
        }
    }

    /// `type` and `enum`, which apply to every instance kind.
    fn check_common(
        &self,
        schema: &Schema,
        instance: &Value,
        path: &FieldPath,
        schema_path: &FieldPath,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Some(kind) = &schema.kind {
            if !kind.matches(instance) {
                let expected = kind
                    .types()
                    .iter()
                    .map(|t| format!("\"{t}\""))
                    .collect::<Vec<_>>()
                    .join(", ");
                errors.push(ValidationError::new(
                    path.clone(),
                    schema_path.child("type"),
                    Keyword::Type,
                    format!("{instance} is not of type {expected}"),
                ));
            }
        }

        if let Some(allowed) = &schema.allowed {
            if !allowed.contains(instance) {
                let options = Value::Array(allowed.clone());
                errors.push(ValidationError::new(
                    path.clone(),
                    schema_path.child("enum"),
                    Keyword::Enum,
                    format!("{instance} is not one of {options}"),
                ));
            }
        }
    }

    fn check_string(
        &self,
        schema: &Schema,
        s: &str,
        instance: &Value,
        path: &FieldPath,
        schema_path: &FieldPath,
        errors: &mut Vec<ValidationError>,
    ) {
        let length = s.chars().count();

        if let Some(min) = schema.min_length {
            if length < min {
                errors.push(ValidationError::new(
                    path.clone(),
                    schema_path.child("minLength"),
                    Keyword::MinLength,
                    format!("{instance} is too short"),
                ));
            }
        }

        if let Some(max) = schema.max_length {
            if length > max {
                errors.push(ValidationError::new(
                    path.clone(),
                    schema_path.child("maxLength"),
                    Keyword::MaxLength,
                    format!("{instance} is too long"),
                ));
            }
        }

        if let Some(pattern) = &schema.pattern {
            let matched = self
                .patterns
                .get(pattern)
                .is_some_and(|regex| regex.is_match(s));
            if !matched {
                errors.push(ValidationError::new(
                    path.clone(),
                    schema_path.child("pattern"),
                    Keyword::Pattern,
                    format!("{instance} does not match \"{pattern}\""),
                ));
            }
        }

        if let Some(name) = &schema.format {
            if let Err(failure) = format::check(name, s) {
                let mut error = ValidationError::new(
                    path.clone(),
                    schema_path.child("format"),
                    Keyword::Format,
                    format!("{instance} is not a \"{name}\""),
                );
                if let Some(cause) = failure.cause {
                    error = error.with_cause(cause);
                }
                errors.push(error);
            }
        }
    }

    fn check_array(
        &self,
        schema: &Schema,
        items: &[Value],
        path: &FieldPath,
        schema_path: &FieldPath,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Some(min) = schema.min_items {
            if items.len() < min {
                errors.push(ValidationError::new(
                    path.clone(),
                    schema_path.child("minItems"),
                    Keyword::MinItems,
                    format!("{} is too short", render_array(items)),
                ));
            }
        }

        if let Some(max) = schema.max_items {
            if items.len() > max {
                errors.push(ValidationError::new(
                    path.clone(),
                    schema_path.child("maxItems"),
                    Keyword::MaxItems,
                    format!("{} is too long", render_array(items)),
                ));
            }
        }

        if let Some(item_schema) = &schema.items {
            let item_schema_path = schema_path.child("items");
            for (index, item) in items.iter().enumerate() {
                self.descend(
                    item_schema,
                    item,
                    &path.child(index),
                    &item_schema_path,
                    errors,
                );
            }
        }
    }

    fn check_object(
        &self,
        schema: &Schema,
        map: &Map<String, Value>,
        path: &FieldPath,
        schema_path: &FieldPath,
        errors: &mut Vec<ValidationError>,
    ) {
        for name in &schema.required {
            if !map.contains_key(name) {
                errors.push(ValidationError::new(
                    path.clone(),
                    schema_path.child("required"),
                    Keyword::Required,
                    format!("\"{name}\" is a required property"),
                ));
            }
        }

        for (name, property) in &schema.properties {
            if let Some(value) = map.get(name) {
                self.descend(
                    property,
                    value,
                    &path.child(name.as_str()),
                    &schema_path.child("properties").child(name.as_str()),
                    errors,
                );
            }
        }

        let Some(additional) = &schema.additional_properties else {
            return;
        };
        let mut extras: Vec<&String> = map
            .keys()
            .filter(|key| !schema.properties.contains_key(key.as_str()))
            .collect();
        extras.sort();

        match additional {
            AdditionalProperties::Allowed(true) => {}
            AdditionalProperties::Allowed(false) => {
                if extras.is_empty() {
                    return;
                }
                let names = extras
                    .iter()
                    .map(|key| format!("\"{key}\""))
                    .collect::<Vec<_>>()
                    .join(", ");
                let verb = if extras.len() == 1 { "was" } else { "were" };
                errors.push(ValidationError::new(
                    path.clone(),
                    schema_path.child("additionalProperties"),
                    Keyword::AdditionalProperties,
                    format!("Additional properties are not allowed ({names} {verb} unexpected)"),
                ));
            }
            AdditionalProperties::Schema(extra_schema) => {
                let extra_schema_path = schema_path.child("additionalProperties");
                for key in extras {
                    if let Some(value) = map.get(key) {
                        self.descend(
                            extra_schema,
                            value,
                            &path.child(key.as_str()),
                            &extra_schema_path,
                            errors,
                        );
                    }
                }
            }
        }
    }
}

fn check_number(
    schema: &Schema,
    instance: &Value,
    path: &FieldPath,
    schema_path: &FieldPath,
    errors: &mut Vec<ValidationError>,
) {
    let Some(n) = instance.as_f64() else {
        return;
    };

    if let Some(min) = schema.minimum {
        let failed = if schema.exclusive_minimum { n <= min } else { n < min };
        if failed {
            let relation = if schema.exclusive_minimum {
                "less than or equal to"
            } else {
                "less than"
            };
            errors.push(ValidationError::new(
                path.clone(),
                schema_path.child("minimum"),
                Keyword::Minimum,
                format!("{instance} is {relation} the minimum of {min}"),
            ));
        }
    }

    if let Some(max) = schema.maximum {
        let failed = if schema.exclusive_maximum { n >= max } else { n > max };
        if failed {
            let relation = if schema.exclusive_maximum {
                "greater than or equal to"
            } else {
                "greater than"
            };
            errors.push(ValidationError::new(
                path.clone(),
                schema_path.child("maximum"),
                Keyword::Maximum,
                format!("{instance} is {relation} the maximum of {max}"),
            ));
        }
    }
}

fn render_array(items: &[Value]) -> String {
    Value::Array(items.to_vec()).to_string()
}
