//! Client submission reshaping.

use invoice_model::fields::{CLIENT_IDENTITY_FIELDS, CONTACT, EMAIL, FIRST_NAME, LAST_NAME, NAME};
use invoice_model::{ClientPayload, NormalizeError, Payload, Result};
use serde_json::Value;

/// Reshapes a client submission for the invoicing API.
///
/// - `email`, `first_name` and `last_name` move into a nested `contact`
///   mapping and are removed from the top level
/// - `name` defaults to `"{first_name} {last_name}"` when absent or falsy
///   (`null`, `false`, `""`, zero, `[]` or `{}`); a whitespace-only name is
///   kept as submitted
/// - every other field is copied through unchanged
///
/// No schema validation happens here; callers that need it validate the
/// submission against the client schema first.
///
/// # Errors
///
/// Returns [`NormalizeError::MissingField`] if any identity field is absent.
pub fn normalize_client(raw: &Payload) -> Result<ClientPayload> {
    let email = require(raw, EMAIL)?;
    let first_name = require(raw, FIRST_NAME)?;
    let last_name = require(raw, LAST_NAME)?;

    let mut contact = Payload::new();
    contact.insert(EMAIL.to_string(), email.clone());
    contact.insert(FIRST_NAME.to_string(), first_name.clone());
    contact.insert(LAST_NAME.to_string(), last_name.clone());

    let name = match raw.get(NAME) {
        Some(name) if !is_falsy(name) => name.clone(),
        _ => Value::String(format!(
            "{} {}",
            as_display(first_name),
            as_display(last_name)
        )),
    };

    let mut client: Payload = raw
        .iter()
        .filter(|(key, _)| !CLIENT_IDENTITY_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    client.insert(CONTACT.to_string(), Value::Object(contact));
    client.insert(NAME.to_string(), name);

    tracing::debug!(fields = client.len(), "normalized client submission");
    Ok(ClientPayload::from_normalized(client))
}

fn require<'a>(raw: &'a Payload, field: &'static str) -> Result<&'a Value> {
    raw.get(field).ok_or(NormalizeError::MissingField { field })
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Strings render without quotes; anything else as compact JSON.
fn as_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_contact_built_from_identity_fields() {
        let raw = payload(json!({
            "email": "ada@example.com",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "name": "Analytical Engines Ltd",
            "city": "London"
        }));

        let client = normalize_client(&raw).unwrap();
        assert_eq!(
            client.get("contact"),
            Some(&json!({
                "email": "ada@example.com",
                "first_name": "Ada",
                "last_name": "Lovelace"
            }))
        );
        assert_eq!(client.get("name"), Some(&json!("Analytical Engines Ltd")));
        assert_eq!(client.get("city"), Some(&json!("London")));
        for field in CLIENT_IDENTITY_FIELDS {
            assert!(client.get(field).is_none(), "{field} left at top level");
        }
    }

    #[test]
    fn test_falsy_name_defaults_to_full_name() {
        let falsy = [
            json!(""),
            Value::Null,
            json!(false),
            json!(0),
            json!(0.0),
            json!([]),
            json!({}),
        ];
        for name in falsy {
            let raw = payload(json!({
                "email": "ada@example.com",
                "first_name": "Ada",
                "last_name": "Lovelace",
                "name": name
            }));
            let client = normalize_client(&raw).unwrap();
            assert_eq!(client.get("name"), Some(&json!("Ada Lovelace")));
        }
    }

    #[test]
    fn test_whitespace_name_is_kept() {
        let raw = payload(json!({
            "email": "ada@example.com",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "name": "   "
        }));
        let client = normalize_client(&raw).unwrap();
        assert_eq!(client.get("name"), Some(&json!("   ")));
    }

    #[test]
    fn test_truthy_non_string_name_is_kept() {
        for name in [json!(true), json!(7), json!(["Ada"]), json!({"display": "Ada"})] {
            let raw = payload(json!({
                "email": "ada@example.com",
                "first_name": "Ada",
                "last_name": "Lovelace",
                "name": name.clone()
            }));
            let client = normalize_client(&raw).unwrap();
            assert_eq!(client.get("name"), Some(&name));
        }
    }

    #[test]
    fn test_absent_name_defaults_to_full_name() {
        let raw = payload(json!({
            "email": "grace@example.com",
            "first_name": "Grace",
            "last_name": "Hopper"
        }));
        let client = normalize_client(&raw).unwrap();
        assert_eq!(client.get("name"), Some(&json!("Grace Hopper")));
    }

    #[test]
    fn test_missing_identity_field() {
        let raw = payload(json!({"email": "ada@example.com", "first_name": "Ada"}));
        let err = normalize_client(&raw).unwrap_err();
        assert_eq!(err, NormalizeError::MissingField { field: "last_name" });
    }

    #[test]
    fn test_input_not_modified() {
        let raw = payload(json!({
            "email": "ada@example.com",
            "first_name": "Ada",
            "last_name": "Lovelace"
        }));
        let before = raw.clone();
        let _ = normalize_client(&raw).unwrap();
        assert_eq!(raw, before);
    }

    #[test]
    fn test_submitted_contact_is_replaced() {
        let raw = payload(json!({
            "email": "ada@example.com",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "contact": {"phone": "555"}
        }));
        let client = normalize_client(&raw).unwrap();
        assert_eq!(client.get("contact").unwrap().get("phone"), None);
    }
}
