//! Property tests for client normalization.

use invoice_model::Payload;
use invoice_normalize::normalize_client;
use proptest::prelude::*;
use serde_json::{Value, json};

const RESERVED: [&str; 5] = ["email", "first_name", "last_name", "name", "contact"];

fn extra_attributes() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::btree_map("[a-z_]{1,12}", "[A-Za-z0-9 ]{0,16}", 0..6).prop_map(|pairs| {
        pairs
            .into_iter()
            .filter(|(key, _)| !RESERVED.contains(&key.as_str()))
            .collect()
    })
}

fn falsy_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(json!("")),
        Just(Value::Null),
        Just(json!(false)),
        Just(json!(0)),
        Just(json!([])),
        Just(json!({})),
    ]
}

fn submission(
    email: &str,
    first_name: &str,
    last_name: &str,
    name: Option<&str>,
    extras: &[(String, String)],
) -> Payload {
    let mut raw = Payload::new();
    for (key, value) in extras {
        raw.insert(key.clone(), Value::String(value.clone()));
    }
    raw.insert("email".to_string(), json!(email));
    raw.insert("first_name".to_string(), json!(first_name));
    raw.insert("last_name".to_string(), json!(last_name));
    if let Some(name) = name {
        raw.insert("name".to_string(), json!(name));
    }
    raw
}

proptest! {
    #[test]
    fn contact_holds_exactly_the_identity_fields(
        email in "[a-z]{1,8}@[a-z]{1,8}\\.com",
        first_name in "[A-Z][a-z]{0,10}",
        last_name in "[A-Z][a-z]{0,10}",
        name in proptest::option::of("[A-Za-z ]{0,20}"),
        extras in extra_attributes(),
    ) {
        let raw = submission(&email, &first_name, &last_name, name.as_deref(), &extras);
        let client = normalize_client(&raw).unwrap();

        prop_assert_eq!(
            client.get("contact"),
            Some(&json!({"email": email, "first_name": first_name, "last_name": last_name}))
        );
        for field in ["email", "first_name", "last_name"] {
            prop_assert!(client.get(field).is_none());
        }
        for (key, value) in &extras {
            prop_assert_eq!(client.get(key), Some(&Value::String(value.clone())));
        }
    }

    #[test]
    fn falsy_name_becomes_full_name(
        first_name in "[A-Z][a-z]{0,10}",
        last_name in "[A-Z][a-z]{0,10}",
        falsy in falsy_value(),
    ) {
        let mut raw = submission("x@example.com", &first_name, &last_name, None, &[]);
        raw.insert("name".to_string(), falsy);
        let client = normalize_client(&raw).unwrap();
        prop_assert_eq!(
            client.get("name"),
            Some(&Value::String(format!("{first_name} {last_name}")))
        );
    }

    #[test]
    fn non_empty_name_is_kept(
        name in "[ \tA-Za-z]{1,20}",
    ) {
        let raw = submission("x@example.com", "Ada", "Lovelace", Some(&name), &[]);
        let client = normalize_client(&raw).unwrap();
        prop_assert_eq!(client.get("name"), Some(&Value::String(name)));
    }
}
