//! Behaviour of the default form schemas.

use invoice_model::Keyword;
use invoice_schema::SchemaSet;
use serde_json::json;

fn schemas() -> SchemaSet {
    SchemaSet::embedded().expect("embedded schemas compile")
}

#[test]
fn test_minimal_invoice_header_is_valid() {
    let invoice = json!({
        "client_id": 4,
        "invoice_items": [{"qty": 1, "cost": 10}]
    });
    assert!(schemas().invoice.is_valid(&invoice));
}

#[test]
fn test_invoice_header_does_not_check_items() {
    // Line items are validated separately by the normalizer.
    let invoice = json!({
        "client_id": 4,
        "invoice_items": [{"qty": "many"}]
    });
    assert!(schemas().invoice.is_valid(&invoice));
}

#[test]
fn test_invoice_requires_client_and_items() {
    let errors = schemas().invoice.iter_errors(&json!({}));
    let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
    assert!(messages.contains(&r#""client_id" is a required property"#));
    assert!(messages.contains(&r#""invoice_items" is a required property"#));
}

#[test]
fn test_invoice_items_must_not_be_empty() {
    let err = schemas()
        .invoice
        .first_error(&json!({"client_id": 1, "invoice_items": []}))
        .unwrap();
    assert_eq!(err.validator, Keyword::MinItems);
    assert_eq!(err.path.to_string(), "invoice_items");
}

#[test]
fn test_invoice_dates() {
    let schemas = schemas();
    let valid = json!({
        "client_id": 1,
        "invoice_items": [{}],
        "invoice_date": "2024-05-01",
        "due_date": "2024-05-31"
    });
    assert!(schemas.invoice.is_valid(&valid));

    let invalid = json!({
        "client_id": 1,
        "invoice_items": [{}],
        "due_date": "31/05/2024"
    });
    let err = schemas.invoice.first_error(&invalid).unwrap();
    assert_eq!(err.path.to_string(), "due_date");
    assert_eq!(err.validator, Keyword::Format);
}

#[test]
fn test_recurring_accepts_frequency_forms() {
    let schemas = schemas();
    for recurring in [json!(true), json!(4), json!("monthly"), json!(null)] {
        let invoice = json!({
            "client_id": 1,
            "invoice_items": [{}],
            "recurring": recurring
        });
        assert!(schemas.invoice.is_valid(&invoice), "{recurring} rejected");
    }
}

#[test]
fn test_item_quantity_must_be_positive() {
    let err = schemas()
        .invoice_item
        .first_error(&json!({"qty": 0, "cost": 5}))
        .unwrap();
    assert_eq!(err.path.to_string(), "qty");
    assert_eq!(err.validator, Keyword::Minimum);
}

#[test]
fn test_item_allows_free_cost() {
    assert!(
        schemas()
            .invoice_item
            .is_valid(&json!({"qty": 2, "cost": 0, "notes": "courtesy"}))
    );
}

#[test]
fn test_client_form() {
    let schemas = schemas();
    let client = json!({
        "email": "ada@example.com",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "name": null,
        "country_id": 1
    });
    assert!(schemas.client.is_valid(&client));

    let err = schemas
        .client
        .first_error(&json!({"email": "ada", "first_name": "Ada", "last_name": "L"}))
        .unwrap();
    assert_eq!(err.path.to_string(), "email");
}

#[test]
fn test_blank_client_form_lists_fields() {
    let form = schemas().client.schema().blank_form();
    for field in ["email", "first_name", "last_name", "name", "country_id"] {
        assert!(form.contains_key(field), "missing {field}");
    }
    assert!(form.values().all(serde_json::Value::is_null));
}
