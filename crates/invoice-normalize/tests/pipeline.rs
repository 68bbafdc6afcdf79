//! End-to-end behaviour of the invoice pipeline against the default schemas.

use invoice_model::{FieldPath, Keyword, Payload};
use invoice_normalize::{InvoiceRoute, normalize_and_validate_invoice, route_invoice};
use invoice_schema::{SchemaSet, SchemaValidator};
use serde_json::{Value, json};

fn payload(value: Value) -> Payload {
    value.as_object().cloned().expect("test payload is an object")
}

fn schemas() -> SchemaSet {
    SchemaSet::embedded().expect("embedded schemas compile")
}

fn three_items() -> Value {
    json!([
        {"product_key": "design", "notes": "Logo", "qty": 1, "cost": 400},
        {"product_key": "hosting", "notes": "12 months", "qty": 12, "cost": 9.99},
        {"product_key": "support", "notes": "Hours", "qty": 3.5, "cost": 60, "tax_rate1": 21}
    ])
}

#[test]
fn test_transport_fields_never_survive() {
    let raw = payload(json!({
        "csrf_token": "1700000000.deadbeef",
        "qty": 1,
        "cost": 12,
        "client_id": 3,
        "invoice_items": [{"qty": 1, "cost": 12}]
    }));
    let invoice = normalize_and_validate_invoice(&raw, &schemas()).unwrap();
    for key in ["csrf_token", "qty", "cost"] {
        assert!(invoice.get(key).is_none(), "{key} survived");
    }
}

#[test]
fn test_header_error_reports_first_path() {
    let raw = payload(json!({
        "client_id": "three",
        "due_date": "tomorrow",
        "invoice_items": [{"qty": 1, "cost": 1}]
    }));
    let err = normalize_and_validate_invoice(&raw, &schemas()).unwrap_err();

    // "client_id" sorts before "due_date".
    assert_eq!(err.path, FieldPath::root().child("client_id"));
    assert_eq!(err.validator, Keyword::Type);
}

#[test]
fn test_header_error_skips_items_that_would_sort_first() {
    let mut schemas = schemas();
    schemas.invoice = SchemaValidator::from_json_str(
        "invoice",
        r#"{
            "type": "object",
            "required": ["invoice_items"],
            "properties": {
                "invoice_items": {"type": "array"},
                "zz": {"type": "integer"}
            }
        }"#,
    )
    .expect("header schema compiles");
    let raw = payload(json!({
        "zz": "not a number",
        "invoice_items": [{"qty": "x"}]
    }));

    // invoice_items[0] sorts before zz, so only skipping the items yields zz.
    let err = normalize_and_validate_invoice(&raw, &schemas).unwrap_err();
    assert_eq!(err.path, FieldPath::root().child("zz"));
    assert_eq!(err.validator, Keyword::Type);
}

#[test]
fn test_missing_required_header_field_sorts_first() {
    let raw = payload(json!({
        "discount": -1,
        "invoice_items": [{"qty": 1, "cost": 1}]
    }));
    let err = normalize_and_validate_invoice(&raw, &schemas()).unwrap_err();
    assert!(err.path.is_root());
    assert_eq!(err.validator, Keyword::Required);
}

#[test]
fn test_second_item_missing_cost() {
    let raw = payload(json!({
        "client_id": 3,
        "invoice_items": [
            {"qty": 1, "cost": 10},
            {"qty": 2},
            {"qty": "not checked", "cost": "not checked"}
        ]
    }));
    let schemas = schemas();
    let err = normalize_and_validate_invoice(&raw, &schemas).unwrap_err();

    assert_eq!(
        err.path,
        FieldPath::root().child("invoice_items").child(1usize)
    );
    assert_eq!(err.message, r#""cost" is a required property"#);

    // Re-running yields the same single error.
    let again = normalize_and_validate_invoice(&raw, &schemas).unwrap_err();
    assert_eq!(err, again);

    // Items after the failing one do not influence the outcome.
    let mut truncated = raw.clone();
    truncated.insert(
        "invoice_items".to_string(),
        json!([{"qty": 1, "cost": 10}, {"qty": 2}]),
    );
    let truncated_err = normalize_and_validate_invoice(&truncated, &schemas).unwrap_err();
    assert_eq!(err, truncated_err);
}

#[test]
fn test_valid_invoice_round_trips_items() {
    let raw = payload(json!({
        "csrf_token": "1700000000.deadbeef",
        "client_id": 3,
        "invoice_date": "2024-06-01",
        "due_date": "2024-07-01",
        "invoice_items": three_items()
    }));
    let invoice = normalize_and_validate_invoice(&raw, &schemas()).unwrap();

    assert_eq!(invoice.get("invoice_items"), Some(&three_items()));
    let mut expected = raw.clone();
    expected.remove("csrf_token");
    assert_eq!(invoice.as_map(), &expected);
    assert_eq!(
        serde_json::to_string(&invoice.get("invoice_items")).unwrap(),
        serde_json::to_string(&Some(three_items())).unwrap()
    );
}

#[test]
fn test_recurring_route_drops_email_invoice() {
    let raw = payload(json!({
        "client_id": 3,
        "recurring": "monthly",
        "frequency_id": 4,
        "start_date": "2024-06-01",
        "email_invoice": true,
        "invoice_items": three_items()
    }));
    let invoice = normalize_and_validate_invoice(&raw, &schemas()).unwrap();
    match route_invoice(invoice) {
        InvoiceRoute::Recurring(payload) => {
            assert!(payload.get("email_invoice").is_none());
            assert_eq!(payload.get("frequency_id"), Some(&json!(4)));
        }
        InvoiceRoute::Standard(_) => panic!("expected recurring route"),
    }
}

#[test]
fn test_error_response_snapshot() {
    let raw = payload(json!({
        "client_id": 3,
        "invoice_items": [{"qty": 1, "cost": 10}, {"qty": -2, "cost": 10}]
    }));
    let err = normalize_and_validate_invoice(&raw, &schemas()).unwrap_err();
    insta::assert_json_snapshot!(err.to_response(), @r###"
    {
      "message": "-2 is less than or equal to the minimum of 0",
      "path": [
        "invoice_items",
        1,
        "qty"
      ]
    }
    "###);
}
