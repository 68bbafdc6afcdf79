//! Invoice submission stripping and validation.

use invoice_model::fields::{INVOICE_ITEMS, INVOICE_TRANSPORT_FIELDS};
use invoice_model::{FieldPath, InvoicePayload, Payload, ValidationError};
use invoice_schema::SchemaSet;
use serde_json::Value;

/// Returns a copy of `raw` without `csrf_token` and the top-level `qty` and
/// `cost` posted by the line-item editor.
pub fn strip_transport_fields(raw: &Payload) -> Payload {
    raw.iter()
        .filter(|(key, _)| !INVOICE_TRANSPORT_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Strips transport fields, then validates the invoice header and its line
/// items.
///
/// The header is checked first against `schemas.invoice`. Only if it passes
/// are the entries of `invoice_items` checked, in order, against
/// `schemas.invoice_item`; the first failing item ends validation and later
/// items are never looked at. Item errors are located under
/// `invoice_items[<index>]`.
///
/// # Errors
///
/// Returns the first violation by path order of the first failing stage.
pub fn normalize_and_validate_invoice(
    raw: &Payload,
    schemas: &SchemaSet,
) -> Result<InvoicePayload, ValidationError> {
    let invoice = strip_transport_fields(raw);
    let header = Value::Object(invoice.clone());

    if let Some(error) = schemas.invoice.first_error(&header) {
        tracing::debug!(path = %error.path, validator = %error.validator, "invoice header rejected");
        return Err(error);
    }

    if let Some(items) = invoice.get(INVOICE_ITEMS).and_then(Value::as_array) {
        let items_path = FieldPath::root().child(INVOICE_ITEMS);
        for (index, item) in items.iter().enumerate() {
            if let Some(error) = schemas.invoice_item.first_error(item) {
                let error = error.prefixed(&items_path.child(index));
                tracing::debug!(
                    path = %error.path,
                    validator = %error.validator,
                    "invoice line item rejected"
                );
                return Err(error);
            }
        }
        tracing::debug!(items = items.len(), "invoice validated");
    }

    Ok(InvoicePayload::from_normalized(invoice))
}
