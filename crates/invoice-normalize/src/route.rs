//! Standard versus recurring invoice routing.

use invoice_model::InvoicePayload;
use invoice_model::fields::{EMAIL_INVOICE, RECURRING};
use serde_json::Value;

/// Which creation endpoint a validated invoice goes to.
#[derive(Debug, Clone, PartialEq)]
pub enum InvoiceRoute {
    /// One-off invoice, payload unchanged.
    Standard(InvoicePayload),
    /// Recurring invoice, `email_invoice` removed.
    Recurring(InvoicePayload),
}

impl InvoiceRoute {
    pub fn payload(&self) -> &InvoicePayload {
        match self {
            Self::Standard(payload) | Self::Recurring(payload) => payload,
        }
    }

    pub fn into_payload(self) -> InvoicePayload {
        match self {
            Self::Standard(payload) | Self::Recurring(payload) => payload,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Standard(_) => "standard",
            Self::Recurring(_) => "recurring",
        }
    }
}

/// True when `recurring` is present, not `null`, and not the empty string.
///
/// Any other value counts, including `false` and whitespace.
pub fn is_recurring(invoice: &InvoicePayload) -> bool {
    match invoice.get(RECURRING) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Chooses the creation path for a validated invoice.
pub fn route_invoice(invoice: InvoicePayload) -> InvoiceRoute {
    if is_recurring(&invoice) {
        let dropped = invoice.get(EMAIL_INVOICE).is_some();
        tracing::debug!(email_invoice_dropped = dropped, "routing recurring invoice");
        InvoiceRoute::Recurring(invoice.without(EMAIL_INVOICE))
    } else {
        InvoiceRoute::Standard(invoice)
    }
}
