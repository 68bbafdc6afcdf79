//! The invoicing capability consumed by the HTTP layer.

use std::future::Future;

use invoice_model::{ClientPayload, InvoicePayload};
use serde_json::Value;

use crate::error::Result;
use crate::types::Country;

/// Operations the gateway needs from an invoicing backend.
///
/// [`NinjaClient`](crate::NinjaClient) talks to Invoice Ninja; tests use
/// in-memory implementations that record what they receive.
pub trait InvoicingApi: Send + Sync + 'static {
    /// Creates a client and returns the API's response body.
    fn create_client(&self, client: &ClientPayload) -> impl Future<Output = Result<Value>> + Send;

    /// Creates a one-off invoice.
    fn create_invoice(&self, invoice: &InvoicePayload)
    -> impl Future<Output = Result<Value>> + Send;

    /// Creates an invoice on a repeating schedule.
    fn create_recurring_invoice(
        &self,
        invoice: &InvoicePayload,
    ) -> impl Future<Output = Result<Value>> + Send;

    /// Country lookup table.
    fn countries(&self) -> Vec<Country>;
}
