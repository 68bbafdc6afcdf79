//! Shared, read-only request state.

use std::sync::Arc;

use invoice_ninja::InvoicingApi;
use invoice_schema::SchemaSet;

use crate::csrf::CsrfGuard;

/// Everything a handler needs. Built once at startup and never mutated.
#[derive(Debug)]
pub struct AppState<A> {
    pub api: A,
    pub schemas: SchemaSet,
    pub csrf: CsrfGuard,
}

impl<A: InvoicingApi> AppState<A> {
    pub fn new(api: A, schemas: SchemaSet, csrf: CsrfGuard) -> Self {
        Self { api, schemas, csrf }
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
