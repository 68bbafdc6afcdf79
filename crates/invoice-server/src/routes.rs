//! Form endpoints.
//!
//! `GET` on a form path returns the blank form with a fresh CSRF token.
//! `POST` validates, normalizes and forwards the submission to the invoicing
//! API, answering with the API's response or an [`AppError`] body.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router, middleware};
use invoice_model::fields::{CONTACT, CSRF_TOKEN, EMAIL};
use invoice_model::{Payload, payload_from_value};
use invoice_ninja::{Country, InvoicingApi};
use invoice_normalize::{InvoiceRoute, normalize_and_validate_invoice, normalize_client, route_invoice};
use serde_json::{Value, json};

use crate::cors::{CorsPolicy, cors_middleware};
use crate::csrf::CSRF_HEADER;
use crate::error::AppError;
use crate::logging::redact_value;
use crate::state::AppState;

type SharedState<A> = State<Arc<AppState<A>>>;

/// Builds the application router.
pub fn router<A: InvoicingApi>(state: Arc<AppState<A>>, cors: CorsPolicy) -> Router {
    Router::new()
        .route("/newclient", get(client_form::<A>).post(submit_client::<A>))
        .route("/newinvoice", get(invoice_form::<A>).post(submit_invoice::<A>))
        .route("/countries", get(countries::<A>))
        .route("/healthz", get(healthz))
        .with_state(state)
        .layer(middleware::from_fn_with_state(Arc::new(cors), cors_middleware))
}

pub async fn healthz() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// `GET /newclient`
pub async fn client_form<A: InvoicingApi>(State(state): SharedState<A>) -> Json<Payload> {
    let mut form = state.schemas.client.schema().blank_form();
    form.insert(CSRF_TOKEN.to_string(), Value::String(state.csrf.issue()));
    Json(form)
}

/// `GET /newinvoice`
pub async fn invoice_form<A: InvoicingApi>(State(state): SharedState<A>) -> Json<Payload> {
    let mut form = state.schemas.invoice.schema().blank_form();
    form.insert(CSRF_TOKEN.to_string(), Value::String(state.csrf.issue()));
    Json(form)
}

/// `POST /newclient`
pub async fn submit_client<A: InvoicingApi>(
    State(state): SharedState<A>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let mut raw = parse_body(&body)?;
    check_csrf(&state, &headers, &raw)?;
    raw.remove(CSRF_TOKEN);

    if let Some(error) = state.schemas.client.first_error(&Value::Object(raw.clone())) {
        tracing::debug!(path = %error.path, "client form rejected: {}", error.message);
        return Err(error.into());
    }

    let client = normalize_client(&raw)?;
    let email = client
        .get(CONTACT)
        .and_then(|contact| contact.get(EMAIL))
        .and_then(Value::as_str)
        .unwrap_or_default();
    tracing::info!(email = redact_value(email), "creating client");

    let created = state.api.create_client(&client).await.inspect_err(|e| {
        tracing::error!("client creation failed: {e}");
    })?;
    Ok(Json(created))
}

/// `POST /newinvoice`
pub async fn submit_invoice<A: InvoicingApi>(
    State(state): SharedState<A>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let raw = parse_body(&body)?;
    check_csrf(&state, &headers, &raw)?;

    let invoice = normalize_and_validate_invoice(&raw, &state.schemas).inspect_err(|error| {
        tracing::debug!(path = %error.path, "invoice rejected: {}", error.message);
    })?;

    let route = route_invoice(invoice);
    tracing::info!(route = route.label(), "creating invoice");
    let created = match &route {
        InvoiceRoute::Recurring(invoice) => state.api.create_recurring_invoice(invoice).await,
        InvoiceRoute::Standard(invoice) => state.api.create_invoice(invoice).await,
    }
    .inspect_err(|e| tracing::error!("invoice creation failed: {e}"))?;
    Ok(Json(created))
}

/// `GET /countries`
pub async fn countries<A: InvoicingApi>(State(state): SharedState<A>) -> Json<Vec<Country>> {
    Json(state.api.countries())
}

fn parse_body(body: &[u8]) -> Result<Payload, AppError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| AppError::InvalidBody(e.to_string()))?;
    Ok(payload_from_value(value)?)
}

/// Verifies the token from the `X-CSRFToken` header, or else the body field.
fn check_csrf<A>(state: &AppState<A>, headers: &HeaderMap, body: &Payload) -> Result<(), AppError> {
    let token = headers
        .get(CSRF_HEADER)
        .and_then(|value| value.to_str().ok())
        .or_else(|| body.get(CSRF_TOKEN).and_then(Value::as_str));
    state.csrf.verify(token).inspect_err(|e| {
        tracing::warn!("rejected submission: {e}");
    })?;
    Ok(())
}
