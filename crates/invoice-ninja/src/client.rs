//! Invoice Ninja REST client.

use std::sync::Arc;

use invoice_model::{ClientPayload, InvoicePayload, Payload};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde_json::Value;

use crate::api::InvoicingApi;
use crate::config::NinjaConfig;
use crate::error::{NinjaError, Result};
use crate::types::{Country, Envelope, StaticData};

/// Header carrying the API token (`X-Ninja-Token`).
pub const TOKEN_HEADER: &str = "x-ninja-token";

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("invoice-forms/", env!("CARGO_PKG_VERSION"));

/// Flag the API expects on recurring invoices.
const IS_RECURRING: &str = "is_recurring";

/// Client for the Invoice Ninja v1 API.
#[derive(Debug, Clone)]
pub struct NinjaClient {
    client: reqwest::Client,
    config: NinjaConfig,
    static_data: Arc<StaticData>,
}

impl NinjaClient {
    /// Builds a client without fetching static data.
    ///
    /// # Errors
    ///
    /// Returns [`NinjaError::InvalidToken`] for an empty token or one that is
    /// not a valid header value.
    pub fn new(config: NinjaConfig) -> Result<Self> {
        if config.token.trim().is_empty() {
            return Err(NinjaError::InvalidToken("token is empty".to_string()));
        }

        let mut token = HeaderValue::from_str(&config.token)
            .map_err(|e| NinjaError::InvalidToken(e.to_string()))?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(TOKEN_HEADER), token);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("x-requested-with"),
            HeaderValue::from_static("XMLHttpRequest"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| NinjaError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            static_data: Arc::new(StaticData::default()),
        })
    }

    /// Builds a client and loads the static lookup tables.
    pub async fn connect(config: NinjaConfig) -> Result<Self> {
        let mut client = Self::new(config)?;
        let data = client.fetch_static().await?;
        tracing::info!(
            countries = data.countries.len(),
            frequencies = data.frequencies.len(),
            "loaded invoicing static data"
        );
        client.static_data = Arc::new(data);
        Ok(client)
    }

    pub fn config(&self) -> &NinjaConfig {
        &self.config
    }

    pub fn static_data(&self) -> &StaticData {
        &self.static_data
    }

    /// Fetches the lookup tables (`GET static`).
    pub async fn fetch_static(&self) -> Result<StaticData> {
        let url = self.config.endpoint("static");
        tracing::debug!("Fetching static data from {}", url);

        let response = self.client.get(&url).send().await?;
        let body = handle_response(response).await?;
        let envelope: Envelope<StaticData> = serde_json::from_value(body)?;
        Ok(envelope.data)
    }

    async fn post(&self, resource: &str, body: &Payload) -> Result<Value> {
        let url = self.config.endpoint(resource);
        tracing::debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        handle_response(response).await
    }
}

impl InvoicingApi for NinjaClient {
    async fn create_client(&self, client: &ClientPayload) -> Result<Value> {
        self.post("clients", client.as_map()).await
    }

    async fn create_invoice(&self, invoice: &InvoicePayload) -> Result<Value> {
        self.post("invoices", invoice.as_map()).await
    }

    async fn create_recurring_invoice(&self, invoice: &InvoicePayload) -> Result<Value> {
        self.post("invoices", &recurring_body(invoice)).await
    }

    fn countries(&self) -> Vec<Country> {
        self.static_data.countries.clone()
    }
}

/// Body for a recurring invoice: the payload plus `is_recurring: true`.
fn recurring_body(invoice: &InvoicePayload) -> Payload {
    let mut body = invoice.as_map().clone();
    body.insert(IS_RECURRING.to_string(), Value::Bool(true));
    body
}

/// Checks the status and decodes the JSON body.
async fn handle_response(response: reqwest::Response) -> Result<Value> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(NinjaError::Unauthorized {
            status: status.as_u16(),
        });
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(NinjaError::Api {
            status: status.as_u16(),
            body,
        });
    }

    let body: Value = response.json().await?;
    Ok(body)
}
