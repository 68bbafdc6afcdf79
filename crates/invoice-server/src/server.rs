//! Startup and shutdown of the HTTP gateway.

use anyhow::{Context, Result};
use invoice_ninja::NinjaClient;
use invoice_schema::SchemaSet;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::cors::CorsPolicy;
use crate::csrf::CsrfGuard;
use crate::routes::router;
use crate::state::AppState;

/// Connects to the invoicing API, binds the listener and serves until Ctrl-C.
pub async fn serve(config: &AppConfig) -> Result<()> {
    config.validate()?;
    let addr = config.bind_addr()?;

    let schemas = SchemaSet::load(&config.schemas).context("failed to load form schemas")?;
    let api = NinjaClient::connect(config.invoice_ninja.clone())
        .await
        .context("failed to load static data from the invoicing API")?;

    if !config.csrf.enabled {
        tracing::warn!("CSRF protection is disabled");
    }
    if config.cors.origins.is_empty() {
        tracing::warn!("no CORS origins configured, browser forms on other origins will be blocked");
    }

    let state = AppState::new(api, schemas, CsrfGuard::new(&config.csrf)).shared();
    let app = router(state, CorsPolicy::new(&config.cors));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("invoice-forms listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("invoice-forms stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
}
