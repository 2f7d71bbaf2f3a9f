//! HTTP server for the dashboard.
//!
//! Serves the single dashboard page and the JSON API it calls. The page's
//! script is the reactive glue: it re-requests `/api/charts` whenever a
//! control changes and hands the returned specs to the chart renderer.

mod api;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{response::Html, routing::get, Router};
use tracing::info;

use crate::dashboard::Dashboard;
use crate::error::{Error, Result};

pub use api::{ApiError, ChartQuery, ErrorBody, HealthResponse};

/// The dashboard page, including the script that drives the charts.
const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    dashboard: Arc<Dashboard>,
}

impl AppState {
    /// Wrap a dashboard for sharing across requests.
    #[must_use]
    pub fn new(dashboard: Arc<Dashboard>) -> Self {
        Self { dashboard }
    }

    /// Get the dashboard.
    #[must_use]
    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }
}

/// Build the router for the dashboard page and API.
pub fn router(dashboard: Arc<Dashboard>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(api::health))
        .route("/api/layout", get(api::layout))
        .route("/api/sites", get(api::sites))
        .route("/api/charts", get(api::charts))
        .with_state(AppState::new(dashboard))
}

/// Serve the dashboard on `addr` until Ctrl-C is received.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn serve(dashboard: Arc<Dashboard>, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| Error::ServerBind {
            addr: addr.to_string(),
            source,
        })?;

    let local = listener.local_addr()?;
    info!(
        records = dashboard.dataset().len(),
        sites = dashboard.catalog().len(),
        "Dashboard listening on http://{local}"
    );

    axum::serve(listener, router(dashboard))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Dashboard server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
