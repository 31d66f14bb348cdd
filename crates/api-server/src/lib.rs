//! iCalendar timezone proxy server
//!
//! Fetches a remote calendar given by the `url` query parameter, rewrites
//! Windows/Outlook timezone names to IANA names and returns the result:
//!
//! ```text
//! GET /proxy?url=https://outlook.office365.com/owa/calendar/.../calendar.ics
//! ```

pub mod config;
mod fetch;
mod handlers;
mod types;

use axum::{routing::get, Router};
use ical_tz_mapping::{MappingTable, Rewriter};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use fetch::{build_http_client, fetch_calendar};
pub use handlers::*;
pub use types::*;

/// API server state shared across handlers
#[derive(Clone)]
pub struct ApiState {
    /// Rewriter compiled from the mapping table built at startup
    pub rewriter: Arc<Rewriter>,
    /// HTTP client for upstream calendars
    pub client: reqwest::Client,
}

impl ApiState {
    /// Create API state from a mapping table
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(table: &MappingTable, fetch_timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            rewriter: Arc::new(Rewriter::new(table)),
            client: build_http_client(fetch_timeout)?,
        })
    }
}

/// Build the API router with all endpoints
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Calendar proxy
        .route("/proxy", get(proxy_calendar))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the API server
pub async fn start_server(addr: &str, state: ApiState) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    serve(listener, state).await
}

/// Serve the API on an already bound listener
pub async fn serve(listener: TcpListener, state: ApiState) -> Result<(), std::io::Error> {
    tracing::info!("Starting API server on {}", listener.local_addr()?);

    let app = build_router(state);
    axum::serve(listener, app).await
}
