//! HTTP request handlers for API endpoints

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::{error, info};

use crate::{
    fetch::fetch_calendar,
    types::{HealthResponse, ProxyQuery, CALENDAR_CONTENT_TYPE, CALENDAR_DISPOSITION},
    ApiState,
};

/// Health check endpoint
pub async fn health_check(State(state): State<ApiState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        mappings: state.rewriter.len(),
    })
}

/// Fetch a remote calendar and return it with legacy timezone names rewritten
///
/// - `400` when the `url` query parameter is missing
/// - `500` when the upstream cannot be fetched
pub async fn proxy_calendar(
    State(state): State<ApiState>,
    Query(query): Query<ProxyQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let Some(url) = query.upstream_url() else {
        return Err((StatusCode::BAD_REQUEST, "Missing parameter".to_string()));
    };

    let calendar = fetch_calendar(&state.client, url).await.map_err(|e| {
        error!("Error fetching iCal from {}: {:#}", url, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error fetching iCal file: {e:#}"),
        )
    })?;

    let fixed = state.rewriter.rewrite(&calendar);
    info!("Rewrote calendar from {} ({} bytes)", url, fixed.len());

    Ok((
        [
            (header::CONTENT_TYPE, CALENDAR_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, CALENDAR_DISPOSITION),
        ],
        fixed,
    ))
}
