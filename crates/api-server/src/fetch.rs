//! Upstream calendar download
//!
//! Calendars are fetched over HTTP/HTTPS with a shared client whose timeout
//! bounds every request. Failures are returned to the handler; nothing is
//! retried.

use anyhow::{Context, Result};
use reqwest::Client as HttpClient;
use std::time::Duration;
use tracing::{debug, info};

/// Build the HTTP client shared by all proxy requests
///
/// # Errors
/// Returns an error if the TLS backend cannot be initialized.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<HttpClient> {
    HttpClient::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Download a calendar document from an HTTP/HTTPS URL
///
/// # Arguments
/// * `client` - Shared HTTP client (carries the request timeout)
/// * `url` - The URL to download from
///
/// # Returns
/// The response body decoded as text
///
/// # Errors
/// Returns an error if:
/// - The URL scheme is not http or https
/// - The HTTP request fails or times out
/// - The upstream responds with a non-success status
/// - The response body cannot be read
pub async fn fetch_calendar(client: &HttpClient, url: &str) -> Result<String> {
    info!("Fetching calendar from URL: {}", url);

    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("Invalid URL scheme. Only http:// and https:// are supported");
    }

    let response = client
        .get(url)
        .send()
        .await
        .context("Failed to send HTTP request")?;

    if !response.status().is_success() {
        anyhow::bail!("HTTP request failed with status: {}", response.status());
    }

    if let Some(size) = response.content_length() {
        debug!("Calendar size: {} bytes", size);
    }

    let body = response
        .text()
        .await
        .context("Failed to read response body")?;

    info!("Fetched {} bytes from {}", body.len(), url);
    Ok(body)
}
