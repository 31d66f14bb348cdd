//! API request and response types

use serde::{Deserialize, Serialize};

/// Media type of proxied calendars
pub const CALENDAR_CONTENT_TYPE: &str = "text/calendar; charset=utf-8";

/// Content disposition of proxied calendars
pub const CALENDAR_DISPOSITION: &str = "attachment; filename=calendar.ics";

/// Query string of the proxy endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProxyQuery {
    /// Absolute URL of the upstream calendar
    pub url: Option<String>,
}

impl ProxyQuery {
    /// The upstream URL, if present and not the empty string
    #[must_use]
    pub fn upstream_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Number of timezone mappings in use
    pub mappings: usize,
}
