//! Server configuration from command line and environment

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Default listening port
pub const DEFAULT_PORT: u16 = 5000;

/// Default listening host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default mapping reference file, relative to the working directory
pub const DEFAULT_MAPPING_FILE: &str = "data/windows_zones.csv";

/// Default upstream request timeout in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "ical-tz-proxy",
    version,
    about = "Proxy that rewrites Windows timezone names in remote iCalendar feeds"
)]
pub struct ServerConfig {
    /// Port to listen on; overrides the positional port
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Port to listen on when `PORT` is not set
    #[arg(value_name = "PORT")]
    pub port_arg: Option<u16>,

    /// Host address to bind
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Log verbosity (error, warn, info, debug, trace); `RUST_LOG` takes precedence
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// CSV file mapping Windows timezone names to IANA names
    #[arg(long, env = "TZ_MAPPING_FILE", default_value = DEFAULT_MAPPING_FILE)]
    pub mapping_file: PathBuf,

    /// Timeout for fetching the upstream calendar, in seconds
    #[arg(long, env = "FETCH_TIMEOUT_SECS", default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    pub fetch_timeout_secs: u64,
}

impl ServerConfig {
    /// Listening port: `PORT`, then the positional argument, then the default
    #[must_use]
    pub fn listen_port(&self) -> u16 {
        self.port.or(self.port_arg).unwrap_or(DEFAULT_PORT)
    }

    /// Address passed to the TCP listener
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.listen_port())
    }

    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Log filter from `RUST_LOG`, else from the configured log level
    ///
    /// An unparsable level falls back to `info`.
    #[must_use]
    pub fn log_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::try_new(self.log_level.to_ascii_lowercase())
                .unwrap_or_else(|_| EnvFilter::new("info"))
        })
    }
}
