//! iCal timezone proxy binary entry point

use clap::Parser;
use ical_tz_mapping::build_table;
use ical_tz_proxy::{start_server, ApiState, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Settings may come from a local .env file
    dotenvy::dotenv().ok();
    let config = ServerConfig::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(config.log_filter())
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Built once, shared read-only by every request
    let table = build_table(&config.mapping_file);
    let state = ApiState::new(&table, config.fetch_timeout())?;

    tracing::info!("Starting iCal proxy server on port {}", config.listen_port());
    tracing::info!(
        "Use: http://localhost:{}/proxy?url=YOUR_ICAL_URL",
        config.listen_port()
    );
    start_server(&config.bind_addr(), state).await?;

    Ok(())
}
