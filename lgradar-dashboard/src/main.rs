//! `lgradar-dashboard` server binary

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use lgradar_dashboard::auth::provider_from_config;
use lgradar_dashboard::logging::init_logging;
use lgradar_dashboard::{build_router, AppState, DashboardConfig};
use tokio::net::TcpListener;

/// LG Radar dashboard server
#[derive(Debug, Parser)]
#[command(name = "lgradar-dashboard", version, about)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "LGRADAR_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = DashboardConfig::load(args.config.as_deref()).context("loading configuration")?;
    init_logging(&config.logging).context("initialising logging")?;

    let provider = provider_from_config(&config.identity).context("building identity provider")?;

    let address = config.server.bind_address();
    let app = build_router(AppState::new(config, provider));

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    tracing::info!(address = %address, "LG Radar dashboard listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving requests")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
