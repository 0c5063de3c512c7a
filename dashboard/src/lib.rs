//! Restaurant order dashboard service.
//!
//! Polls the upstream menu API on a fixed interval, keeps a single
//! authoritative snapshot of stats and orders, detects newly arrived
//! orders, drives the alert chain, and serves state plus alert commands to
//! the rendering layer over HTTP + WebSocket.

pub mod app;
pub mod background;
pub mod config;
pub mod detector;
pub mod events;
pub mod notify;
pub mod server;
pub mod shutdown;
pub mod state;

use std::path::PathBuf;

use config::AppConfig;

/// Determine the data directory for the application.
/// Priority: ORDER_DASHBOARD_DATA_DIR env var > ~/.order-dashboard
fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ORDER_DASHBOARD_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".order-dashboard")
}

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Load environment, resolve the data directory, build the runtime config.
pub fn init_foundation() -> Result<(AppConfig, PathBuf), anyhow::Error> {
    load_dotenv();

    let dir = data_dir();
    std::fs::create_dir_all(&dir)?;

    let config = AppConfig::load()?;
    tracing::info!(
        port = config.server_port,
        upstream = %config.api_base_url,
        "Settings loaded"
    );

    Ok((config, dir))
}
