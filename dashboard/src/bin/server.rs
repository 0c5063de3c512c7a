//! Headless dashboard server binary.
//!
//! Starts the axum web server, the background poll loop, and signal
//! handling. The rendering layer connects over HTTP + WebSocket.

use tracing_subscriber::EnvFilter;

use order_dashboard_lib::app::SharedState;
use order_dashboard_lib::{background, server, shutdown};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Bhawarchi order dashboard (headless mode)");

    let (config, dir) = order_dashboard_lib::init_foundation()?;
    let (state, refresh_rx) = SharedState::new(config, dir);

    // Web server
    let server_state = state.clone();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server::start_server(server_state).await {
            tracing::error!("Server failed: {e}");
        }
    });

    // Poll loop: first cycle fires immediately, then every tick
    let s = state.clone();
    tokio::spawn(async move { background::poll_loop(s, refresh_rx).await });

    tracing::info!(
        port = state.server_port(),
        "Dashboard server running. Press Ctrl+C to stop."
    );

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");

    shutdown::graceful_shutdown(&state).await;
    server_handle.abort();
    Ok(())
}
