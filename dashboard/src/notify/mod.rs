//! New-order alerting.
//!
//! An escalating fallback chain (clip → synthesized tone → desktop
//! notification) plus a delayed desktop notification that fires about a
//! second later whether or not an earlier stage already alerted. Both run
//! detached so the fetch cycle never waits on them.

mod chain;
mod sinks;
mod types;

#[cfg(test)]
mod tests;

pub use chain::{AlertSink, run_chain};
pub use sinks::{ClipSink, DesktopSink, ToneSink, default_chain};
pub use types::AlertError;

use std::time::Duration;

use crate::app::SharedState;

/// Delay before the unconditional desktop notification.
const DESKTOP_NOTIFY_DELAY: Duration = Duration::from_secs(1);

/// Alert the operator about newly arrived orders. Fire-and-forget.
pub fn notify_new_orders(state: &SharedState, delta: u64) {
    let chain_state = state.clone();
    tokio::spawn(async move {
        let sinks = default_chain(&chain_state);
        match run_chain(&chain_state, &sinks).await {
            Some(sink) => tracing::info!(delta, sink, "New-order alert delivered"),
            None => tracing::info!(delta, "New-order alert: no mechanism available"),
        }
    });

    // Fires even when the sound already played; the dashboard always gets
    // the desktop notification a second after the sound attempt.
    let delayed_state = state.clone();
    tokio::spawn(async move {
        let shutdown = delayed_state.shutdown_token().clone();
        tokio::select! {
            _ = shutdown.cancelled() => return,
            _ = tokio::time::sleep(DESKTOP_NOTIFY_DELAY) => {}
        }
        if let Err(e) = DesktopSink.alert(&delayed_state).await {
            tracing::debug!("Delayed desktop notification skipped: {e}");
        }
    });
}

/// Run the chain once, without the delayed desktop duplicate.
/// Backs the dashboard's "Test Sound" button.
pub async fn test_alert(state: &SharedState) -> Option<&'static str> {
    let sinks = default_chain(state);
    run_chain(state, &sinks).await
}
