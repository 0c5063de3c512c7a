use std::time::Duration;

use tokio::time::sleep;

use crate::app::SharedState;

/// Stop background work and give pending side effects a moment to observe
/// the cancellation. In-flight fetches are not aborted; their completions
/// check the token and discard their writes.
pub async fn graceful_shutdown(state: &SharedState) {
    tracing::info!("Shutdown sequence started");

    state.shutdown_token().cancel();
    tracing::info!("Shutdown: poll loop and alert tasks cancelled");

    sleep(Duration::from_millis(200)).await;
    tracing::info!("Shutdown sequence completed");
}
