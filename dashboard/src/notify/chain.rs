//! First-success-wins reducer over an ordered list of alert sinks.

use async_trait::async_trait;

use crate::app::SharedState;

use super::types::AlertError;

/// One alert mechanism in the fallback chain.
#[async_trait]
pub trait AlertSink: Send + Sync {
    fn name(&self) -> &'static str;

    /// Attempt to deliver the alert through this mechanism.
    async fn alert(&self, state: &SharedState) -> Result<(), AlertError>;
}

/// Attempt each sink in order; the first success ends the chain.
///
/// Returns the name of the sink that delivered, or `None` when every
/// mechanism was unavailable (the alert is then silently dropped).
pub async fn run_chain(
    state: &SharedState,
    sinks: &[Box<dyn AlertSink>],
) -> Option<&'static str> {
    for sink in sinks {
        match sink.alert(state).await {
            Ok(()) => {
                tracing::debug!(sink = sink.name(), "Alert delivered");
                return Some(sink.name());
            }
            Err(e) => {
                tracing::debug!(sink = sink.name(), "Alert sink failed: {e}");
            }
        }
    }
    None
}
