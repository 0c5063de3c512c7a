//! Background poll loop.
//!
//! One task owns every fetch cycle, so timer ticks and manual refresh
//! intents are serialized: two cycles can never mutate shared state
//! concurrently, and a tick that lands while a cycle is still in flight is
//! skipped rather than overlapped.

use std::time::Duration;

use menu_api::MenuApiClient;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::app::{RefreshReason, SharedState};
use crate::detector::{self, OrderChange};
use crate::events;
use crate::notify;

/// Wall-clock poll interval. The first cycle runs immediately on startup.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Drive fetch cycles until shutdown.
pub async fn poll_loop(state: SharedState, mut refresh_rx: mpsc::Receiver<RefreshReason>) {
    let shutdown = state.shutdown_token().clone();
    let client = MenuApiClient::new(state.config().api_base_url.clone());

    let mut ticker = tokio::time::interval(POLL_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let reason = tokio::select! {
            _ = shutdown.cancelled() => {
                tracing::info!("Poll loop stopped (shutdown)");
                return;
            }
            _ = ticker.tick() => RefreshReason::Timer,
            Some(reason) = refresh_rx.recv() => reason,
        };
        run_cycle(&state, &client, reason).await;
    }
}

/// Execute one fetch cycle.
///
/// Both endpoints are fetched in parallel and must both succeed; a failed
/// cycle mutates nothing, logs, and leaves the dashboard on stale data
/// until the next tick. On success the fresh count is compared against the
/// old baseline before the snapshot (and with it the baseline) is
/// committed, and a positive detection hands off to the notifier without
/// blocking the cycle.
pub async fn run_cycle(
    state: &SharedState,
    client: &MenuApiClient,
    reason: RefreshReason,
) -> Option<OrderChange> {
    state.set_loading(true);
    tracing::debug!(?reason, "Fetch cycle started");

    let change = match tokio::join!(client.get_stats(), client.get_orders()) {
        (Ok(stats), Ok(orders)) => {
            if state.shutdown_token().is_cancelled() {
                // Late completion after teardown; discard the write.
                state.set_loading(false);
                return None;
            }

            let previous = state.order_baseline().await;
            let current = orders.len() as u64;
            let change = detector::detect(previous, current);
            state.commit_snapshot(stats, orders).await;
            Some(change)
        }
        (stats, orders) => {
            if let Err(e) = &stats {
                tracing::warn!(?reason, "Stats fetch failed: {e}");
            }
            if let Err(e) = &orders {
                tracing::warn!(?reason, "Orders fetch failed: {e}");
            }
            None
        }
    };
    state.set_loading(false);

    if let Some(change) = change {
        state.broadcast_event(events::DASHBOARD_UPDATE, state.snapshot().await);

        match change {
            OrderChange::NewOrders { delta } => {
                tracing::info!(delta, "New orders detected");
                state.broadcast_event(
                    events::NEW_ORDERS,
                    events::NewOrdersPayload {
                        delta,
                        total: state.order_baseline().await,
                    },
                );
                notify::notify_new_orders(state, delta);
            }
            OrderChange::InitialLoad { count } => {
                tracing::info!(count, "Initial order load");
            }
            OrderChange::Unchanged => {
                tracing::debug!("No new orders");
            }
            OrderChange::Removed { delta } => {
                tracing::info!(delta, "Orders removed upstream");
            }
        }
    }

    change
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_state() -> SharedState {
        let (state, _rx) = SharedState::new(
            AppConfig::default(),
            std::env::temp_dir().join("order-dashboard-cycle-tests"),
        );
        state
    }

    fn orders_body(count: usize) -> serde_json::Value {
        let orders: Vec<_> = (0..count)
            .map(|i| {
                serde_json::json!({
                    "phone": format!("+9190000000{i:02}"),
                    "items": [{"name": "Biryani", "quantity": 1, "price": 12.0}]
                })
            })
            .collect();
        serde_json::Value::Array(orders)
    }

    async fn mount_endpoints(server: &MockServer, total: u64, order_count: usize) {
        Mock::given(method("GET"))
            .and(path("/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "revenue": 100.0,
                "total_orders": total,
                "delivered_orders": 1,
                "confirmed_orders": 1
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(orders_body(order_count)))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn first_successful_cycle_commits_without_alerting() {
        let server = MockServer::start().await;
        mount_endpoints(&server, 5, 5).await;
        let state = test_state();
        let client = MenuApiClient::new(server.uri());

        let change = run_cycle(&state, &client, RefreshReason::Timer).await;
        assert_eq!(change, Some(OrderChange::InitialLoad { count: 5 }));

        let snap = state.snapshot().await;
        assert_eq!(snap.order_count, 5);
        assert_eq!(snap.stats.total_orders, 5);
        assert!(snap.last_updated.is_some());
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn growth_after_baseline_detects_new_orders() {
        let server = MockServer::start().await;
        mount_endpoints(&server, 5, 5).await;
        let state = test_state();
        let client = MenuApiClient::new(server.uri());
        run_cycle(&state, &client, RefreshReason::Timer).await;

        server.reset().await;
        mount_endpoints(&server, 8, 8).await;
        let change = run_cycle(&state, &client, RefreshReason::Timer).await;

        assert_eq!(change, Some(OrderChange::NewOrders { delta: 3 }));
        assert_eq!(state.order_baseline().await, 8);
    }

    #[tokio::test]
    async fn equal_count_restamps_last_updated_only() {
        let server = MockServer::start().await;
        mount_endpoints(&server, 8, 8).await;
        let state = test_state();
        let client = MenuApiClient::new(server.uri());

        run_cycle(&state, &client, RefreshReason::Timer).await;
        let first = state.snapshot().await;

        let change = run_cycle(&state, &client, RefreshReason::Manual).await;
        assert_eq!(change, Some(OrderChange::Unchanged));

        let second = state.snapshot().await;
        assert_eq!(second.order_count, first.order_count);
        assert!(second.last_updated >= first.last_updated);
    }

    #[tokio::test]
    async fn shrinking_count_lowers_baseline_without_alerting() {
        let server = MockServer::start().await;
        mount_endpoints(&server, 8, 8).await;
        let state = test_state();
        let client = MenuApiClient::new(server.uri());
        run_cycle(&state, &client, RefreshReason::Timer).await;

        server.reset().await;
        mount_endpoints(&server, 3, 3).await;
        let change = run_cycle(&state, &client, RefreshReason::Timer).await;

        assert_eq!(change, Some(OrderChange::Removed { delta: 5 }));
        assert_eq!(state.order_baseline().await, 3);
    }

    #[tokio::test]
    async fn partial_failure_fails_the_cycle_as_a_unit() {
        let server = MockServer::start().await;
        mount_endpoints(&server, 5, 5).await;
        let state = test_state();
        let client = MenuApiClient::new(server.uri());
        run_cycle(&state, &client, RefreshReason::Timer).await;
        let before = state.snapshot().await;

        server.reset().await;
        Mock::given(method("GET"))
            .and(path("/stats"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(orders_body(9)))
            .mount(&server)
            .await;

        let change = run_cycle(&state, &client, RefreshReason::Timer).await;
        assert_eq!(change, None);

        let after = state.snapshot().await;
        assert_eq!(after.order_count, before.order_count);
        assert_eq!(after.stats, before.stats);
        assert_eq!(after.last_updated, before.last_updated);
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn cancelled_state_discards_a_late_completion() {
        let server = MockServer::start().await;
        mount_endpoints(&server, 5, 5).await;
        let state = test_state();
        let client = MenuApiClient::new(server.uri());

        state.shutdown_token().cancel();
        let change = run_cycle(&state, &client, RefreshReason::Timer).await;

        assert_eq!(change, None);
        assert_eq!(state.order_baseline().await, 0);
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn decode_failure_fails_the_cycle() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(orders_body(2)))
            .mount(&server)
            .await;
        let state = test_state();
        let client = MenuApiClient::new(server.uri());

        let change = run_cycle(&state, &client, RefreshReason::Timer).await;
        assert_eq!(change, None);
        assert!(state.snapshot().await.last_updated.is_none());
    }
}
