use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use menu_api::{Order, StatsSnapshot};
use serde::Serialize;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{RwLock, broadcast, mpsc};
use tokio_util::sync::CancellationToken;

use crate::config::{AppConfig, defaults};
use crate::state::{ActiveView, DashboardSnapshot, NotificationPermission};

/// Why a fetch cycle was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshReason {
    Timer,
    Manual,
}

/// Application shared state accessible from the poll loop and axum handlers.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    /// Broadcast channel for WebSocket messages
    ws_tx: broadcast::Sender<String>,
    /// Current dashboard snapshot, replaced wholesale on successful cycles
    snapshot: RwLock<DashboardSnapshot>,
    /// True while a fetch cycle is in flight
    is_loading: AtomicBool,
    /// Desktop notification permission reported by the rendering layer
    permission: RwLock<NotificationPermission>,
    /// Active dashboard view
    active_view: RwLock<ActiveView>,
    /// Manual-refresh intents funneled into the poll loop
    refresh_tx: mpsc::Sender<RefreshReason>,
    /// Teardown signal for background loops and pending side effects
    shutdown: CancellationToken,
    /// Runtime configuration
    config: AppConfig,
    /// Data directory path (holds the notification clip)
    data_dir: PathBuf,
}

impl SharedState {
    /// Create shared state from a loaded config and resolved data directory.
    ///
    /// Returns the receiving end of the manual-refresh channel; the caller
    /// hands it to the poll loop.
    pub fn new(config: AppConfig, data_dir: PathBuf) -> (Self, mpsc::Receiver<RefreshReason>) {
        let (ws_tx, _) = broadcast::channel(2048);
        let (refresh_tx, refresh_rx) = mpsc::channel(8);

        let state = Self {
            inner: Arc::new(SharedStateInner {
                ws_tx,
                snapshot: RwLock::new(DashboardSnapshot::default()),
                is_loading: AtomicBool::new(false),
                permission: RwLock::new(NotificationPermission::default()),
                active_view: RwLock::new(ActiveView::default()),
                refresh_tx,
                shutdown: CancellationToken::new(),
                config,
                data_dir,
            }),
        };

        (state, refresh_rx)
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn server_port(&self) -> u16 {
        self.inner.config.server_port
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.inner.data_dir
    }

    /// Path of the pre-supplied notification clip.
    pub fn clip_path(&self) -> PathBuf {
        self.inner.data_dir.join(defaults::CLIP_FILE_NAME)
    }

    pub fn ws_sender(&self) -> &broadcast::Sender<String> {
        &self.inner.ws_tx
    }

    pub fn subscribe_ws(&self) -> broadcast::Receiver<String> {
        self.inner.ws_tx.subscribe()
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown
    }

    /// Clone of the current snapshot.
    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.inner.snapshot.read().await.clone()
    }

    /// Change-detection baseline from the last successful cycle.
    pub async fn order_baseline(&self) -> u64 {
        self.inner.snapshot.read().await.order_count
    }

    /// Replace the snapshot wholesale and stamp `last_updated`.
    ///
    /// Stats, orders and the baseline change under a single write lock, so
    /// readers observe all of them or none of them.
    pub async fn commit_snapshot(&self, stats: StatsSnapshot, orders: Vec<Order>) {
        let mut snap = self.inner.snapshot.write().await;
        *snap = DashboardSnapshot {
            order_count: orders.len() as u64,
            stats,
            orders,
            last_updated: Some(chrono::Utc::now()),
        };
    }

    pub fn set_loading(&self, loading: bool) {
        self.inner.is_loading.store(loading, Ordering::SeqCst);
    }

    pub fn is_loading(&self) -> bool {
        self.inner.is_loading.load(Ordering::SeqCst)
    }

    pub async fn permission(&self) -> NotificationPermission {
        *self.inner.permission.read().await
    }

    pub async fn set_permission(&self, permission: NotificationPermission) {
        *self.inner.permission.write().await = permission;
    }

    pub async fn active_view(&self) -> ActiveView {
        *self.inner.active_view.read().await
    }

    pub async fn set_active_view(&self, view: ActiveView) {
        *self.inner.active_view.write().await = view;
    }

    /// Queue a manual refresh intent for the poll loop.
    ///
    /// Returns `false` only when the loop is gone; a full queue counts as
    /// accepted, since a refresh is already pending.
    pub fn request_refresh(&self) -> bool {
        match self.inner.refresh_tx.try_send(RefreshReason::Manual) {
            Ok(()) | Err(TrySendError::Full(_)) => true,
            Err(TrySendError::Closed(_)) => false,
        }
    }

    /// Broadcast a typed event to all connected rendering clients.
    ///
    /// Returns whether at least one client received it.
    pub fn broadcast_event(&self, event: &str, data: impl Serialize) -> bool {
        let msg = serde_json::json!({ "type": event, "data": data });
        self.inner.ws_tx.send(msg.to_string()).is_ok()
    }
}
