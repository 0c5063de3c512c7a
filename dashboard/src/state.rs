//! Dashboard state types shared with the rendering layer.

use chrono::{DateTime, Utc};
use menu_api::{Order, StatsSnapshot};
use serde::{Deserialize, Serialize};

/// Immutable view of the dashboard data.
///
/// Replaced wholesale on each successful fetch cycle; a reader never sees
/// stats from one cycle paired with orders from another.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardSnapshot {
    pub stats: StatsSnapshot,
    pub orders: Vec<Order>,
    /// Change-detection baseline. Always equals `orders.len()` of the most
    /// recent successful fetch; zero means "no baseline yet".
    pub order_count: u64,
    /// Stamped only on success; `None` until the first cycle completes.
    pub last_updated: Option<DateTime<Utc>>,
}

/// Desktop notification permission as reported by the rendering layer.
///
/// Queried from the platform once at client startup and cached here for
/// the session; never re-requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPermission {
    Default,
    Granted,
    Denied,
}

impl Default for NotificationPermission {
    fn default() -> Self {
        Self::Default
    }
}

/// Which dashboard view the rendering layer is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    Dashboard,
    Orders,
}

impl Default for ActiveView {
    fn default() -> Self {
        // The dashboard opens on the order table.
        Self::Orders
    }
}
