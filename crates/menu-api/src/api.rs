//! Dashboard REST API client.
//!
//! Provides typed access to the two read-only upstream endpoints:
//! `GET {base}/stats` and `GET {base}/orders`. Payloads are coerced at
//! the decode boundary: absent numeric fields default to zero and an
//! absent item list decodes as empty, so a sloppy upstream response
//! degrades instead of failing the whole fetch cycle.

use serde::{Deserialize, Serialize};

use crate::MenuApiError;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Aggregate counters from GET /stats.
///
/// Replaced wholesale on each successful fetch; never mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub total_orders: u64,
    #[serde(default)]
    pub delivered_orders: u64,
    #[serde(default)]
    pub confirmed_orders: u64,
}

impl StatsSnapshot {
    /// Orders accepted but not yet delivered.
    pub fn pending_orders(&self) -> u64 {
        self.total_orders.saturating_sub(self.delivered_orders)
    }
}

/// A single line item within an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub price: f64,
}

/// One customer order from GET /orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Order total across all line items.
    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.price * f64::from(item.quantity))
            .sum()
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Typed client for the upstream dashboard endpoints.
pub struct MenuApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl MenuApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Construct with an existing `reqwest::Client` (shared connection pool).
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the aggregate stats counters.
    pub async fn get_stats(&self) -> Result<StatsSnapshot, MenuApiError> {
        let url = format!("{}/stats", self.base_url);
        let body = self.get(&url).await?;
        let stats: StatsSnapshot = serde_json::from_str(&body)?;
        tracing::debug!(
            total_orders = stats.total_orders,
            revenue = stats.revenue,
            "Fetched stats"
        );
        Ok(stats)
    }

    /// Fetch the full order list.
    pub async fn get_orders(&self) -> Result<Vec<Order>, MenuApiError> {
        let url = format!("{}/orders", self.base_url);
        let body = self.get(&url).await?;
        let orders: Vec<Order> = serde_json::from_str(&body)?;
        tracing::debug!(count = orders.len(), "Fetched orders");
        Ok(orders)
    }

    /// Execute a GET request and return the body on 2xx.
    async fn get(&self, url: &str) -> Result<String, MenuApiError> {
        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(MenuApiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(body)
    }
}
