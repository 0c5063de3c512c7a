//! Restaurant menu API client library.
//!
//! Provides a typed REST client for the upstream dashboard endpoints
//! (aggregate stats and the live order list), with payload coercion at
//! the decode boundary so partial responses never fault downstream.

pub mod api;

pub use api::{MenuApiClient, Order, OrderItem, StatsSnapshot};

/// Unified error type for the menu-api crate.
#[derive(Debug, thiserror::Error)]
pub enum MenuApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Menu API error (status {status}): {message}")]
    Api { status: u16, message: String },
}
