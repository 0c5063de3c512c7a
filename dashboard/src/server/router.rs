use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use super::{api, websocket};
use crate::app::SharedState;

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // --- Core ---
        .route("/status", get(status_handler))
        .route("/ws", get(websocket::ws_handler))
        // --- Dashboard state ---
        .route("/api/dashboard", get(api::dashboard::get_dashboard))
        .route("/api/refresh", post(api::dashboard::refresh))
        .route(
            "/api/view",
            get(api::dashboard::get_view).put(api::dashboard::set_view),
        )
        // --- Alerts ---
        .route("/api/sound/test", post(api::sound::test_sound))
        .route("/api/sound/clip", get(api::sound::get_clip))
        .route(
            "/api/notifications/permission",
            get(api::notifications::get_permission).put(api::notifications::set_permission),
        )
        // --- Middleware ---
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn status_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": "1.0.0"
    }))
}
