//! Dashboard snapshot, manual refresh, and view switching.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::app::SharedState;
use crate::events;
use crate::state::ActiveView;

use super::err_json;

type ApiResult = Result<Json<Value>, (axum::http::StatusCode, Json<Value>)>;

/// GET /api/dashboard — everything the rendering layer needs for a full
/// initial render.
pub async fn get_dashboard(State(state): State<SharedState>) -> Json<Value> {
    let snapshot = state.snapshot().await;
    Json(json!({
        "status": "ok",
        "data": {
            "snapshot": snapshot,
            "is_loading": state.is_loading(),
            "permission": state.permission().await,
            "active_view": state.active_view().await,
        }
    }))
}

/// POST /api/refresh — run a fetch cycle now, without touching the timer.
pub async fn refresh(State(state): State<SharedState>) -> ApiResult {
    if state.request_refresh() {
        Ok(Json(json!({ "status": "ok" })))
    } else {
        Err(err_json(503, "Poll loop is not running"))
    }
}

/// GET /api/view
pub async fn get_view(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({ "status": "ok", "view": state.active_view().await }))
}

#[derive(Debug, Deserialize)]
pub struct SetViewRequest {
    pub view: ActiveView,
}

/// PUT /api/view — rendering layer switched tabs.
pub async fn set_view(
    State(state): State<SharedState>,
    Json(body): Json<SetViewRequest>,
) -> Json<Value> {
    state.set_active_view(body.view).await;
    state.broadcast_event(events::VIEW_CHANGED, json!({ "view": body.view }));
    Json(json!({ "status": "ok", "view": body.view }))
}
