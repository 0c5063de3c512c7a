//! Desktop notification permission reporting.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::app::SharedState;
use crate::events;
use crate::state::NotificationPermission;

/// GET /api/notifications/permission
pub async fn get_permission(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({ "status": "ok", "permission": state.permission().await }))
}

#[derive(Debug, Deserialize)]
pub struct PermissionReport {
    pub permission: NotificationPermission,
}

/// PUT /api/notifications/permission — the rendering layer reports the
/// platform's answer once at its startup; cached for the session.
pub async fn set_permission(
    State(state): State<SharedState>,
    Json(body): Json<PermissionReport>,
) -> Json<Value> {
    state.set_permission(body.permission).await;
    tracing::info!(permission = ?body.permission, "Notification permission reported");
    state.broadcast_event(
        events::PERMISSION_CHANGED,
        json!({ "permission": body.permission }),
    );
    Json(json!({ "status": "ok", "permission": body.permission }))
}
