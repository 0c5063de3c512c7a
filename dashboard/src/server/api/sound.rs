//! Alert test trigger and notification clip serving.

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, header};
use serde_json::{Value, json};

use crate::app::SharedState;
use crate::notify;

use super::err_json;

/// POST /api/sound/test — run the alert chain once (the "Test Sound"
/// button). Reports which sink delivered, if any.
pub async fn test_sound(State(state): State<SharedState>) -> Json<Value> {
    let sink = notify::test_alert(&state).await;
    Json(json!({ "status": "ok", "sink": sink }))
}

/// GET /api/sound/clip — stream the pre-supplied notification clip.
pub async fn get_clip(
    State(state): State<SharedState>,
) -> Result<axum::response::Response, (StatusCode, Json<Value>)> {
    let path = state.clip_path();
    let data = std::fs::read(&path).map_err(|e| err_json(404, &e.to_string()))?;

    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    let resp = axum::response::Response::builder()
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| err_json(500, &e.to_string()))?;
    Ok(resp)
}
