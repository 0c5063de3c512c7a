//! WebSocket event constants and payload types.
//!
//! Every event is a JSON envelope `{ "type": <constant>, "data": <payload> }`
//! broadcast to the rendering clients connected to `/ws`.

use serde::Serialize;

// -- Event name constants --

pub const DASHBOARD_UPDATE: &str = "dashboard_update";
pub const NEW_ORDERS: &str = "new_orders";
pub const PLAY_SOUND: &str = "play_sound";
pub const PLAY_TONE: &str = "play_tone";
pub const DESKTOP_NOTIFICATION: &str = "desktop_notification";
pub const VIEW_CHANGED: &str = "view_changed";
pub const PERMISSION_CHANGED: &str = "permission_changed";

// -- Payload types --

#[derive(Debug, Clone, Serialize)]
pub struct NewOrdersPayload {
    pub delta: u64,
    pub total: u64,
}

/// Command the client to play the notification clip.
#[derive(Debug, Clone, Serialize)]
pub struct PlaySoundPayload {
    /// Where the client can fetch the clip from this server.
    pub src: String,
    pub volume: f32,
    pub duration_secs: f32,
}

/// Command the client to play the synthesized fallback tone.
#[derive(Debug, Clone, Serialize)]
pub struct PlayTonePayload {
    pub frequency_hz: f32,
    pub duration_secs: f32,
    /// Complete 16-bit mono WAV, base64-encoded.
    pub wav_base64: String,
}

/// Command the client to raise a desktop notification.
#[derive(Debug, Clone, Serialize)]
pub struct DesktopNotificationPayload {
    pub title: String,
    pub body: String,
    /// Same-tag notifications replace each other instead of stacking.
    pub tag: String,
    pub require_interaction: bool,
}
