//! Concrete alert sinks: clip playback, synthesized tone, desktop
//! notification. Each one commands the connected rendering clients over
//! WebSocket; the platform audio device and notification service live on
//! their side.

use std::path::PathBuf;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use lofty::prelude::*;
use lofty::probe::Probe;

use crate::app::SharedState;
use crate::events;
use crate::state::NotificationPermission;

use super::chain::AlertSink;
use super::types::AlertError;

/// Fixed playback volume for the notification clip.
const CLIP_VOLUME: f32 = 0.7;

/// Route where clients fetch the clip from this server.
const CLIP_ROUTE: &str = "/api/sound/clip";

const TONE_FREQUENCY_HZ: f32 = 800.0;
const TONE_DURATION_SECS: f32 = 0.5;
const TONE_SAMPLE_RATE: u32 = 44_100;
const TONE_START_GAIN: f32 = 0.3;
const TONE_FLOOR_GAIN: f32 = 0.001;

const NOTIFY_TITLE: &str = "🍽️ New Order Received!";
const NOTIFY_BODY: &str = "A new food order has been placed";
const NOTIFY_TAG: &str = "new-order";

/// Build the default fallback chain in its fixed order.
pub fn default_chain(state: &SharedState) -> Vec<Box<dyn AlertSink>> {
    vec![
        Box::new(ClipSink::new(state.clip_path())),
        Box::new(ToneSink),
        Box::new(DesktopSink),
    ]
}

/// Primary: play the pre-supplied notification clip.
///
/// Fails when the clip is missing or undecodable, or when no rendering
/// client is connected to play it.
pub struct ClipSink {
    clip_path: PathBuf,
}

impl ClipSink {
    pub fn new(clip_path: PathBuf) -> Self {
        Self { clip_path }
    }
}

#[async_trait]
impl AlertSink for ClipSink {
    fn name(&self) -> &'static str {
        "clip"
    }

    async fn alert(&self, state: &SharedState) -> Result<(), AlertError> {
        let tagged = Probe::open(&self.clip_path)
            .and_then(|probe| probe.read())
            .map_err(|e| AlertError::ClipUnavailable(e.to_string()))?;
        let duration = tagged.properties().duration();

        let payload = events::PlaySoundPayload {
            src: CLIP_ROUTE.into(),
            volume: CLIP_VOLUME,
            duration_secs: duration.as_secs_f32(),
        };
        if state.broadcast_event(events::PLAY_SOUND, payload) {
            Ok(())
        } else {
            Err(AlertError::NoListeners)
        }
    }
}

/// Secondary: synthesize a short sine tone and ship it as embedded WAV.
pub struct ToneSink;

impl ToneSink {
    /// Render the fallback tone: fixed-frequency sine, half a second,
    /// gain decaying exponentially to near-silence.
    pub fn render_wav() -> Vec<u8> {
        let total = (TONE_SAMPLE_RATE as f32 * TONE_DURATION_SECS) as usize;
        let mut samples = Vec::with_capacity(total);
        for n in 0..total {
            let t = n as f32 / TONE_SAMPLE_RATE as f32;
            let gain = TONE_START_GAIN
                * (TONE_FLOOR_GAIN / TONE_START_GAIN).powf(t / TONE_DURATION_SECS);
            let sample = (t * TONE_FREQUENCY_HZ * std::f32::consts::TAU).sin() * gain;
            samples.push((sample * f32::from(i16::MAX)) as i16);
        }
        encode_wav_mono16(&samples, TONE_SAMPLE_RATE)
    }
}

#[async_trait]
impl AlertSink for ToneSink {
    fn name(&self) -> &'static str {
        "tone"
    }

    async fn alert(&self, state: &SharedState) -> Result<(), AlertError> {
        let payload = events::PlayTonePayload {
            frequency_hz: TONE_FREQUENCY_HZ,
            duration_secs: TONE_DURATION_SECS,
            wav_base64: BASE64.encode(Self::render_wav()),
        };
        if state.broadcast_event(events::PLAY_TONE, payload) {
            Ok(())
        } else {
            Err(AlertError::NoListeners)
        }
    }
}

/// Tertiary: desktop notification, only when the rendering layer reported
/// granted permission. Tagged so repeats replace instead of stacking.
pub struct DesktopSink;

#[async_trait]
impl AlertSink for DesktopSink {
    fn name(&self) -> &'static str {
        "desktop"
    }

    async fn alert(&self, state: &SharedState) -> Result<(), AlertError> {
        if state.permission().await != NotificationPermission::Granted {
            return Err(AlertError::NotGranted);
        }

        let payload = events::DesktopNotificationPayload {
            title: NOTIFY_TITLE.into(),
            body: NOTIFY_BODY.into(),
            tag: NOTIFY_TAG.into(),
            require_interaction: true,
        };
        if state.broadcast_event(events::DESKTOP_NOTIFICATION, payload) {
            Ok(())
        } else {
            Err(AlertError::NoListeners)
        }
    }
}

fn encode_wav_mono16(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes()); // fmt chunk size
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * 2).to_le_bytes()); // byte rate
    out.extend_from_slice(&2u16.to_le_bytes()); // block align
    out.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for s in samples {
        out.extend_from_slice(&s.to_le_bytes());
    }
    out
}
