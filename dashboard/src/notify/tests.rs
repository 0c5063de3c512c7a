use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::app::SharedState;
use crate::config::AppConfig;
use crate::state::NotificationPermission;

use super::*;

fn test_state() -> SharedState {
    let (state, _rx) = SharedState::new(
        AppConfig::default(),
        std::env::temp_dir().join("order-dashboard-notify-tests"),
    );
    state
}

struct FakeSink {
    name: &'static str,
    succeed: bool,
    log: Arc<Mutex<Vec<&'static str>>>,
}

#[async_trait]
impl AlertSink for FakeSink {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn alert(&self, _state: &SharedState) -> Result<(), AlertError> {
        self.log.lock().unwrap().push(self.name);
        if self.succeed {
            Ok(())
        } else {
            Err(AlertError::NoListeners)
        }
    }
}

fn fake(name: &'static str, succeed: bool, log: &Arc<Mutex<Vec<&'static str>>>) -> Box<dyn AlertSink> {
    Box::new(FakeSink {
        name,
        succeed,
        log: log.clone(),
    })
}

#[tokio::test]
async fn first_success_ends_the_chain() {
    let state = test_state();
    let log = Arc::new(Mutex::new(Vec::new()));
    let sinks = vec![
        fake("clip", false, &log),
        fake("tone", true, &log),
        fake("desktop", true, &log),
    ];

    let winner = run_chain(&state, &sinks).await;
    assert_eq!(winner, Some("tone"));
    assert_eq!(*log.lock().unwrap(), vec!["clip", "tone"]);
}

#[tokio::test]
async fn chain_tries_every_sink_in_order_before_giving_up() {
    let state = test_state();
    let log = Arc::new(Mutex::new(Vec::new()));
    let sinks = vec![
        fake("clip", false, &log),
        fake("tone", false, &log),
        fake("desktop", false, &log),
    ];

    assert_eq!(run_chain(&state, &sinks).await, None);
    assert_eq!(*log.lock().unwrap(), vec!["clip", "tone", "desktop"]);
}

#[tokio::test]
async fn clip_sink_fails_without_the_asset() {
    let state = test_state();
    let _rx = state.subscribe_ws();
    let sink = ClipSink::new(std::env::temp_dir().join("definitely-missing-clip.mp3"));
    match sink.alert(&state).await {
        Err(AlertError::ClipUnavailable(_)) => {}
        other => panic!("expected ClipUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn tone_sink_requires_a_listener() {
    let state = test_state();
    match ToneSink.alert(&state).await {
        Err(AlertError::NoListeners) => {}
        other => panic!("expected NoListeners, got {other:?}"),
    }
}

#[tokio::test]
async fn tone_sink_ships_a_playable_wav() {
    let state = test_state();
    let mut rx = state.subscribe_ws();

    ToneSink.alert(&state).await.unwrap();

    let msg = rx.recv().await.unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&msg).unwrap();
    assert_eq!(parsed["type"], "play_tone");
    assert_eq!(parsed["data"]["frequency_hz"], 800.0);
    assert!(parsed["data"]["wav_base64"].as_str().unwrap().len() > 1000);
}

#[test]
fn rendered_tone_is_half_a_second_of_mono_pcm() {
    let wav = ToneSink::render_wav();
    // 44-byte header + 22050 samples * 2 bytes
    assert_eq!(wav.len(), 44 + 22_050 * 2);
    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(&wav[8..12], b"WAVE");
    assert_eq!(&wav[36..40], b"data");
}

#[test]
fn rendered_tone_decays_toward_silence() {
    let wav = ToneSink::render_wav();
    let peak = |range: std::ops::Range<usize>| -> i16 {
        wav[44..]
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]).saturating_abs())
            .skip(range.start)
            .take(range.len())
            .max()
            .unwrap()
    };
    let early = peak(0..2000);
    let late = peak(20_000..22_000);
    assert!(early > late * 10, "early={early} late={late}");
}

#[tokio::test]
async fn desktop_sink_is_skipped_without_permission() {
    let state = test_state();
    let _rx = state.subscribe_ws();
    match DesktopSink.alert(&state).await {
        Err(AlertError::NotGranted) => {}
        other => panic!("expected NotGranted, got {other:?}"),
    }
}

#[tokio::test]
async fn desktop_sink_sends_tagged_notification_when_granted() {
    let state = test_state();
    state.set_permission(NotificationPermission::Granted).await;
    let mut rx = state.subscribe_ws();

    DesktopSink.alert(&state).await.unwrap();

    let msg = rx.recv().await.unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&msg).unwrap();
    assert_eq!(parsed["type"], "desktop_notification");
    assert_eq!(parsed["data"]["tag"], "new-order");
    assert_eq!(parsed["data"]["require_interaction"], true);
}

#[tokio::test(start_paused = true)]
async fn delayed_desktop_notification_fires_even_after_a_successful_sound() {
    let state = test_state();
    state.set_permission(NotificationPermission::Granted).await;
    let mut rx = state.subscribe_ws();

    notify_new_orders(&state, 3);

    // Chain lands on the tone (no clip asset but a listener is connected).
    let first = rx.recv().await.unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(parsed["type"], "play_tone");

    // The desktop notification still arrives ~1s later.
    let second = rx.recv().await.unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&second).unwrap();
    assert_eq!(parsed["type"], "desktop_notification");
}
