//! Alert error type.

/// Why an alert sink could not deliver.
///
/// None of these are fatal; a failed sink just hands off to the next one
/// in the chain.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("notification clip unavailable: {0}")]
    ClipUnavailable(String),

    #[error("no rendering clients connected")]
    NoListeners,

    #[error("desktop notification permission not granted")]
    NotGranted,
}
