//! Fixed defaults for deployment-tunable settings.

/// Default HTTP/WebSocket server port.
pub const DEFAULT_SERVER_PORT: u16 = 8420;

/// Default upstream menu API base URL.
pub const DEFAULT_API_BASE_URL: &str =
    "https://1vlg5qkgm2.execute-api.us-east-1.amazonaws.com/dev/api";

/// File name of the pre-supplied notification clip inside the data dir.
pub const CLIP_FILE_NAME: &str = "notification.mp3";
