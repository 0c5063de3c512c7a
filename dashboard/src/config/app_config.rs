//! Runtime application configuration loaded from environment variables.

use super::defaults::{DEFAULT_API_BASE_URL, DEFAULT_SERVER_PORT};

/// Runtime configuration populated from the environment.
///
/// The poll interval and alert timings are compile-time constants; only
/// deployment concerns (port, upstream base URL) are overridable.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub api_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_SERVER_PORT,
            api_base_url: DEFAULT_API_BASE_URL.into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment, falling back to defaults.
    pub fn load() -> Result<Self, anyhow::Error> {
        let server_port = match std::env::var("DASHBOARD_SERVER_PORT") {
            Ok(v) => parse_u16(&v, DEFAULT_SERVER_PORT),
            Err(_) => DEFAULT_SERVER_PORT,
        };

        let api_base_url = std::env::var("DASHBOARD_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.into());

        validate_base_url(&api_base_url).map_err(|e| anyhow::anyhow!(e))?;

        Ok(Self {
            server_port,
            api_base_url,
        })
    }
}

fn parse_u16(s: &str, default: u16) -> u16 {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}

fn validate_base_url(url: &str) -> Result<(), String> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(format!("invalid API base URL: {url}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_u16_falls_back_on_garbage() {
        assert_eq!(parse_u16("", 8420), 8420);
        assert_eq!(parse_u16("not-a-port", 8420), 8420);
        assert_eq!(parse_u16("9001", 8420), 9001);
    }

    #[test]
    fn base_url_must_be_http() {
        assert!(validate_base_url("https://api.example.com/dev/api").is_ok());
        assert!(validate_base_url("http://localhost:9000").is_ok());
        assert!(validate_base_url("ftp://example.com").is_err());
        assert!(validate_base_url("").is_err());
    }
}
