//! App configuration.

use std::time::Duration;

/// Default ceiling on poll cycles per job (~10 minutes at 600 ms).
const DEFAULT_MAX_POLLS: u32 = 1000;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend base URL
    pub server_url: String,
    /// Delay between poll cycles
    pub poll_interval: Duration,
    /// Ceiling on poll cycles per job; `None` polls until a terminal
    /// status is observed
    pub max_polls: Option<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5050".to_string(),
            poll_interval: Duration::from_millis(600),
            max_polls: Some(DEFAULT_MAX_POLLS),
        }
    }
}

impl AppConfig {
    /// Create config from environment variables. `ASTEM_MAX_POLLS=0`
    /// disables the poll ceiling.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_url: std::env::var("ASTEM_SERVER").unwrap_or(defaults.server_url),
            poll_interval: Duration::from_millis(
                std::env::var("ASTEM_POLL_INTERVAL_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(600),
            ),
            max_polls: match std::env::var("ASTEM_MAX_POLLS").ok().and_then(|s| s.parse::<u32>().ok()) {
                Some(0) => None,
                Some(n) => Some(n),
                None => defaults.max_polls,
            },
        }
    }
}
