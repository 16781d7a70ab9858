//! App Configuration
//!
//! A WASM bundle has no process environment, so overrides are baked in at
//! build time (`TODO_API_URL=... trunk build`).

use std::time::Duration;

use log::LevelFilter;

const DEFAULT_API_URL: &str = "http://localhost:8081";
const DEFAULT_POLL_MS: u64 = 1500;
const DEFAULT_ERROR_CLEAR_MS: u64 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the task store, without trailing slash
    pub api_base_url: String,
    /// List refresh period while a list view is mounted
    pub poll_interval: Duration,
    /// How long an inline error stays visible
    pub error_clear_delay: Duration,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_MS),
            error_clear_delay: Duration::from_millis(DEFAULT_ERROR_CLEAR_MS),
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    /// Defaults overlaid with whatever was set at build time
    pub fn from_env() -> Self {
        Self::from_overrides(
            option_env!("TODO_API_URL"),
            option_env!("TODO_POLL_MS"),
            option_env!("TODO_ERROR_CLEAR_MS"),
            option_env!("TODO_LOG_LEVEL"),
        )
    }

    fn from_overrides(
        api_url: Option<&str>,
        poll_ms: Option<&str>,
        error_clear_ms: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        let mut config = Self::default();
        if let Some(url) = api_url.map(|u| u.trim().trim_end_matches('/')).filter(|u| !u.is_empty()) {
            config.api_base_url = url.to_string();
        }
        if let Some(ms) = poll_ms.and_then(|v| v.trim().parse::<u64>().ok()).filter(|ms| *ms > 0) {
            config.poll_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = error_clear_ms.and_then(|v| v.trim().parse::<u64>().ok()) {
            config.error_clear_delay = Duration::from_millis(ms);
        }
        if let Some(level) = log_level.and_then(|v| v.trim().parse::<LevelFilter>().ok()) {
            config.log_level = level;
        }
        config
    }
}
