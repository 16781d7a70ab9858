//! Application Context
//!
//! App-wide configuration provided via the Leptos Context API.

use std::time::Duration;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;

use crate::api::HttpTaskApi;
use crate::config::AppConfig;

/// Config handle provided to all views
#[derive(Clone, Copy)]
pub struct AppContext {
    config: StoredValue<AppConfig>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: StoredValue::new(config),
        }
    }

    /// Client for the configured task store
    pub fn api(&self) -> HttpTaskApi {
        self.config.with_value(|c| HttpTaskApi::new(c.api_base_url.clone()))
    }

    pub fn poll_interval(&self) -> Duration {
        self.config.with_value(|c| c.poll_interval)
    }

    /// Resolves once an inline error has been shown long enough
    pub fn error_clear_timer(&self) -> TimeoutFuture {
        self.config.with_value(|c| timeout(c.error_clear_delay))
    }
}

/// Get the app context provided by `App`
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

pub fn timeout(delay: Duration) -> TimeoutFuture {
    TimeoutFuture::new(u32::try_from(delay.as_millis()).unwrap_or(u32::MAX))
}
