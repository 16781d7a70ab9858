//! To-Do Board Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod error;
mod models;
mod mutations;
mod role;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_env();
    // Only the first init installs a logger
    let _ = console_logger::init(config.log_level);
    log::info!("Task store at {}", config.api_base_url);

    mount_to_body(move || view! { <App config=config /> });
}
