//! Kanban Todo Frontend Entry Point

mod api;
mod app;
mod board;
mod components;
mod config;
mod context;
mod error;
mod forms;
mod logger;
mod models;
mod store;
#[cfg(test)]
mod testing;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_env();
    if let Err(e) = logger::init(config.log_level) {
        web_sys::console::warn_1(&format!("logger already set: {}", e).into());
    }
    log::info!("[APP] starting against {}", config.api_base_url);

    mount_to_body(move || view! { <App config=config.clone() /> });
}
