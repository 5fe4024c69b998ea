use gloo::utils::format::JsValueSerdeExt;
use wasm_bindgen::prelude::*;

use crate::config::DashboardConfig;
use crate::domain::logging::{LogComponent, get_logger};

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod time_utils;

/// Global the page may define to override configuration defaults.
pub const CONFIG_GLOBAL: &str = "__DASHBOARD_CONFIG__";

/// Install logging, then mount the dashboard
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let config = load_config();

    let console_logger = Box::new(infrastructure::services::ConsoleLogger::new(config.log_level));
    domain::logging::init_logger(console_logger);

    let browser_time_provider = Box::new(infrastructure::services::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    get_logger().info(
        LogComponent::Presentation("Initialize"),
        &format!("🚀 Gold dashboard starting (api: '{}')", config.api_base_url),
    );

    app::mount(config);
}

/// Defaults, overridden field by field from `window.__DASHBOARD_CONFIG__`.
fn load_config() -> DashboardConfig {
    let Some(window) = web_sys::window() else {
        return DashboardConfig::default();
    };
    let raw = match js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)) {
        Ok(raw) if !raw.is_undefined() && !raw.is_null() => raw,
        _ => return DashboardConfig::default(),
    };

    match raw.into_serde::<DashboardConfig>() {
        Ok(config) => config,
        Err(e) => {
            gloo::console::warn!(format!("Ignoring malformed {}: {}", CONFIG_GLOBAL, e));
            DashboardConfig::default()
        }
    }
}
