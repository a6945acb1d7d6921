// Re-export network modules
pub mod config;
pub mod geo_client;

// Re-export commonly used items
pub use geo_client::GeoApiClient;

use config::ApiConfig;
use lazy_static::lazy_static;
use std::sync::RwLock;
use wasm_bindgen::prelude::*;

lazy_static! {
    static ref API_CONFIG: RwLock<Option<ApiConfig>> = RwLock::new(None);
}

/// Initialize the API configuration. Must be called before any service call.
pub fn init_api_config() -> Result<(), &'static str> {
    let config = ApiConfig::new()?;
    *API_CONFIG.write().unwrap() = Some(config);
    Ok(())
}

/// Initialize the API configuration from a JS-provided object
/// (`{apiKey, geocodeUrl?, enrichUrl?, placesUrl?}`). Allows runtime
/// configuration of the key and endpoints.
#[wasm_bindgen]
pub fn init_api_config_js(config: JsValue) -> Result<(), JsValue> {
    let config: ApiConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("invalid api config: {e}")))?;
    crate::debug_log!("Initializing API config from JS");
    *API_CONFIG.write().unwrap() = Some(config);
    Ok(())
}

/// Snapshot of the current configuration; defaults when uninitialized so
/// early callers build keyless requests instead of panicking.
pub(crate) fn current_config() -> ApiConfig {
    API_CONFIG
        .read()
        .unwrap()
        .as_ref()
        .cloned()
        .unwrap_or_default()
}

/// Whether an API key is available yet (bootstrap gating).
pub fn has_api_key() -> bool {
    API_CONFIG
        .read()
        .unwrap()
        .as_ref()
        .map(|c| c.has_api_key())
        .unwrap_or(false)
}
