//! Map explorer frontend: wires a 2-D map view to hosted location services
//! (feature layers, geocoding, demographic enrichment, places search).
//!
//! Architecture is a single message loop: widget events become `Message`s,
//! `update()` mutates the one `AppState` and returns `Command`s, executors
//! run the network futures and feed outcomes back in as messages.

pub mod canvas;
pub mod command_executors;
pub mod components;
pub mod constants;
pub mod dom_utils;
pub mod geometry;
pub mod messages;
pub mod models;
pub mod network;
pub mod query;
pub mod reducers;
pub mod render;
pub mod schema_validation;
pub mod state;
pub mod storage;
pub mod toast;
pub mod ui;
pub mod update;
pub mod utils;

#[cfg(test)]
mod query_prop_test;
#[cfg(test)]
mod tests;

use wasm_bindgen::prelude::*;

/// Console logging that disappears on native builds (unit tests run there).
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(&format!($($arg)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        let _ = format!($($arg)*);
    }};
}

/// Wait for the runtime API configuration before issuing any service call.
/// The page's bootstrap script calls `init_api_config_js` with the key; a
/// compile-time ARCGIS_API_KEY works too.
async fn wait_for_api_config(timeout_ms: u32) -> bool {
    use gloo_timers::future::TimeoutFuture;

    let mut waited = 0u32;
    loop {
        if network::has_api_key() {
            return true;
        }
        if waited >= timeout_ms {
            return false;
        }
        TimeoutFuture::new(50).await;
        waited += 50;
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    // Compile-time key, if any; the JS bootstrap may overwrite it.
    let _ = network::init_api_config();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    ui::setup::build_base_ui(&document)?;
    ui::events::setup_ui_event_handlers(&document)?;

    if let Err(e) = storage::load_ui_prefs() {
        debug_log!("Failed to load UI prefs: {:?}", e);
    }

    // Bootstrap continues asynchronously: wait for the key, then declare the
    // view ready (startup graphics + the initial demographic lookup).
    wasm_bindgen_futures::spawn_local(async {
        if !wait_for_api_config(5_000).await {
            toast::error("No API key configured - service calls will be rejected.");
        }
        state::dispatch_global_message(messages::Message::ViewReady);
    });

    Ok(())
}

/// Search-widget adapter hook: the host page calls this when its search box
/// resolves a result (name + geometry).
#[wasm_bindgen]
pub fn search_result_selected(label: String, lon: f64, lat: f64) {
    state::dispatch_global_message(messages::Message::SearchResultSelected {
        label,
        point: geometry::Point::new(lon, lat),
    });
}
