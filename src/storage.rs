//! Persistence of UI preferences to localStorage.
//!
//! Only presentation state is saved – query mode, category, basemap and the
//! viewport. Feature data always comes fresh from the services.

use wasm_bindgen::prelude::*;

use crate::geometry::Point;
use crate::state::{AppState, QueryMode, Viewport, APP_STATE};

const PREFS_KEY: &str = "map-explorer:prefs";

#[derive(serde::Serialize, serde::Deserialize)]
pub struct UiPrefs {
    pub query_mode: QueryMode,
    pub active_category: String,
    pub basemap: String,
    pub center: Point,
    pub zoom: f64,
}

impl UiPrefs {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            query_mode: state.query_mode,
            active_category: state.active_category.clone(),
            basemap: state.basemap.clone(),
            center: state.viewport.center,
            zoom: state.viewport.zoom,
        }
    }

    pub fn apply_to(self, state: &mut AppState) {
        state.query_mode = self.query_mode;
        state.active_category = self.active_category;
        state.basemap = self.basemap;
        state.viewport = Viewport {
            center: self.center,
            zoom: self.zoom,
            ..state.viewport
        };
    }
}

/// Save the current UI preferences from the global state.
pub fn save_ui_prefs() -> Result<(), JsValue> {
    let prefs = APP_STATE.with(|state| UiPrefs::from_state(&state.borrow()));
    let json =
        serde_json::to_string(&prefs).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let window = web_sys::window().ok_or("no global window exists")?;
    let storage = window.local_storage()?.ok_or("no local storage exists")?;
    storage.set_item(PREFS_KEY, &json)?;
    Ok(())
}

/// Load saved preferences into the global state, if any exist.
pub fn load_ui_prefs() -> Result<bool, JsValue> {
    let window = web_sys::window().ok_or("no global window exists")?;
    let storage = window.local_storage()?.ok_or("no local storage exists")?;

    let Some(json) = storage.get_item(PREFS_KEY)? else {
        return Ok(false);
    };
    let Ok(prefs) = serde_json::from_str::<UiPrefs>(&json) else {
        // Stale or corrupt prefs are dropped silently.
        let _ = storage.remove_item(PREFS_KEY);
        return Ok(false);
    };

    APP_STATE.with(|state| prefs.apply_to(&mut state.borrow_mut()));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefs_round_trip_through_json() {
        let mut state = AppState::new();
        state.query_mode = QueryMode::PlacesSearch;
        state.active_category = "13002".into();
        state.basemap = "arcgis/navigation".into();

        let json = serde_json::to_string(&UiPrefs::from_state(&state)).unwrap();
        let decoded: UiPrefs = serde_json::from_str(&json).unwrap();

        let mut restored = AppState::new();
        decoded.apply_to(&mut restored);
        assert_eq!(restored.query_mode, QueryMode::PlacesSearch);
        assert_eq!(restored.active_category, "13002");
        assert_eq!(restored.basemap, "arcgis/navigation");
    }
}
