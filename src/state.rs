//! Application state: the interaction router's mode machine, render and
//! panel state, and the global dispatch entry point.
//!
//! All state lives in one `AppState` owned by the UI thread. Reducers mutate
//! it synchronously inside `dispatch()`; side effects run afterwards, once
//! the borrow is dropped.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASEMAP, DEFAULT_CENTER_LAT, DEFAULT_CENTER_LON, DEFAULT_PLACE_CATEGORY, DEFAULT_ZOOM,
};
use crate::geometry::{from_world, to_world, Point};
use crate::messages::{Command, Message};
use crate::models::{
    DetailPanelDescription, Graphic, GraphicsScope, LayerConfig, PlaceSummary, PopupDescription,
};

// ---------------------------------------------------------------------------
// Router modes
// ---------------------------------------------------------------------------

/// The interaction router's mode machine. Transitions happen only through
/// the explicit mode selector (`Message::QueryModeChanged`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryMode {
    /// No filter mode selected; map clicks run the demographic lookup.
    Idle,
    AttributeFilter,
    SpatialFilter,
    DefinitionExpression,
    PlacesSearch,
}

impl QueryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryMode::Idle => "idle",
            QueryMode::AttributeFilter => "sql",
            QueryMode::SpatialFilter => "spatial",
            QueryMode::DefinitionExpression => "filter",
            QueryMode::PlacesSearch => "places",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "sql" => QueryMode::AttributeFilter,
            "spatial" => QueryMode::SpatialFilter,
            "filter" => QueryMode::DefinitionExpression,
            "places" => QueryMode::PlacesSearch,
            _ => QueryMode::Idle,
        }
    }
}

// ---------------------------------------------------------------------------
// Viewport – the canvas adapter's screen transform.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    pub center: Point,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// World scale in pixels at the current zoom (256 × 2^zoom).
    fn world_px(&self) -> f64 {
        256.0 * self.zoom.exp2()
    }

    /// Map point → canvas pixel.
    pub fn project(&self, p: Point) -> (f64, f64) {
        let (wx, wy) = to_world(p);
        let (cx, cy) = to_world(self.center);
        let s = self.world_px();
        (
            self.width / 2.0 + (wx - cx) * s,
            self.height / 2.0 + (wy - cy) * s,
        )
    }

    /// Canvas pixel → map point.
    pub fn unproject(&self, x: f64, y: f64) -> Point {
        let (cx, cy) = to_world(self.center);
        let s = self.world_px();
        from_world(cx + (x - self.width / 2.0) / s, cy + (y - self.height / 2.0) / s)
    }

    /// The visible extent as a polygon ring, for extent-bounded queries.
    pub fn extent(&self) -> crate::geometry::Geometry {
        let tl = self.unproject(0.0, 0.0);
        let br = self.unproject(self.width, self.height);
        crate::geometry::Geometry::Polygon(vec![
            Point::new(tl.lon, tl.lat),
            Point::new(br.lon, tl.lat),
            Point::new(br.lon, br.lat),
            Point::new(tl.lon, br.lat),
        ])
    }
}

// ---------------------------------------------------------------------------
// Render state
// ---------------------------------------------------------------------------

/// Graphics grouped by scope. A scope is always replaced wholesale – the
/// clear-before-add that makes rendering idempotent.
#[derive(Debug, Default)]
pub struct RenderState {
    scopes: HashMap<GraphicsScope, Vec<Graphic>>,
}

impl RenderState {
    /// Replace the scope's graphics. Clearing first is what guarantees that
    /// rendering the same outcome twice leaves the same visual state.
    pub fn replace_scope(&mut self, scope: GraphicsScope, graphics: Vec<Graphic>) {
        self.scopes.insert(scope, graphics);
    }

    pub fn clear_scope(&mut self, scope: GraphicsScope) {
        self.scopes.remove(&scope);
    }

    pub fn graphics(&self, scope: GraphicsScope) -> &[Graphic] {
        self.scopes.get(&scope).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Draw order: buffers under markers, previews on top.
    pub fn draw_order(&self) -> impl Iterator<Item = &Graphic> {
        const ORDER: [GraphicsScope; 5] = [
            GraphicsScope::StaticDemo,
            GraphicsScope::SearchBuffer,
            GraphicsScope::ParcelResults,
            GraphicsScope::Places,
            GraphicsScope::SketchPreview,
        ];
        ORDER.into_iter().flat_map(|s| self.graphics(s).iter())
    }
}

// ---------------------------------------------------------------------------
// App state
// ---------------------------------------------------------------------------

pub struct AppState {
    // Router
    pub query_mode: QueryMode,
    pub where_clause: String,
    pub active_category: String,
    pub basemap: String,
    /// Last places-search click location; category changes re-query it.
    pub click_point: Option<Point>,

    /// Monotonic query generation. Outcomes carrying an older generation are
    /// stale and get discarded (overlapping-query policy).
    pub generation: u32,

    // Render output
    pub render: RenderState,
    pub popup: Option<PopupDescription>,
    /// Zero-or-one open detail panel.
    pub panel: Option<DetailPanelDescription>,
    /// Detail fetch we are waiting for; a late response for anything else is
    /// dropped.
    pub pending_detail: Option<String>,

    // Data for the current render cycle
    pub places: Vec<PlaceSummary>,
    pub layers: Vec<LayerConfig>,

    pub viewport: Viewport,
    pub view_ready: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            query_mode: QueryMode::Idle,
            where_clause: String::new(),
            active_category: DEFAULT_PLACE_CATEGORY.to_string(),
            basemap: DEFAULT_BASEMAP.to_string(),
            click_point: None,
            generation: 0,
            render: RenderState::default(),
            popup: None,
            panel: None,
            pending_detail: None,
            places: Vec::new(),
            layers: Vec::new(),
            viewport: Viewport {
                center: Point::new(DEFAULT_CENTER_LON, DEFAULT_CENTER_LAT),
                zoom: DEFAULT_ZOOM,
                width: 800.0,
                height: 600.0,
            },
            view_ready: false,
        }
    }

    /// Claim the next query generation. Every issued query captures the
    /// returned token; only outcomes carrying the current token may render.
    pub fn next_generation(&mut self) -> u32 {
        self.generation += 1;
        self.generation
    }

    pub fn is_current_generation(&self, generation: u32) -> bool {
        generation == self.generation
    }

    // -- Panel state manager ------------------------------------------------

    /// Open a detail panel; an already-open panel is deselected and removed
    /// first. The popup slot is untouched here – the selection that triggers
    /// an open has already replaced it with its own popup.
    pub fn open_panel(&mut self, panel: DetailPanelDescription) {
        if self.panel.is_some() {
            self.panel = None;
        }
        self.panel = Some(panel);
    }

    /// Close the open panel, popup first. Both close paths (back navigation
    /// and superseding interactions) must run through here.
    pub fn close_panel(&mut self) {
        if self.panel.is_some() {
            self.popup = None;
            self.panel = None;
        }
        self.pending_detail = None;
    }

    /// Clear everything the places pipeline owns: buffer + place graphics,
    /// the list, the popup and any open detail panel.
    pub fn clear_place_results(&mut self) {
        self.render.clear_scope(GraphicsScope::SearchBuffer);
        self.render.clear_scope(GraphicsScope::Places);
        self.places.clear();
        self.popup = None;
        self.close_panel();
    }

    /// Run one message through the reducers and collect the side effects.
    pub fn dispatch(&mut self, msg: Message) -> Vec<Command> {
        crate::update::update(self, msg)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    pub static APP_STATE: RefCell<AppState> = RefCell::new(AppState::new());
}

/// Dispatch a message against the global state and execute the resulting
/// commands once the state borrow is dropped.
pub fn dispatch_global_message(msg: Message) {
    // 1. Perform state updates and collect commands
    let commands = APP_STATE.with(|state| {
        let mut state = state.borrow_mut();
        state.dispatch(msg)
    });

    // 2. Execute commands after state borrow is dropped
    for cmd in commands {
        match cmd {
            Command::SendMessage(msg) => dispatch_global_message(msg),
            Command::UpdateUI(ui_fn) => ui_fn(),
            cmd @ Command::QueryParcels { .. }
            | cmd @ Command::ReverseGeocode { .. }
            | cmd @ Command::QueryDemographics { .. }
            | cmd @ Command::QueryPlaces { .. }
            | cmd @ Command::FetchPlaceDetails { .. } => {
                crate::command_executors::execute_query_command(cmd)
            }
            Command::SaveUiPrefs => {
                if let Err(e) = crate::storage::save_ui_prefs() {
                    crate::debug_log!("Failed to save UI prefs: {:?}", e);
                }
            }
            Command::NoOp => {}
        }
    }
}
