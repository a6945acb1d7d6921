//! Constants for the map explorer frontend.
//!
//! This module centralizes commonly used string literals and default values
//! to prevent typos and enable safe refactoring across the codebase.

// ---------------------------------------------------------------------------
// Service endpoints
// ---------------------------------------------------------------------------

/// Parcel feature layer queried by the attribute / spatial filter modes.
pub const PARCEL_LAYER_URL: &str =
    "https://services3.arcgis.com/GVgbJbqm8hXASVYi/arcgis/rest/services/LA_County_Parcels/FeatureServer/0";

/// World geocoder used for reverse-geocode lookups.
pub const GEOCODE_SERVER_URL: &str =
    "https://geocode-api.arcgis.com/arcgis/rest/services/World/GeocodeServer";

/// GeoEnrichment endpoint serving demographic study-area aggregates.
pub const ENRICH_SERVER_URL: &str =
    "https://geoenrich.arcgis.com/arcgis/rest/services/World/geoenrichmentserver/Geoenrichment";

/// Places API base (near-point search and place detail fetch).
pub const PLACES_SERVER_URL: &str = "https://places-api.arcgis.com/arcgis/rest/services/places-service/v1";

// Feature layers registered at startup (trailheads / trails / open spaces).
pub const TRAILHEADS_LAYER_URL: &str =
    "https://services3.arcgis.com/GVgbJbqm8hXASVYi/arcgis/rest/services/Trailheads_Styled/FeatureServer/0";
pub const TRAILS_LAYER_URL: &str =
    "https://services3.arcgis.com/GVgbJbqm8hXASVYi/arcgis/rest/services/Trails_Styled/FeatureServer/0";
pub const OPENSPACES_LAYER_URL: &str =
    "https://services3.arcgis.com/GVgbJbqm8hXASVYi/arcgis/rest/services/Parks_and_Open_Space_Styled/FeatureServer/0";
pub const POINTS_LAYER_URL: &str =
    "https://services3.arcgis.com/GVgbJbqm8hXASVYi/arcgis/rest/services/my_points/FeatureServer/0";

// ---------------------------------------------------------------------------
// Query defaults
// ---------------------------------------------------------------------------

/// Fields requested for every parcel query.
pub const PARCEL_OUT_FIELDS: [&str; 4] = ["APN", "UseType", "TaxRateCity", "Roll_LandValue"];

/// "Landmarks and Outdoors" – default places category.
pub const DEFAULT_PLACE_CATEGORY: &str = "4d4b7105d754a06377d81259";

/// Radius of the places near-point search, meters.
pub const PLACE_SEARCH_RADIUS_M: f64 = 500.0;

/// Radius of the buffer drawn around a demographic lookup point, miles.
pub const DEMOGRAPHIC_BUFFER_MILES: f64 = 1.0;

/// Vertex count used when approximating the search-radius circle.
pub const BUFFER_CIRCLE_POINTS: usize = 100;

/// City looked up once when the view first becomes ready.
pub const DEFAULT_STUDY_CITY: &str = "Milan";
pub const DEFAULT_STUDY_LON: f64 = 9.19;
pub const DEFAULT_STUDY_LAT: f64 = 45.4642;

/// Definition expression that hides every feature until a filter is chosen.
pub const EMPTY_DEFINITION_EXPRESSION: &str = "1=0";

// ---------------------------------------------------------------------------
// Basemaps
// ---------------------------------------------------------------------------

pub const DEFAULT_BASEMAP: &str = "arcgis/topographic";
pub const BASEMAP_IDS: [&str; 4] = [
    "arcgis/topographic",
    "arcgis/navigation",
    "arcgis/streets",
    "arcgis/imagery",
];

// ---------------------------------------------------------------------------
// Default view
// ---------------------------------------------------------------------------

// Venice Beach, CA – where the places demo centers.
pub const DEFAULT_CENTER_LON: f64 = -118.46651;
pub const DEFAULT_CENTER_LAT: f64 = 33.98621;
pub const DEFAULT_ZOOM: f64 = 13.0;

// ---------------------------------------------------------------------------
// Element IDs (commonly referenced)
// ---------------------------------------------------------------------------

pub const ID_MAP_CANVAS: &str = "map-canvas";
pub const ID_QUERY_MODE_SELECT: &str = "query-mode-select";
pub const ID_WHERE_SELECT: &str = "where-clause-select";
pub const ID_CATEGORY_SELECT: &str = "category-select";
pub const ID_BASEMAP_SELECT: &str = "basemap-select";
pub const ID_RESULTS_PANEL: &str = "results-panel";
pub const ID_DETAIL_FLOW: &str = "detail-flow";
pub const ID_POPUP_ROOT: &str = "popup-root";

// CSS class names
pub const CSS_HIDDEN: &str = "hidden";
pub const CSS_VISIBLE: &str = "visible";
pub const CSS_LIST_ITEM: &str = "result-list-item";
pub const CSS_FLOW_ITEM: &str = "flow-item";
pub const CSS_FLOW_ITEM_SELECTED: &str = "flow-item selected";
pub const CSS_ATTRIBUTE_BLOCK: &str = "attribute-block";
pub const CSS_EMPTY_STATE: &str = "empty-state";

// ---------------------------------------------------------------------------
// Symbols
// ---------------------------------------------------------------------------

// Fill used for parcel query results: [20, 130, 200, 0.5] with white outline.
pub const PARCEL_FILL_RGBA: (u8, u8, u8, f64) = (20, 130, 200, 0.5);
pub const PARCEL_OUTLINE_RGBA: (u8, u8, u8, f64) = (255, 255, 255, 1.0);
pub const PARCEL_OUTLINE_WIDTH: f64 = 0.5;

// Search-radius buffer: translucent blue fill, solid blue outline.
pub const BUFFER_FILL_RGBA: (u8, u8, u8, f64) = (3, 140, 255, 0.1);
pub const BUFFER_OUTLINE_RGBA: (u8, u8, u8, f64) = (3, 140, 255, 1.0);
pub const BUFFER_OUTLINE_WIDTH: f64 = 1.0;

// Demographic buffer: near-transparent grey.
pub const DEMOGRAPHIC_FILL_RGBA: (u8, u8, u8, f64) = (50, 50, 50, 0.1);
pub const DEMOGRAPHIC_OUTLINE_RGBA: (u8, u8, u8, f64) = (0, 0, 0, 0.25);
pub const DEMOGRAPHIC_OUTLINE_WIDTH: f64 = 0.5;

// Static demo symbols (orange marker / line / fill).
pub const DEMO_MARKER_RGBA: (u8, u8, u8, f64) = (226, 119, 40, 1.0);
pub const DEMO_FILL_RGBA: (u8, u8, u8, f64) = (227, 139, 79, 0.8);
pub const DEMO_OUTLINE_RGBA: (u8, u8, u8, f64) = (255, 255, 255, 1.0);

// Sketch preview: dashed-looking light fill.
pub const SKETCH_FILL_RGBA: (u8, u8, u8, f64) = (255, 255, 255, 0.2);
pub const SKETCH_OUTLINE_RGBA: (u8, u8, u8, f64) = (90, 90, 90, 0.9);

pub const PLACE_MARKER_SIZE: f64 = 15.0;
