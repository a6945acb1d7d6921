//! Result renderer: converts successful outcomes into map graphics and
//! panel entries, replacing prior output for the owning scope.
//!
//! Always clear-before-add: applying the same outcome twice leaves the
//! render state visually identical to applying it once.

use crate::constants::{
    BUFFER_CIRCLE_POINTS, BUFFER_FILL_RGBA, BUFFER_OUTLINE_RGBA, BUFFER_OUTLINE_WIDTH,
    DEMOGRAPHIC_BUFFER_MILES, DEMOGRAPHIC_FILL_RGBA, DEMOGRAPHIC_OUTLINE_RGBA,
    DEMOGRAPHIC_OUTLINE_WIDTH, DEMO_FILL_RGBA, DEMO_MARKER_RGBA, DEMO_OUTLINE_RGBA,
    PARCEL_FILL_RGBA, PARCEL_OUTLINE_RGBA, PARCEL_OUTLINE_WIDTH, PLACE_MARKER_SIZE,
    PLACE_SEARCH_RADIUS_M, SKETCH_FILL_RGBA, SKETCH_OUTLINE_RGBA,
};
use crate::geometry::{circle, circle_miles, Geometry, Point};
use crate::models::{
    AttributeBlock, DemographicProfile, DetailPanelDescription, Feature, Graphic, GraphicsScope,
    ListItemDescription, PlaceDetails, PlaceSummary, PopupContent, PopupDescription, PopupTemplate,
    Rgba, ServiceOutcome, Symbol,
};
use crate::state::RenderState;
use crate::utils::{format_distance_km, truncate_label};

// ---------------------------------------------------------------------------
// Symbols
// ---------------------------------------------------------------------------

/// Shared fill for every parcel query result.
pub fn parcel_symbol() -> Symbol {
    Symbol::SimpleFill {
        fill: Rgba::from(PARCEL_FILL_RGBA),
        outline: Rgba::from(PARCEL_OUTLINE_RGBA),
        outline_width: PARCEL_OUTLINE_WIDTH,
    }
}

fn search_buffer_symbol() -> Symbol {
    Symbol::SimpleFill {
        fill: Rgba::from(BUFFER_FILL_RGBA),
        outline: Rgba::from(BUFFER_OUTLINE_RGBA),
        outline_width: BUFFER_OUTLINE_WIDTH,
    }
}

fn demographic_buffer_symbol() -> Symbol {
    Symbol::SimpleFill {
        fill: Rgba::from(DEMOGRAPHIC_FILL_RGBA),
        outline: Rgba::from(DEMOGRAPHIC_OUTLINE_RGBA),
        outline_width: DEMOGRAPHIC_OUTLINE_WIDTH,
    }
}

fn sketch_symbol() -> Symbol {
    Symbol::SimpleFill {
        fill: Rgba::from(SKETCH_FILL_RGBA),
        outline: Rgba::from(SKETCH_OUTLINE_RGBA),
        outline_width: 1.0,
    }
}

pub fn parcel_popup_template() -> PopupTemplate {
    PopupTemplate {
        title: "Parcel {APN}".into(),
        content: PopupContent::Text(
            "Type: {UseType} <br> Land value: {Roll_LandValue} <br> Tax Rate City: {TaxRateCity}"
                .into(),
        ),
    }
}

// ---------------------------------------------------------------------------
// Graphics builders
// ---------------------------------------------------------------------------

/// One graphic per feature record, all bearing the shared parcel symbol and
/// popup template.
pub fn parcel_graphics(features: &[Feature]) -> Vec<Graphic> {
    let template = parcel_popup_template();
    features
        .iter()
        .map(|f| {
            Graphic::new(f.geometry.clone(), parcel_symbol())
                .with_popup(template.clone())
                .with_attributes(f.attributes.clone())
        })
        .collect()
}

/// The translucent disc visualizing the places search radius.
pub fn search_buffer_graphic(center: Point) -> Graphic {
    Graphic::new(
        circle(center, PLACE_SEARCH_RADIUS_M, BUFFER_CIRCLE_POINTS),
        search_buffer_symbol(),
    )
}

/// The 1-mile disc drawn around a successful demographic lookup.
pub fn demographic_buffer_graphic(center: Point) -> Graphic {
    Graphic::new(
        circle_miles(center, DEMOGRAPHIC_BUFFER_MILES, BUFFER_CIRCLE_POINTS),
        demographic_buffer_symbol(),
    )
}

/// Marker per place result; picture marker when the service sent an icon.
pub fn place_graphics(places: &[PlaceSummary]) -> Vec<Graphic> {
    places
        .iter()
        .map(|p| {
            let symbol = match &p.icon_url {
                Some(url) => Symbol::PictureMarker {
                    url: url.clone(),
                    width: PLACE_MARKER_SIZE,
                    height: PLACE_MARKER_SIZE,
                },
                None => Symbol::SimpleMarker {
                    color: Rgba::from(DEMO_MARKER_RGBA),
                    outline: Rgba::from(DEMO_OUTLINE_RGBA),
                    size: PLACE_MARKER_SIZE,
                },
            };
            Graphic::new(Geometry::Point(p.location), symbol)
        })
        .collect()
}

/// Provisional graphic echoing an in-progress sketch.
pub fn sketch_preview_graphic(geometry: Geometry, id: String) -> Graphic {
    let mut g = Graphic::new(geometry, sketch_symbol());
    g.id = id;
    g
}

/// The startup point / polyline / polygon demo graphics.
pub fn static_demo_graphics() -> Vec<Graphic> {
    let marker = Symbol::SimpleMarker {
        color: Rgba::from(DEMO_MARKER_RGBA),
        outline: Rgba::from(DEMO_OUTLINE_RGBA),
        size: 8.0,
    };
    let line = Symbol::SimpleLine {
        color: Rgba::from(DEMO_MARKER_RGBA),
        width: 2.0,
    };
    let fill = Symbol::SimpleFill {
        fill: Rgba::from(DEMO_FILL_RGBA),
        outline: Rgba::from(DEMO_OUTLINE_RGBA),
        outline_width: 1.0,
    };

    vec![
        Graphic::new(
            Geometry::Point(Point::new(-118.80657463861, 34.0005930608889)),
            marker,
        ),
        Graphic::new(
            Geometry::Polyline(vec![
                Point::new(-118.821527826096, 34.0139576938577),
                Point::new(-118.814893761649, 34.0080602407843),
                Point::new(-118.808878330345, 34.0016642996246),
            ]),
            line,
        ),
        Graphic::new(
            Geometry::Polygon(vec![
                Point::new(-118.818984489994, 34.0137559967283),
                Point::new(-118.806796597377, 34.0215816298725),
                Point::new(-118.791432890735, 34.0163883241613),
                Point::new(-118.79596686535, 34.008564864635),
                Point::new(-118.808558110679, 34.0035027131376),
            ]),
            fill,
        ),
    ]
}

// ---------------------------------------------------------------------------
// Outcome application – clear-before-add per scope
// ---------------------------------------------------------------------------

/// Apply a parcel query outcome to the render state. Success replaces the
/// scope with one graphic per record; failure (and emptiness) leaves the
/// scope empty.
pub fn apply_parcel_outcome(render: &mut RenderState, outcome: &ServiceOutcome<Vec<Feature>>) {
    render.clear_scope(GraphicsScope::ParcelResults);
    match outcome {
        ServiceOutcome::Success(features) => {
            if !features.is_empty() {
                render.replace_scope(GraphicsScope::ParcelResults, parcel_graphics(features));
            }
        }
        ServiceOutcome::Failure(failure) => {
            crate::debug_log!("parcel query failed: {}", failure.reason());
        }
    }
}

/// Apply a places outcome: place markers on success, nothing otherwise. The
/// buffer graphic is drawn at click time, not here.
pub fn apply_places_outcome(render: &mut RenderState, outcome: &ServiceOutcome<Vec<PlaceSummary>>) {
    render.clear_scope(GraphicsScope::Places);
    match outcome {
        ServiceOutcome::Success(places) => {
            if !places.is_empty() {
                render.replace_scope(GraphicsScope::Places, place_graphics(places));
            }
        }
        ServiceOutcome::Failure(failure) => {
            crate::debug_log!("places query failed: {}", failure.reason());
        }
    }
}

// ---------------------------------------------------------------------------
// Popup / panel descriptions
// ---------------------------------------------------------------------------

/// Popup for a successful demographic lookup.
pub fn demographic_popup(
    label: &str,
    point: Point,
    profile: &DemographicProfile,
) -> PopupDescription {
    let fmt = |v: Option<i64>| v.map(|n| n.to_string()).unwrap_or_default();
    let body = format!(
        "Population: {}<br>Total Males: {}<br>Total Females: {}<br>Average Household Size: \
         {}<br><i>Retrieved {}</i>",
        fmt(profile.total_population),
        fmt(profile.total_males),
        fmt(profile.total_females),
        profile
            .avg_household_size
            .map(|v| format!("{v}"))
            .unwrap_or_default(),
        crate::utils::format_retrieved_at(crate::utils::now_ms()),
    );
    PopupDescription {
        location: point,
        title: format!("Global facts near {label}"),
        body,
    }
}

/// Popup anchored at a selected place.
pub fn place_popup(place: &PlaceSummary) -> PopupDescription {
    PopupDescription {
        location: place.location,
        title: place.name.clone(),
        body: String::new(),
    }
}

const PLACE_LABEL_MAX_GRAPHEMES: usize = 60;

/// List entries for the results panel: label plus "category - distance".
pub fn place_list(places: &[PlaceSummary]) -> Vec<ListItemDescription> {
    places
        .iter()
        .map(|p| ListItemDescription {
            place_id: p.place_id.clone(),
            label: truncate_label(&p.name, PLACE_LABEL_MAX_GRAPHEMES),
            description: format!(
                "{} - {}",
                p.category_label,
                format_distance_km(p.distance_m)
            ),
        })
        .collect()
}

/// Detail panel for a fetched place; attribute blocks exist only for the
/// attributes the service actually returned.
pub fn place_detail_panel(details: &PlaceDetails) -> DetailPanelDescription {
    let mut blocks = Vec::new();
    let mut push = |heading: &str, icon: &str, value: &Option<String>| {
        if let Some(v) = value {
            if !v.is_empty() {
                blocks.push(AttributeBlock {
                    heading: heading.to_string(),
                    icon: icon.to_string(),
                    value: v.clone(),
                });
            }
        }
    };

    push("Address", "map-pin", &details.street_address);
    push("Phone", "mobile", &details.telephone);
    push("Email", "email-address", &details.email);
    push(
        "Facebook",
        "speech-bubble-social",
        &details
            .facebook
            .as_ref()
            .map(|id| format!("www.facebook.com/{id}")),
    );
    push(
        "X",
        "speech-bubbles",
        &details.twitter.as_ref().map(|id| format!("www.x.com/{id}")),
    );
    push(
        "Instagram",
        "camera",
        &details
            .instagram
            .as_ref()
            .map(|id| format!("www.instagram.com/{id}")),
    );

    DetailPanelDescription {
        place_id: details.place_id.clone(),
        heading: details.name.clone(),
        description: details.category_label.clone(),
        blocks,
    }
}
