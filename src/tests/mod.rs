//! Native unit tests for the dispatch loop, renderer and panel manager.
//!
//! Everything exercised here is pure state logic; the DOM/canvas adapters
//! are covered by the browser suite.

mod contract_validation_test;
mod renderer_idempotence_tests;
mod router_dispatch_tests;

use crate::geometry::{Geometry, Point};
use crate::models::Feature;

/// Parcel-like polygon feature with the given APN attribute.
pub(crate) fn parcel_feature(apn: &str) -> Feature {
    let mut attributes = serde_json::Map::new();
    attributes.insert("APN".into(), serde_json::Value::String(apn.into()));
    attributes.insert(
        "UseType".into(),
        serde_json::Value::String("Residential".into()),
    );
    Feature {
        geometry: Geometry::Polygon(vec![
            Point::new(-118.3, 34.0),
            Point::new(-118.29, 34.0),
            Point::new(-118.29, 34.01),
            Point::new(-118.3, 34.01),
        ]),
        attributes,
    }
}

/// Place summary fixture.
pub(crate) fn place(id: &str, name: &str) -> crate::models::PlaceSummary {
    crate::models::PlaceSummary {
        place_id: id.to_string(),
        name: name.to_string(),
        distance_m: 120.0,
        category_label: "Landmark".to_string(),
        location: Point::new(-118.47, 33.98),
        icon_url: None,
    }
}

/// Place details fixture.
pub(crate) fn place_details(id: &str) -> crate::models::PlaceDetails {
    crate::models::PlaceDetails {
        place_id: id.to_string(),
        name: "Venice Pier".to_string(),
        category_label: "Landmark".to_string(),
        street_address: Some("1 Pier Ave".to_string()),
        telephone: None,
        email: Some("info@example.com".to_string()),
        facebook: None,
        twitter: Some("venicepier".to_string()),
        instagram: None,
    }
}
