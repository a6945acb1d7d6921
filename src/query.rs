//! Query builder: turns an interaction event plus the current selection
//! state into an immutable [`QueryDescriptor`].
//!
//! Pure construction only. Geometry is passed through uninterpreted – a
//! self-intersecting sketch is the service's problem, not ours.

use crate::constants::{PARCEL_OUT_FIELDS, PLACE_SEARCH_RADIUS_M};
use crate::geometry::{Geometry, Point};
use crate::state::QueryMode;

/// What a descriptor asks the services to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    AttributeFilter,
    SpatialFilter,
    DefinitionExpression,
    NearbySearch,
    ReverseGeocode,
}

/// One outbound query, built fresh per interaction and immutable once
/// issued.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescriptor {
    pub kind: QueryKind,
    pub geometry: Option<Geometry>,
    pub where_clause: Option<String>,
    pub out_fields: Vec<String>,
    pub category: Option<String>,
    pub radius_m: Option<f64>,
}

impl QueryDescriptor {
    fn new(kind: QueryKind) -> Self {
        Self {
            kind,
            geometry: None,
            where_clause: None,
            out_fields: Vec::new(),
            category: None,
            radius_m: None,
        }
    }
}

fn parcel_out_fields() -> Vec<String> {
    PARCEL_OUT_FIELDS.iter().map(|s| s.to_string()).collect()
}

/// Attribute (SQL) filter over the parcel layer. The clause must be
/// non-empty; the optional geometry restricts the query to the current
/// extent.
pub fn attribute_filter(where_clause: &str, extent: Option<Geometry>) -> Option<QueryDescriptor> {
    if where_clause.trim().is_empty() {
        return None;
    }
    let mut q = QueryDescriptor::new(QueryKind::AttributeFilter);
    q.where_clause = Some(where_clause.to_string());
    q.geometry = extent;
    q.out_fields = parcel_out_fields();
    Some(q)
}

/// Spatial intersect filter with a sketched geometry.
pub fn spatial_filter(geometry: Geometry) -> QueryDescriptor {
    let mut q = QueryDescriptor::new(QueryKind::SpatialFilter);
    q.geometry = Some(geometry);
    q.out_fields = parcel_out_fields();
    q
}

/// Server-side persistent filter for a registered layer.
pub fn definition_expression(expression: &str) -> QueryDescriptor {
    let mut q = QueryDescriptor::new(QueryKind::DefinitionExpression);
    q.where_clause = Some(expression.to_string());
    q
}

/// Places near-point search for the active category.
pub fn nearby_search(point: Point, category: &str) -> QueryDescriptor {
    let mut q = QueryDescriptor::new(QueryKind::NearbySearch);
    q.geometry = Some(Geometry::Point(point));
    q.category = Some(category.to_string());
    q.radius_m = Some(PLACE_SEARCH_RADIUS_M);
    q
}

/// Point → address lookup.
pub fn reverse_geocode(point: Point) -> QueryDescriptor {
    let mut q = QueryDescriptor::new(QueryKind::ReverseGeocode);
    q.geometry = Some(Geometry::Point(point));
    q
}

/// The descriptor kind each router mode is allowed to issue. Used to assert
/// that no pipeline leaks a query into a foreign mode.
pub fn kind_for_mode(mode: QueryMode) -> Option<QueryKind> {
    match mode {
        QueryMode::Idle => Some(QueryKind::ReverseGeocode),
        QueryMode::AttributeFilter => Some(QueryKind::AttributeFilter),
        QueryMode::SpatialFilter => Some(QueryKind::SpatialFilter),
        QueryMode::DefinitionExpression => Some(QueryKind::DefinitionExpression),
        QueryMode::PlacesSearch => Some(QueryKind::NearbySearch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_filter_rejects_empty_clause() {
        assert!(attribute_filter("", None).is_none());
        assert!(attribute_filter("   ", None).is_none());
        let q = attribute_filter("UseType='Residential'", None).unwrap();
        assert_eq!(q.kind, QueryKind::AttributeFilter);
        assert_eq!(q.where_clause.as_deref(), Some("UseType='Residential'"));
        assert_eq!(q.out_fields.len(), 4);
    }

    #[test]
    fn spatial_filter_carries_geometry_untouched() {
        // A degenerate (self-intersecting) ring passes through unvalidated.
        let ring = Geometry::Polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ]);
        let q = spatial_filter(ring.clone());
        assert_eq!(q.kind, QueryKind::SpatialFilter);
        assert_eq!(q.geometry, Some(ring));
        assert!(q.where_clause.is_none());
    }

    #[test]
    fn nearby_search_sets_category_and_radius() {
        let q = nearby_search(Point::new(-118.46, 33.98), "4d4b7105d754a06377d81259");
        assert_eq!(q.kind, QueryKind::NearbySearch);
        assert_eq!(q.radius_m, Some(PLACE_SEARCH_RADIUS_M));
        assert_eq!(q.category.as_deref(), Some("4d4b7105d754a06377d81259"));
    }
}
