//! Property tests for the router/query-builder invariants: a descriptor's
//! kind always matches the mode that issued it, and scope replacement never
//! accumulates graphics.

use proptest::prelude::*;

use crate::geometry::{Geometry, Point};
use crate::messages::Message;
use crate::models::{GraphicsScope, ServiceOutcome};
use crate::query::{kind_for_mode, QueryKind};
use crate::state::{AppState, QueryMode};

fn lon_lat() -> impl Strategy<Value = Point> {
    (-179.0f64..179.0, -80.0f64..80.0).prop_map(|(lon, lat)| Point::new(lon, lat))
}

fn where_clause() -> impl Strategy<Value = String> {
    "[A-Za-z_]{1,12}='[A-Za-z ]{1,16}'".prop_map(|s| s)
}

fn sketch_rect() -> impl Strategy<Value = Geometry> {
    (lon_lat(), 0.001f64..0.5, 0.001f64..0.5).prop_map(|(origin, dx, dy)| {
        Geometry::Polygon(vec![
            origin,
            Point::new(origin.lon + dx, origin.lat),
            Point::new(origin.lon + dx, origin.lat + dy),
            Point::new(origin.lon, origin.lat + dy),
        ])
    })
}

proptest! {
    /// For all descriptors built from an event + mode, the descriptor's
    /// kind matches the issuing mode exactly (no cross-mode leakage).
    #[test]
    fn attribute_descriptors_match_attribute_mode(clause in where_clause()) {
        let descriptor = crate::query::attribute_filter(&clause, None).unwrap();
        prop_assert_eq!(Some(descriptor.kind), kind_for_mode(QueryMode::AttributeFilter));
    }

    #[test]
    fn spatial_descriptors_match_spatial_mode(rect in sketch_rect()) {
        let descriptor = crate::query::spatial_filter(rect);
        prop_assert_eq!(Some(descriptor.kind), kind_for_mode(QueryMode::SpatialFilter));
    }

    #[test]
    fn nearby_descriptors_match_places_mode(point in lon_lat(), category in "[0-9a-f]{8,24}") {
        let descriptor = crate::query::nearby_search(point, &category);
        prop_assert_eq!(Some(descriptor.kind), kind_for_mode(QueryMode::PlacesSearch));
        prop_assert_eq!(descriptor.kind, QueryKind::NearbySearch);
    }

    /// Dispatching any number of clicks in places mode keeps exactly one
    /// buffer disc – replacement, never accumulation.
    #[test]
    fn repeated_clicks_keep_a_single_buffer(points in prop::collection::vec(lon_lat(), 1..8)) {
        let mut state = AppState::new();
        state.dispatch(Message::QueryModeChanged(QueryMode::PlacesSearch));
        for point in points {
            state.dispatch(Message::MapClicked { point });
        }
        prop_assert_eq!(state.render.graphics(GraphicsScope::SearchBuffer).len(), 1);
    }

    /// Generation tokens grow strictly monotonically across any interaction
    /// sequence, and only the newest outcome may render.
    #[test]
    fn only_the_latest_generation_renders(clauses in prop::collection::vec(where_clause(), 2..6)) {
        let mut state = AppState::new();
        state.dispatch(Message::QueryModeChanged(QueryMode::AttributeFilter));

        let mut generations = Vec::new();
        for clause in &clauses {
            state.dispatch(Message::WhereClauseChanged(clause.clone()));
            generations.push(state.generation);
        }
        for w in generations.windows(2) {
            prop_assert!(w[1] > w[0]);
        }

        // Every stale generation is discarded.
        for &generation in &generations[..generations.len() - 1] {
            state.dispatch(Message::ParcelQueryCompleted {
                generation,
                outcome: ServiceOutcome::Success(vec![crate::tests::parcel_feature("x")]),
            });
            prop_assert!(state.render.graphics(GraphicsScope::ParcelResults).is_empty());
        }

        // The current one renders.
        let current = *generations.last().unwrap();
        state.dispatch(Message::ParcelQueryCompleted {
            generation: current,
            outcome: ServiceOutcome::Success(vec![crate::tests::parcel_feature("x")]),
        });
        prop_assert_eq!(state.render.graphics(GraphicsScope::ParcelResults).len(), 1);
    }
}
