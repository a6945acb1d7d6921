//! Interaction-router tests: events reach the pipeline of the current mode
//! and no other, and mode transitions happen only through the selector.

use super::parcel_feature;
use crate::geometry::{Geometry, Point};
use crate::messages::{Command, Message, SketchPhase};
use crate::models::{GraphicsScope, ServiceOutcome};
use crate::query::QueryKind;
use crate::state::{AppState, QueryMode};

fn set_mode(state: &mut AppState, mode: QueryMode) {
    state.dispatch(Message::QueryModeChanged(mode));
    assert_eq!(state.query_mode, mode);
}

fn query_commands(commands: &[Command]) -> Vec<&Command> {
    commands
        .iter()
        .filter(|c| {
            matches!(
                c,
                Command::QueryParcels { .. }
                    | Command::QueryPlaces { .. }
                    | Command::ReverseGeocode { .. }
                    | Command::QueryDemographics { .. }
            )
        })
        .collect()
}

#[test]
fn attribute_mode_issues_attribute_descriptors_only() {
    let mut state = AppState::new();
    set_mode(&mut state, QueryMode::AttributeFilter);

    let commands = state.dispatch(Message::WhereClauseChanged("UseType='Residential'".into()));
    let issued = query_commands(&commands);
    assert_eq!(issued.len(), 1);
    match issued[0] {
        Command::QueryParcels { descriptor, .. } => {
            assert_eq!(descriptor.kind, QueryKind::AttributeFilter);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn empty_where_clause_issues_nothing() {
    let mut state = AppState::new();
    set_mode(&mut state, QueryMode::AttributeFilter);
    let commands = state.dispatch(Message::WhereClauseChanged("".into()));
    assert!(query_commands(&commands).is_empty());
}

#[test]
fn places_mode_routes_clicks_to_places_pipeline() {
    let mut state = AppState::new();
    set_mode(&mut state, QueryMode::PlacesSearch);

    let commands = state.dispatch(Message::MapClicked {
        point: Point::new(-118.46, 33.98),
    });
    let issued = query_commands(&commands);
    assert_eq!(issued.len(), 1);
    match issued[0] {
        Command::QueryPlaces { descriptor, .. } => {
            assert_eq!(descriptor.kind, QueryKind::NearbySearch);
        }
        other => panic!("unexpected command: {other:?}"),
    }
    // Click location is remembered so category changes can re-query it.
    assert!(state.click_point.is_some());
    // The buffer disc is drawn immediately.
    assert_eq!(state.render.graphics(GraphicsScope::SearchBuffer).len(), 1);
}

#[test]
fn idle_mode_routes_clicks_to_demographics_pipeline() {
    let mut state = AppState::new();
    let commands = state.dispatch(Message::MapClicked {
        point: Point::new(9.19, 45.46),
    });
    let issued = query_commands(&commands);
    assert_eq!(issued.len(), 1);
    assert!(matches!(issued[0], Command::ReverseGeocode { .. }));
}

#[test]
fn clicks_in_filter_modes_are_noops() {
    let mut state = AppState::new();
    set_mode(&mut state, QueryMode::AttributeFilter);
    let commands = state.dispatch(Message::MapClicked {
        point: Point::new(0.0, 0.0),
    });
    assert!(query_commands(&commands).is_empty());

    set_mode(&mut state, QueryMode::DefinitionExpression);
    let commands = state.dispatch(Message::MapClicked {
        point: Point::new(0.0, 0.0),
    });
    assert!(query_commands(&commands).is_empty());
}

#[test]
fn sketch_outside_spatial_mode_is_ignored() {
    let mut state = AppState::new();
    set_mode(&mut state, QueryMode::AttributeFilter);
    let commands = state.dispatch(Message::SketchUpdated {
        phase: SketchPhase::MoveStop,
        geometry: rect(),
    });
    assert!(query_commands(&commands).is_empty());
    assert!(state.render.graphics(GraphicsScope::SketchPreview).is_empty());
}

fn rect() -> Geometry {
    Geometry::Polygon(vec![
        Point::new(-118.3, 34.0),
        Point::new(-118.2, 34.0),
        Point::new(-118.2, 34.1),
        Point::new(-118.3, 34.1),
    ])
}

#[test]
fn sketch_phases_preview_requery_and_discard() {
    let mut state = AppState::new();
    set_mode(&mut state, QueryMode::SpatialFilter);

    // Start: provisional graphic plus a best-effort preview query.
    let commands = state.dispatch(Message::SketchUpdated {
        phase: SketchPhase::Start,
        geometry: rect(),
    });
    assert_eq!(state.render.graphics(GraphicsScope::SketchPreview).len(), 1);
    assert_eq!(query_commands(&commands).len(), 1);

    // Move-stop: authoritative re-query, preview still visible.
    let commands = state.dispatch(Message::SketchUpdated {
        phase: SketchPhase::MoveStop,
        geometry: rect(),
    });
    let issued = query_commands(&commands);
    assert_eq!(issued.len(), 1);
    match issued[0] {
        Command::QueryParcels { descriptor, .. } => {
            assert_eq!(descriptor.kind, QueryKind::SpatialFilter);
        }
        other => panic!("unexpected command: {other:?}"),
    }

    // Complete: the provisional sketch graphic is discarded.
    let commands = state.dispatch(Message::SketchUpdated {
        phase: SketchPhase::Complete,
        geometry: rect(),
    });
    assert!(state.render.graphics(GraphicsScope::SketchPreview).is_empty());
    assert!(query_commands(&commands).is_empty());
}

#[test]
fn definition_expression_updates_layer_registry_without_round_trip() {
    let mut state = AppState::new();
    set_mode(&mut state, QueryMode::DefinitionExpression);

    // Entering the mode registers the hidden filtered layer.
    let layer = state
        .layers
        .iter()
        .find(|l| l.id == crate::reducers::layers::FILTERED_PARCEL_LAYER_ID)
        .expect("filtered layer registered");
    assert_eq!(layer.definition_expression.as_deref(), Some("1=0"));

    let commands = state.dispatch(Message::WhereClauseChanged("UseType='Government'".into()));
    assert!(query_commands(&commands).is_empty());

    let layer = state
        .layers
        .iter()
        .find(|l| l.id == crate::reducers::layers::FILTERED_PARCEL_LAYER_ID)
        .unwrap();
    assert_eq!(
        layer.definition_expression.as_deref(),
        Some("UseType='Government'")
    );
}

#[test]
fn attribute_filter_scenario_three_records_three_graphics_no_panels() {
    let mut state = AppState::new();
    set_mode(&mut state, QueryMode::AttributeFilter);
    state.dispatch(Message::WhereClauseChanged("UseType='Residential'".into()));
    let generation = state.generation;

    let features = vec![
        parcel_feature("001"),
        parcel_feature("002"),
        parcel_feature("003"),
    ];
    state.dispatch(Message::ParcelQueryCompleted {
        generation,
        outcome: ServiceOutcome::Success(features),
    });

    let graphics = state.render.graphics(GraphicsScope::ParcelResults);
    assert_eq!(graphics.len(), 3);
    let shared = crate::render::parcel_symbol();
    for g in graphics {
        assert_eq!(g.symbol, shared);
    }
    assert!(state.panel.is_none());
}

#[test]
fn view_ready_registers_layers_demo_graphics_and_initial_lookup() {
    let mut state = AppState::new();
    let commands = state.dispatch(Message::ViewReady);

    assert!(state.view_ready);
    assert_eq!(state.render.graphics(GraphicsScope::StaticDemo).len(), 3);
    assert!(state.layers.iter().any(|l| l.id == "trailheads"));
    assert!(state.layers.iter().any(|l| l.id == "points"));

    let issued = query_commands(&commands);
    assert_eq!(issued.len(), 1);
    match issued[0] {
        Command::QueryDemographics { label, .. } => assert_eq!(label, "Milan"),
        other => panic!("unexpected command: {other:?}"),
    }
}
