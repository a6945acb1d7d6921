//! Result-renderer tests: clear-before-add idempotence, failure handling
//! and the no-render empty-result conditions.

use super::{parcel_feature, place};
use crate::geometry::Point;
use crate::messages::Message;
use crate::models::{
    GraphicsScope, ServiceFailure, ServiceOutcome, Symbol,
};
use crate::render;
use crate::state::{AppState, QueryMode, RenderState};

/// Visual fingerprint of a scope, ignoring client-generated graphic ids.
fn fingerprint(state: &RenderState, scope: GraphicsScope) -> Vec<(String, String)> {
    state
        .graphics(scope)
        .iter()
        .map(|g| (format!("{:?}", g.geometry), format!("{:?}", g.symbol)))
        .collect()
}

#[test]
fn rendering_same_success_twice_equals_rendering_once() {
    let mut render_state = RenderState::default();
    let outcome = ServiceOutcome::Success(vec![parcel_feature("1"), parcel_feature("2")]);

    render::apply_parcel_outcome(&mut render_state, &outcome);
    let once = fingerprint(&render_state, GraphicsScope::ParcelResults);

    render::apply_parcel_outcome(&mut render_state, &outcome);
    let twice = fingerprint(&render_state, GraphicsScope::ParcelResults);

    assert_eq!(once.len(), 2);
    assert_eq!(once, twice);
}

#[test]
fn failure_empties_scope_and_leaves_panel_untouched() {
    let mut state = AppState::new();
    state.query_mode = QueryMode::AttributeFilter;

    // Populate the scope, then open an unrelated panel.
    render::apply_parcel_outcome(
        &mut state.render,
        &ServiceOutcome::Success(vec![parcel_feature("1")]),
    );
    state.open_panel(render::place_detail_panel(&super::place_details("p1")));
    assert_eq!(state.render.graphics(GraphicsScope::ParcelResults).len(), 1);

    let generation = state.next_generation();
    state.dispatch(Message::ParcelQueryCompleted {
        generation,
        outcome: ServiceOutcome::Failure(ServiceFailure::Network("connection reset".into())),
    });

    assert!(state.render.graphics(GraphicsScope::ParcelResults).is_empty());
    assert!(state.panel.is_some());
}

#[test]
fn empty_places_success_renders_nothing_and_is_not_an_error() {
    let mut state = AppState::new();
    state.dispatch(Message::QueryModeChanged(QueryMode::PlacesSearch));
    state.dispatch(Message::MapClicked {
        point: Point::new(-118.46, 33.98),
    });
    let generation = state.generation;

    state.dispatch(Message::PlacesQueryCompleted {
        generation,
        outcome: ServiceOutcome::Success(Vec::new()),
    });

    assert!(state.render.graphics(GraphicsScope::Places).is_empty());
    assert!(state.places.is_empty());
    assert!(state.panel.is_none());
    // The buffer stays: the search area itself is valid, just empty.
    assert_eq!(state.render.graphics(GraphicsScope::SearchBuffer).len(), 1);
}

#[test]
fn demographics_empty_feature_set_draws_no_popup_and_no_buffer() {
    let mut state = AppState::new();
    state.dispatch(Message::MapClicked {
        point: Point::new(-30.0, 0.0),
    });
    let generation = state.generation;

    state.dispatch(Message::DemographicsCompleted {
        generation,
        label: "Atlantis".into(),
        point: Point::new(-30.0, 0.0),
        outcome: ServiceOutcome::Success(None),
    });

    assert!(state.popup.is_none());
    assert!(state.render.graphics(GraphicsScope::SearchBuffer).is_empty());
}

#[test]
fn demographics_success_opens_popup_and_draws_one_buffer() {
    let mut state = AppState::new();
    state.dispatch(Message::MapClicked {
        point: Point::new(9.19, 45.46),
    });
    let generation = state.generation;

    let profile = crate::models::DemographicProfile {
        total_population: Some(1_352_000),
        total_males: Some(650_000),
        total_females: Some(702_000),
        avg_household_size: Some(2.1),
    };
    state.dispatch(Message::DemographicsCompleted {
        generation,
        label: "Milan".into(),
        point: Point::new(9.19, 45.46),
        outcome: ServiceOutcome::Success(Some(profile)),
    });

    let popup = state.popup.as_ref().expect("popup open");
    assert_eq!(popup.title, "Global facts near Milan");
    assert!(popup.body.contains("Population: 1352000"));

    let buffer = state.render.graphics(GraphicsScope::SearchBuffer);
    assert_eq!(buffer.len(), 1);
    assert!(matches!(buffer[0].symbol, Symbol::SimpleFill { .. }));

    // Re-applying the identical outcome leaves one buffer, not two.
    state.dispatch(Message::DemographicsCompleted {
        generation,
        label: "Milan".into(),
        point: Point::new(9.19, 45.46),
        outcome: ServiceOutcome::Success(Some(crate::models::DemographicProfile {
            total_population: Some(1_352_000),
            total_males: Some(650_000),
            total_females: Some(702_000),
            avg_household_size: Some(2.1),
        })),
    });
    assert_eq!(state.render.graphics(GraphicsScope::SearchBuffer).len(), 1);
}

#[test]
fn place_list_descriptions_carry_category_and_distance() {
    let items = render::place_list(&[place("a", "Venice Pier")]);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].label, "Venice Pier");
    assert_eq!(items[0].description, "Landmark - 0.1 km");
}

#[test]
fn detail_panel_skips_absent_attributes() {
    let panel = render::place_detail_panel(&super::place_details("p1"));
    let headings: Vec<&str> = panel.blocks.iter().map(|b| b.heading.as_str()).collect();
    // No phone, facebook or instagram in the fixture.
    assert_eq!(headings, vec!["Address", "Email", "X"]);
    assert_eq!(panel.blocks[2].value, "www.x.com/venicepier");
}
