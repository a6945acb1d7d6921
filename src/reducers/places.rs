//! Places-search reducer: near-point search around a clicked location, the
//! results list, and the place detail flow.

use crate::messages::{Command, Message};
use crate::models::{GraphicsScope, ServiceOutcome};
use crate::query;
use crate::render;
use crate::state::{AppState, QueryMode};
use crate::update::refresh_ui;

/// Returns `true` when the message was handled by the places reducer.
pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::MapClicked { point } if state.query_mode == QueryMode::PlacesSearch => {
            // A new click supersedes everything from the previous search.
            state.clear_place_results();
            state.click_point = Some(*point);
            issue_places_query(state, cmds);
            true
        }

        Message::CategoryChanged(category) => {
            state.active_category = category.clone();
            state.clear_place_results();
            // Re-run the search at the saved click location, if any.
            if state.click_point.is_some() {
                issue_places_query(state, cmds);
            }
            cmds.push(Command::SaveUiPrefs);
            cmds.push(refresh_ui());
            true
        }

        Message::PlacesQueryCompleted {
            generation,
            outcome,
        } => {
            if !state.is_current_generation(*generation) {
                crate::debug_log!("discarding stale places outcome (gen {})", generation);
                return true;
            }
            render::apply_places_outcome(&mut state.render, outcome);
            state.places = match outcome {
                ServiceOutcome::Success(places) => places.clone(),
                ServiceOutcome::Failure(_) => Vec::new(),
            };
            cmds.push(refresh_ui());
            true
        }

        Message::PlaceSelected { place_id } => {
            let Some(place) = state.places.iter().find(|p| &p.place_id == place_id) else {
                return true;
            };
            // Popup opens immediately; the detail panel follows once the
            // fetch resolves.
            state.popup = Some(render::place_popup(place));
            state.viewport.center = place.location;
            state.pending_detail = Some(place.place_id.clone());
            cmds.push(Command::FetchPlaceDetails {
                place_id: place.place_id.clone(),
                location: place.location,
            });
            cmds.push(refresh_ui());
            true
        }

        Message::PlaceDetailsCompleted {
            place_id,
            outcome,
            ..
        } => {
            if state.pending_detail.as_deref() != Some(place_id.as_str()) {
                crate::debug_log!("dropping superseded detail fetch for {}", place_id);
                return true;
            }
            state.pending_detail = None;
            match outcome {
                ServiceOutcome::Success(details) => {
                    state.open_panel(render::place_detail_panel(details));
                }
                ServiceOutcome::Failure(failure) => {
                    crate::debug_log!("place detail fetch failed: {}", failure.reason());
                }
            }
            cmds.push(refresh_ui());
            true
        }

        Message::PlaceDetailBack => {
            // Back navigation: popup closes before the panel is removed.
            state.close_panel();
            cmds.push(refresh_ui());
            true
        }

        _ => false,
    }
}

fn issue_places_query(state: &mut AppState, cmds: &mut Vec<Command>) {
    let Some(point) = state.click_point else {
        return;
    };
    // The buffer disc is drawn at click time; the markers arrive with the
    // outcome.
    state.render.replace_scope(
        GraphicsScope::SearchBuffer,
        vec![render::search_buffer_graphic(point)],
    );
    let generation = state.next_generation();
    cmds.push(Command::QueryPlaces {
        generation,
        descriptor: query::nearby_search(point, &state.active_category),
    });
    cmds.push(refresh_ui());
}
