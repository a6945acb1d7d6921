//! Demographics reducer: map click → reverse geocode → study-area
//! enrichment → popup + 1-mile buffer. A search result skips the geocode
//! leg since it already carries a name.

use crate::messages::{Command, Message};
use crate::models::{GraphicsScope, ServiceOutcome};
use crate::render;
use crate::state::{AppState, QueryMode};
use crate::update::refresh_ui;

/// Returns `true` when the message was handled by the demographics reducer.
pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::MapClicked { point } if state.query_mode == QueryMode::Idle => {
            state.close_panel();
            let generation = state.next_generation();
            cmds.push(Command::ReverseGeocode {
                generation,
                point: *point,
            });
            true
        }

        Message::SearchResultSelected { label, point } => {
            state.close_panel();
            let generation = state.next_generation();
            cmds.push(Command::QueryDemographics {
                generation,
                label: label.clone(),
                point: *point,
            });
            true
        }

        Message::ReverseGeocodeCompleted {
            generation,
            point,
            outcome,
        } => {
            if !state.is_current_generation(*generation) {
                crate::debug_log!("discarding stale geocode outcome (gen {})", generation);
                return true;
            }
            match outcome {
                ServiceOutcome::Success(address) => {
                    // Second leg of the chain, same generation token.
                    cmds.push(Command::QueryDemographics {
                        generation: *generation,
                        label: address.label.clone(),
                        point: *point,
                    });
                }
                ServiceOutcome::Failure(failure) => {
                    state.render.clear_scope(GraphicsScope::SearchBuffer);
                    crate::debug_log!("reverse geocode failed: {}", failure.reason());
                    cmds.push(refresh_ui());
                }
            }
            true
        }

        Message::DemographicsCompleted {
            generation,
            label,
            point,
            outcome,
        } => {
            if !state.is_current_generation(*generation) {
                crate::debug_log!("discarding stale demographics outcome (gen {})", generation);
                return true;
            }
            match outcome {
                // A study area with data: popup plus the 1-mile buffer.
                ServiceOutcome::Success(Some(profile)) => {
                    state.popup = Some(render::demographic_popup(label, *point, profile));
                    state.render.replace_scope(
                        GraphicsScope::SearchBuffer,
                        vec![render::demographic_buffer_graphic(*point)],
                    );
                    cmds.push(refresh_ui());
                }
                // Empty FeatureSet: a successful lookup outside all known
                // study areas. No popup, no buffer, no error.
                ServiceOutcome::Success(None) => {}
                ServiceOutcome::Failure(failure) => {
                    state.render.clear_scope(GraphicsScope::SearchBuffer);
                    crate::debug_log!("demographic lookup failed: {}", failure.reason());
                    cmds.push(refresh_ui());
                }
            }
            true
        }

        _ => false,
    }
}
