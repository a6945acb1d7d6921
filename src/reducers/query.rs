//! Parcel-query reducer: attribute (SQL) filters, sketch-driven spatial
//! filters and the server-side definition expression.

use crate::messages::{Command, Message, SketchPhase};
use crate::models::GraphicsScope;
use crate::query;
use crate::render;
use crate::state::{AppState, QueryMode};
use crate::update::refresh_ui;

/// Returns `true` when the message was handled by the query reducer.
pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::WhereClauseChanged(clause) => {
            state.where_clause = clause.clone();
            match state.query_mode {
                QueryMode::AttributeFilter => {
                    issue_attribute_query(state, cmds);
                }
                QueryMode::DefinitionExpression => {
                    // Server-side persistent filter; no round trip of our own.
                    crate::reducers::layers::set_parcel_definition_expression(state, clause);
                    cmds.push(refresh_ui());
                }
                // The clause is kept for when one of the filter modes becomes
                // active; nothing to issue from the other modes.
                _ => {}
            }
            true
        }

        Message::SketchUpdated { phase, geometry } => {
            if state.query_mode != QueryMode::SpatialFilter {
                // Sketches outside spatial mode have no pipeline to feed.
                return true;
            }
            match phase {
                SketchPhase::Start => {
                    // Provisional echo of the sketch plus a best-effort
                    // preview query.
                    let preview =
                        render::sketch_preview_graphic(geometry.clone(), provisional_sketch_id());
                    state
                        .render
                        .replace_scope(GraphicsScope::SketchPreview, vec![preview]);
                    issue_spatial_query(state, cmds, geometry.clone());
                }
                SketchPhase::MoveStop | SketchPhase::ScaleStop | SketchPhase::ReshapeStop => {
                    // Authoritative re-query with the settled geometry.
                    let preview =
                        render::sketch_preview_graphic(geometry.clone(), provisional_sketch_id());
                    state
                        .render
                        .replace_scope(GraphicsScope::SketchPreview, vec![preview]);
                    issue_spatial_query(state, cmds, geometry.clone());
                }
                SketchPhase::Complete => {
                    // The sketch tool is done – discard the provisional
                    // graphic, keep the query results.
                    state.render.clear_scope(GraphicsScope::SketchPreview);
                    cmds.push(refresh_ui());
                }
            }
            true
        }

        Message::ParcelQueryCompleted {
            generation,
            outcome,
        } => {
            if !state.is_current_generation(*generation) {
                crate::debug_log!("discarding stale parcel outcome (gen {})", generation);
                return true;
            }
            // A fresh result set replaces the popup along with the graphics.
            state.popup = None;
            render::apply_parcel_outcome(&mut state.render, outcome);
            cmds.push(refresh_ui());
            true
        }

        _ => false,
    }
}

fn issue_attribute_query(state: &mut AppState, cmds: &mut Vec<Command>) {
    // SQL queries are bounded to the visible extent, like the map widget's.
    let extent = Some(state.viewport.extent());
    let Some(descriptor) = query::attribute_filter(&state.where_clause, extent) else {
        return;
    };
    state.close_panel();
    let generation = state.next_generation();
    cmds.push(Command::QueryParcels {
        generation,
        descriptor,
    });
    cmds.push(refresh_ui());
}

fn issue_spatial_query(
    state: &mut AppState,
    cmds: &mut Vec<Command>,
    geometry: crate::geometry::Geometry,
) {
    state.close_panel();
    let generation = state.next_generation();
    cmds.push(Command::QueryParcels {
        generation,
        descriptor: query::spatial_filter(geometry),
    });
    cmds.push(refresh_ui());
}

/// Client-side id for the provisional sketch graphic.
fn provisional_sketch_id() -> String {
    format!("sketch-{}", u32::MAX - rand::random::<u32>() % 1000)
}
