// src/update.rs
//
// Root reducer. Delegates to the domain reducers first; a message they
// consume is done. Router-level transitions (mode changes, view readiness)
// are handled here.

use crate::constants::{DEFAULT_STUDY_CITY, DEFAULT_STUDY_LAT, DEFAULT_STUDY_LON};
use crate::geometry::Point;
use crate::messages::{Command, Message};
use crate::models::GraphicsScope;
use crate::state::{AppState, QueryMode};

pub fn update(state: &mut AppState, msg: Message) -> Vec<Command> {
    let mut commands = Vec::new();

    // ---------------------------------------------------------------
    // Delegate to domain-specific reducers first. When one of them
    // consumes the message we can bail out early.
    // ---------------------------------------------------------------

    if crate::reducers::query::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::places::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::demographics::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::layers::update(state, &msg, &mut commands) {
        return commands;
    }

    match msg {
        Message::QueryModeChanged(mode) => {
            handle_mode_change(state, &mut commands, mode);
        }
        Message::ViewReady => {
            state.view_ready = true;

            // Startup graphics demo plus the registered feature layers.
            state.render.replace_scope(
                GraphicsScope::StaticDemo,
                crate::render::static_demo_graphics(),
            );
            state.layers = crate::reducers::layers::builtin_layers();

            // One demographic lookup for the default city once the view is
            // usable.
            let generation = state.next_generation();
            commands.push(Command::QueryDemographics {
                generation,
                label: DEFAULT_STUDY_CITY.to_string(),
                point: Point::new(DEFAULT_STUDY_LON, DEFAULT_STUDY_LAT),
            });
            commands.push(refresh_ui());
        }
        // Interaction events that no pipeline claims in the current mode
        // (e.g. a map click while an attribute filter is active) are no-ops.
        _ => {}
    }

    commands
}

/// Explicit mode transition – the only way the router changes modes.
pub fn handle_mode_change(state: &mut AppState, commands: &mut Vec<Command>, mode: QueryMode) {
    if state.query_mode == mode {
        return;
    }

    // A mode switch supersedes whatever the previous mode was showing.
    state.close_panel();
    state.render.clear_scope(GraphicsScope::SketchPreview);
    state.query_mode = mode;

    // Entering the server-side filter mode registers the filtered parcel
    // layer (hidden until an expression is chosen).
    if mode == QueryMode::DefinitionExpression {
        crate::reducers::layers::ensure_filtered_parcel_layer(state);
    }

    commands.push(Command::SaveUiPrefs);
    commands.push(refresh_ui());
}

/// Repaint everything that reads from the global state.
pub fn refresh_ui() -> Command {
    Command::update_ui(|| crate::ui::refresh_all())
}
