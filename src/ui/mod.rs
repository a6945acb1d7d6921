pub mod events;
pub mod setup;

/// Repaint everything that reads from the global state: the map canvas, the
/// results list, the detail flow and the popup overlay.
pub fn refresh_all() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    crate::canvas::refresh();
    crate::components::results_panel::refresh(&document);
    crate::components::place_panel::refresh(&document);
    crate::components::popup::refresh(&document);
}
