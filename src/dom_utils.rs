//! dom_utils.rs – thin helper layer for repetitive DOM operations.
//!
//! Small ergonomic wrappers for the common show / hide patterns so the
//! components don't sprinkle class-list calls everywhere.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlSelectElement};

/// Remove the `hidden` class so the element becomes visible.
pub fn show(el: &Element) {
    let _ = el.class_list().remove_1("hidden");
    let _ = el.class_list().add_1("visible");
}

/// Hide the element by toggling CSS classes.
pub fn hide(el: &Element) {
    let _ = el.class_list().remove_1("visible");
    let _ = el.class_list().add_1("hidden");
}

/// Remove every child of a container.
pub fn clear_children(el: &Element) {
    el.set_inner_html("");
}

/// Fetch a `<select>` element by id.
///
/// Returns `None` when the element is missing or of a different type; the
/// base skeleton normally guarantees it exists.
pub fn html_select(document: &Document, id: &str) -> Option<HtmlSelectElement> {
    document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlSelectElement>().ok())
}
