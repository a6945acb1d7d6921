//! Results list panel: one entry per place result, clicking an entry
//! selects the place (popup + detail fetch).

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::constants::{CSS_EMPTY_STATE, CSS_LIST_ITEM, ID_RESULTS_PANEL};
use crate::dom_utils;
use crate::messages::Message;
use crate::models::ListItemDescription;
use crate::state::{dispatch_global_message, APP_STATE};

/// Rebuild the list from the global state.
pub fn refresh(document: &Document) {
    let Some(panel) = document.get_element_by_id(ID_RESULTS_PANEL) else {
        return;
    };

    let items = APP_STATE.with(|state| {
        let state = state.borrow();
        crate::render::place_list(&state.places)
    });

    dom_utils::clear_children(&panel);
    if items.is_empty() {
        return;
    }

    for item in items {
        if let Ok(el) = build_item(document, &item) {
            let _ = panel.append_child(&el);
        }
    }
}

fn build_item(
    document: &Document,
    item: &ListItemDescription,
) -> Result<Element, wasm_bindgen::JsValue> {
    let el = document.create_element("div")?;
    el.set_class_name(CSS_LIST_ITEM);
    el.set_attribute("data-place-id", &item.place_id)?;

    let label = document.create_element("div")?;
    label.set_class_name("result-label");
    label.set_text_content(Some(&item.label));
    el.append_child(&label)?;

    let description = document.create_element("div")?;
    description.set_class_name("result-description");
    description.set_text_content(Some(&item.description));
    el.append_child(&description)?;

    let place_id = item.place_id.clone();
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |_e: web_sys::MouseEvent| {
        dispatch_global_message(Message::PlaceSelected {
            place_id: place_id.clone(),
        });
    }));
    el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();

    Ok(el)
}

/// Placeholder shown when a search returned nothing. Kept separate from
/// `refresh` so an empty result set stays an empty panel (no error styling).
#[allow(dead_code)]
pub fn show_empty_hint(document: &Document) {
    if let Some(panel) = document.get_element_by_id(ID_RESULTS_PANEL) {
        dom_utils::clear_children(&panel);
        if let Ok(el) = document.create_element("div") {
            el.set_class_name(CSS_EMPTY_STATE);
            el.set_text_content(Some("No places in this category nearby."));
            let _ = panel.append_child(&el);
        }
    }
}
