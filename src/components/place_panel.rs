//! Place detail flow panel. The flow container holds at most one selected
//! item at a time; the back button closes the popup before removing the
//! panel.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::constants::{CSS_ATTRIBUTE_BLOCK, CSS_FLOW_ITEM_SELECTED, ID_DETAIL_FLOW};
use crate::dom_utils;
use crate::messages::Message;
use crate::models::DetailPanelDescription;
use crate::state::{dispatch_global_message, APP_STATE};

/// Rebuild the flow from the global state. The panel slot holds zero or one
/// descriptions, so the DOM ends up with zero or one flow items.
pub fn refresh(document: &Document) {
    let Some(flow) = document.get_element_by_id(ID_DETAIL_FLOW) else {
        return;
    };

    let panel = APP_STATE.with(|state| state.borrow().panel.clone());

    dom_utils::clear_children(&flow);
    let Some(panel) = panel else {
        return;
    };

    if let Ok(el) = build_flow_item(document, &panel) {
        let _ = flow.append_child(&el);
    }
}

fn build_flow_item(
    document: &Document,
    panel: &DetailPanelDescription,
) -> Result<Element, wasm_bindgen::JsValue> {
    let item = document.create_element("div")?;
    item.set_class_name(CSS_FLOW_ITEM_SELECTED);
    item.set_attribute("data-place-id", &panel.place_id)?;

    let back = document.create_element("button")?;
    back.set_class_name("flow-back");
    back.set_text_content(Some("‹ Back"));
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |_e: web_sys::MouseEvent| {
        dispatch_global_message(Message::PlaceDetailBack);
    }));
    back.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    item.append_child(&back)?;

    let heading = document.create_element("h3")?;
    heading.set_text_content(Some(&panel.heading));
    item.append_child(&heading)?;

    let description = document.create_element("p")?;
    description.set_class_name("flow-description");
    description.set_text_content(Some(&panel.description));
    item.append_child(&description)?;

    for block in &panel.blocks {
        let el = document.create_element("div")?;
        el.set_class_name(CSS_ATTRIBUTE_BLOCK);

        let icon = document.create_element("span")?;
        icon.set_class_name(&format!("block-icon icon-{}", block.icon));
        el.append_child(&icon)?;

        let head = document.create_element("b")?;
        head.set_text_content(Some(&block.heading));
        el.append_child(&head)?;

        let value = document.create_element("span")?;
        value.set_class_name("block-value");
        value.set_text_content(Some(&block.value));
        el.append_child(&value)?;

        item.append_child(&el)?;
    }

    Ok(item)
}
