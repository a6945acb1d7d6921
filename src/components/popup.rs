//! Map popup overlay anchored at a projected map point.

use web_sys::{Document, Element};

use crate::constants::ID_POPUP_ROOT;
use crate::dom_utils;
use crate::state::APP_STATE;

/// Sync the popup overlay with the global state: position it at the
/// projected anchor, or hide it when no popup is open.
pub fn refresh(document: &Document) {
    let root = match ensure_root(document) {
        Ok(el) => el,
        Err(_) => return,
    };

    let popup = APP_STATE.with(|state| {
        let state = state.borrow();
        state
            .popup
            .as_ref()
            .map(|p| (p.clone(), state.viewport.project(p.location)))
    });

    let Some((popup, (x, y))) = popup else {
        dom_utils::hide(&root);
        return;
    };

    dom_utils::clear_children(&root);

    if let Ok(title) = document.create_element("div") {
        title.set_class_name("popup-title");
        title.set_text_content(Some(&popup.title));
        let _ = root.append_child(&title);
    }

    if !popup.body.is_empty() {
        if let Ok(body) = document.create_element("div") {
            body.set_class_name("popup-body");
            // Body strings come from our own templates, not raw service text.
            body.set_inner_html(&popup.body);
            let _ = root.append_child(&body);
        }
    }

    let _ = root.set_attribute(
        "style",
        &format!("left:{}px;top:{}px;", x.round(), y.round()),
    );
    dom_utils::show(&root);
}

fn ensure_root(document: &Document) -> Result<Element, wasm_bindgen::JsValue> {
    if let Some(el) = document.get_element_by_id(ID_POPUP_ROOT) {
        return Ok(el);
    }
    let el = document.create_element("div")?;
    el.set_id(ID_POPUP_ROOT);
    el.set_class_name("map-popup hidden");
    document
        .body()
        .ok_or_else(|| wasm_bindgen::JsValue::from_str("no body"))?
        .append_child(&el)?;
    Ok(el)
}
