//! Builds the base DOM skeleton: map canvas, mode/filter selectors, the
//! results panel and the detail flow container.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::constants::{
    BASEMAP_IDS, DEFAULT_PLACE_CATEGORY, ID_BASEMAP_SELECT, ID_CATEGORY_SELECT, ID_DETAIL_FLOW,
    ID_MAP_CANVAS, ID_QUERY_MODE_SELECT, ID_RESULTS_PANEL, ID_WHERE_SELECT,
};

/// SQL where clauses offered by the attribute / server-side filter modes.
pub const WHERE_CLAUSE_OPTIONS: [(&str, &str); 4] = [
    ("", "Choose a SQL where clause..."),
    ("UseType = 'Residential'", "Residential parcels"),
    ("UseType = 'Government'", "Government parcels"),
    ("Roll_LandValue > 1000000", "Land value above $1M"),
];

/// Places categories offered by the category combobox.
pub const CATEGORY_OPTIONS: [(&str, &str); 4] = [
    (DEFAULT_PLACE_CATEGORY, "Landmarks and Outdoors"),
    ("4d4b7104d754a06370d81259", "Arts and Entertainment"),
    ("4d4b7105d754a06374d81259", "Dining and Drinking"),
    ("4d4b7105d754a06378d81259", "Retail"),
];

const QUERY_MODE_OPTIONS: [(&str, &str); 5] = [
    ("idle", "Explore (demographics)"),
    ("sql", "Attribute filter"),
    ("spatial", "Spatial filter (sketch)"),
    ("filter", "Server-side filter"),
    ("places", "Places search"),
];

/// Create the application skeleton once. Idempotent: nothing happens when
/// the skeleton already exists.
pub fn build_base_ui(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id(ID_MAP_CANVAS).is_some() {
        return Ok(());
    }
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    // Toolbar --------------------------------------------------------------
    let toolbar = document.create_element("div")?;
    toolbar.set_class_name("toolbar");

    toolbar.append_child(&build_select(
        document,
        ID_QUERY_MODE_SELECT,
        &QUERY_MODE_OPTIONS,
    )?.into())?;
    toolbar.append_child(&build_select(
        document,
        ID_WHERE_SELECT,
        &WHERE_CLAUSE_OPTIONS,
    )?.into())?;
    toolbar.append_child(&build_select(
        document,
        ID_CATEGORY_SELECT,
        &CATEGORY_OPTIONS,
    )?.into())?;

    let basemap_options: Vec<(&str, &str)> = BASEMAP_IDS.iter().map(|id| (*id, *id)).collect();
    toolbar.append_child(&build_select(
        document,
        ID_BASEMAP_SELECT,
        &basemap_options,
    )?.into())?;
    body.append_child(&toolbar)?;

    // Map canvas -----------------------------------------------------------
    let canvas = document.create_element("canvas")?;
    canvas.set_id(ID_MAP_CANVAS);
    canvas.set_attribute("width", "800")?;
    canvas.set_attribute("height", "600")?;
    body.append_child(&canvas)?;

    // Side panels ----------------------------------------------------------
    let aside = document.create_element("aside")?;
    aside.set_class_name("side-panel");

    let results = document.create_element("div")?;
    results.set_id(ID_RESULTS_PANEL);
    aside.append_child(&results)?;

    let flow = document.create_element("div")?;
    flow.set_id(ID_DETAIL_FLOW);
    aside.append_child(&flow)?;

    body.append_child(&aside)?;
    Ok(())
}

fn build_select(
    document: &Document,
    id: &str,
    options: &[(&str, &str)],
) -> Result<Element, JsValue> {
    let select = document.create_element("select")?;
    select.set_id(id);
    for (value, label) in options {
        let option = document.create_element("option")?;
        option.set_attribute("value", value)?;
        option.set_text_content(Some(label));
        select.append_child(&option)?;
    }
    Ok(select)
}
