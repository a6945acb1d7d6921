//! Listener wiring: every DOM/map event becomes a message dispatched into
//! the router. Callbacks are pure event-to-action mappings; no query logic
//! lives here.

use std::cell::RefCell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlCanvasElement, HtmlSelectElement, MouseEvent};

use crate::constants::{
    ID_BASEMAP_SELECT, ID_CATEGORY_SELECT, ID_MAP_CANVAS, ID_QUERY_MODE_SELECT, ID_WHERE_SELECT,
};
use crate::geometry::{Geometry, Point};
use crate::messages::{Message, SketchPhase};
use crate::state::{dispatch_global_message, QueryMode, APP_STATE};

// In-progress sketch drag: anchor pixel and whether the pointer moved far
// enough to count as a sketch rather than a click.
thread_local! {
    static SKETCH_DRAG: RefCell<Option<(f64, f64, bool)>> = RefCell::new(None);
}

const DRAG_THRESHOLD_PX: f64 = 4.0;

/// Entry point – call once after the base UI was rendered. Attaches all
/// widget event handlers.
pub fn setup_ui_event_handlers(document: &Document) -> Result<(), JsValue> {
    setup_canvas_handlers(document)?;
    setup_select_handler(document, ID_QUERY_MODE_SELECT, |value| {
        Message::QueryModeChanged(QueryMode::from_str(&value))
    })?;
    setup_select_handler(document, ID_WHERE_SELECT, Message::WhereClauseChanged)?;
    setup_select_handler(document, ID_CATEGORY_SELECT, Message::CategoryChanged)?;
    setup_select_handler(document, ID_BASEMAP_SELECT, Message::BasemapChanged)?;
    Ok(())
}

fn setup_select_handler(
    document: &Document,
    id: &str,
    to_message: impl Fn(String) -> Message + 'static,
) -> Result<(), JsValue> {
    if let Some(select) = document.get_element_by_id(id) {
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: Event| {
            let Some(target) = e.target() else { return };
            let Ok(select) = target.dyn_into::<HtmlSelectElement>() else {
                return;
            };
            dispatch_global_message(to_message(select.value()));
        }));
        select.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}

fn setup_canvas_handlers(document: &Document) -> Result<(), JsValue> {
    let Some(canvas) = document.get_element_by_id(ID_MAP_CANVAS) else {
        return Ok(());
    };
    let canvas: HtmlCanvasElement = canvas.dyn_into()?;

    // mousedown – potential sketch start in spatial mode.
    {
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: MouseEvent| {
            let (x, y) = canvas_xy(&e);
            SKETCH_DRAG.with(|drag| *drag.borrow_mut() = Some((x, y, false)));
            if current_mode() == QueryMode::SpatialFilter {
                dispatch_global_message(Message::SketchUpdated {
                    phase: SketchPhase::Start,
                    geometry: sketch_rect(x, y, x, y),
                });
            }
        }));
        canvas.add_event_listener_with_callback("mousedown", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }

    // mousemove – track whether this became a drag.
    {
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: MouseEvent| {
            let (x, y) = canvas_xy(&e);
            SKETCH_DRAG.with(|drag| {
                if let Some((ax, ay, moved)) = drag.borrow_mut().as_mut() {
                    if (x - *ax).abs() > DRAG_THRESHOLD_PX || (y - *ay).abs() > DRAG_THRESHOLD_PX {
                        *moved = true;
                    }
                }
            });
        }));
        canvas.add_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }

    // mouseup – either a completed sketch or a plain map click.
    {
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: MouseEvent| {
            let (x, y) = canvas_xy(&e);
            let anchor = SKETCH_DRAG.with(|drag| drag.borrow_mut().take());
            let Some((ax, ay, moved)) = anchor else { return };

            if current_mode() == QueryMode::SpatialFilter && moved {
                let rect = sketch_rect(ax, ay, x, y);
                // The settled geometry re-queries, then the tool finishes
                // and the provisional graphic is discarded.
                dispatch_global_message(Message::SketchUpdated {
                    phase: SketchPhase::MoveStop,
                    geometry: rect.clone(),
                });
                dispatch_global_message(Message::SketchUpdated {
                    phase: SketchPhase::Complete,
                    geometry: rect,
                });
            } else {
                let point = unproject(x, y);
                dispatch_global_message(Message::MapClicked { point });
            }
        }));
        canvas.add_event_listener_with_callback("mouseup", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }

    Ok(())
}

fn canvas_xy(e: &MouseEvent) -> (f64, f64) {
    (e.offset_x() as f64, e.offset_y() as f64)
}

fn current_mode() -> QueryMode {
    APP_STATE.with(|state| state.borrow().query_mode)
}

fn unproject(x: f64, y: f64) -> Point {
    APP_STATE.with(|state| state.borrow().viewport.unproject(x, y))
}

/// Axis-aligned sketch rectangle in map coordinates.
fn sketch_rect(ax: f64, ay: f64, bx: f64, by: f64) -> Geometry {
    let a = unproject(ax, ay);
    let b = unproject(bx, by);
    Geometry::Polygon(vec![
        Point::new(a.lon, a.lat),
        Point::new(b.lon, a.lat),
        Point::new(b.lon, b.lat),
        Point::new(a.lon, b.lat),
    ])
}
