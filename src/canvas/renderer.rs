//! Map canvas renderer: paints the basemap placeholder and every graphics
//! scope in draw order. Pure interpretation of the render state – all
//! decisions about *what* to draw were made by the result renderer.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes;
use crate::constants::ID_MAP_CANVAS;
use crate::geometry::Geometry;
use crate::models::{Graphic, Symbol};
use crate::state::{AppState, Viewport, APP_STATE};

/// Repaint the canvas from the global state.
pub fn refresh() {
    APP_STATE.with(|state| {
        let mut state = state.borrow_mut();
        draw(&mut state);
    });
}

fn canvas_and_context() -> Option<(HtmlCanvasElement, CanvasRenderingContext2d)> {
    let document = web_sys::window()?.document()?;
    let canvas = document
        .get_element_by_id(ID_MAP_CANVAS)?
        .dyn_into::<HtmlCanvasElement>()
        .ok()?;
    let context = canvas
        .get_context("2d")
        .ok()??
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()?;
    Some((canvas, context))
}

pub fn draw(state: &mut AppState) {
    let Some((canvas, context)) = canvas_and_context() else {
        return;
    };

    state.viewport.width = canvas.width() as f64;
    state.viewport.height = canvas.height() as f64;

    draw_basemap(&context, &state.viewport, &state.basemap);

    for graphic in state.render.draw_order() {
        draw_graphic(&context, &state.viewport, graphic);
    }
}

/// Until tiles are wired in, the basemap is a flat wash with a graticule and
/// the style id in the corner.
fn draw_basemap(context: &CanvasRenderingContext2d, viewport: &Viewport, basemap: &str) {
    context.set_fill_style_str(basemap_wash(basemap));
    context.fill_rect(0.0, 0.0, viewport.width, viewport.height);

    context.set_stroke_style_str("rgba(0,0,0,0.08)");
    context.set_line_width(1.0);

    // Graticule every 0.01 degrees at neighborhood zooms. Skipped when the
    // view spans more than a couple of degrees.
    let top_left = viewport.unproject(0.0, 0.0);
    let bottom_right = viewport.unproject(viewport.width, viewport.height);
    if (bottom_right.lon - top_left.lon).abs() > 2.0 {
        return draw_basemap_label(context, viewport, basemap);
    }
    let step = 0.01;
    let mut lon = (top_left.lon / step).floor() * step;
    while lon < bottom_right.lon + step {
        let (x, _) = viewport.project(crate::geometry::Point::new(lon, top_left.lat));
        context.begin_path();
        context.move_to(x, 0.0);
        context.line_to(x, viewport.height);
        context.stroke();
        lon += step;
    }
    let mut lat = (bottom_right.lat / step).floor() * step;
    while lat < top_left.lat + step {
        let (_, y) = viewport.project(crate::geometry::Point::new(top_left.lon, lat));
        context.begin_path();
        context.move_to(0.0, y);
        context.line_to(viewport.width, y);
        context.stroke();
        lat += step;
    }

    draw_basemap_label(context, viewport, basemap);
}

fn draw_basemap_label(context: &CanvasRenderingContext2d, viewport: &Viewport, basemap: &str) {
    context.set_fill_style_str("rgba(0,0,0,0.45)");
    context.set_font("11px Arial");
    let _ = context.fill_text(basemap, 8.0, viewport.height - 8.0);
}

fn basemap_wash(basemap: &str) -> &'static str {
    match basemap {
        "arcgis/imagery" => "#2c3531",
        "arcgis/navigation" => "#f3f6f9",
        "arcgis/streets" => "#f7f4ee",
        _ => "#eef2e8",
    }
}

fn draw_graphic(context: &CanvasRenderingContext2d, viewport: &Viewport, graphic: &Graphic) {
    let project = |pts: &[crate::geometry::Point]| -> Vec<(f64, f64)> {
        pts.iter().map(|p| viewport.project(*p)).collect()
    };

    match (&graphic.geometry, &graphic.symbol) {
        (
            Geometry::Polygon(pts),
            Symbol::SimpleFill {
                fill,
                outline,
                outline_width,
            },
        ) => {
            shapes::draw_polygon(context, &project(pts), fill, outline, *outline_width);
        }
        (Geometry::Polyline(pts), Symbol::SimpleLine { color, width }) => {
            shapes::draw_polyline(context, &project(pts), color, *width);
        }
        (
            Geometry::Point(p),
            Symbol::SimpleMarker {
                color,
                outline,
                size,
            },
        ) => {
            let (x, y) = viewport.project(*p);
            shapes::draw_marker(context, x, y, *size, color, outline);
        }
        (Geometry::Point(p), Symbol::PictureMarker { width, .. }) => {
            let (x, y) = viewport.project(*p);
            shapes::draw_picture_marker_placeholder(context, x, y, *width);
        }
        // Symbol/geometry combinations the services never produce.
        _ => {}
    }
}
