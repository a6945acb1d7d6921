//! Low-level drawing helpers for the map canvas.

use web_sys::CanvasRenderingContext2d;

use crate::models::Rgba;

pub fn draw_polygon(
    context: &CanvasRenderingContext2d,
    points: &[(f64, f64)],
    fill: &Rgba,
    outline: &Rgba,
    outline_width: f64,
) {
    if points.len() < 3 {
        return;
    }
    context.begin_path();
    context.move_to(points[0].0, points[0].1);
    for (x, y) in &points[1..] {
        context.line_to(*x, *y);
    }
    context.close_path();

    context.set_fill_style_str(&fill.css());
    context.fill();
    context.set_stroke_style_str(&outline.css());
    context.set_line_width(outline_width.max(0.1));
    context.stroke();
}

pub fn draw_polyline(
    context: &CanvasRenderingContext2d,
    points: &[(f64, f64)],
    color: &Rgba,
    width: f64,
) {
    if points.len() < 2 {
        return;
    }
    context.begin_path();
    context.move_to(points[0].0, points[0].1);
    for (x, y) in &points[1..] {
        context.line_to(*x, *y);
    }
    context.set_stroke_style_str(&color.css());
    context.set_line_width(width);
    context.stroke();
}

pub fn draw_marker(
    context: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    size: f64,
    color: &Rgba,
    outline: &Rgba,
) {
    context.begin_path();
    let _ = context.arc(x, y, size / 2.0, 0.0, std::f64::consts::PI * 2.0);
    context.set_fill_style_str(&color.css());
    context.fill();
    context.set_stroke_style_str(&outline.css());
    context.set_line_width(1.0);
    context.stroke();
}

/// Placeholder for picture markers until the icon image is cached: a ring
/// with a light core, sized like the final icon.
pub fn draw_picture_marker_placeholder(
    context: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    width: f64,
) {
    context.begin_path();
    let _ = context.arc(x, y, width / 2.0, 0.0, std::f64::consts::PI * 2.0);
    context.set_fill_style_str("rgba(255,255,255,0.9)");
    context.fill();
    context.set_stroke_style_str("rgba(3,140,255,1)");
    context.set_line_width(2.0);
    context.stroke();
}
