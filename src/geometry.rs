//! Map geometry primitives shared by the query builder, the renderer and the
//! canvas adapter.
//!
//! Geometry here is deliberately thin: coordinates, rings and the Web
//! Mercator projection the canvas needs. Anything heavier (buffering on the
//! server, spatial relationships) belongs to the hosted services.

use serde::{Deserialize, Serialize};

/// A WGS84 longitude / latitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lon: f64,
    pub lat: f64,
}

impl Point {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Point),
    /// Ordered path of vertices.
    Polyline(Vec<Point>),
    /// Single exterior ring; first and last vertex need not repeat.
    Polygon(Vec<Point>),
}

impl Geometry {
    /// Representative anchor for popups and list focus.
    pub fn anchor(&self) -> Point {
        match self {
            Geometry::Point(p) => *p,
            Geometry::Polyline(pts) | Geometry::Polygon(pts) => {
                if pts.is_empty() {
                    Point::new(0.0, 0.0)
                } else {
                    let n = pts.len() as f64;
                    Point::new(
                        pts.iter().map(|p| p.lon).sum::<f64>() / n,
                        pts.iter().map(|p| p.lat).sum::<f64>() / n,
                    )
                }
            }
        }
    }

    /// Serialize into the REST geometry JSON the feature services expect.
    pub fn to_service_json(&self) -> serde_json::Value {
        match self {
            Geometry::Point(p) => serde_json::json!({ "x": p.lon, "y": p.lat }),
            Geometry::Polyline(pts) => serde_json::json!({
                "paths": [pts.iter().map(|p| [p.lon, p.lat]).collect::<Vec<_>>()]
            }),
            Geometry::Polygon(pts) => serde_json::json!({
                "rings": [pts.iter().map(|p| [p.lon, p.lat]).collect::<Vec<_>>()]
            }),
        }
    }
}

// Mean Earth radius, meters.
const EARTH_RADIUS_M: f64 = 6_371_008.8;
const METERS_PER_MILE: f64 = 1_609.344;

/// Approximate a geodesic circle around `center` as a closed polygon ring.
///
/// Good enough for visualizing a search radius; authoritative buffering is
/// the service's job.
pub fn circle(center: Point, radius_m: f64, points: usize) -> Geometry {
    let lat_rad = center.lat.to_radians();
    let d_lat = (radius_m / EARTH_RADIUS_M).to_degrees();
    let d_lon = (radius_m / (EARTH_RADIUS_M * lat_rad.cos())).to_degrees();

    let ring = (0..points)
        .map(|i| {
            let theta = 2.0 * std::f64::consts::PI * (i as f64) / (points as f64);
            Point::new(
                center.lon + d_lon * theta.cos(),
                center.lat + d_lat * theta.sin(),
            )
        })
        .collect();
    Geometry::Polygon(ring)
}

/// Same as [`circle`] with the radius given in miles.
pub fn circle_miles(center: Point, radius_miles: f64, points: usize) -> Geometry {
    circle(center, radius_miles * METERS_PER_MILE, points)
}

// ---------------------------------------------------------------------------
// Web Mercator projection – the canvas adapter's screen transform.
// ---------------------------------------------------------------------------

/// Project to Web Mercator "world" coordinates in the [0, 1] unit square.
pub fn to_world(p: Point) -> (f64, f64) {
    let x = (p.lon + 180.0) / 360.0;
    let lat = p.lat.clamp(-85.05112878, 85.05112878);
    let sin = lat.to_radians().sin();
    let y = 0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * std::f64::consts::PI);
    (x, y)
}

/// Inverse of [`to_world`].
pub fn from_world(x: f64, y: f64) -> Point {
    let lon = x * 360.0 - 180.0;
    let n = std::f64::consts::PI * (1.0 - 2.0 * y);
    let lat = n.sinh().atan().to_degrees();
    Point::new(lon, lat)
}
