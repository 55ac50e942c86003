//! Geometry kernel.
//!
//! Pure functions over point lists: shoelace area, convex hull, rounded and
//! smooth outline paths, three-point arcs and text wrapping. Nothing here
//! fails: degenerate input falls back to a simpler primitive.

mod area;
mod hull;
mod path;
mod text;

pub use area::{point_in_polygon, polygon_area, polygon_centroid, signed_area_px};
pub use hull::convex_hull;
pub use path::{bubble_outline, rounded_polygon_path, three_point_arc, PathCommand, PathData};
pub use text::{wrap_text, HeuristicMeasure, TextMeasure};

/// Formats a coordinate for path markup: three decimals, trailing zeros
/// dropped, no negative zero.
pub fn fmt_coord(value: f64) -> String {
    let mut s = format!("{:.3}", value);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}
