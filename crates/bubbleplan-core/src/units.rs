//! Unit conversion utilities
//!
//! World coordinates are pixels; real-world quantities are meters and square
//! meters. Every conversion takes the document's pixels-per-meter explicitly.

/// Converts a world length in pixels to meters.
pub fn px_to_meters(px: f64, pixels_per_meter: f64) -> f64 {
    px / pixels_per_meter
}

/// Converts a length in meters to world pixels.
pub fn meters_to_px(meters: f64, pixels_per_meter: f64) -> f64 {
    meters * pixels_per_meter
}

/// Side length in pixels of the square whose area is `area` square meters.
pub fn side_from_area(area: f64, pixels_per_meter: f64) -> f64 {
    area.max(0.0).sqrt() * pixels_per_meter
}

/// Area in square meters of a `width` x `height` pixel rectangle.
pub fn area_from_size(width: f64, height: f64, pixels_per_meter: f64) -> f64 {
    width * height / (pixels_per_meter * pixels_per_meter)
}

/// Formats an area for labels: one decimal, trailing `.0` dropped.
///
/// ```
/// use bubbleplan_core::units::format_area;
/// assert_eq!(format_area(15.0), "15 m²");
/// assert_eq!(format_area(12.46), "12.5 m²");
/// ```
pub fn format_area(area: f64) -> String {
    let rounded = format!("{:.1}", area);
    let trimmed = rounded.strip_suffix(".0").unwrap_or(&rounded);
    format!("{} m²", trimmed)
}

/// Formats a length in meters for scale bars and dimension labels.
pub fn format_meters(meters: f64) -> String {
    let rounded = format!("{:.1}", meters);
    let trimmed = rounded.strip_suffix(".0").unwrap_or(&rounded);
    format!("{} m", trimmed)
}
