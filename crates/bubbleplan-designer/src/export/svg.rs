//! SVG rendering of one floor.

use bubbleplan_core::units::format_meters;
use bubbleplan_core::Color;

use super::{ExportOptions, ExportScene};
use crate::geometry::{fmt_coord, three_point_arc, PathData};
use crate::model::{AnnotationKind, Point};
use crate::zones::{aggregate_zones, ZoneScope};

const CONNECTION_COLOR: &str = "#64748b";
const LABEL_COLOR: &str = "#1f2937";
const HULL_OPACITY: f64 = 0.12;

/// What the SVG writer adds around the drawing itself.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    pub background: Option<Color>,
    /// Scale bar length in meters; `None` leaves it out (PDF draws its own).
    pub scale_bar_m: Option<f64>,
}

impl SvgOptions {
    pub fn from_export(options: &ExportOptions, with_scale_bar: bool) -> Self {
        Self {
            background: options.include_background.then_some(options.background),
            scale_bar_m: with_scale_bar.then_some(options.scale_bar_m),
        }
    }
}

/// Escapes text for use in element content and attribute values.
pub(crate) fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Renders the scene as a standalone SVG document in world coordinates.
///
/// Layers, back to front: background, reference images, zone hulls,
/// connections, spaces with labels, annotations, scale bar.
pub fn render_svg(scene: &ExportScene<'_>, options: &SvgOptions) -> String {
    let frame = scene.frame;
    let doc = scene.doc;
    let style = &doc.style;
    let mut svg = String::new();

    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}" viewBox="{} {} {} {}">
"#,
        fmt_coord(frame.width()),
        fmt_coord(frame.height()),
        fmt_coord(frame.min_x),
        fmt_coord(frame.min_y),
        fmt_coord(frame.width()),
        fmt_coord(frame.height()),
    ));
    svg.push_str(&format!("<title>{}</title>\n", escape_xml(&doc.project_name)));

    if let Some(bg) = options.background {
        svg.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            fmt_coord(frame.min_x),
            fmt_coord(frame.min_y),
            fmt_coord(frame.width()),
            fmt_coord(frame.height()),
            bg
        ));
        svg.push('\n');
    }

    for image in doc.reference_images_on_floor(scene.floor) {
        let w = image.width * image.scale;
        let h = image.height * image.scale;
        svg.push_str(&format!(
            r#"<image x="{}" y="{}" width="{}" height="{}" opacity="{}" preserveAspectRatio="none" transform="rotate({} {} {})" xlink:href="{}"/>"#,
            fmt_coord(image.x),
            fmt_coord(image.y),
            fmt_coord(w),
            fmt_coord(h),
            fmt_coord(image.opacity),
            fmt_coord(image.rotation),
            fmt_coord(image.x + w / 2.0),
            fmt_coord(image.y + h / 2.0),
            escape_xml(&image.source)
        ));
        svg.push('\n');
    }

    svg.push_str("<g id=\"zones\">\n");
    for zone in aggregate_zones(doc, scene.floor, ZoneScope::Placed) {
        if zone.hull.len() < 3 {
            continue;
        }
        let colors = scene.colors.zone_colors(&zone.zone);
        svg.push_str(&format!(
            r#"<path d="{}" fill="{}" fill-opacity="{}" stroke="{}" stroke-width="1.5" stroke-dasharray="6 4"/>"#,
            zone.hull_path().to_svg(),
            colors.fill,
            HULL_OPACITY,
            colors.border
        ));
        svg.push('\n');
    }
    svg.push_str("</g>\n");

    svg.push_str("<g id=\"connections\">\n");
    for (_, a, b) in doc.renderable_connections(scene.floor) {
        let (p, q) = (a.center(), b.center());
        svg.push_str(&format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="2" stroke-linecap="round"/>"#,
            fmt_coord(p.x),
            fmt_coord(p.y),
            fmt_coord(q.x),
            fmt_coord(q.y),
            CONNECTION_COLOR
        ));
        svg.push('\n');
    }
    svg.push_str("</g>\n");

    svg.push_str("<g id=\"spaces\">\n");
    for (space, label) in scene.spaces.iter().zip(&scene.labels) {
        let colors = scene.colors.space_colors(space);
        svg.push_str(&format!(
            r#"<path d="{}" fill="{}" fill-opacity="{}" stroke="{}" stroke-width="{}"/>"#,
            space.world_outline(style.corner_radius).to_svg(),
            colors.fill,
            fmt_coord(style.opacity),
            colors.border,
            fmt_coord(style.border_width)
        ));
        svg.push('\n');
        for (line, at) in label.positioned_lines() {
            svg.push_str(&format!(
                r#"<text x="{}" y="{}" font-family="{}" font-size="{}" fill="{}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
                fmt_coord(at.x),
                fmt_coord(at.y),
                escape_xml(&style.font_family),
                fmt_coord(label.font_size),
                LABEL_COLOR,
                escape_xml(line)
            ));
            svg.push('\n');
        }
    }
    svg.push_str("</g>\n");

    svg.push_str("<g id=\"annotations\">\n");
    for note in doc.annotations_on_floor(scene.floor) {
        match &note.kind {
            AnnotationKind::Freehand { points } => {
                svg.push_str(&format!(
                    r#"<path d="{}" fill="none" stroke="{}" stroke-width="2" stroke-linejoin="round"/>"#,
                    PathData::polyline(points, false).to_svg(),
                    note.color
                ));
            }
            AnnotationKind::Arc { start, through, end } => {
                svg.push_str(&format!(
                    r#"<path d="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
                    three_point_arc(*start, *through, *end).to_svg(),
                    note.color
                ));
            }
            AnnotationKind::Text {
                position,
                text,
                font_size,
            } => {
                svg.push_str(&format!(
                    r#"<text x="{}" y="{}" font-family="{}" font-size="{}" fill="{}">{}</text>"#,
                    fmt_coord(position.x),
                    fmt_coord(position.y),
                    escape_xml(&style.font_family),
                    fmt_coord(*font_size),
                    note.color,
                    escape_xml(text)
                ));
            }
        }
        svg.push('\n');
    }
    svg.push_str("</g>\n");

    if let Some(meters) = options.scale_bar_m {
        let origin = Point::new(scene.content.min_x, frame.max_y - 20.0);
        svg.push_str(&scale_bar(origin, meters, doc.pixels_per_meter(), &style.font_family));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Calibrated bar of `meters` with end and midpoint ticks, label above.
fn scale_bar(origin: Point, meters: f64, pixels_per_meter: f64, font_family: &str) -> String {
    let length = meters * pixels_per_meter;
    let mut out = String::from("<g id=\"scale-bar\" stroke=\"#111827\" stroke-width=\"2\">\n");
    out.push_str(&format!(
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
        fmt_coord(origin.x),
        fmt_coord(origin.y),
        fmt_coord(origin.x + length),
        fmt_coord(origin.y)
    ));
    out.push('\n');
    for (x, tick) in [(0.0, 6.0), (length / 2.0, 4.0), (length, 6.0)] {
        out.push_str(&format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
            fmt_coord(origin.x + x),
            fmt_coord(origin.y - tick),
            fmt_coord(origin.x + x),
            fmt_coord(origin.y + tick)
        ));
        out.push('\n');
    }
    out.push_str(&format!(
        r##"<text x="{}" y="{}" font-family="{}" font-size="11" fill="#111827" stroke="none" text-anchor="middle">{}</text>"##,
        fmt_coord(origin.x + length / 2.0),
        fmt_coord(origin.y - 10.0),
        escape_xml(font_family),
        format_meters(meters)
    ));
    out.push_str("\n</g>\n");
    out
}
