//! DXF (R12-style ASCII) rendering of one floor.
//!
//! Output is in meters with +Y up: world pixels are divided by the document
//! scale, Y is negated, and everything is shifted so the content's top-left
//! lands on the origin.

use bubbleplan_core::constants::BEZIER_SAMPLES_PER_SEGMENT;

use super::ExportScene;
use crate::model::{OutlineStyle, Point};

const LABEL_LAYER: &str = "Labels";
const CONNECTION_LAYER: &str = "Connections";

/// Characters DXF forbids in layer names.
const LAYER_FORBIDDEN: &[char] = &['<', '>', '/', '\\', '"', ':', ';', '?', '*', '|', '=', '`'];

struct DxfWriter {
    out: String,
}

impl DxfWriter {
    fn new() -> Self {
        Self { out: String::new() }
    }

    fn pair(&mut self, code: u16, value: impl std::fmt::Display) {
        self.out.push_str(&format!("{}\n{}\n", code, value));
    }

    fn coord(&mut self, code: u16, value: f64) {
        // Adding zero folds -0.0 into 0.0.
        self.pair(code, format!("{:.6}", value + 0.0));
    }

    fn section(&mut self, name: &str) {
        self.pair(0, "SECTION");
        self.pair(2, name);
    }

    fn end_section(&mut self) {
        self.pair(0, "ENDSEC");
    }
}

/// Escapes non-ASCII characters as `\U+XXXX` sequences.
pub(crate) fn escape_dxf_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii() && !ch.is_ascii_control() {
            out.push(ch);
        } else if ch.is_ascii_control() {
            out.push(' ');
        } else {
            out.push_str(&format!("\\U+{:04X}", ch as u32));
        }
    }
    out
}

/// Layer name derived from a zone label.
pub(crate) fn layer_name(zone: &str) -> String {
    let cleaned: String = zone
        .trim()
        .chars()
        .map(|c| if LAYER_FORBIDDEN.contains(&c) { '_' } else { c })
        .collect();
    if cleaned.is_empty() {
        "0".to_string()
    } else {
        escape_dxf_text(&cleaned)
    }
}

/// Renders the scene's spaces, labels and connections as DXF entities.
pub fn render_dxf(scene: &ExportScene<'_>) -> String {
    let ppm = scene.doc.pixels_per_meter();
    let origin = Point::new(scene.content.min_x, scene.content.min_y);
    let to_dxf = |p: Point| Point::new((p.x - origin.x) / ppm, -(p.y - origin.y) / ppm);

    let mut w = DxfWriter::new();
    w.section("HEADER");
    w.pair(9, "$ACADVER");
    w.pair(1, "AC1009");
    w.pair(9, "$INSUNITS");
    w.pair(70, 6);
    w.end_section();

    w.section("ENTITIES");
    for (space, label) in scene.spaces.iter().zip(&scene.labels) {
        let outline: Vec<Point> = match space.outline {
            OutlineStyle::Standard => space.world_vertices(),
            OutlineStyle::Bubble => space
                .world_outline(0.0)
                .flatten(BEZIER_SAMPLES_PER_SEGMENT),
        };
        let layer = layer_name(&space.zone);
        w.pair(0, "LWPOLYLINE");
        w.pair(8, &layer);
        w.pair(90, outline.len());
        w.pair(70, 1);
        for p in outline.into_iter().map(to_dxf) {
            w.coord(10, p.x);
            w.coord(20, p.y);
        }

        let height = label.font_size / ppm;
        for (line, at) in label.positioned_lines() {
            let p = to_dxf(at);
            w.pair(0, "TEXT");
            w.pair(8, LABEL_LAYER);
            w.coord(10, p.x);
            w.coord(20, p.y);
            w.coord(30, 0.0);
            w.coord(40, height);
            w.pair(1, escape_dxf_text(line));
            w.pair(72, 1);
            w.coord(11, p.x);
            w.coord(21, p.y);
            w.coord(31, 0.0);
            w.pair(73, 2);
        }
    }

    for (_, a, b) in scene.doc.renderable_connections(scene.floor) {
        let (p, q) = (to_dxf(a.center()), to_dxf(b.center()));
        w.pair(0, "LINE");
        w.pair(8, CONNECTION_LAYER);
        w.coord(10, p.x);
        w.coord(20, p.y);
        w.coord(11, q.x);
        w.coord(21, q.y);
    }
    w.end_section();
    w.pair(0, "EOF");
    w.out
}
