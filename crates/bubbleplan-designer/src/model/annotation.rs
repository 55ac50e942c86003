use serde::{Deserialize, Serialize};

use bubbleplan_core::Color;

use super::{Bounds, Point};
use crate::geometry::three_point_arc;

/// Sampling density for arc bounds; the bulge can pass every control point.
const ARC_EXTENT_SAMPLES: usize = 64;

/// Free drawing on a floor, independent of spaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub id: String,
    #[serde(default)]
    pub floor: usize,
    #[serde(default = "default_annotation_color")]
    pub color: Color,
    #[serde(flatten)]
    pub kind: AnnotationKind,
}

fn default_annotation_color() -> Color {
    Color::rgb(0x33, 0x33, 0x33)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnnotationKind {
    /// Open polyline drawn by hand.
    Freehand { points: Vec<Point> },
    /// Circular arc through three points.
    Arc { start: Point, through: Point, end: Point },
    /// Text note anchored at its baseline start.
    #[serde(rename_all = "camelCase")]
    Text {
        position: Point,
        text: String,
        #[serde(default = "default_font_size")]
        font_size: f64,
    },
}

fn default_font_size() -> f64 {
    14.0
}

impl Annotation {
    pub fn new(floor: usize, kind: AnnotationKind) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            floor,
            color: default_annotation_color(),
            kind,
        }
    }

    /// Points that must be inside export bounds.
    pub fn extent_points(&self) -> Vec<Point> {
        match &self.kind {
            AnnotationKind::Freehand { points } => points.clone(),
            AnnotationKind::Arc { start, through, end } => {
                let mut points = three_point_arc(*start, *through, *end).flatten(ARC_EXTENT_SAMPLES);
                points.push(*through);
                points
            }
            AnnotationKind::Text {
                position,
                text,
                font_size,
            } => {
                // Rough text box; exact glyph metrics are not needed for bounds.
                let width = text.chars().count() as f64 * font_size * 0.6;
                vec![
                    Point::new(position.x, position.y - font_size),
                    Point::new(position.x + width, position.y),
                ]
            }
        }
    }
}

/// Traced underlay image placed in world space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceImage {
    pub id: String,
    #[serde(default)]
    pub floor: usize,
    pub x: f64,
    pub y: f64,
    /// Natural size of the source in pixels.
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Degrees, clockwise, about the image center.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub locked: bool,
    /// Data URL or path of the image content.
    pub source: String,
}

fn default_scale() -> f64 {
    1.0
}

fn default_opacity() -> f64 {
    0.5
}

impl ReferenceImage {
    /// World-space bounds of the rotated, scaled image.
    pub fn bounds(&self) -> Bounds {
        let w = self.width * self.scale;
        let h = self.height * self.scale;
        let center = Point::new(self.x + w / 2.0, self.y + h / 2.0);
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let corners = [
            Point::new(-w / 2.0, -h / 2.0),
            Point::new(w / 2.0, -h / 2.0),
            Point::new(w / 2.0, h / 2.0),
            Point::new(-w / 2.0, h / 2.0),
        ]
        .map(|c| Point::new(c.x * cos - c.y * sin, c.x * sin + c.y * cos) + center);
        Bounds::from_points(&corners).unwrap_or_else(|| Bounds::from_rect(self.x, self.y, w, h))
    }

    /// Moves the image unless it is locked. Returns whether it moved.
    pub fn translate(&mut self, dx: f64, dy: f64) -> bool {
        if self.locked {
            return false;
        }
        self.x += dx;
        self.y += dy;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_extent_covers_bulge() {
        // Circle of radius 10 about the origin; the arc passes over (0, -10).
        let arc = Annotation::new(
            0,
            AnnotationKind::Arc {
                start: Point::new(-10.0, 0.0),
                through: Point::new(-6.0, -8.0),
                end: Point::new(6.0, -8.0),
            },
        );
        let bounds = Bounds::from_points(&arc.extent_points()).unwrap();
        assert!(bounds.min_y < -9.99, "min_y = {}", bounds.min_y);
        assert!(bounds.min_y >= -10.0 - 1e-9);
        assert_eq!(bounds.min_x, -10.0);
    }

    #[test]
    fn test_locked_image_does_not_move() {
        let mut image = ReferenceImage {
            id: "img".into(),
            floor: 0,
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 50.0,
            scale: 2.0,
            rotation: 0.0,
            opacity: 0.5,
            locked: true,
            source: "plan.png".into(),
        };
        assert!(!image.translate(5.0, 5.0));
        assert_eq!(image.bounds(), Bounds::new(0.0, 0.0, 200.0, 100.0));
        image.locked = false;
        assert!(image.translate(5.0, 5.0));
        assert_eq!(image.x, 5.0);
    }

    #[test]
    fn test_rotated_image_bounds() {
        let image = ReferenceImage {
            id: "img".into(),
            floor: 0,
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 50.0,
            scale: 1.0,
            rotation: 90.0,
            opacity: 0.5,
            locked: false,
            source: "plan.png".into(),
        };
        let b = image.bounds();
        assert!((b.width() - 50.0).abs() < 1e-9);
        assert!((b.height() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_annotation_json_shape() {
        let json = r#"{"id":"n1","type":"text","position":{"x":1.0,"y":2.0},"text":"Entry"}"#;
        let note: Annotation = serde_json::from_str(json).unwrap();
        assert_eq!(note.floor, 0);
        assert!(matches!(note.kind, AnnotationKind::Text { font_size, .. } if font_size == 14.0));
    }
}
