use serde::{Deserialize, Serialize};
use std::fmt;

use bubbleplan_core::{area_from_size, side_from_area, Color};

use super::{Bounds, Point};
use crate::geometry::{bubble_outline, polygon_area, polygon_centroid, rounded_polygon_path, PathData};

/// Stable identity of a space.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpaceId(pub String);

impl SpaceId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpaceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Geometry of a space in its local frame (origin at the bounding-box
/// top-left). The rectangle's extent is the owning space's `width`/`height`.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect,
    Polygon(Vec<Point>),
}

/// How the outline is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlineStyle {
    /// Straight edges with the diagram style's corner radius.
    #[default]
    Standard,
    /// Smooth Catmull-Rom curve through the vertices.
    Bubble,
}

/// Per-space color override.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpaceStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Color>,
}

/// A named area of the program ("room").
#[derive(Debug, Clone, PartialEq)]
pub struct Space {
    pub id: SpaceId,
    pub name: String,
    /// Square meters. Authoritative until the geometry is edited.
    pub area: f64,
    pub zone: String,
    pub description: Option<String>,
    pub placed: bool,
    pub floor: usize,
    /// World position of the bounding-box top-left.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub shape: Shape,
    pub outline: OutlineStyle,
    pub style: Option<SpaceStyle>,
}

impl Space {
    /// Creates an unplaced square space whose side is derived from `area`.
    pub fn new(name: impl Into<String>, area: f64, zone: impl Into<String>, pixels_per_meter: f64) -> Self {
        let side = side_from_area(area, pixels_per_meter);
        Self {
            id: SpaceId::generate(),
            name: name.into(),
            area,
            zone: zone.into(),
            description: None,
            placed: false,
            floor: 0,
            position: Point::ORIGIN,
            width: side,
            height: side,
            shape: Shape::Rect,
            outline: OutlineStyle::default(),
            style: None,
        }
    }

    pub fn is_polygon(&self) -> bool {
        matches!(self.shape, Shape::Polygon(_))
    }

    /// Vertices in the local frame. Rectangles yield their four corners.
    pub fn local_vertices(&self) -> Vec<Point> {
        match &self.shape {
            Shape::Rect => vec![
                Point::new(0.0, 0.0),
                Point::new(self.width, 0.0),
                Point::new(self.width, self.height),
                Point::new(0.0, self.height),
            ],
            Shape::Polygon(points) => points.clone(),
        }
    }

    pub fn world_vertices(&self) -> Vec<Point> {
        self.local_vertices()
            .into_iter()
            .map(|p| p + self.position)
            .collect()
    }

    /// World bounding box (position plus stored width/height).
    pub fn bounds(&self) -> Bounds {
        Bounds::from_rect(self.position.x, self.position.y, self.width, self.height)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Area-weighted centroid of the outline in world space; labels anchor here.
    pub fn world_centroid(&self) -> Point {
        polygon_centroid(&self.local_vertices()) + self.position
    }

    /// Area in square meters computed from the geometry.
    pub fn geometric_area(&self, pixels_per_meter: f64) -> f64 {
        match &self.shape {
            Shape::Rect => area_from_size(self.width, self.height, pixels_per_meter),
            Shape::Polygon(points) => polygon_area(points, pixels_per_meter),
        }
    }

    /// Turns the implicit rectangle into an explicit four-point polygon with
    /// identical bounds. No-op when already a polygon.
    pub fn materialize_polygon(&mut self) {
        if let Shape::Rect = self.shape {
            self.shape = Shape::Polygon(self.local_vertices());
        }
    }

    /// Drops any polygon and resizes to the square implied by `area`.
    pub fn reset_to_square(&mut self, pixels_per_meter: f64) {
        let side = side_from_area(self.area, pixels_per_meter);
        self.shape = Shape::Rect;
        self.width = side;
        self.height = side;
    }

    /// Grows `width`/`height` so they cover the polygon's extent. Never shrinks.
    pub fn grow_bounds_to_polygon(&mut self) {
        if let Shape::Polygon(points) = &self.shape {
            if let Some(extent) = Bounds::from_points(points) {
                self.width = self.width.max(extent.max_x);
                self.height = self.height.max(extent.max_y);
            }
        }
    }

    /// Keeps the polygon in the positive local quadrant after an edit.
    ///
    /// Vertices dragged left of or above the local origin move the origin
    /// instead (the world shape is unchanged), then the bounds grow to cover
    /// the polygon.
    pub fn rebase_polygon(&mut self) {
        if let Shape::Polygon(points) = &mut self.shape {
            if let Some(extent) = Bounds::from_points(points.iter()) {
                let shift = Point::new(extent.min_x.min(0.0), extent.min_y.min(0.0));
                if shift != Point::ORIGIN {
                    for p in points.iter_mut() {
                        *p = *p - shift;
                    }
                    self.position = self.position + shift;
                    self.width -= shift.x;
                    self.height -= shift.y;
                }
            }
        }
        self.grow_bounds_to_polygon();
    }

    /// Outline path in world coordinates.
    pub fn world_outline(&self, corner_radius: f64) -> PathData {
        let vertices = self.world_vertices();
        match self.outline {
            OutlineStyle::Standard => rounded_polygon_path(&vertices, corner_radius),
            OutlineStyle::Bubble => bubble_outline(&vertices),
        }
    }
}
