//! Document model: spaces, connections, floors, annotations and the
//! point/bounds primitives they are built from.
//!
//! World coordinates are pixels with +Y pointing down (screen convention).

mod annotation;
mod connection;
mod floor;
mod space;

pub use annotation::{Annotation, AnnotationKind, ReferenceImage};
pub use connection::Connection;
pub use floor::Floor;
pub use space::{OutlineStyle, Shape, Space, SpaceId, SpaceStyle};

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction, or the zero vector for zero length.
    pub fn normalized(&self) -> Point {
        let len = self.length();
        if len <= f64::EPSILON {
            Point::ORIGIN
        } else {
            Point::new(self.x / len, self.y / len)
        }
    }

    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Z component of the cross product of `self` and `other`.
    pub fn cross(&self, other: &Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Shortest distance from `self` to the segment `a`-`b`.
    pub fn distance_to_segment(&self, a: &Point, b: &Point) -> f64 {
        let ab = *b - *a;
        let len_sq = ab.x * ab.x + ab.y * ab.y;
        if len_sq <= f64::EPSILON {
            return self.distance_to(a);
        }
        let t = (((*self - *a).x * ab.x + (*self - *a).y * ab.y) / len_sq).clamp(0.0, 1.0);
        self.distance_to(&(*a + ab * t))
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Tight bounds of a point set; `None` when empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Bounds::new(first.x, first.y, first.x, first.y);
        for p in iter {
            bounds.include(p);
        }
        Some(bounds)
    }

    pub fn include(&mut self, p: &Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Bounds {
        Bounds::new(self.min_x + dx, self.min_y + dy, self.max_x + dx, self.max_y + dy)
    }

    pub fn expanded(&self, amount: f64) -> Bounds {
        Bounds::new(
            self.min_x - amount,
            self.min_y - amount,
            self.max_x + amount,
            self.max_y + amount,
        )
    }

    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Penetration depth along each axis when the boxes overlap with
    /// positive area; `None` when they merely touch or are apart.
    pub fn overlap(&self, other: &Bounds) -> Option<(f64, f64)> {
        let ox = self.max_x.min(other.max_x) - self.min_x.max(other.min_x);
        let oy = self.max_y.min(other.max_y) - self.min_y.max(other.min_y);
        if ox > 0.0 && oy > 0.0 {
            Some((ox, oy))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_ops() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 6.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b - a, Point::new(3.0, 4.0));
        assert_eq!((b - a).normalized(), Point::new(0.6, 0.8));
        assert_eq!(Point::ORIGIN.normalized(), Point::ORIGIN);
    }

    #[test]
    fn test_distance_to_segment() {
        let p = Point::new(5.0, 3.0);
        assert_eq!(p.distance_to_segment(&Point::new(0.0, 0.0), &Point::new(10.0, 0.0)), 3.0);
        assert_eq!(p.distance_to_segment(&Point::new(5.0, 0.0), &Point::new(5.0, 0.0)), 3.0);
    }

    #[test]
    fn test_bounds_overlap() {
        let a = Bounds::from_rect(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::from_rect(8.0, 5.0, 10.0, 10.0);
        assert_eq!(a.overlap(&b), Some((2.0, 5.0)));
        let touching = Bounds::from_rect(10.0, 0.0, 10.0, 10.0);
        assert_eq!(a.overlap(&touching), None);
    }
}
