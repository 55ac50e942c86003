use std::f64::consts::PI;

use super::fmt_coord;
use crate::model::{Bounds, Point};

/// One drawing command in absolute world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo {
        ctrl: Point,
        to: Point,
    },
    CubicTo {
        c1: Point,
        c2: Point,
        to: Point,
    },
    /// Circular arc from the current point. `center` is kept so the arc can
    /// be sampled without re-deriving it from the SVG flags.
    ArcTo {
        radius: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
        center: Point,
    },
    Close,
}

/// A path shared by the live view and every exporter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    pub commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn move_to(&mut self, p: Point) {
        self.commands.push(PathCommand::MoveTo(p));
    }

    pub fn line_to(&mut self, p: Point) {
        self.commands.push(PathCommand::LineTo(p));
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    /// Straight-edged polygon; closed when `closed` is set.
    pub fn polyline(points: &[Point], closed: bool) -> Self {
        let mut path = PathData::new();
        if let Some((first, rest)) = points.split_first() {
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
            if closed && points.len() > 2 {
                path.close();
            }
        }
        path
    }

    /// SVG `d` attribute.
    pub fn to_svg(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(self.commands.len());
        for cmd in &self.commands {
            let part = match cmd {
                PathCommand::MoveTo(p) => format!("M {} {}", fmt_coord(p.x), fmt_coord(p.y)),
                PathCommand::LineTo(p) => format!("L {} {}", fmt_coord(p.x), fmt_coord(p.y)),
                PathCommand::QuadTo { ctrl, to } => format!(
                    "Q {} {} {} {}",
                    fmt_coord(ctrl.x),
                    fmt_coord(ctrl.y),
                    fmt_coord(to.x),
                    fmt_coord(to.y)
                ),
                PathCommand::CubicTo { c1, c2, to } => format!(
                    "C {} {} {} {} {} {}",
                    fmt_coord(c1.x),
                    fmt_coord(c1.y),
                    fmt_coord(c2.x),
                    fmt_coord(c2.y),
                    fmt_coord(to.x),
                    fmt_coord(to.y)
                ),
                PathCommand::ArcTo {
                    radius,
                    large_arc,
                    sweep,
                    to,
                    ..
                } => format!(
                    "A {r} {r} 0 {} {} {} {}",
                    u8::from(*large_arc),
                    u8::from(*sweep),
                    fmt_coord(to.x),
                    fmt_coord(to.y),
                    r = fmt_coord(*radius)
                ),
                PathCommand::Close => "Z".to_string(),
            };
            parts.push(part);
        }
        parts.join(" ")
    }

    pub fn translated(&self, dx: f64, dy: f64) -> PathData {
        let d = Point::new(dx, dy);
        let commands = self
            .commands
            .iter()
            .map(|cmd| match *cmd {
                PathCommand::MoveTo(p) => PathCommand::MoveTo(p + d),
                PathCommand::LineTo(p) => PathCommand::LineTo(p + d),
                PathCommand::QuadTo { ctrl, to } => PathCommand::QuadTo {
                    ctrl: ctrl + d,
                    to: to + d,
                },
                PathCommand::CubicTo { c1, c2, to } => PathCommand::CubicTo {
                    c1: c1 + d,
                    c2: c2 + d,
                    to: to + d,
                },
                PathCommand::ArcTo {
                    radius,
                    large_arc,
                    sweep,
                    to,
                    center,
                } => PathCommand::ArcTo {
                    radius,
                    large_arc,
                    sweep,
                    to: to + d,
                    center: center + d,
                },
                PathCommand::Close => PathCommand::Close,
            })
            .collect();
        PathData { commands }
    }

    /// Samples the path into straight segments, `samples` points per curve.
    ///
    /// A trailing point that coincides with the first one is dropped so a
    /// closed outline yields each vertex exactly once.
    pub fn flatten(&self, samples: usize) -> Vec<Point> {
        let samples = samples.max(1);
        let mut out: Vec<Point> = Vec::new();
        let mut current = Point::ORIGIN;

        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => {
                    out.push(p);
                    current = p;
                }
                PathCommand::QuadTo { ctrl, to } => {
                    for k in 1..=samples {
                        let t = k as f64 / samples as f64;
                        let mt = 1.0 - t;
                        out.push(current * (mt * mt) + ctrl * (2.0 * mt * t) + to * (t * t));
                    }
                    current = to;
                }
                PathCommand::CubicTo { c1, c2, to } => {
                    for k in 1..=samples {
                        let t = k as f64 / samples as f64;
                        let mt = 1.0 - t;
                        out.push(
                            current * (mt * mt * mt)
                                + c1 * (3.0 * mt * mt * t)
                                + c2 * (3.0 * mt * t * t)
                                + to * (t * t * t),
                        );
                    }
                    current = to;
                }
                PathCommand::ArcTo {
                    radius,
                    sweep,
                    to,
                    center,
                    ..
                } => {
                    let a0 = (current.y - center.y).atan2(current.x - center.x);
                    let delta = arc_delta(a0, (to.y - center.y).atan2(to.x - center.x), sweep);
                    for k in 1..samples {
                        let a = a0 + delta * k as f64 / samples as f64;
                        out.push(Point::new(center.x + radius * a.cos(), center.y + radius * a.sin()));
                    }
                    out.push(to);
                    current = to;
                }
                PathCommand::Close => {}
            }
        }

        if out.len() > 1 {
            if let (Some(first), Some(last)) = (out.first(), out.last()) {
                if first.distance_to(last) < 1e-9 {
                    out.pop();
                }
            }
        }
        out
    }

    /// Bounds of the sampled path.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.flatten(8))
    }
}

/// Signed angular travel from `from` to `to` in the sweep's direction.
fn arc_delta(from: f64, to: f64, sweep: bool) -> f64 {
    let mut delta = to - from;
    if sweep {
        while delta <= 0.0 {
            delta += 2.0 * PI;
        }
    } else {
        while delta >= 0.0 {
            delta -= 2.0 * PI;
        }
    }
    delta
}

/// Closed polygon whose corners are replaced by quadratic fillets.
///
/// Each corner is cut back by `min(radius, half of either adjacent edge)`
/// so fillets never cross an edge midpoint. A non-positive radius or fewer
/// than three points produces straight edges.
pub fn rounded_polygon_path(points: &[Point], radius: f64) -> PathData {
    let n = points.len();
    if n < 3 || radius <= 0.0 {
        return PathData::polyline(points, true);
    }

    let corner = |i: usize| {
        let v = points[i];
        let prev = points[(i + n - 1) % n];
        let next = points[(i + 1) % n];
        let r = radius
            .min(v.distance_to(&prev) / 2.0)
            .min(v.distance_to(&next) / 2.0);
        let entry = v + (prev - v).normalized() * r;
        let exit = v + (next - v).normalized() * r;
        (entry, v, exit)
    };

    let mut path = PathData::new();
    let (_, _, start) = corner(0);
    path.move_to(start);
    for i in (1..n).chain(std::iter::once(0)) {
        let (entry, v, exit) = corner(i);
        path.line_to(entry);
        path.commands.push(PathCommand::QuadTo { ctrl: v, to: exit });
    }
    path.close();
    path
}

/// Smooth closed curve through every vertex (Catmull-Rom as cubic Beziers).
pub fn bubble_outline(points: &[Point]) -> PathData {
    let n = points.len();
    if n < 3 {
        return PathData::polyline(points, true);
    }

    let mut path = PathData::new();
    path.move_to(points[0]);
    for i in 0..n {
        let p_prev = points[(i + n - 1) % n];
        let p = points[i];
        let p_next = points[(i + 1) % n];
        let p_next2 = points[(i + 2) % n];
        let c1 = p + (p_next - p_prev) * (1.0 / 6.0);
        let c2 = p_next - (p_next2 - p) * (1.0 / 6.0);
        path.commands.push(PathCommand::CubicTo { c1, c2, to: p_next });
    }
    path.close();
    path
}

/// Circular arc from `p1` through `p2` to `p3`.
///
/// Near-collinear input degrades to the straight segment `p1`-`p3`.
pub fn three_point_arc(p1: Point, p2: Point, p3: Point) -> PathData {
    let d = 2.0 * (p1.x * (p2.y - p3.y) + p2.x * (p3.y - p1.y) + p3.x * (p1.y - p2.y));
    let mut path = PathData::new();
    path.move_to(p1);
    if d.abs() < 1e-6 {
        path.line_to(p3);
        return path;
    }

    let s1 = p1.x * p1.x + p1.y * p1.y;
    let s2 = p2.x * p2.x + p2.y * p2.y;
    let s3 = p3.x * p3.x + p3.y * p3.y;
    let center = Point::new(
        (s1 * (p2.y - p3.y) + s2 * (p3.y - p1.y) + s3 * (p1.y - p2.y)) / d,
        (s1 * (p3.x - p2.x) + s2 * (p1.x - p3.x) + s3 * (p2.x - p1.x)) / d,
    );
    let radius = center.distance_to(&p1);

    let sweep = (p2 - p1).cross(&(p3 - p2)) > 0.0;
    let a1 = (p1.y - center.y).atan2(p1.x - center.x);
    let a3 = (p3.y - center.y).atan2(p3.x - center.x);
    let delta = arc_delta(a1, a3, sweep);

    path.commands.push(PathCommand::ArcTo {
        radius,
        large_arc: delta.abs() > PI,
        sweep,
        to: p3,
        center,
    });
    path
}
