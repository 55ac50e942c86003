use crate::model::Point;

/// Twice-halved shoelace sum in square pixels. Positive for clockwise
/// winding on screen (y down).
pub fn signed_area_px(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        sum += p.x * q.y - q.x * p.y;
    }
    sum / 2.0
}

/// Polygon area in square meters. Winding does not matter; fewer than three
/// points yield zero.
pub fn polygon_area(points: &[Point], pixels_per_meter: f64) -> f64 {
    if pixels_per_meter <= 0.0 {
        return 0.0;
    }
    signed_area_px(points).abs() / (pixels_per_meter * pixels_per_meter)
}

/// Area-weighted centroid; degenerate polygons fall back to the vertex mean.
pub fn polygon_centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ORIGIN;
    }
    let area = signed_area_px(points);
    if area.abs() < 1e-9 {
        let n = points.len() as f64;
        let sum = points.iter().fold(Point::ORIGIN, |acc, p| acc + *p);
        return Point::new(sum.x / n, sum.y / n);
    }
    let mut cx = 0.0;
    let mut cy = 0.0;
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        let f = p.x * q.y - q.x * p.y;
        cx += (p.x + q.x) * f;
        cy += (p.y + q.y) * f;
    }
    Point::new(cx / (6.0 * area), cy / (6.0 * area))
}

/// Even-odd ray casting test.
pub fn point_in_polygon(p: &Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (&polygon[i], &polygon[j]);
        if ((pi.y > p.y) != (pj.y > p.y))
            && (p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}
