//! Shared 2D geometry primitives used by the mesh builder and the elevation
//! engine: points, polygon area/centroid, and box clipping.

pub const EPS: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn approx_eq(&self, other: &Point, eps: f64) -> bool {
        (self.x - other.x).abs() < eps && (self.y - other.y).abs() < eps
    }
}

/// Signed polygon area via the shoelace formula. Positive for CCW polygons.
pub fn signed_area(poly: &[Point]) -> f64 {
    if poly.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..poly.len() {
        let a = poly[i];
        let b = poly[(i + 1) % poly.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum * 0.5
}

/// Polygon centroid via the shoelace-weighted formula. Falls back to the
/// arithmetic mean of vertices for degenerate (near-zero-area) polygons.
pub fn centroid(poly: &[Point]) -> Point {
    let area = signed_area(poly);
    if area.abs() < EPS || poly.len() < 3 {
        let n = poly.len().max(1) as f64;
        let (sx, sy) = poly.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        return Point::new(sx / n, sy / n);
    }
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..poly.len() {
        let a = poly[i];
        let b = poly[(i + 1) % poly.len()];
        let cross = a.x * b.y - b.x * a.y;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }
    let factor = 1.0 / (6.0 * area);
    Point::new(cx * factor, cy * factor)
}

/// Ensures a polygon winds counter-clockwise, reversing it in place if not.
pub fn ensure_ccw(poly: &mut Vec<Point>) {
    if signed_area(poly) < 0.0 {
        poly.reverse();
    }
}

/// Circumcenter of the triangle (a, b, c), or `None` if the points are
/// (near-)collinear.
pub fn circumcenter(a: Point, b: Point, c: Point) -> Option<Point> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < EPS {
        return None;
    }
    let a2 = a.x * a.x + a.y * a.y;
    let b2 = b.x * b.x + b.y * b.y;
    let c2 = c.x * c.x + c.y * c.y;
    let ux = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
    let uy = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;
    Some(Point::new(ux, uy))
}

/// Sutherland-Hodgman clip of a convex polygon against the axis-aligned box
/// `[0, size] x [0, size]`.
pub fn clip_to_box(poly: &[Point], size: f64) -> Vec<Point> {
    if poly.is_empty() {
        return Vec::new();
    }
    let mut out = poly.to_vec();
    out = clip_edge(&out, |p| p.x >= 0.0, |p1, p2| intersect_x(p1, p2, 0.0));
    out = clip_edge(&out, |p| p.x <= size, |p1, p2| intersect_x(p1, p2, size));
    out = clip_edge(&out, |p| p.y >= 0.0, |p1, p2| intersect_y(p1, p2, 0.0));
    out = clip_edge(&out, |p| p.y <= size, |p1, p2| intersect_y(p1, p2, size));
    out
}

fn intersect_x(p1: Point, p2: Point, x: f64) -> Point {
    let t = (x - p1.x) / (p2.x - p1.x);
    Point::new(x, p1.y + t * (p2.y - p1.y))
}

fn intersect_y(p1: Point, p2: Point, y: f64) -> Point {
    let t = (y - p1.y) / (p2.y - p1.y);
    Point::new(p1.x + t * (p2.x - p1.x), y)
}

fn clip_edge(
    poly: &[Point],
    inside: impl Fn(&Point) -> bool,
    intersect: impl Fn(Point, Point) -> Point,
) -> Vec<Point> {
    if poly.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(poly.len() + 1);
    for i in 0..poly.len() {
        let curr = poly[i];
        let prev = poly[(i + poly.len() - 1) % poly.len()];
        let curr_in = inside(&curr);
        let prev_in = inside(&prev);
        if curr_in {
            if !prev_in {
                out.push(intersect(prev, curr));
            }
            out.push(curr);
        } else if prev_in {
            out.push(intersect(prev, curr));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_square_area_is_one() {
        let sq = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        assert!((signed_area(&sq) - 1.0).abs() < EPS);
    }

    #[test]
    fn centroid_of_square_is_center() {
        let sq = vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ];
        let c = centroid(&sq);
        assert!((c.x - 1.0).abs() < EPS);
        assert!((c.y - 1.0).abs() < EPS);
    }

    #[test]
    fn circumcenter_of_right_triangle() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(2.0, 0.0);
        let c = Point::new(0.0, 2.0);
        let cc = circumcenter(a, b, c).unwrap();
        assert!((cc.x - 1.0).abs() < 1e-6);
        assert!((cc.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn collinear_points_have_no_circumcenter() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        let c = Point::new(2.0, 0.0);
        assert!(circumcenter(a, b, c).is_none());
    }

    #[test]
    fn clip_box_trims_outside_polygon() {
        let poly = vec![
            Point::new(-1.0, -1.0),
            Point::new(2.0, -1.0),
            Point::new(2.0, 2.0),
            Point::new(-1.0, 2.0),
        ];
        let clipped = clip_to_box(&poly, 1.0);
        assert!((signed_area(&clipped) - 1.0).abs() < 1e-9);
    }
}
