//! Lloyd relaxation: repeatedly replace each site with its Voronoi
//! cell's centroid, producing a more even, centroidal distribution.

use crate::geometry::{centroid, signed_area, Point, EPS};
use crate::mesh::{delaunay, voronoi};

/// Runs `iterations` relaxation passes over `points` within `[0,size]^2`.
/// Degenerate (near-zero-area) polygons keep their previous site rather
/// than snapping to an unstable centroid.
pub fn relax(mut points: Vec<Point>, size: f64, iterations: u32) -> Vec<Point> {
    for _ in 0..iterations {
        if points.len() < 3 {
            break;
        }
        let triangles = delaunay::triangulate(&points);
        let result = voronoi::build(&points, &triangles, size);
        points = points
            .iter()
            .zip(result.polygons.iter())
            .map(|(p, poly)| {
                if poly.len() < 3 || signed_area(poly).abs() < EPS {
                    *p
                } else {
                    centroid(poly)
                }
            })
            .collect();
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relaxation_keeps_point_count() {
        let pts = vec![
            Point::new(1.0, 1.0),
            Point::new(9.0, 1.0),
            Point::new(9.0, 9.0),
            Point::new(1.0, 9.0),
            Point::new(3.0, 7.0),
            Point::new(7.0, 3.0),
        ];
        let relaxed = relax(pts.clone(), 10.0, 2);
        assert_eq!(relaxed.len(), pts.len());
    }

    #[test]
    fn zero_iterations_is_identity() {
        let pts = vec![Point::new(2.0, 2.0), Point::new(8.0, 2.0), Point::new(5.0, 8.0)];
        let relaxed = relax(pts.clone(), 10.0, 0);
        assert_eq!(relaxed, pts);
    }

    #[test]
    fn points_stay_within_bounds_after_relaxation() {
        let pts = vec![
            Point::new(1.0, 1.0),
            Point::new(19.0, 1.0),
            Point::new(19.0, 19.0),
            Point::new(1.0, 19.0),
            Point::new(10.0, 10.0),
            Point::new(5.0, 15.0),
        ];
        let relaxed = relax(pts, 20.0, 3);
        for p in relaxed {
            assert!(p.x >= -1e-6 && p.x <= 20.0 + 1e-6);
            assert!(p.y >= -1e-6 && p.y <= 20.0 + 1e-6);
        }
    }
}
