//! Mesh construction: Poisson-disk sites are Delaunay-triangulated,
//! their Voronoi dual extracted, and Lloyd-relaxed before the final diagram
//! is handed to the elevation engine.

pub mod delaunay;
pub mod lloyd;
pub mod voronoi;

use crate::geometry::Point;

/// One site's final geometry after relaxation: its centroid, CCW polygon
/// (closing vertex omitted), and neighbor site ids.
pub struct MeshSite {
    pub centroid: Point,
    pub polygon: Vec<Point>,
    pub neighbors: Vec<usize>,
}

/// Builds the final relaxed Voronoi mesh over `[0,size]^2` from the raw
/// sample points, running `relaxation_iters` Lloyd passes first and then a
/// final triangulation/extraction pass at the relaxed positions.
pub fn build_mesh(points: Vec<Point>, size: f64, relaxation_iters: u32) -> Vec<MeshSite> {
    let relaxed = lloyd::relax(points, size, relaxation_iters);
    let triangles = delaunay::triangulate(&relaxed);
    let result = voronoi::build(&relaxed, &triangles, size);

    relaxed
        .into_iter()
        .zip(result.polygons)
        .zip(result.neighbors)
        .map(|((centroid, polygon), neighbors)| MeshSite { centroid, polygon, neighbors })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_one_site_per_input_point() {
        let pts = vec![
            Point::new(5.0, 5.0),
            Point::new(15.0, 5.0),
            Point::new(15.0, 15.0),
            Point::new(5.0, 15.0),
            Point::new(10.0, 10.0),
        ];
        let mesh = build_mesh(pts.clone(), 20.0, 1);
        assert_eq!(mesh.len(), pts.len());
        for site in &mesh {
            assert!(site.polygon.len() >= 3);
        }
    }

    #[test]
    fn neighbor_ids_are_in_range() {
        let pts = vec![
            Point::new(2.0, 2.0),
            Point::new(18.0, 2.0),
            Point::new(18.0, 18.0),
            Point::new(2.0, 18.0),
            Point::new(10.0, 10.0),
            Point::new(6.0, 14.0),
        ];
        let n = pts.len();
        let mesh = build_mesh(pts, 20.0, 2);
        for site in &mesh {
            for &nb in &site.neighbors {
                assert!(nb < n);
            }
        }
    }
}
