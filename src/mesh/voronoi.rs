//! Dual Voronoi extraction from a Delaunay triangulation: for each
//! site, its cell polygon is the sequence of circumcenters of its incident
//! triangles, wound around the site and clipped to the map's bounding box.

use std::collections::BTreeSet;

use crate::geometry::{centroid, circumcenter, clip_to_box, Point};

pub struct VoronoiResult {
    /// CCW polygon per site, already clipped to `[0,size]^2`.
    pub polygons: Vec<Vec<Point>>,
    /// Neighbor site ids per site, derived from shared triangle edges.
    pub neighbors: Vec<Vec<usize>>,
}

pub fn build(points: &[Point], triangles: &[[usize; 3]], size: f64) -> VoronoiResult {
    let n = points.len();
    let circumcenters: Vec<Point> = triangles
        .iter()
        .map(|t| {
            circumcenter(points[t[0]], points[t[1]], points[t[2]])
                .unwrap_or_else(|| centroid(&[points[t[0]], points[t[1]], points[t[2]]]))
        })
        .collect();

    let mut incident: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut neighbor_sets: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
    for (ti, tri) in triangles.iter().enumerate() {
        for &v in tri {
            incident[v].push(ti);
        }
        for &(a, b) in &[(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            neighbor_sets[a].insert(b);
            neighbor_sets[b].insert(a);
        }
    }

    let mut polygons = Vec::with_capacity(n);
    for i in 0..n {
        let center = points[i];
        let mut verts: Vec<Point> = incident[i].iter().map(|&ti| circumcenters[ti]).collect();
        verts.sort_by(|a, b| {
            let angle_a = (a.y - center.y).atan2(a.x - center.x);
            let angle_b = (b.y - center.y).atan2(b.x - center.x);
            angle_a.partial_cmp(&angle_b).unwrap()
        });
        verts.dedup_by(|a, b| a.approx_eq(b, 1e-9));
        polygons.push(clip_to_box(&verts, size));
    }

    let neighbors = neighbor_sets.into_iter().map(|s| s.into_iter().collect()).collect();
    VoronoiResult { polygons, neighbors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::delaunay::triangulate;

    #[test]
    fn neighbors_are_symmetric() {
        let pts = vec![
            Point::new(10.0, 10.0),
            Point::new(30.0, 10.0),
            Point::new(30.0, 30.0),
            Point::new(10.0, 30.0),
            Point::new(20.0, 20.0),
        ];
        let tris = triangulate(&pts);
        let result = build(&pts, &tris, 40.0);
        for (a, neighs) in result.neighbors.iter().enumerate() {
            for &b in neighs {
                assert!(result.neighbors[b].contains(&a));
            }
        }
    }

    #[test]
    fn every_site_has_a_polygon() {
        let pts = vec![
            Point::new(5.0, 5.0),
            Point::new(15.0, 5.0),
            Point::new(15.0, 15.0),
            Point::new(5.0, 15.0),
        ];
        let tris = triangulate(&pts);
        let result = build(&pts, &tris, 20.0);
        assert_eq!(result.polygons.len(), pts.len());
    }
}
