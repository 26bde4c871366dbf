pub mod climate;
pub mod config;
pub mod containers;
pub mod elevation;
pub mod error;
pub mod external;
pub mod flood;
pub mod flow;
pub mod generator;
pub mod geometry;
pub mod mesh;
pub mod noise;
pub mod rng;
pub mod sampler;
pub mod site;
pub mod snapshot;
pub mod transport;

pub use config::Params;
pub use error::{ConfigError, GenerationError};
pub use generator::{Generator, Stage, Timing};
pub use snapshot::{Bounds, Snapshot};

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::config::Params;
    use crate::generator::Generator;
    use crate::transport::{self, CrossingStatus, RoadClass};

    fn small_params(seed: u64) -> Params {
        let mut params = Params::default();
        params.seed = seed;
        params.map_size = 250.0;
        params.voronoi_cell_count = 200;
        params.voronoi_relaxation = 1;
        params
    }

    /// same seed, same params, always the same world.
    #[test]
    fn determinism_across_independent_runs() {
        let generator = Generator::new();
        let params = small_params(123);
        let (a, _) = generator.generate(&params, |_, _| {}, None).unwrap();
        let (b, _) = generator.generate(&params, |_, _| {}, None).unwrap();
        let a_json = serde_json::to_string(&a).unwrap();
        let b_json = serde_json::to_string(&b).unwrap();
        assert_eq!(a_json, b_json);
    }

    /// neighbor relationships are symmetric across the whole mesh.
    #[test]
    fn neighbor_relationships_are_symmetric() {
        let generator = Generator::new();
        let params = small_params(7);
        let (snapshot, _) = generator.generate(&params, |_, _| {}, None).unwrap();
        for site in &snapshot.cells {
            for &nb in &site.neighbors {
                assert!(snapshot.cells[nb].neighbors.contains(&site.id));
            }
        }
    }

    /// every coastal site is land with at least one sea neighbor.
    #[test]
    fn coastal_sites_are_consistent() {
        let generator = Generator::new();
        let params = small_params(9);
        let (snapshot, _) = generator.generate(&params, |_, _| {}, None).unwrap();
        for site in &snapshot.cells {
            if site.is_coast {
                assert!(site.is_land);
                assert!(site.neighbors.iter().any(|&n| !snapshot.cells[n].is_land));
            }
        }
    }

    /// land elevation is non-negative, sea elevation is negative.
    #[test]
    fn elevation_sign_matches_land_sea() {
        let generator = Generator::new();
        let params = small_params(11);
        let (snapshot, _) = generator.generate(&params, |_, _| {}, None).unwrap();
        for site in &snapshot.cells {
            if site.is_land {
                assert!(site.elevation >= 1.0);
            } else {
                assert!(site.elevation < 0.0);
            }
        }
    }

    /// Priority-Flood never lowers terrain.
    #[test]
    fn filled_elevation_is_never_below_terrain() {
        let generator = Generator::new();
        let params = small_params(13);
        let (snapshot, _) = generator.generate(&params, |_, _| {}, None).unwrap();
        for site in &snapshot.cells {
            if site.is_land {
                assert!(site.filled_elevation >= site.elevation - 1e-9);
            }
        }
    }

    /// at least 95% of land sites reach the sea (directly or via a lake
    /// outlet) within a bounded number of hops — the rest may be endorheic.
    #[test]
    fn most_land_drains_to_the_sea() {
        let generator = Generator::new();
        let params = small_params(17);
        let (snapshot, _) = generator.generate(&params, |_, _| {}, None).unwrap();
        let land: Vec<_> = snapshot.cells.iter().filter(|s| s.is_land).collect();
        let mut drains = 0;
        for site in &land {
            let mut cur = site.id;
            let mut hops = 0;
            loop {
                if !snapshot.cells[cur].is_land {
                    drains += 1;
                    break;
                }
                match snapshot.cells[cur].flows_to {
                    Some(next) => {
                        cur = next;
                        hops += 1;
                        if hops > snapshot.cells.len() {
                            break;
                        }
                    }
                    None => break,
                }
            }
        }
        let ratio = drains as f64 / land.len().max(1) as f64;
        assert!(ratio >= 0.95, "only {:.2} of land drains to the sea", ratio);
    }

    /// flow accumulation is always at least the site's own contribution.
    #[test]
    fn flow_accumulation_is_at_least_one() {
        let generator = Generator::new();
        let params = small_params(19);
        let (snapshot, _) = generator.generate(&params, |_, _| {}, None).unwrap();
        for site in &snapshot.cells {
            if site.is_land {
                assert!(site.flow_accumulation >= 1.0);
            }
        }
    }

    /// every lake member carries the same lake id and water level.
    #[test]
    fn lakes_are_internally_coherent() {
        let generator = Generator::new();
        let params = small_params(23);
        let (snapshot, _) = generator.generate(&params, |_, _| {}, None).unwrap();
        for lake in &snapshot.lakes {
            for &m in &lake.members {
                assert_eq!(snapshot.cells[m].lake_id, Some(lake.id));
            }
        }
    }

    /// at most one transport edge per unordered site pair.
    #[test]
    fn transport_edges_are_unique_per_pair() {
        let generator = Generator::new();
        let params = small_params(29);
        let (snapshot, _) = generator.generate(&params, |_, _| {}, None).unwrap();
        let mut seen = HashSet::new();
        for edge in &snapshot.transport.edges {
            assert!(seen.insert((edge.a, edge.b)));
        }
    }

    /// upgrading a road class never raises its cost multiplier.
    #[test]
    fn road_class_upgrades_never_increase_cost_multiplier() {
        assert!(RoadClass::Trail.multiplier() <= RoadClass::None.multiplier());
        assert!(RoadClass::Road.multiplier() <= RoadClass::Trail.multiplier());
        assert!(RoadClass::Turnpike.multiplier() <= RoadClass::Road.multiplier());
    }

    /// A* never returns a path costed below the straight-line distance.
    #[test]
    fn pathfinding_is_admissible() {
        let generator = Generator::new();
        let params = small_params(31);
        let (snapshot, _) = generator.generate(&params, |_, _| {}, None).unwrap();
        if let Some(a) = snapshot.cells.iter().find(|s| s.is_land) {
            if let Some(b) = snapshot.cells.iter().rev().find(|s| s.is_land) {
                let path = transport::find_path(&snapshot.transport, &snapshot.cells, a.id, b.id);
                if path.success {
                    let straight = a.centroid.distance(&b.centroid);
                    assert!(path.total_cost >= straight - 1e-6);
                }
            }
        }
    }

    /// a found path's edges form a contiguous walk between endpoints.
    #[test]
    fn found_paths_are_contiguous() {
        let generator = Generator::new();
        let params = small_params(37);
        let (snapshot, _) = generator.generate(&params, |_, _| {}, None).unwrap();
        if let Some(a) = snapshot.cells.iter().find(|s| s.is_land) {
            if let Some(b) = snapshot.cells.iter().rev().find(|s| s.is_land && s.id != a.id) {
                let path = transport::find_path(&snapshot.transport, &snapshot.cells, a.id, b.id);
                if path.success {
                    assert_eq!(*path.path.first().unwrap(), a.id);
                    assert_eq!(*path.path.last().unwrap(), b.id);
                    for w in path.path.windows(2) {
                        assert!(snapshot.cells[w[0]].neighbors.contains(&w[1]));
                    }
                }
            }
        }
    }

    /// re-processing upgrades without new usage changes nothing.
    #[test]
    fn upgrade_processing_is_idempotent() {
        let generator = Generator::new();
        let params = small_params(41);
        let (mut snapshot, _) = generator.generate(&params, |_, _| {}, None).unwrap();
        if let Some(a) = snapshot.cells.iter().find(|s| s.is_land) {
            if let Some(b) = snapshot.cells.iter().rev().find(|s| s.is_land && s.id != a.id) {
                let path = transport::find_path(&snapshot.transport, &snapshot.cells, a.id, b.id);
                if path.success {
                    generator.record_and_upgrade(&mut snapshot.transport, &path, 1000.0, &params);
                    let second = generator.record_and_upgrade(&mut snapshot.transport, &path, 0.0, &params);
                    assert!(second.is_empty());
                }
            }
        }
    }

    /// a snapshot survives a JSON round trip through the transport
    /// network's skipped index fields.
    #[test]
    fn snapshot_round_trips_through_json() {
        let generator = Generator::new();
        let params = small_params(43);
        let (snapshot, _) = generator.generate(&params, |_, _| {}, None).unwrap();
        let json = serde_json::to_string(&snapshot).unwrap();
        let mut restored: crate::snapshot::Snapshot = serde_json::from_str(&json).unwrap();
        restored.rebuild_transport_index();
        assert_eq!(restored.cells.len(), snapshot.cells.len());
        for edge in &snapshot.transport.edges {
            assert_eq!(restored.transport.edge_between(edge.a, edge.b), Some(edge.id));
        }
    }

    /// crossing status never regresses once a river crossing upgrades.
    #[test]
    fn crossing_status_is_monotone_under_repeated_usage() {
        let generator = Generator::new();
        let mut params = small_params(53);
        params.network.trail_threshold = 1.0;
        params.network.bridge_threshold = 2.0;
        params.network.max_bridge_width = f64::INFINITY;
        let (mut snapshot, _) = generator.generate(&params, |_, _| {}, None).unwrap();
        if let Some(crossing) = snapshot.transport.crossings.first() {
            let edge_id = crossing.edge_id;
            let edge = snapshot.transport.edges[edge_id].clone();
            let path = transport::PathResult {
                success: true,
                path: vec![edge.a, edge.b],
                total_cost: edge.current_cost,
                edges: vec![edge_id],
                crossings: vec![crossing.id],
            };
            transport::record_usage(&mut snapshot.transport, &path, 5.0);
            transport::process_upgrades(&mut snapshot.transport, &params.network);
            transport::record_usage(&mut snapshot.transport, &path, 5.0);
            transport::process_upgrades(&mut snapshot.transport, &params.network);
            let status = snapshot.transport.crossings[crossing.id].status;
            assert!(matches!(status, CrossingStatus::Ferry | CrossingStatus::Bridge));
        }
    }
}
