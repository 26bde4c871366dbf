//! Pipeline orchestration: seeds the site graph, runs each
//! terrain/hydrology/climate/transport stage in sequence, and reports
//! per-stage timing the way the teacher's top-level `generate` does.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::config::Params;
use crate::error::GenerationError;
use crate::mesh::build_mesh;
use crate::rng::Rng;
use crate::sampler::poisson_disk;
use crate::site::Site;
use crate::snapshot::{Bounds, Snapshot};
use crate::transport::{self, PathResult, TransportNetwork, Upgrade};
use crate::{climate, elevation, flood, flow};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Mesh,
    Terrain,
    Hydrology,
    Climate,
    Network,
    Serialization,
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

#[derive(Default)]
pub struct Generator;

impl Generator {
    pub fn new() -> Self {
        Self
    }

    /// Runs the full pipeline against `params`, reporting progress through
    /// `progress(stage, fraction)` and checking `cancel` at every stage
    /// boundary. Configuration errors surface before any stage runs; a
    /// cancellation mid-pipeline yields `GenerationError::Cancelled`.
    pub fn generate(
        &self,
        params: &Params,
        mut progress: impl FnMut(Stage, f32),
        cancel: Option<&AtomicBool>,
    ) -> Result<(Snapshot, Vec<Timing>), GenerationError> {
        params.validate()?;

        let mut timings = Vec::new();
        let total_start = Instant::now();
        let check_cancel = |cancel: Option<&AtomicBool>| -> Result<(), GenerationError> {
            if cancel.map(|c| c.load(Ordering::Relaxed)).unwrap_or(false) {
                return Err(GenerationError::Cancelled);
            }
            Ok(())
        };

        let mut rng = Rng::new(params.seed);

        log::info!("generating world: seed={} map_size={}", params.seed, params.map_size);

        // 1. Site mesh: Poisson-disk sample, Delaunay/Voronoi, Lloyd-relaxed.
        let t = Instant::now();
        let points = poisson_disk(params.map_size, params.voronoi_cell_count, &mut rng);
        let mesh = build_mesh(points, params.map_size, params.voronoi_relaxation);
        let mut sites: Vec<Site> = mesh
            .into_iter()
            .enumerate()
            .map(|(id, m)| Site::new(id, m.centroid, m.polygon, m.neighbors))
            .collect();
        timings.push(Timing { name: "mesh", ms: t.elapsed().as_secs_f64() * 1000.0 });
        progress(Stage::Mesh, 0.15);
        check_cancel(cancel)?;

        // 2. Island mask, distance fields, ridges, elevation.
        let t = Instant::now();
        let stats = elevation::run(&mut sites, params.map_size, params, &mut rng);
        log::debug!("terrain: {} land sites, {} ridge sites", stats.land_count, stats.ridge_count);
        timings.push(Timing { name: "terrain", ms: t.elapsed().as_secs_f64() * 1000.0 });
        progress(Stage::Terrain, 0.4);
        check_cancel(cancel)?;

        // 3. Priority-Flood depression filling, lake identification, flow
        // routing/accumulation, river-edge extraction.
        let t = Instant::now();
        let lakes = if params.fill_spill_enabled {
            flood::run(&mut sites, params)
        } else {
            for site in sites.iter_mut() {
                if site.is_land {
                    site.filled_elevation = site.elevation;
                }
            }
            Vec::new()
        };
        flow::route(&mut sites, &lakes);
        flow::accumulate(&mut sites);
        let edges = flow::extract_edges(&sites, params.river_threshold);
        log::debug!("hydrology: {} lakes, {} edges", lakes.len(), edges.len());
        timings.push(Timing { name: "hydrology", ms: t.elapsed().as_secs_f64() * 1000.0 });
        progress(Stage::Hydrology, 0.65);
        check_cancel(cancel)?;

        // 4. Moisture diffusion, biome classification.
        let t = Instant::now();
        climate::run(&mut sites, &edges, params);
        timings.push(Timing { name: "climate", ms: t.elapsed().as_secs_f64() * 1000.0 });
        progress(Stage::Climate, 0.8);
        check_cancel(cancel)?;

        // 5. Transport graph.
        let t = Instant::now();
        let network = transport::build(&sites, &edges, &params.network);
        timings.push(Timing { name: "network", ms: t.elapsed().as_secs_f64() * 1000.0 });
        progress(Stage::Network, 0.95);
        check_cancel(cancel)?;

        // 6. Assemble the snapshot.
        let t = Instant::now();
        let rivers: Vec<_> = edges.iter().filter(|e| e.is_river).cloned().collect();
        let snapshot = Snapshot {
            cells: sites,
            edges,
            rivers,
            bounds: Bounds { width: params.map_size, height: params.map_size },
            lakes,
            transport: network,
        };
        timings.push(Timing { name: "serialize", ms: t.elapsed().as_secs_f64() * 1000.0 });
        progress(Stage::Serialization, 1.0);

        let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        timings.push(Timing { name: "TOTAL", ms: total_ms });
        log::info!("generation complete in {:.1}ms", total_ms);

        Ok((snapshot, timings))
    }

    /// Finds a least-cost path through an existing transport network.
    pub fn find_path(&self, snapshot: &Snapshot, from: usize, to: usize) -> PathResult {
        transport::find_path(&snapshot.transport, &snapshot.cells, from, to)
    }

    /// Records usage along a found path, then advances any edge/crossing
    /// whose usage crossed a class or status threshold.
    pub fn record_and_upgrade(
        &self,
        network: &mut TransportNetwork,
        path: &PathResult,
        amount: f64,
        params: &Params,
    ) -> Vec<Upgrade> {
        transport::record_usage(network, path, amount);
        transport::process_upgrades(network, &params.network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> Params {
        let mut params = Params::default();
        params.map_size = 200.0;
        params.voronoi_cell_count = 150;
        params.voronoi_relaxation = 1;
        params
    }

    #[test]
    fn generates_a_complete_snapshot() {
        let generator = Generator::new();
        let params = small_params();
        let (snapshot, timings) = generator.generate(&params, |_, _| {}, None).unwrap();
        assert_eq!(snapshot.cells.len(), snapshot.cells.iter().map(|s| s.id).max().unwrap() + 1);
        assert!(snapshot.transport.edges.len() > 0);
        assert!(timings.iter().any(|t| t.name == "TOTAL"));
    }

    #[test]
    fn same_seed_is_deterministic() {
        let generator = Generator::new();
        let params = small_params();
        let (a, _) = generator.generate(&params, |_, _| {}, None).unwrap();
        let (b, _) = generator.generate(&params, |_, _| {}, None).unwrap();
        assert_eq!(a.cells.len(), b.cells.len());
        for (sa, sb) in a.cells.iter().zip(b.cells.iter()) {
            assert_eq!(sa.is_land, sb.is_land);
            assert!((sa.elevation - sb.elevation).abs() < 1e-9);
        }
    }

    #[test]
    fn invalid_params_reject_before_any_stage_runs() {
        let generator = Generator::new();
        let mut params = small_params();
        params.land_fraction = 5.0;
        let result = generator.generate(&params, |_, _| {}, None);
        assert!(matches!(result, Err(GenerationError::Config(_))));
    }

    #[test]
    fn cancellation_is_observed() {
        let generator = Generator::new();
        let params = small_params();
        let cancel = AtomicBool::new(true);
        let result = generator.generate(&params, |_, _| {}, Some(&cancel));
        assert!(matches!(result, Err(GenerationError::Cancelled)));
    }
}
