//! Moisture diffusion and biome classification. The simplest stage
//! in the pipeline: everything upstream (elevation, flow, rivers, lakes)
//! has already done the hard work, this just blends and labels.

use std::collections::HashSet;

use crate::config::Params;
use crate::site::{Biome, Edge, Site, SiteId};

pub fn run(sites: &mut [Site], edges: &[Edge], params: &Params) {
    let river_touching: HashSet<SiteId> = edges
        .iter()
        .filter(|e| e.is_river)
        .flat_map(|e| [e.a, e.b])
        .collect();

    for site in sites.iter_mut() {
        site.moisture = if !site.is_land {
            1.0
        } else if site.is_coast || river_touching.contains(&site.id) {
            1.0
        } else {
            0.0
        };
    }

    diffuse(sites, params.moisture_diffusion);
    classify_biomes(sites, params);
}

fn diffuse(sites: &mut [Site], iterations: u32) {
    for _ in 0..iterations {
        let current: Vec<f64> = sites.iter().map(|s| s.moisture).collect();
        let mut next = current.clone();
        for site in sites.iter() {
            if !site.is_land {
                continue;
            }
            let neighbor_mean = if site.neighbors.is_empty() {
                current[site.id]
            } else {
                site.neighbors.iter().map(|&n| current[n]).sum::<f64>() / site.neighbors.len() as f64
            };
            next[site.id] = 0.7 * current[site.id] + 0.3 * neighbor_mean;
        }
        for site in sites.iter_mut() {
            if site.is_land {
                site.moisture = next[site.id];
            }
        }
    }
}

fn classify_biomes(sites: &mut [Site], params: &Params) {
    let river_threshold = params.river_threshold as f64;
    let mountain_elevation = 0.6 * params.peak_elevation;

    for site in sites.iter_mut() {
        site.biome = if !site.is_land {
            Biome::Sea
        } else if site.lake_id.is_some() {
            Biome::Lake
        } else if site.flow_accumulation >= river_threshold {
            Biome::River
        } else if site.elevation > mountain_elevation {
            Biome::Mountains
        } else if site.moisture > 0.5 {
            Biome::Woods
        } else {
            Biome::Plains
        };
    }
}
