//! Island mask, distance fields, ridge routing and per-site elevation.
//! Elevation here is driven by two signed distance fields
//! (from coast, from the nearest ridge) rather than plate boundaries —
//! this crate has no plate model, it works directly on the site graph.

use std::collections::VecDeque;

use rayon::prelude::*;

use crate::config::Params;
use crate::containers::IndexedPriorityQueue;
use crate::noise::fbm;
use crate::rng::{seed_u32, Rng};
use crate::site::{Site, SiteId};

const SALT_ISLAND: u64 = 0xC0A5_7FAD_1E51_1A1D;
const SALT_HILL: u64 = 0xBA5E_E1EF_DEAD_CAFE;

/// Cardinalities reported back to the generator's progress/log stage.
pub struct ElevationStats {
    pub land_count: usize,
    pub ridge_count: usize,
}

/// Runs the island mask, distance fields, ridge routing and elevation
/// assignment in sequence, mutating `sites` in place.
pub fn run(sites: &mut [Site], map_size: f64, params: &Params, rng: &mut Rng) -> ElevationStats {
    let island_seed = seed_u32(params.seed, SALT_ISLAND);
    let hill_seed = seed_u32(params.seed, SALT_HILL);

    label_island(sites, map_size, params, island_seed);
    mark_coast(sites);

    let dist_from_coast = bfs_all_neighbors(sites, |s| !s.is_land);
    let ridge_set = select_ridges(sites, &dist_from_coast, map_size, params, rng);
    let dist_from_peak = bfs_land_only(sites, |id| ridge_set.contains(&id));

    assign_elevation(sites, &dist_from_coast, &dist_from_peak, map_size, params, hill_seed);

    ElevationStats {
        land_count: sites.iter().filter(|s| s.is_land).count(),
        ridge_count: ridge_set.len(),
    }
}

fn label_island(sites: &mut [Site], map_size: f64, params: &Params, island_seed: u32) {
    let center = map_size / 2.0;
    let r0 = 0.3 + 0.7 * params.land_fraction;
    let scale = params.island_noise_scale;

    sites.par_iter_mut().for_each(|site| {
        let dx = site.centroid.x - center;
        let dy = site.centroid.y - center;
        let d = (dx * dx + dy * dy).sqrt() / center.max(1e-9);
        let angle = dy.atan2(dx);
        let noise = fbm(angle.cos() / scale.max(1e-9), angle.sin() / scale.max(1e-9), island_seed, params.island_noise_octaves) * 0.15;

        site.is_land = d < r0 + noise;
        site.elevation = if site.is_land { 0.0 } else { -1.0 };
        site.filled_elevation = site.elevation;
    });
}

fn mark_coast(sites: &mut [Site]) {
    let is_land: Vec<bool> = sites.iter().map(|s| s.is_land).collect();
    for site in sites.iter_mut() {
        site.is_coast = site.is_land && site.neighbors.iter().any(|&n| !is_land[n]);
    }
}

/// BFS distance from every site matching `is_source`, stepping through any
/// neighbor regardless of land/sea.
fn bfs_all_neighbors(sites: &[Site], is_source: impl Fn(&Site) -> bool) -> Vec<u32> {
    let n = sites.len();
    let mut dist = vec![u32::MAX; n];
    let mut queue = VecDeque::new();
    for site in sites {
        if is_source(site) {
            dist[site.id] = 0;
            queue.push_back(site.id);
        }
    }
    while let Some(cur) = queue.pop_front() {
        let d = dist[cur];
        for &nb in &sites[cur].neighbors {
            if dist[nb] == u32::MAX {
                dist[nb] = d + 1;
                queue.push_back(nb);
            }
        }
    }
    dist
}

/// BFS distance from every site matching `is_source`, stepping only through
/// land neighbors.
fn bfs_land_only(sites: &[Site], is_source: impl Fn(SiteId) -> bool) -> Vec<u32> {
    let n = sites.len();
    let mut dist = vec![u32::MAX; n];
    let mut queue = VecDeque::new();
    for site in sites {
        if site.is_land && is_source(site.id) {
            dist[site.id] = 0;
            queue.push_back(site.id);
        }
    }
    while let Some(cur) = queue.pop_front() {
        let d = dist[cur];
        for &nb in &sites[cur].neighbors {
            if sites[nb].is_land && dist[nb] == u32::MAX {
                dist[nb] = d + 1;
                queue.push_back(nb);
            }
        }
    }
    dist
}

fn select_ridges(
    sites: &[Site],
    dist_from_coast: &[u32],
    map_size: f64,
    params: &Params,
    rng: &mut Rng,
) -> std::collections::HashSet<SiteId> {
    let mut ridge_set: std::collections::HashSet<SiteId> = std::collections::HashSet::new();

    let mut land: Vec<SiteId> = sites.iter().filter(|s| s.is_land).map(|s| s.id).collect();
    if land.is_empty() {
        return ridge_set;
    }
    land.sort_by(|&a, &b| dist_from_coast[b].cmp(&dist_from_coast[a]));
    let keep = ((land.len() as f64) * 0.6).ceil() as usize;
    let mut candidates: Vec<SiteId> = land.into_iter().take(keep.max(1)).collect();
    rng.shuffle(&mut candidates);

    let min_spacing = 0.7 * (map_size * map_size / params.mountain_peak_count.max(1) as f64).sqrt();
    let mut peaks: Vec<SiteId> = Vec::new();
    for &id in &candidates {
        if peaks.len() >= params.mountain_peak_count {
            break;
        }
        let c = sites[id].centroid;
        if peaks.iter().all(|&p| sites[p].centroid.distance(&c) >= min_spacing) {
            peaks.push(id);
        }
    }
    ridge_set.extend(peaks.iter().copied());

    if params.ridge_enabled && peaks.len() >= 2 {
        let half_extent = map_size / 2.0;
        for i in 0..peaks.len() {
            for j in (i + 1)..peaks.len() {
                let a = peaks[i];
                let b = peaks[j];
                if sites[a].centroid.distance(&sites[b].centroid) > half_extent {
                    continue;
                }
                if let Some(path) = ridge_path(sites, dist_from_coast, a, b) {
                    ridge_set.extend(path);
                }
            }
        }
    }

    if params.ridge_width > 1 {
        dilate_land(sites, &mut ridge_set, params.ridge_width - 1);
    }

    ridge_set
}

/// Least-cost walk between two peaks that prefers inland sites, via A* with
/// step cost `1 + 2/(distFromCoast+1)` and a Euclidean heuristic.
fn ridge_path(sites: &[Site], dist_from_coast: &[u32], start: SiteId, goal: SiteId) -> Option<Vec<SiteId>> {
    let goal_point = sites[goal].centroid;
    let mut open = IndexedPriorityQueue::<SiteId>::new();
    let mut g_score = vec![f64::INFINITY; sites.len()];
    let mut came_from = vec![usize::MAX; sites.len()];

    g_score[start] = 0.0;
    open.push(start, sites[start].centroid.distance(&goal_point));

    while let Some((current, _)) = open.pop_min() {
        if current == goal {
            let mut path = vec![current];
            let mut cur = current;
            while came_from[cur] != usize::MAX {
                cur = came_from[cur];
                path.push(cur);
            }
            path.reverse();
            return Some(path);
        }
        for &nb in &sites[current].neighbors {
            if !sites[nb].is_land {
                continue;
            }
            let step_cost = 1.0 + 2.0 / (dist_from_coast[nb] as f64 + 1.0);
            let tentative = g_score[current] + step_cost;
            if tentative < g_score[nb] {
                g_score[nb] = tentative;
                came_from[nb] = current;
                let f = tentative + sites[nb].centroid.distance(&goal_point);
                open.push(nb, f);
            }
        }
    }
    None
}

fn dilate_land(sites: &[Site], set: &mut std::collections::HashSet<SiteId>, steps: u32) {
    for _ in 0..steps {
        let frontier: Vec<SiteId> = set.iter().copied().collect();
        for id in frontier {
            for &nb in &sites[id].neighbors {
                if sites[nb].is_land {
                    set.insert(nb);
                }
            }
        }
    }
}

fn assign_elevation(
    sites: &mut [Site],
    dist_from_coast: &[u32],
    dist_from_peak: &[u32],
    _map_size: f64,
    params: &Params,
    hill_seed: u32,
) {
    let max_coast = sites
        .iter()
        .filter(|s| s.is_land)
        .map(|s| dist_from_coast[s.id])
        .max()
        .unwrap_or(0)
        .max(1) as f64;
    let max_peak = sites
        .iter()
        .filter(|s| s.is_land)
        .map(|s| dist_from_peak[s.id])
        .filter(|&d| d != u32::MAX)
        .max()
        .unwrap_or(0)
        .max(1) as f64;

    let p = params.elevation_blend_power;
    let s = params.hill_noise_scale;

    // Each site's elevation depends only on the precomputed distance fields
    // and its own centroid, never on a neighbor's result, so this is safe
    // to fan out across threads.
    sites.par_iter_mut().for_each(|site| {
        if !site.is_land {
            return;
        }
        let coast_t = (dist_from_coast[site.id] as f64 / max_coast).clamp(0.0, 1.0);
        let peak_dist = dist_from_peak[site.id];
        let peak_t = if peak_dist == u32::MAX {
            0.0
        } else {
            (1.0 - peak_dist as f64 / max_peak).clamp(0.0, 1.0)
        };

        let coast_factor = coast_t.powf(p);
        let peak_factor = peak_t.powf(1.5);

        let base = coast_factor * params.peak_elevation * (0.3 + 0.6 * peak_factor);
        let hill_noise = (fbm(site.centroid.x * s, site.centroid.y * s, hill_seed, 4) + 1.0) / 2.0;
        let hills = hill_noise * params.hill_noise_amplitude * params.peak_elevation;

        site.elevation = (base + hills * params.hilliness * coast_factor).max(1.0);
        site.filled_elevation = site.elevation;
    });
}
