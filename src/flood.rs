//! Priority-Flood depression filling and lake identification, after
//! Barnes, Lehman & Mulla (2014). Single-pass: every land site receives a
//! filled elevation from which a monotone non-increasing descent path to
//! the sea exists.

use std::collections::{BTreeMap, HashSet};

use crate::config::Params;
use crate::containers::{MinHeap, UnionFind};
use crate::geometry::EPS;
use crate::site::{Lake, Site, SiteId, NONE_ID};

/// Runs Priority-Flood over `sites`, writing `filled_elevation` and
/// `lake_id` in place, and returns the identified lakes.
pub fn run(sites: &mut [Site], params: &Params) -> Vec<Lake> {
    let n = sites.len();
    let mut filled = vec![f64::INFINITY; n];
    let mut processed = vec![false; n];
    let mut heap: MinHeap<(f64, SiteId)> = MinHeap::new(|a, b| a.0.total_cmp(&b.0));

    for site in sites.iter() {
        if !site.is_land {
            filled[site.id] = site.elevation;
            processed[site.id] = true;
        }
    }
    for site in sites.iter().filter(|s| s.is_land) {
        if site.neighbors.iter().any(|&nb| !sites[nb].is_land) {
            filled[site.id] = site.elevation;
            processed[site.id] = true;
            heap.push((site.elevation, site.id));
        }
    }

    while let Some((_, cur)) = heap.pop() {
        for &nb in &sites[cur].neighbors {
            if processed[nb] || !sites[nb].is_land {
                continue;
            }
            let f = sites[nb].elevation.max(filled[cur]);
            filled[nb] = f;
            processed[nb] = true;
            heap.push((f, nb));
        }
    }

    for site in sites.iter_mut() {
        if site.is_land {
            site.filled_elevation = filled[site.id].max(site.elevation);
        }
    }

    identify_lakes(sites, &filled, params)
}

fn identify_lakes(sites: &mut [Site], filled: &[f64], params: &Params) -> Vec<Lake> {
    let n = sites.len();
    let candidate: Vec<bool> = sites
        .iter()
        .map(|s| s.is_land && (filled[s.id] - s.elevation) > params.min_lake_depth)
        .collect();

    let mut uf = UnionFind::new(n);
    for site in sites.iter().filter(|s| candidate[s.id]) {
        for &nb in &site.neighbors {
            if candidate[nb] && (filled[nb] - filled[site.id]).abs() < EPS {
                uf.union(site.id, nb);
            }
        }
    }

    let mut groups: BTreeMap<usize, Vec<SiteId>> = BTreeMap::new();
    for site in sites.iter().filter(|s| candidate[s.id]) {
        groups.entry(uf.find(site.id)).or_default().push(site.id);
    }

    let mut lakes = Vec::new();
    for members in groups.into_values() {
        if members.len() < params.min_lake_area {
            continue;
        }
        let member_set: HashSet<SiteId> = members.iter().copied().collect();
        let water_level = filled[members[0]];

        let mut outlet: Option<(SiteId, SiteId)> = None;
        let mut best_diff = f64::INFINITY;
        for &m in &members {
            for &nb in &sites[m].neighbors {
                if member_set.contains(&nb) {
                    continue;
                }
                if filled[nb] <= water_level + EPS {
                    let diff = (sites[m].elevation - water_level).abs();
                    if diff < best_diff {
                        best_diff = diff;
                        outlet = Some((m, nb));
                    }
                }
            }
        }

        let (outlet_cell, outlet_target) = match outlet {
            Some((oc, ot)) => (oc as i64, ot as i64),
            None => (NONE_ID, NONE_ID),
        };
        let max_depth = members
            .iter()
            .map(|&m| filled[m] - sites[m].elevation)
            .fold(0.0_f64, f64::max);

        let lake_id = lakes.len();
        for &m in &members {
            sites[m].lake_id = Some(lake_id);
        }

        lakes.push(Lake {
            id: lake_id,
            area: members.len(),
            members,
            water_level,
            outlet_cell,
            outlet_target,
            max_depth,
        });
    }

    lakes
}
