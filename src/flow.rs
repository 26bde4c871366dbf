//! Flow routing, accumulation, and river-edge extraction: every land
//! site gets a downhill successor and an upstream count; shared Voronoi
//! edges crossed by enough accumulated flow become rivers.

use crate::geometry::Point;
use crate::site::{Edge, Lake, Site, SiteId, NONE_ID};

/// Assigns `flows_to` for every land site: lake members route to/through
/// their outlet, everyone else descends to their lowest strictly-lower
/// neighbor.
pub fn route(sites: &mut [Site], lakes: &[Lake]) {
    let n = sites.len();
    let mut flows_to: Vec<Option<SiteId>> = vec![None; n];

    for lake in lakes {
        if lake.outlet_cell != NONE_ID {
            let outlet_cell = lake.outlet_cell as usize;
            flows_to[outlet_cell] = if lake.outlet_target == NONE_ID {
                None
            } else {
                Some(lake.outlet_target as usize)
            };
            for &m in &lake.members {
                if m != outlet_cell {
                    flows_to[m] = Some(outlet_cell);
                }
            }
        }
    }

    for site in sites.iter() {
        if !site.is_land || site.lake_id.is_some() {
            continue;
        }
        let mut best: Option<(SiteId, f64)> = None;
        for &nb in &site.neighbors {
            let nb_elev = sites[nb].filled_elevation;
            if nb_elev < site.filled_elevation && best.is_none_or(|(_, e)| nb_elev < e) {
                best = Some((nb, nb_elev));
            }
        }
        flows_to[site.id] = best.map(|(id, _)| id);
    }

    for site in sites.iter_mut() {
        site.flows_to = flows_to[site.id];
    }
}

/// Sweeps land sites from highest to lowest filled elevation, accumulating
/// each site's count into its downhill successor.
pub fn accumulate(sites: &mut [Site]) {
    let mut order: Vec<SiteId> = sites.iter().filter(|s| s.is_land).map(|s| s.id).collect();
    order.sort_by(|&a, &b| sites[b].filled_elevation.total_cmp(&sites[a].filled_elevation));

    let mut acc = vec![1.0_f64; sites.len()];
    for &id in &order {
        if let Some(target) = sites[id].flows_to {
            if sites[target].is_land {
                let contribution = acc[id];
                acc[target] += contribution;
            }
        }
    }

    for site in sites.iter_mut() {
        if site.is_land {
            site.flow_accumulation = acc[site.id];
        }
    }
}

/// Extracts one [`Edge`] per adjacent site pair that shares exactly two
/// polygon vertices, flagging rivers by accumulated flow.
pub fn extract_edges(sites: &[Site], river_threshold: u32) -> Vec<Edge> {
    let mut edges = Vec::new();
    for site in sites {
        for &nb in &site.neighbors {
            if nb <= site.id {
                continue;
            }
            if let Some((va, vb)) = shared_vertices(&site.polygon, &sites[nb].polygon) {
                let (is_river, flow_volume) = classify_river(site, &sites[nb], river_threshold);
                edges.push(Edge {
                    a: site.id,
                    b: nb,
                    vertex_a: va,
                    vertex_b: vb,
                    is_river,
                    flow_volume,
                });
            }
        }
    }
    edges
}

fn shared_vertices(poly_a: &[Point], poly_b: &[Point]) -> Option<(Point, Point)> {
    let mut shared: Vec<Point> = Vec::new();
    for &pa in poly_a {
        if poly_b.iter().any(|pb| pa.approx_eq(pb, 1e-6)) {
            shared.push(pa);
        }
    }
    if shared.len() >= 2 {
        Some((shared[0], shared[1]))
    } else {
        None
    }
}

fn classify_river(a: &Site, b: &Site, threshold: u32) -> (bool, f64) {
    let threshold = threshold as f64;
    if a.flows_to == Some(b.id) && a.flow_accumulation >= threshold {
        (true, a.flow_accumulation)
    } else if b.flows_to == Some(a.id) && b.flow_accumulation >= threshold {
        (true, b.flow_accumulation)
    } else {
        (false, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_site(id: SiteId, elevation: f64, neighbors: Vec<SiteId>) -> Site {
        let mut s = Site::new(id, Point::new(id as f64, 0.0), vec![], neighbors);
        s.is_land = elevation >= 0.0;
        s.elevation = elevation;
        s.filled_elevation = elevation;
        s
    }

    #[test]
    fn flows_toward_lower_neighbor() {
        let mut sites = vec![
            flat_site(0, -1.0, vec![1]),
            flat_site(1, 3.0, vec![0, 2]),
            flat_site(2, 6.0, vec![1]),
        ];
        route(&mut sites, &[]);
        assert_eq!(sites[1].flows_to, Some(0));
        assert_eq!(sites[2].flows_to, Some(1));
        assert_eq!(sites[0].flows_to, None);
    }

    #[test]
    fn accumulation_counts_upstream_chain() {
        let mut sites = vec![
            flat_site(0, -1.0, vec![1]),
            flat_site(1, 3.0, vec![0, 2]),
            flat_site(2, 6.0, vec![1, 3]),
            flat_site(3, 9.0, vec![2]),
        ];
        route(&mut sites, &[]);
        accumulate(&mut sites);
        assert_eq!(sites[3].flow_accumulation, 1.0);
        assert_eq!(sites[2].flow_accumulation, 2.0);
        assert_eq!(sites[1].flow_accumulation, 3.0);
    }

    #[test]
    fn lake_members_route_through_outlet() {
        let mut sites = vec![
            flat_site(0, -1.0, vec![1]),
            flat_site(1, 5.0, vec![0, 2]),
            flat_site(2, 2.0, vec![1, 3]),
            flat_site(3, 2.0, vec![2]),
        ];
        sites[2].lake_id = Some(0);
        sites[3].lake_id = Some(0);
        sites[2].filled_elevation = 5.0;
        sites[3].filled_elevation = 5.0;
        let lake = Lake {
            id: 0,
            members: vec![2, 3],
            water_level: 5.0,
            outlet_cell: 2,
            outlet_target: 1,
            area: 2,
            max_depth: 3.0,
        };
        route(&mut sites, &[lake]);
        assert_eq!(sites[2].flows_to, Some(1));
        assert_eq!(sites[3].flows_to, Some(2));
    }
}
