//! A* pathfinding over the transport graph, keyed by the indexed
//! priority queue so relaxing an already-open site updates its priority in
//! place instead of pushing a duplicate.

use serde::{Deserialize, Serialize};

use crate::containers::IndexedPriorityQueue;
use crate::site::{Site, SiteId};
use crate::transport::graph::{CrossingId, NetworkEdgeId, TransportNetwork};

/// Outcome of a pathfinding request. Failure is reported through
/// `success = false`, never as an error.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PathResult {
    pub success: bool,
    pub path: Vec<SiteId>,
    pub total_cost: f64,
    pub edges: Vec<NetworkEdgeId>,
    pub crossings: Vec<CrossingId>,
}

impl PathResult {
    fn failure() -> Self {
        Self { success: false, path: Vec::new(), total_cost: f64::INFINITY, edges: Vec::new(), crossings: Vec::new() }
    }
}

/// Finds the least-cost path from `from` to `to`. Water-adjacent sites are
/// never entered. The trivial `from == to` case returns a one-site path at
/// zero cost.
pub fn find_path(network: &TransportNetwork, sites: &[Site], from: SiteId, to: SiteId) -> PathResult {
    if from == to {
        return PathResult { success: true, path: vec![from], total_cost: 0.0, edges: Vec::new(), crossings: Vec::new() };
    }

    let n = sites.len();
    let mut g_score = vec![f64::INFINITY; n];
    let mut came_from: Vec<Option<(SiteId, NetworkEdgeId)>> = vec![None; n];
    let mut open = IndexedPriorityQueue::<SiteId>::new();

    g_score[from] = 0.0;
    open.push(from, heuristic(sites, from, to));

    while let Some((current, _)) = open.pop_min() {
        if current == to {
            return reconstruct(network, &came_from, from, to, g_score[to]);
        }
        for &edge_id in &network.adjacency[current] {
            let neighbor = network.other_endpoint(edge_id, current);
            if !sites[neighbor].is_land {
                continue;
            }
            let tentative = g_score[current] + network.edges[edge_id].current_cost;
            if tentative < g_score[neighbor] {
                g_score[neighbor] = tentative;
                came_from[neighbor] = Some((current, edge_id));
                open.push(neighbor, tentative + heuristic(sites, neighbor, to));
            }
        }
    }

    PathResult::failure()
}

fn heuristic(sites: &[Site], a: SiteId, b: SiteId) -> f64 {
    sites[a].centroid.distance(&sites[b].centroid)
}

fn reconstruct(
    network: &TransportNetwork,
    came_from: &[Option<(SiteId, NetworkEdgeId)>],
    from: SiteId,
    to: SiteId,
    total_cost: f64,
) -> PathResult {
    let mut path = vec![to];
    let mut edge_path = Vec::new();
    let mut cur = to;
    while cur != from {
        let (prev, edge_id) = came_from[cur].expect("reconstruct: broken parent chain to start");
        path.push(prev);
        edge_path.push(edge_id);
        cur = prev;
    }
    path.reverse();
    edge_path.reverse();

    let mut crossing_ids = Vec::new();
    for &eid in &edge_path {
        for &cid in &network.edges[eid].crossings {
            if !crossing_ids.contains(&cid) {
                crossing_ids.push(cid);
            }
        }
    }

    PathResult { success: true, path, total_cost, edges: edge_path, crossings: crossing_ids }
}
