//! Transport graph construction: one [`NetworkEdge`] per adjacent
//! site pair, with a terrain-derived base cost and zero or more river
//! [`Crossing`]s. `TransportNetwork` is the single owner of all mutable
//! edge/crossing state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::NetworkParams;
use crate::geometry::Point;
use crate::site::{Edge, Site, SiteId};

pub type NetworkEdgeId = usize;
pub type CrossingId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoadClass {
    None,
    Trail,
    Road,
    Turnpike,
}

impl RoadClass {
    pub fn multiplier(self) -> f64 {
        match self {
            RoadClass::None => 1.0,
            RoadClass::Trail => 1.0,
            RoadClass::Road => 0.5,
            RoadClass::Turnpike => 0.2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossingStatus {
    Ford,
    Ferry,
    Bridge,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Crossing {
    pub id: CrossingId,
    pub edge_id: NetworkEdgeId,
    pub position: Point,
    pub river_width: f64,
    pub max_flow: f64,
    pub status: CrossingStatus,
    pub usage: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkEdge {
    pub id: NetworkEdgeId,
    pub a: SiteId,
    pub b: SiteId,
    pub class: RoadClass,
    pub base_cost: f64,
    pub current_cost: f64,
    pub usage: f64,
    pub crossings: Vec<CrossingId>,
}

/// Owns every NetworkEdge and Crossing allocated during construction, plus
/// the indexes needed to look an edge up by endpoint pair or by site.
///
/// `edge_lookup`/`adjacency` are derived from `edges` and are never part of
/// the wire format — they are skipped on serialize and rebuilt with
/// [`rebuild_index`] after deserialize, since `(SiteId, SiteId)` tuple keys
/// don't round-trip through `serde_json`'s string-keyed maps anyway.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransportNetwork {
    pub edges: Vec<NetworkEdge>,
    pub crossings: Vec<Crossing>,
    #[serde(skip)]
    pub edge_lookup: HashMap<(SiteId, SiteId), NetworkEdgeId>,
    #[serde(skip)]
    pub adjacency: Vec<Vec<NetworkEdgeId>>,
}

impl TransportNetwork {
    /// Reconstructs `edge_lookup`/`adjacency` from `edges`. Must be called
    /// after deserializing a `TransportNetwork` before using lookups.
    pub fn rebuild_index(&mut self, site_count: usize) {
        self.edge_lookup.clear();
        self.adjacency = vec![Vec::new(); site_count];
        for edge in &self.edges {
            self.edge_lookup.insert((edge.a, edge.b), edge.id);
            self.adjacency[edge.a].push(edge.id);
            self.adjacency[edge.b].push(edge.id);
        }
    }

    pub fn edge_between(&self, a: SiteId, b: SiteId) -> Option<NetworkEdgeId> {
        let key = if a < b { (a, b) } else { (b, a) };
        self.edge_lookup.get(&key).copied()
    }

    pub fn other_endpoint(&self, edge_id: NetworkEdgeId, from: SiteId) -> SiteId {
        let e = &self.edges[edge_id];
        if e.a == from {
            e.b
        } else {
            e.a
        }
    }

    /// Recomputes `currentCost = baseCost * classMultiplier + Sum crossingPenalty`
    /// for one edge. Called after any class/status change.
    pub fn recompute_cost(&mut self, edge_id: NetworkEdgeId, params: &NetworkParams) {
        let penalty: f64 = self.edges[edge_id]
            .crossings
            .iter()
            .map(|&cid| crossing_penalty(self.crossings[cid].status, params))
            .sum();
        let edge = &mut self.edges[edge_id];
        edge.current_cost = edge.base_cost * edge.class.multiplier() + penalty;
    }
}

fn crossing_penalty(status: CrossingStatus, params: &NetworkParams) -> f64 {
    match status {
        CrossingStatus::Bridge => 0.1 * params.river_crossing_penalty,
        CrossingStatus::Ford | CrossingStatus::Ferry => params.river_crossing_penalty,
    }
}

/// Builds the transport graph over `sites`, one edge per neighbor pair,
/// inheriting a [`Crossing`] from any adjacent river edge whose flow meets
/// `min_river_flow`.
pub fn build(sites: &[Site], voronoi_edges: &[Edge], params: &NetworkParams) -> TransportNetwork {
    let mut river_lookup: HashMap<(SiteId, SiteId), &Edge> = HashMap::new();
    for e in voronoi_edges {
        river_lookup.insert((e.a, e.b), e);
    }

    let mut edges: Vec<NetworkEdge> = Vec::new();
    let mut crossings: Vec<Crossing> = Vec::new();
    let mut edge_lookup: HashMap<(SiteId, SiteId), NetworkEdgeId> = HashMap::new();
    let mut adjacency = vec![Vec::new(); sites.len()];

    for site in sites {
        for &nb in &site.neighbors {
            if nb <= site.id {
                continue;
            }
            let (a, b) = (site.id, nb);
            let d = site.centroid.distance(&sites[b].centroid);

            let base_cost = if !site.is_land || !sites[b].is_land {
                d * params.water_cost
            } else {
                let delta_e = (sites[b].elevation - site.elevation).abs();
                let mean_e = (sites[b].elevation + site.elevation) / 2.0;
                d * (1.0 + params.base_slope_cost * delta_e) * (1.0 + params.altitude_cost * mean_e)
            };

            let edge_id = edges.len();
            let mut edge_crossings = Vec::new();
            if let Some(ve) = river_lookup.get(&(a, b)) {
                if ve.is_river && ve.flow_volume >= params.min_river_flow {
                    let river_width = (ve.flow_volume / params.min_river_flow + 1.0).log2();
                    let crossing_id = crossings.len();
                    crossings.push(Crossing {
                        id: crossing_id,
                        edge_id,
                        position: ve.midpoint(),
                        river_width,
                        max_flow: ve.flow_volume,
                        status: CrossingStatus::Ford,
                        usage: 0.0,
                    });
                    edge_crossings.push(crossing_id);
                }
            }

            let penalty: f64 = edge_crossings.iter().map(|&cid| crossing_penalty(crossings[cid].status, params)).sum();
            let edge = NetworkEdge {
                id: edge_id,
                a,
                b,
                class: RoadClass::None,
                base_cost,
                current_cost: base_cost * RoadClass::None.multiplier() + penalty,
                usage: 0.0,
                crossings: edge_crossings,
            };

            edges.push(edge);
            edge_lookup.insert((a, b), edge_id);
            adjacency[a].push(edge_id);
            adjacency[b].push(edge_id);
        }
    }

    TransportNetwork { edges, crossings, edge_lookup, adjacency }
}
