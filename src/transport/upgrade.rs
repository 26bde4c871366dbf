//! Usage tracking and class/status upgrades. `process_upgrades` is
//! idempotent: re-running it without an intervening `record_usage` call
//! yields no changes, since every transition checks usage against a fixed
//! threshold rather than consuming a delta.

use crate::config::NetworkParams;
use crate::transport::astar::PathResult;
use crate::transport::graph::{CrossingId, CrossingStatus, NetworkEdgeId, RoadClass, TransportNetwork};

/// Adds `amount` of usage to every edge and every unique crossing along a
/// found path.
pub fn record_usage(network: &mut TransportNetwork, path: &PathResult, amount: f64) {
    for &edge_id in &path.edges {
        network.edges[edge_id].usage += amount;
    }
    for &crossing_id in &path.crossings {
        network.crossings[crossing_id].usage += amount;
    }
}

#[derive(Clone, Debug)]
pub struct Upgrade {
    pub edge_id: NetworkEdgeId,
    pub new_class: Option<RoadClass>,
    pub crossing_changes: Vec<(CrossingId, CrossingStatus)>,
}

/// Scans every edge, advancing class and crossing status where usage has
/// crossed the configured thresholds, and recomputes `current_cost` for
/// anything that changed.
pub fn process_upgrades(network: &mut TransportNetwork, params: &NetworkParams) -> Vec<Upgrade> {
    let mut upgrades = Vec::new();

    for edge_id in 0..network.edges.len() {
        let mut changed = false;
        let mut new_class = None;

        let class = network.edges[edge_id].class;
        let usage = network.edges[edge_id].usage;
        let next_class = match class {
            RoadClass::None if usage >= params.trail_threshold => Some(RoadClass::Trail),
            RoadClass::Trail if usage >= params.road_threshold => Some(RoadClass::Road),
            RoadClass::Road if usage >= params.turnpike_threshold => Some(RoadClass::Turnpike),
            _ => None,
        };
        if let Some(nc) = next_class {
            network.edges[edge_id].class = nc;
            new_class = Some(nc);
            changed = true;
        }

        let mut crossing_changes = Vec::new();
        let crossing_ids = network.edges[edge_id].crossings.clone();
        for crossing_id in crossing_ids {
            let status = network.crossings[crossing_id].status;
            let usage = network.crossings[crossing_id].usage;
            let river_width = network.crossings[crossing_id].river_width;
            let next_status = match status {
                CrossingStatus::Ford if usage >= params.trail_threshold => Some(CrossingStatus::Ferry),
                CrossingStatus::Ferry if usage >= params.bridge_threshold && river_width <= params.max_bridge_width => {
                    Some(CrossingStatus::Bridge)
                }
                _ => None,
            };
            if let Some(ns) = next_status {
                network.crossings[crossing_id].status = ns;
                crossing_changes.push((crossing_id, ns));
                changed = true;
            }
        }

        if changed {
            network.recompute_cost(edge_id, params);
            upgrades.push(Upgrade { edge_id, new_class, crossing_changes });
        }
    }

    upgrades
}
