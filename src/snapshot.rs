//! The generation pipeline's output: terrain fields plus the
//! transport network, serialized as JSON at a process boundary the way the
//! teacher's `src/bin/server.rs` already serializes its `Map` layers.

use serde::{Deserialize, Serialize};

use crate::site::{Edge, Lake, Site};
use crate::transport::TransportNetwork;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub cells: Vec<Site>,
    pub edges: Vec<Edge>,
    pub rivers: Vec<Edge>,
    pub bounds: Bounds,
    pub lakes: Vec<Lake>,
    pub transport: TransportNetwork,
}

impl Snapshot {
    /// Rebuilds the transport network's derived indexes after this
    /// snapshot has come back from a `serde_json` round trip.
    pub fn rebuild_transport_index(&mut self) {
        self.transport.rebuild_index(self.cells.len());
    }
}
