//! Core site-graph data types: one [`Site`] per Voronoi cell, one
//! [`Edge`] per adjacent pair, and a [`Lake`] per connected component of
//! flooded sites. These are the terrain fields the rest of the pipeline
//! fills in, stage by stage.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

pub type SiteId = usize;
pub type LakeId = usize;

/// Sentinel used in place of an `Option<SiteId>` where the wire format
/// needs a plain integer: -1 marks an endorheic lake with no outlet.
pub const NONE_ID: i64 = -1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Biome {
    Sea,
    Lake,
    River,
    Mountains,
    Woods,
    Plains,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
    pub centroid: Point,
    pub polygon: Vec<Point>,
    pub neighbors: Vec<SiteId>,
    pub elevation: f64,
    pub filled_elevation: f64,
    pub moisture: f64,
    pub is_land: bool,
    pub is_coast: bool,
    pub flows_to: Option<SiteId>,
    pub flow_accumulation: f64,
    pub lake_id: Option<LakeId>,
    pub biome: Biome,
}

impl Site {
    /// A freshly meshed, unclassified site: ocean by default, everything
    /// downstream (island mask onward) overwrites these fields in place.
    pub fn new(id: SiteId, centroid: Point, polygon: Vec<Point>, neighbors: Vec<SiteId>) -> Self {
        Self {
            id,
            centroid,
            polygon,
            neighbors,
            elevation: -1.0,
            filled_elevation: -1.0,
            moisture: 0.0,
            is_land: false,
            is_coast: false,
            flows_to: None,
            flow_accumulation: 1.0,
            lake_id: None,
            biome: Biome::Sea,
        }
    }
}

/// Undirected adjacency between two sites, carrying the shared Voronoi
/// edge's two vertices. At most one Edge exists per unordered pair.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Edge {
    pub a: SiteId,
    pub b: SiteId,
    pub vertex_a: Point,
    pub vertex_b: Point,
    pub is_river: bool,
    pub flow_volume: f64,
}

impl Edge {
    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.vertex_a.x + self.vertex_b.x) / 2.0,
            (self.vertex_a.y + self.vertex_b.y) / 2.0,
        )
    }
}

/// A maximal connected set of land sites flooded to a common spill level
/// `outlet_cell`/`outlet_target` use [`NONE_ID`] when endorheic.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Lake {
    pub id: LakeId,
    pub members: Vec<SiteId>,
    pub water_level: f64,
    pub outlet_cell: i64,
    pub outlet_target: i64,
    pub area: usize,
    pub max_depth: f64,
}

impl Lake {
    pub fn is_endorheic(&self) -> bool {
        self.outlet_cell == NONE_ID
    }
}
