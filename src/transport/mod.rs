//! Transport graph, A* pathfinding, and usage-driven upgrades.

pub mod astar;
pub mod graph;
pub mod upgrade;

pub use astar::{find_path, PathResult};
pub use graph::{build, Crossing, CrossingId, CrossingStatus, NetworkEdge, NetworkEdgeId, RoadClass, TransportNetwork};
pub use upgrade::{process_upgrades, record_usage, Upgrade};
