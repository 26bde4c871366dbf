//! Trait boundaries for subsystems this crate treats as external
//! collaborators: cadastral subdivision, settlement seeding,
//! building/street layout, render-mesh construction, and snapshot export.
//! No logic for any of them lives here; they exist so a host can plug real
//! implementations in against a stable type, not to implement those
//! features.

use crate::geometry::Point;
use crate::rng::Rng;
use crate::site::SiteId;
use crate::snapshot::Snapshot;

/// A land parcel produced by cadastral subdivision. Bounding geometry only.
#[derive(Clone, Debug)]
pub struct Parcel {
    pub id: usize,
    pub site_id: SiteId,
    pub boundary: Vec<Point>,
}

/// A settlement seed location, produced by [`SettlementSeeder`].
#[derive(Clone, Debug)]
pub struct SettlementSite {
    pub id: usize,
    pub site_id: SiteId,
    pub center: Point,
    pub population_estimate: f64,
}

/// A single building footprint, produced by [`BuildingLayout`].
#[derive(Clone, Debug)]
pub struct Building {
    pub id: usize,
    pub parcel_id: usize,
    pub footprint: Vec<Point>,
}

/// Opaque render-ready mesh blob, produced by [`RenderMeshBuilder`]. This
/// crate never inspects its contents.
#[derive(Clone, Debug, Default)]
pub struct RenderMesh {
    pub vertex_count: usize,
    pub index_count: usize,
    pub opaque_payload: Vec<u8>,
}

/// Splits the land into cadastral parcels. Out of scope here: this
/// crate ships no subdivision algorithm.
pub trait CadastralSubdivider {
    fn subdivide(&self, snapshot: &Snapshot) -> Vec<Parcel>;
}

/// Chooses settlement locations. Consumes its own RNG child stream so it
/// doesn't perturb the core pipeline's determinism.
pub trait SettlementSeeder {
    fn seed_settlements(&self, snapshot: &Snapshot, rng: &mut Rng) -> Vec<SettlementSite>;
}

/// Lays buildings out within a settlement's parcels.
pub trait BuildingLayout {
    fn lay_out(&self, settlement: &SettlementSite, parcels: &[Parcel]) -> Vec<Building>;
}

/// Builds a renderable mesh from a snapshot. No geometry logic lives in
/// this crate; implementations own their own vertex/index format.
pub trait RenderMeshBuilder {
    fn build_mesh(&self, snapshot: &Snapshot) -> RenderMesh;
}

/// Exports a snapshot to an external format (PNG, GeoJSON, etc). PNG/image
/// export specifically is out of scope for this crate and lives
/// entirely behind this trait.
pub trait SnapshotExporter {
    fn export(&self, snapshot: &Snapshot) -> std::io::Result<()>;
}
