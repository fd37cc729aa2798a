//! The spatial store collaborator: where distribution polygons, trails and
//! plant names live. The engine only talks to it through [`SpatialStore`].

mod bbox;
mod memory;

use ahash::AHashSet;
use geo::{LineString, MultiPolygon, Point, Polygon};

use crate::error::StoreError;
use crate::types::{PlantId, TrailId};

pub use memory::{MemoryStore, PlantRecord};

/// A trail as stored: a path, a name and a trailhead.
#[derive(Clone, Debug, PartialEq)]
pub struct TrailRecord {
    pub trail_id: TrailId,
    pub name: String,
    pub path: LineString<f64>,
    pub trailhead: Point<f64>,
}

/// Lookups the query engine needs from persistent storage.
///
/// Calls are blocking. Any timeout or retry policy belongs to the
/// implementation, not the engine. Implementations are shared across
/// concurrent lookups within a request, hence `Sync`.
pub trait SpatialStore: Sync {
    /// Every recorded range polygon for `plant`, raw and possibly invalid.
    /// An unknown plant or one with no ranges yields an empty vector.
    fn fetch_distribution_polygons(&self, plant: PlantId) -> Result<Vec<Polygon<f64>>, StoreError>;

    /// Trails whose path intersects `region`.
    fn find_trails_intersecting(&self, region: &MultiPolygon<f64>) -> Result<Vec<TrailRecord>, StoreError>;

    /// Plants with at least one distribution polygon intersecting `region`.
    fn find_distribution_ids_intersecting(&self, region: &MultiPolygon<f64>) -> Result<AHashSet<PlantId>, StoreError>;

    /// Scientific names of `plants`, followed by their alternate names.
    fn lookup_plant_names(&self, plants: &AHashSet<PlantId>) -> Result<Vec<String>, StoreError>;
}
