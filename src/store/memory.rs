use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use ahash::AHashSet;
use anyhow::{Context, Result};
use geo::{BoundingRect, Coord, Intersects, LineString, MultiPolygon, Point, Polygon};
use rstar::RTree;
use serde::Deserialize;

use super::bbox::{envelope_of, BoundingBox};
use super::{SpatialStore, TrailRecord};
use crate::error::StoreError;
use crate::types::{PlantId, TrailId};

/// A plant with its names and distribution polygons.
#[derive(Clone, Debug, PartialEq)]
pub struct PlantRecord {
    pub plant_id: PlantId,
    pub sci_name: String,
    pub alt_names: Vec<String>,
    pub distribution: Vec<Polygon<f64>>,
}

/// In-memory spatial store, indexed with R-trees over bounding boxes.
///
/// Candidates from the R-tree are confirmed with an exact intersection test.
#[derive(Debug)]
pub struct MemoryStore {
    plants: BTreeMap<PlantId, PlantRecord>,
    // Flattened (plant, polygon index) pairs addressed by the distribution tree.
    distributions: Vec<(PlantId, usize)>,
    distribution_tree: RTree<BoundingBox>,
    trails: Vec<TrailRecord>,
    trail_tree: RTree<BoundingBox>,
}

impl MemoryStore {
    /// Build a store and its spatial indexes. A later record with a repeated
    /// plant id replaces the earlier one.
    pub fn new(plants: Vec<PlantRecord>, trails: Vec<TrailRecord>) -> Self {
        let plants = plants.into_iter()
            .map(|plant| (plant.plant_id, plant))
            .collect::<BTreeMap<_, _>>();

        let distributions = plants.values()
            .flat_map(|plant| (0..plant.distribution.len()).map(|i| (plant.plant_id, i)))
            .collect::<Vec<_>>();

        let distribution_tree = RTree::bulk_load(
            distributions.iter().enumerate()
                .filter_map(|(idx, &(plant_id, i))| {
                    plants[&plant_id].distribution[i].bounding_rect()
                        .map(|rect| BoundingBox::new(idx, rect))
                })
                .collect()
        );

        let trail_tree = RTree::bulk_load(
            trails.iter().enumerate()
                .filter_map(|(idx, trail)| trail.path.bounding_rect().map(|rect| BoundingBox::new(idx, rect)))
                .collect()
        );

        Self { plants, distributions, distribution_tree, trails, trail_tree }
    }

    /// Parse a JSON dataset from bytes.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        let dataset: DatasetFile = serde_json::from_slice(bytes)
            .map_err(|e| StoreError::Dataset(e.to_string()))?;
        dataset.into_store()
    }

    /// Read a JSON dataset from the file at `path`.
    pub fn read_from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open dataset: {}", path.display()))?;
        let dataset: DatasetFile = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse dataset: {}", path.display()))?;
        Ok(dataset.into_store()?)
    }

    #[inline] pub fn num_plants(&self) -> usize { self.plants.len() }

    #[inline] pub fn num_trails(&self) -> usize { self.trails.len() }
}

impl SpatialStore for MemoryStore {
    fn fetch_distribution_polygons(&self, plant: PlantId) -> Result<Vec<Polygon<f64>>, StoreError> {
        Ok(self.plants.get(&plant)
            .map(|record| record.distribution.clone())
            .unwrap_or_default())
    }

    fn find_trails_intersecting(&self, region: &MultiPolygon<f64>) -> Result<Vec<TrailRecord>, StoreError> {
        let Some(rect) = region.bounding_rect() else { return Ok(Vec::new()) };

        let mut hits = self.trail_tree.locate_in_envelope_intersecting(&envelope_of(rect))
            .map(|candidate| candidate.idx())
            .filter(|&idx| self.trails[idx].path.intersects(region))
            .collect::<Vec<_>>();
        hits.sort_unstable();

        Ok(hits.into_iter().map(|idx| self.trails[idx].clone()).collect())
    }

    fn find_distribution_ids_intersecting(&self, region: &MultiPolygon<f64>) -> Result<AHashSet<PlantId>, StoreError> {
        let Some(rect) = region.bounding_rect() else { return Ok(AHashSet::new()) };

        Ok(self.distribution_tree.locate_in_envelope_intersecting(&envelope_of(rect))
            .map(|candidate| self.distributions[candidate.idx()])
            .filter(|&(plant_id, i)| self.plants[&plant_id].distribution[i].intersects(region))
            .map(|(plant_id, _)| plant_id)
            .collect())
    }

    fn lookup_plant_names(&self, plants: &AHashSet<PlantId>) -> Result<Vec<String>, StoreError> {
        let records = self.plants.values()
            .filter(|record| plants.contains(&record.plant_id))
            .collect::<Vec<_>>();

        let sci_names = records.iter().map(|record| record.sci_name.clone());
        let alt_names = records.iter().flat_map(|record| record.alt_names.iter().cloned());
        Ok(sci_names.chain(alt_names).collect())
    }
}

// ---------------------------------------------------------------------------
// Dataset file format
// ---------------------------------------------------------------------------

/// On-disk dataset: plants with their ranges, and trails.
///
/// Coordinates are `[lng, lat]`. A polygon is a list of rings, exterior
/// first; rings are closed on load if the last point does not repeat the
/// first.
#[derive(Debug, Deserialize)]
struct DatasetFile {
    #[serde(default)]
    plants: Vec<PlantEntry>,
    #[serde(default)]
    trails: Vec<TrailEntry>,
}

#[derive(Debug, Deserialize)]
struct PlantEntry {
    plant_id: PlantId,
    sci_name: String,
    #[serde(default)]
    alt_names: Vec<String>,
    #[serde(default)]
    distribution: Vec<Vec<Vec<[f64; 2]>>>,
}

#[derive(Debug, Deserialize)]
struct TrailEntry {
    trail_id: TrailId,
    name: String,
    path: Vec<[f64; 2]>,
    trailhead: [f64; 2],
}

impl DatasetFile {
    fn into_store(self) -> Result<MemoryStore, StoreError> {
        let plants = self.plants.into_iter()
            .map(|entry| -> Result<PlantRecord, StoreError> {
                let distribution = entry.distribution.iter()
                    .map(|rings| parse_polygon(rings)
                        .map_err(|e| StoreError::Dataset(format!("{}: {e}", entry.plant_id))))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(PlantRecord {
                    plant_id: entry.plant_id,
                    sci_name: entry.sci_name,
                    alt_names: entry.alt_names,
                    distribution,
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        let trails = self.trails.into_iter()
            .map(|entry| -> Result<TrailRecord, StoreError> {
                if entry.path.len() < 2 {
                    return Err(StoreError::Dataset(format!("{}: path needs at least 2 points", entry.trail_id)));
                }
                Ok(TrailRecord {
                    trail_id: entry.trail_id,
                    name: entry.name,
                    path: LineString(entry.path.iter().map(|&[x, y]| Coord { x, y }).collect()),
                    trailhead: Point::new(entry.trailhead[0], entry.trailhead[1]),
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        Ok(MemoryStore::new(plants, trails))
    }
}

/// Parse a polygon from rings of `[x, y]` pairs, exterior first.
fn parse_polygon(rings: &[Vec<[f64; 2]>]) -> Result<Polygon<f64>, String> {
    let (exterior, interiors) = rings.split_first()
        .ok_or_else(|| "polygon has no rings".to_string())?;

    Ok(Polygon::new(
        parse_ring(exterior)?,
        interiors.iter().map(|ring| parse_ring(ring)).collect::<Result<_, _>>()?,
    ))
}

/// Parse a ring, closing it if needed. Closed rings need at least 4 points.
fn parse_ring(coords: &[[f64; 2]]) -> Result<LineString<f64>, String> {
    let mut points = coords.iter().map(|&[x, y]| Coord { x, y }).collect::<Vec<_>>();

    // Ensure ring is closed (first point == last point)
    if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
        if first != last { points.push(first) }
    }

    if points.len() < 4 {
        return Err(format!("ring has {} points, need at least 4 when closed", points.len()));
    }
    Ok(LineString(points))
}
