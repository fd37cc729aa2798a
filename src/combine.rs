//! Narrowing the viewport down to where every constraint plant occurs.

use geo::{unary_union, BooleanOps, BoundingRect, Intersects, MultiPolygon, Polygon, Validation};
use searchgeom::{repair, repair_polygon, SearchRegion};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::StoreError;
use crate::store::SpatialStore;
use crate::types::PlantId;

/// Fold the viewport polygon and each constraint plant's range into one region.
///
/// Plants are applied in the given order; intersection is associative and
/// commutative so the order does not change the result. The region never
/// grows. Once it is empty the remaining plants are not fetched.
pub fn combine<S: SpatialStore + ?Sized>(
    store: &S,
    viewport: &Polygon<f64>,
    plants: &[PlantId],
    config: &EngineConfig,
) -> Result<SearchRegion, StoreError> {
    let mut region = SearchRegion::from(viewport.clone());

    for (step, &plant) in plants.iter().enumerate() {
        let raw = store.fetch_distribution_polygons(plant)?;
        let range = plant_range(&raw, viewport, config);

        let narrowed = region.as_multi_polygon().intersection(&range);
        region = if narrowed.is_valid() {
            narrowed.into()
        } else {
            repair(&narrowed, config.repair_area_tolerance).geometry.into()
        };
        debug!(%plant, polygons = raw.len(), area = region.area(), "narrowed search region");

        if region.is_empty() {
            debug!(skipped = plants.len() - step - 1, "search region is empty");
            return Ok(SearchRegion::empty());
        }
    }

    Ok(region)
}

/// "Anywhere this plant occurs": the union of its repaired distribution
/// polygons. With the viewport prefilter on, polygons whose bounding box
/// misses the viewport are dropped first.
pub fn plant_range(raw: &[Polygon<f64>], viewport: &Polygon<f64>, config: &EngineConfig) -> MultiPolygon<f64> {
    let view_rect = viewport.bounding_rect();

    let pieces = raw.iter()
        .filter(|polygon| {
            !config.prefilter_to_viewport || match (polygon.bounding_rect(), view_rect) {
                (Some(rect), Some(view)) => rect.intersects(&view),
                _ => false,
            }
        })
        .flat_map(|polygon| repair_polygon(polygon, config.repair_area_tolerance).geometry.0)
        .collect::<Vec<_>>();

    unary_union(&pieces)
}
