//! Query entry points. A plant query runs three strictly sequential stages:
//! build the viewport polygon, narrow it by the constraint plants, then serve
//! the store lookups against the final region.

use ahash::AHashSet;
use searchgeom::{normalize, project, Bounds, SearchRegion, Viewport};
use tracing::{debug, info, warn};

use crate::combine::combine;
use crate::config::EngineConfig;
use crate::error::QueryError;
use crate::store::SpatialStore;
use crate::wire::{trails_to_views, CombinationMode, PlantQuery, PlantQueryResponse, VisibleTrails};

/// Find the trails and plants inside the viewport, restricted to where every
/// constraint plant occurs.
///
/// Request errors are raised before any store I/O. An empty region is not an
/// error: it yields an empty response and skips the store lookups.
pub fn get_plants<S: SpatialStore + ?Sized>(
    store: &S,
    query: &PlantQuery,
    config: &EngineConfig,
) -> Result<PlantQueryResponse, QueryError> {
    // Build
    if query.and_or != CombinationMode::And {
        warn!(mode = ?query.and_or, "rejecting plant query");
        return Err(QueryError::UnsupportedCombination(query.and_or));
    }
    let viewport = query.map_boundary.to_polygon()
        .inspect_err(|err| warn!(%err, "rejecting plant query"))?;
    debug!(plants = query.intersecting_plants.len(), "built viewport polygon");

    // Narrow
    let region = combine(store, &viewport, &query.intersecting_plants, config)?;
    if region.is_empty() {
        info!("search region is empty, skipping lookups");
        return Ok(PlantQueryResponse::empty());
    }

    // Serve
    let region = normalize(&region);
    let (trails, plant_ids) = rayon::join(
        || store.find_trails_intersecting(region.as_multi_polygon()),
        || store.find_distribution_ids_intersecting(region.as_multi_polygon()),
    );
    let (trails, plant_ids) = (trails?, plant_ids?);

    let mut names = if plant_ids.is_empty() { Vec::new() } else { store.lookup_plant_names(&plant_ids)? };
    if config.dedupe_plant_names {
        dedupe(&mut names);
    }

    info!(
        area = region.area(),
        components = region.components().len(),
        trails = trails.len(),
        plants = plant_ids.len(),
        "plant query served"
    );

    Ok(PlantQueryResponse {
        new_bounds: region.envelope().map(Bounds::from),
        intersection: project(&region, config.projection),
        visible_trails: trails_to_views(&trails),
        visible_plants: names,
    })
}

/// Trails intersecting the viewport, with no plant narrowing.
pub fn get_trails<S: SpatialStore + ?Sized>(store: &S, viewport: &Viewport) -> Result<VisibleTrails, QueryError> {
    let polygon = viewport.to_polygon()
        .inspect_err(|err| warn!(%err, "rejecting trail query"))?;
    let region = normalize(&SearchRegion::from(polygon));

    let trails = store.find_trails_intersecting(region.as_multi_polygon())?;
    debug!(trails = trails.len(), "trail query served");
    Ok(trails_to_views(&trails))
}

/// Drop repeated names, keeping the first occurrence of each.
fn dedupe(names: &mut Vec<String>) {
    let mut seen = AHashSet::with_capacity(names.len());
    names.retain(|name| seen.insert(name.clone()));
}
