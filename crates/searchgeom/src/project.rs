use geo::{LineString, Polygon};
use serde::{Deserialize, Serialize};

use crate::latlng::LatLng;
use crate::region::SearchRegion;

/// Which components of a region are surfaced to the client.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
    /// Only the first component. The map client draws a single outline.
    #[default]
    Primary,
    /// Every component, in region order.
    All,
}

/// Flatten a normalized region into rings of `{lat, lng}` pairs.
///
/// Each surfaced polygon contributes its exterior ring followed by its holes.
/// Rings keep their own vertex order, closing coordinate included; winding is
/// fixed upstream and never touched here.
pub fn project(region: &SearchRegion, mode: ProjectionMode) -> Vec<Vec<LatLng>> {
    let polygons: &[Polygon<f64>] = match mode {
        ProjectionMode::Primary => region.components().get(..1).unwrap_or(&[]),
        ProjectionMode::All => region.components(),
    };

    polygons.iter()
        .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
        .map(ring_to_points)
        .collect()
}

fn ring_to_points(ring: &LineString<f64>) -> Vec<LatLng> {
    ring.coords().map(|&c| LatLng::from(c)).collect()
}
