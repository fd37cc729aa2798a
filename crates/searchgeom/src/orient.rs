use geo::orient::{Direction, Orient};
use geo::winding_order::{Winding, WindingOrder};
use geo::{LineString, Polygon};
use tracing::error;

use crate::region::SearchRegion;

/// Force the canonical winding on every component: exterior rings clockwise,
/// holes counter-clockwise. This is what the store's spatial predicates and
/// the client renderer both assume.
///
/// Pure: the input is left alone and a new region is returned. Applying it
/// twice is the same as applying it once.
pub fn normalize(region: &SearchRegion) -> SearchRegion {
    let oriented = SearchRegion::from(region.as_multi_polygon().orient(Direction::Reversed));
    if !is_normalized(&oriented) {
        error!(components = oriented.components().len(), "region winding not canonical after normalization");
    }
    oriented
}

/// Check the canonical winding on every ring of every component.
/// Zero-area rings have no winding and are accepted as-is.
pub fn is_normalized(region: &SearchRegion) -> bool {
    region.components().iter().all(polygon_is_normalized)
}

fn polygon_is_normalized(polygon: &Polygon<f64>) -> bool {
    winds(polygon.exterior(), WindingOrder::Clockwise)
        && polygon.interiors().iter().all(|hole| winds(hole, WindingOrder::CounterClockwise))
}

#[inline]
fn winds(ring: &LineString<f64>, expected: WindingOrder) -> bool {
    ring.winding_order().is_none_or(|order| order == expected)
}
