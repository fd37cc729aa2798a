use geo::{Coord, Rect};
use serde::{Deserialize, Serialize};

/// A coordinate pair as the map client expects it: latitude first.
///
/// Internally every geometry is longitude-first (`x = lng`, `y = lat`); this
/// type only exists at the wire boundary.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self { Self { lat, lng } }

    /// Back to the internal `(x = lng, y = lat)` order.
    #[inline]
    pub fn to_coord(self) -> Coord<f64> { Coord { x: self.lng, y: self.lat } }
}

impl From<Coord<f64>> for LatLng {
    #[inline]
    fn from(c: Coord<f64>) -> Self { Self { lat: c.y, lng: c.x } }
}

impl From<geo::Point<f64>> for LatLng {
    #[inline]
    fn from(p: geo::Point<f64>) -> Self { p.0.into() }
}

/// Axis-aligned envelope in compass terms.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl From<Rect<f64>> for Bounds {
    fn from(rect: Rect<f64>) -> Self {
        Self {
            south: rect.min().y,
            west: rect.min().x,
            north: rect.max().y,
            east: rect.max().x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_swaps_to_lat_first() {
        let ll = LatLng::from(Coord { x: -122.5, y: 37.25 });
        assert_eq!(ll, LatLng::new(37.25, -122.5));
        assert_eq!(ll.to_coord(), Coord { x: -122.5, y: 37.25 });
    }

    #[test]
    fn bounds_from_rect() {
        let rect = Rect::new(Coord { x: -123.0, y: 37.0 }, Coord { x: -122.0, y: 38.0 });
        let b = Bounds::from(rect);
        assert_eq!((b.south, b.west, b.north, b.east), (37.0, -123.0, 38.0, -122.0));
    }
}
