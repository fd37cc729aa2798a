use geo::{Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The rectangular map extent a user is looking at, in degrees.
///
/// Must satisfy `south < north` and `west < east`; extents crossing the
/// antimeridian are not supported.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ViewportError {
    #[error("invalid viewport: north={north} south={south} east={east} west={west}")]
    InvalidViewport { north: f64, south: f64, east: f64, west: f64 },
}

impl Viewport {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self { north, south, east, west }
    }

    /// Check the ordering invariants. NaN in any field fails.
    pub fn validate(&self) -> Result<(), ViewportError> {
        if self.south < self.north && self.west < self.east {
            Ok(())
        } else {
            Err(ViewportError::InvalidViewport {
                north: self.north,
                south: self.south,
                east: self.east,
                west: self.west,
            })
        }
    }

    /// Build the closed viewport polygon in `(lng, lat)` order.
    ///
    /// Vertices run NE, NW, SW, SE and back to NE, so the exterior ring always
    /// has exactly five coordinates. A rectangle from a valid viewport is
    /// simple, so the result never needs repair.
    pub fn to_polygon(&self) -> Result<Polygon<f64>, ViewportError> {
        self.validate()?;

        let corners = [
            (self.north, self.east),
            (self.north, self.west),
            (self.south, self.west),
            (self.south, self.east),
        ];
        let mut ring = corners.iter()
            .map(|&(lat, lng)| Coord { x: lng, y: lat })
            .collect::<Vec<_>>();
        ring.push(ring[0]);

        Ok(Polygon::new(LineString(ring), vec![]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Area, Validation};

    fn bay_area() -> Viewport { Viewport::new(38.0, 37.0, -122.0, -123.0) }

    #[test]
    fn ring_has_five_coords_in_corner_order() {
        let poly = bay_area().to_polygon().unwrap();
        let coords = poly.exterior().0.clone();
        assert_eq!(coords.len(), 5);
        assert_eq!(coords[0], Coord { x: -122.0, y: 38.0 }); // NE
        assert_eq!(coords[1], Coord { x: -123.0, y: 38.0 }); // NW
        assert_eq!(coords[2], Coord { x: -123.0, y: 37.0 }); // SW
        assert_eq!(coords[3], Coord { x: -122.0, y: 37.0 }); // SE
        assert_eq!(coords[4], coords[0]);
    }

    #[test]
    fn polygon_is_valid_without_repair() {
        let poly = bay_area().to_polygon().unwrap();
        assert!(poly.is_valid());
        assert!((poly.unsigned_area() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn inverted_latitudes_rejected() {
        let err = Viewport::new(37.0, 38.0, -122.0, -123.0).to_polygon().unwrap_err();
        assert!(matches!(err, ViewportError::InvalidViewport { .. }));
    }

    #[test]
    fn degenerate_width_rejected() {
        assert!(Viewport::new(38.0, 37.0, -122.0, -122.0).validate().is_err());
    }

    #[test]
    fn nan_rejected() {
        assert!(Viewport::new(f64::NAN, 37.0, -122.0, -123.0).validate().is_err());
    }
}
