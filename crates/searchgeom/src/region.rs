use geo::{Area, BoundingRect, MultiPolygon, Polygon, Rect, Validation};

/// The working area of a single query.
///
/// Created from the viewport polygon and only ever narrowed. A single polygon
/// is stored as a one-component `MultiPolygon`, since every boolean operation
/// yields one anyway.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchRegion(MultiPolygon<f64>);

impl SearchRegion {
    pub fn empty() -> Self { Self(MultiPolygon::new(vec![])) }

    #[inline] pub fn components(&self) -> &[Polygon<f64>] { &self.0.0 }

    #[inline] pub fn as_multi_polygon(&self) -> &MultiPolygon<f64> { &self.0 }

    #[inline] pub fn into_multi_polygon(self) -> MultiPolygon<f64> { self.0 }

    /// The first component, surfaced to the client as the "primary" region.
    #[inline] pub fn primary(&self) -> Option<&Polygon<f64>> { self.0.0.first() }

    /// Planar area in square degrees.
    #[inline] pub fn area(&self) -> f64 { self.0.unsigned_area() }

    /// True when no area remains. Zero-area slivers count as empty.
    pub fn is_empty(&self) -> bool { self.0.0.is_empty() || self.area() == 0.0 }

    pub fn is_valid(&self) -> bool { self.0.is_valid() }

    /// Minimal axis-aligned rectangle containing the region, `None` if empty.
    pub fn envelope(&self) -> Option<Rect<f64>> { self.0.bounding_rect() }
}

impl From<Polygon<f64>> for SearchRegion {
    fn from(polygon: Polygon<f64>) -> Self { Self(MultiPolygon::new(vec![polygon])) }
}

impl From<MultiPolygon<f64>> for SearchRegion {
    fn from(multi: MultiPolygon<f64>) -> Self { Self(multi) }
}
