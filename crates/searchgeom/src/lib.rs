//! Pure geometry for search regions: everything between a user's viewport and
//! the rings that are sent back to the map client. No I/O happens here.

pub mod latlng;
pub mod orient;
pub mod project;
pub mod region;
pub mod repair;
pub mod viewport;

pub use latlng::{Bounds, LatLng};
pub use orient::{is_normalized, normalize};
pub use project::{project, ProjectionMode};
pub use region::SearchRegion;
pub use repair::{repair, repair_polygon, Repaired, RepairWarning, DEFAULT_AREA_TOLERANCE};
pub use viewport::{Viewport, ViewportError};
