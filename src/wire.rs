//! JSON bodies exchanged with the map client.

use std::collections::BTreeMap;

use searchgeom::{Bounds, LatLng, Viewport};
use serde::{Deserialize, Serialize};

use crate::store::TrailRecord;
use crate::types::{PlantId, TrailId};

/// How constraint plants combine. Only `And` is implemented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CombinationMode {
    /// The region is where every constraint plant occurs.
    #[default]
    #[serde(alias = "and")]
    And,
    /// The region is where any constraint plant occurs. Rejected.
    #[serde(alias = "or")]
    Or,
}

/// A plant query: the viewport plus "must co-occur with" plants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantQuery {
    pub map_boundary: Viewport,
    #[serde(default)]
    pub intersecting_plants: Vec<PlantId>,
    #[serde(default)]
    pub and_or: CombinationMode,
}

/// A trail as drawn by the client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrailView {
    pub path: Vec<LatLng>,
    pub name: String,
    pub trailhead: LatLng,
}

impl From<&TrailRecord> for TrailView {
    fn from(trail: &TrailRecord) -> Self {
        Self {
            path: trail.path.coords().map(|&c| LatLng::from(c)).collect(),
            name: trail.name.clone(),
            trailhead: LatLng::from(trail.trailhead),
        }
    }
}

pub type VisibleTrails = BTreeMap<TrailId, TrailView>;

/// Build the trail map sent to the client, keyed by trail number.
pub fn trails_to_views(trails: &[TrailRecord]) -> VisibleTrails {
    trails.iter().map(|t| (t.trail_id, TrailView::from(t))).collect()
}

/// Result of a plant query.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlantQueryResponse {
    /// Envelope of the final region; `None` when the region is empty.
    pub new_bounds: Option<Bounds>,
    /// Boundary rings of the region, as `{lat, lng}` points.
    pub intersection: Vec<Vec<LatLng>>,
    pub visible_trails: VisibleTrails,
    /// Scientific names, then alternate names. May repeat a plant.
    pub visible_plants: Vec<String>,
}

impl PlantQueryResponse {
    /// The answer for a region that narrowed to nothing.
    pub fn empty() -> Self { Self::default() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_parses_client_field_names() {
        let body = json!({
            "mapBoundary": {"north": 38.0, "south": 37.0, "east": -122.0, "west": -123.0},
            "intersectingPlants": [12, 40],
            "andOr": "AND",
        });
        let query: PlantQuery = serde_json::from_value(body).unwrap();
        assert_eq!(query.intersecting_plants, vec![PlantId(12), PlantId(40)]);
        assert_eq!(query.and_or, CombinationMode::And);
        assert_eq!(query.map_boundary.west, -123.0);
    }

    #[test]
    fn missing_mode_defaults_to_and() {
        let body = json!({"mapBoundary": {"north": 1.0, "south": 0.0, "east": 1.0, "west": 0.0}});
        let query: PlantQuery = serde_json::from_value(body).unwrap();
        assert!(query.intersecting_plants.is_empty());
        assert_eq!(query.and_or, CombinationMode::And);
    }

    #[test]
    fn or_mode_parses() {
        let mode: CombinationMode = serde_json::from_str("\"OR\"").unwrap();
        assert_eq!(mode, CombinationMode::Or);
    }

    #[test]
    fn empty_response_serializes_with_null_bounds() {
        let value = serde_json::to_value(PlantQueryResponse::empty()).unwrap();
        assert_eq!(value, json!({
            "new_bounds": null,
            "intersection": [],
            "visible_trails": {},
            "visible_plants": [],
        }));
    }
}
