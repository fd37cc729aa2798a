use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a plant record in the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlantId(pub u32);

/// Identifies a trail record in the store (the trail number).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrailId(pub u32);

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "PlantId({})", self.0) }
}

impl fmt::Display for TrailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "TrailId({})", self.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_bare_numbers() {
        assert_eq!(serde_json::to_string(&PlantId(7)).unwrap(), "7");
        let ids: Vec<TrailId> = serde_json::from_str("[3, 1]").unwrap();
        assert_eq!(ids, vec![TrailId(3), TrailId(1)]);
    }

    #[test]
    fn display() {
        assert_eq!(PlantId(42).to_string(), "PlantId(42)");
        assert_eq!(TrailId(5).to_string(), "TrailId(5)");
    }
}
