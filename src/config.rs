use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use searchgeom::{ProjectionMode, DEFAULT_AREA_TOLERANCE};
use serde::{Deserialize, Serialize};

/// Tunables for the query engine. Every field has a default, so an empty JSON
/// object is a valid config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Which region components are returned as the client boundary.
    pub projection: ProjectionMode,
    /// Relative area change after repair that is logged as a data-quality warning.
    pub repair_area_tolerance: f64,
    /// Skip a constraint plant's distribution polygons that miss the viewport
    /// before unioning them. Does not change results, only work.
    pub prefilter_to_viewport: bool,
    /// Drop repeated names from `visible_plants`, keeping first occurrences.
    pub dedupe_plant_names: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionMode::Primary,
            repair_area_tolerance: DEFAULT_AREA_TOLERANCE,
            prefilter_to_viewport: true,
            dedupe_plant_names: false,
        }
    }
}

impl EngineConfig {
    /// Reads an engine config from a JSON file at `path`.
    pub fn read_from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_object_is_default() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"projection": "all", "dedupe_plant_names": true}}"#).unwrap();

        let config = EngineConfig::read_from_file(file.path()).unwrap();
        assert_eq!(config.projection, ProjectionMode::All);
        assert!(config.dedupe_plant_names);
        assert!(config.prefilter_to_viewport);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = EngineConfig::read_from_file(Path::new("/nonexistent/engine.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/engine.json"));
    }
}
