use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use searchgeom::Viewport;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::cli::{Cli, PlantsArgs, TrailsArgs};
use crate::config::EngineConfig;
use crate::query::{get_plants, get_trails};
use crate::store::MemoryStore;
use crate::wire::PlantQuery;

/// Reads a JSON body from the file at `path`.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("Failed to read JSON file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse JSON file: {}", path.display()))
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    match &cli.config {
        Some(path) => EngineConfig::read_from_file(path),
        None => Ok(EngineConfig::default()),
    }
}

fn load_store(data: &Path) -> Result<MemoryStore> {
    let store = MemoryStore::read_from_file(data)?;
    info!(plants = store.num_plants(), trails = store.num_trails(), data = %data.display(), "loaded dataset");
    Ok(store)
}

pub fn plants(cli: &Cli, args: &PlantsArgs) -> Result<()> {
    let config = load_config(cli)?;
    let store = load_store(&args.data)?;
    let query: PlantQuery = read_json(&args.request)?;

    let response = get_plants(&store, &query, &config)
        .with_context(|| format!("Plant query failed: {}", args.request.display()))?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

pub fn trails(_cli: &Cli, args: &TrailsArgs) -> Result<()> {
    let store = load_store(&args.data)?;
    let viewport: Viewport = read_json(&args.viewport)?;

    let trails = get_trails(&store, &viewport)
        .with_context(|| format!("Trail query failed: {}", args.viewport.display()))?;

    println!("{}", serde_json::to_string_pretty(&trails)?);
    Ok(())
}
