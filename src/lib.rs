#![doc = "Hikeflora query engine: trails and plants inside a viewport narrowed by plant co-occurrence"]
pub mod cli;
pub mod combine;
pub mod commands;
pub mod config;
pub mod error;
pub mod query;
pub mod store;
pub mod types;
pub mod wire;

#[doc(inline)]
pub use config::EngineConfig;

#[doc(inline)]
pub use error::{QueryError, StoreError};

#[doc(inline)]
pub use query::{get_plants, get_trails};

#[doc(inline)]
pub use store::{MemoryStore, PlantRecord, SpatialStore, TrailRecord};

#[doc(inline)]
pub use types::{PlantId, TrailId};

#[doc(inline)]
pub use wire::{CombinationMode, PlantQuery, PlantQueryResponse, TrailView};
