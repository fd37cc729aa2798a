use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// Trail and plant search over a local dataset
#[derive(Parser, Debug)]
#[command(name = "hikeflora", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Engine config file (JSON); defaults apply when omitted
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a plant query and print the response JSON
    Plants(PlantsArgs),

    /// List the trails inside a viewport
    Trails(TrailsArgs),
}

#[derive(Args, Debug)]
pub struct PlantsArgs {
    /// Dataset file with plants, distribution polygons and trails
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub data: PathBuf,

    /// Request body: {mapBoundary, intersectingPlants, andOr}
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub request: PathBuf,
}

#[derive(Args, Debug)]
pub struct TrailsArgs {
    /// Dataset file with plants, distribution polygons and trails
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub data: PathBuf,

    /// Viewport body: {north, south, east, west}
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub viewport: PathBuf,
}
