use std::{fs, io, path::Path, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use citytour_core::{RoadNetwork, SolverConfig, WeightedGraph};

mod cli;
mod commands;
mod demo;
mod logging;

use cli::Cli;

fn load_config(path: Option<&Path>) -> Result<SolverConfig> {
    match path {
        Some(path) => SolverConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(SolverConfig::default()),
    }
}

fn load_network(path: Option<&Path>, config: &SolverConfig) -> Result<RoadNetwork> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read network {}", path.display()))?;
            RoadNetwork::from_json_str(&raw, config)
                .with_context(|| format!("invalid network {}", path.display()))
        }
        None => RoadNetwork::from_spec(&demo::morocco(), config)
            .context("built-in network does not fit the configured node limit"),
    }
}

fn main() -> Result<()> {
    let now = Instant::now();
    let cli = Cli::parse();
    logging::init_logger(cli.log_level, cli.log_timestamp)?;

    let config = load_config(cli.config.as_deref())?;
    debug!("config: {config:?}");

    let mut network = load_network(cli.network.as_deref(), &config)?;
    for road in &cli.roads {
        network
            .add_edge(road.from, road.to, road.distance)
            .with_context(|| {
                format!("cannot add road {},{},{}", road.from, road.to, road.distance)
            })?;
    }
    info!(
        "network: cities={} roads={}",
        network.num_nodes(),
        network.road_count()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(&cli.command, &network, &config, &mut out)?;

    info!("done in {:.3}s", now.elapsed().as_secs_f32());
    Ok(())
}
