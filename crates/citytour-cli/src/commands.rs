use std::io::Write;

use anyhow::{bail, Context, Result};
use citytour_brute_force::{Tour, TourSearch};
use citytour_core::{
    all_pairs_shortest_paths, shortest_path, NodeId, RoadNetwork, ShortestPath, SolverConfig,
    WeightedGraph,
};
use log::info;

use crate::{cli::Command, demo};

pub fn run(
    command: &Command,
    network: &RoadNetwork,
    config: &SolverConfig,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Show => show(network, out),
        Command::Path { from, to } => {
            let from = resolve_city(network, from)?;
            let to = resolve_city(network, to)?;
            path(network, from, to, out)
        }
        Command::Matrix { json } => matrix(network, *json, out),
        Command::Tour { start } => {
            let start = resolve_city(network, start)?;
            tour(network, config, start, out)
        }
        Command::Demo => {
            show(network, out)?;
            for (from, to) in demo::SAMPLE_QUERIES {
                if from < network.num_nodes() && to < network.num_nodes() {
                    path(network, from, to, out)?;
                }
            }
            matrix(network, false, out)?;
            tour(network, config, 0, out)
        }
    }
}

/// Accepts a city index or a case-insensitive city name.
pub fn resolve_city(network: &RoadNetwork, raw: &str) -> Result<NodeId> {
    if let Ok(index) = raw.trim().parse::<NodeId>() {
        if index >= network.num_nodes() {
            bail!(
                "city {index} is out of range (0-{})",
                network.num_nodes() - 1
            );
        }
        return Ok(index);
    }
    network
        .names()
        .iter()
        .position(|name| name.eq_ignore_ascii_case(raw.trim()))
        .with_context(|| format!("unknown city `{raw}`"))
}

fn show(network: &RoadNetwork, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Adjacency matrix (INF = no direct road)")?;
    writeln!(out, "{network}")?;
    Ok(())
}

fn path(network: &RoadNetwork, from: NodeId, to: NodeId, out: &mut impl Write) -> Result<()> {
    let result = shortest_path(network, from, to)?;
    write_path(network, from, to, &result, out)
}

fn write_path(
    network: &RoadNetwork,
    from: NodeId,
    to: NodeId,
    result: &ShortestPath,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "{} -> {}", city(network, from), city(network, to))?;
    match result.distance {
        None => writeln!(out, "  no path found")?,
        Some(distance) => {
            let stops: Vec<&str> = result.path.iter().map(|&c| city(network, c)).collect();
            writeln!(out, "  distance: {distance}")?;
            writeln!(out, "  path: {}", stops.join(" -> "))?;
        }
    }
    writeln!(out)?;
    Ok(())
}

fn matrix(network: &RoadNetwork, json: bool, out: &mut impl Write) -> Result<()> {
    let matrix = all_pairs_shortest_paths(network);
    if json {
        serde_json::to_writer(&mut *out, &matrix).context("failed to encode distance matrix")?;
        writeln!(out)?;
    } else {
        writeln!(out, "Shortest distance matrix")?;
        writeln!(out, "{}", matrix.labeled(network.names()))?;
    }
    Ok(())
}

fn tour(
    network: &RoadNetwork,
    config: &SolverConfig,
    start: NodeId,
    out: &mut impl Write,
) -> Result<()> {
    // Recomputed on every run, so roads added on the command line are always seen
    let matrix = all_pairs_shortest_paths(network);
    let search = TourSearch::new(config.clone())?;
    let outcome = search.run(&matrix, network.num_nodes(), start)?;
    info!(
        "tour search: evaluated={} pruned={}",
        outcome.stats.evaluated, outcome.stats.pruned
    );
    write_tour(network, outcome.best.as_ref(), out)
}

fn write_tour(network: &RoadNetwork, tour: Option<&Tour>, out: &mut impl Write) -> Result<()> {
    let Some(tour) = tour else {
        writeln!(out, "No valid tour: some cities are not connected")?;
        return Ok(());
    };

    writeln!(out, "Optimal tour, total distance {}", tour.cost)?;
    for (step, &c) in tour.order.iter().enumerate() {
        writeln!(out, "  {:>2}. {} (city {c})", step + 1, city(network, c))?;
    }
    Ok(())
}

fn city(network: &RoadNetwork, index: NodeId) -> &str {
    network.name(index).unwrap_or("?")
}
