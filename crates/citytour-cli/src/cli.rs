use std::path::PathBuf;

use citytour_core::Road;
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

/// Shortest paths and optimal closed tours over a small road network.
#[derive(Debug, Parser)]
#[command(name = "citytour", version, about)]
pub struct Cli {
    /// JSON network description (`cities` + `roads`). Defaults to the built-in ten-city network.
    #[arg(long, global = true)]
    pub network: Option<PathBuf>,

    /// JSON solver configuration (`max_nodes`, `prune_partial_tours`).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Extra road `FROM,TO,DISTANCE` added before the command runs. Repeatable.
    #[arg(long = "road", global = true, value_parser = parse_road)]
    pub roads: Vec<Road>,

    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Prefix log lines with a millisecond timestamp.
    #[arg(long, global = true)]
    pub log_timestamp: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the adjacency matrix of the network
    Show,
    /// Shortest path between two cities (index or name)
    Path {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// Print the all-pairs shortest distance matrix
    Matrix {
        /// Emit nested JSON rows, `null` for unreachable pairs
        #[arg(long)]
        json: bool,
    },
    /// Optimal closed tour visiting every city once
    Tour {
        #[arg(long, default_value = "0")]
        start: String,
    },
    /// Matrix, two sample paths and the tour from city 0
    Demo,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum LogLevel {
    Error,
    #[value(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

fn parse_road(raw: &str) -> Result<Road, String> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [from, to, distance] = parts.as_slice() else {
        return Err(format!("expected FROM,TO,DISTANCE, got `{raw}`"));
    };
    let field = |name: &str, value: &str| {
        value
            .parse::<u32>()
            .map_err(|e| format!("invalid {name} `{value}`: {e}"))
    };
    Ok(Road {
        from: field("from", *from)? as usize,
        to: field("to", *to)? as usize,
        distance: field("distance", *distance)?,
    })
}
