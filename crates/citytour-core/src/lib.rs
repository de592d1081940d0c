#![deny(clippy::all)]
//! Shared types for city tours: the road network, the all-pairs distance
//! matrix and the Dijkstra engine that fills it.

pub mod config;
pub mod dijkstra;
mod error;
pub mod graph;
pub mod matrix;

/// Index of a city, in `0..num_nodes`.
pub type NodeId = usize;

/// Accumulated travel cost. Road weights are `u32`, sums are widened so they never overflow.
pub type Cost = u64;

pub use config::{SolverConfig, DEFAULT_MAX_NODES, HARD_MAX_NODES};
pub use dijkstra::{
    all_pairs_shortest_paths, shortest_path, shortest_path_tree, ShortestPath, ShortestPathTree,
};
pub use error::{Error, Result};
pub use graph::{NetworkSpec, Road, RoadNetwork, WeightedGraph};
pub use matrix::DistanceMatrix;
