use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Cost, Error, NodeId, Result, SolverConfig};

/// Longest city name kept by [`RoadNetwork::set_name`], in characters.
pub const MAX_NAME_LEN: usize = 49;

/// Read-only view of a weighted undirected network.
///
/// Implementations must keep `edge_cost(i, i) == Some(0)` and
/// `edge_cost(i, j) == edge_cost(j, i)`. `None` means there is no direct edge.
pub trait WeightedGraph {
    fn num_nodes(&self) -> usize;

    fn edge_cost(&self, from: NodeId, to: NodeId) -> Option<Cost>;

    fn is_symmetric(&self) -> bool {
        let n = self.num_nodes();
        (0..n).all(|i| (i + 1..n).all(|j| self.edge_cost(i, j) == self.edge_cost(j, i)))
    }
}

/// A road between two cities as written in a network description file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Road {
    pub from: NodeId,
    pub to: NodeId,
    pub distance: u32,
}

/// On-disk description of a network: city names in index order plus the roads.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub cities: Vec<String>,
    #[serde(default)]
    pub roads: Vec<Road>,
}

/// Dense adjacency-matrix road network with named cities.
#[derive(Clone, Debug)]
pub struct RoadNetwork {
    num_nodes: usize,
    // Flattened row-major adjacency, None = no direct road
    adj: Vec<Option<u32>>,
    names: Vec<String>,
}

impl RoadNetwork {
    pub fn new(num_nodes: usize, config: &SolverConfig) -> Result<Self> {
        config.check_node_count(num_nodes)?;

        let mut adj = vec![None; num_nodes * num_nodes];
        for i in 0..num_nodes {
            adj[i * num_nodes + i] = Some(0);
        }

        Ok(Self {
            num_nodes,
            adj,
            names: (0..num_nodes).map(|i| format!("City {i}")).collect(),
        })
    }

    pub fn from_spec(spec: &NetworkSpec, config: &SolverConfig) -> Result<Self> {
        let mut network = Self::new(spec.cities.len(), config)?;
        for (idx, name) in spec.cities.iter().enumerate() {
            network.set_name(idx, name)?;
        }
        for road in &spec.roads {
            network.add_edge(road.from, road.to, road.distance)?;
        }
        Ok(network)
    }

    pub fn from_json_str(raw: &str, config: &SolverConfig) -> Result<Self> {
        let spec: NetworkSpec = serde_json::from_str(raw)?;
        Self::from_spec(&spec, config)
    }

    pub fn to_spec(&self) -> NetworkSpec {
        let mut roads = Vec::new();
        for from in 0..self.num_nodes {
            for to in from + 1..self.num_nodes {
                if let Some(distance) = self.adj[from * self.num_nodes + to] {
                    roads.push(Road { from, to, distance });
                }
            }
        }
        NetworkSpec {
            cities: self.names.clone(),
            roads,
        }
    }

    /// Sets the road between `src` and `dest` in both directions, replacing any previous one.
    pub fn add_edge(&mut self, src: NodeId, dest: NodeId, weight: u32) -> Result<()> {
        Error::check_node(src, self.num_nodes)?;
        Error::check_node(dest, self.num_nodes)?;
        if src == dest {
            return Err(Error::SelfLoop(src));
        }

        self.adj[src * self.num_nodes + dest] = Some(weight);
        self.adj[dest * self.num_nodes + src] = Some(weight);
        Ok(())
    }

    pub fn set_name(&mut self, city: NodeId, name: &str) -> Result<()> {
        Error::check_node(city, self.num_nodes)?;
        self.names[city] = name.chars().take(MAX_NAME_LEN).collect();
        Ok(())
    }

    pub fn name(&self, city: NodeId) -> Option<&str> {
        self.names.get(city).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn road_count(&self) -> usize {
        (0..self.num_nodes)
            .map(|i| {
                (i + 1..self.num_nodes)
                    .filter(|&j| self.adj[i * self.num_nodes + j].is_some())
                    .count()
            })
            .sum()
    }
}

impl WeightedGraph for RoadNetwork {
    fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline(always)]
    fn edge_cost(&self, from: NodeId, to: NodeId) -> Option<Cost> {
        self.adj[from * self.num_nodes + to].map(Cost::from)
    }
}

impl fmt::Display for RoadNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:12}", "")?;
        for i in 0..self.num_nodes {
            write!(f, "{i:>8}")?;
        }
        writeln!(f)?;
        writeln!(f, "{:12}{}", "", "-".repeat(8 * self.num_nodes))?;

        for i in 0..self.num_nodes {
            write!(f, "{:>10}: ", self.names[i])?;
            for j in 0..self.num_nodes {
                match self.adj[i * self.num_nodes + j] {
                    Some(w) => write!(f, "{w:>8}")?,
                    None => write!(f, "{:>8}", "INF")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> RoadNetwork {
        let mut network = RoadNetwork::new(3, &SolverConfig::default()).unwrap();
        network.add_edge(0, 1, 5).unwrap();
        network.add_edge(1, 2, 7).unwrap();
        network
    }

    #[test]
    fn new_network_has_zero_diagonal_and_no_roads() {
        let network = RoadNetwork::new(4, &SolverConfig::default()).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { Some(0) } else { None };
                assert_eq!(network.edge_cost(i, j), expected);
            }
        }
        assert_eq!(network.name(2), Some("City 2"));
        assert_eq!(network.road_count(), 0);
    }

    #[test]
    fn node_count_is_bounded_by_config() {
        let config = SolverConfig::default();
        assert!(RoadNetwork::new(0, &config).is_err());
        assert!(RoadNetwork::new(config.max_nodes + 1, &config).is_err());
    }

    #[test]
    fn add_edge_is_bidirectional_and_overwrites() {
        let mut network = triangle();
        assert_eq!(network.edge_cost(1, 0), Some(5));
        network.add_edge(1, 0, 3).unwrap();
        assert_eq!(network.edge_cost(0, 1), Some(3));
        assert_eq!(network.edge_cost(1, 0), Some(3));
        assert!(network.is_symmetric());
        assert_eq!(network.road_count(), 2);
    }

    #[test]
    fn add_edge_rejects_bad_indices_and_self_loops() {
        let mut network = triangle();
        assert!(matches!(
            network.add_edge(0, 3, 1),
            Err(Error::NodeOutOfRange { index: 3, len: 3 })
        ));
        assert!(matches!(network.add_edge(1, 1, 1), Err(Error::SelfLoop(1))));
        assert_eq!(network.edge_cost(1, 1), Some(0));
    }

    #[test]
    fn long_names_are_truncated() {
        let mut network = triangle();
        network.set_name(0, &"x".repeat(80)).unwrap();
        assert_eq!(network.name(0).map(str::len), Some(MAX_NAME_LEN));
        assert!(network.set_name(9, "nowhere").is_err());
    }

    #[test]
    fn spec_round_trips_through_json() {
        let raw = r#"{
            "cities": ["A", "B", "C"],
            "roads": [{ "from": 0, "to": 2, "distance": 12 }]
        }"#;
        let network = RoadNetwork::from_json_str(raw, &SolverConfig::default()).unwrap();
        assert_eq!(network.name(1), Some("B"));
        assert_eq!(network.edge_cost(2, 0), Some(12));

        let spec = network.to_spec();
        assert_eq!(spec.roads, vec![Road { from: 0, to: 2, distance: 12 }]);
    }

    #[test]
    fn negative_distances_do_not_parse() {
        let raw = r#"{ "cities": ["A", "B"], "roads": [{ "from": 0, "to": 1, "distance": -4 }] }"#;
        assert!(matches!(
            RoadNetwork::from_json_str(raw, &SolverConfig::default()),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn display_marks_missing_roads() {
        let rendered = triangle().to_string();
        assert!(rendered.contains("INF"));
        assert!(rendered.contains("City 1"));
        assert_eq!(rendered.lines().count(), 5);
    }
}
