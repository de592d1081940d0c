use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{matrix::DistanceMatrix, Cost, Error, NodeId, Result, WeightedGraph};

/// Minimum cost between two nodes and the route achieving it.
///
/// `distance == None` with an empty `path` means the target is unreachable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPath {
    pub distance: Option<Cost>,
    pub path: Vec<NodeId>,
}

impl ShortestPath {
    pub fn unreachable() -> Self {
        Self {
            distance: None,
            path: Vec::new(),
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.distance.is_some()
    }
}

/// Result of one single-source Dijkstra run.
#[derive(Clone, Debug)]
pub struct ShortestPathTree {
    source: NodeId,
    dist: Vec<Option<Cost>>,
    parent: Vec<Option<NodeId>>,
}

impl ShortestPathTree {
    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn distance(&self, target: NodeId) -> Option<Cost> {
        self.dist.get(target).copied().flatten()
    }

    pub fn distances(&self) -> &[Option<Cost>] {
        &self.dist
    }

    /// Nodes from the source to `target` inclusive. Empty when `target` is unreachable.
    pub fn path_to(&self, target: NodeId) -> Vec<NodeId> {
        if self.distance(target).is_none() {
            return Vec::new();
        }

        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            path.push(node);
            current = self.parent[node];
        }
        path.reverse();
        path
    }

    pub fn shortest_path(&self, target: NodeId) -> ShortestPath {
        ShortestPath {
            distance: self.distance(target),
            path: self.path_to(target),
        }
    }
}

/// Unvisited node with the smallest finite distance. Ties go to the lowest index.
#[inline(always)]
fn closest_unvisited(dist: &[Option<Cost>], visited: &[bool]) -> Option<NodeId> {
    let mut best: Option<(NodeId, Cost)> = None;
    for (v, d) in dist.iter().enumerate() {
        if visited[v] {
            continue;
        }
        if let Some(d) = *d {
            if best.map_or(true, |(_, b)| d < b) {
                best = Some((v, d));
            }
        }
    }
    best.map(|(v, _)| v)
}

/// Dense O(N²) Dijkstra from `source` over every node of `graph`.
pub fn shortest_path_tree<G>(graph: &G, source: NodeId) -> Result<ShortestPathTree>
where
    G: WeightedGraph + ?Sized,
{
    Error::check_node(source, graph.num_nodes())?;
    Ok(dijkstra(graph, source))
}

// Caller guarantees source < graph.num_nodes()
fn dijkstra<G>(graph: &G, source: NodeId) -> ShortestPathTree
where
    G: WeightedGraph + ?Sized,
{
    let n = graph.num_nodes();
    let mut dist: Vec<Option<Cost>> = vec![None; n];
    let mut visited = vec![false; n];
    let mut parent: Vec<Option<NodeId>> = vec![None; n];
    dist[source] = Some(0);

    // The last remaining node has nothing left to relax
    for _ in 0..n.saturating_sub(1) {
        let Some(u) = closest_unvisited(&dist, &visited) else {
            break;
        };
        visited[u] = true;
        let du = dist[u].unwrap_or_default();

        for v in 0..n {
            if visited[v] {
                continue;
            }
            let Some(w) = graph.edge_cost(u, v) else {
                continue;
            };
            // A cost past Cost::MAX is never reachable
            let Some(candidate) = du.checked_add(w) else {
                continue;
            };
            if dist[v].map_or(true, |dv| candidate < dv) {
                dist[v] = Some(candidate);
                parent[v] = Some(u);
            }
        }
    }

    ShortestPathTree {
        source,
        dist,
        parent,
    }
}

/// Shortest distance and path between two nodes.
///
/// Out-of-range indices are an error; an unreachable target is not.
/// A query from a node to itself returns distance 0 and the one-node path `[source]`.
pub fn shortest_path<G>(graph: &G, source: NodeId, target: NodeId) -> Result<ShortestPath>
where
    G: WeightedGraph + ?Sized,
{
    Error::check_node(target, graph.num_nodes())?;
    let tree = shortest_path_tree(graph, source)?;
    Ok(tree.shortest_path(target))
}

/// Minimum cost between every ordered pair of nodes, diagonal zero.
///
/// Runs one single-source search per node; every target of that search is
/// read off the same tree, which gives the same values as querying each pair.
pub fn all_pairs_shortest_paths<G>(graph: &G) -> DistanceMatrix
where
    G: WeightedGraph + ?Sized,
{
    let n = graph.num_nodes();
    if !graph.is_symmetric() {
        warn!("network costs are not symmetric, distance matrix will not be either");
    }
    debug!("computing shortest paths between all {} pairs", n * n.saturating_sub(1));

    let mut cells = Vec::with_capacity(n * n);
    for source in 0..n {
        let tree = dijkstra(graph, source);
        cells.extend((0..n).map(|target| {
            if target == source {
                Some(0)
            } else {
                tree.distance(target)
            }
        }));
    }

    let matrix = DistanceMatrix::from_cells(n, cells);
    debug!(
        "distance matrix ready: {} unreachable pairs",
        matrix.rows().flatten().filter(|c| c.is_none()).count()
    );
    matrix
}
