use citytour_core::{Cost, DistanceMatrix, NodeId};

use super::types::SearchStats;

/// Working state of one tour search. Owned by a single call and dropped when it returns.
pub struct SearchContext<'a> {
    pub matrix: &'a DistanceMatrix,
    pub prune: bool,

    // Start city stays at index 0, the rest get permuted in place
    pub cities: Vec<NodeId>,

    // Best complete ordering found so far
    pub best_cost: Option<Cost>,
    pub best_order: Vec<NodeId>,

    pub stats: SearchStats,
}

impl<'a> SearchContext<'a> {
    pub fn new(matrix: &'a DistanceMatrix, num_nodes: usize, start: NodeId, prune: bool) -> Self {
        let mut cities = Vec::with_capacity(num_nodes);
        cities.push(start);
        cities.extend((0..num_nodes).filter(|&city| city != start));

        SearchContext {
            matrix,
            prune,
            best_order: vec![start; num_nodes],
            cities,
            best_cost: None,
            stats: SearchStats::default(),
        }
    }

    #[inline(always)]
    pub fn improves(&self, cost: Cost) -> bool {
        self.best_cost.map_or(true, |best| cost < best)
    }
}
