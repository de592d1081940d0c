#![deny(clippy::all)]
//! Exact optimal closed tour over a precomputed distance matrix.
//!
//! The start city is pinned at position 0 and every ordering of the remaining
//! `n - 1` cities is generated by in-place swap backtracking, so the work grows
//! as `(n - 1)!`. Node counts are capped by [`SolverConfig::max_nodes`].

mod context;
mod tsp;
mod types;

use citytour_core::{DistanceMatrix, Error, NodeId, Result, SolverConfig};
use log::{debug, info};

use context::SearchContext;

pub use tsp::tour_cost;
pub use types::{SearchOutcome, SearchStats, Tour};

/// Number of orderings the search enumerates for `num_nodes` cities: `(num_nodes - 1)!`.
///
/// `None` once the count no longer fits in a `u64` (from 22 cities on).
pub fn permutation_count(num_nodes: usize) -> Option<u64> {
    if num_nodes == 0 {
        return Some(0);
    }
    (2..num_nodes as u64).try_fold(1u64, |acc, k| acc.checked_mul(k))
}

/// Reusable entry point carrying the solver configuration.
#[derive(Clone, Debug, Default)]
pub struct TourSearch {
    config: SolverConfig,
}

impl TourSearch {
    pub fn new(config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Searches the cities `0..num_nodes` of `matrix` for the cheapest closed tour from `start`.
    ///
    /// Ties keep the ordering generated first.
    pub fn run(
        &self,
        matrix: &DistanceMatrix,
        num_nodes: usize,
        start: NodeId,
    ) -> Result<SearchOutcome> {
        self.config.check_node_count(num_nodes)?;
        if num_nodes > matrix.len() {
            return Err(Error::invalid_input(format!(
                "tour over {num_nodes} cities needs a matrix of at least that size, got {}",
                matrix.len()
            )));
        }
        if start >= num_nodes {
            return Err(Error::NodeOutOfRange {
                index: start,
                len: num_nodes,
            });
        }

        if num_nodes == 1 {
            return Ok(SearchOutcome {
                best: Some(Tour {
                    order: vec![start, start],
                    cost: 0,
                }),
                stats: SearchStats {
                    evaluated: 1,
                    pruned: 0,
                },
            });
        }

        // num_nodes <= HARD_MAX_NODES here, so the count always fits
        info!(
            "solving tour: cities={num_nodes} start={start} orderings={}",
            permutation_count(num_nodes).unwrap_or(u64::MAX)
        );

        let prune = self.config.prune_partial_tours;
        let mut ctx = SearchContext::new(matrix, num_nodes, start, prune);
        tsp::permute(&mut ctx, 1, Some(0));

        debug!(
            "search done: evaluated={} pruned={} best={:?}",
            ctx.stats.evaluated, ctx.stats.pruned, ctx.best_cost
        );

        let best = ctx.best_cost.map(|cost| {
            let mut order = ctx.best_order;
            order.push(start);
            Tour { order, cost }
        });

        Ok(SearchOutcome {
            best,
            stats: ctx.stats,
        })
    }
}

/// Cheapest closed tour from `start` over cities `0..num_nodes`, or `None` when the
/// cities cannot all be connected.
pub fn solve_optimal_tour(
    matrix: &DistanceMatrix,
    num_nodes: usize,
    start: NodeId,
    config: &SolverConfig,
) -> Result<Option<Tour>> {
    let search = TourSearch::new(config.clone())?;
    Ok(search.run(matrix, num_nodes, start)?.best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_of_four() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![Some(0), Some(10), Some(20), Some(10)],
            vec![Some(10), Some(0), Some(10), Some(20)],
            vec![Some(20), Some(10), Some(0), Some(10)],
            vec![Some(10), Some(20), Some(10), Some(0)],
        ])
        .unwrap()
    }

    #[test]
    fn permutation_count_is_factorial_of_the_rest() {
        assert_eq!(permutation_count(0), Some(0));
        assert_eq!(permutation_count(1), Some(1));
        assert_eq!(permutation_count(2), Some(1));
        assert_eq!(permutation_count(4), Some(6));
        assert_eq!(permutation_count(10), Some(362_880));
        assert_eq!(permutation_count(21), Some(2_432_902_008_176_640_000));
        assert_eq!(permutation_count(22), None);
        assert_eq!(permutation_count(usize::MAX), None);
    }

    #[test]
    fn ring_tour_goes_around() {
        let tour = solve_optimal_tour(&ring_of_four(), 4, 0, &SolverConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(tour.cost, 40);
        assert!(tour.order == vec![0, 1, 2, 3, 0] || tour.order == vec![0, 3, 2, 1, 0]);
        assert_eq!(tour.len(), 5);
    }

    #[test]
    fn single_city_is_trivial_tour() {
        let m = DistanceMatrix::from_rows(vec![vec![Some(0)]]).unwrap();
        let tour = solve_optimal_tour(&m, 1, 0, &SolverConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(tour.order, vec![0, 0]);
        assert_eq!(tour.cost, 0);
    }

    #[test]
    fn invalid_inputs_are_errors() {
        let m = ring_of_four();
        let config = SolverConfig::default();
        assert!(matches!(
            solve_optimal_tour(&m, 0, 0, &config),
            Err(Error::InvalidNodeCount { count: 0, .. })
        ));
        assert!(matches!(
            solve_optimal_tour(&m, 4, 4, &config),
            Err(Error::NodeOutOfRange { index: 4, len: 4 })
        ));
        assert!(matches!(
            solve_optimal_tour(&m, 5, 0, &config),
            Err(Error::InvalidInput(_))
        ));

        let tight = SolverConfig {
            max_nodes: 3,
            ..SolverConfig::default()
        };
        assert!(matches!(
            solve_optimal_tour(&m, 4, 0, &tight),
            Err(Error::InvalidNodeCount { count: 4, max: 3 })
        ));
    }

    #[test]
    fn prefix_of_a_larger_matrix_can_be_searched() {
        let tour = solve_optimal_tour(&ring_of_four(), 3, 0, &SolverConfig::default())
            .unwrap()
            .unwrap();
        // Every triangle costs the same, the first ordering generated wins
        assert_eq!(tour.order, vec![0, 1, 2, 0]);
        assert_eq!(tour.cost, 40);
    }

    #[test]
    fn unpruned_run_reports_every_ordering() {
        let search = TourSearch::new(SolverConfig {
            prune_partial_tours: false,
            ..SolverConfig::default()
        })
        .unwrap();
        let outcome = search.run(&ring_of_four(), 4, 2).unwrap();
        assert_eq!(Some(outcome.stats.evaluated), permutation_count(4));
        let best = outcome.best.unwrap();
        assert_eq!(best.start(), Some(2));
        assert_eq!(best.order.last(), Some(&2));
        assert_eq!(best.cost, 40);
    }

    #[test]
    fn tours_whose_cost_overflows_are_never_chosen() {
        // Ring of huge legs plus two cheap chords: walking the ring overflows Cost
        let b = u64::MAX / 3;
        let m = DistanceMatrix::from_rows(vec![
            vec![Some(0), Some(b), Some(1), Some(b)],
            vec![Some(b), Some(0), Some(b), Some(1)],
            vec![Some(1), Some(b), Some(0), Some(b)],
            vec![Some(b), Some(1), Some(b), Some(0)],
        ])
        .unwrap();

        for prune_partial_tours in [true, false] {
            let config = SolverConfig {
                prune_partial_tours,
                ..SolverConfig::default()
            };
            let tour = solve_optimal_tour(&m, 4, 0, &config).unwrap().unwrap();
            assert_eq!(tour.order, vec![0, 1, 3, 2, 0]);
            assert_eq!(tour.cost, 2 * b + 2);
            assert_eq!(tour_cost(&m, &tour.order[..4]), Some(tour.cost));
        }
    }

    #[test]
    fn every_ordering_overflowing_means_no_tour() {
        let huge = u64::MAX / 2;
        let m = DistanceMatrix::from_rows(vec![
            vec![Some(0), Some(huge), Some(huge)],
            vec![Some(huge), Some(0), Some(huge)],
            vec![Some(huge), Some(huge), Some(0)],
        ])
        .unwrap();
        for prune_partial_tours in [true, false] {
            let config = SolverConfig {
                prune_partial_tours,
                ..SolverConfig::default()
            };
            assert_eq!(solve_optimal_tour(&m, 3, 0, &config).unwrap(), None);
        }
    }

    #[test]
    fn tour_display_lists_stops() {
        let tour = Tour {
            order: vec![0, 2, 1, 0],
            cost: 12,
        };
        assert_eq!(tour.to_string(), "0 -> 2 -> 1 -> 0 (cost 12)");
        assert_eq!(tour.legs().collect::<Vec<_>>(), vec![(0, 2), (2, 1), (1, 0)]);
        assert_eq!(tour.reversed().order, vec![0, 1, 2, 0]);
        assert_eq!(tour.start(), Some(0));

        let empty = Tour {
            order: Vec::new(),
            cost: 0,
        };
        assert_eq!(empty.start(), None);
        assert!(empty.is_empty());
    }
}
