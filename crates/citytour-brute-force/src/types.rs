use std::fmt;

use citytour_core::{Cost, NodeId};

/// Closed tour: starts and ends at the same city and visits every other city once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tour {
    /// `num_nodes + 1` entries, first and last equal.
    pub order: Vec<NodeId>,
    pub cost: Cost,
}

impl Tour {
    pub fn start(&self) -> Option<NodeId> {
        self.order.first().copied()
    }

    /// Number of stops including the return to the start.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Consecutive `(from, to)` pairs, closing leg included.
    pub fn legs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.order.windows(2).map(|leg| (leg[0], leg[1]))
    }

    /// The same cycle walked in the opposite direction.
    pub fn reversed(&self) -> Tour {
        let mut order = self.order.clone();
        order.reverse();
        Tour {
            order,
            cost: self.cost,
        }
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, city) in self.order.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{city}")?;
        }
        write!(f, " (cost {})", self.cost)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Complete orderings whose closing leg was costed.
    pub evaluated: u64,
    /// Partial orderings cut off before completion.
    pub pruned: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    /// `None` when no ordering connects every city (disconnected network).
    pub best: Option<Tour>,
    pub stats: SearchStats,
}
