use citytour_core::{Cost, DistanceMatrix, NodeId};

use super::context::SearchContext;

/// Total cost of visiting `order` and returning to its first city.
///
/// `None` if any leg, the closing one included, is unreachable or the sum overflows [`Cost`].
pub fn tour_cost(matrix: &DistanceMatrix, order: &[NodeId]) -> Option<Cost> {
    let (&first, &last) = (order.first()?, order.last()?);
    let mut total: Cost = 0;
    for leg in order.windows(2) {
        total = total.checked_add(matrix.get(leg[0], leg[1])?)?;
    }
    total.checked_add(matrix.get(last, first)?)
}

/// `prefix + leg`, with an unrepresentable sum treated like a missing leg.
#[inline(always)]
fn extend(prefix: Option<Cost>, leg: Option<Cost>) -> Option<Cost> {
    prefix.zip(leg).and_then(|(p, l)| p.checked_add(l))
}

/// Fixes position `start` with every remaining city in turn (swap, recurse, swap back).
///
/// `prefix` is the cost of `cities[..start]`, `None` once one of its legs is unreachable
/// or the running sum overflows.
pub fn permute(ctx: &mut SearchContext, start: usize, prefix: Option<Cost>) {
    let n = ctx.cities.len();

    // Base Case: every position fixed, close the loop
    if start == n {
        ctx.stats.evaluated += 1;
        let closing = ctx.matrix.get(ctx.cities[n - 1], ctx.cities[0]);
        let Some(total) = extend(prefix, closing) else {
            return;
        };
        if ctx.improves(total) {
            ctx.best_cost = Some(total);
            ctx.best_order.copy_from_slice(&ctx.cities);
        }
        return;
    }

    for i in start..n {
        ctx.cities.swap(start, i);

        let leg = ctx.matrix.get(ctx.cities[start - 1], ctx.cities[start]);
        let extended = extend(prefix, leg);

        // A prefix that is already unreachable or no cheaper than the best tour
        // cannot produce a strictly better one
        let hopeless = match extended {
            None => true,
            Some(cost) => !ctx.improves(cost),
        };
        if ctx.prune && hopeless {
            ctx.stats.pruned += 1;
        } else {
            permute(ctx, start + 1, extended);
        }

        ctx.cities.swap(start, i);
    }
}
