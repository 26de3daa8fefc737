//! Top-N reduction for compact pie charts.

use model::CategoryAggregate;

/// How many slices a breakdown pie shows.
pub const PIE_SLICES: usize = 3;

/// Keeps the `n` largest entries, largest first.
///
/// The sort is stable, so equal counts keep their original relative order.
/// Fewer than `n` entries are all returned.
pub fn top_n(aggregate: &CategoryAggregate, n: usize) -> CategoryAggregate {
    let mut pairs: Vec<(&str, u64)> = aggregate.iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1));
    pairs.truncate(n);
    CategoryAggregate::from_pairs(pairs)
}
