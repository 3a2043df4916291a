//! Summary statistics over a row sequence (full or filtered). Stateless and
//! pure; cheap enough to recompute on every filter change.

use crate::sheet::Row;

/// Aggregates shown alongside the table: row count plus the order-cost and
/// release-quantity sums.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SummaryStats {
    pub total_rows: usize,
    pub total_order_cost: f64,
    pub total_release_quantity: f64,
}

/// Computes [`SummaryStats`] over any borrowed row sequence. Cost and
/// quantity values coerce leniently (numbers as-is, text with thousands
/// separators stripped); values that fail to coerce contribute zero rather
/// than erroring. Never mutates its input.
pub fn summarize<'a, I>(rows: I) -> SummaryStats
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut stats = SummaryStats::default();
    for row in rows {
        stats.total_rows += 1;
        if let Some(cost) = row.order_cost.as_number() {
            stats.total_order_cost += cost;
        }
        if let Some(quantity) = row.release_quantity.as_number() {
            stats.total_release_quantity += quantity;
        }
    }
    stats
}
