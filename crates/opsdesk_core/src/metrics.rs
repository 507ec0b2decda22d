//! Aggregate helpers for module summary cards.
//!
//! All helpers run over the full record list and are recomputed on every
//! call. Divisions default a zero denominator to 1.

use std::collections::HashSet;
use std::hash::Hash;

/// Sums `value` over records matching `predicate`.
pub fn sum_where<R>(
    records: &[R],
    value: impl Fn(&R) -> f64,
    predicate: impl Fn(&R) -> bool,
) -> f64 {
    records
        .iter()
        .filter(|record| predicate(*record))
        .map(value)
        .sum()
}

/// Sums `value` over all records.
pub fn sum<R>(records: &[R], value: impl Fn(&R) -> f64) -> f64 {
    sum_where(records, value, |_| true)
}

pub fn count_where<R>(records: &[R], predicate: impl Fn(&R) -> bool) -> usize {
    records.iter().filter(|record| predicate(*record)).count()
}

/// `numerator / denominator`, reading a zero denominator as 1.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    let denominator = if denominator == 0.0 { 1.0 } else { denominator };
    numerator / denominator
}

/// `part / whole * 100` with the same zero guard as [`ratio`].
pub fn percentage(part: f64, whole: f64) -> f64 {
    ratio(part, whole) * 100.0
}

/// Mean of `value`; an empty list averages to `0.0`.
pub fn average<R>(records: &[R], value: impl Fn(&R) -> f64) -> f64 {
    ratio(sum(records, value), records.len() as f64)
}

/// Number of distinct keys produced by `key`.
///
/// `key` may borrow from the record, e.g. `|order| order.customer.as_str()`.
pub fn distinct_count<'a, R, K: Eq + Hash>(records: &'a [R], key: impl Fn(&'a R) -> K) -> usize {
    records.iter().map(key).collect::<HashSet<_>>().len()
}
