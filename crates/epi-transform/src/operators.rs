//! Keyed collection operators used by both branches and the join.
//!
//! Results are `BTreeMap`s, so iteration follows key order regardless of the
//! order the input pairs arrived in.

use std::collections::BTreeMap;

/// Collects every value that shares a key.
pub fn group_by_key<K, V, I>(pairs: I) -> BTreeMap<K, Vec<V>>
where
    K: Ord,
    I: IntoIterator<Item = (K, V)>,
{
    let mut groups: BTreeMap<K, Vec<V>> = BTreeMap::new();
    for (key, value) in pairs {
        groups.entry(key).or_default().push(value);
    }
    groups
}

/// Groups `pairs` by key and reduces each group with `reduce`.
pub fn combine_per_key<K, V, R, I, F>(pairs: I, mut reduce: F) -> BTreeMap<K, R>
where
    K: Ord,
    I: IntoIterator<Item = (K, V)>,
    F: FnMut(Vec<V>) -> R,
{
    group_by_key(pairs)
        .into_iter()
        .map(|(key, values)| (key, reduce(values)))
        .collect()
}

/// Pairs the values of two keyed inputs: for each key seen on either side,
/// the list from `left` and the list from `right` (either may be empty).
pub fn co_group<K, L, R, IL, IR>(left: IL, right: IR) -> BTreeMap<K, (Vec<L>, Vec<R>)>
where
    K: Ord,
    IL: IntoIterator<Item = (K, L)>,
    IR: IntoIterator<Item = (K, R)>,
{
    let mut groups: BTreeMap<K, (Vec<L>, Vec<R>)> = BTreeMap::new();
    for (key, value) in left {
        groups.entry(key).or_insert_with(|| (Vec::new(), Vec::new())).0.push(value);
    }
    for (key, value) in right {
        groups.entry(key).or_insert_with(|| (Vec::new(), Vec::new())).1.push(value);
    }
    groups
}

/// Sums values in ascending order so the result does not depend on input order.
pub fn sum_values(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    values.into_iter().fold(0.0, |total, value| total + value)
}
