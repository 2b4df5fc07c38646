use std::collections::BTreeMap;

/// Counts occurrences of each value, keyed in ascending value order.
pub fn counts<T: Ord, I: IntoIterator<Item = T>>(values: I) -> BTreeMap<T, usize> {
    let mut counts = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// Most frequent value and its count. Ties go to the smallest value.
/// Returns `None` for empty input.
pub fn mode<T: Ord, I: IntoIterator<Item = T>>(values: I) -> Option<(T, usize)> {
    max_count(counts(values))
}

/// Picks the entry with the highest count, keeping the first one seen on ties.
pub fn max_count<T>(counts: BTreeMap<T, usize>) -> Option<(T, usize)> {
    counts.into_iter().fold(None, |best, (value, count)| match best {
        Some((_, best_count)) if best_count >= count => best,
        _ => Some((value, count)),
    })
}

/// Every distinct value with its count, by descending count then ascending value.
pub fn value_counts<T: Ord, I: IntoIterator<Item = T>>(values: I) -> Vec<(T, usize)> {
    let mut table: Vec<_> = counts(values).into_iter().collect();
    // stable sort keeps ascending value order among equal counts
    table.sort_by(|a, b| b.1.cmp(&a.1));
    table
}

/// Computes the arithmetic mean of a slice of values. Returns `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
