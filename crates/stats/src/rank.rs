//! Ranking with tie handling.

use std::cmp::Ordering;

/// 1-based ranks of `data`, with tied values sharing the average of the ranks
/// they span.
///
/// ```
/// use wavematch_stats::average_ranks;
///
/// assert_eq!(average_ranks(&[3.0, 1.0, 2.0, 2.0, 5.0]), vec![4.0, 1.0, 2.5, 2.5, 5.0]);
/// ```
pub fn average_ranks(data: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..data.len()).collect();
    order.sort_by(|&a, &b| data[a].partial_cmp(&data[b]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0.0; data.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start;
        while end + 1 < order.len() && data[order[end + 1]] == data[order[start]] {
            end += 1;
        }
        let rank = (start + end) as f64 / 2.0 + 1.0;
        for &idx in &order[start..=end] {
            ranks[idx] = rank;
        }
        start = end + 1;
    }
    ranks
}
