//! The FIB-index: an h-index over a user's per-post reshare counts.

/// Largest k such that the user has at least k posts each reshared at least
/// k times. Returns 0 when no k qualifies, including for empty input.
///
/// With counts [0, 1, 3, 5, 5] (sorted ascending): k=5 fails (0 < 5), k=4
/// fails (1 < 4), k=3 holds (3 >= 3), so the index is 3.
pub fn calc_fib_index(counts: &[i64]) -> u64 {
    let mut sorted = counts.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();
    for k in (1..=n).rev() {
        if sorted[n - k] >= k as i64 {
            return k as u64;
        }
    }
    0
}
