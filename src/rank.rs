//! Ranking & selection: the per-user FIB-index table, the top-spreader
//! cohort, and the companion post-level detail table.

use crate::aggregate::AggregationState;
use crate::fib::calc_fib_index;
use serde::Serialize;
use std::collections::BTreeSet;

/// One row of the per-user result table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FibRecord {
    pub user_id: String,
    pub username: String,
    pub fib_index: u64,
    pub total_reshares: i64,
}

/// One row of the top-spreader post detail table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SpreaderPost {
    pub user_id: String,
    pub post_id: String,
    pub num_reshares: i64,
    pub timestamp: i64,
}

/// Which statistic selects the top-spreader cohort.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpreaderCriterion {
    FibIndex,
    TotalReshares,
    /// Union of the two independent top-K lists, so both high-index and
    /// high-volume spreaders are captured. Cohort size is between K and 2K.
    Both,
}

/// Default cohort width.
pub const DEFAULT_TOP_K: usize = 50;

/// Build one `FibRecord` per user with a non-empty post set, sorted
/// descending by fib_index with ties broken by user_id ascending (the
/// canonical output ordering).
pub fn build_fib_records(state: &AggregationState) -> Vec<FibRecord> {
    let mut records: Vec<FibRecord> = state
        .user_ids()
        .map(|user_id| {
            let counts = state.reshare_counts(user_id);
            FibRecord {
                user_id: user_id.to_string(),
                username: state.username(user_id).unwrap_or_default().to_string(),
                fib_index: calc_fib_index(&counts),
                total_reshares: state.total_reshares(user_id),
            }
        })
        .collect();
    records.sort_by(|a, b| {
        b.fib_index
            .cmp(&a.fib_index)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    records
}

/// Select the top-K cohort by `criterion`. Ties break by user_id ascending.
/// Returned ids are sorted ascending (the cohort is a set; detail rows carry
/// the ranking signal).
pub fn top_spreaders(
    records: &[FibRecord],
    k: usize,
    criterion: SpreaderCriterion,
) -> Vec<String> {
    let cohort: BTreeSet<String> = match criterion {
        SpreaderCriterion::FibIndex => top_by(records, k, |r| r.fib_index as i64),
        SpreaderCriterion::TotalReshares => top_by(records, k, |r| r.total_reshares),
        SpreaderCriterion::Both => {
            let mut union = top_by(records, k, |r| r.fib_index as i64);
            union.extend(top_by(records, k, |r| r.total_reshares));
            union
        }
    };
    cohort.into_iter().collect()
}

fn top_by(records: &[FibRecord], k: usize, key: impl Fn(&FibRecord) -> i64) -> BTreeSet<String> {
    let mut ranked: Vec<&FibRecord> = records.iter().collect();
    ranked.sort_by(|a, b| key(b).cmp(&key(a)).then_with(|| a.user_id.cmp(&b.user_id)));
    ranked
        .into_iter()
        .take(k)
        .map(|r| r.user_id.clone())
        .collect()
}

/// One detail row per (selected user, post), using the merged max reshare
/// count and the first-seen timestamp. Sorted descending by reshare count
/// with post_id ascending as the stable tie order.
pub fn spreader_posts(state: &AggregationState, selected: &[String]) -> Vec<SpreaderPost> {
    let mut rows = Vec::new();
    for user_id in selected {
        let Some(posts) = state.posts_of(user_id) else {
            continue;
        };
        for post_id in posts {
            rows.push(SpreaderPost {
                user_id: user_id.clone(),
                post_id: post_id.clone(),
                num_reshares: state.max_reshares(post_id),
                timestamp: state.post_timestamp(post_id).unwrap_or(0),
            });
        }
    }
    rows.sort_by(|a, b| {
        b.num_reshares
            .cmp(&a.num_reshares)
            .then_with(|| a.post_id.cmp(&b.post_id))
    });
    rows
}
