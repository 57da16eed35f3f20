//! Per-run aggregation state: the merge of every observation of every logical
//! post across all corpus files.
//!
//! Merge rules:
//! - reshare counts keep the running **maximum** (platforms report cumulative
//!   counts, so re-scrapes can only grow; the max never decreases),
//! - a post's timestamp keeps the **first-seen** value (it is an immutable
//!   property of the post),
//! - a user's username keeps the **last-seen** value under the loader's
//!   canonical file/line order,
//! - a user's post set accumulates distinct post ids.

use ahash::AHashMap;
use std::collections::BTreeSet;

/// One flattened logical post, ready to fold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Observation {
    pub post_id: String,
    pub user_id: String,
    pub username: Option<String>,
    pub timestamp: i64,
    /// Absent counts are folded as 0.
    pub reshares: i64,
}

/// Aggregation maps for one pipeline run. Built fresh per run, handed by
/// value into the ranking stage, discarded at run end. No globals.
#[derive(Debug, Default)]
pub struct AggregationState {
    post_max_reshares: AHashMap<String, i64>,
    post_timestamp: AHashMap<String, i64>,
    user_posts: AHashMap<String, BTreeSet<String>>,
    user_names: AHashMap<String, String>,
}

impl AggregationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one observation in. Idempotent: replaying the same observation
    /// leaves the state unchanged.
    pub fn fold(&mut self, obs: Observation) {
        let max = self.post_max_reshares.entry(obs.post_id.clone()).or_insert(0);
        if obs.reshares > *max {
            *max = obs.reshares;
        }
        self.post_timestamp
            .entry(obs.post_id.clone())
            .or_insert(obs.timestamp);
        self.user_posts
            .entry(obs.user_id.clone())
            .or_default()
            .insert(obs.post_id);
        if let Some(name) = obs.username {
            self.user_names.insert(obs.user_id, name);
        }
    }

    pub fn num_posts(&self) -> usize {
        self.post_max_reshares.len()
    }
    pub fn num_users(&self) -> usize {
        self.user_posts.len()
    }

    pub fn max_reshares(&self, post_id: &str) -> i64 {
        self.post_max_reshares.get(post_id).copied().unwrap_or(0)
    }
    pub fn post_timestamp(&self, post_id: &str) -> Option<i64> {
        self.post_timestamp.get(post_id).copied()
    }
    pub fn username(&self, user_id: &str) -> Option<&str> {
        self.user_names.get(user_id).map(|s| s.as_str())
    }
    pub fn posts_of(&self, user_id: &str) -> Option<&BTreeSet<String>> {
        self.user_posts.get(user_id)
    }
    pub fn user_ids(&self) -> impl Iterator<Item = &str> {
        self.user_posts.keys().map(|s| s.as_str())
    }

    /// Sum of merged max reshare counts over the user's post set.
    pub fn total_reshares(&self, user_id: &str) -> i64 {
        match self.user_posts.get(user_id) {
            Some(posts) => posts.iter().map(|id| self.max_reshares(id)).sum(),
            None => 0,
        }
    }

    /// Per-post merged reshare counts for the user, in the post set's
    /// deterministic (post-id) order. Input to the FIB-index calculation,
    /// which sorts internally.
    pub fn reshare_counts(&self, user_id: &str) -> Vec<i64> {
        match self.user_posts.get(user_id) {
            Some(posts) => posts.iter().map(|id| self.max_reshares(id)).collect(),
            None => Vec::new(),
        }
    }
}
