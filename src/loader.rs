//! Corpus loader: streams gzip JSONL files, wraps each line as a platform
//! post record, flattens embedded posts and folds everything into one
//! `AggregationState`.

use crate::aggregate::{AggregationState, Observation};
use crate::gzip_jsonl::{for_each_line_cfg, for_each_line_with_progress_cfg};
use crate::post::{flatten, AnyPost, Platform, PostRecord};
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Per-run skip/ingest counters, returned alongside the aggregation state so
/// callers can assert on them directly instead of scraping logs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub files_read: u64,
    pub lines_read: u64,
    /// Flattened logical posts folded into the state (embedded included).
    pub posts_ingested: u64,
    /// Lines that failed to parse as JSON (recoverable: logged and skipped).
    pub malformed_lines: u64,
    /// Records failing the validity invariant (recoverable: logged and skipped).
    pub invalid_records: u64,
    /// Logical posts outside the aggregation window (expected filtering).
    pub out_of_window: u64,
}

/// Load a file set into fresh aggregation state.
///
/// Files are visited in lexicographic path order and lines in file order, so
/// the last-write-wins username field is deterministic regardless of the
/// order `files` was assembled in. A file that cannot be opened or decoded
/// aborts the run; no partial result is returned.
pub fn load(
    files: &[PathBuf],
    platform: Platform,
    earliest_timestamp: Option<i64>,
    read_buf_bytes: usize,
    pb: Option<&ProgressBar>,
) -> Result<(AggregationState, LoadStats)> {
    let mut ordered: Vec<PathBuf> = files.to_vec();
    ordered.sort();
    ordered.dedup();

    let mut state = AggregationState::new();
    let mut stats = LoadStats::default();

    for path in &ordered {
        tracing::info!(file = %path.display(), "loading corpus file");
        let mut line_no: u64 = 0;
        let mut on_line = |line: &str| -> Result<()> {
            line_no += 1;
            stats.lines_read += 1;
            ingest_line(line, path, line_no, platform, earliest_timestamp, &mut state, &mut stats);
            Ok(())
        };
        if let Some(pb) = pb {
            for_each_line_with_progress_cfg(path, read_buf_bytes, |delta| pb.inc(delta), |s| {
                on_line(s)
            })
            .with_context(|| format!("loading {}", path.display()))?;
        } else {
            for_each_line_cfg(path, read_buf_bytes, |s| on_line(s))
                .with_context(|| format!("loading {}", path.display()))?;
        }
        stats.files_read += 1;
    }

    tracing::info!(
        posts = state.num_posts(),
        users = state.num_users(),
        malformed = stats.malformed_lines,
        invalid = stats.invalid_records,
        out_of_window = stats.out_of_window,
        "corpus loaded"
    );
    Ok((state, stats))
}

fn ingest_line(
    line: &str,
    path: &Path,
    line_no: u64,
    platform: Platform,
    earliest_timestamp: Option<i64>,
    state: &mut AggregationState,
    stats: &mut LoadStats,
) {
    if line.trim().is_empty() {
        return;
    }
    let value: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            stats.malformed_lines += 1;
            tracing::warn!(
                file = %path.display(),
                line = line_no,
                error = %e,
                "skipping malformed line"
            );
            return;
        }
    };

    let record = AnyPost::wrap(&value, platform);
    if !record.is_valid() {
        stats.invalid_records += 1;
        tracing::debug!(file = %path.display(), line = line_no, "skipping invalid record");
        return;
    }

    for post in flatten(record) {
        // Embedded posts are checked in their own right; a wrapper can be
        // valid around a truncated embedded object.
        let (Some(post_id), Some(user_id), Some(timestamp)) = (
            post.post_id().filter(|id| !id.is_empty()),
            post.user_id(),
            post.timestamp(),
        )
        else {
            stats.invalid_records += 1;
            tracing::debug!(file = %path.display(), line = line_no, "skipping invalid embedded post");
            continue;
        };
        if let Some(earliest) = earliest_timestamp {
            if timestamp < earliest {
                stats.out_of_window += 1;
                continue;
            }
        }
        state.fold(Observation {
            post_id: post_id.to_string(),
            user_id,
            username: post.user_handle(),
            timestamp,
            reshares: post.reshare_count().unwrap_or(0),
        });
        stats.posts_ingested += 1;
    }
}
