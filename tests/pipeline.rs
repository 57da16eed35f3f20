#[path = "common/mod.rs"]
mod common;

use common::*;
use fibrank::{earliest_timestamp, FibPipeline, Platform, SpreaderCriterion, YearMonth};
use tempfile::TempDir;

fn tmp_base() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Spec'd end-to-end scenario: A has 3 posts reshared [1,2,10] (fib 2),
/// B has 1 post reshared [100] (fib 1). Top-1 by fib_index selects only A,
/// so the detail table holds exactly A's 3 rows.
#[test]
fn end_to_end_top_one_by_fib_index() {
    let base = tmp_base();
    let file = base.path().join("part-00000.gz");
    let lines = vec![
        tweet("a1", "A", "alice", 1_662_000_000, 1).to_string(),
        tweet("a2", "A", "alice", 1_662_000_100, 2).to_string(),
        tweet("a3", "A", "alice", 1_662_000_200, 10).to_string(),
        tweet("b1", "B", "bob", 1_662_000_300, 100).to_string(),
    ];
    write_gz_lines(&file, &lines);

    let report = FibPipeline::new(Platform::Twitter)
        .files([file])
        .top_k(1)
        .criterion(SpreaderCriterion::FibIndex)
        .progress(false)
        .run()
        .unwrap();

    assert_eq!(report.fib_records.len(), 2);
    assert_eq!(report.fib_records[0].user_id, "A");
    assert_eq!(report.fib_records[0].fib_index, 2);
    assert_eq!(report.fib_records[1].user_id, "B");
    assert_eq!(report.fib_records[1].fib_index, 1);

    assert_eq!(report.spreader_posts.len(), 3);
    assert!(report.spreader_posts.iter().all(|p| p.user_id == "A"));
    let counts: Vec<_> = report.spreader_posts.iter().map(|p| p.num_reshares).collect();
    assert_eq!(counts, vec![10, 2, 1]);
}

/// The union criterion captures both the high-index and the high-volume user
/// even with K=1.
#[test]
fn end_to_end_union_criterion() {
    let base = tmp_base();
    let file = base.path().join("part-00000.gz");
    let lines = vec![
        tweet("a1", "A", "alice", 1_662_000_000, 1).to_string(),
        tweet("a2", "A", "alice", 1_662_000_100, 2).to_string(),
        tweet("a3", "A", "alice", 1_662_000_200, 10).to_string(),
        tweet("b1", "B", "bob", 1_662_000_300, 100).to_string(),
    ];
    write_gz_lines(&file, &lines);

    let report = FibPipeline::new(Platform::Twitter)
        .files([file])
        .top_k(1)
        .criterion(SpreaderCriterion::Both)
        .progress(false)
        .run()
        .unwrap();

    let mut users: Vec<_> = report
        .spreader_posts
        .iter()
        .map(|p| p.user_id.clone())
        .collect();
    users.sort();
    users.dedup();
    assert_eq!(users, vec!["A", "B"]);
    assert_eq!(report.spreader_posts.len(), 4);
}

/// Anchor 2022-12 with a 3-month lookback admits posts from 2022-09-01 on.
#[test]
fn anchored_window_filters_the_tables() {
    let anchor = YearMonth::new(2022, 12);
    let earliest = earliest_timestamp(anchor, 3);
    assert_eq!(earliest, 1_661_990_400); // 2022-09-01 00:00:00 UTC

    let base = tmp_base();
    let file = base.path().join("part-00000.gz");
    let lines = vec![
        tweet("old", "A", "alice", earliest - 10, 500).to_string(),
        tweet("new", "A", "alice", earliest + 10, 4).to_string(),
    ];
    write_gz_lines(&file, &lines);

    let report = FibPipeline::new(Platform::Twitter)
        .files([file])
        .anchor(anchor, 3)
        .progress(false)
        .run()
        .unwrap();

    assert_eq!(report.stats.out_of_window, 1);
    assert_eq!(report.fib_records.len(), 1);
    assert_eq!(report.fib_records[0].total_reshares, 4);
    assert!(report.spreader_posts.iter().all(|p| p.post_id != "old"));
}

/// Discovery keeps only files matching the platform's filename convention,
/// and the pipeline result is identical however the matching files are laid
/// out on disk.
#[test]
fn discovery_respects_platform_patterns() {
    let base = tmp_base();
    write_gz_lines(
        &base.path().join("deep").join("part-00000.gz"),
        &[tweet("t1", "u1", "alice", 1_662_000_000, 2).to_string()],
    );
    write_gz_lines(
        &base.path().join("part-00001.gz"),
        &[tweet("t2", "u1", "alice", 1_662_000_100, 6).to_string()],
    );
    // wrong naming convention: must be ignored
    write_gz_lines(
        &base.path().join("notes.jsonl.gz"),
        &[tweet("t3", "u2", "bob", 1_662_000_200, 9).to_string()],
    );

    let report = FibPipeline::new(Platform::Twitter)
        .data_dir(base.path())
        .progress(false)
        .run()
        .unwrap();

    assert_eq!(report.stats.files_read, 2);
    assert_eq!(report.fib_records.len(), 1);
    assert_eq!(report.fib_records[0].user_id, "u1");
    assert_eq!(report.fib_records[0].total_reshares, 8);
}

#[test]
fn empty_input_yields_empty_tables() {
    let base = tmp_base();
    let report = FibPipeline::new(Platform::Twitter)
        .data_dir(base.path())
        .progress(false)
        .run()
        .unwrap();
    assert!(report.fib_records.is_empty());
    assert!(report.spreader_posts.is_empty());
    assert_eq!(report.stats.lines_read, 0);
}

#[test]
fn missing_configuration_is_an_error() {
    let err = FibPipeline::new(Platform::Twitter)
        .progress(false)
        .run()
        .unwrap_err();
    assert!(err.to_string().contains("data_dir"));
}

/// Duplicate scrapes across overlapping files merge by max; re-running the
/// pipeline over the same set is bit-identical.
#[test]
fn overlapping_scrapes_merge_and_rerun_is_stable() {
    let base = tmp_base();
    let file_a = base.path().join("part-00000.gz");
    let file_b = base.path().join("part-00001.gz");
    write_gz_lines(&file_a, &[tweet("t1", "u1", "alice", 1_662_000_000, 5).to_string()]);
    write_gz_lines(&file_b, &[tweet("t1", "u1", "alice", 1_662_000_000, 9).to_string()]);

    let run = || {
        FibPipeline::new(Platform::Twitter)
            .data_dir(base.path())
            .progress(false)
            .run()
            .unwrap()
    };
    let first = run();
    let second = run();

    assert_eq!(first.fib_records[0].total_reshares, 9);
    assert_eq!(first.fib_records, second.fib_records);
    assert_eq!(first.spreader_posts, second.spreader_posts);
}
