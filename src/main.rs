use anyhow::Result;
use fibrank::{FibPipeline, Platform, SpreaderCriterion, YearMonth};

const DATA_ROOT: &str = "./data";
const ANCHOR: (u16, u8) = (2022, 12);
const LOOKBACK_MONTHS: u32 = 3;
const TOP_K: usize = 50;

fn main() -> Result<()> {
    let report = FibPipeline::new(Platform::Twitter)
        .data_dir(DATA_ROOT)
        .anchor(YearMonth::new(ANCHOR.0, ANCHOR.1), LOOKBACK_MONTHS)
        .top_k(TOP_K)
        .criterion(SpreaderCriterion::Both)
        .progress(true)
        .progress_label("Calculating FIB indices")
        .run()?;

    println!(
        "{} users ranked, {} detail rows ({} lines read, {} malformed, {} invalid, {} out of window)",
        report.fib_records.len(),
        report.spreader_posts.len(),
        report.stats.lines_read,
        report.stats.malformed_lines,
        report.stats.invalid_records,
        report.stats.out_of_window,
    );

    println!("\ntop users by FIB index:");
    for r in report.fib_records.iter().take(10) {
        println!(
            "  {:<20} {:<20} fib={:<4} total_reshares={}",
            r.user_id, r.username, r.fib_index, r.total_reshares
        );
    }

    println!("\nmost reshared posts in the cohort:");
    for p in report.spreader_posts.iter().take(10) {
        println!(
            "  {:<20} {:<24} reshares={:<8} ts={}",
            p.user_id, p.post_id, p.num_reshares, p.timestamp
        );
    }

    Ok(())
}
