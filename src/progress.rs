//! Progress reporting utilities: byte-based progress bar and total size helper.

use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;

pub fn make_progress_bar_labeled(total_bytes: u64, label: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new(total_bytes);
    let style = ProgressStyle::with_template(
        "{spinner:.green} {msg} {bytes:>10}/{total_bytes:<10} [{bar:.cyan/blue}] {percent:>3}%  \
         {bytes_per_sec}  elapsed: {elapsed_precise}  eta: {eta_precise}",
    )
    .unwrap()
    .progress_chars("█▉▊▋▌▍▎▏  ");
    pb.set_style(style);
    if let Some(msg) = label {
        pb.set_message(msg.to_string());
    }
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

pub fn total_compressed_size(files: &[PathBuf]) -> u64 {
    files
        .iter()
        .map(|p| fs::metadata(p).map(|m| m.len()).unwrap_or(0))
        .sum()
}
