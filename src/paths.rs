//! Corpus file discovery by platform filename convention.

use crate::post::Platform;
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Filename pattern for a platform's raw monthly files.
fn filename_pattern(platform: Platform) -> Regex {
    match platform {
        // Moe's Tavern query output parts: part-m-00000.gz, part-r-....gz
        Platform::Twitter => Regex::new(r"^part.*\.gz$").unwrap(),
        // CrowdTangle download output: <stamp>__fb_posts_w_links.jsonl.gzip
        Platform::FacebookInstagram => {
            Regex::new(r"^.*__fb_posts_w_links\.jsonl\.gzip$").unwrap()
        }
    }
}

/// Recursively collect files under `dir` whose names match the platform
/// convention, sorted lexicographically (the loader's canonical order).
pub fn discover_files(dir: &Path, platform: Platform) -> Vec<PathBuf> {
    let re = filename_pattern(platform);
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).into_iter().flatten() {
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if re.is_match(name) {
                paths.push(entry.path().to_path_buf());
            }
        }
    }
    paths.sort();
    paths
}
