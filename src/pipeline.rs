//! The pipeline façade: raw corpus files in, the two ranked result tables out.

use crate::config::FibOptions;
use crate::date::{earliest_timestamp, YearMonth};
use crate::loader::{load, LoadStats};
use crate::paths::discover_files;
use crate::post::Platform;
use crate::progress::{make_progress_bar_labeled, total_compressed_size};
use crate::rank::{build_fib_records, spreader_posts, top_spreaders, FibRecord, SpreaderCriterion, SpreaderPost};
use crate::util::init_tracing_once;
use anyhow::{anyhow, Result};
use std::path::Path;

/// Output of one run: the per-user FIB table, the top-spreader post detail
/// table (both in canonical order) and the loader's skip counters.
/// Serializing the tables is the caller's concern.
#[derive(Clone, Debug)]
pub struct FibReport {
    pub fib_records: Vec<FibRecord>,
    pub spreader_posts: Vec<SpreaderPost>,
    pub stats: LoadStats,
}

#[derive(Clone)]
pub struct FibPipeline {
    opts: FibOptions,
}

impl FibPipeline {
    pub fn new(platform: Platform) -> Self {
        Self { opts: FibOptions::new(platform) }
    }

    // -------- Builder methods --------
    pub fn data_dir(mut self, dir: impl AsRef<Path>) -> Self { self.opts = self.opts.with_data_dir(dir); self }
    pub fn files<I, P>(mut self, files: I) -> Self where I: IntoIterator<Item = P>, P: Into<std::path::PathBuf> { self.opts = self.opts.with_files(files); self }
    pub fn anchor(mut self, anchor: YearMonth, lookback_months: u32) -> Self { self.opts = self.opts.with_anchor(anchor, lookback_months); self }
    pub fn top_k(mut self, k: usize) -> Self { self.opts = self.opts.with_top_k(k); self }
    pub fn criterion(mut self, c: SpreaderCriterion) -> Self { self.opts = self.opts.with_criterion(c); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn progress_label(mut self, label: impl Into<String>) -> Self { self.opts = self.opts.with_progress_label(label); self }
    pub fn io_read_buffer(mut self, bytes: usize) -> Self { self.opts = self.opts.with_io_read_buffer(bytes); self }

    /// Run ingestion → aggregation → FIB computation → ranking, sequentially,
    /// over the configured file set.
    pub fn run(self) -> Result<FibReport> {
        init_tracing_once();

        let files = if !self.opts.files.is_empty() {
            self.opts.files.clone()
        } else if let Some(dir) = &self.opts.data_dir {
            discover_files(dir, self.opts.platform)
        } else {
            return Err(anyhow!("either data_dir or an explicit file list is required"));
        };
        if files.is_empty() {
            tracing::warn!("No corpus files matched; output tables will be empty.");
        } else {
            tracing::info!("Planned {} files for processing.", files.len());
        }

        let earliest = self
            .opts
            .anchor
            .map(|anchor| earliest_timestamp(anchor, self.opts.lookback_months));

        let pb = if self.opts.progress {
            let total = total_compressed_size(&files);
            Some(make_progress_bar_labeled(total, self.opts.progress_label.as_deref()))
        } else {
            None
        };

        let (state, stats) = load(
            &files,
            self.opts.platform,
            earliest,
            self.opts.read_buffer_bytes,
            pb.as_ref(),
        )?;
        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }

        let fib_records = build_fib_records(&state);
        let selected = top_spreaders(&fib_records, self.opts.top_k, self.opts.criterion);
        let detail = spreader_posts(&state, &selected);

        tracing::info!(
            users = fib_records.len(),
            spreaders = selected.len(),
            detail_rows = detail.len(),
            "ranking complete"
        );
        Ok(FibReport { fib_records, spreader_posts: detail, stats })
    }
}
