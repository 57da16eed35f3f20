use crate::date::YearMonth;
use crate::post::Platform;
use crate::rank::{SpreaderCriterion, DEFAULT_TOP_K};
use std::path::{Path, PathBuf};

/// User-facing options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct FibOptions {
    pub platform: Platform,
    pub data_dir: Option<PathBuf>,
    /// Explicit file list; overrides discovery under `data_dir` when non-empty.
    pub files: Vec<PathBuf>,
    /// Anchor month of the aggregation window; `None` disables the window cut.
    pub anchor: Option<YearMonth>,
    /// Lookback length: the window starts `lookback_months` before `anchor`.
    pub lookback_months: u32,
    pub top_k: usize,
    pub criterion: SpreaderCriterion,
    pub progress: bool,
    pub progress_label: Option<String>,

    // IO tuning
    pub read_buffer_bytes: usize, // BufReader capacity over the gzip decoder
}

impl FibOptions {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            data_dir: None,
            files: Vec::new(),
            anchor: None,
            lookback_months: 3,
            top_k: DEFAULT_TOP_K,
            criterion: SpreaderCriterion::Both,
            progress: true,
            progress_label: None,
            read_buffer_bytes: 256 * 1024,
        }
    }

    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(dir.as_ref().to_path_buf());
        self
    }
    pub fn with_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }
    pub fn with_anchor(mut self, anchor: YearMonth, lookback_months: u32) -> Self {
        self.anchor = Some(anchor);
        self.lookback_months = lookback_months;
        self
    }
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k.max(1);
        self
    }
    pub fn with_criterion(mut self, criterion: SpreaderCriterion) -> Self {
        self.criterion = criterion;
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = Some(label.into());
        self
    }
    pub fn with_io_read_buffer(mut self, bytes: usize) -> Self {
        self.read_buffer_bytes = bytes.max(8 * 1024);
        self
    }
}
