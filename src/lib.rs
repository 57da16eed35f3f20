mod config;
mod date;
mod paths;
mod gzip_jsonl;

mod post;
mod aggregate;
mod fib;
mod loader;
mod rank;

mod progress;
mod util;
mod pipeline;

pub use crate::config::FibOptions;
pub use crate::date::{earliest_timestamp, month_start_timestamp, YearMonth};
pub use crate::pipeline::{FibPipeline, FibReport};

pub use crate::post::{flatten, get_value, AnyPost, FbIgPost, Platform, PostRecord, TweetV1};
pub use crate::aggregate::{AggregationState, Observation};
pub use crate::fib::calc_fib_index;
pub use crate::loader::{load, LoadStats};
pub use crate::rank::{
    build_fib_records, spreader_posts, top_spreaders, FibRecord, SpreaderCriterion, SpreaderPost,
    DEFAULT_TOP_K,
};

// Expose discovery and progress helpers for binaries.
pub use crate::paths::discover_files;
pub use crate::progress::{make_progress_bar_labeled, total_compressed_size};

// Export robust file ops from util so binaries can import from crate root.
pub use crate::util::{init_tracing_once, open_with_backoff};
