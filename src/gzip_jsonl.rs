//! Streaming over gzip-compressed newline-delimited JSON corpus files.
//!
//! Unlike transient per-line problems (handled by the caller), a file that
//! cannot be opened or decoded is a hard failure for the whole run: a result
//! built from a partial corpus must never be emitted silently.

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use crate::util::open_with_backoff;

/// Stream a gzip JSONL file line-by-line; call `on_line` with the raw &str.
/// `read_buf_bytes` sets the BufReader capacity over the decoder.
pub fn for_each_line_cfg(
    path: &Path,
    read_buf_bytes: usize,
    mut on_line: impl FnMut(&str) -> Result<()>,
) -> Result<()> {
    let file = open_with_backoff(path, 16, 50)
        .with_context(|| format!("open {}", path.display()))?;
    let decoder = MultiGzDecoder::new(file);
    let mut reader = BufReader::with_capacity(read_buf_bytes.max(8 * 1024), decoder);

    let mut buf = String::with_capacity(16 * 1024);
    let mut line_no: u64 = 0;
    loop {
        buf.clear();
        let n = reader
            .read_line(&mut buf)
            .with_context(|| format!("decode {} (line {})", path.display(), line_no + 1))?;
        if n == 0 {
            break;
        }
        line_no += 1;
        if buf.ends_with('\n') {
            let _ = buf.pop();
            if buf.ends_with('\r') {
                let _ = buf.pop();
            }
        }
        on_line(&buf)?;
    }
    Ok(())
}

/// A `Read` wrapper that counts compressed bytes read.
struct CountingReader<R: Read> {
    inner: R,
    counter: Arc<AtomicU64>,
}
impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.counter.fetch_add(n as u64, Ordering::Relaxed);
        Ok(n)
    }
}

/// Same as `for_each_line_cfg` but calls `on_progress(delta_compressed_bytes)`
/// as the stream advances, for byte-based progress bars.
pub fn for_each_line_with_progress_cfg(
    path: &Path,
    read_buf_bytes: usize,
    mut on_progress: impl FnMut(u64),
    mut on_line: impl FnMut(&str) -> Result<()>,
) -> Result<()> {
    let file = open_with_backoff(path, 16, 50)
        .with_context(|| format!("open {}", path.display()))?;
    let counter = Arc::new(AtomicU64::new(0));
    let cnt = CountingReader { inner: file, counter: counter.clone() };

    let decoder = MultiGzDecoder::new(cnt);
    let mut reader = BufReader::with_capacity(read_buf_bytes.max(8 * 1024), decoder);

    let mut buf = String::with_capacity(16 * 1024);
    let mut line_no: u64 = 0;
    let mut last = 0u64;
    loop {
        buf.clear();
        let n = reader
            .read_line(&mut buf)
            .with_context(|| format!("decode {} (line {})", path.display(), line_no + 1))?;
        if n == 0 {
            let cur = counter.load(Ordering::Relaxed);
            if cur > last {
                on_progress(cur - last);
            }
            break;
        }
        line_no += 1;
        if buf.ends_with('\n') {
            let _ = buf.pop();
            if buf.ends_with('\r') {
                let _ = buf.pop();
            }
        }
        let cur = counter.load(Ordering::Relaxed);
        if cur > last {
            on_progress(cur - last);
            last = cur;
        }
        on_line(&buf)?;
    }
    Ok(())
}
