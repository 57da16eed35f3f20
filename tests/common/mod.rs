use serde_json::{json, Value};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Write a gzip-compressed file containing the provided JSONL lines.
/// Mirrors the corpus's raw monthly files but with tiny content.
pub fn write_gz_lines(path: &Path, lines: &[String]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let f = File::create(path).unwrap();
    let mut enc = flate2::write::GzEncoder::new(f, flate2::Compression::default());
    for l in lines {
        writeln!(&mut enc, "{}", l).unwrap();
    }
    enc.finish().unwrap();
}

/// Minimal Twitter v1.1 tweet object. `ts_secs` lands in `timestamp_ms`.
pub fn tweet(id: &str, user_id: &str, screen_name: &str, ts_secs: i64, retweets: i64) -> Value {
    json!({
        "id_str": id,
        "timestamp_ms": format!("{}000", ts_secs),
        "user": { "id_str": user_id, "screen_name": screen_name },
        "retweet_count": retweets,
        "text": format!("tweet {}", id)
    })
}

/// Attach a retweeted original to `wrapper`.
pub fn with_retweet(mut wrapper: Value, original: Value) -> Value {
    wrapper["retweeted_status"] = original;
    wrapper
}

/// Attach a quoted post to `wrapper`.
pub fn with_quote(mut wrapper: Value, quoted: Value) -> Value {
    wrapper["quoted_status"] = quoted;
    wrapper
}

/// Minimal CrowdTangle Facebook post object. `date` format: "YYYY-MM-DD HH:MM:SS".
pub fn fb_post(id: &str, account_id: &str, handle: &str, date: &str, shares: i64) -> Value {
    json!({
        "platformId": id,
        "date": date,
        "account": { "id": account_id, "handle": handle, "name": format!("Page {}", handle) },
        "statistics": { "actual": { "shareCount": shares } }
    })
}
