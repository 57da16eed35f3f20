//! Read-only views over raw platform post objects.
//!
//! Each platform variant wraps one decoded JSON object and exposes the same
//! capability surface: identity, authorship, timestamp, reshare count, and the
//! posts structurally embedded inside it (the original behind a retweet, the
//! post a quote references). Embedded posts are independent logical posts and
//! are aggregated in their own right.

use serde_json::Value;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Supported source platforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    Twitter,
    FacebookInstagram,
}

/// Walk `path` through nested JSON objects; `None` if any key is missing.
/// Never panics on absent paths.
pub fn get_value<'a>(v: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = v;
    for key in path {
        cur = cur.get(key)?;
    }
    Some(cur)
}

/// Capability surface shared by all platform post views. `'a` is the lifetime
/// of the underlying decoded JSON; views are `Copy` and borrow from it.
pub trait PostRecord<'a> {
    fn platform(&self) -> Platform;
    fn post_id(&self) -> Option<&'a str>;
    fn user_id(&self) -> Option<String>;
    fn user_handle(&self) -> Option<String>;
    /// Unix seconds since epoch.
    fn timestamp(&self) -> Option<i64>;
    /// Cumulative reshare count at scrape time; callers treat `None` as 0.
    fn reshare_count(&self) -> Option<i64>;
    /// Posts structurally contained in this one, each an independent record.
    fn embedded(&self) -> Vec<AnyPost<'a>>;

    /// A record is valid iff it has a non-empty post id, a resolvable user id
    /// and a resolvable timestamp. Invalid records are dropped by the loader.
    fn is_valid(&self) -> bool {
        self.post_id().is_some_and(|id| !id.is_empty())
            && self.user_id().is_some()
            && self.timestamp().is_some()
    }
}

/// Platform-dispatching wrapper so the loader and aggregator depend only on
/// the `PostRecord` surface.
#[derive(Clone, Copy, Debug)]
pub enum AnyPost<'a> {
    Twitter(TweetV1<'a>),
    FbIg(FbIgPost<'a>),
}

impl<'a> AnyPost<'a> {
    pub fn wrap(value: &'a Value, platform: Platform) -> AnyPost<'a> {
        match platform {
            Platform::Twitter => AnyPost::Twitter(TweetV1::new(value)),
            Platform::FacebookInstagram => AnyPost::FbIg(FbIgPost::new(value)),
        }
    }
}

impl<'a> PostRecord<'a> for AnyPost<'a> {
    fn platform(&self) -> Platform {
        match self {
            AnyPost::Twitter(t) => t.platform(),
            AnyPost::FbIg(p) => p.platform(),
        }
    }
    fn post_id(&self) -> Option<&'a str> {
        match self {
            AnyPost::Twitter(t) => t.post_id(),
            AnyPost::FbIg(p) => p.post_id(),
        }
    }
    fn user_id(&self) -> Option<String> {
        match self {
            AnyPost::Twitter(t) => t.user_id(),
            AnyPost::FbIg(p) => p.user_id(),
        }
    }
    fn user_handle(&self) -> Option<String> {
        match self {
            AnyPost::Twitter(t) => t.user_handle(),
            AnyPost::FbIg(p) => p.user_handle(),
        }
    }
    fn timestamp(&self) -> Option<i64> {
        match self {
            AnyPost::Twitter(t) => t.timestamp(),
            AnyPost::FbIg(p) => p.timestamp(),
        }
    }
    fn reshare_count(&self) -> Option<i64> {
        match self {
            AnyPost::Twitter(t) => t.reshare_count(),
            AnyPost::FbIg(p) => p.reshare_count(),
        }
    }
    fn embedded(&self) -> Vec<AnyPost<'a>> {
        match self {
            AnyPost::Twitter(t) => t.embedded(),
            AnyPost::FbIg(p) => p.embedded(),
        }
    }
}

/// Flatten a post plus everything embedded in it into a flat list of logical
/// posts. Iterative worklist; depth is shallow in practice (a retweet of a
/// quote is depth 2) but no fixed depth is assumed.
pub fn flatten<'a>(root: AnyPost<'a>) -> Vec<AnyPost<'a>> {
    let mut out = Vec::new();
    let mut work = vec![root];
    while let Some(post) = work.pop() {
        work.extend(post.embedded());
        out.push(post);
    }
    out
}

// ----------------------------- Twitter v1.1 --------------------------------

const TWITTER_CREATED_AT: &[FormatItem<'static>] = format_description!(
    "[weekday repr:short] [month repr:short] [day] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute] [year]"
);

/// View over a Twitter v1.1 tweet object.
///
/// A tweet may wrap a retweeted original and/or a quoted post; each is exposed
/// as its own `TweetV1` through `embedded()`.
#[derive(Clone, Copy, Debug)]
pub struct TweetV1<'a> {
    obj: &'a Value,
}

impl<'a> TweetV1<'a> {
    pub fn new(obj: &'a Value) -> Self {
        Self { obj }
    }

    pub fn is_reshare(&self) -> bool {
        self.retweeted().is_some()
    }
    pub fn is_quote(&self) -> bool {
        self.quoted().is_some()
    }
    pub fn retweeted(&self) -> Option<TweetV1<'a>> {
        self.obj
            .get("retweeted_status")
            .filter(|v| v.is_object())
            .map(TweetV1::new)
    }
    pub fn quoted(&self) -> Option<TweetV1<'a>> {
        self.obj
            .get("quoted_status")
            .filter(|v| v.is_object())
            .map(TweetV1::new)
    }
}

impl<'a> PostRecord<'a> for TweetV1<'a> {
    fn platform(&self) -> Platform {
        Platform::Twitter
    }

    fn post_id(&self) -> Option<&'a str> {
        self.obj.get("id_str").and_then(|v| v.as_str())
    }

    fn user_id(&self) -> Option<String> {
        if let Some(id) = get_value(self.obj, &["user", "id_str"]).and_then(|v| v.as_str()) {
            return Some(id.to_string());
        }
        // Older captures carry only the numeric id.
        get_value(self.obj, &["user", "id"])
            .and_then(|v| v.as_i64())
            .map(|n| n.to_string())
    }

    fn user_handle(&self) -> Option<String> {
        get_value(self.obj, &["user", "screen_name"])
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }

    fn timestamp(&self) -> Option<i64> {
        // `timestamp_ms` (string millis) is the cheap path; fall back to the
        // legacy `created_at` date string.
        if let Some(ms) = self.obj.get("timestamp_ms").and_then(|v| v.as_str()) {
            if let Ok(n) = ms.parse::<i64>() {
                return Some(n / 1000);
            }
        }
        let created = self.obj.get("created_at").and_then(|v| v.as_str())?;
        OffsetDateTime::parse(created, TWITTER_CREATED_AT)
            .ok()
            .map(|dt| dt.unix_timestamp())
    }

    fn reshare_count(&self) -> Option<i64> {
        self.obj
            .get("retweet_count")
            .and_then(|v| v.as_i64())
            .map(|n| n.max(0))
    }

    fn embedded(&self) -> Vec<AnyPost<'a>> {
        let mut out = Vec::new();
        if let Some(rt) = self.retweeted() {
            out.push(AnyPost::Twitter(rt));
        }
        if let Some(q) = self.quoted() {
            out.push(AnyPost::Twitter(q));
        }
        out
    }
}

// ------------------------- CrowdTangle FB/IG -------------------------------

const CT_DATE: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// View over a CrowdTangle Facebook/Instagram post object.
/// CrowdTangle posts carry no embedded posts.
#[derive(Clone, Copy, Debug)]
pub struct FbIgPost<'a> {
    obj: &'a Value,
}

impl<'a> FbIgPost<'a> {
    pub fn new(obj: &'a Value) -> Self {
        Self { obj }
    }
}

impl<'a> PostRecord<'a> for FbIgPost<'a> {
    fn platform(&self) -> Platform {
        Platform::FacebookInstagram
    }

    fn post_id(&self) -> Option<&'a str> {
        self.obj.get("platformId").and_then(|v| v.as_str())
    }

    fn user_id(&self) -> Option<String> {
        let id = get_value(self.obj, &["account", "id"])?;
        match id {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn user_handle(&self) -> Option<String> {
        // Pages often have a handle; fall back to the display name.
        for key in ["handle", "name"] {
            if let Some(s) = get_value(self.obj, &["account", key]).and_then(|v| v.as_str()) {
                if !s.is_empty() {
                    return Some(s.to_string());
                }
            }
        }
        None
    }

    fn timestamp(&self) -> Option<i64> {
        let date = self.obj.get("date").and_then(|v| v.as_str())?;
        PrimitiveDateTime::parse(date, CT_DATE)
            .ok()
            .map(|dt| dt.assume_utc().unix_timestamp())
    }

    fn reshare_count(&self) -> Option<i64> {
        get_value(self.obj, &["statistics", "actual", "shareCount"])
            .and_then(|v| v.as_i64())
            .map(|n| n.max(0))
    }

    fn embedded(&self) -> Vec<AnyPost<'a>> {
        Vec::new()
    }
}
