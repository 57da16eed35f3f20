use std::fmt;
use std::str::FromStr;

use time::{Date, Month, PrimitiveDateTime, Time};

/// Simple "YYYY-MM" utility with safe arithmetic and ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: u16,
    pub month: u8, // 1..=12
}

impl YearMonth {
    pub fn new(year: u16, month: u8) -> Self {
        assert!((1..=12).contains(&month), "Month must be 1..=12");
        Self { year, month }
    }
    pub fn prev(self) -> Option<Self> {
        if self.month > 1 {
            Some(Self { year: self.year, month: self.month - 1 })
        } else if self.year > 0 {
            Some(Self { year: self.year - 1, month: 12 })
        } else {
            None
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<_> = s.split('-').collect();
        if parts.len() != 2 {
            return Err("expected YYYY-MM".into());
        }
        let year: u16 = parts[0].parse().map_err(|_| "invalid year")?;
        let month: u8 = parts[1].parse().map_err(|_| "invalid month")?;
        if !(1..=12).contains(&month) {
            return Err("month must be 01..12".into());
        }
        Ok(Self { year, month })
    }
}

/// Unix timestamp (UTC midnight) of the first day of `ym`.
pub fn month_start_timestamp(ym: YearMonth) -> i64 {
    let month = Month::try_from(ym.month).expect("month validated at construction");
    let date = Date::from_calendar_date(ym.year as i32, month, 1)
        .expect("day 1 exists in every month");
    PrimitiveDateTime::new(date, Time::MIDNIGHT)
        .assume_utc()
        .unix_timestamp()
}

/// Earliest timestamp allowed for an aggregation window: midnight UTC on the
/// first day of the month `months_back` before `anchor`.
///
/// With anchor 2022-12 and `months_back` 3, posts from 2022-09-01 00:00:00 UTC
/// onward are in the window.
pub fn earliest_timestamp(anchor: YearMonth, months_back: u32) -> i64 {
    let mut ym = anchor;
    for _ in 0..months_back {
        ym = ym.prev().unwrap_or(YearMonth { year: 0, month: 1 });
    }
    month_start_timestamp(ym)
}
