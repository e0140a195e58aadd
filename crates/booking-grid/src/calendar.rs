//! Calendar math: month lengths, weekday numbering and month shifting.
//!
//! Everything here is pure date arithmetic over `chrono::NaiveDate`. The only
//! failure mode is constructing an [`AnchorMonth`] outside the supported range.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// A displayed month, always normalized to its first day.
///
/// Years are limited to one year inside chrono's representable range so the
/// filler days of any valid month are representable too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "MonthParts", try_from = "MonthParts")]
pub struct AnchorMonth {
    first: NaiveDate,
    last: NaiveDate,
}

/// Wire form of an [`AnchorMonth`]: `{"year": 2024, "month": 2}`, month 1-based.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct MonthParts {
    year: i32,
    month: u32,
}

impl AnchorMonth {
    /// Build the anchor for `year`/`month` (1-based month).
    ///
    /// # Errors
    /// Returns `GridError::InvalidMonth` if the month is not in `1..=12` or the
    /// year is outside the supported range.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let invalid = || GridError::InvalidMonth { year, month };
        if !supported_years().contains(&year) {
            return Err(invalid());
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let last = first
            .with_day(month_length(year, month))
            .ok_or_else(invalid)?;
        Ok(Self { first, last })
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Result<Self> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// 1-based month number.
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// Day 1 of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Last calendar day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.last
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last
    }
}

impl fmt::Display for AnchorMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl From<AnchorMonth> for MonthParts {
    fn from(anchor: AnchorMonth) -> Self {
        Self {
            year: anchor.year(),
            month: anchor.month(),
        }
    }
}

impl TryFrom<MonthParts> for AnchorMonth {
    type Error = GridError;

    fn try_from(parts: MonthParts) -> Result<Self> {
        Self::new(parts.year, parts.month)
    }
}

fn supported_years() -> std::ops::RangeInclusive<i32> {
    (NaiveDate::MIN.year() + 1)..=(NaiveDate::MAX.year() - 1)
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn month_length(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Calendar length of the anchor's month, accounting for leap years.
pub fn days_in_month(anchor: AnchorMonth) -> u32 {
    month_length(anchor.year(), anchor.month())
}

/// Column of `date` in a week that begins on `week_start` (`0..=6`).
pub fn weekday_index(date: NaiveDate, week_start: Weekday) -> u8 {
    let day = date.weekday().num_days_from_sunday();
    let start = week_start.num_days_from_sunday();
    ((day + 7 - start) % 7) as u8
}

/// Weekday number in the convention used by blocked-facts providers:
/// Sunday = 0 through Saturday = 6.
pub fn provider_weekday(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Move `anchor` by `delta` whole months, landing on day 1 of the target.
///
/// The day of month is never carried across. Results beyond the supported
/// year range saturate at the first or last supported month.
pub fn shift_month(anchor: AnchorMonth, delta: i32) -> AnchorMonth {
    let index = i64::from(anchor.year()) * 12 + i64::from(anchor.month() - 1) + i64::from(delta);
    let years = supported_years();
    let min = i64::from(*years.start()) * 12;
    let max = i64::from(*years.end()) * 12 + 11;
    let index = index.clamp(min, max);

    let year = index.div_euclid(12) as i32;
    let month = index.rem_euclid(12) as u32 + 1;
    AnchorMonth::new(year, month).unwrap_or(anchor)
}
