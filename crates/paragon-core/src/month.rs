//! Calendar month value type used for report periods

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// First year of the linear month index
const INDEX_BASE_YEAR: i32 = 2000;

/// A calendar month. `month` is zero-based (0 = January).
///
/// Ordering is chronological. All timestamps are interpreted in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawMonth")]
pub struct Month {
    year: i32,
    month: u32,
}

/// Unchecked wire shape, validated through [`Month::new`]
#[derive(Deserialize)]
struct RawMonth {
    year: i32,
    month: u32,
}

impl TryFrom<RawMonth> for Month {
    type Error = Error;

    fn try_from(raw: RawMonth) -> Result<Self> {
        Month::new(raw.month, raw.year)
    }
}

impl Month {
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if month > 11 {
            return Err(Error::InvalidData(format!(
                "Month must be within 0..=11, got {}",
                month
            )));
        }
        Ok(Self { year, month })
    }

    /// Zero-based month of the year
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Linear encoding `(year - 2000) * 12 + month`
    pub fn index(&self) -> i32 {
        (self.year - INDEX_BASE_YEAR) * 12 + self.month as i32
    }

    pub fn from_index(index: i32) -> Self {
        Self {
            year: INDEX_BASE_YEAR + index.div_euclid(12),
            month: index.rem_euclid(12) as u32,
        }
    }

    pub fn next(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(&self) -> Self {
        Self::from_index(self.index() - 1)
    }

    /// Signed number of months from `self` to `other`
    pub fn distance_to(&self, other: &Month) -> i32 {
        other.index() - self.index()
    }

    /// Every month from `from` to `to`, both inclusive, ascending
    pub fn range(from: Month, to: Month) -> Vec<Month> {
        (from.index()..=to.index()).map(Self::from_index).collect()
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self::from_date(datetime.date_naive())
    }

    /// Month containing a unix timestamp (seconds)
    pub fn from_timestamp(timestamp: i64) -> Result<Self> {
        DateTime::from_timestamp(timestamp, 0)
            .map(Self::from_datetime)
            .ok_or_else(|| Error::InvalidData(format!("Timestamp out of range: {}", timestamp)))
    }

    /// The current calendar month
    pub fn current() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Unix timestamp of the first second of this month
    pub fn start_timestamp(&self) -> i64 {
        Utc.with_ymd_and_hms(self.year, self.month + 1, 1, 0, 0, 0)
            .single()
            .map(|dt| dt.timestamp())
            .unwrap_or_default()
    }

    /// True if `timestamp` falls in `[start of month, start of next month)`
    pub fn contains(&self, timestamp: i64) -> bool {
        timestamp >= self.start_timestamp() && timestamp < self.next().start_timestamp()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month + 1)
    }
}

impl FromStr for Month {
    type Err = Error;

    /// Parses `YYYY-MM` with a one-based month
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidData(format!("Expected YYYY-MM, got '{}'", s));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if month == 0 {
            return Err(invalid());
        }
        Self::new(month - 1, year)
    }
}
