//! Monthly reporting periods
//!
//! A team's budget is declared per calendar month. `MonthPeriod` names the
//! month and `MonthWindow` is the inclusive instant range used to select the
//! expenses that belong to it.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month (e.g., "2025-01")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthPeriod {
    year: i32,
    month: u32,
}

impl MonthPeriod {
    /// Create a period, rejecting months outside 1–12
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        // Reject years chrono cannot represent
        first_instant(year, month)?;
        Ok(Self { year, month })
    }

    /// The month containing today's date
    pub fn current() -> Self {
        let today = Utc::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The inclusive instant range covered by this month
    pub fn window(&self) -> Result<MonthWindow, PeriodParseError> {
        MonthWindow::for_month(self.year, self.month)
    }

    /// Get the next month
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Get the previous month
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Parse a period string
    ///
    /// Formats: "2025-01", "current", "last"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();

        match s.to_lowercase().as_str() {
            "current" | "this" => return Ok(Self::current()),
            "last" | "previous" => return Ok(Self::current().prev()),
            _ => {}
        }

        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;

        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Inclusive instant range `[first day 00:00:00.000, last day 23:59:59.999]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl MonthWindow {
    /// Resolve the window for a month of a year (UTC)
    pub fn for_month(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }

        let start = first_instant(year, month)?;
        let next_start = if month == 12 {
            first_instant(year + 1, 1)?
        } else {
            first_instant(year, month + 1)?
        };

        Ok(Self {
            start,
            end: next_start - Duration::milliseconds(1),
        })
    }

    /// Check whether an instant falls within the window (both ends inclusive)
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

fn first_instant(year: i32, month: u32) -> Result<DateTime<Utc>, PeriodParseError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or(PeriodParseError::OutOfRange(year))
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    OutOfRange(i32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            PeriodParseError::OutOfRange(y) => write!(f, "Year out of range: {}", y),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, ms: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap() + Duration::milliseconds(ms as i64)
    }

    #[test]
    fn test_window_boundaries() {
        let window = MonthWindow::for_month(2025, 1).unwrap();
        assert_eq!(window.start, utc(2025, 1, 1, 0, 0, 0, 0));
        assert_eq!(window.end, utc(2025, 1, 31, 23, 59, 59, 999));
        assert_eq!(window.end.nanosecond(), 999_000_000);
    }

    #[test]
    fn test_window_inclusive_on_both_ends() {
        let window = MonthWindow::for_month(2025, 1).unwrap();
        assert!(window.contains(utc(2025, 1, 1, 0, 0, 0, 0)));
        assert!(window.contains(utc(2025, 1, 31, 23, 59, 59, 999)));
        assert!(!window.contains(utc(2024, 12, 31, 23, 59, 59, 999)));
        assert!(!window.contains(utc(2025, 2, 1, 0, 0, 0, 0)));
    }

    #[test]
    fn test_window_february_and_december() {
        let leap = MonthWindow::for_month(2024, 2).unwrap();
        assert_eq!(leap.end, utc(2024, 2, 29, 23, 59, 59, 999));

        let dec = MonthWindow::for_month(2025, 12).unwrap();
        assert_eq!(dec.end, utc(2025, 12, 31, 23, 59, 59, 999));
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert_eq!(
            MonthWindow::for_month(2025, 13),
            Err(PeriodParseError::InvalidMonth(13))
        );
        assert_eq!(
            MonthPeriod::new(2025, 0),
            Err(PeriodParseError::InvalidMonth(0))
        );
    }

    #[test]
    fn test_navigation() {
        let dec = MonthPeriod::new(2024, 12).unwrap();
        assert_eq!(dec.next(), MonthPeriod::new(2025, 1).unwrap());
        assert_eq!(dec.next().prev(), dec);
    }

    #[test]
    fn test_parse_and_display() {
        let period = MonthPeriod::parse("2025-03").unwrap();
        assert_eq!(period.year(), 2025);
        assert_eq!(period.month(), 3);
        assert_eq!(period.to_string(), "2025-03");
        assert!(MonthPeriod::parse("2025").is_err());
        assert!(MonthPeriod::parse("2025-13").is_err());
        assert_eq!(MonthPeriod::parse("current").unwrap(), MonthPeriod::current());
    }
}
