//! Time types for product schedules.
//!
//! This module provides:
//! - `Time`: Year fraction measured from the valuation date
//! - `ONE_HOUR` / `ONE_DAY`: Tolerances used to snap generated schedules onto maturity
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - `time_to_maturity_dates`: Act/365 conversion from calendar dates to `Time`
//!
//! # Examples
//!
//! ```
//! use payoff_core::types::time::{time_to_maturity_dates, Date};
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 7, 1).unwrap();
//!
//! let t = time_to_maturity_dates(start, end);
//! assert!((t - 182.0 / 365.0).abs() < 1e-12);
//! ```

use chrono::NaiveDate;
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Year fraction measured from the valuation date.
///
/// Totally ordered through `f64::total_cmp` where an ordering is required.
pub type Time = f64;

/// Valuation date on the `Time` axis. Generated schedules start here.
pub const SYSTEM_TIME: Time = 0.0;

/// Tolerance below which a barrier monitoring node is snapped onto maturity.
pub const ONE_HOUR: Time = 0.000114469;

/// Tolerance below which a coupon payment node is snapped onto maturity.
pub const ONE_DAY: Time = 0.003773585;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Used only at the edges (product books) to turn calendar maturities into
/// [`Time`]; products themselves work on year fractions.
///
/// # Examples
///
/// ```
/// use payoff_core::types::time::Date;
///
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
/// assert_eq!(date.to_string(), "2024-06-15");
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 1, 11).unwrap();
/// assert_eq!(end - start, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// # Examples
    ///
    /// ```
    /// use payoff_core::types::time::Date;
    ///
    /// assert!(Date::parse("2024-06-15").is_ok());
    /// assert!(Date::parse("not-a-date").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(e.to_string()))
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Converts a pair of dates to a year fraction with the Act/365 convention.
///
/// Negative when `end` precedes `start`; callers validating maturities reject
/// those downstream.
pub fn time_to_maturity_dates(start: Date, end: Date) -> Time {
    (end - start) as f64 / 365.0
}
