//! Time and error types.
//!
//! This module provides:
//! - `time`: Year-fraction `Time`, schedule snapping tolerances and the `Date` wrapper
//! - `error`: Structured error types for date handling
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Time`], [`Date`], [`time_to_maturity_dates`], [`ONE_HOUR`], [`ONE_DAY`], [`SYSTEM_TIME`] from `time`
//! - [`DateError`] from `error`

pub mod error;
pub mod time;

pub use error::DateError;
pub use time::{time_to_maturity_dates, Date, Time, ONE_DAY, ONE_HOUR, SYSTEM_TIME};
