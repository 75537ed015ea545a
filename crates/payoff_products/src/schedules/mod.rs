//! Snapped time grids for monitored and periodic products.
//!
//! This module provides:
//! - [`Schedule`]: Strictly increasing grid of [`Time`](payoff_core::types::Time) nodes with per-period coverages
//! - [`ScheduleBuilder`]: Builder stepping from a start time towards maturity
//!
//! Nodes are generated every `step` from the start while the remaining time
//! to maturity exceeds the snap tolerance; maturity is then appended as the
//! final node. A regular node landing within the tolerance of maturity is
//! never inserted, so the last period may be shorter or slightly longer than
//! `step` but never degenerate.
//!
//! # Examples
//!
//! ```
//! use payoff_products::schedules::ScheduleBuilder;
//! use payoff_core::types::ONE_DAY;
//!
//! let schedule = ScheduleBuilder::new()
//!     .start(0.0)
//!     .end(1.0)
//!     .step(0.25)
//!     .snap_tolerance(ONE_DAY)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schedule.times(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
//! assert_eq!(schedule.coverages(), &[0.25, 0.25, 0.25, 0.25]);
//! ```

mod error;
mod schedule;

pub use error::ScheduleError;
pub use schedule::{Schedule, ScheduleBuilder, MAX_NODES};
