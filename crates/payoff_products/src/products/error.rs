//! Product error types.
//!
//! This module provides structured error handling for product construction
//! and checked payoff evaluation.

use crate::schedules::ScheduleError;
use payoff_core::types::Time;
use thiserror::Error;

/// Product-related errors.
///
/// # Variants
/// - `InvalidTerm`: A commercial term is NaN, infinite or out of range
/// - `InvertedDates`: Settlement precedes exercise
/// - `EmptyStrip` / `EmptyStrikes` / `DuplicateMaturity`: Malformed batched strip
/// - `Schedule`: Generated schedule rejected its inputs
/// - `PathLength` / `PayoffWidth` / `ScenarioShape`: Evaluation inputs disagree with the product
///
/// # Examples
/// ```
/// use payoff_products::ProductError;
///
/// let err = ProductError::PathLength { expected: 3, got: 2 };
/// assert_eq!(format!("{}", err), "Path length 2 does not match timeline length 3");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProductError {
    /// Invalid commercial term.
    #[error("Invalid {name}: {value}")]
    InvalidTerm {
        /// Name of the term
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Settlement before exercise.
    #[error("Settlement {settlement} precedes exercise {exercise}")]
    InvertedDates {
        /// Exercise date
        exercise: Time,
        /// Settlement date
        settlement: Time,
    },

    /// Batched strip without maturities.
    #[error("Empty strip: at least one maturity is required")]
    EmptyStrip,

    /// Maturity without strikes.
    #[error("No strikes for maturity {maturity}")]
    EmptyStrikes {
        /// The maturity with no strikes
        maturity: Time,
    },

    /// Maturity listed twice.
    #[error("Duplicate maturity {maturity}")]
    DuplicateMaturity {
        /// The repeated maturity
        maturity: Time,
    },

    /// Schedule generation failed.
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Path length differs from the timeline length.
    #[error("Path length {got} does not match timeline length {expected}")]
    PathLength {
        /// Timeline length
        expected: usize,
        /// Path length
        got: usize,
    },

    /// Payoff buffer width differs from the number of labels.
    #[error("Payoff buffer width {got} does not match {expected} payoff labels")]
    PayoffWidth {
        /// Number of labels
        expected: usize,
        /// Buffer width
        got: usize,
    },

    /// Scenario entry sized differently from its requirement.
    #[error("Scenario entry {index}: {observable} has {got} values, {expected} requested")]
    ScenarioShape {
        /// Timeline index
        index: usize,
        /// Observable kind (forwards, discounts, libors)
        observable: &'static str,
        /// Requested count
        expected: usize,
        /// Simulated count
        got: usize,
    },
}
