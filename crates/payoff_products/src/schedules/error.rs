//! Schedule generation error types.

use payoff_core::types::Time;
use thiserror::Error;

/// Errors that can occur during schedule generation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScheduleError {
    /// Start must be before maturity.
    #[error("Start {start} must be before maturity {end}")]
    InvalidDateRange {
        /// The start time.
        start: Time,
        /// The maturity.
        end: Time,
    },

    /// Missing required field in builder.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Step must be positive and finite.
    #[error("Invalid step {step}: must be positive and finite")]
    InvalidStep {
        /// The rejected step.
        step: Time,
    },

    /// A time or tolerance is NaN or infinite.
    #[error("Non-finite {field}: {value}")]
    NonFinite {
        /// The offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Step is so small the grid would exceed the node limit.
    #[error("Step {step} over {span} years would generate more than {limit} nodes")]
    TooManyNodes {
        /// The requested step.
        step: Time,
        /// Time between start and maturity.
        span: Time,
        /// The node limit.
        limit: usize,
    },

    /// Adding the step no longer moves time forward at this magnitude.
    #[error("Step {step} does not advance past {at}")]
    StepBelowResolution {
        /// The requested step.
        step: Time,
        /// The node the step failed to advance from.
        at: Time,
    },
}
