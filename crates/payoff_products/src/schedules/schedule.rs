//! Schedule and ScheduleBuilder implementation.

use super::error::ScheduleError;
use payoff_core::types::Time;

/// Upper bound on the number of nodes a builder may generate.
pub const MAX_NODES: usize = 1_000_000;

/// Strictly increasing time grid from a start time to maturity.
///
/// `coverages()[i]` is the year fraction between `times()[i]` and
/// `times()[i + 1]`, so there is one coverage fewer than nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    times: Vec<Time>,
    coverages: Vec<Time>,
}

impl Schedule {
    /// Returns the grid nodes, start first and maturity last.
    #[inline]
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// Returns the coverage of each period.
    #[inline]
    pub fn coverages(&self) -> &[Time] {
        &self.coverages
    }

    /// Splits the schedule into nodes and coverages.
    pub fn into_parts(self) -> (Vec<Time>, Vec<Time>) {
        (self.times, self.coverages)
    }
}

/// Builder for [`Schedule`].
///
/// # Examples
///
/// ```
/// use payoff_products::schedules::ScheduleBuilder;
/// use payoff_core::types::ONE_HOUR;
///
/// // 0.3 steps towards 1.0: the last regular node (0.9) is kept
/// let schedule = ScheduleBuilder::new()
///     .start(0.0)
///     .end(1.0)
///     .step(0.3)
///     .snap_tolerance(ONE_HOUR)
///     .build()
///     .unwrap();
///
/// assert_eq!(schedule.times().len(), 5);
/// assert_eq!(schedule.times()[4], 1.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleBuilder {
    start: Option<Time>,
    end: Option<Time>,
    step: Option<Time>,
    snap_tolerance: Time,
}

impl ScheduleBuilder {
    /// Creates a builder with a zero snap tolerance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the first node.
    pub fn start(mut self, start: Time) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets maturity, the last node.
    pub fn end(mut self, end: Time) -> Self {
        self.end = Some(end);
        self
    }

    /// Sets the distance between regular nodes.
    pub fn step(mut self, step: Time) -> Self {
        self.step = Some(step);
        self
    }

    /// Sets the distance to maturity under which no regular node is inserted.
    pub fn snap_tolerance(mut self, tolerance: Time) -> Self {
        self.snap_tolerance = tolerance;
        self
    }

    /// Builds the schedule.
    ///
    /// # Errors
    ///
    /// - `MissingField` when start, end or step is unset
    /// - `NonFinite` when any input is NaN or infinite, or the tolerance is negative
    /// - `InvalidStep` when the step is not positive
    /// - `InvalidDateRange` when maturity is not after start
    /// - `TooManyNodes` when the grid would exceed [`MAX_NODES`]
    /// - `StepBelowResolution` when the step is lost to rounding at the
    ///   magnitude of the nodes
    pub fn build(self) -> Result<Schedule, ScheduleError> {
        let start = self.start.ok_or(ScheduleError::MissingField { field: "start" })?;
        let end = self.end.ok_or(ScheduleError::MissingField { field: "end" })?;
        let step = self.step.ok_or(ScheduleError::MissingField { field: "step" })?;
        let tolerance = self.snap_tolerance;

        for (field, value) in [("start", start), ("end", end), ("step", step)] {
            if !value.is_finite() {
                return Err(ScheduleError::NonFinite { field, value });
            }
        }
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ScheduleError::NonFinite {
                field: "snap_tolerance",
                value: tolerance,
            });
        }
        if step <= 0.0 {
            return Err(ScheduleError::InvalidStep { step });
        }
        if end <= start {
            return Err(ScheduleError::InvalidDateRange { start, end });
        }

        let span = end - start;
        if span / step >= MAX_NODES as f64 {
            return Err(ScheduleError::TooManyNodes {
                step,
                span,
                limit: MAX_NODES,
            });
        }

        let mut times = vec![start];
        let mut coverages = Vec::new();

        // Nodes accumulate by repeated addition of the step
        let mut last = start;
        let mut t = start + step;
        while end - t > tolerance {
            if t <= last {
                return Err(ScheduleError::StepBelowResolution { step, at: last });
            }
            if times.len() + 1 >= MAX_NODES {
                return Err(ScheduleError::TooManyNodes {
                    step,
                    span,
                    limit: MAX_NODES,
                });
            }
            coverages.push(t - last);
            times.push(t);
            last = t;
            t += step;
        }

        coverages.push(end - last);
        times.push(end);

        Ok(Schedule { times, coverages })
    }
}
