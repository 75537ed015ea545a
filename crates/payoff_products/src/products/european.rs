//! Single-date European call.

use super::{assert_contract, finite, ProductError, ProductTrait};
use crate::simulation::{ScenarioEntry, SimulationRequirement};
use payoff_core::traits::{positive_part, Scalar};
use payoff_core::types::{Time, SYSTEM_TIME};
use tracing::debug;

/// European call exercised on one date and settled on the same or a later date.
///
/// Timeline is the exercise date alone. At exercise the product requests the
/// numeraire, the forward to settlement and the discount factor to
/// settlement, and pays
///
/// ```text
/// max(F(T_ex, T_set) - K, 0) * DF(T_ex, T_set) / N(T_ex)
/// ```
///
/// # Examples
/// ```
/// use payoff_products::{allocate_path, European, ProductTrait};
///
/// let call = European::new(100.0, 1.0, 1.5).unwrap();
/// assert_eq!(call.timeline(), &[1.0]);
/// assert_eq!(call.dataline()[0].forward_mats, vec![1.5]);
/// assert_eq!(call.payoff_labels()[0], "call 100.00 1.00 1.50");
///
/// let mut path = allocate_path::<f64>(call.dataline());
/// path[0].forwards[0] = 120.0;
/// path[0].discounts[0] = 0.5;
/// path[0].numeraire = 2.0;
///
/// let mut payoffs = vec![0.0];
/// call.payoffs(&path, &mut payoffs);
/// assert_eq!(payoffs[0], 5.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct European {
    strike: f64,
    exercise_date: Time,
    settlement_date: Time,
    timeline: Vec<Time>,
    dataline: Vec<SimulationRequirement>,
    labels: Vec<String>,
}

impl European {
    /// Creates a call exercised at `exercise_date` and settled at `settlement_date`.
    ///
    /// # Errors
    ///
    /// - `InvalidTerm` for a non-finite strike or date, or an exercise date
    ///   before the valuation date
    /// - `InvertedDates` when settlement precedes exercise
    pub fn new(
        strike: f64,
        exercise_date: Time,
        settlement_date: Time,
    ) -> Result<Self, ProductError> {
        let strike = finite("strike", strike)?;
        let exercise_date = finite("exercise date", exercise_date)?;
        let settlement_date = finite("settlement date", settlement_date)?;

        if exercise_date < SYSTEM_TIME {
            return Err(ProductError::InvalidTerm {
                name: "exercise date",
                value: exercise_date,
            });
        }
        if settlement_date < exercise_date {
            return Err(ProductError::InvertedDates {
                exercise: exercise_date,
                settlement: settlement_date,
            });
        }

        let timeline = vec![exercise_date];
        let dataline = vec![SimulationRequirement::default()
            .with_numeraire()
            .with_forward(settlement_date)
            .with_discount(settlement_date)];

        let label = if settlement_date == exercise_date {
            format!("call {:.2} {:.2}", strike, exercise_date)
        } else {
            format!(
                "call {:.2} {:.2} {:.2}",
                strike, exercise_date, settlement_date
            )
        };

        debug!(strike, exercise_date, settlement_date, "european built");

        Ok(Self {
            strike,
            exercise_date,
            settlement_date,
            timeline,
            dataline,
            labels: vec![label],
        })
    }

    /// Creates a call settled on its exercise date.
    pub fn at_exercise(strike: f64, exercise_date: Time) -> Result<Self, ProductError> {
        Self::new(strike, exercise_date, exercise_date)
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the exercise date.
    #[inline]
    pub fn exercise_date(&self) -> Time {
        self.exercise_date
    }

    /// Returns the settlement date.
    #[inline]
    pub fn settlement_date(&self) -> Time {
        self.settlement_date
    }
}

impl ProductTrait for European {
    #[inline]
    fn timeline(&self) -> &[Time] {
        &self.timeline
    }

    #[inline]
    fn dataline(&self) -> &[SimulationRequirement] {
        &self.dataline
    }

    #[inline]
    fn payoff_labels(&self) -> &[String] {
        &self.labels
    }

    fn payoffs<T: Scalar>(&self, path: &[ScenarioEntry<T>], payoffs: &mut [T]) {
        assert_contract(&self.timeline, self.labels.len(), path, payoffs);

        let at_exercise = &path[0];
        payoffs[0] = positive_part(at_exercise.forwards[0] - T::from_real(self.strike))
            * at_exercise.discounts[0]
            / at_exercise.numeraire;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::allocate_path;
    use approx::assert_relative_eq;

    fn single_node(call: &European, forward: f64, discount: f64, numeraire: f64) -> f64 {
        let mut path = allocate_path::<f64>(call.dataline());
        path[0].forwards[0] = forward;
        path[0].discounts[0] = discount;
        path[0].numeraire = numeraire;

        let mut payoffs = vec![0.0];
        call.payoffs(&path, &mut payoffs);
        payoffs[0]
    }

    #[test]
    fn test_in_the_money() {
        let call = European::at_exercise(100.0, 1.0).unwrap();
        assert_relative_eq!(single_node(&call, 115.0, 1.0, 1.25), 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_out_of_the_money() {
        let call = European::at_exercise(100.0, 1.0).unwrap();
        assert_eq!(single_node(&call, 85.0, 1.0, 1.25), 0.0);
    }

    #[test]
    fn test_deferred_settlement_discounts() {
        let call = European::new(100.0, 1.0, 1.5).unwrap();
        assert_relative_eq!(single_node(&call, 110.0, 0.9, 1.0), 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dataline_requests() {
        let call = European::new(100.0, 1.0, 1.5).unwrap();
        let req = &call.dataline()[0];

        assert!(req.numeraire);
        assert_eq!(req.forward_mats, vec![1.5]);
        assert_eq!(req.discount_mats, vec![1.5]);
        assert!(req.libor_defs.is_empty());
    }

    #[test]
    fn test_label_without_settlement() {
        let call = European::at_exercise(95.5, 2.0).unwrap();
        assert_eq!(call.payoff_labels(), &["call 95.50 2.00".to_string()]);
    }

    #[test]
    fn test_rejects_settlement_before_exercise() {
        let err = European::new(100.0, 1.0, 0.5).unwrap_err();
        assert_eq!(
            err,
            ProductError::InvertedDates {
                exercise: 1.0,
                settlement: 0.5
            }
        );
    }

    #[test]
    fn test_rejects_past_exercise() {
        assert!(matches!(
            European::at_exercise(100.0, -0.1),
            Err(ProductError::InvalidTerm { name: "exercise date", .. })
        ));
    }

    #[test]
    fn test_rejects_nan_strike() {
        assert!(matches!(
            European::at_exercise(f64::NAN, 1.0),
            Err(ProductError::InvalidTerm { name: "strike", .. })
        ));
    }

    #[test]
    fn test_accessors() {
        let call = European::new(100.0, 1.0, 1.5).unwrap();
        assert_eq!(call.strike(), 100.0);
        assert_eq!(call.exercise_date(), 1.0);
        assert_eq!(call.settlement_date(), 1.5);
    }
}
