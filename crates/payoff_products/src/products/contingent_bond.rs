//! Floating rate bond whose coupons are contingent on positive period returns.

use super::{assert_contract, finite, smoothing_fraction, ProductError, ProductTrait};
use crate::schedules::ScheduleBuilder;
use crate::simulation::{RateDef, ScenarioEntry, SimulationRequirement};
use payoff_core::math::smoothing::{detached_half_width, digital_ramp};
use payoff_core::traits::Scalar;
use payoff_core::types::{Time, ONE_DAY, SYSTEM_TIME};
use tracing::debug;

/// Name of the floating rate curve requested for coupon fixings.
const LIBOR_CURVE: &str = "libor";

/// Bond paying `libor + coupon` over each period in which the underlying rose,
/// and redeeming 1 at maturity.
///
/// For the period `[T_i, T_{i+1}]` with coverage `dt_i` the coupon
///
/// ```text
/// digital(S(T_{i+1}) - S(T_i)) * (L(T_i, T_{i+1}) + c) * dt_i / N(T_{i+1})
/// ```
///
/// is paid, where `digital` is a linear ramp of half-width `smooth * S(T_0)`.
/// The libor is fixed at the start of its period.
///
/// # Examples
/// ```
/// use payoff_products::{allocate_path, ContingentBond, ProductTrait};
///
/// let bond = ContingentBond::new(1.0, 0.02, 0.5, 0.01).unwrap();
/// assert_eq!(bond.timeline(), &[0.0, 0.5, 1.0]);
///
/// let mut path = allocate_path::<f64>(bond.dataline());
/// let spots = [100.0, 110.0, 105.0]; // up, then down
/// for (entry, spot) in path.iter_mut().zip(spots) {
///     entry.forwards[0] = spot;
/// }
/// path[0].libors[0] = 0.04;
///
/// let mut payoffs = vec![0.0];
/// bond.payoffs(&path, &mut payoffs);
/// assert!((payoffs[0] - 1.03).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ContingentBond {
    maturity: Time,
    coupon: f64,
    pay_freq: Time,
    smooth: f64,
    timeline: Vec<Time>,
    coverages: Vec<Time>,
    dataline: Vec<SimulationRequirement>,
    labels: Vec<String>,
}

impl ContingentBond {
    /// Creates a bond accruing from the valuation date.
    ///
    /// # Arguments
    /// * `maturity` - Redemption date, also the last payment date
    /// * `coupon` - Spread added to the floating rate
    /// * `pay_freq` - Time between payment dates
    /// * `smooth` - Digital half-width as a fraction of the initial spot
    pub fn new(
        maturity: Time,
        coupon: f64,
        pay_freq: Time,
        smooth: f64,
    ) -> Result<Self, ProductError> {
        Self::with_start(SYSTEM_TIME, maturity, coupon, pay_freq, smooth)
    }

    /// Creates a bond whose first period starts at `start`.
    ///
    /// # Errors
    ///
    /// - `InvalidTerm` for a non-finite coupon or a negative smoothing fraction
    /// - `Schedule` when the payment schedule cannot be built
    pub fn with_start(
        start: Time,
        maturity: Time,
        coupon: f64,
        pay_freq: Time,
        smooth: f64,
    ) -> Result<Self, ProductError> {
        let coupon = finite("coupon", coupon)?;
        let smooth = smoothing_fraction(smooth)?;

        let (timeline, coverages) = ScheduleBuilder::new()
            .start(start)
            .end(maturity)
            .step(pay_freq)
            .snap_tolerance(ONE_DAY)
            .build()?
            .into_parts();

        let last = timeline.len() - 1;
        let dataline = timeline
            .iter()
            .enumerate()
            .map(|(i, &t)| {
                let mut req = SimulationRequirement::default().with_forward(t);
                if i < last {
                    req = req.with_libor(RateDef::new(t, timeline[i + 1], LIBOR_CURVE));
                }
                if i > 0 {
                    req = req.with_numeraire();
                }
                req
            })
            .collect();

        debug!(
            maturity,
            coupon,
            periods = coverages.len(),
            "contingent bond built"
        );

        Ok(Self {
            maturity,
            coupon,
            pay_freq,
            smooth,
            timeline,
            coverages,
            dataline,
            labels: vec![format!("contingent bond {:.2} {:.2}", maturity, coupon)],
        })
    }

    /// Returns the maturity.
    #[inline]
    pub fn maturity(&self) -> Time {
        self.maturity
    }

    /// Returns the coupon spread.
    #[inline]
    pub fn coupon(&self) -> f64 {
        self.coupon
    }

    /// Returns the payment frequency.
    #[inline]
    pub fn pay_freq(&self) -> Time {
        self.pay_freq
    }

    /// Returns the smoothing fraction.
    #[inline]
    pub fn smooth(&self) -> f64 {
        self.smooth
    }

    /// Returns the coverage of each period.
    #[inline]
    pub fn coverages(&self) -> &[Time] {
        &self.coverages
    }
}

impl ProductTrait for ContingentBond {
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

        let half_width = detached_half_width(path[0].forwards[0], self.smooth);
        let coupon = T::from_real(self.coupon);

        let mut total = T::zero();
        for (period, &dt) in path.windows(2).zip(&self.coverages) {
            let (start, end) = (&period[0], &period[1]);
            let digital = digital_ramp(end.forwards[0] - start.forwards[0], half_width);
            total = total
                + digital * (start.libors[0] + coupon) * T::from_real(dt) / end.numeraire;
        }

        let redemption = T::one() / path[path.len() - 1].numeraire;
        payoffs[0] = total + redemption;
    }
}
