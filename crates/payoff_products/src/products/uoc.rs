//! Up-and-out call with a smoothed, discretely monitored barrier.

use super::{assert_contract, finite, smoothing_fraction, ProductError, ProductTrait};
use crate::schedules::ScheduleBuilder;
use crate::simulation::{ScenarioEntry, SimulationRequirement};
use payoff_core::math::smoothing::{
    detached_half_width, knockout_ramp, up_barrier_zone, BarrierZone,
};
use payoff_core::traits::{positive_part, Scalar};
use payoff_core::types::{Time, ONE_HOUR, SYSTEM_TIME};
use tracing::debug;

/// Up-and-out call monitored on a regular grid.
///
/// The barrier indicator is replaced by a linear ramp whose half-width is
/// `smooth` times the first simulated spot, so that pathwise derivatives stay
/// finite when the spot touches the barrier.
///
/// Two payoffs are produced:
/// - index 0: the barrier option, `alive * max(S(T) - K, 0) / N(T)`
/// - index 1: the same call without barrier, for control variates and checks
///
/// # Examples
/// ```
/// use payoff_products::{allocate_path, ProductTrait, Uoc};
///
/// let uoc = Uoc::new(100.0, 120.0, 1.0, 0.5, 0.05).unwrap();
/// assert_eq!(uoc.timeline(), &[0.0, 0.5, 1.0]);
///
/// let mut path = allocate_path::<f64>(uoc.dataline());
/// path[0].forwards[0] = 100.0;
/// path[1].forwards[0] = 120.0; // on the barrier: half knocked out
/// path[2].forwards[0] = 110.0;
/// path[2].numeraire = 1.0;
///
/// let mut payoffs = vec![0.0; 2];
/// uoc.payoffs(&path, &mut payoffs);
/// assert_eq!(payoffs, vec![5.0, 10.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Uoc {
    strike: f64,
    barrier: f64,
    maturity: Time,
    monitor_freq: Time,
    smooth: f64,
    timeline: Vec<Time>,
    dataline: Vec<SimulationRequirement>,
    labels: Vec<String>,
}

impl Uoc {
    /// Creates a barrier call monitored from the valuation date.
    ///
    /// # Arguments
    /// * `strike` - Call strike
    /// * `barrier` - Up-and-out barrier level
    /// * `maturity` - Exercise date, also the last monitoring date
    /// * `monitor_freq` - Time between monitoring dates
    /// * `smooth` - Ramp half-width as a fraction of the initial spot
    pub fn new(
        strike: f64,
        barrier: f64,
        maturity: Time,
        monitor_freq: Time,
        smooth: f64,
    ) -> Result<Self, ProductError> {
        Self::with_start(SYSTEM_TIME, strike, barrier, maturity, monitor_freq, smooth)
    }

    /// Creates a barrier call whose monitoring grid starts at `start`.
    ///
    /// # Errors
    ///
    /// - `InvalidTerm` for non-finite terms or a negative smoothing fraction
    /// - `Schedule` when the monitoring grid cannot be built
    pub fn with_start(
        start: Time,
        strike: f64,
        barrier: f64,
        maturity: Time,
        monitor_freq: Time,
        smooth: f64,
    ) -> Result<Self, ProductError> {
        let strike = finite("strike", strike)?;
        let barrier = finite("barrier", barrier)?;
        let smooth = smoothing_fraction(smooth)?;

        let timeline = ScheduleBuilder::new()
            .start(start)
            .end(maturity)
            .step(monitor_freq)
            .snap_tolerance(ONE_HOUR)
            .build()?
            .into_parts()
            .0;

        let last = timeline.len() - 1;
        let dataline = timeline
            .iter()
            .enumerate()
            .map(|(i, &t)| {
                let req = SimulationRequirement::default().with_forward(t);
                if i == last {
                    req.with_numeraire()
                } else {
                    req
                }
            })
            .collect();

        let vanilla = format!("call {:.2} {:.2}", maturity, strike);
        let barrier_label = format!(
            "{} up and out {:.2} monitoring freq {:.2} smooth {:.2}",
            vanilla, barrier, monitor_freq, smooth
        );

        debug!(
            strike,
            barrier,
            maturity,
            nodes = timeline.len(),
            "uoc built"
        );

        Ok(Self {
            strike,
            barrier,
            maturity,
            monitor_freq,
            smooth,
            timeline,
            dataline,
            labels: vec![barrier_label, vanilla],
        })
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the barrier level.
    #[inline]
    pub fn barrier(&self) -> f64 {
        self.barrier
    }

    /// Returns the maturity.
    #[inline]
    pub fn maturity(&self) -> Time {
        self.maturity
    }

    /// Returns the monitoring frequency.
    #[inline]
    pub fn monitor_freq(&self) -> Time {
        self.monitor_freq
    }

    /// Returns the smoothing fraction.
    #[inline]
    pub fn smooth(&self) -> f64 {
        self.smooth
    }
}

impl ProductTrait for Uoc {
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

        let mut alive = T::one();
        for entry in path {
            let spot = entry.forwards[0];
            match up_barrier_zone(spot, self.barrier, half_width) {
                BarrierZone::KnockedOut => {
                    alive = T::zero();
                    break;
                }
                BarrierZone::Fuzzy => alive = alive * knockout_ramp(spot, self.barrier, half_width),
                BarrierZone::Alive => {}
            }
        }

        let at_maturity = &path[path.len() - 1];
        let vanilla = positive_part(at_maturity.forwards[0] - T::from_real(self.strike))
            / at_maturity.numeraire;

        payoffs[1] = vanilla;
        payoffs[0] = alive * vanilla;
    }
}
