//! Linear smoothing ramps for discontinuous payoffs.
//!
//! Knock-out barriers and digital coupons are indicator functions of the
//! simulated underlying. Differentiating an indicator gives zero almost
//! everywhere and an unbounded spike at the threshold, so payoffs replace the
//! indicator with a linear ramp of half-width `w`:
//!
//! ```text
//!            1                       x <= threshold - w
//! ramp(x) =  (threshold + w - x)/2w  threshold - w < x <= threshold + w
//!            0                       x >  threshold + w
//! ```
//!
//! The ramp converges to the indicator as `w -> 0`.
//!
//! The half-width is a plain `f64`: it is computed from the simulated path
//! with [`detached_half_width`], which drops to the plain value so that no
//! derivative flows through the width itself. It re-enters the numeric type
//! only inside the ramp formula.

use crate::traits::Scalar;

/// Computes a smoothing half-width as a fraction of a reference observation,
/// detached from differentiation.
///
/// # Arguments
/// * `reference` - Observation scaling the width (typically the first spot on the path)
/// * `fraction` - Width as a fraction of `reference`
///
/// # Examples
/// ```
/// use payoff_core::math::smoothing::detached_half_width;
///
/// assert_eq!(detached_half_width(200.0_f64, 0.05), 10.0);
/// ```
#[inline]
pub fn detached_half_width<T: Scalar>(reference: T, fraction: f64) -> f64 {
    (reference * T::from_real(fraction)).value()
}

/// Position of an observation relative to a smoothed up-barrier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarrierZone {
    /// Below the fuzzy band: the barrier has no effect.
    Alive,
    /// Inside `(barrier - w, barrier + w]`: partially knocked out.
    Fuzzy,
    /// Above `barrier + w`: fully knocked out.
    KnockedOut,
}

/// Classifies an observation against an up-barrier with half-width `half_width`.
///
/// With a zero width the fuzzy band is empty and this is the hard barrier
/// test `x > barrier`.
///
/// # Examples
/// ```
/// use payoff_core::math::smoothing::{up_barrier_zone, BarrierZone};
///
/// assert_eq!(up_barrier_zone(95.0_f64, 100.0, 2.0), BarrierZone::Alive);
/// assert_eq!(up_barrier_zone(100.0_f64, 100.0, 2.0), BarrierZone::Fuzzy);
/// assert_eq!(up_barrier_zone(103.0_f64, 100.0, 2.0), BarrierZone::KnockedOut);
/// ```
#[inline]
pub fn up_barrier_zone<T: Scalar>(x: T, barrier: f64, half_width: f64) -> BarrierZone {
    if x.gt_real(barrier + half_width) {
        BarrierZone::KnockedOut
    } else if x.gt_real(barrier - half_width) {
        BarrierZone::Fuzzy
    } else {
        BarrierZone::Alive
    }
}

/// Survival fraction inside the fuzzy band of an up-barrier.
///
/// Equals 1 at `barrier - w` and 0 at `barrier + w`. Only meaningful for
/// observations classified as [`BarrierZone::Fuzzy`], which implies `w > 0`.
///
/// # Examples
/// ```
/// use payoff_core::math::smoothing::knockout_ramp;
///
/// assert_eq!(knockout_ramp(100.0_f64, 100.0, 2.0), 0.5);
/// assert_eq!(knockout_ramp(98.0_f64, 100.0, 2.0), 1.0);
/// ```
#[inline]
pub fn knockout_ramp<T: Scalar>(x: T, barrier: f64, half_width: f64) -> T {
    (T::from_real(barrier + half_width) - x) / T::from_real(2.0 * half_width)
}

/// Smoothed digital `1{x > 0}` with half-width `half_width`.
///
/// - `x > w`: 1
/// - `x < -w`: 0
/// - otherwise `(x + w) / 2w`, which is 0.5 at `x = 0`
///
/// A zero width degrades to the hard digital with value 0.5 exactly at zero.
/// A negative width keeps the same branch order, so the band is empty and the
/// digital pays 1 for any `x > w`.
///
/// # Examples
/// ```
/// use payoff_core::math::smoothing::digital_ramp;
///
/// assert_eq!(digital_ramp(0.0_f64, 1.0), 0.5);
/// assert_eq!(digital_ramp(1.0_f64, 1.0), 1.0);
/// assert_eq!(digital_ramp(-1.0_f64, 1.0), 0.0);
/// assert_eq!(digital_ramp(0.0_f64, 0.0), 0.5);
/// assert_eq!(digital_ramp(-0.5_f64, -1.0), 1.0);
/// ```
#[inline]
pub fn digital_ramp<T: Scalar>(x: T, half_width: f64) -> T {
    if x.gt_real(half_width) {
        T::one()
    } else if x.lt_real(-half_width) {
        T::zero()
    } else if half_width > 0.0 {
        (x + T::from_real(half_width)) / T::from_real(2.0 * half_width)
    } else {
        // Only reachable with a zero width and x exactly at zero
        T::from_real(0.5)
    }
}
