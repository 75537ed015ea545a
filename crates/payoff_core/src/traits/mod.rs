//! Numeric capability trait for payoff evaluation.
//!
//! Payoffs are written once and evaluated with two realisations of the
//! numeric type:
//! - `f64` for plain valuation
//! - `num_dual::Dual64` for valuation with derivative propagation
//!   (when the `num-dual-mode` feature is enabled)
//!
//! ## Important
//! `Dual64` does NOT implement `num_traits::Float`, so product code must not
//! bound on `Float`. Everything a payoff needs is on [`Scalar`]: the four
//! arithmetic operations, lifting a plain real, comparing against a plain
//! real and materialising the plain value.

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Sub};

use num_traits::{One, Zero};

/// Numeric type a payoff can be evaluated with.
///
/// # Required Methods
///
/// - [`from_real`](Scalar::from_real) - Lift a plain real (no derivative attached)
/// - [`value`](Scalar::value) - Materialise the plain value, dropping derivatives
///
/// # Provided Methods
///
/// Comparisons against plain reals are defined on [`value`](Scalar::value),
/// so branching never touches derivative information.
///
/// # Examples
/// ```
/// use payoff_core::traits::Scalar;
///
/// fn discounted_call<T: Scalar>(spot: T, strike: f64, numeraire: T) -> T {
///     if spot.gt_real(strike) {
///         (spot - T::from_real(strike)) / numeraire
///     } else {
///         T::zero()
///     }
/// }
///
/// assert_eq!(discounted_call(110.0_f64, 100.0, 2.0), 5.0);
/// assert_eq!(discounted_call(90.0_f64, 100.0, 2.0), 0.0);
/// ```
pub trait Scalar:
    Copy
    + Debug
    + Send
    + Sync
    + 'static
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// Lifts a plain real into the numeric type with no derivative attached.
    fn from_real(x: f64) -> Self;

    /// Materialises the plain value, detached from any derivative bookkeeping.
    fn value(&self) -> f64;

    /// Returns `self > x` on the plain value.
    #[inline]
    fn gt_real(&self, x: f64) -> bool {
        self.value() > x
    }

    /// Returns `self < x` on the plain value.
    #[inline]
    fn lt_real(&self, x: f64) -> bool {
        self.value() < x
    }
}

impl Scalar for f64 {
    #[inline]
    fn from_real(x: f64) -> Self {
        x
    }

    #[inline]
    fn value(&self) -> f64 {
        *self
    }
}

#[cfg(feature = "num-dual-mode")]
impl Scalar for num_dual::Dual64 {
    #[inline]
    fn from_real(x: f64) -> Self {
        num_dual::Dual64::new(x, 0.0)
    }

    #[inline]
    fn value(&self) -> f64 {
        self.re
    }
}

/// Positive part `max(x, 0)` written against [`Scalar`].
///
/// The derivative is carried through on the positive branch and is zero
/// otherwise.
///
/// # Examples
/// ```
/// use payoff_core::traits::positive_part;
///
/// assert_eq!(positive_part(3.0_f64), 3.0);
/// assert_eq!(positive_part(-3.0_f64), 0.0);
/// ```
#[inline]
pub fn positive_part<T: Scalar>(x: T) -> T {
    if x.gt_real(0.0) {
        x
    } else {
        T::zero()
    }
}
