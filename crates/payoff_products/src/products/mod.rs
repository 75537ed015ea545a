//! Product contract and the closed product family.
//!
//! # Architecture
//!
//! Uses enum dispatch (NOT trait objects) for static dispatch:
//! - [`ProductTrait`] is the capability set shared by every product
//! - [`Product`] wraps all product types
//! - Payoffs are generic over [`Scalar`] so the same product prices with
//!   `f64` and differentiates with `Dual64`
//!
//! # Product Types
//!
//! - [`European`]: Single-date call, optionally settled after exercise
//! - [`Europeans`]: Strip of calls over several maturities and strikes
//! - [`Uoc`]: Up-and-out call with a smoothed discretely-monitored barrier
//! - [`ContingentBond`]: Floating coupon bond paying only on positive period returns
//!
//! # Examples
//!
//! ```
//! use payoff_products::{allocate_path, Europeans, Product, ProductTrait};
//!
//! let strip = Europeans::new(vec![(1.0, vec![90.0, 100.0]), (2.0, vec![95.0])]).unwrap();
//! let product = Product::Europeans(strip);
//!
//! assert_eq!(product.timeline(), &[1.0, 2.0]);
//! assert_eq!(product.payoff_width(), 3);
//!
//! let mut path = allocate_path::<f64>(product.dataline());
//! path[0].forwards[0] = 100.0;
//! path[1].forwards[0] = 100.0;
//!
//! let mut payoffs = vec![0.0; 3];
//! product.payoffs(&path, &mut payoffs);
//! assert_eq!(payoffs, vec![10.0, 0.0, 5.0]);
//! ```

mod contingent_bond;
mod error;
mod european;
mod europeans;
mod uoc;

pub use contingent_bond::ContingentBond;
pub use error::ProductError;
pub use european::European;
pub use europeans::Europeans;
pub use uoc::Uoc;

use crate::simulation::{ScenarioEntry, SimulationRequirement};
use payoff_core::traits::Scalar;
use payoff_core::types::Time;

/// Capability set every product implements.
///
/// A product is fully built at construction and read-only afterwards, so
/// [`payoffs`](ProductTrait::payoffs) may run concurrently on distinct paths
/// and buffers. `Clone` hands independent copies to workers.
///
/// # Required Methods
///
/// - [`timeline`](ProductTrait::timeline) - Strictly increasing simulation times
/// - [`dataline`](ProductTrait::dataline) - Observables requested at each time
/// - [`payoff_labels`](ProductTrait::payoff_labels) - One label per payoff
/// - [`payoffs`](ProductTrait::payoffs) - Payoffs of one simulated path
///
/// # Provided Methods
///
/// - [`payoff_width`](ProductTrait::payoff_width) - Number of payoffs
/// - [`evaluate`](ProductTrait::evaluate) - Checked variant of `payoffs`
pub trait ProductTrait: Clone + Send + Sync {
    /// Simulation times, strictly increasing.
    fn timeline(&self) -> &[Time];

    /// Observables requested at each timeline point, index-aligned with
    /// [`timeline`](ProductTrait::timeline).
    fn dataline(&self) -> &[SimulationRequirement];

    /// Descriptive label of each payoff, in output order.
    fn payoff_labels(&self) -> &[String];

    /// Writes the payoffs of one simulated path into `payoffs`.
    ///
    /// # Panics
    ///
    /// Panics if `path.len()` differs from the timeline length or
    /// `payoffs.len()` from the number of labels.
    fn payoffs<T: Scalar>(&self, path: &[ScenarioEntry<T>], payoffs: &mut [T]);

    /// Number of payoffs written by [`payoffs`](ProductTrait::payoffs).
    #[inline]
    fn payoff_width(&self) -> usize {
        self.payoff_labels().len()
    }

    /// Validates `path` and `payoffs` against the product, then evaluates.
    ///
    /// # Errors
    ///
    /// `PathLength`, `PayoffWidth` or `ScenarioShape` when the inputs do not
    /// realise the product's requirements; `payoffs` is left untouched.
    fn evaluate<T: Scalar>(
        &self,
        path: &[ScenarioEntry<T>],
        payoffs: &mut [T],
    ) -> Result<(), ProductError> {
        check_path(self.dataline(), path)?;
        if payoffs.len() != self.payoff_width() {
            return Err(ProductError::PayoffWidth {
                expected: self.payoff_width(),
                got: payoffs.len(),
            });
        }
        self.payoffs(path, payoffs);
        Ok(())
    }
}

/// Checks that `path` realises `dataline` index for index.
///
/// # Errors
///
/// `PathLength` when the lengths differ, `ScenarioShape` for the first entry
/// whose forwards, discounts or libors are sized differently from the request.
pub fn check_path<T>(
    dataline: &[SimulationRequirement],
    path: &[ScenarioEntry<T>],
) -> Result<(), ProductError> {
    if path.len() != dataline.len() {
        return Err(ProductError::PathLength {
            expected: dataline.len(),
            got: path.len(),
        });
    }

    for (index, (req, entry)) in dataline.iter().zip(path).enumerate() {
        let shapes = [
            ("forwards", req.forward_mats.len(), entry.forwards.len()),
            ("discounts", req.discount_mats.len(), entry.discounts.len()),
            ("libors", req.libor_defs.len(), entry.libors.len()),
        ];
        for (observable, expected, got) in shapes {
            if expected != got {
                return Err(ProductError::ScenarioShape {
                    index,
                    observable,
                    expected,
                    got,
                });
            }
        }
    }
    Ok(())
}

/// Call-time contract shared by every `payoffs` implementation.
#[inline]
fn assert_contract<T>(timeline: &[Time], width: usize, path: &[ScenarioEntry<T>], payoffs: &[T]) {
    assert_eq!(
        path.len(),
        timeline.len(),
        "path length must match the product timeline"
    );
    assert_eq!(
        payoffs.len(),
        width,
        "payoff buffer width must match the product labels"
    );
}

/// Rejects NaN and infinite terms.
fn finite(name: &'static str, value: f64) -> Result<f64, ProductError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ProductError::InvalidTerm { name, value })
    }
}

/// Rejects negative smoothing fractions.
fn smoothing_fraction(value: f64) -> Result<f64, ProductError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ProductError::InvalidTerm {
            name: "smoothing fraction",
            value,
        })
    }
}

/// Unified product enum for static dispatch.
///
/// Cloning a `Product` deep-copies its terms, timeline, dataline and labels.
#[derive(Debug, Clone, PartialEq)]
pub enum Product {
    /// Single-date call
    European(European),
    /// Strip of calls
    Europeans(Europeans),
    /// Up-and-out call
    Uoc(Uoc),
    /// Contingent coupon bond
    ContingentBond(ContingentBond),
}

impl Product {
    /// Short type name, used in logs and reports.
    pub fn type_name(&self) -> &'static str {
        match self {
            Product::European(_) => "european",
            Product::Europeans(_) => "europeans",
            Product::Uoc(_) => "uoc",
            Product::ContingentBond(_) => "contingent_bond",
        }
    }
}

impl ProductTrait for Product {
    #[inline]
    fn timeline(&self) -> &[Time] {
        match self {
            Product::European(p) => p.timeline(),
            Product::Europeans(p) => p.timeline(),
            Product::Uoc(p) => p.timeline(),
            Product::ContingentBond(p) => p.timeline(),
        }
    }

    #[inline]
    fn dataline(&self) -> &[SimulationRequirement] {
        match self {
            Product::European(p) => p.dataline(),
            Product::Europeans(p) => p.dataline(),
            Product::Uoc(p) => p.dataline(),
            Product::ContingentBond(p) => p.dataline(),
        }
    }

    #[inline]
    fn payoff_labels(&self) -> &[String] {
        match self {
            Product::European(p) => p.payoff_labels(),
            Product::Europeans(p) => p.payoff_labels(),
            Product::Uoc(p) => p.payoff_labels(),
            Product::ContingentBond(p) => p.payoff_labels(),
        }
    }

    #[inline]
    fn payoffs<T: Scalar>(&self, path: &[ScenarioEntry<T>], payoffs: &mut [T]) {
        match self {
            Product::European(p) => p.payoffs(path, payoffs),
            Product::Europeans(p) => p.payoffs(path, payoffs),
            Product::Uoc(p) => p.payoffs(path, payoffs),
            Product::ContingentBond(p) => p.payoffs(path, payoffs),
        }
    }
}

impl From<European> for Product {
    fn from(p: European) -> Self {
        Product::European(p)
    }
}

impl From<Europeans> for Product {
    fn from(p: Europeans) -> Self {
        Product::Europeans(p)
    }
}

impl From<Uoc> for Product {
    fn from(p: Uoc) -> Self {
        Product::Uoc(p)
    }
}

impl From<ContingentBond> for Product {
    fn from(p: ContingentBond) -> Self {
        Product::ContingentBond(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::allocate_path;

    fn sample_products() -> Vec<Product> {
        vec![
            European::new(100.0, 1.0, 1.25).unwrap().into(),
            Europeans::new(vec![(2.0, vec![95.0]), (1.0, vec![90.0, 100.0])])
                .unwrap()
                .into(),
            Uoc::new(100.0, 120.0, 1.0, 0.25, 0.05).unwrap().into(),
            ContingentBond::new(2.0, 0.01, 0.5, 0.05).unwrap().into(),
        ]
    }

    #[test]
    fn test_dataline_aligned_with_timeline() {
        for product in sample_products() {
            assert_eq!(
                product.dataline().len(),
                product.timeline().len(),
                "{}",
                product.type_name()
            );
            for w in product.timeline().windows(2) {
                assert!(w[1] > w[0], "{} timeline not increasing", product.type_name());
            }
        }
    }

    #[test]
    fn test_type_names() {
        let names: Vec<_> = sample_products().iter().map(Product::type_name).collect();
        assert_eq!(names, vec!["european", "europeans", "uoc", "contingent_bond"]);
    }

    #[test]
    fn test_payoff_widths() {
        let widths: Vec<_> = sample_products().iter().map(|p| p.payoff_width()).collect();
        assert_eq!(widths, vec![1, 3, 2, 1]);
    }

    #[test]
    fn test_evaluate_on_allocated_path_succeeds() {
        for product in sample_products() {
            let mut path = allocate_path::<f64>(product.dataline());
            for entry in path.iter_mut() {
                for f in entry.forwards.iter_mut() {
                    *f = 100.0;
                }
                for d in entry.discounts.iter_mut() {
                    *d = 1.0;
                }
            }
            let mut payoffs = vec![0.0; product.payoff_width()];
            assert!(product.evaluate(&path, &mut payoffs).is_ok());
        }
    }

    #[test]
    fn test_evaluate_rejects_short_path() {
        let product = Product::from(Uoc::new(100.0, 120.0, 1.0, 0.25, 0.05).unwrap());
        let mut path = allocate_path::<f64>(product.dataline());
        path.pop();

        let mut payoffs = vec![0.0; 2];
        let err = product.evaluate(&path, &mut payoffs).unwrap_err();
        assert_eq!(err, ProductError::PathLength { expected: 5, got: 4 });
    }

    #[test]
    fn test_evaluate_rejects_wrong_width() {
        let product = Product::from(European::at_exercise(100.0, 1.0).unwrap());
        let path = allocate_path::<f64>(product.dataline());

        let mut payoffs = vec![0.0; 2];
        let err = product.evaluate(&path, &mut payoffs).unwrap_err();
        assert_eq!(err, ProductError::PayoffWidth { expected: 1, got: 2 });
    }

    #[test]
    fn test_evaluate_rejects_missing_libor() {
        let product = Product::from(ContingentBond::new(1.0, 0.0, 0.5, 0.05).unwrap());
        let mut path = allocate_path::<f64>(product.dataline());
        path[1].libors.clear();

        let mut payoffs = vec![0.0; 1];
        let err = product.evaluate(&path, &mut payoffs).unwrap_err();
        assert_eq!(
            err,
            ProductError::ScenarioShape {
                index: 1,
                observable: "libors",
                expected: 1,
                got: 0
            }
        );
    }

    #[test]
    #[should_panic(expected = "path length must match the product timeline")]
    fn test_payoffs_panics_on_path_mismatch() {
        let product = Product::from(European::at_exercise(100.0, 1.0).unwrap());
        let path = allocate_path::<f64>(&[]);
        let mut payoffs = vec![0.0; 1];
        product.payoffs(&path, &mut payoffs);
    }

    #[test]
    #[should_panic(expected = "payoff buffer width must match the product labels")]
    fn test_payoffs_panics_on_width_mismatch() {
        let product = Product::from(Uoc::new(100.0, 120.0, 1.0, 0.25, 0.05).unwrap());
        let path = allocate_path::<f64>(product.dataline());
        let mut payoffs = vec![0.0; 1];
        product.payoffs(&path, &mut payoffs);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Product::from(ContingentBond::new(2.0, 0.01, 0.5, 0.05).unwrap());
        let timeline = original.timeline().to_vec();
        let dataline = original.dataline().to_vec();
        let labels = original.payoff_labels().to_vec();

        let clone = original.clone();
        let mut path = allocate_path::<f64>(clone.dataline());
        path[0].forwards[0] = 1.0;
        let mut payoffs = vec![0.0; clone.payoff_width()];
        clone.payoffs(&path, &mut payoffs);
        drop(clone);

        assert_eq!(original.timeline(), timeline.as_slice());
        assert_eq!(original.dataline(), dataline.as_slice());
        assert_eq!(original.payoff_labels(), labels.as_slice());
    }
}
