//! Batched strip of European calls sharing one simulation.

use super::{assert_contract, finite, ProductError, ProductTrait};
use crate::simulation::{ScenarioEntry, SimulationRequirement};
use payoff_core::traits::{positive_part, Scalar};
use payoff_core::types::{Time, SYSTEM_TIME};
use tracing::debug;

/// Strip of European calls over several maturities and strikes.
///
/// The timeline holds one node per maturity in ascending order. Payoffs are
/// laid out maturity-major: every strike of the first maturity in the order
/// supplied, then every strike of the second, and so on. Each payoff is
/// `max(S(T) - K, 0) / N(T)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Europeans {
    maturities: Vec<Time>,
    strikes: Vec<Vec<f64>>,
    dataline: Vec<SimulationRequirement>,
    labels: Vec<String>,
}

impl Europeans {
    /// Builds the strip from `(maturity, strikes)` pairs in any order.
    ///
    /// Pairs are sorted by maturity; the strike order within a maturity is
    /// kept as given.
    ///
    /// # Errors
    ///
    /// - `EmptyStrip` when no maturity is given
    /// - `EmptyStrikes` when a maturity has no strikes
    /// - `DuplicateMaturity` when a maturity appears twice
    /// - `InvalidTerm` for non-finite values or maturities before the valuation date
    ///
    /// # Examples
    /// ```
    /// use payoff_products::{Europeans, ProductTrait};
    ///
    /// let strip = Europeans::new(vec![(2.0, vec![95.0]), (1.0, vec![90.0, 100.0])]).unwrap();
    ///
    /// assert_eq!(strip.maturities(), &[1.0, 2.0]);
    /// assert_eq!(strip.payoff_labels()[1], "call 1.00 100.00");
    /// ```
    pub fn new<I>(options: I) -> Result<Self, ProductError>
    where
        I: IntoIterator<Item = (Time, Vec<f64>)>,
    {
        let mut options: Vec<(Time, Vec<f64>)> = options.into_iter().collect();
        if options.is_empty() {
            return Err(ProductError::EmptyStrip);
        }

        for (maturity, strikes) in &options {
            let maturity = finite("maturity", *maturity)?;
            if maturity < SYSTEM_TIME {
                return Err(ProductError::InvalidTerm {
                    name: "maturity",
                    value: maturity,
                });
            }
            if strikes.is_empty() {
                return Err(ProductError::EmptyStrikes { maturity });
            }
            for &strike in strikes {
                finite("strike", strike)?;
            }
        }

        options.sort_by(|a, b| a.0.total_cmp(&b.0));
        if let Some(pair) = options.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(ProductError::DuplicateMaturity { maturity: pair[0].0 });
        }

        let (maturities, strikes): (Vec<Time>, Vec<Vec<f64>>) = options.into_iter().unzip();

        let dataline = maturities
            .iter()
            .map(|&t| SimulationRequirement::default().with_numeraire().with_forward(t))
            .collect();

        let labels: Vec<String> = maturities
            .iter()
            .zip(&strikes)
            .flat_map(|(t, ks)| ks.iter().map(move |k| format!("call {:.2} {:.2}", t, k)))
            .collect();

        debug!(
            maturities = maturities.len(),
            width = labels.len(),
            "europeans built"
        );

        Ok(Self {
            maturities,
            strikes,
            dataline,
            labels,
        })
    }

    /// Returns the maturities, ascending. Identical to the timeline.
    #[inline]
    pub fn maturities(&self) -> &[Time] {
        &self.maturities
    }

    /// Returns the strikes of each maturity, index-aligned with [`maturities`](Self::maturities).
    #[inline]
    pub fn strikes(&self) -> &[Vec<f64>] {
        &self.strikes
    }
}

impl ProductTrait for Europeans {
    #[inline]
    fn timeline(&self) -> &[Time] {
        &self.maturities
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
        assert_contract(&self.maturities, self.labels.len(), path, payoffs);

        let mut offset = 0;
        for (entry, strikes) in path.iter().zip(&self.strikes) {
            let spot = entry.forwards[0];
            let numeraire = entry.numeraire;

            let slots = &mut payoffs[offset..offset + strikes.len()];
            for (slot, &strike) in slots.iter_mut().zip(strikes) {
                *slot = positive_part(spot - T::from_real(strike)) / numeraire;
            }
            offset += strikes.len();
        }
    }
}
