//! Product books
//!
//! A book is a TOML file listing product definitions:
//!
//! ```toml
//! as_of = "2024-01-02"
//!
//! [[products]]
//! type = "european"
//! strike = 100.0
//! exercise = 1.0
//! settlement = "2025-03-03"
//!
//! [[products]]
//! type = "uoc"
//! strike = 100.0
//! barrier = 120.0
//! maturity = 1.0
//! monitor_freq = 0.25
//! smooth = 0.05
//! ```
//!
//! Dates are year fractions or quoted ISO dates, the latter converted
//! against `as_of` at act/365.

use anyhow::{anyhow, bail, Context};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

use payoff_core::types::{time_to_maturity_dates, Date, Time};
use payoff_products::{ContingentBond, European, Europeans, Product, Uoc};

/// Date of a product event.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TimeSpec {
    /// Year fraction from the valuation date
    Years(Time),
    /// Calendar date, resolved against the book's `as_of`
    Date(Date),
}

impl TimeSpec {
    /// Converts to a year fraction.
    pub fn resolve(self, as_of: Option<Date>) -> anyhow::Result<Time> {
        match self {
            TimeSpec::Years(t) => Ok(t),
            TimeSpec::Date(date) => {
                let as_of = as_of
                    .ok_or_else(|| anyhow!("date {} given but the book has no as_of", date))?;
                Ok(time_to_maturity_dates(as_of, date))
            }
        }
    }
}

/// Strikes of one maturity in a batched strip.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StripEntry {
    /// Maturity of the calls
    pub maturity: TimeSpec,
    /// Strikes, in payoff order
    pub strikes: Vec<f64>,
}

/// One product definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BookEntry {
    /// Single-date call
    European {
        /// Strike
        strike: f64,
        /// Exercise date
        exercise: TimeSpec,
        /// Settlement date, exercise if absent
        settlement: Option<TimeSpec>,
    },
    /// Strip of calls
    Europeans {
        /// Maturities with their strikes
        options: Vec<StripEntry>,
    },
    /// Up-and-out call
    Uoc {
        /// Strike
        strike: f64,
        /// Barrier level
        barrier: f64,
        /// Maturity
        maturity: TimeSpec,
        /// Monitoring frequency in years
        monitor_freq: Time,
        /// Smoothing fraction of the initial spot
        smooth: f64,
        /// First monitoring date, the configured system time if absent
        start: Option<TimeSpec>,
    },
    /// Contingent coupon bond
    ContingentBond {
        /// Maturity
        maturity: TimeSpec,
        /// Coupon spread
        coupon: f64,
        /// Payment frequency in years
        pay_freq: Time,
        /// Smoothing fraction of the initial spot
        smooth: f64,
        /// Accrual start, the configured system time if absent
        start: Option<TimeSpec>,
    },
}

impl BookEntry {
    /// Builds the product, resolving dates against `as_of` and defaulting
    /// schedule starts to `system_time`.
    pub fn build(&self, as_of: Option<Date>, system_time: Time) -> anyhow::Result<Product> {
        let start_or_now = |start: &Option<TimeSpec>| match start {
            Some(s) => s.resolve(as_of),
            None => Ok(system_time),
        };

        let product = match self {
            BookEntry::European {
                strike,
                exercise,
                settlement,
            } => {
                let exercise = exercise.resolve(as_of)?;
                let settlement = match settlement {
                    Some(s) => s.resolve(as_of)?,
                    None => exercise,
                };
                European::new(*strike, exercise, settlement)?.into()
            }
            BookEntry::Europeans { options } => {
                let strip = options
                    .iter()
                    .map(|o| Ok((o.maturity.resolve(as_of)?, o.strikes.clone())))
                    .collect::<anyhow::Result<Vec<_>>>()?;
                Europeans::new(strip)?.into()
            }
            BookEntry::Uoc {
                strike,
                barrier,
                maturity,
                monitor_freq,
                smooth,
                start,
            } => Uoc::with_start(
                start_or_now(start)?,
                *strike,
                *barrier,
                maturity.resolve(as_of)?,
                *monitor_freq,
                *smooth,
            )?
            .into(),
            BookEntry::ContingentBond {
                maturity,
                coupon,
                pay_freq,
                smooth,
                start,
            } => ContingentBond::with_start(
                start_or_now(start)?,
                maturity.resolve(as_of)?,
                *coupon,
                *pay_freq,
                *smooth,
            )?
            .into(),
        };
        Ok(product)
    }
}

/// A parsed book file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Book {
    /// Reference date for calendar dates
    pub as_of: Option<Date>,
    /// Product definitions, in book order
    #[serde(default)]
    pub products: Vec<BookEntry>,
}

impl Book {
    /// Parses a book from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("invalid book TOML")
    }

    /// Reads and parses the book at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read book {}", path.display()))?;
        let book = Self::from_toml(&content)
            .with_context(|| format!("failed to parse book {}", path.display()))?;
        info!(
            "Loaded book {} with {} products",
            path.display(),
            book.products.len()
        );
        Ok(book)
    }

    /// Builds every product in book order.
    ///
    /// Fails on the first entry whose terms are rejected, naming its index.
    pub fn build_products(&self, system_time: Time) -> anyhow::Result<Vec<Product>> {
        if self.products.is_empty() {
            bail!("book contains no products");
        }
        self.products
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let product = entry
                    .build(self.as_of, system_time)
                    .with_context(|| format!("product {}", index))?;
                debug!(index, kind = product.type_name(), "product built");
                Ok(product)
            })
            .collect()
    }
}
