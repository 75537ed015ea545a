//! # Payoff Products (L2: Product Layer)
//!
//! Monte Carlo product definitions for an AAD-enabled simulation engine.
//!
//! This crate provides:
//! - Simulation requirements declared per timeline point (`simulation`)
//! - Snapped monitoring and payment schedules (`schedules`)
//! - The product contract and the closed product family (`products`)
//!
//! ## Product/Engine Contract
//!
//! Each product exposes a timeline, an index-aligned dataline of
//! [`SimulationRequirement`]s and one label per payoff. The engine simulates
//! a [`Scenario`] realising the dataline and calls
//! [`ProductTrait::payoffs`] once per path.
//!
//! ## Design Principles
//!
//! - **Enum-based products** for static dispatch
//! - **Generic payoffs** over `payoff_core::traits::Scalar`, evaluated with
//!   `f64` for valuation and `Dual64` for sensitivities
//! - **Smoothed discontinuities** so derivatives stay finite at barriers and digitals
//!
//! ## Example
//!
//! ```
//! use payoff_products::{allocate_path, European, Product, ProductTrait};
//!
//! let product = Product::from(European::new(100.0, 1.0, 1.0).unwrap());
//!
//! let mut path = allocate_path::<f64>(product.dataline());
//! path[0].forwards[0] = 110.0;
//! path[0].discounts[0] = 1.0;
//! path[0].numeraire = 2.0;
//!
//! let mut payoffs = vec![0.0; product.payoff_width()];
//! product.payoffs(&path, &mut payoffs);
//! assert_eq!(payoffs[0], 5.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod products;
pub mod schedules;
pub mod simulation;

pub use products::{
    check_path, ContingentBond, European, Europeans, Product, ProductError, ProductTrait, Uoc,
};
pub use simulation::{allocate_path, RateDef, Scenario, ScenarioEntry, SimulationRequirement};
