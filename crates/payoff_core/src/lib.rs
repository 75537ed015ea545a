//! # payoff_core: Numeric Foundation for Monte Carlo Products
//!
//! ## Layer 1 (Foundation) Role
//!
//! payoff_core is the bottom layer of the product workspace, providing:
//! - The numeric capability trait every payoff is written against (`traits::Scalar`)
//! - Year-fraction time, snapping tolerances and calendar dates (`types::time`)
//! - Linear smoothing ramps replacing knock-out and digital indicators (`math::smoothing`)
//! - Error types: `DateError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other payoff_* crates, with minimal external dependencies:
//! - num-traits: `Zero`/`One` bounds shared by every scalar realisation
//! - num-dual: Dual number scalar for forward-mode differentiation (optional)
//! - chrono: Date arithmetic
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use payoff_core::math::smoothing::{digital_ramp, detached_half_width};
//! use payoff_core::traits::Scalar;
//!
//! // Half-width is 1% of the reference spot, carried as a plain real
//! let width = detached_half_width(100.0_f64, 0.01);
//! assert_eq!(width, 1.0);
//!
//! // A zero return sits in the middle of the ramp
//! let digital: f64 = digital_ramp(0.0, width);
//! assert_eq!(digital.value(), 0.5);
//! ```
//!
//! ## Feature Flags
//!
//! - `num-dual-mode` (default): Implement `Scalar` for `num_dual::Dual64`
//! - `serde` (default): Enable serialisation for `Date`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
