//! Mathematical helpers for payoff evaluation.
//!
//! - `smoothing`: Linear ramps replacing knock-out and digital indicators

pub mod smoothing;
