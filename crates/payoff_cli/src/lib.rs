//! # payoff_cli: Product Book Inspection
//!
//! Library half of the `payoff` binary.
//!
//! ## Commands
//!
//! - `payoff describe --book <file>` - Build a book and list payoffs, timelines and datalines
//! - `payoff evaluate --book <file> --product <index> --scenario <file>` - Evaluate one product on a JSON scenario
//! - `payoff check` - Print the resolved configuration
//!
//! ## Configuration
//!
//! See [`config`]: defaults, `payoff.toml`, `PAYOFF_*` environment variables,
//! then flags.

#![deny(missing_docs)]

pub mod book;
pub mod commands;
pub mod config;
pub mod error;

pub use error::{CliError, Result};
