//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Commands render their
//! output to a `String` so that `main` owns the terminal.

pub mod check;
pub mod describe;
pub mod evaluate;
