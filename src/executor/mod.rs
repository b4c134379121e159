//! Command execution module
//!
//! Runs the external toolchain through the shell with an optional timeout,
//! passing its output straight through.

pub mod runner;

pub use runner::*;
