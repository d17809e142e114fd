//! Command-line interface
//!
//! Argument parsing for the `testnet-genesis` binary.

pub mod commands;

pub use commands::{Command, Opt};
