//! Library exports for roombook-cli.
//!
//! Exposes the command definitions so they can be exercised without
//! spawning the binary.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
