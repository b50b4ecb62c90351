//! gridfinder: command-line driver for grid network prediction.
//!
//! Reads target and cost grids from JSON, runs the propagation from
//! `gridfinder-paths`, and writes the distance field and network mask.

pub mod cli;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod snapshot;

pub use commands::RunSummary;
pub use config::{RunConfig, RunOverrides};
pub use error::CliError;
pub use snapshot::SnapshotWriter;
