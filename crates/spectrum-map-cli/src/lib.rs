//! Spectrum Map CLI
//!
//! Command-line driver for the spectrum map estimator: simulates a survey
//! over a bounded area, feeds measurements to the estimator one at a time,
//! and renders the resulting heatmaps, animation, and convergence plot.
//!
//! # Usage
//!
//! ```bash
//! # Run a shuffled kriging survey and write artifacts to ./output
//! spectrum-map survey --method kriging --shuffle --out output/kriging
//!
//! # Compare a second method on the same seed
//! spectrum-map survey --method linear --shuffle --seed 7 --out output/linear
//! ```

use clap::{Parser, Subcommand};

pub mod propagation;
pub mod render;
pub mod survey;

/// Spectrum map survey driver and renderer
#[derive(Parser, Debug)]
#[command(name = "spectrum-map")]
#[command(author, version, about = "RSSI spectrum map estimation surveys")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a simulated measurement survey and render its artifacts
    Survey(survey::SurveyArgs),

    /// Display version information
    Version,
}
