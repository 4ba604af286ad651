//! RSSI Spectrum Map Estimation
//!
//! This crate estimates the spatial distribution of a scalar radio signal
//! strength (RSSI) field over a bounded 2D area from sparse, sequentially
//! arriving point measurements, and tracks a running estimate of the field's
//! maximum location — a proxy for the emitter position.
//!
//! # Features
//!
//! - **Discretized grid**: exact, bijective mapping between real-world
//!   coordinates and cell indices
//! - **Measurement ingestion**: append-only log with last-write-wins sparse
//!   grid cells
//! - **Pluggable interpolation**: ordinary kriging, nearest-neighbor,
//!   linear and thin-plate-spline radial-basis strategies
//! - **Peak extraction**: tie-aware centroid of the dense field maximum
//!
//! # Example
//!
//! ```rust
//! use spectrum_map::{
//!     EstimatorConfig, InterpolationMethod, SpectrumMapEstimator, UpdateStatus,
//! };
//!
//! let config = EstimatorConfig::builder()
//!     .x_bounds(0.0, 4.0)
//!     .y_bounds(0.0, 4.0)
//!     .cells(5, 5)
//!     .method(InterpolationMethod::Linear)
//!     .build();
//!
//! let mut estimator = SpectrumMapEstimator::new(config)?;
//! estimator.add_measurement((0.0, 0.0), -80.0)?;
//! estimator.add_measurement((4.0, 4.0), -80.0)?;
//! estimator.add_measurement((2.0, 2.0), -10.0)?;
//!
//! assert_eq!(estimator.update_full_estimate(), UpdateStatus::Updated);
//! let peak = estimator.peak().expect("dense field computed");
//! assert_eq!(peak.position, (2.0, 2.0));
//! # Ok::<(), spectrum_map::SpectrumError>(())
//! ```
//!
//! # Concurrency
//!
//! An estimator is a single-threaded unit of state: one logical writer and
//! reader, no internal locking, no process-wide state. Run several instances
//! side by side for method comparisons.

#![warn(missing_docs)]

pub mod error;
pub mod estimator;
mod field;
pub mod grid;
pub mod interpolate;
pub mod trajectory;

pub use error::{Result, SpectrumError};
pub use estimator::{
    EstimatorConfig, EstimatorConfigBuilder, Measurement, PeakEstimate, SpectrumMapEstimator,
    UpdateStatus, MIN_SAMPLES,
};
pub use grid::{Axis, AxisScale, GridSpec};
pub use interpolate::{InterpolationMethod, SamplePoint};
pub use trajectory::{distance_trajectory, euclidean_distance};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::estimator::{
        EstimatorConfig, Measurement, PeakEstimate, SpectrumMapEstimator, UpdateStatus,
    };
    pub use crate::grid::{Axis, GridSpec};
    pub use crate::interpolate::{InterpolationMethod, SamplePoint};
    pub use crate::trajectory::{distance_trajectory, euclidean_distance};
    pub use crate::{Result, SpectrumError};
}
