//! The spectrum map estimator.
//!
//! Owns the measurement log, the sparse measured grid, the interpolated
//! dense grid, and the running estimate of the field's maximum location.
//! One instance is one isolated unit of state: single logical writer, no
//! shared or process-wide data, so several estimators can run side by side
//! for comparative surveys.

use crate::error::Result;
use crate::field;
use crate::grid::GridSpec;
use crate::interpolate::{InterpolationMethod, SamplePoint};
use ndarray::Array2;

/// Minimum measurement count before interpolation is attempted.
pub const MIN_SAMPLES: usize = 3;

/// One raw measurement: a real-world position and its RSSI value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    /// Receiver position `(x, y)` in real-world coordinates
    pub position: (f64, f64),
    /// Received signal strength (dBm)
    pub rssi: f64,
}

/// The estimated location of the field maximum, in both index and
/// real-world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeakEstimate {
    /// Grid cell index `(ix, iy)` — the rounded centroid of all cells
    /// attaining the maximum value
    pub index: (usize, usize),
    /// The corresponding real-world position
    pub position: (f64, f64),
}

/// Outcome of a dense-field refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    /// The dense field and peak estimate were recomputed
    Updated,
    /// Fewer than [`MIN_SAMPLES`] measurements; prior state untouched
    InsufficientData,
    /// The strategy produced no defined values; prior state retained
    Degenerate,
}

/// Construction-time configuration for [`SpectrumMapEstimator`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EstimatorConfig {
    /// Lower x bound of the survey area
    pub x_min: f64,
    /// Upper x bound of the survey area
    pub x_max: f64,
    /// Lower y bound of the survey area
    pub y_min: f64,
    /// Upper y bound of the survey area
    pub y_max: f64,
    /// Cell count along x
    pub cells_x: usize,
    /// Cell count along y
    pub cells_y: usize,
    /// Interpolation strategy
    pub method: InterpolationMethod,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            x_min: -50.0,
            x_max: 50.0,
            y_min: -50.0,
            y_max: 50.0,
            cells_x: 25,
            cells_y: 25,
            method: InterpolationMethod::Nearest,
        }
    }
}

impl EstimatorConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> EstimatorConfigBuilder {
        EstimatorConfigBuilder::default()
    }
}

/// Builder for [`EstimatorConfig`].
#[derive(Debug, Default)]
pub struct EstimatorConfigBuilder {
    config: EstimatorConfig,
}

impl EstimatorConfigBuilder {
    /// Set the x-axis bounds.
    pub fn x_bounds(mut self, min: f64, max: f64) -> Self {
        self.config.x_min = min;
        self.config.x_max = max;
        self
    }

    /// Set the y-axis bounds.
    pub fn y_bounds(mut self, min: f64, max: f64) -> Self {
        self.config.y_min = min;
        self.config.y_max = max;
        self
    }

    /// Set the cell counts per axis.
    pub fn cells(mut self, cells_x: usize, cells_y: usize) -> Self {
        self.config.cells_x = cells_x;
        self.config.cells_y = cells_y;
        self
    }

    /// Set the interpolation strategy.
    pub fn method(mut self, method: InterpolationMethod) -> Self {
        self.config.method = method;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> EstimatorConfig {
        self.config
    }
}

/// Estimates an RSSI field over a bounded 2D area from sparse point
/// measurements and tracks the field's maximum location.
#[derive(Debug, Clone)]
pub struct SpectrumMapEstimator {
    grid: GridSpec,
    method: InterpolationMethod,
    measurements: Vec<Measurement>,
    sparse: Array2<f64>,
    dense: Option<Array2<f64>>,
    peak: Option<PeakEstimate>,
}

impl SpectrumMapEstimator {
    /// Builds an estimator, failing fast on invalid bounds or cell counts.
    ///
    /// An unsupported method token has already failed during configuration
    /// parsing; by the time a [`EstimatorConfig`] exists its method is one
    /// of the recognized strategies.
    pub fn new(config: EstimatorConfig) -> Result<Self> {
        let grid = GridSpec::new(
            config.x_min,
            config.x_max,
            config.y_min,
            config.y_max,
            config.cells_x,
            config.cells_y,
        )?;
        let sparse = field::nan_map(grid.shape());
        Ok(Self {
            grid,
            method: config.method,
            measurements: Vec::new(),
            sparse,
            dense: None,
            peak: None,
        })
    }

    /// Ingests one measurement.
    ///
    /// Appends to the raw log and overwrites the corresponding sparse cell
    /// (last write wins for duplicate positions). An off-grid position
    /// fails with [`SpectrumError::OutOfDomain`] and leaves every piece of
    /// state unchanged.
    pub fn add_measurement(&mut self, position: (f64, f64), rssi: f64) -> Result<()> {
        // Resolve both indices before mutating anything.
        let (ix, iy) = self.grid.cell_indices(position)?;
        self.measurements.push(Measurement { position, rssi });
        self.sparse[[ix, iy]] = rssi;
        tracing::debug!(
            x = position.0,
            y = position.1,
            rssi,
            ix,
            iy,
            total = self.measurements.len(),
            "measurement ingested"
        );
        Ok(())
    }

    /// Recomputes the dense field from the complete measurement log and
    /// re-extracts the peak.
    ///
    /// With fewer than [`MIN_SAMPLES`] measurements this is a repeatable
    /// no-op. A degenerate interpolation result retains the previous dense
    /// field and peak rather than overwriting them with undefined data.
    pub fn update_full_estimate(&mut self) -> UpdateStatus {
        if self.measurements.len() < MIN_SAMPLES {
            tracing::debug!(
                have = self.measurements.len(),
                need = MIN_SAMPLES,
                "skipping refresh, not enough measurements"
            );
            return UpdateStatus::InsufficientData;
        }

        let samples: Vec<SamplePoint> = self
            .measurements
            .iter()
            .map(|m| SamplePoint::new(m.position.0, m.position.1, m.rssi))
            .collect();

        match self.method.interpolate(&samples, &self.grid) {
            Some(dense) => {
                self.peak = field::peak_centroid(&dense).map(|index| PeakEstimate {
                    index,
                    position: self.grid.cell_position(index),
                });
                self.dense = Some(dense);
                tracing::debug!(
                    method = %self.method,
                    samples = samples.len(),
                    peak = ?self.peak.map(|p| p.position),
                    "dense field refreshed"
                );
                UpdateStatus::Updated
            }
            None => {
                tracing::warn!(
                    method = %self.method,
                    samples = samples.len(),
                    "degenerate interpolation result, keeping previous field"
                );
                UpdateStatus::Degenerate
            }
        }
    }

    /// The grid specification.
    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// The configured interpolation strategy.
    pub fn method(&self) -> InterpolationMethod {
        self.method
    }

    /// The raw measurement log in arrival order.
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// The sparse measured grid; unset cells are NaN.
    pub fn sparse_map(&self) -> &Array2<f64> {
        &self.sparse
    }

    /// The interpolated dense grid, `None` until the first successful
    /// refresh.
    pub fn full_map(&self) -> Option<&Array2<f64>> {
        self.dense.as_ref()
    }

    /// The current maximum-location estimate, `None` until the first
    /// successful refresh.
    pub fn peak(&self) -> Option<&PeakEstimate> {
        self.peak.as_ref()
    }
}
