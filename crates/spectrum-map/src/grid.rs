//! Discretized measurement grid and coordinate-to-cell mapping.
//!
//! Each axis of the survey area is discretized into a fixed number of evenly
//! spaced sample coordinates, inclusive of both bounds. The mapping between a
//! real-world coordinate and its cell index is bijective and exact: a
//! position is either one of the generated coordinates or it is rejected with
//! [`SpectrumError::OutOfDomain`]. There is no tolerance or snapping —
//! off-grid positions are a caller contract violation.

use crate::error::{Result, SpectrumError};
use std::collections::HashMap;
use std::fmt;

/// Identifies one of the two grid axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// The first (row) axis
    X,
    /// The second (column) axis
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Normalize a coordinate for exact-membership lookup.
///
/// Adding positive zero collapses `-0.0` into `0.0` so the two zero bit
/// patterns resolve to the same cell. NaN never matches any key.
fn lookup_bits(value: f64) -> u64 {
    (value + 0.0).to_bits()
}

/// One discretized axis: `cells` evenly spaced coordinates over
/// `[min, max]` and the inverse coordinate-to-index table.
#[derive(Debug, Clone)]
pub struct AxisScale {
    axis: Axis,
    min: f64,
    max: f64,
    coords: Vec<f64>,
    index_of: HashMap<u64, usize>,
}

impl AxisScale {
    /// Builds the scale for one axis.
    ///
    /// Requires finite bounds with `min < max` and a positive cell count.
    pub fn new(axis: Axis, min: f64, max: f64, cells: usize) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(SpectrumError::invalid_config(format!(
                "{axis}-axis bounds must be finite, got [{min}, {max}]"
            )));
        }
        if min >= max {
            return Err(SpectrumError::invalid_config(format!(
                "{axis}-axis requires min < max, got [{min}, {max}]"
            )));
        }
        if cells == 0 {
            return Err(SpectrumError::invalid_config(format!(
                "{axis}-axis cell count must be positive"
            )));
        }

        let mut coords = Vec::with_capacity(cells);
        if cells == 1 {
            coords.push(min);
        } else {
            let step = (max - min) / (cells - 1) as f64;
            for i in 0..cells {
                coords.push(min + i as f64 * step);
            }
            // Both endpoints are part of the contract; do not let the last
            // coordinate drift from `max` by accumulated rounding.
            coords[cells - 1] = max;
        }

        let mut index_of = HashMap::with_capacity(cells);
        for (index, &coord) in coords.iter().enumerate() {
            index_of.insert(lookup_bits(coord), index);
        }

        Ok(Self {
            axis,
            min,
            max,
            coords,
            index_of,
        })
    }

    /// Number of cells on this axis.
    pub fn cells(&self) -> usize {
        self.coords.len()
    }

    /// Lower bound of the axis.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound of the axis.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// The generated sample coordinates, in index order.
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    /// Resolves a real-world coordinate to its cell index.
    ///
    /// Fails with [`SpectrumError::OutOfDomain`] unless `value` is exactly
    /// one of the generated coordinates.
    pub fn index_for(&self, value: f64) -> Result<usize> {
        self.index_of
            .get(&lookup_bits(value))
            .copied()
            .ok_or(SpectrumError::OutOfDomain {
                axis: self.axis,
                value,
            })
    }

    /// The real-world coordinate at a cell index (inverse of [`index_for`]).
    ///
    /// # Panics
    ///
    /// Panics if `index >= cells()`; indices are produced by this crate and
    /// are valid by construction.
    ///
    /// [`index_for`]: AxisScale::index_for
    pub fn coordinate_for(&self, index: usize) -> f64 {
        self.coords[index]
    }
}

/// The full two-axis grid specification. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct GridSpec {
    x: AxisScale,
    y: AxisScale,
}

impl GridSpec {
    /// Builds a grid covering `[x_min, x_max] × [y_min, y_max]` with
    /// `cells_x × cells_y` sample points.
    pub fn new(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        cells_x: usize,
        cells_y: usize,
    ) -> Result<Self> {
        Ok(Self {
            x: AxisScale::new(Axis::X, x_min, x_max, cells_x)?,
            y: AxisScale::new(Axis::Y, y_min, y_max, cells_y)?,
        })
    }

    /// The scale of one axis.
    pub fn axis(&self, axis: Axis) -> &AxisScale {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    /// Grid shape as `(cells_x, cells_y)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.x.cells(), self.y.cells())
    }

    /// Resolves one coordinate on one axis to its cell index.
    pub fn index_for(&self, axis: Axis, value: f64) -> Result<usize> {
        self.axis(axis).index_for(value)
    }

    /// The real-world coordinate at `index` on `axis`.
    pub fn coordinate_for(&self, axis: Axis, index: usize) -> f64 {
        self.axis(axis).coordinate_for(index)
    }

    /// Resolves a full position to its `(ix, iy)` cell indices without
    /// mutating anything, so callers can reject off-grid positions before
    /// touching state.
    pub fn cell_indices(&self, position: (f64, f64)) -> Result<(usize, usize)> {
        let ix = self.x.index_for(position.0)?;
        let iy = self.y.index_for(position.1)?;
        Ok((ix, iy))
    }

    /// The real-world position at the center of cell `(ix, iy)`.
    pub fn cell_position(&self, index: (usize, usize)) -> (f64, f64) {
        (
            self.x.coordinate_for(index.0),
            self.y.coordinate_for(index.1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_grid() -> GridSpec {
        GridSpec::new(0.0, 4.0, 0.0, 4.0, 5, 5).unwrap()
    }

    #[test]
    fn test_coordinate_bijection() {
        let grid = GridSpec::new(-50.0, 50.0, -50.0, 50.0, 25, 25).unwrap();
        for axis in [Axis::X, Axis::Y] {
            for index in 0..grid.axis(axis).cells() {
                let coord = grid.coordinate_for(axis, index);
                assert_eq!(grid.index_for(axis, coord).unwrap(), index);
            }
        }
    }

    #[test]
    fn test_endpoints_are_exact() {
        let grid = GridSpec::new(-50.0, 50.0, -7.3, 11.9, 25, 13).unwrap();
        assert_eq!(grid.coordinate_for(Axis::X, 0), -50.0);
        assert_eq!(grid.coordinate_for(Axis::X, 24), 50.0);
        assert_eq!(grid.coordinate_for(Axis::Y, 0), -7.3);
        assert_eq!(grid.coordinate_for(Axis::Y, 12), 11.9);
    }

    #[test]
    fn test_off_grid_value_rejected() {
        let grid = unit_grid();
        let err = grid.index_for(Axis::X, 0.37).unwrap_err();
        assert!(matches!(
            err,
            SpectrumError::OutOfDomain {
                axis: Axis::X,
                ..
            }
        ));
        // No snapping, even when very close to a sampled coordinate.
        assert!(grid.index_for(Axis::Y, 2.0 + 1e-12).is_err());
        assert!(grid.index_for(Axis::X, f64::NAN).is_err());
    }

    #[test]
    fn test_negative_zero_matches_zero_cell() {
        let grid = unit_grid();
        assert_eq!(grid.index_for(Axis::X, -0.0).unwrap(), 0);
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        assert!(GridSpec::new(4.0, 0.0, 0.0, 4.0, 5, 5).is_err());
        assert!(GridSpec::new(0.0, 0.0, 0.0, 4.0, 5, 5).is_err());
        assert!(GridSpec::new(0.0, 4.0, 0.0, f64::INFINITY, 5, 5).is_err());
        assert!(GridSpec::new(0.0, 4.0, 0.0, 4.0, 0, 5).is_err());
    }

    #[test]
    fn test_single_cell_axis() {
        let grid = GridSpec::new(0.0, 4.0, -1.0, 1.0, 1, 3).unwrap();
        assert_eq!(grid.shape(), (1, 3));
        assert_eq!(grid.coordinate_for(Axis::X, 0), 0.0);
        assert_eq!(grid.index_for(Axis::X, 0.0).unwrap(), 0);
        assert!(grid.index_for(Axis::X, 4.0).is_err());
    }

    #[test]
    fn test_cell_indices_round_trip() {
        let grid = unit_grid();
        let (ix, iy) = grid.cell_indices((3.0, 1.0)).unwrap();
        assert_eq!((ix, iy), (3, 1));
        assert_eq!(grid.cell_position((ix, iy)), (3.0, 1.0));
    }
}
