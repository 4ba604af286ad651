//! Field helpers: NaN-sentinel grids and peak extraction.
//!
//! The sparse spectrum map uses NaN as its "unset" sentinel, so every
//! reduction here is NaN-aware. Peak extraction returns the rounded centroid
//! of *all* cells attaining the maximum rather than an arbitrary one, which
//! keeps the estimated emitter location stable when a plateau forms.

use ndarray::Array2;

/// Allocates a grid with every cell unset.
pub(crate) fn nan_map(shape: (usize, usize)) -> Array2<f64> {
    Array2::from_elem(shape, f64::NAN)
}

/// Maximum over the finite cells, `None` if no cell is finite.
pub(crate) fn max_finite(map: &Array2<f64>) -> Option<f64> {
    map.iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            Some(m) if m >= v => Some(m),
            _ => Some(v),
        })
}

/// Index centroid of the cells holding the field maximum.
///
/// Collects every cell whose value equals the finite maximum and averages
/// their row and column indices, rounding each to the nearest integer.
/// Returns `None` for an entirely non-finite field.
pub(crate) fn peak_centroid(map: &Array2<f64>) -> Option<(usize, usize)> {
    let max = max_finite(map)?;
    let mut sum_ix = 0.0;
    let mut sum_iy = 0.0;
    let mut count = 0.0;
    for ((ix, iy), &value) in map.indexed_iter() {
        if value == max {
            sum_ix += ix as f64;
            sum_iy += iy as f64;
            count += 1.0;
        }
    }
    debug_assert!(count >= 1.0);
    Some((
        (sum_ix / count).round() as usize,
        (sum_iy / count).round() as usize,
    ))
}
