//! Ordinary kriging with a spherical variogram.
//!
//! Variogram parameters are estimated from the sample set rather than fitted
//! iteratively: sill = sample variance, range = maximum pairwise distance,
//! zero nugget. The (n+1)×(n+1) kriging system is factored once and re-solved
//! per grid cell, so the per-refresh cost is one factorization plus one
//! triangular solve per cell.

use crate::grid::GridSpec;
use crate::interpolate::solver::lu_factor;
use crate::interpolate::SamplePoint;
use ndarray::Array2;

/// Spherical variogram: rises as `1.5·h/a − 0.5·(h/a)³` toward the sill,
/// flat beyond the range `a`.
fn spherical(h: f64, sill: f64, range: f64) -> f64 {
    if h >= range {
        sill
    } else {
        let t = h / range;
        sill * (1.5 * t - 0.5 * t * t * t)
    }
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

pub(crate) fn fill(samples: &[SamplePoint], grid: &GridSpec) -> Option<Array2<f64>> {
    let n = samples.len();
    if n == 0 {
        return None;
    }

    let mean = samples.iter().map(|s| s.value).sum::<f64>() / n as f64;
    let variance = samples
        .iter()
        .map(|s| (s.value - mean).powi(2))
        .sum::<f64>()
        / n as f64;
    let range = samples
        .iter()
        .enumerate()
        .flat_map(|(i, a)| {
            samples[(i + 1)..]
                .iter()
                .map(move |b| distance((a.x, a.y), (b.x, b.y)))
        })
        .fold(0.0_f64, f64::max);

    // A flat field or a single sample has no spatial structure to model;
    // the best unbiased estimate everywhere is the mean.
    if !(variance > f64::EPSILON) || !(range > 0.0) {
        if !mean.is_finite() {
            return None;
        }
        return Some(Array2::from_elem(grid.shape(), mean));
    }
    let sill = variance;

    // Ordinary kriging system: semivariances between samples, bordered by
    // the Lagrange row/column enforcing unit weight sum.
    let dim = n + 1;
    let mut a = Array2::zeros((dim, dim));
    for i in 0..n {
        for j in 0..n {
            let h = distance((samples[i].x, samples[i].y), (samples[j].x, samples[j].y));
            a[[i, j]] = spherical(h, sill, range);
        }
        a[[i, n]] = 1.0;
        a[[n, i]] = 1.0;
    }

    let lu = lu_factor(a)?;

    let (cells_x, cells_y) = grid.shape();
    let mut out = Array2::zeros((cells_x, cells_y));
    let mut rhs = vec![0.0; dim];
    for ix in 0..cells_x {
        for iy in 0..cells_y {
            let target = grid.cell_position((ix, iy));
            for (i, s) in samples.iter().enumerate() {
                rhs[i] = spherical(distance((s.x, s.y), target), sill, range);
            }
            rhs[n] = 1.0;
            let weights = lu.solve(&rhs);
            out[[ix, iy]] = samples
                .iter()
                .zip(&weights)
                .map(|(s, w)| w * s.value)
                .sum();
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid5() -> GridSpec {
        GridSpec::new(0.0, 4.0, 0.0, 4.0, 5, 5).unwrap()
    }

    #[test]
    fn test_spherical_variogram_shape() {
        assert_eq!(spherical(0.0, 2.0, 10.0), 0.0);
        assert_eq!(spherical(10.0, 2.0, 10.0), 2.0);
        assert_eq!(spherical(25.0, 2.0, 10.0), 2.0);
        let mid = spherical(5.0, 2.0, 10.0);
        assert!(mid > 0.0 && mid < 2.0);
    }

    #[test]
    fn test_exact_at_sample_positions() {
        let samples = [
            SamplePoint::new(0.0, 0.0, -80.0),
            SamplePoint::new(4.0, 0.0, -60.0),
            SamplePoint::new(2.0, 4.0, -30.0),
        ];
        let out = fill(&samples, &grid5()).unwrap();
        assert!((out[[0, 0]] - -80.0).abs() < 1e-6);
        assert!((out[[4, 0]] - -60.0).abs() < 1e-6);
        assert!((out[[2, 4]] - -30.0).abs() < 1e-6);
    }

    #[test]
    fn test_constant_field_yields_mean() {
        let samples = [
            SamplePoint::new(0.0, 0.0, -55.0),
            SamplePoint::new(4.0, 4.0, -55.0),
            SamplePoint::new(0.0, 4.0, -55.0),
        ];
        let out = fill(&samples, &grid5()).unwrap();
        assert!(out.iter().all(|&v| (v - -55.0).abs() < 1e-12));
    }

    #[test]
    fn test_single_sample_yields_uniform_field() {
        let samples = [SamplePoint::new(2.0, 2.0, -40.0)];
        let out = fill(&samples, &grid5()).unwrap();
        assert!(out.iter().all(|&v| v == -40.0));
    }

    #[test]
    fn test_estimates_stay_within_sample_hull() {
        // Kriging weights sum to one, so estimates cannot stray far outside
        // the sample value range on a smooth field.
        let samples = [
            SamplePoint::new(0.0, 0.0, -80.0),
            SamplePoint::new(4.0, 0.0, -70.0),
            SamplePoint::new(0.0, 4.0, -60.0),
            SamplePoint::new(4.0, 4.0, -50.0),
        ];
        let out = fill(&samples, &grid5()).unwrap();
        for &v in out.iter() {
            assert!(v.is_finite());
            assert!(v > -120.0 && v < -10.0);
        }
    }
}
