//! Radial-basis-function scattered interpolation.
//!
//! Backs the `linear` and `spline` strategies. The interpolant is
//!
//! ```text
//! f(p) = Σ_i w_i · φ(|p − p_i|) + drift(p)
//! ```
//!
//! with a low-order polynomial drift term that pins down the kernel's
//! conditionally-positive-definite null space. The affine drift (1, x, y)
//! is singular when all samples are collinear, so fitting falls back to a
//! constant drift before giving up; a survey that walks the area along one
//! line still gets a usable field that way.

use crate::grid::GridSpec;
use crate::interpolate::solver::lu_factor;
use crate::interpolate::SamplePoint;
use ndarray::Array2;

/// Kernel selection for the two RBF-backed strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RbfKernel {
    /// φ(r) = r. Piecewise-conic interpolant, the `linear` strategy.
    Linear,
    /// φ(r) = r² ln r. Thin-plate spline, the cubic-flavored `spline`
    /// strategy for scattered data.
    ThinPlate,
}

impl RbfKernel {
    fn eval(self, r: f64) -> f64 {
        match self {
            RbfKernel::Linear => r,
            RbfKernel::ThinPlate => {
                if r > 0.0 {
                    r * r * r.ln()
                } else {
                    0.0
                }
            }
        }
    }
}

/// Polynomial drift order, tried from richest to poorest.
#[derive(Debug, Clone, Copy)]
enum Drift {
    Affine,
    Constant,
}

impl Drift {
    fn terms(self) -> usize {
        match self {
            Drift::Affine => 3,
            Drift::Constant => 1,
        }
    }

    fn basis(self, x: f64, y: f64, out: &mut [f64]) {
        out[0] = 1.0;
        if let Drift::Affine = self {
            out[1] = x;
            out[2] = y;
        }
    }
}

struct RbfFit {
    weights: Vec<f64>,
    drift: Drift,
}

fn fit(samples: &[SamplePoint], kernel: RbfKernel, drift: Drift) -> Option<RbfFit> {
    let n = samples.len();
    let m = drift.terms();
    let dim = n + m;

    let mut a = Array2::zeros((dim, dim));
    for (i, si) in samples.iter().enumerate() {
        for (j, sj) in samples.iter().enumerate() {
            let r = ((si.x - sj.x).powi(2) + (si.y - sj.y).powi(2)).sqrt();
            a[[i, j]] = kernel.eval(r);
        }
        let mut poly = [0.0; 3];
        drift.basis(si.x, si.y, &mut poly[..m]);
        for k in 0..m {
            a[[i, n + k]] = poly[k];
            a[[n + k, i]] = poly[k];
        }
    }

    let mut rhs = vec![0.0; dim];
    for (i, s) in samples.iter().enumerate() {
        rhs[i] = s.value;
    }

    let lu = lu_factor(a)?;
    let weights = lu.solve(&rhs);
    if weights.iter().any(|w| !w.is_finite()) {
        return None;
    }
    Some(RbfFit { weights, drift })
}

fn evaluate(samples: &[SamplePoint], fit: &RbfFit, kernel: RbfKernel, grid: &GridSpec) -> Array2<f64> {
    let n = samples.len();
    let m = fit.drift.terms();
    let (cells_x, cells_y) = grid.shape();
    let mut out = Array2::zeros((cells_x, cells_y));

    for ix in 0..cells_x {
        for iy in 0..cells_y {
            let (x, y) = grid.cell_position((ix, iy));
            let mut value = 0.0;
            for (i, s) in samples.iter().enumerate() {
                let r = ((s.x - x).powi(2) + (s.y - y).powi(2)).sqrt();
                value += fit.weights[i] * kernel.eval(r);
            }
            let mut poly = [0.0; 3];
            fit.drift.basis(x, y, &mut poly[..m]);
            for k in 0..m {
                value += fit.weights[n + k] * poly[k];
            }
            out[[ix, iy]] = value;
        }
    }
    out
}

/// True when the sample positions span the plane, i.e. some triple forms a
/// triangle of non-negligible area. Collinear sets make the affine drift
/// block rank-deficient.
fn spans_plane(samples: &[SamplePoint]) -> bool {
    if samples.len() < 3 {
        return false;
    }
    let origin = samples[0];
    let scale = samples
        .iter()
        .map(|s| (s.x - origin.x).abs().max((s.y - origin.y).abs()))
        .fold(0.0_f64, f64::max)
        .max(1.0);
    let threshold = 1e-9 * scale * scale;
    for i in 1..samples.len() {
        for j in (i + 1)..samples.len() {
            let ax = samples[i].x - origin.x;
            let ay = samples[i].y - origin.y;
            let bx = samples[j].x - origin.x;
            let by = samples[j].y - origin.y;
            if (ax * by - ay * bx).abs() > threshold {
                return true;
            }
        }
    }
    false
}

/// Interpolates the samples onto the grid, or `None` if every drift order
/// yields a singular system.
pub(crate) fn fill(
    samples: &[SamplePoint],
    grid: &GridSpec,
    kernel: RbfKernel,
) -> Option<Array2<f64>> {
    if samples.is_empty() {
        return None;
    }
    let drifts: &[Drift] = if spans_plane(samples) {
        &[Drift::Affine, Drift::Constant]
    } else {
        &[Drift::Constant]
    };
    for &drift in drifts {
        if let Some(rbf) = fit(samples, kernel, drift) {
            return Some(evaluate(samples, &rbf, kernel, grid));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid5() -> GridSpec {
        GridSpec::new(0.0, 4.0, 0.0, 4.0, 5, 5).unwrap()
    }

    fn scattered_samples() -> Vec<SamplePoint> {
        vec![
            SamplePoint::new(0.0, 0.0, -80.0),
            SamplePoint::new(4.0, 0.0, -70.0),
            SamplePoint::new(0.0, 4.0, -65.0),
            SamplePoint::new(3.0, 3.0, -20.0),
        ]
    }

    #[test]
    fn test_linear_interpolates_sample_values() {
        let samples = scattered_samples();
        let out = fill(&samples, &grid5(), RbfKernel::Linear).unwrap();
        for s in &samples {
            let ix = s.x as usize;
            let iy = s.y as usize;
            assert!(
                (out[[ix, iy]] - s.value).abs() < 1e-6,
                "cell ({ix},{iy}) = {}, sample = {}",
                out[[ix, iy]],
                s.value
            );
        }
    }

    #[test]
    fn test_thin_plate_interpolates_sample_values() {
        let samples = scattered_samples();
        let out = fill(&samples, &grid5(), RbfKernel::ThinPlate).unwrap();
        for s in &samples {
            let ix = s.x as usize;
            let iy = s.y as usize;
            assert!((out[[ix, iy]] - s.value).abs() < 1e-6);
        }
    }

    #[test]
    fn test_collinear_samples_use_constant_drift() {
        // All samples on the main diagonal: the affine drift block is
        // rank-deficient, but the constant-drift fallback must succeed.
        let samples = vec![
            SamplePoint::new(0.0, 0.0, -80.0),
            SamplePoint::new(4.0, 4.0, -80.0),
            SamplePoint::new(2.0, 2.0, -10.0),
        ];
        let out = fill(&samples, &grid5(), RbfKernel::Linear).unwrap();
        assert!(out.iter().all(|v| v.is_finite()));
        assert!((out[[2, 2]] - -10.0).abs() < 1e-6);
        assert!((out[[0, 0]] - -80.0).abs() < 1e-6);
    }

    #[test]
    fn test_output_fully_finite() {
        let out = fill(&scattered_samples(), &grid5(), RbfKernel::ThinPlate).unwrap();
        assert!(out.iter().all(|v| v.is_finite()));
    }
}
