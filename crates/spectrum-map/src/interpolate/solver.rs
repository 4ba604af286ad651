//! Dense linear-system solver shared by the equation-based interpolators.
//!
//! Radial-basis interpolation factors its system once and solves a single
//! right-hand side; ordinary kriging reuses one factorization across every
//! grid cell. The systems involved are small (sample count plus a handful of
//! drift terms), so a hand-rolled LU with partial pivoting is plenty.

use ndarray::Array2;

/// Pivot magnitudes below this are treated as a singular system.
const SINGULAR_EPS: f64 = 1e-12;

/// LU factorization (Doolittle, partial pivoting) of a square matrix.
#[derive(Debug, Clone)]
pub(crate) struct LuFactors {
    lu: Array2<f64>,
    perm: Vec<usize>,
}

/// Factorizes `a` in place. Returns `None` for singular or non-finite
/// systems, which callers surface as a degenerate interpolation.
pub(crate) fn lu_factor(mut a: Array2<f64>) -> Option<LuFactors> {
    let n = a.nrows();
    if n == 0 || a.ncols() != n {
        return None;
    }
    let mut perm: Vec<usize> = (0..n).collect();

    for k in 0..n {
        // Partial pivot: largest magnitude in column k at or below the diagonal.
        let mut pivot_row = k;
        let mut pivot_mag = a[[k, k]].abs();
        for i in (k + 1)..n {
            let mag = a[[i, k]].abs();
            if mag > pivot_mag {
                pivot_mag = mag;
                pivot_row = i;
            }
        }
        if !pivot_mag.is_finite() || pivot_mag < SINGULAR_EPS {
            return None;
        }
        if pivot_row != k {
            for j in 0..n {
                let tmp = a[[k, j]];
                a[[k, j]] = a[[pivot_row, j]];
                a[[pivot_row, j]] = tmp;
            }
            perm.swap(k, pivot_row);
        }

        for i in (k + 1)..n {
            let factor = a[[i, k]] / a[[k, k]];
            a[[i, k]] = factor;
            for j in (k + 1)..n {
                a[[i, j]] -= factor * a[[k, j]];
            }
        }
    }

    Some(LuFactors { lu: a, perm })
}

impl LuFactors {
    /// Dimension of the factored system.
    pub(crate) fn dim(&self) -> usize {
        self.lu.nrows()
    }

    /// Solves `A x = b` for one right-hand side.
    pub(crate) fn solve(&self, b: &[f64]) -> Vec<f64> {
        let n = self.dim();
        debug_assert_eq!(b.len(), n);

        // Forward substitution on the permuted right-hand side.
        let mut y = vec![0.0; n];
        for i in 0..n {
            let mut sum = b[self.perm[i]];
            for j in 0..i {
                sum -= self.lu[[i, j]] * y[j];
            }
            y[i] = sum;
        }

        // Back substitution.
        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let mut sum = y[i];
            for j in (i + 1)..n {
                sum -= self.lu[[i, j]] * x[j];
            }
            x[i] = sum / self.lu[[i, i]];
        }
        x
    }
}
