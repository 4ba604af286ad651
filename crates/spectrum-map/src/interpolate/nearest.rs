//! Nearest-neighbor fill.
//!
//! Every grid cell takes the value of the closest sample in real-world
//! coordinates. Ties keep the earliest sample in log order.

use crate::grid::GridSpec;
use crate::interpolate::SamplePoint;
use ndarray::Array2;

pub(crate) fn fill(samples: &[SamplePoint], grid: &GridSpec) -> Option<Array2<f64>> {
    if samples.is_empty() {
        return None;
    }

    let (cells_x, cells_y) = grid.shape();
    let mut out = Array2::zeros((cells_x, cells_y));
    for ix in 0..cells_x {
        for iy in 0..cells_y {
            let (x, y) = grid.cell_position((ix, iy));
            let mut best = samples[0];
            let mut best_dist = f64::INFINITY;
            for sample in samples {
                let dist = (sample.x - x).powi(2) + (sample.y - y).powi(2);
                if dist < best_dist {
                    best_dist = dist;
                    best = *sample;
                }
            }
            out[[ix, iy]] = best.value;
        }
    }
    Some(out)
}
