//! Interpolation strategies for filling unmeasured grid cells.
//!
//! The method set is closed and dispatched through
//! [`InterpolationMethod`], selected once at estimator construction.
//! Every strategy shares one contract: given the full sample log and the
//! target grid, produce a dense field in the same `[ix, iy]` orientation as
//! the sparse map, or `None` when the result would be entirely undefined
//! (degenerate sample geometry or non-finite values). Callers keep the
//! previous dense field on `None`.
//!
//! A note on the `idw` token: the system this estimator descends from
//! advertised an inverse-distance-weighted mode but computed a plain
//! nearest-neighbor fill. The strategy here is named for what it computes,
//! and `"idw"` parses as an alias of [`InterpolationMethod::Nearest`] for
//! compatibility. Genuine distance-weighted averaging would be a new,
//! distinct variant.

mod kriging;
mod nearest;
mod rbf;
mod solver;

use crate::error::SpectrumError;
use crate::grid::GridSpec;
use ndarray::Array2;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// One raw measurement as fed to an interpolation strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    /// Real-world x coordinate
    pub x: f64,
    /// Real-world y coordinate
    pub y: f64,
    /// Measured RSSI value (dBm)
    pub value: f64,
}

impl SamplePoint {
    /// Creates a sample point.
    pub fn new(x: f64, y: f64, value: f64) -> Self {
        Self { x, y, value }
    }
}

/// The closed set of interpolation strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InterpolationMethod {
    /// Ordinary kriging with a spherical variogram
    Kriging,
    /// Nearest-neighbor fill (also parsed from the legacy `idw` token)
    Nearest,
    /// Radial-basis interpolant with a linear kernel
    Linear,
    /// Thin-plate-spline interpolant (cubic-flavored scattered spline)
    Spline,
}

impl InterpolationMethod {
    /// All recognized strategies, in token order.
    pub const ALL: [InterpolationMethod; 4] = [
        InterpolationMethod::Kriging,
        InterpolationMethod::Nearest,
        InterpolationMethod::Linear,
        InterpolationMethod::Spline,
    ];

    /// The canonical configuration token for this strategy.
    pub const fn token(&self) -> &'static str {
        match self {
            InterpolationMethod::Kriging => "kriging",
            InterpolationMethod::Nearest => "nearest",
            InterpolationMethod::Linear => "linear",
            InterpolationMethod::Spline => "spline",
        }
    }

    /// Runs the strategy over the full sample log.
    ///
    /// Duplicate positions are collapsed last-wins before solving, matching
    /// the sparse map's overwrite semantics and keeping the equation-based
    /// strategies away from trivially singular systems. Returns `None` when
    /// the strategy cannot produce any defined value.
    pub fn interpolate(
        &self,
        samples: &[SamplePoint],
        grid: &GridSpec,
    ) -> Option<Array2<f64>> {
        let samples = dedupe_last_wins(samples);
        if samples.is_empty() {
            return None;
        }
        let out = match self {
            InterpolationMethod::Kriging => kriging::fill(&samples, grid),
            InterpolationMethod::Nearest => nearest::fill(&samples, grid),
            InterpolationMethod::Linear => rbf::fill(&samples, grid, rbf::RbfKernel::Linear),
            InterpolationMethod::Spline => rbf::fill(&samples, grid, rbf::RbfKernel::ThinPlate),
        }?;
        if out.iter().all(|v| !v.is_finite()) {
            return None;
        }
        Some(out)
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for InterpolationMethod {
    type Err = SpectrumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kriging" => Ok(InterpolationMethod::Kriging),
            "nearest" | "idw" => Ok(InterpolationMethod::Nearest),
            "linear" => Ok(InterpolationMethod::Linear),
            "spline" => Ok(InterpolationMethod::Spline),
            other => Err(SpectrumError::unsupported_method(other)),
        }
    }
}

/// Collapses duplicate sample positions, keeping the latest value.
fn dedupe_last_wins(samples: &[SamplePoint]) -> Vec<SamplePoint> {
    let mut kept: Vec<SamplePoint> = Vec::with_capacity(samples.len());
    let mut slot: HashMap<(u64, u64), usize> = HashMap::with_capacity(samples.len());
    for sample in samples {
        let key = (sample.x.to_bits(), sample.y.to_bits());
        match slot.get(&key) {
            Some(&i) => kept[i].value = sample.value,
            None => {
                slot.insert(key, kept.len());
                kept.push(*sample);
            }
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid5() -> GridSpec {
        GridSpec::new(0.0, 4.0, 0.0, 4.0, 5, 5).unwrap()
    }

    #[test]
    fn test_token_parsing() {
        assert_eq!(
            "kriging".parse::<InterpolationMethod>().unwrap(),
            InterpolationMethod::Kriging
        );
        assert_eq!(
            "LINEAR".parse::<InterpolationMethod>().unwrap(),
            InterpolationMethod::Linear
        );
        assert_eq!(
            " spline ".parse::<InterpolationMethod>().unwrap(),
            InterpolationMethod::Spline
        );
    }

    #[test]
    fn test_idw_is_nearest_alias() {
        assert_eq!(
            "idw".parse::<InterpolationMethod>().unwrap(),
            InterpolationMethod::Nearest
        );
    }

    #[test]
    fn test_unknown_token_rejected() {
        let err = "bilinear".parse::<InterpolationMethod>().unwrap_err();
        assert!(matches!(err, SpectrumError::UnsupportedMethod { token } if token == "bilinear"));
    }

    #[test]
    fn test_token_round_trip() {
        for method in InterpolationMethod::ALL {
            assert_eq!(method.token().parse::<InterpolationMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_dedupe_keeps_latest_value() {
        let samples = [
            SamplePoint::new(1.0, 1.0, -70.0),
            SamplePoint::new(2.0, 2.0, -60.0),
            SamplePoint::new(1.0, 1.0, -40.0),
        ];
        let deduped = dedupe_last_wins(&samples);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0], SamplePoint::new(1.0, 1.0, -40.0));
        assert_eq!(deduped[1], SamplePoint::new(2.0, 2.0, -60.0));
    }

    #[test]
    fn test_all_methods_cover_grid() {
        let samples = [
            SamplePoint::new(0.0, 0.0, -80.0),
            SamplePoint::new(4.0, 0.0, -70.0),
            SamplePoint::new(0.0, 4.0, -60.0),
            SamplePoint::new(2.0, 3.0, -25.0),
        ];
        let grid = grid5();
        for method in InterpolationMethod::ALL {
            let out = method
                .interpolate(&samples, &grid)
                .unwrap_or_else(|| panic!("{method} returned degenerate"));
            assert_eq!(out.dim(), (5, 5));
            assert!(
                out.iter().all(|v| v.is_finite()),
                "{method} left undefined cells"
            );
        }
    }

    #[test]
    fn test_non_finite_values_degenerate() {
        let samples = [
            SamplePoint::new(0.0, 0.0, f64::NAN),
            SamplePoint::new(4.0, 0.0, f64::NAN),
            SamplePoint::new(0.0, 4.0, f64::NAN),
        ];
        let grid = grid5();
        for method in InterpolationMethod::ALL {
            assert!(method.interpolate(&samples, &grid).is_none(), "{method}");
        }
    }

    #[test]
    fn test_empty_samples_degenerate() {
        assert!(InterpolationMethod::Nearest
            .interpolate(&[], &grid5())
            .is_none());
    }
}
