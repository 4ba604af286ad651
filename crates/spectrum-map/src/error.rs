//! Error types for spectrum map estimation.
//!
//! All failures raised by this crate funnel through [`SpectrumError`], built
//! with [`thiserror`] for automatic `Display` and `Error` implementations.
//!
//! Two conditions the estimator encounters are deliberately *not* errors:
//! fewer than three measurements at refresh time, and a degenerate
//! interpolation result. Both degrade gracefully by leaving prior state
//! intact and are reported through
//! [`UpdateStatus`](crate::estimator::UpdateStatus) instead.

use crate::grid::Axis;
use thiserror::Error;

/// A specialized `Result` type for spectrum map operations.
pub type Result<T> = std::result::Result<T, SpectrumError>;

/// Errors raised by the spectrum map estimator.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SpectrumError {
    /// A measurement position component does not match any sampled grid
    /// coordinate. Positions are matched exactly; there is no snapping.
    #[error("position component {value} is not a sampled {axis}-axis coordinate")]
    OutOfDomain {
        /// The axis on which the lookup failed
        axis: Axis,
        /// The offending coordinate value
        value: f64,
    },

    /// An interpolation method token outside the recognized set.
    #[error("unsupported interpolation method '{token}' (expected kriging, idw, nearest, spline or linear)")]
    UnsupportedMethod {
        /// The unrecognized token
        token: String,
    },

    /// Invalid grid or estimator configuration.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error
        message: String,
    },
}

impl SpectrumError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates a new unsupported-method error.
    #[must_use]
    pub fn unsupported_method(token: impl Into<String>) -> Self {
        Self::UnsupportedMethod {
            token: token.into(),
        }
    }

    /// Returns `true` if the caller can recover by correcting its input.
    ///
    /// Out-of-domain positions are recoverable (supply an on-grid position);
    /// configuration errors are not, since they abort construction.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::OutOfDomain { .. } => true,
            Self::UnsupportedMethod { .. } | Self::InvalidConfig { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_domain_display() {
        let err = SpectrumError::OutOfDomain {
            axis: Axis::X,
            value: 0.37,
        };
        let msg = err.to_string();
        assert!(msg.contains("0.37"));
        assert!(msg.contains("x-axis"));
    }

    #[test]
    fn test_unsupported_method_display() {
        let err = SpectrumError::unsupported_method("bicubic");
        assert!(err.to_string().contains("bicubic"));
    }

    #[test]
    fn test_recoverability() {
        assert!(SpectrumError::OutOfDomain {
            axis: Axis::Y,
            value: 1.0
        }
        .is_recoverable());
        assert!(!SpectrumError::invalid_config("cells_x must be positive").is_recoverable());
    }
}
