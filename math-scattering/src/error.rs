//! Error types for the scattering series.
//!
//! The evaluator itself has a single domain error: a truncation order that
//! asks for more reflections than are coded. The remaining variants cover
//! construction of media, scenarios and the reference run.

use crate::series::Family;
use thiserror::Error;

/// Errors raised while building or evaluating a scattering problem.
#[derive(Debug, Error)]
pub enum ScatteringError {
    /// The truncation order requests a term beyond the coded maximum.
    #[error(
        "truncation order {requested} not implemented for {family} waves (maximum {max} reflections)"
    )]
    TruncationOrder {
        /// Reflected or transmitted family
        family: Family,
        /// Order asked for
        requested: usize,
        /// Highest reflection count coded for this family
        max: usize,
    },

    /// Material parameters are unphysical.
    #[error("invalid medium: {0}")]
    InvalidMedium(String),

    /// Pulse width must be positive and finite.
    #[error("invalid pulse width: {width} (must be > 0)")]
    InvalidPulseWidth {
        /// The width given
        width: f64,
    },

    /// Scenario configuration is inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// The reference finite-volume run failed.
    #[error("reference solver error: {0}")]
    Reference(#[from] fvm::FvmError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for scattering operations.
pub type Result<T> = std::result::Result<T, ScatteringError>;

impl ScatteringError {
    /// Returns `true` if a truncation order beyond the coded maximum was requested.
    pub fn is_truncation_error(&self) -> bool {
        matches!(self, ScatteringError::TruncationOrder { .. })
    }

    /// Returns `true` for invalid medium, pulse or scenario parameters.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ScatteringError::InvalidMedium(_)
                | ScatteringError::InvalidPulseWidth { .. }
                | ScatteringError::Config(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncation_display() {
        let err = ScatteringError::TruncationOrder {
            family: Family::Reflected,
            requested: 6,
            max: 3,
        };
        assert_eq!(
            err.to_string(),
            "truncation order 6 not implemented for reflected waves (maximum 3 reflections)"
        );
        assert!(err.is_truncation_error());
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_config_category() {
        let err = ScatteringError::InvalidPulseWidth { width: -1.0 };
        assert!(err.is_config_error());
        assert!(err.to_string().contains("-1"));
    }
}
