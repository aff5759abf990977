//! Error types for the finite-volume solver.
//!
//! Grid, material and run-time errors are reported as structured variants so
//! that drivers can tell a bad configuration apart from a diverging run.

use thiserror::Error;

/// Errors that can occur while setting up or running a finite-volume solve.
#[derive(Debug, Error)]
pub enum FvmError {
    /// Grid bounds are reversed or the cell count is zero.
    #[error("invalid grid: [{x_lower}, {x_upper}] with {cells} cells")]
    InvalidGrid {
        /// Lower domain bound
        x_lower: f64,
        /// Upper domain bound
        x_upper: f64,
        /// Number of cells requested
        cells: usize,
    },

    /// CFL number is outside (0, 1].
    #[error("invalid CFL number: {cfl} (must be in (0, 1])")]
    InvalidCfl {
        /// The invalid CFL number
        cfl: f64,
    },

    /// A material coefficient is non-positive or non-finite.
    #[error("invalid material in cell {index}: {reason}")]
    InvalidMaterial {
        /// Cell index
        index: usize,
        /// What is wrong with the coefficient
        reason: String,
    },

    /// An array does not match the number of grid cells.
    #[error("length mismatch: expected {expected} values, got {got}")]
    LengthMismatch {
        /// Number of grid cells
        expected: usize,
        /// Length of the array provided
        got: usize,
    },

    /// Requested output times are not non-decreasing or lie in the past.
    #[error("output time {time} precedes current solver time {current}")]
    TimeOrder {
        /// The offending output time
        time: f64,
        /// Solver time when it was requested
        current: f64,
    },

    /// The solution blew up.
    #[error("non-finite state at t = {time} after {steps} steps")]
    NonFiniteState {
        /// Solver time
        time: f64,
        /// Steps taken so far
        steps: usize,
    },
}

/// A specialized `Result` type for finite-volume operations.
pub type Result<T> = std::result::Result<T, FvmError>;

impl FvmError {
    /// Returns `true` if this error comes from setup rather than from a run.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            FvmError::InvalidGrid { .. }
                | FvmError::InvalidCfl { .. }
                | FvmError::InvalidMaterial { .. }
                | FvmError::LengthMismatch { .. }
        )
    }

    /// Returns `true` if the solver diverged.
    pub fn is_divergence(&self) -> bool {
        matches!(self, FvmError::NonFiniteState { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FvmError::InvalidCfl { cfl: 1.5 };
        assert_eq!(err.to_string(), "invalid CFL number: 1.5 (must be in (0, 1])");
    }

    #[test]
    fn test_categories() {
        let cfg = FvmError::LengthMismatch {
            expected: 10,
            got: 9,
        };
        let run = FvmError::NonFiniteState {
            time: 0.5,
            steps: 12,
        };
        assert!(cfg.is_config_error());
        assert!(!cfg.is_divergence());
        assert!(run.is_divergence());
        assert!(!run.is_config_error());
    }
}
