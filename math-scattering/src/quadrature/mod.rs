//! Adaptive numerical quadrature
//!
//! Globally adaptive Gauss-Kronrod integration in 1D, plus iterated 2D and
//! 3D integration over regions whose inner limits depend on the outer
//! variables.

mod kronrod;
mod nested;

pub use kronrod::*;
pub use nested::*;

use serde::{Deserialize, Serialize};

/// Tolerances and limits for adaptive integration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadratureConfig {
    /// Absolute error tolerance
    #[serde(default = "default_tolerance")]
    pub abs_tol: f64,
    /// Relative error tolerance
    #[serde(default = "default_tolerance")]
    pub rel_tol: f64,
    /// Maximum number of bisections per 1D integral
    #[serde(default = "default_max_subdivisions")]
    pub max_subdivisions: usize,
}

fn default_tolerance() -> f64 {
    1e-3
}

fn default_max_subdivisions() -> usize {
    50
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        Self {
            abs_tol: default_tolerance(),
            rel_tol: default_tolerance(),
            max_subdivisions: default_max_subdivisions(),
        }
    }
}

impl QuadratureConfig {
    /// Same tolerance for absolute and relative error
    pub fn with_tolerance(tol: f64) -> Self {
        Self {
            abs_tol: tol,
            rel_tol: tol,
            ..Default::default()
        }
    }

    /// Error target for an integral of magnitude `value`
    #[inline]
    pub fn target(&self, value: f64) -> f64 {
        self.abs_tol.max(self.rel_tol * value.abs())
    }
}

/// Result of an adaptive integration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuadratureResult {
    /// Integral estimate
    pub value: f64,
    /// Estimated absolute error
    pub error: f64,
    /// Number of integrand evaluations (innermost level for nested rules)
    pub evaluations: usize,
    /// Whether the tolerance was met within the subdivision limit
    pub converged: bool,
}

impl QuadratureResult {
    /// Result for an empty interval
    pub fn zero() -> Self {
        Self {
            value: 0.0,
            error: 0.0,
            evaluations: 0,
            converged: true,
        }
    }
}
