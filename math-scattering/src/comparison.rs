//! Error norms between the series and the reference solution

use crate::error::{Result, ScatteringError};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Discrete error norms of an approximation against a reference profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveComparison {
    /// `||a - r||_2`
    pub l2_error: f64,
    /// `||a - r||_2 / ||r||_2` (absolute when `r` vanishes)
    pub relative_l2_error: f64,
    /// `max |a - r|`
    pub linf_error: f64,
    /// `max |a - r| / |r|` over points with `|r| > threshold`
    pub max_relative_error: f64,
    /// Points entering `max_relative_error`
    pub points_compared: usize,
}

impl WaveComparison {
    /// Compare two profiles sampled on the same positions
    pub fn new(
        approximation: &Array1<f64>,
        reference: &Array1<f64>,
        threshold: f64,
    ) -> Result<Self> {
        if approximation.len() != reference.len() {
            return Err(ScatteringError::Config(format!(
                "cannot compare profiles of length {} and {}",
                approximation.len(),
                reference.len()
            )));
        }

        let diff = approximation - reference;
        let l2_error = diff.mapv(|d| d * d).sum().sqrt();
        let norm = reference.mapv(|r| r * r).sum().sqrt();
        let relative_l2_error = if norm < 1e-15 { l2_error } else { l2_error / norm };
        let linf_error = diff.iter().fold(0.0, |m: f64, d| m.max(d.abs()));

        let mut max_relative_error = 0.0f64;
        let mut points_compared = 0;
        for (d, r) in diff.iter().zip(reference.iter()) {
            if r.abs() > threshold {
                max_relative_error = max_relative_error.max(d.abs() / r.abs());
                points_compared += 1;
            }
        }

        Ok(Self {
            l2_error,
            relative_l2_error,
            linf_error,
            max_relative_error,
            points_compared,
        })
    }

    /// True when every thresholded point is within `tol` relative error
    pub fn within(&self, tol: f64) -> bool {
        self.points_compared > 0 && self.max_relative_error <= tol
    }
}
