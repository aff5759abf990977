//! JSON configuration for scattering scenarios

use crate::error::{Result, ScatteringError};
use crate::medium::Medium;
use crate::quadrature::QuadratureConfig;
use crate::reference::ReferenceConfig;
use crate::series::{Family, Scatterer};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete scenario loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Material profile
    #[serde(default)]
    pub medium: Medium,
    /// Spatial width of the incident square pulse
    #[serde(default = "default_pulse_width")]
    pub pulse_width: f64,
    /// Output times
    #[serde(default)]
    pub times: TimeConfig,
    /// Truncation orders to evaluate
    #[serde(default = "default_orders")]
    pub orders: Vec<usize>,
    /// Quadrature tolerances
    #[serde(default)]
    pub quadrature: QuadratureConfig,
    /// Sample positions
    #[serde(default)]
    pub samples: SampleGrid,
    /// Finite-volume reference (`null` skips it)
    #[serde(default = "default_reference")]
    pub reference: Option<ReferenceConfig>,
    /// Reference magnitude below which points are left out of relative errors
    #[serde(default = "default_threshold")]
    pub comparison_threshold: f64,
}

fn default_pulse_width() -> f64 {
    100.0
}

fn default_orders() -> Vec<usize> {
    vec![0, 2, 4]
}

fn default_reference() -> Option<ReferenceConfig> {
    Some(ReferenceConfig::default())
}

fn default_threshold() -> f64 {
    0.05
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            medium: Medium::default(),
            pulse_width: default_pulse_width(),
            times: TimeConfig::default(),
            orders: default_orders(),
            quadrature: QuadratureConfig::default(),
            samples: SampleGrid::default(),
            reference: default_reference(),
            comparison_threshold: default_threshold(),
        }
    }
}

/// How output time values are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeScale {
    /// Values are times
    Absolute,
    /// Values are multiples of the transit time `t_r`
    #[default]
    Transit,
}

/// Output times configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeConfig {
    /// Time values in units of `scale`
    #[serde(default = "default_time_values")]
    pub values: Vec<f64>,
    /// Unit of `values`
    #[serde(default)]
    pub scale: TimeScale,
}

fn default_time_values() -> Vec<f64> {
    vec![1.0, 2.0, 3.0]
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            values: default_time_values(),
            scale: TimeScale::default(),
        }
    }
}

impl TimeConfig {
    /// Absolute times in increasing order
    pub fn resolve(&self, transit_time: f64) -> Vec<f64> {
        let factor = match self.scale {
            TimeScale::Absolute => 1.0,
            TimeScale::Transit => transit_time,
        };
        let mut times: Vec<f64> = self.values.iter().map(|v| v * factor).collect();
        times.sort_by(f64::total_cmp);
        times
    }
}

/// Uniformly spaced sample positions
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SampleGrid {
    /// First position
    #[serde(default = "default_x_min")]
    pub x_min: f64,
    /// Last position
    #[serde(default = "default_x_max")]
    pub x_max: f64,
    /// Number of positions
    #[serde(default = "default_points")]
    pub points: usize,
}

fn default_x_min() -> f64 {
    -5.0
}

fn default_x_max() -> f64 {
    3.0
}

fn default_points() -> usize {
    161
}

impl Default for SampleGrid {
    fn default() -> Self {
        Self {
            x_min: default_x_min(),
            x_max: default_x_max(),
            points: default_points(),
        }
    }
}

impl SampleGrid {
    /// Sample positions
    pub fn positions(&self) -> Array1<f64> {
        Array1::linspace(self.x_min, self.x_max, self.points)
    }
}

impl ScenarioConfig {
    /// Load configuration from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: ScenarioConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Check the scenario before any evaluation
    pub fn validate(&self) -> Result<()> {
        self.medium.validate()?;
        if !(self.pulse_width.is_finite() && self.pulse_width > 0.0) {
            return Err(ScatteringError::InvalidPulseWidth {
                width: self.pulse_width,
            });
        }
        if self.times.values.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(ScatteringError::Config(
                "output times must be finite and non-negative".to_string(),
            ));
        }
        if self.samples.points < 2 || !(self.samples.x_max > self.samples.x_min) {
            return Err(ScatteringError::Config(format!(
                "sample grid needs at least 2 points on a non-empty interval, got {} on [{}, {}]",
                self.samples.points, self.samples.x_min, self.samples.x_max
            )));
        }
        for &order in &self.orders {
            // both families are evaluated at every order
            Family::Reflected.terms(order)?;
            Family::Transmitted.terms(order)?;
        }
        if let Some(reference) = &self.reference {
            reference.validate(&self.medium)?;
        }
        Ok(())
    }

    /// Series evaluator for this scenario
    pub fn scatterer(&self) -> Result<Scatterer> {
        Ok(Scatterer::new(self.medium, self.pulse_width)?.with_quadrature(self.quadrature))
    }
}
