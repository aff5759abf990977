//! Piecewise material profile
//!
//! Sound speed `c(x)` and impedance `Z(x)` are constant to the left of `x_0`
//! and to the right of `x_r`, and vary linearly in between. An optional
//! sinusoidal perturbation `A sin(k (x - x_0))` is added to both inside the
//! transition.

use crate::error::{Result, ScatteringError};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Sinusoidal perturbation added to `c` and `Z` in the transition region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillation {
    /// Perturbation amplitude (0 disables it)
    #[serde(default)]
    pub amplitude: f64,
    /// Angular wavenumber in radians per unit length
    #[serde(default = "default_wavenumber")]
    pub wavenumber: f64,
}

fn default_wavenumber() -> f64 {
    20.0
}

impl Default for Oscillation {
    fn default() -> Self {
        Self {
            amplitude: 0.0,
            wavenumber: default_wavenumber(),
        }
    }
}

impl Oscillation {
    #[inline]
    fn value(&self, s: f64) -> f64 {
        self.amplitude * (self.wavenumber * s).sin()
    }

    #[inline]
    fn slope(&self, s: f64) -> f64 {
        self.amplitude * self.wavenumber * (self.wavenumber * s).cos()
    }
}

/// Material profile over three regions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Medium {
    /// Sound speed left of the transition
    pub c_l: f64,
    /// Sound speed right of the transition
    pub c_r: f64,
    /// Impedance left of the transition
    pub z_l: f64,
    /// Impedance right of the transition
    pub z_r: f64,
    /// Start of the transition
    pub x_0: f64,
    /// End of the transition
    pub x_r: f64,
    /// Optional perturbation inside the transition
    #[serde(default)]
    pub oscillation: Oscillation,
}

/// `c`, `Z` and `Z'` sampled on a set of positions
#[derive(Debug, Clone)]
pub struct MaterialSample {
    /// Sound speed
    pub c: Array1<f64>,
    /// Impedance
    pub z: Array1<f64>,
    /// Impedance derivative
    pub dz: Array1<f64>,
}

impl Medium {
    /// Create a medium without perturbation
    pub fn new(c_l: f64, c_r: f64, z_l: f64, z_r: f64, x_0: f64, x_r: f64) -> Result<Self> {
        let medium = Self {
            c_l,
            c_r,
            z_l,
            z_r,
            x_0,
            x_r,
            oscillation: Oscillation::default(),
        };
        medium.validate()?;
        Ok(medium)
    }

    /// The configuration used throughout the paper figures:
    /// `c_l = 2, c_r = 1, Z_l = 0.5, Z_r = 1` over `[0, 1]`
    pub fn paper() -> Self {
        Self {
            c_l: 2.0,
            c_r: 1.0,
            z_l: 0.5,
            z_r: 1.0,
            x_0: 0.0,
            x_r: 1.0,
            oscillation: Oscillation::default(),
        }
    }

    /// Add a sinusoidal perturbation
    pub fn with_oscillation(mut self, amplitude: f64, wavenumber: f64) -> Result<Self> {
        self.oscillation = Oscillation {
            amplitude,
            wavenumber,
        };
        self.validate()?;
        Ok(self)
    }

    /// Check that the profile stays physical everywhere
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("c_l", self.c_l),
            ("c_r", self.c_r),
            ("z_l", self.z_l),
            ("z_r", self.z_r),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ScatteringError::InvalidMedium(format!(
                    "{} = {} must be positive",
                    name, value
                )));
            }
        }
        if !(self.x_0.is_finite() && self.x_r.is_finite() && self.x_r > self.x_0) {
            return Err(ScatteringError::InvalidMedium(format!(
                "transition [{}, {}] must have positive length",
                self.x_0, self.x_r
            )));
        }
        let amp = self.oscillation.amplitude.abs();
        if !amp.is_finite() || !self.oscillation.wavenumber.is_finite() {
            return Err(ScatteringError::InvalidMedium(
                "oscillation must be finite".to_string(),
            ));
        }
        if amp >= self.c_l.min(self.c_r) || amp >= self.z_l.min(self.z_r) {
            return Err(ScatteringError::InvalidMedium(format!(
                "oscillation amplitude {} would make c or Z non-positive",
                amp
            )));
        }
        Ok(())
    }

    /// Length of the transition region
    #[inline]
    pub fn width(&self) -> f64 {
        self.x_r - self.x_0
    }

    /// True when `c` is exactly linear in the transition
    #[inline]
    pub fn is_linear(&self) -> bool {
        self.oscillation.amplitude == 0.0
    }

    /// Slope of the linear part of `c`
    #[inline]
    pub fn speed_slope(&self) -> f64 {
        (self.c_r - self.c_l) / self.width()
    }

    /// Slope of the linear part of `Z`
    #[inline]
    pub fn impedance_slope(&self) -> f64 {
        (self.z_r - self.z_l) / self.width()
    }

    #[inline]
    fn inside(&self, x: f64) -> bool {
        x >= self.x_0 && x <= self.x_r
    }

    /// Sound speed `c(x)`
    pub fn sound_speed(&self, x: f64) -> f64 {
        if x < self.x_0 {
            self.c_l
        } else if x > self.x_r {
            self.c_r
        } else {
            let s = x - self.x_0;
            self.c_l + self.speed_slope() * s + self.oscillation.value(s)
        }
    }

    /// Impedance `Z(x)`
    pub fn impedance(&self, x: f64) -> f64 {
        if x < self.x_0 {
            self.z_l
        } else if x > self.x_r {
            self.z_r
        } else {
            let s = x - self.x_0;
            self.z_l + self.impedance_slope() * s + self.oscillation.value(s)
        }
    }

    /// Impedance derivative `Z'(x)`, zero outside the transition
    pub fn impedance_derivative(&self, x: f64) -> f64 {
        if self.inside(x) {
            self.impedance_slope() + self.oscillation.slope(x - self.x_0)
        } else {
            0.0
        }
    }

    /// Local reflectivity `c Z' / (2 Z)`
    pub fn reflectivity(&self, x: f64) -> f64 {
        if self.inside(x) {
            0.5 * self.sound_speed(x) * self.impedance_derivative(x) / self.impedance(x)
        } else {
            0.0
        }
    }

    /// Evaluate `c`, `Z` and `Z'` on every position
    pub fn sample(&self, x: &Array1<f64>) -> MaterialSample {
        MaterialSample {
            c: x.mapv(|xi| self.sound_speed(xi)),
            z: x.mapv(|xi| self.impedance(xi)),
            dz: x.mapv(|xi| self.impedance_derivative(xi)),
        }
    }
}

impl Default for Medium {
    fn default() -> Self {
        Self::paper()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_constant_outside_transition() {
        let m = Medium::paper();
        let width = 100.0;
        for &x in &[-250.0, m.x_0 - width - 1e-9, -120.0] {
            assert_eq!(m.sound_speed(x), m.c_l);
            assert_eq!(m.impedance(x), m.z_l);
            assert_eq!(m.impedance_derivative(x), 0.0);
        }
        for &x in &[m.x_r + 1e-12, 7.5, 300.0] {
            assert_eq!(m.sound_speed(x), m.c_r);
            assert_eq!(m.impedance(x), m.z_r);
            assert_eq!(m.impedance_derivative(x), 0.0);
        }
    }

    #[test]
    fn test_continuous_at_transition_ends() {
        let m = Medium::new(3.0, 1.5, 0.2, 2.0, -0.5, 2.0).unwrap();
        let eps = 1e-12;
        assert_abs_diff_eq!(
            m.sound_speed(m.x_0 - eps),
            m.sound_speed(m.x_0 + eps),
            epsilon = 1e-10
        );
        assert_abs_diff_eq!(
            m.sound_speed(m.x_r - eps),
            m.sound_speed(m.x_r + eps),
            epsilon = 1e-10
        );
        assert_abs_diff_eq!(m.impedance(m.x_0 - eps), m.impedance(m.x_0 + eps), epsilon = 1e-10);
        assert_abs_diff_eq!(m.impedance(m.x_r - eps), m.impedance(m.x_r + eps), epsilon = 1e-10);
    }

    #[test]
    fn test_linear_midpoint() {
        let m = Medium::paper();
        assert_abs_diff_eq!(m.sound_speed(0.5), 1.5, epsilon = 1e-15);
        assert_abs_diff_eq!(m.impedance(0.5), 0.75, epsilon = 1e-15);
        assert_abs_diff_eq!(m.impedance_derivative(0.5), 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(m.reflectivity(0.5), 0.5 * 1.5 * 0.5 / 0.75, epsilon = 1e-15);
    }

    #[test]
    fn test_oscillation_adds_in_transition_only() {
        let m = Medium::paper().with_oscillation(0.1, 10.0).unwrap();
        let x = 0.3;
        assert_abs_diff_eq!(m.sound_speed(x), 2.0 - 0.3 + 0.1 * (3.0f64).sin(), epsilon = 1e-14);
        assert_abs_diff_eq!(
            m.impedance_derivative(x),
            0.5 + 0.1 * 10.0 * (3.0f64).cos(),
            epsilon = 1e-14
        );
        assert_eq!(m.sound_speed(-0.1), 2.0);
        assert!(!m.is_linear());
    }

    #[test]
    fn test_sample_aligns_with_positions() {
        let m = Medium::paper();
        let x = Array1::linspace(-1.0, 2.0, 7);
        let s = m.sample(&x);
        assert_eq!(s.c.len(), 7);
        for i in 0..7 {
            assert_eq!(s.c[i], m.sound_speed(x[i]));
            assert_eq!(s.z[i], m.impedance(x[i]));
            assert_eq!(s.dz[i], m.impedance_derivative(x[i]));
        }
    }

    #[test]
    fn test_rejects_unphysical() {
        assert!(Medium::new(-1.0, 1.0, 1.0, 1.0, 0.0, 1.0).is_err());
        assert!(Medium::new(1.0, 1.0, 1.0, 1.0, 1.0, 1.0).is_err());
        assert!(Medium::paper().with_oscillation(0.6, 5.0).is_err());
    }
}
