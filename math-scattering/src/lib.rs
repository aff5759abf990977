//! Multi-reflection series for 1D wave scattering
//!
//! A square pressure pulse travels from a homogeneous region into a
//! transition layer where sound speed and impedance vary smoothly, and on
//! into a second homogeneous region. This crate approximates the reflected
//! and transmitted waves by a series ordered by the number of internal
//! reflections, with each term an iterated integral along the right-going
//! characteristic.
//!
//! # Features
//!
//! - **Medium**: piecewise-linear `c(x)` and `Z(x)` with an optional sinusoidal perturbation
//! - **Characteristics**: closed-form map for linear speed, RK4 table otherwise
//! - **Series**: terms `T_0, R_1, T_2, R_3, T_4` with causal windows
//! - **Quadrature**: adaptive Gauss-Kronrod 7/15 in 1D, 2D and 3D
//! - **Reference**: finite-volume run through [`fvm`] for validation
//! - **Scenarios**: JSON configuration and error norms for comparison
//!
//! # Example
//!
//! ```rust
//! use math_scattering::{Medium, QuadratureConfig, reflected_wave};
//! use ndarray::Array1;
//!
//! let medium = Medium::paper();
//! let x = Array1::linspace(-3.0, -1.0, 5);
//! let t = 3.0 * 2.0f64.ln();
//! let b = reflected_wave(&medium, &x, t, 100.0, 2, &QuadratureConfig::default()).unwrap();
//!
//! // behind the reflected front the single reflection is ½ ln(Z_r / Z_l)
//! assert!((b[4] - 0.5 * 2.0f64.ln()).abs() < 1e-12);
//! ```

pub mod characteristic;
pub mod comparison;
pub mod config;
mod error;
pub mod medium;
pub mod quadrature;
pub mod reference;
pub mod series;

pub use characteristic::Characteristic;
pub use comparison::WaveComparison;
pub use config::{SampleGrid, ScenarioConfig, TimeConfig, TimeScale};
pub use error::{Result, ScatteringError};
pub use medium::{Medium, Oscillation};
pub use quadrature::{QuadratureConfig, QuadratureResult, integrate, integrate_2d, integrate_3d};
pub use reference::{ReferenceConfig, ReferenceFrame, ReferenceSolution, solve_reference};
pub use series::{
    CausalWindow, Family, Scatterer, ScatteringTerm, reflected_wave, term_profile, total_pressure,
    transmitted_wave,
};

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
