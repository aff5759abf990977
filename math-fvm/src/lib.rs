//! Finite-volume solver for 1D acoustics in heterogeneous media
//!
//! This crate provides the reference PDE solver used to validate the
//! multi-reflection scattering series. It discretizes
//!
//! ```text
//! p_t + K(x) u_x = 0
//! ρ(x) u_t + p_x = 0
//! ```
//!
//! in wave-propagation form on a uniform grid.
//!
//! # Features
//!
//! - **Riemann solver**: acoustic waves across impedance jumps
//! - **High resolution**: limited second-order corrections (minmod, superbee, MC, van Leer)
//! - **Boundary conditions**: extrapolation, solid wall, periodic
//! - **Frames**: snapshots at requested output times
//!
//! # Example
//!
//! ```rust
//! use math_fvm::{AcousticMaterial, AcousticSolver, Grid1D, SolverConfig};
//!
//! let grid = Grid1D::new(-1.0, 1.0, 200).unwrap();
//! let material = AcousticMaterial::uniform(200, 1.0, 1.0).unwrap();
//! let mut solver = AcousticSolver::new(grid, &material, SolverConfig::default()).unwrap();
//! solver.set_initial(|x| {
//!     let p = (-50.0 * x * x).exp();
//!     (p, p)
//! });
//! let frames = solver.run(&[0.25, 0.5]).unwrap();
//! assert_eq!(frames.len(), 2);
//! ```

pub mod boundary;
mod error;
pub mod grid;
pub mod limiter;
pub mod riemann;
pub mod solver;

pub use boundary::BoundaryCondition;
pub use error::{FvmError, Result};
pub use grid::{AcousticMaterial, Grid1D, NUM_GHOST};
pub use limiter::Limiter;
pub use riemann::{
    InterfaceWaves, Wave, acoustic_riemann, reflection_coefficient, transmission_coefficient,
};
pub use solver::{AcousticSolver, Frame, SolverConfig};

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
