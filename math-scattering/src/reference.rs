//! Finite-volume reference run for the scattering problem
//!
//! Samples the medium on a [`fvm::Grid1D`], launches the square pulse as a
//! purely right-going state `(p, u) = (1, 1/Z_l)` on `[x_0 - w, x_0]`, and
//! returns frames split back into characteristic amplitudes.

use crate::error::{Result, ScatteringError};
use crate::medium::Medium;
use fvm::{AcousticMaterial, AcousticSolver, Frame, Grid1D, SolverConfig};
use ndarray::{Array1, Zip};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Grid and solver settings for the reference run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceConfig {
    /// Left end of the computational domain
    #[serde(default = "default_x_lower")]
    pub x_lower: f64,
    /// Right end of the computational domain
    #[serde(default = "default_x_upper")]
    pub x_upper: f64,
    /// Number of cells
    #[serde(default = "default_cells")]
    pub cells: usize,
    /// Time stepping, limiter and boundaries
    #[serde(default)]
    pub solver: SolverConfig,
}

fn default_x_lower() -> f64 {
    -5.0
}

fn default_x_upper() -> f64 {
    3.0
}

fn default_cells() -> usize {
    2000
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            x_lower: default_x_lower(),
            x_upper: default_x_upper(),
            cells: default_cells(),
            solver: SolverConfig::default(),
        }
    }
}

impl ReferenceConfig {
    /// The domain must contain the whole transition region
    pub fn validate(&self, medium: &Medium) -> Result<()> {
        if !(self.x_lower < medium.x_0 && self.x_upper > medium.x_r) {
            return Err(ScatteringError::Config(format!(
                "reference domain [{}, {}] must enclose the transition [{}, {}]",
                self.x_lower, self.x_upper, medium.x_0, medium.x_r
            )));
        }
        Ok(())
    }
}

/// Reference snapshot with the local impedance of every cell
#[derive(Debug, Clone)]
pub struct ReferenceFrame {
    /// Time of the snapshot
    pub time: f64,
    /// Cell centres
    pub x: Array1<f64>,
    /// Pressure
    pub p: Array1<f64>,
    /// Velocity
    pub u: Array1<f64>,
    /// Impedance at the cell centres
    pub z: Array1<f64>,
}

impl ReferenceFrame {
    fn new(frame: Frame, z: &Array1<f64>) -> Self {
        Self {
            time: frame.time,
            x: frame.x,
            p: frame.p,
            u: frame.u,
            z: z.clone(),
        }
    }

    /// Left-going amplitude `B = (p - Z u) / 2`
    pub fn left_going(&self) -> Array1<f64> {
        Zip::from(&self.p)
            .and(&self.u)
            .and(&self.z)
            .map_collect(|&p, &u, &z| 0.5 * (p - z * u))
    }

    /// Right-going amplitude `A = (p + Z u) / 2`
    pub fn right_going(&self) -> Array1<f64> {
        Zip::from(&self.p)
            .and(&self.u)
            .and(&self.z)
            .map_collect(|&p, &u, &z| 0.5 * (p + z * u))
    }

    /// `B` interpolated onto arbitrary positions
    pub fn left_going_on(&self, positions: &Array1<f64>) -> Array1<f64> {
        let b = self.left_going();
        positions.mapv(|x| Frame::interpolate(&b, &self.x, x))
    }

    /// `A` interpolated onto arbitrary positions
    pub fn right_going_on(&self, positions: &Array1<f64>) -> Array1<f64> {
        let a = self.right_going();
        positions.mapv(|x| Frame::interpolate(&a, &self.x, x))
    }

    /// Pressure interpolated onto arbitrary positions
    pub fn pressure_on(&self, positions: &Array1<f64>) -> Array1<f64> {
        positions.mapv(|x| Frame::interpolate(&self.p, &self.x, x))
    }
}

/// All frames of a reference run
#[derive(Debug, Clone)]
pub struct ReferenceSolution {
    /// One frame per requested time
    pub frames: Vec<ReferenceFrame>,
    /// Total time steps taken
    pub steps: usize,
}

/// Fraction of the cell `[x - dx/2, x + dx/2]` covered by `[lo, hi]`
fn coverage(x: f64, dx: f64, lo: f64, hi: f64) -> f64 {
    let (left, right) = (x - 0.5 * dx, x + 0.5 * dx);
    if left >= lo && right <= hi {
        return 1.0;
    }
    if right <= lo || left >= hi {
        return 0.0;
    }
    ((right.min(hi) - left.max(lo)) / dx).clamp(0.0, 1.0)
}

/// Run the finite-volume solver for a pulse of width `width` and collect
/// frames at `times` (non-decreasing)
pub fn solve_reference(
    medium: &Medium,
    width: f64,
    config: &ReferenceConfig,
    times: &[f64],
) -> Result<ReferenceSolution> {
    medium.validate()?;
    if !(width.is_finite() && width > 0.0) {
        return Err(ScatteringError::InvalidPulseWidth { width });
    }
    config.validate(medium)?;

    let grid = Grid1D::new(config.x_lower, config.x_upper, config.cells)?;
    let centers = grid.centers();
    let sample = medium.sample(&centers);
    let material = AcousticMaterial::from_speed_impedance(&sample.c, &sample.z)?;

    let dx = grid.dx;
    log::debug!(
        "transition [{}, {}] spans cells {}..={}",
        medium.x_0,
        medium.x_r,
        grid.locate(medium.x_0),
        grid.locate(medium.x_r)
    );
    let (lo, hi) = (medium.x_0 - width, medium.x_0);
    let velocity = 1.0 / medium.z_l;

    let mut solver = AcousticSolver::new(grid, &material, config.solver.clone())?;
    solver.set_initial(|x| {
        // cell averages keep the front position exact to O(dx^2)
        let f = coverage(x, dx, lo, hi);
        (f, f * velocity)
    });

    log::info!(
        "reference run: {} cells on [{}, {}], dt = {:.3e}, {} output times",
        config.cells,
        config.x_lower,
        config.x_upper,
        solver.stable_dt(),
        times.len()
    );
    let start = Instant::now();
    let frames = solver.run(times)?;
    log::info!(
        "reference run finished: {} steps in {:.2?}",
        solver.steps(),
        start.elapsed()
    );

    Ok(ReferenceSolution {
        frames: frames
            .into_iter()
            .map(|frame| ReferenceFrame::new(frame, &sample.z))
            .collect(),
        steps: solver.steps(),
    })
}
