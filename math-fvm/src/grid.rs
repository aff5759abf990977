//! Uniform 1D grid and per-cell acoustic coefficients

use crate::error::{FvmError, Result};
use ndarray::Array1;

/// Ghost cells on each side of the domain (enough for limited corrections)
pub const NUM_GHOST: usize = 2;

/// Uniform cell-centred grid on `[x_lower, x_upper]`
#[derive(Debug, Clone, PartialEq)]
pub struct Grid1D {
    /// Lower domain bound
    pub x_lower: f64,
    /// Upper domain bound
    pub x_upper: f64,
    /// Number of interior cells
    pub cells: usize,
    /// Cell width
    pub dx: f64,
}

impl Grid1D {
    /// Create a grid, rejecting empty or reversed domains
    pub fn new(x_lower: f64, x_upper: f64, cells: usize) -> Result<Self> {
        if cells == 0 || !(x_upper > x_lower) || !x_lower.is_finite() || !x_upper.is_finite() {
            return Err(FvmError::InvalidGrid {
                x_lower,
                x_upper,
                cells,
            });
        }
        Ok(Self {
            x_lower,
            x_upper,
            cells,
            dx: (x_upper - x_lower) / cells as f64,
        })
    }

    /// Centre of interior cell `i`
    #[inline]
    pub fn center(&self, i: usize) -> f64 {
        self.x_lower + (i as f64 + 0.5) * self.dx
    }

    /// All interior cell centres
    pub fn centers(&self) -> Array1<f64> {
        Array1::from_shape_fn(self.cells, |i| self.center(i))
    }

    /// Interior cell containing `x`, clamped to the domain
    pub fn locate(&self, x: f64) -> usize {
        let s = ((x - self.x_lower) / self.dx).floor();
        if s <= 0.0 {
            0
        } else {
            (s as usize).min(self.cells - 1)
        }
    }

    /// Length of arrays that include ghost cells
    #[inline]
    pub fn padded_len(&self) -> usize {
        self.cells + 2 * NUM_GHOST
    }
}

/// Density and bulk modulus per interior cell.
///
/// The acoustic system is `p_t + K u_x = 0`, `ρ u_t + p_x = 0`, so the
/// sound speed is `c = sqrt(K/ρ)` and the impedance is `Z = ρc`.
#[derive(Debug, Clone)]
pub struct AcousticMaterial {
    /// Density ρ
    pub density: Array1<f64>,
    /// Bulk modulus K
    pub bulk_modulus: Array1<f64>,
}

impl AcousticMaterial {
    /// Build from density and bulk modulus arrays
    pub fn new(density: Array1<f64>, bulk_modulus: Array1<f64>) -> Result<Self> {
        if density.len() != bulk_modulus.len() {
            return Err(FvmError::LengthMismatch {
                expected: density.len(),
                got: bulk_modulus.len(),
            });
        }
        for (index, (&rho, &k)) in density.iter().zip(bulk_modulus.iter()).enumerate() {
            if !(rho.is_finite() && rho > 0.0) {
                return Err(FvmError::InvalidMaterial {
                    index,
                    reason: format!("density {} must be positive", rho),
                });
            }
            if !(k.is_finite() && k > 0.0) {
                return Err(FvmError::InvalidMaterial {
                    index,
                    reason: format!("bulk modulus {} must be positive", k),
                });
            }
        }
        Ok(Self {
            density,
            bulk_modulus,
        })
    }

    /// Build from sound speed and impedance: ρ = Z/c, K = Z c
    pub fn from_speed_impedance(speed: &Array1<f64>, impedance: &Array1<f64>) -> Result<Self> {
        if speed.len() != impedance.len() {
            return Err(FvmError::LengthMismatch {
                expected: speed.len(),
                got: impedance.len(),
            });
        }
        for (index, (&c, &z)) in speed.iter().zip(impedance.iter()).enumerate() {
            if !(c.is_finite() && c > 0.0 && z.is_finite() && z > 0.0) {
                return Err(FvmError::InvalidMaterial {
                    index,
                    reason: format!("speed {} and impedance {} must be positive", c, z),
                });
            }
        }
        let density = Array1::from_shape_fn(speed.len(), |i| impedance[i] / speed[i]);
        let bulk_modulus = Array1::from_shape_fn(speed.len(), |i| impedance[i] * speed[i]);
        Ok(Self {
            density,
            bulk_modulus,
        })
    }

    /// Homogeneous material over `cells` cells
    pub fn uniform(cells: usize, speed: f64, impedance: f64) -> Result<Self> {
        Self::from_speed_impedance(
            &Array1::from_elem(cells, speed),
            &Array1::from_elem(cells, impedance),
        )
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.density.len()
    }

    /// True when no cells are present
    pub fn is_empty(&self) -> bool {
        self.density.is_empty()
    }

    /// Sound speed in cell `i`
    #[inline]
    pub fn sound_speed(&self, i: usize) -> f64 {
        (self.bulk_modulus[i] / self.density[i]).sqrt()
    }

    /// Impedance in cell `i`
    #[inline]
    pub fn impedance(&self, i: usize) -> f64 {
        (self.bulk_modulus[i] * self.density[i]).sqrt()
    }

    /// Largest sound speed over all cells
    pub fn max_speed(&self) -> f64 {
        (0..self.len())
            .map(|i| self.sound_speed(i))
            .fold(0.0, f64::max)
    }
}
