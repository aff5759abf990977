//! Ghost-cell boundary conditions

use crate::grid::NUM_GHOST;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Boundary condition applied at one end of the domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryCondition {
    /// Zero-order extrapolation; outgoing waves leave without reflection
    #[default]
    Extrapolation,
    /// Rigid wall: pressure mirrored, velocity negated
    Wall,
    /// Periodic wrap to the opposite end
    Periodic,
}

/// Which end of the domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// x = x_lower
    Lower,
    /// x = x_upper
    Upper,
}

/// Fill the ghost cells of a padded `(p, u)` pair at `edge`
pub fn fill_ghosts(bc: BoundaryCondition, edge: Edge, p: &mut Array1<f64>, u: &mut Array1<f64>) {
    let n = p.len();
    let cells = n - 2 * NUM_GHOST;
    for g in 0..NUM_GHOST {
        // ghost index, then the interior cell it is copied from
        let (ghost, source) = match (bc, edge) {
            (BoundaryCondition::Extrapolation, Edge::Lower) => (g, NUM_GHOST),
            (BoundaryCondition::Extrapolation, Edge::Upper) => {
                (NUM_GHOST + cells + g, NUM_GHOST + cells - 1)
            }
            (BoundaryCondition::Wall, Edge::Lower) => (NUM_GHOST - 1 - g, NUM_GHOST + g),
            (BoundaryCondition::Wall, Edge::Upper) => {
                (NUM_GHOST + cells + g, NUM_GHOST + cells - 1 - g)
            }
            (BoundaryCondition::Periodic, Edge::Lower) => (g, cells + g),
            (BoundaryCondition::Periodic, Edge::Upper) => (NUM_GHOST + cells + g, NUM_GHOST + g),
        };
        p[ghost] = p[source];
        u[ghost] = if bc == BoundaryCondition::Wall {
            -u[source]
        } else {
            u[source]
        };
    }
}

/// Fill ghost coefficients of a padded material array.
///
/// Walls and extrapolated ends copy the boundary cell; periodic ends wrap.
pub fn fill_material_ghosts(bc: BoundaryCondition, edge: Edge, values: &mut Array1<f64>) {
    let n = values.len();
    let cells = n - 2 * NUM_GHOST;
    for g in 0..NUM_GHOST {
        let (ghost, source) = match (bc, edge) {
            (BoundaryCondition::Periodic, Edge::Lower) => (g, cells + g),
            (BoundaryCondition::Periodic, Edge::Upper) => (NUM_GHOST + cells + g, NUM_GHOST + g),
            (BoundaryCondition::Wall, Edge::Lower) => (NUM_GHOST - 1 - g, NUM_GHOST + g),
            (BoundaryCondition::Wall, Edge::Upper) => {
                (NUM_GHOST + cells + g, NUM_GHOST + cells - 1 - g)
            }
            (BoundaryCondition::Extrapolation, Edge::Lower) => (g, NUM_GHOST),
            (BoundaryCondition::Extrapolation, Edge::Upper) => {
                (NUM_GHOST + cells + g, NUM_GHOST + cells - 1)
            }
        };
        values[ghost] = values[source];
    }
}
