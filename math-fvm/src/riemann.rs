//! Acoustic Riemann solver for heterogeneous media
//!
//! At the interface between a left cell (Z_l, c_l) and a right cell
//! (Z_r, c_r) the jump `δq = q_r - q_l` splits into a left-going wave
//! `α1 (-Z_l, 1)` with speed `-c_l` and a right-going wave `α2 (Z_r, 1)`
//! with speed `c_r`, where
//!
//! ```text
//! α1 = (-δp + Z_r δu) / (Z_l + Z_r)
//! α2 = ( δp + Z_l δu) / (Z_l + Z_r)
//! ```

/// A single wave in `(p, u)` with its propagation speed
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Wave {
    /// Pressure jump carried by the wave
    pub dp: f64,
    /// Velocity jump carried by the wave
    pub du: f64,
    /// Signed propagation speed
    pub speed: f64,
}

impl Wave {
    /// Dot product of the jump vectors
    #[inline]
    pub fn dot(&self, other: &Wave) -> f64 {
        self.dp * other.dp + self.du * other.du
    }

    /// Squared norm of the jump vector
    #[inline]
    pub fn norm_sqr(&self) -> f64 {
        self.dot(self)
    }

    /// Same wave with its jump scaled by `factor`
    #[inline]
    pub fn scaled(&self, factor: f64) -> Wave {
        Wave {
            dp: self.dp * factor,
            du: self.du * factor,
            speed: self.speed,
        }
    }
}

/// Wave decomposition at one interface
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InterfaceWaves {
    /// Left-going wave (family 1)
    pub left: Wave,
    /// Right-going wave (family 2)
    pub right: Wave,
}

impl InterfaceWaves {
    /// Wave of family `p` (0 = left-going, 1 = right-going)
    #[inline]
    pub fn family(&self, p: usize) -> &Wave {
        if p == 0 { &self.left } else { &self.right }
    }

    /// A⁻ΔQ fluctuation (into the left cell)
    #[inline]
    pub fn left_fluctuation(&self) -> (f64, f64) {
        (
            self.left.speed * self.left.dp,
            self.left.speed * self.left.du,
        )
    }

    /// A⁺ΔQ fluctuation (into the right cell)
    #[inline]
    pub fn right_fluctuation(&self) -> (f64, f64) {
        (
            self.right.speed * self.right.dp,
            self.right.speed * self.right.du,
        )
    }
}

/// Material seen by one side of an interface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Side {
    /// Pressure
    pub p: f64,
    /// Velocity
    pub u: f64,
    /// Impedance
    pub z: f64,
    /// Sound speed
    pub c: f64,
}

/// Solve the acoustic Riemann problem between `left` and `right`
pub fn acoustic_riemann(left: Side, right: Side) -> InterfaceWaves {
    let dp = right.p - left.p;
    let du = right.u - left.u;
    let denom = left.z + right.z;
    let alpha1 = (-dp + right.z * du) / denom;
    let alpha2 = (dp + left.z * du) / denom;

    InterfaceWaves {
        left: Wave {
            dp: -alpha1 * left.z,
            du: alpha1,
            speed: -left.c,
        },
        right: Wave {
            dp: alpha2 * right.z,
            du: alpha2,
            speed: right.c,
        },
    }
}

/// Sharp-interface pressure reflection coefficient `(Z_r - Z_l)/(Z_r + Z_l)`
pub fn reflection_coefficient(z_left: f64, z_right: f64) -> f64 {
    (z_right - z_left) / (z_right + z_left)
}

/// Sharp-interface pressure transmission coefficient `2 Z_r/(Z_r + Z_l)`
pub fn transmission_coefficient(z_left: f64, z_right: f64) -> f64 {
    2.0 * z_right / (z_right + z_left)
}
