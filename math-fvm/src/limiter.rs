//! Wave limiters for the second-order correction terms

use serde::{Deserialize, Serialize};

/// Limiter applied to each wave family using the upwind ratio θ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Limiter {
    /// Unlimited Lax-Wendroff corrections
    None,
    /// First-order Godunov (corrections dropped)
    Upwind,
    /// Minmod
    Minmod,
    /// Superbee
    Superbee,
    /// Monotonized central
    #[default]
    Mc,
    /// Van Leer
    VanLeer,
}

impl Limiter {
    /// Limiter function φ(θ)
    pub fn phi(&self, theta: f64) -> f64 {
        match self {
            Limiter::None => 1.0,
            Limiter::Upwind => 0.0,
            Limiter::Minmod => theta.min(1.0).max(0.0),
            Limiter::Superbee => (2.0 * theta).min(1.0).max(theta.min(2.0)).max(0.0),
            Limiter::Mc => ((1.0 + theta) / 2.0).min(2.0).min(2.0 * theta).max(0.0),
            Limiter::VanLeer => (theta + theta.abs()) / (1.0 + theta.abs()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_smooth_data_is_unlimited() {
        for lim in [
            Limiter::Minmod,
            Limiter::Superbee,
            Limiter::Mc,
            Limiter::VanLeer,
            Limiter::None,
        ] {
            assert_abs_diff_eq!(lim.phi(1.0), 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_extrema_are_clipped() {
        for lim in [Limiter::Minmod, Limiter::Superbee, Limiter::Mc, Limiter::VanLeer] {
            assert_abs_diff_eq!(lim.phi(-0.5), 0.0, epsilon = 1e-15);
        }
        assert_abs_diff_eq!(Limiter::Upwind.phi(1.0), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_tvd_region() {
        for &theta in &[0.1, 0.5, 2.0, 5.0] {
            for lim in [Limiter::Minmod, Limiter::Superbee, Limiter::Mc, Limiter::VanLeer] {
                let phi = lim.phi(theta);
                assert!(phi >= 0.0 && phi <= 2.0f64.min(2.0 * theta) + 1e-15);
            }
        }
        assert_abs_diff_eq!(Limiter::Mc.phi(3.0), 2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(Limiter::Superbee.phi(0.25), 0.5, epsilon = 1e-15);
    }
}
