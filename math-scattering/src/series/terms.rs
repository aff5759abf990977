//! Integrands of the multiple-reflection series
//!
//! All terms are written in the travel-time coordinate `σ ∈ [0, t_r]` for
//! the reflection points, numbered from the earliest reflection `σ1` to the
//! last. The innermost integral over `σ1` has the closed form
//!
//! ```text
//! ∫ r(σ) dσ = ½ ln Z(X(σ))
//! ```
//!
//! so `R_1` needs no quadrature and each higher term drops one dimension.
//! For pulse offset `C`, the incident profile `f(2 σ1 + C)` is nonzero on
//! `σ1 ∈ [(-W - C)/2, -C/2]`.

use super::Scatterer;
use crate::quadrature::{QuadratureResult, integrate, integrate_2d, integrate_3d};

fn exact(value: f64) -> QuadratureResult {
    QuadratureResult {
        value,
        ..QuadratureResult::zero()
    }
}

fn negated(result: QuadratureResult) -> QuadratureResult {
    QuadratureResult {
        value: -result.value,
        ..result
    }
}

impl Scatterer {
    /// Square incident pulse `f(τ0)`, unity on `[-W, 0]`
    #[inline]
    pub(super) fn incident(&self, tau0: f64) -> f64 {
        if tau0 >= -self.pulse && tau0 <= 0.0 {
            1.0
        } else {
            0.0
        }
    }

    /// `r(σ)` at a point of the transition, zero outside `[0, t_r]`
    #[inline]
    pub(super) fn reflectivity_at(&self, sigma: f64) -> f64 {
        if sigma < 0.0 || sigma > self.t_r {
            return 0.0;
        }
        self.medium
            .reflectivity(self.characteristic.position(sigma))
    }

    #[inline]
    fn log_impedance(&self, sigma: f64) -> f64 {
        self.medium
            .impedance(self.characteristic.position(sigma))
            .ln()
    }

    /// `∫_lo^hi r(σ) dσ` with the limits clamped to `[0, t_r]`
    pub(super) fn kernel(&self, lo: f64, hi: f64) -> f64 {
        let lo = lo.max(0.0);
        let hi = hi.min(self.t_r);
        if hi <= lo {
            return 0.0;
        }
        0.5 * (self.log_impedance(hi) - self.log_impedance(lo))
    }

    /// Innermost reflection restricted to the pulse support
    #[inline]
    fn pulse_kernel(&self, lo: f64, hi: f64, offset: f64) -> f64 {
        let lo = lo.max(-0.5 * (self.pulse + offset));
        let hi = hi.min(-0.5 * offset);
        self.kernel(lo, hi)
    }

    pub(super) fn direct(&self, tau: f64, t: f64) -> QuadratureResult {
        exact(self.incident(tau - t))
    }

    pub(super) fn single_reflection(&self, tau: f64, t: f64) -> QuadratureResult {
        exact(self.pulse_kernel(tau.max(0.0), tau + t, -(tau + t)))
    }

    pub(super) fn double_reflection(&self, tau: f64, t: f64) -> QuadratureResult {
        let r = integrate(
            |s2| {
                self.reflectivity_at(s2)
                    * self.pulse_kernel(s2, 2.0 * s2 - tau + t, -2.0 * s2 + tau - t)
            },
            (tau - t).max(0.0),
            tau.min(self.t_r),
            &self.quadrature,
        );
        negated(r)
    }

    pub(super) fn triple_reflection(&self, tau: f64, t: f64) -> QuadratureResult {
        let r = integrate_2d(
            |s3, s2| {
                self.reflectivity_at(s3)
                    * self.reflectivity_at(s2)
                    * self.pulse_kernel(
                        s2,
                        2.0 * (s2 - s3) + tau + t,
                        -2.0 * (s2 - s3) - tau - t,
                    )
            },
            tau.max(0.0),
            (tau + t).min(self.t_r),
            |s3| (2.0 * s3 - tau - t).max(0.0),
            |s3| s3,
            &self.quadrature,
        );
        negated(r)
    }

    pub(super) fn quadruple_reflection(&self, tau: f64, t: f64) -> QuadratureResult {
        let t_r = self.t_r;
        integrate_3d(
            |s4, s3, s2| {
                self.reflectivity_at(s4)
                    * self.reflectivity_at(s3)
                    * self.reflectivity_at(s2)
                    * self.pulse_kernel(
                        s2,
                        2.0 * (s2 - s3 + s4) - tau + t,
                        -2.0 * (s2 - s3 + s4) + tau - t,
                    )
            },
            (tau - t).max(0.0),
            tau.min(t_r),
            |s4| s4,
            |s4| (2.0 * s4 - tau + t).min(t_r),
            |s4, s3| (2.0 * (s3 - s4) + tau - t).max(0.0),
            |_, s3| s3,
            &self.quadrature,
        )
    }
}
