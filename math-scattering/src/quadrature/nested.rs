//! Iterated integration over regions with variable limits
//!
//! Each level is a full adaptive 1D integral, so the same tolerances apply
//! to every nesting depth. Reported errors combine the outer estimate with
//! the worst inner one scaled by the outer length.

use super::{QuadratureConfig, QuadratureResult, integrate};
use std::cell::Cell;

/// `∫_a^b ∫_{lo(x)}^{hi(x)} f(x, y) dy dx`
pub fn integrate_2d<F, L, H>(
    f: F,
    a: f64,
    b: f64,
    lo: L,
    hi: H,
    config: &QuadratureConfig,
) -> QuadratureResult
where
    F: Fn(f64, f64) -> f64,
    L: Fn(f64) -> f64,
    H: Fn(f64) -> f64,
{
    let evaluations = Cell::new(0usize);
    let inner_error = Cell::new(0.0f64);

    let outer = integrate(
        |x| {
            let inner = integrate(|y| f(x, y), lo(x), hi(x), config);
            evaluations.set(evaluations.get() + inner.evaluations);
            inner_error.set(inner_error.get().max(inner.error));
            inner.value
        },
        a,
        b,
        config,
    );

    combine(outer, a, b, evaluations.get(), inner_error.get(), config)
}

/// `∫_a^b ∫_{y_lo(x)}^{y_hi(x)} ∫_{z_lo(x,y)}^{z_hi(x,y)} f(x, y, z) dz dy dx`
#[allow(clippy::too_many_arguments)]
pub fn integrate_3d<F, YL, YH, ZL, ZH>(
    f: F,
    a: f64,
    b: f64,
    y_lo: YL,
    y_hi: YH,
    z_lo: ZL,
    z_hi: ZH,
    config: &QuadratureConfig,
) -> QuadratureResult
where
    F: Fn(f64, f64, f64) -> f64,
    YL: Fn(f64) -> f64,
    YH: Fn(f64) -> f64,
    ZL: Fn(f64, f64) -> f64,
    ZH: Fn(f64, f64) -> f64,
{
    let evaluations = Cell::new(0usize);
    let inner_error = Cell::new(0.0f64);

    let outer = integrate(
        |x| {
            let inner = integrate_2d(
                |y, z| f(x, y, z),
                y_lo(x),
                y_hi(x),
                |y| z_lo(x, y),
                |y| z_hi(x, y),
                config,
            );
            evaluations.set(evaluations.get() + inner.evaluations);
            inner_error.set(inner_error.get().max(inner.error));
            inner.value
        },
        a,
        b,
        config,
    );

    combine(outer, a, b, evaluations.get(), inner_error.get(), config)
}

fn combine(
    outer: QuadratureResult,
    a: f64,
    b: f64,
    evaluations: usize,
    inner_error: f64,
    config: &QuadratureConfig,
) -> QuadratureResult {
    let length = if b > a { b - a } else { 0.0 };
    let error = outer.error + length * inner_error;
    QuadratureResult {
        value: outer.value,
        error,
        evaluations,
        converged: outer.converged && error <= config.target(outer.value) + length * config.abs_tol,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_triangle_area() {
        let cfg = QuadratureConfig::with_tolerance(1e-10);
        // ∫_0^1 ∫_0^x 1 dy dx
        let r = integrate_2d(|_, _| 1.0, 0.0, 1.0, |_| 0.0, |x| x, &cfg);
        assert_abs_diff_eq!(r.value, 0.5, epsilon = 1e-12);
        assert!(r.evaluations > 0);
    }

    #[test]
    fn test_polynomial_over_variable_region() {
        let cfg = QuadratureConfig::with_tolerance(1e-10);
        // ∫_0^2 ∫_x^{2x} x y dy dx = ∫ x (3x²/2) dx = 6
        let r = integrate_2d(|x, y| x * y, 0.0, 2.0, |x| x, |x| 2.0 * x, &cfg);
        assert_abs_diff_eq!(r.value, 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_inner_region_is_zero() {
        let cfg = QuadratureConfig::default();
        let r = integrate_2d(|_, _| 1.0, 0.0, 1.0, |_| 1.0, |_| 0.0, &cfg);
        assert_eq!(r.value, 0.0);
    }

    #[test]
    fn test_simplex_volume() {
        let cfg = QuadratureConfig::with_tolerance(1e-10);
        // 0 ≤ z ≤ y ≤ x ≤ 1 has volume 1/6
        let r = integrate_3d(
            |_, _, _| 1.0,
            0.0,
            1.0,
            |_| 0.0,
            |x| x,
            |_, _| 0.0,
            |_, y| y,
            &cfg,
        );
        assert_abs_diff_eq!(r.value, 1.0 / 6.0, epsilon = 1e-10);
    }

    #[test]
    fn test_3d_separable_integrand() {
        let cfg = QuadratureConfig::with_tolerance(1e-9);
        // ∫∫∫_[0,1]^3 x y² z³ = 1/2 · 1/3 · 1/4
        let r = integrate_3d(
            |x, y, z| x * y * y * z * z * z,
            0.0,
            1.0,
            |_| 0.0,
            |_| 1.0,
            |_, _| 0.0,
            |_, _| 1.0,
            &cfg,
        );
        assert_abs_diff_eq!(r.value, 1.0 / 24.0, epsilon = 1e-10);
    }
}
