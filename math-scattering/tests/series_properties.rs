//! Series properties
//!
//! Continuity at causal-window edges, truncation limits, and the long-time
//! limits of the reflected and transmitted sums against the sharp-interface
//! coefficients.

use approx::assert_abs_diff_eq;
use fvm::{reflection_coefficient, transmission_coefficient};
use math_scattering::{
    Family, Medium, QuadratureConfig, Scatterer, ScatteringTerm, reflected_wave, transmitted_wave,
};
use ndarray::Array1;

fn paper() -> Scatterer {
    Scatterer::new(Medium::paper(), 100.0).unwrap()
}

/// `½ ln(Z_r / Z_l)` for the paper medium
fn half_log_ratio() -> f64 {
    0.5 * 2.0f64.ln()
}

#[test]
fn test_initial_profile_is_piecewise_constant() {
    let m = Medium::paper();
    let x = Array1::from(vec![-150.0, -100.5, 1.5, 5.0]);
    let s = m.sample(&x);
    assert_eq!(s.c[0], m.c_l);
    assert_eq!(s.z[1], m.z_l);
    assert_eq!(s.c[2], m.c_r);
    assert_eq!(s.z[3], m.z_r);

    // at t = 0 only the incident pulse is present, on [x_0 - w, x_0] with w = 100
    let x = Array1::from(vec![-120.0, -50.0, -0.01, 0.5, 2.0]);
    let p = paper().total_pressure(&x, 0.0, 4).unwrap();
    assert_eq!(p[0], 0.0);
    assert_eq!(p[1], 1.0);
    assert_eq!(p[2], 1.0);
    assert_eq!(p[3], 0.0);
    assert_eq!(p[4], 0.0);
}

#[test]
fn test_continuity_at_window_openings() {
    let s = paper();
    let t_r = s.transit_time();
    let d = 1e-6;
    let cases = [
        (ScatteringTerm::R1, -0.5),
        (ScatteringTerm::R1, 0.3 * t_r),
        (ScatteringTerm::R3, -0.5),
        (ScatteringTerm::T2, 0.4 * t_r),
        (ScatteringTerm::T2, t_r + 0.5),
        (ScatteringTerm::T4, t_r + 0.2),
    ];
    for (term, tau) in cases {
        let window = term.causal_window(tau, t_r, s.pulse_duration()).unwrap();
        let before = term.evaluate(&s, tau, window.earliest - d).value;
        let after = term.evaluate(&s, tau, window.earliest + d).value;
        assert_eq!(before, 0.0, "{} at tau = {}", term, tau);
        assert!((after - before).abs() < 1e-3, "{} jumps by {}", term, after - before);
    }
}

#[test]
fn test_continuity_at_window_closings() {
    // short pulse so the window closes at a reachable time
    let s = Scatterer::new(Medium::paper(), 0.6).unwrap();
    let t_r = s.transit_time();
    let d = 1e-6;
    for (term, tau) in [
        (ScatteringTerm::R1, -0.4),
        (ScatteringTerm::T2, t_r + 0.3),
        (ScatteringTerm::R3, -0.2),
        (ScatteringTerm::T4, t_r + 0.3),
    ] {
        let window = term.causal_window(tau, t_r, s.pulse_duration()).unwrap();
        let inside = term.evaluate(&s, tau, window.latest - d).value;
        let outside = term.evaluate(&s, tau, window.latest + d).value;
        assert_eq!(outside, 0.0);
        assert!(inside.abs() < 1e-3, "{} at close = {}", term, inside);
    }
}

#[test]
fn test_uncoded_orders_fail() {
    let medium = Medium::paper();
    let x = Array1::linspace(-2.0, -1.0, 3);
    let cfg = QuadratureConfig::default();

    let err = reflected_wave(&medium, &x, 1.0, 100.0, 6, &cfg).unwrap_err();
    assert!(err.is_truncation_error());
    assert!(err.to_string().contains("reflected"));

    let err = transmitted_wave(&medium, &x, 1.0, 100.0, 8, &cfg).unwrap_err();
    assert!(err.is_truncation_error());
    assert!(err.to_string().contains("transmitted"));

    assert!(reflected_wave(&medium, &x, 1.0, 100.0, 4, &cfg).is_ok());
    assert_eq!(Family::Transmitted.max_reflections(), 4);
}

#[test]
fn test_reflected_sum_approaches_sharp_interface_coefficient() {
    let s = paper();
    let t_r = s.transit_time();
    let l = half_log_ratio();
    let tau = -1.0;
    // both R_1 and R_3 fully developed
    let t = 4.0 * t_r - tau + 0.5;

    let r1 = s.term_at(ScatteringTerm::R1, tau, t).value;
    let r3 = s.term_at(ScatteringTerm::R3, tau, t).value;
    assert_abs_diff_eq!(r1, l, epsilon = 1e-12);
    assert_abs_diff_eq!(r3, -l.powi(3) / 3.0, epsilon = 1e-3);

    // tanh L = (Z_r - Z_l) / (Z_r + Z_l) = 1/3, next term is O(L^5)
    let m = s.medium();
    let sharp = reflection_coefficient(m.z_l, m.z_r);
    assert_abs_diff_eq!(sharp, l.tanh(), epsilon = 1e-15);
    assert_abs_diff_eq!(r1 + r3, sharp, epsilon = 2e-3);
    assert!((r1 + r3 - sharp).abs() < (r1 - sharp).abs());
}

#[test]
fn test_transmitted_sum_approaches_sharp_interface_coefficient() {
    let s = paper();
    let t_r = s.transit_time();
    let l = half_log_ratio();
    let x = 1.5;
    let tau = s.characteristic().travel_time(x);
    let t = tau + 4.0 * t_r + 0.5;
    let scale = s.amplitude_scale(x);
    assert_abs_diff_eq!(scale, 2.0f64.sqrt(), epsilon = 1e-14);

    let t0 = s.term_at(ScatteringTerm::T0, tau, t).value;
    let t2 = s.term_at(ScatteringTerm::T2, tau, t).value;
    let t4 = s.term_at(ScatteringTerm::T4, tau, t).value;
    assert_eq!(t0, 1.0);
    assert_abs_diff_eq!(t2, -l * l / 2.0, epsilon = 1e-3);
    assert_abs_diff_eq!(t4, 5.0 * l.powi(4) / 24.0, epsilon = 1e-3);

    // 2 Z_r / (Z_l + Z_r) = sqrt(Z_r / Z_l) sech L = 4/3
    let m = s.medium();
    let sharp = transmission_coefficient(m.z_l, m.z_r);
    assert_abs_diff_eq!(sharp, 4.0 / 3.0, epsilon = 1e-15);
    assert_abs_diff_eq!(scale * (t0 + t2), sharp, epsilon = 6e-3);
    assert_abs_diff_eq!(scale * (t0 + t2 + t4), sharp, epsilon = 2e-3);
}

#[test]
fn test_profiles_scale_with_local_impedance() {
    let s = paper();
    let t = 3.0 * s.transit_time();
    let x = Array1::from(vec![1.2, 1.8]);
    let t0 = s.term_profile(ScatteringTerm::T0, &x, t);
    for v in t0.iter() {
        assert_abs_diff_eq!(*v, 2.0f64.sqrt(), epsilon = 1e-14);
    }
    let reflected = s.reflected(&x, t, 3).unwrap();
    assert_eq!(reflected[0], 0.0);
    assert_eq!(reflected[1], 0.0);
}

#[test]
fn test_perturbed_medium_uses_tabulated_characteristic() {
    let m = Medium::paper()
        .with_oscillation(0.02, 6.0 * std::f64::consts::PI)
        .unwrap();
    let s = Scatterer::new(m, 100.0).unwrap();
    assert!(s.characteristic().is_tabulated());
    let tau = -1.0;
    let t = 2.0 * s.transit_time() - tau + 0.2;
    // sin(k (x_r - x_0)) = 0, so Z(x_r) = Z_r and the saturated R_1 is unchanged
    assert_abs_diff_eq!(
        s.term_at(ScatteringTerm::R1, tau, t).value,
        half_log_ratio(),
        epsilon = 1e-10
    );
}
