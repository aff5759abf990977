//! Grid convergence of the wave-propagation solver
//!
//! A smooth right-going pulse crosses a periodic domain once and is compared
//! with its initial state.

use math_fvm::{
    AcousticMaterial, AcousticSolver, BoundaryCondition, Grid1D, Limiter, SolverConfig,
};

fn pulse(x: f64) -> f64 {
    (-40.0 * x * x).exp()
}

fn periodic_error(cells: usize, limiter: Limiter) -> f64 {
    let (c, z) = (1.0, 1.5);
    let grid = Grid1D::new(-1.0, 1.0, cells).unwrap();
    let material = AcousticMaterial::uniform(cells, c, z).unwrap();
    let config = SolverConfig {
        cfl: 0.5,
        limiter,
        lower: BoundaryCondition::Periodic,
        upper: BoundaryCondition::Periodic,
        ..Default::default()
    };
    let mut solver = AcousticSolver::new(grid, &material, config).unwrap();
    solver.set_initial(|x| {
        let p = pulse(x);
        (p, p / z)
    });
    // one full period
    solver.run_to(2.0 / c).unwrap();
    let frame = solver.frame();

    let dx = 2.0 / cells as f64;
    frame
        .x
        .iter()
        .zip(frame.p.iter())
        .map(|(&x, &p)| (p - pulse(x)).abs() * dx)
        .sum()
}

#[test]
fn test_lax_wendroff_is_second_order() {
    let coarse = periodic_error(100, Limiter::None);
    let fine = periodic_error(200, Limiter::None);
    let finer = periodic_error(400, Limiter::None);
    println!("L1 errors: {:.3e} {:.3e} {:.3e}", coarse, fine, finer);
    assert!(coarse / fine > 3.0, "ratio {}", coarse / fine);
    assert!(fine / finer > 3.0, "ratio {}", fine / finer);
}

#[test]
fn test_upwind_is_first_order() {
    let coarse = periodic_error(200, Limiter::Upwind);
    let fine = periodic_error(400, Limiter::Upwind);
    let ratio = coarse / fine;
    assert!(ratio > 1.5 && ratio < 2.5, "ratio {}", ratio);
}

#[test]
fn test_limiters_beat_upwind() {
    let upwind = periodic_error(200, Limiter::Upwind);
    for limiter in [Limiter::Minmod, Limiter::Mc, Limiter::VanLeer, Limiter::Superbee] {
        let err = periodic_error(200, limiter);
        assert!(err < 0.5 * upwind, "{:?}: {} vs upwind {}", limiter, err, upwind);
    }
}
