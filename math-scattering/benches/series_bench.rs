use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use math_scattering::{Medium, QuadratureConfig, Scatterer, ScatteringTerm, integrate_2d};
use ndarray::Array1;

fn bench_terms(c: &mut Criterion) {
    let scatterer = Scatterer::new(Medium::paper(), 100.0).unwrap();
    let t = 3.0 * scatterer.transit_time();
    let left = Array1::linspace(-3.5, -0.25, 16);
    let right = Array1::linspace(1.2, 2.2, 16);

    let mut group = c.benchmark_group("series_term_profile");
    for term in ScatteringTerm::ALL {
        let x = if term.reflections() % 2 == 0 { &right } else { &left };
        group.bench_with_input(BenchmarkId::from_parameter(term), &term, |b, &term| {
            b.iter(|| black_box(scatterer.term_profile(term, x, black_box(t))))
        });
    }
    group.finish();
}

fn bench_reflected_orders(c: &mut Criterion) {
    let scatterer = Scatterer::new(Medium::paper(), 100.0).unwrap();
    let t = 3.0 * scatterer.transit_time();
    let x = Array1::linspace(-3.5, -0.25, 32);

    let mut group = c.benchmark_group("reflected_wave");
    for order in [1usize, 3] {
        group.bench_with_input(BenchmarkId::from_parameter(order), &order, |b, &order| {
            b.iter(|| black_box(scatterer.reflected(&x, t, order).unwrap()))
        });
    }
    group.finish();
}

fn bench_quadrature(c: &mut Criterion) {
    let cfg = QuadratureConfig::with_tolerance(1e-8);
    c.bench_function("integrate_2d_triangle", |b| {
        b.iter(|| {
            black_box(integrate_2d(
                |x: f64, y: f64| (x * y).sin(),
                0.0,
                black_box(1.0),
                |_| 0.0,
                |x| x,
                &cfg,
            ))
        })
    });
}

criterion_group!(benches, bench_terms, bench_reflected_orders, bench_quadrature);
criterion_main!(benches);
