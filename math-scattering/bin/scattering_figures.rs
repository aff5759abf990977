//! Scattering figures
//!
//! Evaluates the multi-reflection series for a scenario at every output time
//! and truncation order, runs the finite-volume reference, and writes one
//! plotly HTML file per time plus a JSON file with the error norms.
//!
//! Usage:
//!     cargo run --bin scattering-figures --release -- --orders 0,2,4

use anyhow::Context;
use clap::Parser;
use directories::ProjectDirs;
use fvm::{reflection_coefficient, transmission_coefficient};
use math_scattering::{
    ReferenceFrame, ScenarioConfig, WaveComparison, solve_reference, version,
};
use ndarray::Array1;
use plotly::{
    Layout, Plot, Scatter,
    common::{DashType, Line, Mode, Title},
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// CLI arguments for the scattering figures
#[derive(Parser)]
#[command(name = "scattering-figures")]
#[command(about = "Multi-reflection series against a finite-volume reference")]
struct Args {
    /// Scenario JSON file (defaults to the paper configuration)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for HTML and JSON files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Truncation orders (comma-separated), overrides the scenario
    #[arg(long)]
    orders: Option<String>,

    /// Number of sample positions, overrides the scenario
    #[arg(short, long)]
    points: Option<usize>,

    /// Skip the finite-volume reference
    #[arg(long)]
    no_reference: bool,
}

#[derive(Serialize)]
struct OrderResult {
    order: usize,
    pressure: Vec<f64>,
    reflected: Option<WaveComparison>,
    transmitted: Option<WaveComparison>,
}

#[derive(Serialize)]
struct TimeResult {
    time: f64,
    transit_multiple: f64,
    reference_pressure: Option<Vec<f64>>,
    orders: Vec<OrderResult>,
}

#[derive(Serialize)]
struct Results<'a> {
    version: &'static str,
    scenario: &'a ScenarioConfig,
    transit_time: f64,
    x: Vec<f64>,
    times: Vec<TimeResult>,
}

/// Default output under the per-user cache directory
fn default_output_dir() -> anyhow::Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("org", "spinorama", "math-audio")
        .context("Failed to determine project directories")?;
    Ok(proj_dirs.cache_dir().join("data_generated").join("scattering"))
}

fn parse_orders(list: &str) -> anyhow::Result<Vec<usize>> {
    list.split(',')
        .map(|v| {
            v.trim()
                .parse::<usize>()
                .with_context(|| format!("invalid truncation order '{}'", v))
        })
        .collect()
}

fn select(values: &Array1<f64>, mask: &[bool]) -> Array1<f64> {
    values
        .iter()
        .zip(mask)
        .filter(|&(_, keep)| *keep)
        .map(|(v, _)| *v)
        .collect()
}

fn compare(
    approximation: &Array1<f64>,
    reference: &Array1<f64>,
    mask: &[bool],
    threshold: f64,
) -> anyhow::Result<Option<WaveComparison>> {
    if !mask.iter().any(|&m| m) {
        return Ok(None);
    }
    let cmp = WaveComparison::new(
        &select(approximation, mask),
        &select(reference, mask),
        threshold,
    )?;
    Ok(Some(cmp))
}

fn write_plot(
    path: &std::path::Path,
    x: &Array1<f64>,
    t: f64,
    orders: &[OrderResult],
    reference: Option<&ReferenceFrame>,
) {
    let mut plot = Plot::new();
    let xs = x.to_vec();
    for result in orders {
        let trace = Scatter::new(xs.clone(), result.pressure.clone())
            .mode(Mode::Lines)
            .name(format!("series N = {}", result.order).as_str());
        plot.add_trace(trace);
    }
    if let Some(frame) = reference {
        let trace = Scatter::new(frame.x.to_vec(), frame.p.to_vec())
            .mode(Mode::Lines)
            .name("finite volume")
            .line(Line::new().dash(DashType::Dash));
        plot.add_trace(trace);
    }

    let layout = Layout::new()
        .title(Title::with_text(format!("Pressure at t = {:.4}", t)))
        .x_axis(plotly::layout::Axis::new().title(Title::with_text("x")))
        .y_axis(plotly::layout::Axis::new().title(Title::with_text("p")))
        .legend(plotly::layout::Legend::new().x(0.75).y(0.95));
    plot.set_layout(layout);
    plot.write_html(path);
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ScenarioConfig::from_file(path)
            .with_context(|| format!("Failed to load scenario {}", path.display()))?,
        None => ScenarioConfig::default(),
    };
    if let Some(list) = &args.orders {
        config.orders = parse_orders(list)?;
    }
    if let Some(points) = args.points {
        config.samples.points = points;
    }
    if args.no_reference {
        config.reference = None;
    }
    config.validate()?;

    let output_dir = match args.output_dir {
        Some(dir) => dir,
        None => default_output_dir()?,
    };
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let scatterer = config.scatterer()?;
    let t_r = scatterer.transit_time();
    let times = config.times.resolve(t_r);
    let x = config.samples.positions();
    let medium = config.medium;

    println!("Scattering figures v{}", version());
    println!("=========================");
    println!(
        "t_r = {:.6}, pulse width = {}, {} points, orders {:?}",
        t_r,
        config.pulse_width,
        x.len(),
        config.orders
    );
    println!(
        "sharp-interface limits: R = {:.6}, T = {:.6}",
        reflection_coefficient(medium.z_l, medium.z_r),
        transmission_coefficient(medium.z_l, medium.z_r)
    );

    let reference = match &config.reference {
        Some(rc) => Some(solve_reference(&medium, config.pulse_width, rc, &times)?),
        None => None,
    };

    let left: Vec<bool> = x.iter().map(|&xi| xi < medium.x_0).collect();
    let right: Vec<bool> = x.iter().map(|&xi| xi > medium.x_r).collect();

    let mut time_results = Vec::with_capacity(times.len());
    for (i, &t) in times.iter().enumerate() {
        let frame = reference.as_ref().map(|sol| &sol.frames[i]);
        let (ref_b, ref_a) = match frame {
            Some(f) => (Some(f.left_going_on(&x)), Some(f.right_going_on(&x))),
            None => (None, None),
        };

        let mut orders = Vec::with_capacity(config.orders.len());
        for &order in &config.orders {
            let start = Instant::now();
            let reflected = scatterer.reflected(&x, t, order)?;
            let transmitted = scatterer.transmitted(&x, t, order)?;

            let reflected_cmp = match &ref_b {
                Some(b) => compare(&reflected, b, &left, config.comparison_threshold)?,
                None => None,
            };
            let transmitted_cmp = match &ref_a {
                Some(a) => compare(&transmitted, a, &right, config.comparison_threshold)?,
                None => None,
            };

            print!("t = {:.4} ({:.2} t_r), N = {}: ", t, t / t_r, order);
            match (&reflected_cmp, &transmitted_cmp) {
                (Some(r), Some(tr)) => println!(
                    "reflected max rel {:6.2}%, transmitted max rel {:6.2}% ({:.2?})",
                    r.max_relative_error * 100.0,
                    tr.max_relative_error * 100.0,
                    start.elapsed()
                ),
                _ => println!("evaluated in {:.2?}", start.elapsed()),
            }

            orders.push(OrderResult {
                order,
                pressure: (&reflected + &transmitted).to_vec(),
                reflected: reflected_cmp,
                transmitted: transmitted_cmp,
            });
        }

        let html = output_dir.join(format!("pressure_{:02}.html", i));
        write_plot(&html, &x, t, &orders, frame);
        println!("  Created plot: {}", html.display());

        time_results.push(TimeResult {
            time: t,
            transit_multiple: t / t_r,
            reference_pressure: frame.map(|f| f.pressure_on(&x).to_vec()),
            orders,
        });
    }

    let results = Results {
        version: version(),
        scenario: &config,
        transit_time: t_r,
        x: x.to_vec(),
        times: time_results,
    };
    let json_path = output_dir.join("scattering_results.json");
    let json = serde_json::to_string_pretty(&results)?;
    std::fs::write(&json_path, json)?;
    println!("\nFull results saved to: {}", json_path.display());

    Ok(())
}
