//! Right-going characteristic through the transition region
//!
//! `X(t)` solves `dX/dt = c(X)` from `X(0) = x_0`, and `T(x)` is its inverse.
//! For a linear sound speed `c(x) = c_l + s (x - x_0)` both are closed form:
//!
//! ```text
//! X(t) = x_0 + c_l (e^{s t} - 1) / s
//! T(x) = ln(c(x) / c_l) / s
//! ```
//!
//! Any other profile (a perturbed medium) falls back to an RK4 table of
//! `(t, X)` pairs with piecewise-linear interpolation in both directions.

use crate::medium::Medium;

/// Default number of RK4 steps across the transition for tabulated maps
pub const DEFAULT_TABLE_STEPS: usize = 4000;

#[derive(Debug, Clone)]
enum Map {
    Linear { slope: f64 },
    Tabulated { times: Vec<f64>, positions: Vec<f64> },
}

/// Characteristic map `X(t)` / `T(x)` for one medium
#[derive(Debug, Clone)]
pub struct Characteristic {
    map: Map,
    x_0: f64,
    x_r: f64,
    c_l: f64,
    c_r: f64,
    t_r: f64,
}

impl Characteristic {
    /// Closed form when `c` is linear, tabulated otherwise
    pub fn new(medium: &Medium) -> Self {
        if medium.is_linear() {
            Self::closed_form(medium)
        } else {
            Self::tabulated(medium, DEFAULT_TABLE_STEPS)
        }
    }

    /// Closed-form map; only exact when `medium.is_linear()`
    pub fn closed_form(medium: &Medium) -> Self {
        let slope = medium.speed_slope();
        let t_r = if slope == 0.0 {
            medium.width() / medium.c_l
        } else {
            (medium.c_r / medium.c_l).ln() / slope
        };
        Self {
            map: Map::Linear { slope },
            x_0: medium.x_0,
            x_r: medium.x_r,
            c_l: medium.c_l,
            c_r: medium.c_r,
            t_r,
        }
    }

    /// Integrate `dX/dt = c(X)` with RK4 and tabulate the result
    pub fn tabulated(medium: &Medium, steps: usize) -> Self {
        let steps = steps.max(16);
        let c_max = medium.c_l.max(medium.c_r) + medium.oscillation.amplitude.abs();
        let dt = medium.width() / (c_max * steps as f64);
        let rhs = |x: f64| medium.sound_speed(x);

        let mut times = vec![0.0];
        let mut positions = vec![medium.x_0];
        let (mut t, mut x) = (0.0, medium.x_0);
        loop {
            let k1 = rhs(x);
            let k2 = rhs(x + 0.5 * dt * k1);
            let k3 = rhs(x + 0.5 * dt * k2);
            let k4 = rhs(x + dt * k3);
            let x_next = x + dt / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4);

            if x_next >= medium.x_r {
                // land the last sample exactly on x_r
                let frac = (medium.x_r - x) / (x_next - x);
                times.push(t + frac * dt);
                positions.push(medium.x_r);
                break;
            }
            t += dt;
            x = x_next;
            times.push(t);
            positions.push(x);
        }

        let t_r = times[times.len() - 1];
        log::debug!(
            "tabulated characteristic: {} samples, t_r = {:.8}",
            times.len(),
            t_r
        );

        Self {
            map: Map::Tabulated { times, positions },
            x_0: medium.x_0,
            x_r: medium.x_r,
            c_l: medium.c_l,
            c_r: medium.c_r,
            t_r,
        }
    }

    /// Transit time `t_r = T(x_r)` across the transition
    #[inline]
    pub fn transit_time(&self) -> f64 {
        self.t_r
    }

    /// True when the map comes from the numerical table
    pub fn is_tabulated(&self) -> bool {
        matches!(self.map, Map::Tabulated { .. })
    }

    /// `X(t)`, clamped to `x_0` for `t ≤ 0` and to `x_r` for `t ≥ t_r`
    pub fn position(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return self.x_0;
        }
        if t >= self.t_r {
            return self.x_r;
        }
        match &self.map {
            Map::Linear { slope } => {
                if *slope == 0.0 {
                    self.x_0 + self.c_l * t
                } else {
                    self.x_0 + self.c_l * (slope * t).exp_m1() / slope
                }
            }
            Map::Tabulated { times, positions } => interpolate(times, positions, t),
        }
    }

    /// `T(x)`, clamped to `[0, t_r]`
    pub fn time(&self, x: f64) -> f64 {
        if x <= self.x_0 {
            return 0.0;
        }
        if x >= self.x_r {
            return self.t_r;
        }
        match &self.map {
            Map::Linear { slope } => {
                if *slope == 0.0 {
                    (x - self.x_0) / self.c_l
                } else {
                    (slope * (x - self.x_0) / self.c_l).ln_1p() / slope
                }
            }
            Map::Tabulated { times, positions } => interpolate(positions, times, x),
        }
    }

    /// Travel-time coordinate `τ(x)`, extended linearly outside the transition
    pub fn travel_time(&self, x: f64) -> f64 {
        if x < self.x_0 {
            (x - self.x_0) / self.c_l
        } else if x > self.x_r {
            self.t_r + (x - self.x_r) / self.c_r
        } else {
            self.time(x)
        }
    }
}

/// Piecewise-linear interpolation on increasing `xs`
fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let i = xs.partition_point(|&v| v <= x);
    if i == 0 {
        return ys[0];
    }
    if i >= xs.len() {
        return ys[ys.len() - 1];
    }
    let (x0, x1) = (xs[i - 1], xs[i]);
    let w = if x1 > x0 { (x - x0) / (x1 - x0) } else { 0.0 };
    ys[i - 1] + w * (ys[i] - ys[i - 1])
}
