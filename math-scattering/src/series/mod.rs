//! Multiple-reflection series for the scattered pulse
//!
//! A right-going square pulse of width `w` enters the transition region
//! from the left. Splitting pressure into characteristic amplitudes
//! `A = (p + Z u)/2` and `B = (p - Z u)/2`, the field behind the
//! transition is expanded by the number of internal reflections:
//!
//! ```text
//! transmitted  A ≈ T_0 + T_2 + T_4 + ...   (even reflection counts)
//! reflected    B ≈ R_1 + R_3 + ...         (odd reflection counts)
//! ```
//!
//! Each term is an iterated integral over the reflection points along the
//! characteristic, evaluated with [`crate::quadrature`].
//!
//! # Truncation
//!
//! An order `N` keeps every term with at most `N` reflections in the
//! requested family. Reflected waves are coded up to three reflections and
//! transmitted waves up to four; asking for an order that would need the
//! next uncoded term is an error.

mod terms;

use crate::characteristic::Characteristic;
use crate::error::{Result, ScatteringError};
use crate::medium::Medium;
use crate::quadrature::{QuadratureConfig, QuadratureResult};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Direction family of a scattered wave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// Left-going, odd reflection counts
    Reflected,
    /// Right-going, even reflection counts
    Transmitted,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Reflected => write!(f, "reflected"),
            Family::Transmitted => write!(f, "transmitted"),
        }
    }
}

impl Family {
    /// Highest reflection count with a coded term
    pub fn max_reflections(self) -> usize {
        match self {
            Family::Reflected => 3,
            Family::Transmitted => 4,
        }
    }

    /// Terms of this family with at most `order` reflections
    pub fn terms(self, order: usize) -> Result<Vec<ScatteringTerm>> {
        let max = self.max_reflections();
        if order >= max + 2 {
            return Err(ScatteringError::TruncationOrder {
                family: self,
                requested: order,
                max,
            });
        }
        Ok((0..=order)
            .filter_map(ScatteringTerm::from_reflections)
            .filter(|term| term.family() == self)
            .collect())
    }
}

/// One term of the series, named by its reflection count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScatteringTerm {
    /// Incident pulse carried straight through
    T0,
    /// Single reflection
    R1,
    /// Double reflection
    T2,
    /// Triple reflection
    R3,
    /// Quadruple reflection
    T4,
}

/// Time interval outside which a term vanishes identically
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CausalWindow {
    /// First time the term can be nonzero
    pub earliest: f64,
    /// Last time the term can be nonzero
    pub latest: f64,
}

impl CausalWindow {
    /// Closed-interval membership, measured in elapsed causal time
    #[inline]
    pub fn contains(&self, t: f64) -> bool {
        let elapsed = self.elapsed(t);
        elapsed >= 0.0 && elapsed <= self.span()
    }

    /// Time since the window opened
    #[inline]
    pub fn elapsed(&self, t: f64) -> f64 {
        t - self.earliest
    }

    /// Length of the window
    #[inline]
    pub fn span(&self) -> f64 {
        self.latest - self.earliest
    }
}

impl ScatteringTerm {
    /// All coded terms in increasing reflection count
    pub const ALL: [ScatteringTerm; 5] = [
        ScatteringTerm::T0,
        ScatteringTerm::R1,
        ScatteringTerm::T2,
        ScatteringTerm::R3,
        ScatteringTerm::T4,
    ];

    /// Number of internal reflections
    pub fn reflections(self) -> usize {
        match self {
            ScatteringTerm::T0 => 0,
            ScatteringTerm::R1 => 1,
            ScatteringTerm::T2 => 2,
            ScatteringTerm::R3 => 3,
            ScatteringTerm::T4 => 4,
        }
    }

    /// Term with the given reflection count, if coded
    pub fn from_reflections(k: usize) -> Option<Self> {
        Self::ALL.get(k).copied()
    }

    pub fn family(self) -> Family {
        if self.reflections() % 2 == 0 {
            Family::Transmitted
        } else {
            Family::Reflected
        }
    }

    /// Short label such as `"R_3"`
    pub fn label(self) -> String {
        let prefix = match self.family() {
            Family::Reflected => 'R',
            Family::Transmitted => 'T',
        };
        format!("{}_{}", prefix, self.reflections())
    }

    /// Support in time at travel-time coordinate `tau`.
    ///
    /// `None` when the term is zero for all `t` there: reflected terms right
    /// of the transition and transmitted terms (past the direct pulse) left
    /// of it.
    pub fn causal_window(self, tau: f64, transit: f64, pulse: f64) -> Option<CausalWindow> {
        let k = self.reflections();
        if k == 0 {
            return Some(CausalWindow {
                earliest: tau,
                latest: tau + pulse,
            });
        }
        if k % 2 == 1 {
            if tau >= transit {
                return None;
            }
            Some(CausalWindow {
                earliest: 2.0 * tau.max(0.0) - tau,
                latest: pulse + (k + 1) as f64 * transit - tau,
            })
        } else {
            if tau <= 0.0 {
                return None;
            }
            Some(CausalWindow {
                earliest: tau,
                latest: tau + pulse + k as f64 * transit,
            })
        }
    }

    /// Normalised amplitude at travel time `tau`, zero outside the causal window
    pub fn evaluate(self, scatterer: &Scatterer, tau: f64, t: f64) -> QuadratureResult {
        scatterer.term_at(self, tau, t)
    }
}

impl fmt::Display for ScatteringTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Evaluator of the series for one medium and pulse
#[derive(Debug, Clone)]
pub struct Scatterer {
    medium: Medium,
    characteristic: Characteristic,
    t_r: f64,
    /// Pulse duration `W = w / c_l` in travel time
    pulse: f64,
    quadrature: QuadratureConfig,
}

impl Scatterer {
    /// Build an evaluator for a square pulse of spatial width `width`
    pub fn new(medium: Medium, width: f64) -> Result<Self> {
        medium.validate()?;
        if !(width.is_finite() && width > 0.0) {
            return Err(ScatteringError::InvalidPulseWidth { width });
        }
        let characteristic = Characteristic::new(&medium);
        let t_r = characteristic.transit_time();
        let pulse = width / medium.c_l;
        log::debug!(
            "scatterer: t_r = {:.6}, pulse duration = {:.6}, tabulated = {}",
            t_r,
            pulse,
            characteristic.is_tabulated()
        );
        Ok(Self {
            medium,
            characteristic,
            t_r,
            pulse,
            quadrature: QuadratureConfig::default(),
        })
    }

    /// Replace the quadrature tolerances
    pub fn with_quadrature(mut self, quadrature: QuadratureConfig) -> Self {
        self.quadrature = quadrature;
        self
    }

    pub fn medium(&self) -> &Medium {
        &self.medium
    }

    pub fn characteristic(&self) -> &Characteristic {
        &self.characteristic
    }

    pub fn quadrature(&self) -> &QuadratureConfig {
        &self.quadrature
    }

    /// Transit time `t_r` across the transition
    pub fn transit_time(&self) -> f64 {
        self.t_r
    }

    /// Pulse duration `W` in travel time
    pub fn pulse_duration(&self) -> f64 {
        self.pulse
    }

    /// Normalised term amplitude at travel time `tau`
    pub fn term_at(&self, term: ScatteringTerm, tau: f64, t: f64) -> QuadratureResult {
        match term.causal_window(tau, self.t_r, self.pulse) {
            Some(window) if window.contains(t) => {}
            _ => return QuadratureResult::zero(),
        }
        match term {
            ScatteringTerm::T0 => self.direct(tau, t),
            ScatteringTerm::R1 => self.single_reflection(tau, t),
            ScatteringTerm::T2 => self.double_reflection(tau, t),
            ScatteringTerm::R3 => self.triple_reflection(tau, t),
            ScatteringTerm::T4 => self.quadruple_reflection(tau, t),
        }
    }

    /// Characteristic amplitude of one term at position `x` and time `t`
    pub fn evaluate(&self, term: ScatteringTerm, x: f64, t: f64) -> f64 {
        let tau = self.characteristic.travel_time(x);
        self.amplitude_scale(x) * self.term_at(term, tau, t).value
    }

    /// `sqrt(Z(x) / Z_l)`, converting normalised to pressure amplitude
    #[inline]
    pub fn amplitude_scale(&self, x: f64) -> f64 {
        (self.medium.impedance(x) / self.medium.z_l).sqrt()
    }

    /// One term sampled on `x`
    pub fn term_profile(&self, term: ScatteringTerm, x: &Array1<f64>, t: f64) -> Array1<f64> {
        let start = Instant::now();
        let mut out = Array1::zeros(x.len());
        let mut evaluations = 0usize;
        let mut unconverged = 0usize;
        for (value, &xi) in out.iter_mut().zip(x.iter()) {
            let tau = self.characteristic.travel_time(xi);
            let result = self.term_at(term, tau, t);
            evaluations += result.evaluations;
            if !result.converged {
                unconverged += 1;
            }
            *value = self.amplitude_scale(xi) * result.value;
        }
        log::debug!(
            "{} at t = {:.4}: {} points, {} integrand evaluations, {} unconverged, {:.2?}",
            term,
            t,
            x.len(),
            evaluations,
            unconverged,
            start.elapsed()
        );
        out
    }

    /// Sum of a family's terms up to `order` reflections
    pub fn family_profile(
        &self,
        family: Family,
        x: &Array1<f64>,
        t: f64,
        order: usize,
    ) -> Result<Array1<f64>> {
        let terms = family.terms(order)?;
        if !t.is_finite() {
            return Err(ScatteringError::Config(format!("time {} is not finite", t)));
        }
        let mut total = Array1::zeros(x.len());
        for term in terms {
            total += &self.term_profile(term, x, t);
        }
        Ok(total)
    }

    /// Left-going amplitude `B` truncated at `order`
    pub fn reflected(&self, x: &Array1<f64>, t: f64, order: usize) -> Result<Array1<f64>> {
        self.family_profile(Family::Reflected, x, t, order)
    }

    /// Right-going amplitude `A` truncated at `order`
    pub fn transmitted(&self, x: &Array1<f64>, t: f64, order: usize) -> Result<Array1<f64>> {
        self.family_profile(Family::Transmitted, x, t, order)
    }

    /// Pressure `p = A + B` with both families truncated at `order`
    pub fn total_pressure(&self, x: &Array1<f64>, t: f64, order: usize) -> Result<Array1<f64>> {
        let reflected = self.reflected(x, t, order)?;
        let transmitted = self.transmitted(x, t, order)?;
        Ok(reflected + transmitted)
    }
}

/// Reflected amplitude on `x` at time `t` for a pulse of width `width`
pub fn reflected_wave(
    medium: &Medium,
    x: &Array1<f64>,
    t: f64,
    width: f64,
    order: usize,
    quadrature: &QuadratureConfig,
) -> Result<Array1<f64>> {
    Scatterer::new(*medium, width)?
        .with_quadrature(*quadrature)
        .reflected(x, t, order)
}

/// Transmitted amplitude on `x` at time `t` for a pulse of width `width`
pub fn transmitted_wave(
    medium: &Medium,
    x: &Array1<f64>,
    t: f64,
    width: f64,
    order: usize,
    quadrature: &QuadratureConfig,
) -> Result<Array1<f64>> {
    Scatterer::new(*medium, width)?
        .with_quadrature(*quadrature)
        .transmitted(x, t, order)
}

/// A single term sampled on `x` at time `t`
pub fn term_profile(
    medium: &Medium,
    term: ScatteringTerm,
    x: &Array1<f64>,
    t: f64,
    width: f64,
    quadrature: &QuadratureConfig,
) -> Result<Array1<f64>> {
    Ok(Scatterer::new(*medium, width)?
        .with_quadrature(*quadrature)
        .term_profile(term, x, t))
}

/// Series pressure on `x` at time `t`
pub fn total_pressure(
    medium: &Medium,
    x: &Array1<f64>,
    t: f64,
    width: f64,
    order: usize,
    quadrature: &QuadratureConfig,
) -> Result<Array1<f64>> {
    Scatterer::new(*medium, width)?
        .with_quadrature(*quadrature)
        .total_pressure(x, t, order)
}
