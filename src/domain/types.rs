//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - reloaded later for standalone model evaluation

use std::path::PathBuf;

use nalgebra::Vector4;
use serde::{Deserialize, Serialize};

/// Parameters of the nonlinear King-plot curve
/// `y = alpha*x + beta + gamma*x^2 / (1 + eta*x)`.
///
/// Produced by the fit orchestrator; immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub eta: f64,
}

impl ModelParams {
    pub fn new(alpha: f64, beta: f64, gamma: f64, eta: f64) -> Self {
        Self { alpha, beta, gamma, eta }
    }

    /// Pack into the parameter vector layout used by the optimizer.
    pub fn to_vector(self) -> Vector4<f64> {
        Vector4::new(self.alpha, self.beta, self.gamma, self.eta)
    }

    pub fn from_vector(v: &Vector4<f64>) -> Self {
        Self {
            alpha: v[0],
            beta: v[1],
            gamma: v[2],
            eta: v[3],
        }
    }

    pub fn is_finite(&self) -> bool {
        self.alpha.is_finite() && self.beta.is_finite() && self.gamma.is_finite() && self.eta.is_finite()
    }
}

/// Default optimizer starting point for King-plot fits.
///
/// Deliberately far from typical true values: the fit has to earn convergence
/// from a generic guess, mirroring how the analysis is run on real data where
/// the curvature terms are unknown a priori.
pub const DEFAULT_INITIAL_GUESS: ModelParams = ModelParams {
    alpha: 1.0,
    beta: 50.0,
    gamma: 0.0,
    eta: 0.0,
};

/// Mass- and field-shift coefficients (K_ms, F, G, H) for one transition.
///
/// Caller-supplied and constant for the lifetime of an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionConstants {
    pub k_ms: f64,
    pub f: f64,
    pub g: f64,
    pub h: f64,
}

impl TransitionConstants {
    pub fn new(k_ms: f64, f: f64, g: f64, h: f64) -> Self {
        Self { k_ms, f, g, h }
    }
}

/// Coefficients of the per-point quadratic `A*mu^2 + B*mu + C = 0` in the
/// mass-scaling ratio. Transient; recomputed for every data point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// Outcome of solving the per-point quadratic for the mass-scaling ratio.
///
/// Tagged variants instead of NaN sentinels so downstream code cannot silently
/// feed an undefined value into a further computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MuSolution {
    /// The physically admissible root.
    Solved(f64),
    /// `A ~ 0` and `B ~ 0`: the two equations coincide or are inconsistent at
    /// this order, so there is no unique solution.
    Degenerate,
    /// Negative discriminant.
    NoRealRoot,
}

impl MuSolution {
    pub fn value(self) -> Option<f64> {
        match self {
            MuSolution::Solved(v) => Some(v),
            MuSolution::Degenerate | MuSolution::NoRealRoot => None,
        }
    }

    pub fn is_defined(self) -> bool {
        matches!(self, MuSolution::Solved(_))
    }
}

/// Per-point nuclear-structure result.
///
/// `delta_r2` is `None` when the charge-radius denominator vanishes or the
/// mass-scaling ratio itself is undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NuclearObservable {
    pub mu: MuSolution,
    pub delta_r2: Option<f64>,
}

/// Fit quality diagnostics for a weighted nonlinear fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitQuality {
    /// Sum of squared sigma-weighted residuals.
    pub chi2: f64,
    /// `chi2 / (n - 4)`.
    pub reduced_chi2: f64,
    pub n: usize,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// True parameters used to synthesize the dataset.
    pub truth: ModelParams,
    /// Number of isotope-pair points to generate.
    pub points: usize,
    /// Transition-b shift range (MHz), evenly sampled.
    pub range_min: f64,
    pub range_max: f64,
    /// Gaussian noise standard deviation added to transition-a shifts (MHz).
    /// Zero means a noise-free dataset.
    pub noise_sigma: f64,
    /// Random seed for noise generation.
    pub seed: u64,

    pub constants_a: TransitionConstants,
    pub constants_b: TransitionConstants,

    /// Optimizer starting point.
    pub initial_guess: ModelParams,

    pub export_results: Option<PathBuf>,
    pub export_params: Option<PathBuf>,
}
