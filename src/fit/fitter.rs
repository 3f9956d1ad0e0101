//! Fit orchestration: drive the external optimizer, extract results.
//!
//! Given:
//! - transition-b shifts `x_i` (independent variable)
//! - transition-a shifts `y_i` (dependent variable)
//! - per-point standard deviations `sigma_i` (absolute)
//! - an initial parameter guess
//!
//! we run one Levenberg-Marquardt minimization and return the fitted
//! parameters with their covariance matrix. Non-convergence is a hard,
//! caller-visible error: retrying with identical inputs is deterministic and
//! cannot change the outcome, so a caller wishing to retry must vary the
//! initial guess.

use levenberg_marquardt::{LeastSquaresProblem, LevenbergMarquardt};
use nalgebra::Matrix4;

use crate::domain::{FitQuality, ModelParams};
use crate::error::AppError;
use crate::fit::problem::KingProblem;
use crate::math::covariance_from_jacobian;

/// Minimum number of extra observations beyond parameter count.
const MIN_N_BUFFER: usize = 5;

/// Number of fitted parameters (alpha, beta, gamma, eta).
const N_PARAMS: usize = 4;

/// Result of a converged King-plot fit.
#[derive(Debug, Clone)]
pub struct KingFit {
    pub params: ModelParams,
    /// 4x4 symmetric parameter covariance; standard errors are the square
    /// roots of its diagonal.
    pub covariance: Matrix4<f64>,
    pub quality: FitQuality,
}

/// Fit the nonlinear King-plot model to one isotope-pair dataset.
pub fn fit(
    shift_b: &[f64],
    shift_a: &[f64],
    sigma: &[f64],
    initial_guess: &ModelParams,
) -> Result<KingFit, AppError> {
    let n = shift_b.len();
    if shift_a.len() != n || sigma.len() != n {
        return Err(AppError::invalid(format!(
            "Input lengths disagree: shift_b={n}, shift_a={}, sigma={}.",
            shift_a.len(),
            sigma.len()
        )));
    }
    if n < N_PARAMS + MIN_N_BUFFER {
        return Err(AppError::data(format!(
            "Underdetermined fit: n={n} < {}.",
            N_PARAMS + MIN_N_BUFFER
        )));
    }
    if shift_b.iter().chain(shift_a.iter()).any(|v| !v.is_finite()) {
        return Err(AppError::invalid("Non-finite shift value in fit input."));
    }
    if sigma.iter().any(|s| !s.is_finite() || *s <= 0.0) {
        return Err(AppError::invalid(
            "Sigmas must be finite and positive (absolute uncertainties).",
        ));
    }
    if !initial_guess.is_finite() {
        return Err(AppError::invalid("Non-finite initial guess."));
    }

    let problem = KingProblem::new(shift_b, shift_a, sigma, initial_guess.to_vector());
    let (problem, report) = LevenbergMarquardt::new().minimize(problem);

    if !report.termination.was_successful() {
        return Err(AppError::numeric(format!(
            "Fit did not converge: {:?} (after {} evaluations).",
            report.termination, report.number_of_evaluations
        )));
    }

    let params = ModelParams::from_vector(&problem.params());
    if !params.is_finite() {
        return Err(AppError::numeric("Optimizer returned non-finite parameters."));
    }

    // Recompute the weighted residual norm at the solution rather than trusting
    // the optimizer's internal bookkeeping conventions.
    let residuals = problem
        .residuals()
        .ok_or_else(|| AppError::numeric("Residuals undefined at the fitted parameters."))?;
    let chi2 = residuals.norm_squared();

    let jacobian = problem
        .jacobian()
        .ok_or_else(|| AppError::numeric("Jacobian undefined at the fitted parameters."))?;
    let covariance = covariance_from_jacobian(&jacobian)
        .ok_or_else(|| AppError::numeric("Covariance matrix is singular at the solution."))?;

    let dof = (n - N_PARAMS) as f64;
    Ok(KingFit {
        params,
        covariance,
        quality: FitQuality {
            chi2,
            reduced_chi2: chi2 / dof,
            n,
        },
    })
}
