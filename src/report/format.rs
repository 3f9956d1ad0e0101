//! Residual computation and terminal report formatting.

use crate::domain::{ModelParams, MuSolution, NuclearObservable};
use crate::error::AppError;
use crate::fit::KingFit;
use crate::math::standard_errors;
use crate::models::evaluate;

/// Unweighted residuals `shift_a_i - model(shift_b_i)` for diagnostics.
pub fn compute_residuals(
    shift_b: &[f64],
    shift_a: &[f64],
    params: &ModelParams,
) -> Result<Vec<f64>, AppError> {
    let mut out = Vec::with_capacity(shift_b.len());
    for (&x, &y) in shift_b.iter().zip(shift_a.iter()) {
        let y_fit = evaluate(x, params);
        if !y_fit.is_finite() {
            return Err(AppError::numeric(
                "Non-finite model prediction during residual computation.",
            ));
        }
        out.push(y - y_fit);
    }
    Ok(out)
}

/// Format the fit summary (dataset stats + fitted parameters + quality).
pub fn format_fit_summary(
    shift_b: &[f64],
    fit: &KingFit,
    truth: Option<&ModelParams>,
) -> String {
    let mut out = String::new();

    out.push_str("=== kingfit - Nonlinear King Plot Fit ===\n");

    let (lo, hi) = range_of(shift_b);
    out.push_str(&format!(
        "Points: n={} | shift_b=[{lo:.2}, {hi:.2}] MHz\n",
        shift_b.len()
    ));

    if let Some(t) = truth {
        out.push_str(&format!(
            "True parameters: alpha={} beta={} gamma={} eta={}\n",
            t.alpha, t.beta, t.gamma, t.eta
        ));
    }

    let p = &fit.params;
    let errs = standard_errors(&fit.covariance);
    out.push_str("Fitted parameters:\n");
    out.push_str(&format!("  alpha = {:.4} +/- {:.4}\n", p.alpha, errs[0]));
    out.push_str(&format!("  beta  = {:.2} +/- {:.2}\n", p.beta, errs[1]));
    out.push_str(&format!("  gamma = {:.6} +/- {:.6}\n", p.gamma, errs[2]));
    out.push_str(&format!("  eta   = {:.6} +/- {:.6}\n", p.eta, errs[3]));

    out.push_str(&format!(
        "Quality: chi2={:.3} | reduced={:.3} | n={}\n",
        fit.quality.chi2, fit.quality.reduced_chi2, fit.quality.n
    ));

    out
}

/// Format the per-point nuclear observables table.
pub fn format_observables(observables: &[NuclearObservable]) -> String {
    let mut out = String::new();

    out.push_str("Nuclear observables per isotope pair:\n");
    out.push_str(&format!("{:>14} {:>18}\n", "mu_ij", "delta<r^2>_ij"));
    out.push_str(&format!("{:->14} {:->18}\n", "", ""));

    for obs in observables {
        match (obs.mu, obs.delta_r2) {
            (MuSolution::Solved(mu), Some(r2)) => {
                out.push_str(&format!("{mu:>14.6} {r2:>18.6}\n"));
            }
            (MuSolution::Solved(mu), None) => {
                out.push_str(&format!("{mu:>14.6} {:>18}\n", "(undefined)"));
            }
            (MuSolution::Degenerate, _) => {
                out.push_str(&format!("{:>14} {:>18}\n", "(degenerate)", "-"));
            }
            (MuSolution::NoRealRoot, _) => {
                out.push_str(&format!("{:>14} {:>18}\n", "(no real root)", "-"));
            }
        }
    }

    out
}

/// Format a short residual summary line.
pub fn format_residual_summary(residuals: &[f64]) -> String {
    let (lo, hi) = range_of(residuals);
    let rms = if residuals.is_empty() {
        0.0
    } else {
        (residuals.iter().map(|r| r * r).sum::<f64>() / residuals.len() as f64).sqrt()
    };
    format!("Residuals: rms={rms:.3} | range=[{lo:.3}, {hi:.3}] MHz\n")
}

/// Format a model-evaluation table for the `eval` subcommand.
pub fn format_eval_table(shift_b: &[f64], values: &[f64]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>12} {:>14}\n", "shift_b", "shift_a_model"));
    out.push_str(&format!("{:->12} {:->14}\n", "", ""));
    for (&x, &y) in shift_b.iter().zip(values.iter()) {
        if y.is_finite() {
            out.push_str(&format!("{x:>12.4} {y:>14.4}\n"));
        } else {
            out.push_str(&format!("{x:>12.4} {:>14}\n", "(pole)"));
        }
    }
    out
}

fn range_of(values: &[f64]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if lo > hi { (0.0, 0.0) } else { (lo, hi) }
}
