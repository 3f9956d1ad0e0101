//! Parameter covariance for the weighted nonlinear fit.
//!
//! With residuals already scaled by absolute per-point sigmas, the parameter
//! covariance at the solution is `(J^T J)^-1` for the weighted Jacobian `J`.
//! No additional scaling by the residual variance is applied: the sigmas are
//! measurement uncertainties, not relative weights.
//!
//! Implementation choices:
//! - We invert via an SVD pseudo-inverse rather than a direct inverse, since
//!   near-degenerate parameter combinations (e.g., gamma and eta on narrow
//!   shift ranges) can make `J^T J` ill-conditioned.
//! - Progressively looser tolerances are tried before giving up.

use nalgebra::{Dyn, Matrix4, OMatrix, U4};

/// Covariance `(J^T J)^-1` from the weighted Jacobian at the best fit.
///
/// Returns `None` if the system is too ill-conditioned to invert robustly.
pub fn covariance_from_jacobian(jacobian: &OMatrix<f64, Dyn, U4>) -> Option<Matrix4<f64>> {
    let jtj: Matrix4<f64> = jacobian.transpose() * jacobian;

    for &tol in &[1e-12, 1e-9, 1e-6] {
        if let Ok(cov) = jtj.svd(true, true).pseudo_inverse(tol) {
            if cov.iter().all(|v| v.is_finite()) {
                return Some(cov);
            }
        }
    }

    None
}

/// Standard errors: square roots of the covariance diagonal.
///
/// A tiny negative diagonal entry can appear from rounding; it is clamped to
/// zero rather than producing NaN.
pub fn standard_errors(covariance: &Matrix4<f64>) -> [f64; 4] {
    let mut out = [0.0; 4];
    for (i, e) in out.iter_mut().enumerate() {
        *e = covariance[(i, i)].max(0.0).sqrt();
    }
    out
}
