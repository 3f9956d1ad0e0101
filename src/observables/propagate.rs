//! Per-point propagation from shift pairs to nuclear observables.

use rayon::prelude::*;

use crate::domain::{MuSolution, NuclearObservable, TransitionConstants};
use crate::error::AppError;
use crate::observables::quadratic::{self, APPROX_ZERO};

/// Compute one `NuclearObservable` per isotope-pair data point.
///
/// `shift_a` and `shift_b` are parallel sequences. Points are independent, so
/// they are evaluated in parallel; the output order matches the input order.
///
/// Degenerate or rootless points come back as explicit undefined variants,
/// never as errors. The only error is mismatched input lengths.
pub fn propagate(
    shift_a: &[f64],
    shift_b: &[f64],
    ca: &TransitionConstants,
    cb: &TransitionConstants,
) -> Result<Vec<NuclearObservable>, AppError> {
    if shift_a.len() != shift_b.len() {
        return Err(AppError::invalid(format!(
            "Shift sequences have mismatched lengths: {} vs {}.",
            shift_a.len(),
            shift_b.len()
        )));
    }

    Ok(shift_a
        .par_iter()
        .zip(shift_b.par_iter())
        .map(|(&a, &b)| observable_for_point(a, b, ca, cb))
        .collect())
}

fn observable_for_point(
    shift_a: f64,
    shift_b: f64,
    ca: &TransitionConstants,
    cb: &TransitionConstants,
) -> NuclearObservable {
    let coeffs = quadratic::coefficients(shift_a, shift_b, ca, cb);
    let mu = quadratic::solve(&coeffs);

    let delta_r2 = match mu {
        MuSolution::Solved(m) => {
            let denominator = ca.f + ca.h * m;
            if denominator.abs() < APPROX_ZERO {
                None
            } else {
                Some((shift_a - ca.k_ms * m - ca.g * m * m) / denominator)
            }
        }
        MuSolution::Degenerate | MuSolution::NoRealRoot => None,
    };

    NuclearObservable { mu, delta_r2 }
}
