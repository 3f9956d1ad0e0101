//! The nonlinear King-plot model and its pole guard.
//!
//! The model is:
//!
//! ```text
//! y(x) = alpha*x + beta + gamma*x^2 / (1 + eta*x)
//! ```
//!
//! where `x` is the isotope shift of transition b and `y` the predicted shift
//! of transition a. The rational term has a pole at `x = -1/eta`; near it the
//! model value is defined as positive infinity rather than risking NaN or
//! overflow from a near-zero division. A fit whose parameters place the pole
//! inside the data range then sees an untameably large residual, which is the
//! intended penalty.

use crate::domain::ModelParams;

/// Pole guard threshold on `|1 + eta*x|`.
pub const POLE_EPS: f64 = 1e-9;

/// Evaluate the model at a single transition-b shift.
///
/// Pure; never panics for finite numeric input. Returns `+inf` when the
/// denominator is within [`POLE_EPS`] of zero.
pub fn evaluate(shift_b: f64, params: &ModelParams) -> f64 {
    let denom = 1.0 + params.eta * shift_b;
    if denom.abs() < POLE_EPS {
        return f64::INFINITY;
    }
    params.alpha * shift_b + params.beta + params.gamma * shift_b * shift_b / denom
}

/// Evaluate the model elementwise over a sequence of transition-b shifts.
///
/// Delegates to [`evaluate`] so the scalar and sequence paths cannot disagree
/// on the pole guard.
pub fn evaluate_all(shift_b: &[f64], params: &ModelParams) -> Vec<f64> {
    shift_b.iter().map(|&x| evaluate(x, params)).collect()
}

/// Partial derivatives of the model with respect to (alpha, beta, gamma, eta).
///
/// Returns `None` at the pole, where the derivatives are undefined.
pub fn gradient(shift_b: f64, params: &ModelParams) -> Option<[f64; 4]> {
    let denom = 1.0 + params.eta * shift_b;
    if denom.abs() < POLE_EPS {
        return None;
    }
    let x2 = shift_b * shift_b;
    Some([
        shift_b,
        1.0,
        x2 / denom,
        -params.gamma * x2 * shift_b / (denom * denom),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(alpha: f64, beta: f64, gamma: f64, eta: f64) -> ModelParams {
        ModelParams::new(alpha, beta, gamma, eta)
    }

    #[test]
    fn evaluate_matches_closed_form_away_from_pole() {
        let p = params(1.15, 80.0, -0.0015, 0.0005);
        let x = 200.0;
        let expected = 1.15 * x + 80.0 + (-0.0015) * x * x / (1.0 + 0.0005 * x);
        assert!((evaluate(x, &p) - expected).abs() < 1e-12);
    }

    #[test]
    fn evaluate_returns_infinity_at_pole() {
        // eta = 0.0005 puts the pole at x = -2000.
        let p = params(1.0, 0.0, 1.0, 0.0005);
        assert_eq!(evaluate(-2000.0, &p), f64::INFINITY);

        // Just inside the guard band.
        let x_near = (-1.0 + 0.5e-9) / 0.0005;
        assert_eq!(evaluate(x_near, &p), f64::INFINITY);

        // Just outside the guard band the value is finite.
        let x_out = (-1.0 + 1e-6) / 0.0005;
        assert!(evaluate(x_out, &p).is_finite());
    }

    #[test]
    fn scalar_and_sequence_paths_agree() {
        let p = params(1.2, 75.0, -0.002, 0.0003);
        let xs = [-2000.0 / 0.6, -500.0, 0.0, 250.0, 500.0];
        let ys = evaluate_all(&xs, &p);
        assert_eq!(ys.len(), xs.len());
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            let scalar = evaluate(x, &p);
            if scalar.is_finite() {
                assert_eq!(y, scalar);
            } else {
                assert_eq!(y, f64::INFINITY);
            }
        }
    }

    #[test]
    fn sequence_path_flags_only_pole_elements() {
        let p = params(1.0, 0.0, 1.0, 0.001);
        // Pole at -1000; the other elements must stay finite.
        let ys = evaluate_all(&[-1000.0, 0.0, 100.0], &p);
        assert_eq!(ys[0], f64::INFINITY);
        assert!(ys[1].is_finite());
        assert!(ys[2].is_finite());
    }

    #[test]
    fn gradient_matches_finite_differences() {
        let p = params(1.15, 80.0, -0.0015, 0.0005);
        let x = 350.0;
        let g = gradient(x, &p).unwrap();

        let h = 1e-7;
        let bump = |dp: [f64; 4]| {
            params(
                p.alpha + dp[0],
                p.beta + dp[1],
                p.gamma + dp[2],
                p.eta + dp[3],
            )
        };
        for i in 0..4 {
            let mut dp = [0.0; 4];
            dp[i] = h;
            let plus = evaluate(x, &bump(dp));
            dp[i] = -h;
            let minus = evaluate(x, &bump(dp));
            let fd = (plus - minus) / (2.0 * h);
            let scale = g[i].abs().max(1.0);
            assert!(
                (g[i] - fd).abs() / scale < 1e-4,
                "param {i}: analytic {} vs fd {fd}",
                g[i]
            );
        }
    }

    #[test]
    fn gradient_is_none_at_pole() {
        let p = params(1.0, 0.0, 1.0, 0.0005);
        assert!(gradient(-2000.0, &p).is_none());
    }
}
