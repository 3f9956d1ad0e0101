//! The per-point quadratic in the mass-scaling ratio.
//!
//! Combining the field- and mass-shift decompositions of both transitions
//! eliminates the charge-radius term and leaves a quadratic
//! `A*mu^2 + B*mu + C = 0` whose coefficients mix the atomic constants with
//! the measured shift pair.

use crate::domain::{MuSolution, QuadraticCoefficients, TransitionConstants};

/// Absolute tolerance for treating a coefficient (or denominator) as zero.
pub const APPROX_ZERO: f64 = 1e-8;

/// Build the quadratic coefficients for one isotope-pair data point.
pub fn coefficients(
    shift_a: f64,
    shift_b: f64,
    ca: &TransitionConstants,
    cb: &TransitionConstants,
) -> QuadraticCoefficients {
    QuadraticCoefficients {
        a: (ca.g * cb.f - cb.g * ca.f) + (ca.h * cb.k_ms - cb.h * ca.k_ms),
        b: (ca.k_ms * cb.f - cb.k_ms * ca.f) + (ca.h * shift_b - cb.h * shift_a),
        c: shift_a * cb.f - shift_b * ca.f,
    }
}

/// Solve the quadratic for the mass-scaling ratio.
///
/// Never panics on degenerate input; undefined outcomes are explicit variants.
///
/// When a genuine quadratic has real roots, the "+" root is selected
/// unconditionally as the physically admissible branch. No criterion is known
/// for isotope pairs where the "-" root would apply; this is a latent
/// limitation inherited from the derivation, kept as-is on purpose.
pub fn solve(q: &QuadraticCoefficients) -> MuSolution {
    if q.a.abs() < APPROX_ZERO {
        if q.b.abs() < APPROX_ZERO {
            return MuSolution::Degenerate;
        }
        // Linear case.
        return MuSolution::Solved(-q.c / q.b);
    }

    let discriminant = q.b * q.b - 4.0 * q.a * q.c;
    if discriminant < 0.0 {
        return MuSolution::NoRealRoot;
    }

    MuSolution::Solved((-q.b + discriminant.sqrt()) / (2.0 * q.a))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(a: f64, b: f64, c: f64) -> QuadraticCoefficients {
        QuadraticCoefficients { a, b, c }
    }

    #[test]
    fn coefficients_match_hand_computation() {
        let ca = TransitionConstants::new(1000.0, 500.0, 50.0, 10.0);
        let cb = TransitionConstants::new(950.0, 480.0, 40.0, 8.0);
        let (sa, sb) = (120.0, 100.0);

        let coeffs = coefficients(sa, sb, &ca, &cb);
        assert!((coeffs.a - ((50.0 * 480.0 - 40.0 * 500.0) + (10.0 * 950.0 - 8.0 * 1000.0))).abs() < 1e-12);
        assert!((coeffs.b - ((1000.0 * 480.0 - 950.0 * 500.0) + (10.0 * 100.0 - 8.0 * 120.0))).abs() < 1e-12);
        assert!((coeffs.c - (120.0 * 480.0 - 100.0 * 500.0)).abs() < 1e-12);
    }

    #[test]
    fn degenerate_when_both_leading_terms_vanish() {
        for &c in &[0.0, -3.5, 1e9] {
            assert_eq!(solve(&q(0.0, 0.0, c)), MuSolution::Degenerate);
        }
        // Within tolerance counts as zero.
        assert_eq!(solve(&q(1e-9, -1e-9, 7.0)), MuSolution::Degenerate);
    }

    #[test]
    fn linear_case_returns_neg_c_over_b() {
        let s = solve(&q(0.0, 4.0, -8.0));
        assert_eq!(s, MuSolution::Solved(2.0));

        let s = solve(&q(1e-10, 2.0, 3.0));
        assert_eq!(s, MuSolution::Solved(-1.5));
    }

    #[test]
    fn negative_discriminant_has_no_real_root() {
        // B^2 - 4AC = 4 - 8 < 0.
        assert_eq!(solve(&q(1.0, 2.0, 2.0)), MuSolution::NoRealRoot);
    }

    #[test]
    fn quadratic_case_selects_plus_root() {
        // (mu - 1)(mu - 3) = mu^2 - 4mu + 3; roots 1 and 3.
        // The "+" branch of (-B + sqrt(D)) / 2A is 3.
        match solve(&q(1.0, -4.0, 3.0)) {
            MuSolution::Solved(v) => assert!((v - 3.0).abs() < 1e-12),
            other => panic!("expected Solved, got {other:?}"),
        }

        // With A < 0 the "+" branch is the smaller root: -(mu-1)(mu-3).
        match solve(&q(-1.0, 4.0, -3.0)) {
            MuSolution::Solved(v) => assert!((v - 1.0).abs() < 1e-12),
            other => panic!("expected Solved, got {other:?}"),
        }
    }
}
