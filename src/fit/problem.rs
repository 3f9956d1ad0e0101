//! The King-plot fit expressed as a Levenberg-Marquardt least-squares problem.
//!
//! Residuals are sigma-weighted: `r_i = (model(x_i) - y_i) / sigma_i`. The
//! sigmas are absolute measurement uncertainties and are never renormalized,
//! so the covariance of the solution is directly `(J^T J)^-1`.
//!
//! A parameter point whose pole lands on a data point produces an infinite
//! model value. We report such points (and any other non-finite residual) as
//! inadmissible by returning `None`, which makes the optimizer reject the step
//! and back away from the pole instead of crashing or absorbing NaNs.

use levenberg_marquardt::LeastSquaresProblem;
use nalgebra::storage::Owned;
use nalgebra::{Const, DVector, Dyn, OMatrix, U4, Vector4};

use crate::domain::ModelParams;
use crate::models::{evaluate, gradient};

pub struct KingProblem<'a> {
    shift_b: &'a [f64],
    shift_a: &'a [f64],
    sigma: &'a [f64],
    params: Vector4<f64>,
}

impl<'a> KingProblem<'a> {
    /// Callers must pass equal-length slices; `fitter::fit` validates this.
    pub fn new(
        shift_b: &'a [f64],
        shift_a: &'a [f64],
        sigma: &'a [f64],
        initial: Vector4<f64>,
    ) -> Self {
        Self {
            shift_b,
            shift_a,
            sigma,
            params: initial,
        }
    }

    fn model_params(&self) -> ModelParams {
        ModelParams::from_vector(&self.params)
    }
}

impl LeastSquaresProblem<f64, Dyn, U4> for KingProblem<'_> {
    type ParameterStorage = Owned<f64, U4>;
    type ResidualStorage = Owned<f64, Dyn>;
    type JacobianStorage = Owned<f64, Dyn, U4>;

    fn set_params(&mut self, params: &Vector4<f64>) {
        self.params = *params;
    }

    fn params(&self) -> Vector4<f64> {
        self.params
    }

    fn residuals(&self) -> Option<DVector<f64>> {
        let p = self.model_params();
        let n = self.shift_b.len();

        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            let r = (evaluate(self.shift_b[i], &p) - self.shift_a[i]) / self.sigma[i];
            if !r.is_finite() {
                return None;
            }
            out.push(r);
        }
        Some(DVector::from_vec(out))
    }

    fn jacobian(&self) -> Option<OMatrix<f64, Dyn, U4>> {
        let p = self.model_params();
        let n = self.shift_b.len();

        let mut jac = OMatrix::<f64, Dyn, U4>::zeros_generic(Dyn(n), Const::<4>);
        for i in 0..n {
            let g = gradient(self.shift_b[i], &p)?;
            for (j, gj) in g.iter().enumerate() {
                let v = gj / self.sigma[i];
                if !v.is_finite() {
                    return None;
                }
                jac[(i, j)] = v;
            }
        }
        Some(jac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluate_all;

    #[test]
    fn residuals_vanish_on_exact_data() {
        let truth = ModelParams::new(1.2, 75.0, -0.002, 0.0003);
        let shift_b = [-400.0, -100.0, 0.0, 150.0, 420.0];
        let shift_a = evaluate_all(&shift_b, &truth);
        let sigma = [1.0; 5];

        let problem = KingProblem::new(&shift_b, &shift_a, &sigma, truth.to_vector());
        let r = problem.residuals().unwrap();
        assert!(r.iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn residuals_are_sigma_scaled() {
        let p = ModelParams::new(1.0, 0.0, 0.0, 0.0);
        let shift_b = [10.0];
        // Model predicts 10.0; observation is 13.0; sigma 1.5 -> r = -2.
        let shift_a = [13.0];
        let sigma = [1.5];

        let problem = KingProblem::new(&shift_b, &shift_a, &sigma, p.to_vector());
        let r = problem.residuals().unwrap();
        assert!((r[0] + 2.0).abs() < 1e-12);
    }

    #[test]
    fn pole_hit_makes_the_point_inadmissible() {
        // eta = -0.01 places the pole exactly on the x = 100 observation.
        let p = ModelParams::new(1.0, 0.0, 1.0, -0.01);
        let shift_b = [50.0, 100.0, 150.0];
        let shift_a = [0.0; 3];
        let sigma = [1.0; 3];

        let problem = KingProblem::new(&shift_b, &shift_a, &sigma, p.to_vector());
        assert!(problem.residuals().is_none());
        assert!(problem.jacobian().is_none());
    }
}
