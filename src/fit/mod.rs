//! Weighted nonlinear fit of the King-plot model.
//!
//! Responsibilities:
//!
//! - express the sigma-weighted residual problem to the Levenberg-Marquardt
//!   optimizer (`fit::problem`)
//! - drive the optimizer, extract parameters and covariance, and surface
//!   non-convergence as a hard error (`fit::fitter`)

pub mod fitter;
pub mod problem;

pub use fitter::*;
pub use problem::*;
