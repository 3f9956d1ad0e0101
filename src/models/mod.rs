//! Model evaluation for the nonlinear King-plot curve.
//!
//! The fitter relies on two primitive operations:
//! - predict the transition-a shift from a transition-b shift (for residuals)
//! - the partial derivatives of that prediction (for the analytic Jacobian)
//!
//! Both live here so the pole guard is written exactly once.

pub mod king;

pub use king::*;
