//! Propagation of fitted King-plot data to nuclear-structure observables.
//!
//! Responsibilities:
//!
//! - build the per-point quadratic in the mass-scaling ratio `mu_ij`
//! - solve it with tagged degenerate/no-root outcomes
//! - derive the charge-radius difference `delta<r^2>_ij` per isotope pair

pub mod propagate;
pub mod quadratic;

pub use propagate::*;
pub use quadratic::*;
