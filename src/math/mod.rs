//! Mathematical utilities: covariance extraction for the weighted fit.

pub mod covariance;

pub use covariance::*;
