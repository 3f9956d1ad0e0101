//! Synthetic dataset generation for demonstrations and tests.

pub mod sample;

pub use sample::*;
