//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the fitted King-plot parameter set (`ModelParams`)
//! - per-transition atomic constants (`TransitionConstants`)
//! - tagged per-point observable results (`MuSolution`, `NuclearObservable`)
//! - fit outputs and run configuration (`FitQuality`, `AnalysisConfig`)

pub mod types;

pub use types::*;
