//! `king-fit` library crate.
//!
//! The binary (`kingfit`) is a thin wrapper around this library so that:
//!
//! - the analysis core is testable without spawning processes
//! - modules are reusable (e.g., batch drivers or notebooks later)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod observables;
pub mod report;
