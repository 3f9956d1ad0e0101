//! Command-line parsing for the King-plot analysis tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "kingfit", version, about = "Nonlinear King-plot isotope-shift analysis")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the end-to-end demonstration: synthesize a noisy dataset, fit the
    /// nonlinear model, and propagate to nuclear observables.
    Demo(DemoArgs),
    /// Evaluate the model on a shift_b grid for given parameters.
    Eval(EvalArgs),
}

/// Options for the demonstration pipeline.
#[derive(Debug, Parser, Clone)]
pub struct DemoArgs {
    /// True alpha used to synthesize the dataset.
    #[arg(long, default_value_t = 1.15, allow_negative_numbers = true)]
    pub alpha: f64,

    /// True beta (MHz).
    #[arg(long, default_value_t = 80.0, allow_negative_numbers = true)]
    pub beta: f64,

    /// True gamma (curvature coefficient).
    #[arg(long, default_value_t = -0.0015, allow_negative_numbers = true)]
    pub gamma: f64,

    /// True eta (pole coefficient).
    #[arg(long, default_value_t = 0.0005, allow_negative_numbers = true)]
    pub eta: f64,

    /// Number of isotope-pair points to generate.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub points: usize,

    /// Lower end of the shift_b range (MHz).
    #[arg(long, default_value_t = -600.0, allow_negative_numbers = true)]
    pub range_min: f64,

    /// Upper end of the shift_b range (MHz).
    #[arg(long, default_value_t = 600.0, allow_negative_numbers = true)]
    pub range_max: f64,

    /// Gaussian noise standard deviation added to shift_a (MHz); 0 disables noise.
    #[arg(long, default_value_t = 15.0)]
    pub noise_sigma: f64,

    /// Random seed for noise generation.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Mass-shift coefficient K_ms for transition a.
    #[arg(long, default_value_t = 1000.0, allow_negative_numbers = true)]
    pub kms_a: f64,
    /// Field-shift coefficient F for transition a.
    #[arg(long, default_value_t = 500.0, allow_negative_numbers = true)]
    pub f_a: f64,
    /// Second-order coefficient G for transition a.
    #[arg(long, default_value_t = 50.0, allow_negative_numbers = true)]
    pub g_a: f64,
    /// Cross-term coefficient H for transition a.
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    pub h_a: f64,

    /// Mass-shift coefficient K_ms for transition b.
    #[arg(long, default_value_t = 950.0, allow_negative_numbers = true)]
    pub kms_b: f64,
    /// Field-shift coefficient F for transition b.
    #[arg(long, default_value_t = 480.0, allow_negative_numbers = true)]
    pub f_b: f64,
    /// Second-order coefficient G for transition b.
    #[arg(long, default_value_t = 40.0, allow_negative_numbers = true)]
    pub g_b: f64,
    /// Cross-term coefficient H for transition b.
    #[arg(long, default_value_t = 8.0, allow_negative_numbers = true)]
    pub h_b: f64,

    /// Write per-point results (data, fit, observables) to a CSV file.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Write fitted parameters and covariance to a JSON file.
    #[arg(long)]
    pub export_params: Option<PathBuf>,
}

/// Options for standalone model evaluation.
#[derive(Debug, Parser, Clone)]
pub struct EvalArgs {
    /// Read parameters from a JSON file produced by `demo --export-params`.
    #[arg(long, conflicts_with_all = ["alpha", "beta", "gamma", "eta"])]
    pub params: Option<PathBuf>,

    /// Model alpha (required unless --params is given).
    #[arg(long, allow_negative_numbers = true)]
    pub alpha: Option<f64>,

    /// Model beta.
    #[arg(long, allow_negative_numbers = true)]
    pub beta: Option<f64>,

    /// Model gamma.
    #[arg(long, allow_negative_numbers = true)]
    pub gamma: Option<f64>,

    /// Model eta.
    #[arg(long, allow_negative_numbers = true)]
    pub eta: Option<f64>,

    /// Lower end of the evaluation grid (MHz).
    #[arg(long, default_value_t = -600.0, allow_negative_numbers = true)]
    pub from: f64,

    /// Upper end of the evaluation grid (MHz).
    #[arg(long, default_value_t = 600.0, allow_negative_numbers = true)]
    pub to: f64,

    /// Number of grid points.
    #[arg(long, default_value_t = 21)]
    pub steps: usize,
}
