//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the analysis pipeline (sample -> fit -> propagate)
//! - prints reports
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, DemoArgs, EvalArgs};
use crate::domain::{AnalysisConfig, DEFAULT_INITIAL_GUESS, ModelParams, TransitionConstants};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `kingfit` binary.
pub fn run() -> Result<(), AppError> {
    // We want bare `kingfit` (and `kingfit --seed 7`) to behave like
    // `kingfit demo ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Demo(args) => handle_demo(args),
        Command::Eval(args) => handle_eval(args),
    }
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = analysis_config_from_args(&args);
    let run = pipeline::run_demo(&config)?;

    print!(
        "{}",
        crate::report::format_fit_summary(&run.sample.shift_b, &run.fit, Some(&config.truth))
    );
    print!("{}", crate::report::format_residual_summary(&run.residuals));
    println!();
    print!("{}", crate::report::format_observables(&run.observables));

    if let Some(path) = &config.export_results {
        crate::io::write_results_csv(path, &run.sample, &run.fitted, &run.residuals, &run.observables)?;
    }
    if let Some(path) = &config.export_params {
        crate::io::write_params_json(path, &run.fit)?;
    }

    Ok(())
}

fn handle_eval(args: EvalArgs) -> Result<(), AppError> {
    let params = resolve_eval_params(&args)?;

    if !(args.from.is_finite() && args.to.is_finite() && args.to > args.from) {
        return Err(AppError::invalid("Invalid evaluation range."));
    }
    if args.steps == 0 {
        return Err(AppError::invalid("Evaluation grid must have at least one point."));
    }

    let grid = crate::data::sample::linspace(args.from, args.to, args.steps);
    let values = crate::models::evaluate_all(&grid, &params);
    print!("{}", crate::report::format_eval_table(&grid, &values));

    Ok(())
}

fn resolve_eval_params(args: &EvalArgs) -> Result<ModelParams, AppError> {
    if let Some(path) = &args.params {
        return Ok(crate::io::read_params_json(path)?.params);
    }
    match (args.alpha, args.beta, args.gamma, args.eta) {
        (Some(alpha), Some(beta), Some(gamma), Some(eta)) => {
            Ok(ModelParams::new(alpha, beta, gamma, eta))
        }
        _ => Err(AppError::invalid(
            "Provide either --params or all of --alpha/--beta/--gamma/--eta.",
        )),
    }
}

pub fn analysis_config_from_args(args: &DemoArgs) -> AnalysisConfig {
    AnalysisConfig {
        truth: ModelParams::new(args.alpha, args.beta, args.gamma, args.eta),
        points: args.points,
        range_min: args.range_min,
        range_max: args.range_max,
        noise_sigma: args.noise_sigma,
        seed: args.seed,
        constants_a: TransitionConstants::new(args.kms_a, args.f_a, args.g_a, args.h_a),
        constants_b: TransitionConstants::new(args.kms_b, args.f_b, args.g_b, args.h_b),
        initial_guess: DEFAULT_INITIAL_GUESS,
        export_results: args.export.clone(),
        export_params: args.export_params.clone(),
    }
}

/// Rewrite argv so `kingfit` defaults to `kingfit demo`.
///
/// Rules:
/// - `kingfit`                     -> `kingfit demo`
/// - `kingfit --seed 7 ...`        -> `kingfit demo --seed 7 ...`
/// - `kingfit --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("demo".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "demo" | "eval");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "demo flags".
    if arg1.starts_with('-') {
        argv.insert(1, "demo".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
