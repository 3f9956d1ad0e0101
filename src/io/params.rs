//! Fitted-parameter files (JSON).
//!
//! A parameter file captures everything needed to re-evaluate the fitted model
//! later (e.g., `kingfit eval --params fit.json`) without redoing the fit:
//! parameters, standard errors, the full covariance, and quality diagnostics.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{FitQuality, ModelParams};
use crate::error::AppError;
use crate::fit::KingFit;
use crate::math::standard_errors;

/// A saved fit result (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamsFile {
    pub tool: String,
    pub params: ModelParams,
    /// Standard errors in (alpha, beta, gamma, eta) order.
    pub stderr: [f64; 4],
    /// Row-major 4x4 covariance matrix.
    pub covariance: [[f64; 4]; 4],
    pub quality: FitQuality,
}

impl ParamsFile {
    pub fn from_fit(fit: &KingFit) -> Self {
        let mut covariance = [[0.0; 4]; 4];
        for (i, row) in covariance.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = fit.covariance[(i, j)];
            }
        }
        Self {
            tool: format!("kingfit {}", env!("CARGO_PKG_VERSION")),
            params: fit.params,
            stderr: standard_errors(&fit.covariance),
            covariance,
            quality: fit.quality.clone(),
        }
    }
}

/// Write a fit result to a JSON parameter file.
pub fn write_params_json(path: &Path, fit: &KingFit) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::invalid(format!("Failed to create params JSON '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), &ParamsFile::from_fit(fit))
        .map_err(|e| AppError::invalid(format!("Failed to write params JSON: {e}")))
}

/// Read a previously exported JSON parameter file.
pub fn read_params_json(path: &Path) -> Result<ParamsFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::invalid(format!("Failed to open params JSON '{}': {e}", path.display()))
    })?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::invalid(format!("Failed to parse params JSON: {e}")))
}
