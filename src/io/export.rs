//! Export per-point results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts; undefined observables become empty cells with a status column.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::data::SampleData;
use crate::domain::{MuSolution, NuclearObservable};
use crate::error::AppError;

/// Write per-point results (data, fit, observables) to a CSV file.
///
/// `fitted` and `residuals` are the model predictions and unweighted residuals
/// at the fitted parameters; all slices are parallel to the sample points.
pub fn write_results_csv(
    path: &Path,
    sample: &SampleData,
    fitted: &[f64],
    residuals: &[f64],
    observables: &[NuclearObservable],
) -> Result<(), AppError> {
    let n = sample.shift_b.len();
    if fitted.len() != n || residuals.len() != n || observables.len() != n {
        return Err(AppError::invalid("Export slices have mismatched lengths."));
    }

    let mut file = File::create(path).map_err(|e| {
        AppError::invalid(format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    writeln!(
        file,
        "index,shift_b,shift_a,sigma,shift_a_fit,residual,mu_ij,delta_r2,status"
    )
    .map_err(|e| AppError::invalid(format!("Failed to write export CSV header: {e}")))?;

    for i in 0..n {
        let obs = &observables[i];
        let (mu_cell, status) = match obs.mu {
            MuSolution::Solved(mu) => (format!("{mu:.10}"), "ok"),
            MuSolution::Degenerate => (String::new(), "degenerate"),
            MuSolution::NoRealRoot => (String::new(), "no_real_root"),
        };
        let r2_cell = obs
            .delta_r2
            .map(|v| format!("{v:.10}"))
            .unwrap_or_default();
        let status = if obs.mu.is_defined() && obs.delta_r2.is_none() {
            "undefined_radius"
        } else {
            status
        };

        writeln!(
            file,
            "{i},{:.10},{:.10},{:.10},{:.10},{:.10},{mu_cell},{r2_cell},{status}",
            sample.shift_b[i], sample.shift_a[i], sample.sigma[i], fitted[i], residuals[i],
        )
        .map_err(|e| AppError::invalid(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModelParams;

    #[test]
    fn export_writes_one_row_per_point() {
        let sample = SampleData {
            shift_b: vec![1.0, 2.0],
            shift_a: vec![1.5, 2.5],
            sigma: vec![1.0, 1.0],
            truth: ModelParams::new(1.0, 0.0, 0.0, 0.0),
        };
        let fitted = [1.0, 2.0];
        let residuals = [0.5, 0.5];
        let observables = [
            NuclearObservable {
                mu: MuSolution::Solved(1.25),
                delta_r2: Some(0.5),
            },
            NuclearObservable {
                mu: MuSolution::NoRealRoot,
                delta_r2: None,
            },
        ];

        let dir = std::env::temp_dir();
        let path = dir.join("kingfit_export_test.csv");
        write_results_csv(&path, &sample, &fitted, &residuals, &observables).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("index,shift_b"));
        assert!(lines[1].ends_with(",ok"));
        assert!(lines[2].ends_with(",no_real_root"));

        let _ = std::fs::remove_file(&path);
    }
}
