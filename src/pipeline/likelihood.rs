use std::path::{Path, PathBuf};

use crate::config::TrendConfig;
use crate::input::samples::read_step_samples;
use crate::pipeline::PipelineError;
use crate::report::plot::render_chart;
use crate::report::{ChartSpec, Series, padded_range, step_corners};
use crate::trend::{SeriesAccumulator, SeriesError, reconstruct, repair_edges};

pub const CHART_FILE: &str = "likelihood.svg";

#[derive(Debug, Clone, PartialEq)]
pub struct GroupCurve {
    pub label: String,
    pub runs: usize,
    pub dense: Vec<f64>,
}

/// Mean dense log-likelihood curve of each group of runs.
pub fn build_likelihood_curves(
    config: &TrendConfig,
    domain: usize,
) -> Result<Vec<GroupCurve>, PipelineError> {
    let mut curves = Vec::with_capacity(config.groups.len());
    for group in &config.groups {
        let (runs, dense) = match group.paths.as_slice() {
            [path] => (1, single_run(path, &group.label, domain)?),
            paths => mean_of_runs(paths, &group.label, domain)?,
        };
        tracing::debug!(group = %group.label, runs, domain, "reconstructed likelihood curve");
        curves.push(GroupCurve {
            label: group.label.clone(),
            runs,
            dense,
        });
    }
    Ok(curves)
}

fn single_run(path: &Path, label: &str, domain: usize) -> Result<Vec<f64>, PipelineError> {
    let samples = read_step_samples(path)?;
    match reconstruct(&samples, domain) {
        Ok(dense) => Ok(dense),
        Err(SeriesError::AllZero) => {
            warn_all_zero(label);
            Ok(vec![0.0; domain])
        }
        Err(source) => Err(PipelineError::Series {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Run count and edge-repaired mean of several runs.
fn mean_of_runs(
    paths: &[PathBuf],
    label: &str,
    domain: usize,
) -> Result<(usize, Vec<f64>), PipelineError> {
    let mut acc = SeriesAccumulator::new(domain);
    for path in paths {
        let samples = read_step_samples(path)?;
        acc.add(&samples).map_err(|source| PipelineError::Series {
            path: path.clone(),
            source,
        })?;
    }
    let runs = acc.sources();
    let mut dense = acc.mean().map_err(|source| PipelineError::Group {
        label: label.to_string(),
        source,
    })?;
    match repair_edges(&mut dense) {
        Ok(()) => {}
        Err(SeriesError::AllZero) => warn_all_zero(label),
        Err(source) => {
            return Err(PipelineError::Group {
                label: label.to_string(),
                source,
            });
        }
    }
    Ok((runs, dense))
}

fn warn_all_zero(label: &str) {
    tracing::warn!(group = %label, "series is zero everywhere; edges left as is");
}

pub fn run_likelihood(config: &TrendConfig, domain: usize) -> Result<PathBuf, PipelineError> {
    let curves = build_likelihood_curves(config, domain)?;
    let series: Vec<Series> = curves
        .iter()
        .map(|c| Series {
            label: c.label.clone(),
            points: step_corners(&c.dense),
        })
        .collect();

    let spec = ChartSpec {
        title: "Log-likelihood".to_string(),
        x_label: "Steps".to_string(),
        y_label: "logLikelihood (More is better)".to_string(),
        x_range: 0.0..domain.max(1) as f64,
        y_range: padded_range(series.iter().flat_map(|s| s.points.iter().map(|p| p.1))),
        log_y: false,
        size: (1000, 600),
    };
    let chart_path = config.out_dir.join(CHART_FILE);
    render_chart(&chart_path, &spec, &series)?;
    Ok(chart_path)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/likelihood.rs"]
mod tests;
