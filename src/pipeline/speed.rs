use std::path::PathBuf;

use crate::config::TrendConfig;
use crate::input::samples::read_step_samples;
use crate::pipeline::PipelineError;
use crate::report::plot::render_chart;
use crate::report::{ChartSpec, Series};
use crate::trend::{ProfileAccumulator, ProfileParams};

pub const CHART_FILE: &str = "speed.svg";

#[derive(Debug, Clone, PartialEq)]
pub struct GroupProfile {
    pub label: String,
    pub runs: usize,
    pub mean: Vec<(u64, f64)>,
}

pub fn build_speed_profiles(
    config: &TrendConfig,
    params: ProfileParams,
) -> Result<Vec<GroupProfile>, PipelineError> {
    let mut profiles = Vec::with_capacity(config.groups.len());
    for group in &config.groups {
        let mut acc = ProfileAccumulator::default();
        for path in &group.paths {
            let samples = read_step_samples(path)?;
            acc.add_run(&samples, params).map_err(|source| PipelineError::Series {
                path: path.clone(),
                source,
            })?;
        }
        let mean = acc.mean();
        tracing::debug!(group = %group.label, runs = acc.runs(), points = mean.len(), "built speed profile");
        profiles.push(GroupProfile {
            label: group.label.clone(),
            runs: acc.runs(),
            mean,
        });
    }
    Ok(profiles)
}

pub fn run_speed(config: &TrendConfig, params: ProfileParams) -> Result<PathBuf, PipelineError> {
    let profiles = build_speed_profiles(config, params)?;
    let series: Vec<Series> = profiles
        .iter()
        .map(|p| Series {
            label: p.label.clone(),
            points: p.mean.iter().map(|&(step, secs)| (step as f64, secs)).collect(),
        })
        .collect();

    let max_step = profiles
        .iter()
        .flat_map(|p| p.mean.iter().map(|&(step, _)| step))
        .max()
        .unwrap_or(0);
    let positive = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.1))
        .filter(|&y| y > 0.0);
    let (lo, hi) = positive.fold((f64::INFINITY, 0.0f64), |(lo, hi), y| (lo.min(y), hi.max(y)));
    let y_range = if lo.is_finite() {
        (lo / 2.0)..(hi * 2.0)
    } else {
        1e-3..1.0
    };

    let spec = ChartSpec {
        title: "Run time".to_string(),
        x_label: "Steps".to_string(),
        y_label: "Time, seconds (Less is better)".to_string(),
        x_range: 0.0..(max_step.max(1) as f64),
        y_range,
        log_y: true,
        size: (1000, 600),
    };
    let chart_path = config.out_dir.join(CHART_FILE);
    render_chart(&chart_path, &spec, &series)?;
    Ok(chart_path)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/speed.rs"]
mod tests;
