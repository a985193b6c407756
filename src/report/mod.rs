use std::ops::Range;
use std::path::PathBuf;

use thiserror::Error;

pub mod json;
pub mod plot;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to render {}: {message}", .path.display())]
    Render { path: PathBuf, message: String },
    #[error("failed to encode summary: {0}")]
    Json(#[from] serde_json::Error),
}

/// One legend entry and its polyline, in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub log_y: bool,
    pub size: (u32, u32),
}

/// Last path-separator-delimited component of `raw`.
pub fn display_label(raw: &str) -> String {
    let trimmed = raw.trim_end_matches(is_separator);
    trimmed
        .rsplit(is_separator)
        .next()
        .unwrap_or(trimmed)
        .to_string()
}

fn is_separator(c: char) -> bool {
    c == '/' || c == std::path::MAIN_SEPARATOR
}

pub fn format_auc(aupr: f64) -> String {
    format!("{aupr:.3e}")
}

pub fn legend_label(name: &str, aupr: Option<f64>, annotate: bool) -> String {
    match aupr {
        Some(value) if annotate => format!("{name} (AUC={})", format_auc(value)),
        _ => name.to_string(),
    }
}

/// Corner points of a dense step series: the first and last position of each
/// run of equal values. Renders identically to the full series.
pub fn step_corners(dense: &[f64]) -> Vec<(f64, f64)> {
    let mut out = Vec::new();
    let mut start = 0usize;
    while start < dense.len() {
        let value = dense[start];
        let mut end = start;
        while end + 1 < dense.len() && dense[end + 1] == value {
            end += 1;
        }
        out.push((start as f64, value));
        if end > start {
            out.push((end as f64, value));
        }
        start = end + 1;
    }
    out
}

/// Bounds of all y values padded by 5%; a flat or empty set gets a unit pad.
pub fn padded_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values {
        if v.is_finite() {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if !lo.is_finite() {
        return 0.0..1.0;
    }
    if lo == hi {
        return (lo - 1.0)..(hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
