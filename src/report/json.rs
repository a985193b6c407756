use serde::Serialize;

use crate::rank::AreaRule;
use crate::report::ReportError;

#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub label: String,
    pub path: String,
    pub rows: usize,
    pub positives: usize,
    pub curve_points: usize,
    pub aupr: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrSummary {
    pub tool: &'static str,
    pub version: &'static str,
    pub gold: String,
    pub area_rule: AreaRule,
    pub chart: String,
    pub sources: Vec<SourceSummary>,
}

pub fn render_summary_json(summary: &PrSummary) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(summary)?)
}
