use std::path::PathBuf;

use crate::config::{EvalConfig, ScoreSource};
use crate::input::records::read_keyed_records;
use crate::pipeline::PipelineError;
use crate::rank::{Evaluation, GoldIndex, evaluate, merge};
use crate::report::json::{PrSummary, SourceSummary};
use crate::report::plot::render_chart;
use crate::report::{ChartSpec, Series, legend_label};

pub const CHART_FILE: &str = "precision_recall.svg";

#[derive(Debug, Clone)]
pub struct SourceResult {
    pub source: ScoreSource,
    pub name: String,
    pub evaluation: Evaluation,
}

#[derive(Debug, Clone)]
pub struct PrOutput {
    pub results: Vec<SourceResult>,
    pub chart_path: PathBuf,
}

pub fn run_precision_recall(config: &EvalConfig) -> Result<PrOutput, PipelineError> {
    let gold = GoldIndex::load(&config.gold_path)?;
    if gold.is_empty() {
        tracing::warn!(path = %config.gold_path.display(), "gold file has no keys");
    } else if gold.positives() == 0 {
        tracing::warn!(
            path = %config.gold_path.display(),
            "gold file has no relevant keys; AUC is undefined for every source"
        );
    }

    let mut results = Vec::with_capacity(config.score_sources.len());
    for source in &config.score_sources {
        let records = read_keyed_records(&source.path)?;
        let table = merge(&gold, &records).map_err(|e| e.in_file(&source.path))?;
        if table.is_empty() {
            tracing::warn!(path = %source.path.display(), "nothing to rank");
        }
        let evaluation = evaluate(&table, config.area_rule);
        let name = source.display_name();
        match evaluation.aupr {
            Some(aupr) => tracing::info!(source = %name, rows = evaluation.rows, aupr, "evaluated"),
            None => tracing::warn!(
                source = %name,
                rows = evaluation.rows,
                "AUC undefined; curve drawn without it"
            ),
        }
        results.push(SourceResult {
            source: source.clone(),
            name,
            evaluation,
        });
    }

    let series: Vec<Series> = results
        .iter()
        .map(|r| Series {
            label: legend_label(&r.name, r.evaluation.aupr, config.annotate_auc),
            points: r.evaluation.curve.step_path(),
        })
        .collect();
    let chart_path = config.out_dir.join(CHART_FILE);
    render_chart(&chart_path, &chart_spec(), &series)?;

    Ok(PrOutput {
        results,
        chart_path,
    })
}

fn chart_spec() -> ChartSpec {
    ChartSpec {
        title: "Precision-Recall".to_string(),
        x_label: "Recall".to_string(),
        y_label: "Precision".to_string(),
        x_range: -0.01..1.05,
        y_range: -0.01..1.05,
        log_y: false,
        size: (800, 600),
    }
}

pub fn summarize(config: &EvalConfig, output: &PrOutput) -> PrSummary {
    PrSummary {
        tool: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        gold: config.gold_path.display().to_string(),
        area_rule: config.area_rule,
        chart: output.chart_path.display().to_string(),
        sources: output
            .results
            .iter()
            .map(|r| SourceSummary {
                label: r.name.clone(),
                path: r.source.path.display().to_string(),
                rows: r.evaluation.rows,
                positives: r.evaluation.positives,
                curve_points: r.evaluation.curve.points().len(),
                aupr: r.evaluation.aupr,
            })
            .collect(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/precision_recall.rs"]
mod tests;
