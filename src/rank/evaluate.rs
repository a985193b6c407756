use std::cmp::Ordering;

use clap::ValueEnum;
use serde::Serialize;

use crate::rank::EvalError;
use crate::rank::merge::{ScoredRecord, ScoredTable};

/// How the area under the precision-recall curve is integrated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaRule {
    /// Precision of the higher-recall point is held over each recall increment.
    #[default]
    Step,
    /// Linear interpolation between neighbouring points.
    Trapezoid,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub threshold: f64,
    pub recall: f64,
    pub precision: f64,
}

/// Precision-recall curve ordered by non-increasing threshold, starting at
/// `(recall 0, precision 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrCurve {
    points: Vec<CurvePoint>,
    positives: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub curve: PrCurve,
    pub aupr: Option<f64>,
    pub rows: usize,
    pub positives: usize,
}

pub fn evaluate(table: &ScoredTable, rule: AreaRule) -> Evaluation {
    let ranked = rank(table);
    let curve = PrCurve::from_ranked(&ranked);
    let aupr = match curve.area(rule) {
        Ok(area) => Some(area),
        Err(err) => {
            tracing::debug!(rows = table.len(), "{err}");
            None
        }
    };
    Evaluation {
        rows: table.len(),
        positives: curve.positives(),
        curve,
        aupr,
    }
}

/// Rows by descending score; equal scores keep ascending insertion index.
pub fn rank(table: &ScoredTable) -> Vec<&ScoredRecord> {
    let mut ranked: Vec<&ScoredRecord> = table.records().iter().collect();
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.index.cmp(&b.index))
    });
    ranked
}

impl PrCurve {
    pub fn from_ranked(ranked: &[&ScoredRecord]) -> Self {
        let positives = ranked.iter().filter(|r| r.is_positive()).count();
        let mut points = vec![CurvePoint {
            threshold: f64::INFINITY,
            recall: 0.0,
            precision: 1.0,
        }];

        let mut tp = 0usize;
        let mut seen = 0usize;
        let mut i = 0usize;
        while i < ranked.len() {
            let threshold = ranked[i].score;
            while i < ranked.len() && ranked[i].score == threshold {
                if ranked[i].is_positive() {
                    tp += 1;
                }
                seen += 1;
                i += 1;
            }

            let recall = if positives == 0 {
                0.0
            } else {
                tp as f64 / positives as f64
            };
            points.push(CurvePoint {
                threshold,
                recall,
                precision: tp as f64 / seen as f64,
            });

            // Lower thresholds cannot raise recall any further.
            if positives > 0 && tp == positives {
                break;
            }
        }

        Self { points, positives }
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    pub fn positives(&self) -> usize {
        self.positives
    }

    pub fn area(&self, rule: AreaRule) -> Result<f64, EvalError> {
        if self.positives == 0 {
            return Err(EvalError::UndefinedMetric("no relevant keys in gold labels"));
        }
        let mut area = 0.0;
        for pair in self.points.windows(2) {
            let (prev, cur) = (pair[0], pair[1]);
            let width = cur.recall - prev.recall;
            area += match rule {
                AreaRule::Step => width * cur.precision,
                AreaRule::Trapezoid => width * (cur.precision + prev.precision) / 2.0,
            };
        }
        Ok(area)
    }

    /// Polyline tracing the step-post rendering of the curve: each recall
    /// increment is drawn at the precision reached at its upper end.
    pub fn step_path(&self) -> Vec<(f64, f64)> {
        let mut path = Vec::with_capacity(self.points.len() * 2);
        let Some(first) = self.points.first() else {
            return path;
        };
        path.push((first.recall, first.precision));
        for pair in self.points.windows(2) {
            let (prev, cur) = (pair[0], pair[1]);
            path.push((prev.recall, cur.precision));
            path.push((cur.recall, cur.precision));
        }
        path
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/rank/evaluate.rs"]
mod tests;
