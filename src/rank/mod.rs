use thiserror::Error;

pub mod evaluate;
pub mod gold;
pub mod merge;

pub use evaluate::{AreaRule, Evaluation, evaluate};
pub use gold::GoldIndex;
pub use merge::merge;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("area under the precision-recall curve is undefined: {0}")]
    UndefinedMetric(&'static str),
}

/// Relevance labels are binary; anything other than `1` counts as negative.
pub fn is_positive(label: i64) -> bool {
    label == 1
}
