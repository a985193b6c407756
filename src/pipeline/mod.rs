use std::path::PathBuf;

use thiserror::Error;

use crate::input::InputError;
use crate::report::ReportError;
use crate::trend::SeriesError;

pub mod edges;
pub mod likelihood;
pub mod precision_recall;
pub mod speed;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("{}: {source}", .path.display())]
    Series {
        path: PathBuf,
        #[source]
        source: SeriesError,
    },
    #[error("group `{label}`: {source}")]
    Group {
        label: String,
        #[source]
        source: SeriesError,
    },
}
