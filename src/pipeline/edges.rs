use std::cmp::Ordering;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};

use crate::config::EdgeConfig;
use crate::input::matrix::{MatrixCell, read_score_matrix};
use crate::pipeline::PipelineError;
use crate::report::ReportError;

/// Orders cells by descending value. The sort is stable, so equal values keep
/// row-major matrix order.
pub fn rank_cells(cells: &mut [MatrixCell]) {
    cells.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
}

/// One `row<TAB>column<TAB>value` line per cell, readable as a score file.
pub fn write_edges<W: Write>(out: &mut W, cells: &[MatrixCell]) -> io::Result<()> {
    for cell in cells {
        writeln!(out, "{}\t{}\t{}", cell.row, cell.column, cell.raw)?;
    }
    out.flush()
}

pub fn run_edges(config: &EdgeConfig) -> Result<usize, PipelineError> {
    let mut cells = read_score_matrix(&config.matrix_path)?;
    rank_cells(&mut cells);

    match &config.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).map_err(ReportError::from)?;
                }
            }
            let mut out = BufWriter::new(File::create(path).map_err(ReportError::from)?);
            write_edges(&mut out, &cells).map_err(ReportError::from)?;
            tracing::info!(path = %path.display(), edges = cells.len(), "wrote edge list");
        }
        None => {
            let mut out = io::stdout().lock();
            write_edges(&mut out, &cells).map_err(ReportError::from)?;
        }
    }
    Ok(cells.len())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/edges.rs"]
mod tests;
