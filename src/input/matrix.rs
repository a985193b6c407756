use std::path::Path;

use crate::input::{InputError, for_each_line, open_maybe_gz};

const QUOTES: [char; 2] = ['"', '\''];

/// One value of a score matrix addressed by its row and column names.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixCell {
    pub row: String,
    pub column: String,
    pub value: f64,
    /// Value token as written, so the edge list keeps the input precision.
    pub raw: String,
}

/// Drops at most one quote character from each end of `name`.
pub fn strip_quotes(name: &str) -> &str {
    let name = name.strip_prefix(QUOTES).unwrap_or(name);
    name.strip_suffix(QUOTES).unwrap_or(name)
}

/// Column names of the header row. The header has no corner cell: its first
/// token names the first value column.
pub fn parse_header(line: &str) -> Vec<String> {
    line.split_whitespace()
        .map(|name| strip_quotes(name).to_string())
        .collect()
}

/// Cells of one data row: a row name followed by one value per column. Rows
/// shorter than the header are accepted; longer rows are not.
pub fn parse_matrix_row(
    line: &str,
    line_no: usize,
    columns: &[String],
) -> Result<Vec<MatrixCell>, InputError> {
    let mut tokens = line.split_whitespace();
    let Some(row) = tokens.next() else {
        return Ok(Vec::new());
    };
    let row = strip_quotes(row);

    let mut cells = Vec::with_capacity(columns.len());
    for (idx, token) in tokens.enumerate() {
        let Some(column) = columns.get(idx) else {
            return Err(InputError::parse(
                line_no,
                format!(
                    "row {row:?} has more values than the {} header columns",
                    columns.len()
                ),
            ));
        };
        let value = match token.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                return Err(InputError::parse(
                    line_no,
                    format!("value {token:?} at ({row}, {column}) is not a finite number"),
                ));
            }
        };
        cells.push(MatrixCell {
            row: row.to_string(),
            column: column.clone(),
            value,
            raw: token.to_string(),
        });
    }
    Ok(cells)
}

/// Every cell of the matrix at `path` in row-major order. The first non-blank
/// line is the header.
pub fn read_score_matrix(path: &Path) -> Result<Vec<MatrixCell>, InputError> {
    let mut reader = open_maybe_gz(path).map_err(|e| e.in_file(path))?;
    let mut columns: Vec<String> = Vec::new();
    let mut header_seen = false;
    let mut cells = Vec::new();
    for_each_line(reader.as_mut(), |line_no, line| {
        if line.trim().is_empty() {
            return Ok(());
        }
        if !header_seen {
            columns = parse_header(line);
            header_seen = true;
            return Ok(());
        }
        cells.extend(parse_matrix_row(line, line_no, &columns)?);
        Ok(())
    })
    .map_err(|e| e.in_file(path))?;

    if !header_seen {
        tracing::warn!(path = %path.display(), "score matrix is empty");
    }
    tracing::debug!(
        path = %path.display(),
        columns = columns.len(),
        cells = cells.len(),
        "read score matrix"
    );
    Ok(cells)
}
