use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use thiserror::Error;

pub mod matrix;
pub mod records;
pub mod samples;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<InputError>,
    },
}

impl InputError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        InputError::Parse {
            line,
            message: message.into(),
        }
    }

    pub fn in_file(self, path: &Path) -> Self {
        match self {
            InputError::File { .. } => self,
            other => InputError::File {
                path: path.to_path_buf(),
                source: Box::new(other),
            },
        }
    }
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Feeds every line of `reader` to `on_line` together with its 1-based number.
/// Trailing newline characters are stripped; blank lines are passed through.
pub fn for_each_line<F>(reader: &mut dyn BufRead, mut on_line: F) -> Result<(), InputError>
where
    F: FnMut(usize, &str) -> Result<(), InputError>,
{
    let mut buf = String::new();
    let mut line_no = 0usize;
    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        on_line(line_no, buf.trim_end_matches(['\n', '\r']))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
