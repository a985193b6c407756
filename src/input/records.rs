use std::fmt;
use std::path::Path;

use crate::input::{InputError, for_each_line, open_maybe_gz};

const KEY_SEPARATOR: char = ' ';
const MIN_FIELDS: usize = 3;

/// Join key shared by gold and score files: the first two tokens of a line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompositeKey(String);

impl CompositeKey {
    pub fn new(first: &str, second: &str) -> Self {
        let mut key = String::with_capacity(first.len() + second.len() + 1);
        key.push_str(first);
        key.push(KEY_SEPARATOR);
        key.push_str(second);
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyedRecord {
    pub key: CompositeKey,
    pub value: String,
    pub line: usize,
}

impl KeyedRecord {
    pub fn parse_label(&self) -> Result<i64, InputError> {
        self.value.parse::<i64>().map_err(|_| {
            InputError::parse(
                self.line,
                format!("label {:?} for {} is not an integer", self.value, self.key),
            )
        })
    }

    pub fn parse_score(&self) -> Result<f64, InputError> {
        match self.value.parse::<f64>() {
            Ok(score) if score.is_finite() => Ok(score),
            _ => Err(InputError::parse(
                self.line,
                format!("score {:?} for {} is not a finite number", self.value, self.key),
            )),
        }
    }
}

pub fn parse_keyed_line(line: &str, line_no: usize) -> Result<Option<KeyedRecord>, InputError> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(first), Some(second), Some(value)) => Ok(Some(KeyedRecord {
            key: CompositeKey::new(first, second),
            value: value.to_string(),
            line: line_no,
        })),
        _ => Err(InputError::parse(
            line_no,
            format!("expected at least {MIN_FIELDS} whitespace-separated fields"),
        )),
    }
}

pub fn read_keyed_records(path: &Path) -> Result<Vec<KeyedRecord>, InputError> {
    let mut reader = open_maybe_gz(path).map_err(|e| e.in_file(path))?;
    let mut records = Vec::new();
    for_each_line(reader.as_mut(), |line_no, line| {
        if let Some(record) = parse_keyed_line(line, line_no)? {
            records.push(record);
        }
        Ok(())
    })
    .map_err(|e| e.in_file(path))?;

    tracing::debug!(path = %path.display(), records = records.len(), "read keyed records");
    Ok(records)
}
