use std::collections::HashMap;
use std::path::Path;

use crate::input::InputError;
use crate::input::records::{CompositeKey, KeyedRecord, read_keyed_records};
use crate::rank::is_positive;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldRecord {
    pub key: CompositeKey,
    pub label: i64,
    pub index: usize,
}

/// Gold labels in first-seen order. `records[i].index == i` always holds.
#[derive(Debug, Clone, Default)]
pub struct GoldIndex {
    records: Vec<GoldRecord>,
    by_key: HashMap<CompositeKey, usize>,
}

impl GoldIndex {
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let records = read_keyed_records(path)?;
        let gold = Self::build(&records).map_err(|e| e.in_file(path))?;
        tracing::info!(
            path = %path.display(),
            keys = gold.len(),
            positives = gold.positives(),
            "loaded gold labels"
        );
        Ok(gold)
    }

    pub fn build(records: &[KeyedRecord]) -> Result<Self, InputError> {
        let mut gold = GoldIndex {
            records: Vec::with_capacity(records.len()),
            by_key: HashMap::with_capacity(records.len()),
        };
        let mut warned_label = false;

        for record in records {
            let label = record.parse_label()?;
            if label != 0 && label != 1 && !warned_label {
                tracing::warn!(
                    line = record.line,
                    label,
                    "gold label outside {{0,1}}; only label 1 counts as relevant"
                );
                warned_label = true;
            }
            if gold.by_key.contains_key(&record.key) {
                tracing::warn!(
                    line = record.line,
                    key = %record.key,
                    "duplicate gold key; keeping first"
                );
                continue;
            }
            let index = gold.records.len();
            gold.by_key.insert(record.key.clone(), index);
            gold.records.push(GoldRecord {
                key: record.key.clone(),
                label,
                index,
            });
        }

        Ok(gold)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, key: &CompositeKey) -> Option<&GoldRecord> {
        self.by_key.get(key).map(|&idx| &self.records[idx])
    }

    pub fn records(&self) -> &[GoldRecord] {
        &self.records
    }

    pub fn positives(&self) -> usize {
        self.records.iter().filter(|r| is_positive(r.label)).count()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/rank/gold.rs"]
mod tests;
