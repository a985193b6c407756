use std::collections::HashMap;

use crate::input::InputError;
use crate::input::records::{CompositeKey, KeyedRecord};
use crate::rank::gold::GoldIndex;
use crate::rank::is_positive;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub key: CompositeKey,
    pub label: i64,
    pub score: f64,
    pub index: usize,
}

impl ScoredRecord {
    pub fn is_positive(&self) -> bool {
        is_positive(self.label)
    }
}

/// One score source laid over the gold labels. Rows are kept in index order.
#[derive(Debug, Clone, Default)]
pub struct ScoredTable {
    records: Vec<ScoredRecord>,
    by_key: HashMap<CompositeKey, usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct MergeStats {
    matched: usize,
    appended: usize,
    overwritten: usize,
}

impl ScoredTable {
    pub fn from_gold(gold: &GoldIndex) -> Self {
        let mut records = Vec::with_capacity(gold.len());
        let mut by_key = HashMap::with_capacity(gold.len());
        for g in gold.records() {
            by_key.insert(g.key.clone(), g.index);
            records.push(ScoredRecord {
                key: g.key.clone(),
                label: g.label,
                score: 0.0,
                index: g.index,
            });
        }
        Self { records, by_key }
    }

    /// Writes one score onto the table and returns the row index. A key not
    /// present yet is appended with label 0.
    pub fn overlay(&mut self, key: &CompositeKey, score: f64) -> usize {
        if let Some(&idx) = self.by_key.get(key) {
            self.records[idx].score = score;
            return idx;
        }
        let index = self.records.len();
        self.by_key.insert(key.clone(), index);
        self.records.push(ScoredRecord {
            key: key.clone(),
            label: 0,
            score,
            index,
        });
        index
    }

    pub fn records(&self) -> &[ScoredRecord] {
        &self.records
    }

    #[cfg(test)]
    pub fn get(&self, key: &CompositeKey) -> Option<&ScoredRecord> {
        self.by_key.get(key).map(|&idx| &self.records[idx])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn positives(&self) -> usize {
        self.records.iter().filter(|r| r.is_positive()).count()
    }
}

pub fn merge(gold: &GoldIndex, scores: &[KeyedRecord]) -> Result<ScoredTable, InputError> {
    let mut table = ScoredTable::from_gold(gold);
    let mut stats = MergeStats::default();
    let mut scored = vec![false; gold.len()];

    for record in scores {
        let score = record.parse_score()?;
        let before = table.len();
        let idx = table.overlay(&record.key, score);
        if idx == before {
            stats.appended += 1;
            scored.push(true);
        } else if scored[idx] {
            stats.overwritten += 1;
        } else {
            scored[idx] = true;
            stats.matched += 1;
        }
    }

    tracing::debug!(
        gold = gold.len(),
        matched = stats.matched,
        appended = stats.appended,
        overwritten = stats.overwritten,
        unscored = gold.len() - stats.matched,
        positives = table.positives(),
        "merged score source"
    );
    if stats.overwritten > 0 {
        tracing::warn!(
            repeated = stats.overwritten,
            "score source repeats keys; last score wins"
        );
    }

    Ok(table)
}

#[cfg(test)]
#[path = "../../tests/src_inline/rank/merge.rs"]
mod tests;
