// src/dataset/dedup.rs

use crate::domain::NormalizedListing;
use std::collections::HashSet;

/// The accumulated table of listings, in row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub rows: Vec<NormalizedListing>,
}

impl Dataset {
    pub fn new(rows: Vec<NormalizedListing>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drop rows identical to an earlier row in every column.
    /// Returns how many were dropped.
    pub fn dedup(&mut self) -> usize {
        let before = self.rows.len();
        self.rows = dedup_rows(std::mem::take(&mut self.rows));
        before - self.rows.len()
    }
}

/// Keep the first occurrence of every distinct row.
pub fn dedup_rows(rows: Vec<NormalizedListing>) -> Vec<NormalizedListing> {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.into_iter()
        .filter(|row| seen.insert(row.row_key()))
        .collect()
}

#[derive(Debug)]
pub struct MergeOutcome {
    pub dataset: Dataset,
    /// Batch rows left after deduplicating the batch against itself.
    pub batch_unique: usize,
    /// Rows that were not already in the existing dataset.
    pub added: usize,
}

/// Union of `existing` and `batch` with exact-duplicate rows collapsed.
///
/// Existing rows come first, then the new ones. A listing scraped again with
/// any column changed (a new price, say) is a different row and is kept.
pub fn merge(existing: Dataset, batch: Vec<NormalizedListing>) -> MergeOutcome {
    let batch = dedup_rows(batch);
    let batch_unique = batch.len();

    let known: HashSet<_> = existing.rows.iter().map(NormalizedListing::row_key).collect();
    let added = batch.iter().filter(|row| !known.contains(&row.row_key())).count();

    let mut combined = existing.rows;
    combined.extend(batch);

    let mut dataset = Dataset::new(combined);
    dataset.dedup();

    MergeOutcome {
        dataset,
        batch_unique,
        added,
    }
}
