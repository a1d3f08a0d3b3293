//! Collapses mirrored observations of one contest into a single canonical record.
//!
//! Every contest is usually scraped twice, once from each competitor's
//! profile, with the names in opposite order and the result flag flipped.
//! Records are rewritten so that `competitor_a` is the lower canonical name,
//! and then keyed on `(competitor_a, competitor_b, date)`. The first record
//! seen for a key survives.

use std::collections::HashSet;

use chrono::NaiveDate;
use log::info;

use crate::domain::ContestRecord;
use crate::normalization::NameNormalizer;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DedupKey {
    low: String,
    high: String,
    date: Option<NaiveDate>,
}

pub struct ContestDeduplicator {
    normalizer: NameNormalizer,
}

impl ContestDeduplicator {
    pub fn new(normalizer: NameNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &NameNormalizer {
        &self.normalizer
    }

    /// Rewrites one record into canonical orientation.
    ///
    /// When the names swap places the result flag is negated; a draw stays a draw.
    pub fn canonicalize(&self, record: &ContestRecord) -> ContestRecord {
        let normalized_a = self.normalizer.normalize(&record.competitor_a);
        let normalized_b = self.normalizer.normalize(&record.competitor_b);
        let swapped = normalized_a > normalized_b;

        if swapped {
            ContestRecord {
                competitor_a: normalized_b,
                competitor_b: normalized_a,
                a_won: record.a_won.map(|won| !won),
                date: record.date,
            }
        } else {
            ContestRecord {
                competitor_a: normalized_a,
                competitor_b: normalized_b,
                a_won: record.a_won,
                date: record.date,
            }
        }
    }

    pub fn deduplicate(&self, records: &[ContestRecord]) -> Vec<ContestRecord> {
        let mut seen = HashSet::new();
        let mut retained = Vec::with_capacity(records.len());

        for record in records {
            let canonical = self.canonicalize(record);
            if seen.insert(dedup_key(&canonical)) {
                retained.push(canonical);
            }
        }

        let removed = records.len() - retained.len();
        info!(
            "Deduped {} → {} records ({} removed)",
            records.len(),
            retained.len(),
            removed
        );
        retained
    }
}

impl Default for ContestDeduplicator {
    fn default() -> Self {
        Self::new(NameNormalizer::default())
    }
}

fn dedup_key(record: &ContestRecord) -> DedupKey {
    DedupKey {
        low: record.competitor_a.clone(),
        high: record.competitor_b.clone(),
        date: record.date,
    }
}

/// Deduplicates with the built-in alias table
pub fn deduplicate(records: &[ContestRecord]) -> Vec<ContestRecord> {
    ContestDeduplicator::default().deduplicate(records)
}
