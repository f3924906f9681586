//! Run statistics
//!
//! Every field the handlers look at ends up either as triples or in one of
//! the skip counters below, so a run can be audited without re-reading the
//! dumps.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::builder::SkipReason;

// ============================================================================
// Handler Statistics
// ============================================================================

/// Counters for one record handler over one table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerStats {
    /// Data rows read (header excluded)
    pub rows_read: usize,

    /// Rows whose gate column was in the allow set
    pub rows_accepted: usize,

    /// Fields skipped because a value was empty
    pub malformed_fields: usize,

    /// Fields skipped because of the `\N` null marker
    pub null_fields: usize,

    /// Bracketed multi-value fields that could not be parsed
    pub malformed_lists: usize,

    /// Skipped fields per unrecognized predicate name
    pub unknown_predicates: BTreeMap<String, usize>,

    /// Empty or null-marker entries dropped from bracketed lists
    pub empty_list_entries: usize,

    /// Candidate triples rejected by the filter policy
    pub filtered_candidates: usize,

    /// Attribute triples produced (before dedup/prune)
    pub attribute_triples: usize,

    /// Relationship triples produced (before dedup)
    pub relationship_triples: usize,
}

impl HandlerStats {
    /// Record a field that produced no triples at all
    pub fn record_skip(&mut self, reason: &SkipReason) {
        match reason {
            SkipReason::Malformed => self.malformed_fields += 1,
            SkipReason::NullMarker => self.null_fields += 1,
            SkipReason::MalformedList(_) => self.malformed_lists += 1,
            SkipReason::UnknownPredicate(name) => {
                *self.unknown_predicates.entry(name.clone()).or_insert(0) += 1;
            }
        }
    }

    /// Total fields skipped for any reason
    pub fn skipped_fields(&self) -> usize {
        self.malformed_fields
            + self.null_fields
            + self.malformed_lists
            + self.unknown_predicates.values().sum::<usize>()
    }

    /// Add another handler's counters into this one
    pub fn merge(&mut self, other: &HandlerStats) {
        self.rows_read += other.rows_read;
        self.rows_accepted += other.rows_accepted;
        self.malformed_fields += other.malformed_fields;
        self.null_fields += other.null_fields;
        self.malformed_lists += other.malformed_lists;
        for (name, count) in &other.unknown_predicates {
            *self.unknown_predicates.entry(name.clone()).or_insert(0) += count;
        }
        self.empty_list_entries += other.empty_list_entries;
        self.filtered_candidates += other.filtered_candidates;
        self.attribute_triples += other.attribute_triples;
        self.relationship_triples += other.relationship_triples;
    }
}

// ============================================================================
// Graph Statistics
// ============================================================================

/// Statistics for a whole assembler run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphStats {
    /// Per-handler counters, in handler order
    pub handlers: Vec<(String, HandlerStats)>,

    /// Duplicate attribute triples removed
    pub duplicate_attributes: usize,

    /// Duplicate relationship triples removed
    pub duplicate_relationships: usize,

    /// Attribute triples dropped because their subject has no relationship
    pub orphan_attributes: usize,

    /// Final attribute triple count
    pub attribute_triples: usize,

    /// Final relationship triple count
    pub relationship_triples: usize,

    /// Wall-clock duration of the run in milliseconds
    pub duration_ms: u64,
}

impl GraphStats {
    /// Sum of all handler counters
    pub fn totals(&self) -> HandlerStats {
        let mut total = HandlerStats::default();
        for (_, stats) in &self.handlers {
            total.merge(stats);
        }
        total
    }

    /// Stats for a named handler
    pub fn handler(&self, name: &str) -> Option<&HandlerStats> {
        self.handlers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, stats)| stats)
    }
}
