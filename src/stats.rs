//! Statistics aggregator — the per-query metrics shown beside results.
//!
//! Computed fresh on the full filtered set (before display truncation) and
//! discarded after the response; nothing here persists or mutates.

use std::collections::HashSet;

use serde::Serialize;

use crate::pipeline::merge::TRANSLATION_COLUMN;
use crate::search::ResultSet;

/// Column whose distinct values feed `unique_domains`.
const DOMAIN_COLUMN: &str = "domain_id";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchStatistics {
    pub total_results: usize,
    pub mapped_count: usize,
    /// Percent of results carrying a translation; 0.0 for an empty set.
    pub coverage: f64,
    pub unique_domains: usize,
}

impl SearchStatistics {
    pub fn compute(results: &ResultSet<'_>) -> Self {
        let table = results.table();
        let total_results = results.len();

        let mapped_count = match table.column_index(TRANSLATION_COLUMN) {
            None => 0,
            Some(col) => results.rows().filter(|row| !row[col].is_null()).count(),
        };

        let coverage = if total_results == 0 {
            0.0
        } else {
            mapped_count as f64 / total_results as f64 * 100.0
        };

        let unique_domains = match table.column_index(DOMAIN_COLUMN) {
            None => 0,
            Some(col) => {
                let mut seen = HashSet::new();
                for row in results.rows() {
                    if let Some(text) = row[col].render() {
                        seen.insert(text.into_owned());
                    }
                }
                seen.len()
            }
        };

        Self {
            total_results,
            mapped_count,
            coverage,
            unique_domains,
        }
    }
}
