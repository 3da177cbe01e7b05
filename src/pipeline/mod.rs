//! Vocabulary pipeline: load the main and translation files, left-join the
//! Vietnamese translations, and normalize to the canonical column order.
//!
//! `build_catalog` is the single entry point and is infallible by design —
//! every load or merge problem is recovered into a degraded table plus an
//! advisory describing what happened, so a broken data file never takes a
//! request down.

pub mod loader;
pub mod merge;
pub mod normalize;

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::config::CANONICAL_COLUMNS;
use crate::table::Table;
use crate::vocabulary::Vocabulary;

use loader::load_table;

// ---------------------------------------------------------------------------
// Advisories
// ---------------------------------------------------------------------------

/// Non-fatal problems encountered while building a catalog. Surfaced to the
/// presentation layer alongside the (possibly degraded) table.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Advisory {
    #[error("main table for {vocabulary} is unavailable: {reason}")]
    MainUnavailable {
        vocabulary: &'static str,
        reason: String,
    },

    #[error("translation table for {vocabulary} is unavailable: {reason}")]
    TranslationUnavailable {
        vocabulary: &'static str,
        reason: String,
    },

    #[error("main table has no concept_code column; translations cannot be joined")]
    MissingJoinKey,

    #[error("translation table lacks column \"{column}\"; translations cannot be joined")]
    MissingTranslationColumn { column: String },

    #[error("translation table repeats join keys; kept first occurrence, discarded {discarded}")]
    DuplicateJoinKeys { discarded: usize },
}

impl Advisory {
    /// Stable machine-readable code for API clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MainUnavailable { .. } => "main_unavailable",
            Self::TranslationUnavailable { .. } => "translation_unavailable",
            Self::MissingJoinKey => "missing_join_key",
            Self::MissingTranslationColumn { .. } => "missing_translation_column",
            Self::DuplicateJoinKeys { .. } => "duplicate_join_keys",
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// A vocabulary's unified table plus the provenance of its build.
#[derive(Debug, Clone)]
pub struct VocabularyCatalog {
    pub vocabulary: Vocabulary,
    pub table: Table,
    pub advisories: Vec<Advisory>,
    pub loaded_at: DateTime<Utc>,
}

impl VocabularyCatalog {
    /// Total concepts in the unified table.
    pub fn total_concepts(&self) -> usize {
        self.table.row_count()
    }
}

/// Build the unified catalog for `vocabulary` from files under `data_dir`.
///
/// Load → merge → normalize. A failed main load yields a zero-row table
/// that still carries the canonical columns so clients render a stable
/// header; a failed translation load yields the main table with an
/// all-null `concept_name_vi`.
pub fn build_catalog(data_dir: &Path, vocabulary: Vocabulary) -> VocabularyCatalog {
    let started = std::time::Instant::now();
    let spec = vocabulary.join_spec();
    let mut advisories = Vec::new();

    let table = match load_table(&data_dir.join(spec.main_file)) {
        Err(err) => {
            advisories.push(Advisory::MainUnavailable {
                vocabulary: vocabulary.name(),
                reason: err.to_string(),
            });
            Table::empty(&CANONICAL_COLUMNS)
        }
        Ok(main) => {
            let merged = match load_table(&data_dir.join(spec.translation_file)) {
                Err(err) => {
                    advisories.push(Advisory::TranslationUnavailable {
                        vocabulary: vocabulary.name(),
                        reason: err.to_string(),
                    });
                    merge::with_null_translation(&main)
                }
                Ok(translation) => {
                    let (merged, merge_advisories) = merge::merge(&main, &translation, &spec);
                    advisories.extend(merge_advisories);
                    merged
                }
            };
            normalize::normalize(&merged)
        }
    };

    for advisory in &advisories {
        tracing::warn!(
            vocabulary = vocabulary.id(),
            code = advisory.code(),
            "{advisory}"
        );
    }
    tracing::info!(
        vocabulary = vocabulary.id(),
        rows = table.row_count(),
        advisories = advisories.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "catalog built"
    );

    VocabularyCatalog {
        vocabulary,
        table,
        advisories,
        loaded_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    /// Write a minimal SNOMED-shaped dataset into `dir`.
    fn seed_snomed(dir: &Path, with_translation: bool) {
        std::fs::write(
            dir.join("df_grouped_SNOMED.csv"),
            "concept_id,concept_name,concept_code,domain_id,vocabulary_id,concept_class_id,standard_concept\n\
             12345,Hypertension,38341003,Condition,SNOMED,Clinical finding,S\n\
             23456,Diabetes mellitus,73211009,Condition,SNOMED,Clinical finding,S\n\
             34567,Asthma,195967001,Condition,SNOMED,Clinical finding,S\n",
        )
        .unwrap();
        if with_translation {
            std::fs::write(
                dir.join("data_snomed_vi.csv"),
                "Code,concept_name_vi\n38341003,Tăng huyết áp\n73211009,Đái tháo đường\n",
            )
            .unwrap();
        }
    }

    #[test]
    fn catalog_merges_and_normalizes() {
        let dir = tempfile::tempdir().unwrap();
        seed_snomed(dir.path(), true);

        let catalog = build_catalog(dir.path(), Vocabulary::Snomed);
        assert!(catalog.advisories.is_empty());
        assert_eq!(catalog.total_concepts(), 3);
        assert_eq!(catalog.table.column_names(), CANONICAL_COLUMNS.to_vec());
        assert_eq!(
            catalog.table.value(0, "concept_name_vi"),
            Some(&Value::Text("Tăng huyết áp".into()))
        );
        // Third row has no translation entry
        assert_eq!(catalog.table.value(2, "concept_name_vi"), Some(&Value::Null));
    }

    #[test]
    fn missing_translation_file_degrades_with_advisory() {
        let dir = tempfile::tempdir().unwrap();
        seed_snomed(dir.path(), false);

        let catalog = build_catalog(dir.path(), Vocabulary::Snomed);
        assert_eq!(catalog.total_concepts(), 3);
        assert_eq!(catalog.advisories.len(), 1);
        assert_eq!(catalog.advisories[0].code(), "translation_unavailable");
        for row in 0..3 {
            assert_eq!(catalog.table.value(row, "concept_name_vi"), Some(&Value::Null));
        }
    }

    #[test]
    fn missing_main_file_yields_stable_empty_shape() {
        let dir = tempfile::tempdir().unwrap();

        let catalog = build_catalog(dir.path(), Vocabulary::Loinc);
        assert_eq!(catalog.total_concepts(), 0);
        assert_eq!(catalog.table.column_names(), CANONICAL_COLUMNS.to_vec());
        assert_eq!(catalog.advisories.len(), 1);
        assert_eq!(catalog.advisories[0].code(), "main_unavailable");
    }

    #[test]
    fn placeholder_main_reports_reason_in_advisory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("df_grouped_LOINC.csv"),
            "version https://git-lfs.github.com/spec/v1\noid sha256:abc\nsize 9\n",
        )
        .unwrap();

        let catalog = build_catalog(dir.path(), Vocabulary::Loinc);
        assert_eq!(catalog.total_concepts(), 0);
        let Advisory::MainUnavailable { reason, .. } = &catalog.advisories[0] else {
            panic!("expected MainUnavailable, got {:?}", catalog.advisories);
        };
        assert!(reason.contains("pointer stub"));
    }

    #[test]
    fn duplicate_translation_keys_surface_as_advisory() {
        let dir = tempfile::tempdir().unwrap();
        seed_snomed(dir.path(), false);
        std::fs::write(
            dir.path().join("data_snomed_vi.csv"),
            "Code,concept_name_vi\n38341003,Tăng huyết áp\n38341003,Bản sao\n",
        )
        .unwrap();

        let catalog = build_catalog(dir.path(), Vocabulary::Snomed);
        assert_eq!(
            catalog.advisories,
            vec![Advisory::DuplicateJoinKeys { discarded: 1 }]
        );
        assert_eq!(
            catalog.table.value(0, "concept_name_vi"),
            Some(&Value::Text("Tăng huyết áp".into()))
        );
    }
}
