//! Vocabulary merger — left-joins a translation side-table onto the main
//! concept table, producing the unified `concept_name_vi` column.
//!
//! Join keys on both sides are reduced to a canonical string form (trimmed,
//! case preserved, integers rendered as decimal) and matched exactly. The
//! lookup built from the translation table keeps the FIRST occurrence of a
//! duplicate key, so the output always has exactly one row per main row —
//! no relational fan-out.

use std::collections::HashMap;

use crate::table::{Column, Table, Value};
use crate::vocabulary::JoinSpec;

use super::Advisory;

/// Join key column on the main-table side.
pub const JOIN_KEY: &str = "concept_code";

/// Name the joined translation text carries in the unified table.
pub const TRANSLATION_COLUMN: &str = "concept_name_vi";

/// Left-join `translation` onto `main` per `spec`.
///
/// Never fails: degraded inputs produce a table with an all-null
/// `concept_name_vi` column plus advisories describing what was missing.
/// Row count and row order always equal `main`'s.
pub fn merge(main: &Table, translation: &Table, spec: &JoinSpec) -> (Table, Vec<Advisory>) {
    let Some(main_key) = main.column_index(JOIN_KEY) else {
        return (with_null_translation(main), vec![Advisory::MissingJoinKey]);
    };

    let (code_idx, text_idx) = match (
        translation.column_index(spec.code_column),
        translation.column_index(spec.text_column),
    ) {
        (Some(code), Some(text)) => (code, text),
        (None, _) => {
            return (
                with_null_translation(main),
                vec![Advisory::MissingTranslationColumn {
                    column: spec.code_column.to_string(),
                }],
            );
        }
        (_, None) => {
            return (
                with_null_translation(main),
                vec![Advisory::MissingTranslationColumn {
                    column: spec.text_column.to_string(),
                }],
            );
        }
    };

    let mut lookup: HashMap<String, Value> = HashMap::with_capacity(translation.row_count());
    let mut discarded = 0usize;
    for row in translation.rows() {
        let Some(key) = canonical_code(&row[code_idx]) else {
            continue;
        };
        if lookup.contains_key(&key) {
            // First occurrence wins.
            discarded += 1;
        } else {
            lookup.insert(key, row[text_idx].clone());
        }
    }

    let mut advisories = Vec::new();
    if discarded > 0 {
        advisories.push(Advisory::DuplicateJoinKeys { discarded });
    }

    let (mut out, vi_idx) = translation_shell(main);
    for row in main.rows() {
        let text = canonical_code(&row[main_key])
            .and_then(|key| lookup.get(&key).cloned())
            .unwrap_or(Value::Null);
        out.push_row(place_translation(row, vi_idx, text));
    }

    (out, advisories)
}

/// `main` plus an all-null `concept_name_vi` column — the degraded shape
/// used whenever the join cannot run.
pub fn with_null_translation(main: &Table) -> Table {
    let (mut out, vi_idx) = translation_shell(main);
    for row in main.rows() {
        out.push_row(place_translation(row, vi_idx, Value::Null));
    }
    out
}

/// Canonical string form of a join key: trimmed, case preserved, integers
/// rendered as decimal. Null and blank keys are non-joinable.
pub fn canonical_code(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Integer(n) => Some(n.to_string()),
        Value::Text(t) => {
            let trimmed = t.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
    }
}

/// Zero-row table with `main`'s columns plus the translation column, and
/// the index that column landed at. An existing `concept_name_vi` column
/// is reused in place rather than duplicated.
fn translation_shell(main: &Table) -> (Table, usize) {
    let mut columns: Vec<Column> = main.columns().to_vec();
    let vi_idx = match columns.iter().position(|c| c.name == TRANSLATION_COLUMN) {
        Some(idx) => {
            columns[idx] = Column::text(TRANSLATION_COLUMN);
            idx
        }
        None => {
            columns.push(Column::text(TRANSLATION_COLUMN));
            columns.len() - 1
        }
    };
    (Table::new(columns), vi_idx)
}

fn place_translation(row: &[Value], vi_idx: usize, text: Value) -> Vec<Value> {
    let mut cells = row.to_vec();
    if vi_idx < cells.len() {
        cells[vi_idx] = text;
    } else {
        cells.push(text);
    }
    cells
}
