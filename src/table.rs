//! In-memory tabular data — the typed row/column structure every pipeline
//! stage operates on.
//!
//! A `Table` keeps its columns in source order and tracks the value kind of
//! each column. Columns are `Integer` only when every non-empty source cell
//! is the canonical decimal rendering of an `i64`; anything weaker (leading
//! zeros, signs with padding, mixed content) keeps the whole column as text
//! so vocabulary codes never lose their exact shape.

use std::borrow::Cow;

use serde::{Serialize, Serializer};

// ═══════════════════════════════════════════════════════════
// Cell values
// ═══════════════════════════════════════════════════════════

/// A single table cell. Empty source cells are `Null`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Text(String),
    Null,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// String rendering used for search and export. `None` for null.
    pub fn render(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Integer(n) => Some(Cow::Owned(n.to_string())),
            Self::Text(t) => Some(Cow::Borrowed(t.as_str())),
            Self::Null => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Integer(n) => serializer.serialize_i64(*n),
            Self::Text(t) => serializer.serialize_str(t),
            Self::Null => serializer.serialize_none(),
        }
    }
}

/// Kind of a column's non-null cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Text,
}

/// Column schema entry: name plus value kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ColumnKind::Text)
    }
}

// ═══════════════════════════════════════════════════════════
// Table
// ═══════════════════════════════════════════════════════════

/// An ordered set of columns and row-major cells. Construction belongs to
/// the load/merge pipeline; search and statistics only read.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// A zero-row table carrying the given columns (all text kind).
    pub fn empty(column_names: &[&str]) -> Self {
        Self::new(column_names.iter().map(|n| Column::text(*n)).collect())
    }

    /// Build a typed table from header names and raw string cells.
    ///
    /// Per column: if every non-empty cell round-trips through `i64`
    /// formatting, the column is `Integer`; otherwise every cell stays
    /// text. Empty cells become `Null` either way.
    pub fn from_raw(headers: Vec<String>, raw_rows: Vec<Vec<Option<String>>>) -> Self {
        let column_count = headers.len();
        let mut kinds = vec![ColumnKind::Integer; column_count];

        for row in &raw_rows {
            for (idx, cell) in row.iter().enumerate().take(column_count) {
                if kinds[idx] == ColumnKind::Text {
                    continue;
                }
                if let Some(text) = cell.as_deref().filter(|t| !t.is_empty()) {
                    if canonical_integer(text).is_none() {
                        kinds[idx] = ColumnKind::Text;
                    }
                }
            }
        }

        let columns = headers
            .into_iter()
            .zip(kinds.iter().copied())
            .map(|(name, kind)| Column::new(name, kind))
            .collect();

        let rows = raw_rows
            .into_iter()
            .map(|row| {
                let mut cells: Vec<Value> = row
                    .into_iter()
                    .take(column_count)
                    .enumerate()
                    .map(|(idx, cell)| match cell.filter(|t| !t.is_empty()) {
                        None => Value::Null,
                        Some(text) => match kinds[idx] {
                            ColumnKind::Integer => match canonical_integer(&text) {
                                Some(n) => Value::Integer(n),
                                None => Value::Text(text),
                            },
                            ColumnKind::Text => Value::Text(text),
                        },
                    })
                    .collect();
                cells.resize(column_count, Value::Null);
                cells
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[Value]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Cell lookup by row index and column name. `None` when either the
    /// column or the row is absent.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Append a row. Cells beyond the column count are dropped, missing
    /// cells are filled with `Null`.
    pub fn push_row(&mut self, mut cells: Vec<Value>) {
        cells.truncate(self.columns.len());
        cells.resize(self.columns.len(), Value::Null);
        self.rows.push(cells);
    }

    /// Project onto `names`, in the given order, skipping names this table
    /// does not have. Kinds and row order are preserved.
    pub fn select(&self, names: &[&str]) -> Table {
        let picked: Vec<usize> = names
            .iter()
            .filter_map(|name| self.column_index(name))
            .collect();

        let columns = picked.iter().map(|&i| self.columns[i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| picked.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Table { columns, rows }
    }
}

/// Parse `text` as an `i64` only if it is the exact canonical decimal
/// rendering ("42" yes; "042", "+42", " 42" no).
pub fn canonical_integer(text: &str) -> Option<i64> {
    let n: i64 = text.parse().ok()?;
    if n.to_string() == text {
        Some(n)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(cells: &[&str]) -> Vec<Option<String>> {
        cells
            .iter()
            .map(|c| {
                if c.is_empty() {
                    None
                } else {
                    Some(c.to_string())
                }
            })
            .collect()
    }

    #[test]
    fn all_integer_column_is_typed_integer() {
        let table = Table::from_raw(
            vec!["concept_id".into(), "concept_name".into()],
            vec![raw(&["12345", "Hypertension"]), raw(&["23456", "Asthma"])],
        );
        assert_eq!(table.columns()[0].kind, ColumnKind::Integer);
        assert_eq!(table.columns()[1].kind, ColumnKind::Text);
        assert_eq!(table.value(0, "concept_id"), Some(&Value::Integer(12345)));
    }

    #[test]
    fn leading_zero_codes_stay_text() {
        let table = Table::from_raw(
            vec!["code".into()],
            vec![raw(&["0042"]), raw(&["17"])],
        );
        assert_eq!(table.columns()[0].kind, ColumnKind::Text);
        assert_eq!(table.value(0, "code"), Some(&Value::Text("0042".into())));
        assert_eq!(table.value(1, "code"), Some(&Value::Text("17".into())));
    }

    #[test]
    fn mixed_column_stays_text() {
        let table = Table::from_raw(
            vec!["code".into()],
            vec![raw(&["2345-7"]), raw(&["718"])],
        );
        assert_eq!(table.columns()[0].kind, ColumnKind::Text);
        assert_eq!(table.value(1, "code"), Some(&Value::Text("718".into())));
    }

    #[test]
    fn empty_cells_are_null_and_do_not_break_typing() {
        let table = Table::from_raw(
            vec!["concept_id".into()],
            vec![raw(&["12345"]), raw(&[""]), raw(&["23456"])],
        );
        assert_eq!(table.columns()[0].kind, ColumnKind::Integer);
        assert_eq!(table.value(1, "concept_id"), Some(&Value::Null));
    }

    #[test]
    fn ragged_rows_are_padded_with_null() {
        let table = Table::from_raw(
            vec!["a".into(), "b".into()],
            vec![raw(&["1"]), raw(&["2", "x"])],
        );
        assert_eq!(table.value(0, "b"), Some(&Value::Null));
        assert_eq!(table.value(1, "b"), Some(&Value::Text("x".into())));
    }

    #[test]
    fn select_projects_in_requested_order() {
        let table = Table::from_raw(
            vec!["b".into(), "a".into(), "junk".into()],
            vec![raw(&["2", "1", "z"])],
        );
        let projected = table.select(&["a", "missing", "b"]);
        assert_eq!(projected.column_names(), vec!["a", "b"]);
        assert_eq!(projected.value(0, "a"), Some(&Value::Integer(1)));
        assert!(!projected.has_column("junk"));
    }

    #[test]
    fn select_on_empty_table_keeps_zero_rows() {
        let table = Table::empty(&["concept_id", "concept_name"]);
        let projected = table.select(&["concept_name"]);
        assert_eq!(projected.row_count(), 0);
        assert_eq!(projected.column_names(), vec!["concept_name"]);
    }

    #[test]
    fn render_formats_integers_and_skips_null() {
        assert_eq!(Value::Integer(42).render().as_deref(), Some("42"));
        assert_eq!(Value::Text("I10".into()).render().as_deref(), Some("I10"));
        assert!(Value::Null.render().is_none());
    }

    #[test]
    fn canonical_integer_requires_exact_round_trip() {
        assert_eq!(canonical_integer("42"), Some(42));
        assert_eq!(canonical_integer("-7"), Some(-7));
        assert_eq!(canonical_integer("0"), Some(0));
        assert_eq!(canonical_integer("042"), None);
        assert_eq!(canonical_integer("+42"), None);
        assert_eq!(canonical_integer(" 42"), None);
        assert_eq!(canonical_integer("2345-7"), None);
        assert_eq!(canonical_integer(""), None);
    }

    #[test]
    fn value_serializes_to_json_primitives() {
        assert_eq!(serde_json::to_string(&Value::Integer(5)).unwrap(), "5");
        assert_eq!(
            serde_json::to_string(&Value::Text("Tăng huyết áp".into())).unwrap(),
            "\"Tăng huyết áp\""
        );
        assert_eq!(serde_json::to_string(&Value::Null).unwrap(), "null");
    }
}
