//! Search engine — exact-id and case-insensitive substring matching over a
//! unified vocabulary table.
//!
//! A `ResultSet` is a read-only view: the backing table plus the ordered
//! row indices that passed the filters so far. Filters compose by
//! narrowing the view; the table itself is never copied or mutated, and
//! row order always follows the table.

use crate::config::SEARCH_COLUMNS;
use crate::pipeline::merge::TRANSLATION_COLUMN;
use crate::table::{Table, Value};

/// An ordered subset of a table's rows, same columns.
#[derive(Debug, Clone)]
pub struct ResultSet<'a> {
    table: &'a Table,
    rows: Vec<usize>,
}

impl<'a> ResultSet<'a> {
    /// The identity view: every row of `table`, in order.
    pub fn all(table: &'a Table) -> Self {
        Self {
            table,
            rows: (0..table.row_count()).collect(),
        }
    }

    pub fn table(&self) -> &'a Table {
        self.table
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Table row indices backing this view, in view order.
    pub fn row_indices(&self) -> &[usize] {
        &self.rows
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a [Value]> + '_ {
        self.rows.iter().filter_map(move |&idx| self.table.row(idx))
    }

    /// Cell of the `view_row`-th row of the view.
    pub fn value(&self, view_row: usize, column: &str) -> Option<&'a Value> {
        let table_row = *self.rows.get(view_row)?;
        let col = self.table.column_index(column)?;
        self.table.row(table_row).and_then(|row| row.get(col))
    }

    /// Rows matching `query` in ANY searchable column (union semantics).
    ///
    /// An empty or whitespace-only query is the identity, as is a table
    /// with none of the searchable columns. When the query parses as an
    /// integer, the `concept_id` column is matched by exact equality —
    /// "12345" finds id 12345, never id 123456; every other column is a
    /// case-insensitive substring match on the rendered cell, and null
    /// cells never match.
    pub fn search(&self, query: &str) -> ResultSet<'a> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return self.clone();
        }

        let columns: Vec<usize> = SEARCH_COLUMNS
            .iter()
            .filter_map(|name| self.table.column_index(name))
            .collect();
        if columns.is_empty() {
            return self.clone();
        }

        let needle = trimmed.to_lowercase();
        let exact_id = trimmed.parse::<i64>().ok();
        let id_column = self.table.column_index("concept_id");

        let rows = self
            .rows
            .iter()
            .copied()
            .filter(|&idx| {
                let Some(row) = self.table.row(idx) else {
                    return false;
                };
                columns.iter().any(|&col| {
                    if Some(col) == id_column {
                        if let Some(id) = exact_id {
                            return row[col].as_integer() == Some(id);
                        }
                    }
                    match row[col].render() {
                        Some(text) => text.to_lowercase().contains(&needle),
                        None => false,
                    }
                })
            })
            .collect();

        ResultSet {
            table: self.table,
            rows,
        }
    }

    /// Restrict to rows with a non-null Vietnamese translation. A table
    /// without the translation column passes through unchanged.
    pub fn mapped_only(&self) -> ResultSet<'a> {
        let Some(col) = self.table.column_index(TRANSLATION_COLUMN) else {
            return self.clone();
        };
        let rows = self
            .rows
            .iter()
            .copied()
            .filter(|&idx| {
                self.table
                    .row(idx)
                    .is_some_and(|row| !row[col].is_null())
            })
            .collect();
        ResultSet {
            table: self.table,
            rows,
        }
    }

    /// Display truncation: the first `n` rows of the view.
    pub fn first(&self, n: usize) -> ResultSet<'a> {
        ResultSet {
            table: self.table,
            rows: self.rows.iter().copied().take(n).collect(),
        }
    }
}

/// Entry point for filter chains: the identity view over `table`.
pub fn all(table: &Table) -> ResultSet<'_> {
    ResultSet::all(table)
}
