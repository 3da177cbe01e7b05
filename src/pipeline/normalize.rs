//! Column normalizer — projects a table onto the canonical column set.

use crate::config::CANONICAL_COLUMNS;
use crate::table::Table;

/// Project `table` onto the canonical columns, in canonical order.
///
/// Unknown columns are dropped silently; canonical columns the table does
/// not have are omitted rather than invented — downstream stages treat a
/// missing column as "feature absent" and default to zero/null.
pub fn normalize(table: &Table) -> Table {
    table.select(&CANONICAL_COLUMNS)
}
