//! Source loader — reads one tabular file into a typed `Table`.
//!
//! Formats are picked by extension: `.xlsx`/`.xls` go through the
//! spreadsheet reader (first worksheet, first row is the header), anything
//! else is comma-delimited text with a header row. Failures are typed, not
//! raised: the catalog builder turns them into advisories and degraded
//! tables instead of crashing a request.

use std::io::Read;
use std::path::Path;

use calamine::{open_workbook, Data, Reader as SpreadsheetReader, Xlsx};

use crate::table::Table;

/// UTF-8 byte-order mark, stripped before parsing.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Leading bytes of a Git LFS pointer stub.
const LFS_POINTER_PREFIX: &[u8] = b"version https://git-lfs";

/// Why a source file could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("file not found: {0}")]
    NotFound(String),

    #[error("file has no data rows or no columns")]
    Empty,

    #[error("file is a large-file-storage pointer stub, not the dataset")]
    PlaceholderFile,

    #[error("parse failure: {0}")]
    Parse(String),
}

/// Load a tabular source file.
pub fn load_table(path: &Path) -> Result<Table, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.display().to_string()));
    }

    let table = if is_spreadsheet(path) {
        load_spreadsheet(path)?
    } else {
        load_delimited(path)?
    };

    // Pointer-stub shape check runs before the empty check: a stub parses
    // to a single column whose header carries the version line.
    if table.column_count() == 1
        && table
            .columns()
            .first()
            .is_some_and(|c| c.name.contains("version"))
    {
        return Err(LoadError::PlaceholderFile);
    }

    if table.column_count() == 0 || table.is_empty() {
        return Err(LoadError::Empty);
    }

    Ok(table)
}

fn is_spreadsheet(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xls")
    )
}

// ── Delimited text ──────────────────────────────────────────

fn load_delimited(path: &Path) -> Result<Table, LoadError> {
    let bytes = std::fs::read(path).map_err(|e| LoadError::Parse(e.to_string()))?;
    let text = decode_text(&bytes);

    let mut reader = csv::ReaderBuilder::new().from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::Parse(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut raw_rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| LoadError::Parse(e.to_string()))?;
        raw_rows.push(
            record
                .iter()
                .map(|cell| {
                    if cell.is_empty() {
                        None
                    } else {
                        Some(cell.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(Table::from_raw(headers, raw_rows))
}

/// Decode file bytes as UTF-8, UTF-8 with BOM, or Latin-1 — in that order.
/// Latin-1 maps every byte, so legacy exports never fail on encoding alone.
fn decode_text(bytes: &[u8]) -> String {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => text.to_string(),
        Err(_) => body.iter().map(|&b| char::from(b)).collect(),
    }
}

// ── Spreadsheet ─────────────────────────────────────────────

fn load_spreadsheet(path: &Path) -> Result<Table, LoadError> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e| classify_workbook_error(path, e))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| LoadError::Parse(e.to_string()))?,
        None => return Err(LoadError::Empty),
    };

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header) => header
            .iter()
            .map(|cell| cell_to_raw(cell).unwrap_or_default())
            .collect(),
        None => return Err(LoadError::Empty),
    };

    let raw_rows: Vec<Vec<Option<String>>> =
        rows.map(|row| row.iter().map(cell_to_raw).collect()).collect();

    Ok(Table::from_raw(headers, raw_rows))
}

/// A workbook that fails to open may be an LFS stub saved under the
/// spreadsheet's name; sniff the pointer signature before calling it a
/// parse failure.
fn classify_workbook_error(path: &Path, err: calamine::XlsxError) -> LoadError {
    if file_starts_with(path, LFS_POINTER_PREFIX) {
        LoadError::PlaceholderFile
    } else {
        LoadError::Parse(err.to_string())
    }
}

fn file_starts_with(path: &Path, prefix: &[u8]) -> bool {
    let mut buf = vec![0u8; prefix.len()];
    match std::fs::File::open(path).and_then(|mut f| f.read_exact(&mut buf)) {
        Ok(()) => buf == prefix,
        Err(_) => false,
    }
}

fn cell_to_raw(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(n) => Some(n.to_string()),
        Data::Float(f) => {
            // Spreadsheets store integers as floats; keep integral values
            // in their integer rendering so codes join cleanly.
            if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 {
                Some((*f as i64).to_string())
            } else {
                Some(f.to_string())
            }
        }
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(dt.as_f64().to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Error(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{ColumnKind, Value};

    fn write_temp(name: &str, contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    fn fixture(name: &str) -> std::path::PathBuf {
        std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    #[test]
    fn loads_csv_with_typed_columns() {
        let (_dir, path) = write_temp(
            "main.csv",
            "concept_id,concept_name,concept_code\n12345,Hypertension,38341003\n23456,Asthma,195967001\n",
        );
        let table = load_table(&path).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns()[0].kind, ColumnKind::Integer);
        assert_eq!(table.value(0, "concept_name"), Some(&Value::Text("Hypertension".into())));
        assert_eq!(table.value(0, "concept_code"), Some(&Value::Integer(38341003)));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_table(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn header_only_file_is_empty() {
        let (_dir, path) = write_temp("empty.csv", "concept_id,concept_name\n");
        assert!(matches!(load_table(&path).unwrap_err(), LoadError::Empty));
    }

    #[test]
    fn zero_byte_file_is_empty() {
        let (_dir, path) = write_temp("zero.csv", "");
        assert!(matches!(load_table(&path).unwrap_err(), LoadError::Empty));
    }

    #[test]
    fn lfs_pointer_is_placeholder() {
        let (_dir, path) = write_temp(
            "data.csv",
            "version https://git-lfs.github.com/spec/v1\noid sha256:4d7a214614ab2935c943f9e0ff69d22eadbb8f32b1258daaa5e2ca24d17e2393\nsize 12345\n",
        );
        assert!(matches!(
            load_table(&path).unwrap_err(),
            LoadError::PlaceholderFile
        ));
    }

    #[test]
    fn ragged_csv_is_a_parse_error() {
        let (_dir, path) = write_temp("bad.csv", "a,b\n1,2,3\n");
        assert!(matches!(load_table(&path).unwrap_err(), LoadError::Parse(_)));
    }

    #[test]
    fn utf8_bom_is_stripped_from_header() {
        let (_dir, path) = write_temp("bom.csv", "\u{feff}Code,Name\nI10,Primary hypertension\n");
        let table = load_table(&path).unwrap();
        assert!(table.has_column("Code"));
        assert_eq!(table.value(0, "Code"), Some(&Value::Text("I10".into())));
    }

    #[test]
    fn latin1_bytes_fall_back_without_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.csv");
        // "café" in Latin-1: 0xE9 is invalid as UTF-8
        std::fs::write(&path, b"name\ncaf\xe9\n").unwrap();
        let table = load_table(&path).unwrap();
        assert_eq!(table.value(0, "name"), Some(&Value::Text("café".into())));
    }

    #[test]
    fn empty_cells_load_as_null() {
        let (_dir, path) = write_temp("gaps.csv", "a,b\n1,\n,x\n");
        let table = load_table(&path).unwrap();
        assert_eq!(table.value(0, "b"), Some(&Value::Null));
        assert_eq!(table.value(1, "a"), Some(&Value::Null));
    }

    // ── Spreadsheet tests ───────────────────────────────────

    #[test]
    fn loads_xlsx_first_sheet_with_header_row() {
        let table = load_table(&fixture("icd10_translations.xlsx")).unwrap();
        assert_eq!(table.column_names(), vec!["Code", "Nội dung"]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(
            table.value(0, "Nội dung"),
            Some(&Value::Text("Tăng huyết áp nguyên phát".into()))
        );
        assert_eq!(table.value(2, "Code"), Some(&Value::Text("J45.9".into())));
    }

    #[test]
    fn lfs_pointer_saved_as_xlsx_is_placeholder() {
        let (_dir, path) = write_temp(
            "Danh muc.xlsx",
            "version https://git-lfs.github.com/spec/v1\noid sha256:abc\nsize 9\n",
        );
        assert!(matches!(
            load_table(&path).unwrap_err(),
            LoadError::PlaceholderFile
        ));
    }

    #[test]
    fn garbage_xlsx_is_a_parse_error() {
        let (_dir, path) = write_temp("broken.xlsx", "this is not a zip archive");
        assert!(matches!(load_table(&path).unwrap_err(), LoadError::Parse(_)));
    }
}
