//! CSV export — serializes the full filtered result set for download.

use std::borrow::Cow;

use crate::search::ResultSet;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("export buffer error: {0}")]
    Buffer(String),
}

/// Serialize the view as UTF-8 comma-delimited text with a header row.
/// Null cells become empty fields; integers render in decimal. Always the
/// full view — display truncation never applies to exports.
pub fn write_csv(results: &ResultSet<'_>) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(results.table().column_names())?;
    for row in results.rows() {
        let record: Vec<Cow<'_, str>> = row
            .iter()
            .map(|value| value.render().unwrap_or(Cow::Borrowed("")))
            .collect();
        writer.write_record(record.iter().map(|cell| cell.as_ref()))?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))
}

/// Download filename for a vocabulary's export.
pub fn export_filename(vocabulary_id: &str) -> String {
    format!("{vocabulary_id}_search_results.csv")
}
