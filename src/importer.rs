//! Spreadsheet-export ingest.
//!
//! The operator's sheet reaches this service as a CSV file. The reader
//! consumes the header row; data rows are padded (or truncated) to the schema
//! width so the store can bind them positionally.

use std::path::Path;

use anyhow::Context;

use crate::storage::schema::COLUMN_COUNT;

/// Reads all data rows from the export at `path`.
///
/// An unreadable file is an upstream failure; a file with only a header row
/// yields an empty batch, which callers treat as a no-op import.
pub fn load_rows(path: &Path) -> anyhow::Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening spreadsheet export {}", path.display()))?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.context("reading spreadsheet row")?;
        let row: Vec<String> = record.iter().map(str::to_owned).collect();
        rows.push(pad_row(row, COLUMN_COUNT));
    }
    Ok(rows)
}

/// Right-pads a short row with empty strings to exactly `width` columns;
/// extra trailing values are truncated.
pub fn pad_row(mut row: Vec<String>, width: usize) -> Vec<String> {
    row.resize(width, String::new());
    row
}
