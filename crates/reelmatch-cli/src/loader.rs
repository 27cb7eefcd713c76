//! CSV catalog loading.
//!
//! The header row names the columns; empty cells become nulls. Column
//! validation is left to `Catalog::from_table`, so a file without `title`
//! loads fine here and fails with `MissingColumn` when the engine is built.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use reelmatch_core::RawTable;

/// Loads a CSV file with a header row.
pub fn load_table(path: &Path) -> Result<RawTable> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let table = read_table(file).with_context(|| format!("cannot parse {}", path.display()))?;
    tracing::debug!(path = %path.display(), rows = table.len(), columns = table.columns().len(), "Catalog loaded");
    Ok(table)
}

/// Reads CSV from any reader. Ragged rows are padded with nulls.
pub fn read_table<R: Read>(reader: R) -> Result<RawTable> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv.headers()?.clone();
    let mut table = RawTable::new(headers.iter());
    for (line, record) in csv.records().enumerate() {
        let record = record.with_context(|| format!("record {}", line + 1))?;
        table.push_row(
            record
                .iter()
                .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                .collect(),
        );
    }
    Ok(table)
}
