//! CSV ingestion.
//!
//! CSV is the secondary upload format (and the shape the export layer's CSV
//! download produces). Rules:
//!
//! - The file must have a header row.
//! - Column roles are discovered from the headers and data, exactly as for
//!   workbook uploads.

use std::path::Path;

use crate::error::DietResult;

use super::columns::{self, IngestOutcome, RawCell, RowPolicy};

/// Ingest CSV bytes into a [`crate::types::FoodTable`].
pub fn ingest_csv_bytes(bytes: &[u8], policy: RowPolicy) -> DietResult<IngestOutcome> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);
    ingest_csv_from_reader(&mut rdr, policy)
}

/// Ingest a CSV file from a path.
pub fn ingest_csv_from_path(path: impl AsRef<Path>, policy: RowPolicy) -> DietResult<IngestOutcome> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr, policy)
}

/// Ingest CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    policy: RowPolicy,
) -> DietResult<IngestOutcome> {
    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();

    let mut raw_rows: Vec<Vec<RawCell>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        raw_rows.push(
            record
                .iter()
                .map(|raw| {
                    if raw.trim().is_empty() {
                        RawCell::Empty
                    } else {
                        RawCell::Text(raw.to_string())
                    }
                })
                .collect(),
        );
    }

    columns::build_table(&headers, raw_rows, policy)
}
