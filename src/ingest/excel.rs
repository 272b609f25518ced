//! Excel/workbook ingestion (`.xlsx`, `.xls`, `.xlsm`, `.xlsb`, `.ods`).
//!
//! Behavior:
//! - Reads from an in-memory byte stream (the upload case) or a path
//! - Picks the requested sheet(s); multi-sheet ingestion concatenates rows and
//!   requires every tab to share the header row of the first
//! - Detects the first non-empty row as the header row
//! - Lowers cells to a raw grid and defers typing to column discovery

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader, Sheets};

use crate::error::{DietError, DietResult};

use super::columns::{self, IngestOutcome, RawCell, RowPolicy};

/// Ingest a single sheet from workbook bytes. Uses the first sheet when
/// `sheet_name` is `None`.
pub fn ingest_excel_bytes(
    bytes: &[u8],
    sheet_name: Option<&str>,
    policy: RowPolicy,
) -> DietResult<IngestOutcome> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let sheets = resolve_single_sheet(&mut workbook, sheet_name)?;
    ingest_sheets(&mut workbook, &sheets, policy)
}

/// Ingest multiple sheets from workbook bytes and concatenate all rows.
///
/// - `None` ingests **all sheets** in workbook order.
/// - `Some(&[...])` ingests only those sheets (in the provided order).
///
/// All selected tabs must share the header row of the first.
pub fn ingest_excel_workbook_bytes(
    bytes: &[u8],
    sheet_names: Option<&[&str]>,
    policy: RowPolicy,
) -> DietResult<IngestOutcome> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let sheets = resolve_sheet_list(&mut workbook, sheet_names)?;
    ingest_sheets(&mut workbook, &sheets, policy)
}

/// Path-based variant of [`ingest_excel_bytes`].
pub fn ingest_excel_from_path(
    path: impl AsRef<Path>,
    sheet_name: Option<&str>,
    policy: RowPolicy,
) -> DietResult<IngestOutcome> {
    let mut workbook = open_workbook_auto(path)?;
    let sheets = resolve_single_sheet(&mut workbook, sheet_name)?;
    ingest_sheets(&mut workbook, &sheets, policy)
}

/// Path-based variant of [`ingest_excel_workbook_bytes`].
pub fn ingest_excel_workbook_from_path(
    path: impl AsRef<Path>,
    sheet_names: Option<&[&str]>,
    policy: RowPolicy,
) -> DietResult<IngestOutcome> {
    let mut workbook = open_workbook_auto(path)?;
    let sheets = resolve_sheet_list(&mut workbook, sheet_names)?;
    ingest_sheets(&mut workbook, &sheets, policy)
}

fn resolve_single_sheet<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    sheet_name: Option<&str>,
) -> DietResult<Vec<String>> {
    match sheet_name {
        Some(name) => Ok(vec![name.to_string()]),
        None => {
            let first = workbook.sheet_names().first().cloned().ok_or_else(|| {
                DietError::MissingColumn {
                    message: "workbook has no sheets".to_string(),
                }
            })?;
            Ok(vec![first])
        }
    }
}

fn resolve_sheet_list<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    sheet_names: Option<&[&str]>,
) -> DietResult<Vec<String>> {
    let sheets: Vec<String> = match sheet_names {
        Some(names) => names.iter().map(|s| s.to_string()).collect(),
        None => workbook.sheet_names().to_vec(),
    };
    if sheets.is_empty() {
        return Err(DietError::MissingColumn {
            message: "workbook has no sheets".to_string(),
        });
    }
    Ok(sheets)
}

fn ingest_sheets<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    sheets: &[String],
    policy: RowPolicy,
) -> DietResult<IngestOutcome> {
    let mut headers: Option<Vec<String>> = None;
    let mut raw_rows: Vec<Vec<RawCell>> = Vec::new();

    for sheet in sheets {
        let range = workbook.worksheet_range(sheet)?;
        let (sheet_headers, mut sheet_rows) = lower_sheet_range(sheet, &range)?;
        match &headers {
            None => headers = Some(sheet_headers),
            Some(first) => {
                if !headers_match(first, &sheet_headers) {
                    return Err(DietError::MissingColumn {
                        message: format!(
                            "sheet '{sheet}': header row differs from first sheet. \
                             expected={first:?} got={sheet_headers:?}"
                        ),
                    });
                }
            }
        }
        raw_rows.append(&mut sheet_rows);
    }

    let headers = headers.ok_or_else(|| DietError::MissingColumn {
        message: "workbook has no sheets".to_string(),
    })?;
    columns::build_table(&headers, raw_rows, policy)
}

fn headers_match(a: &[String], b: &[String]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b.iter())
            .all(|(x, y)| x.trim().eq_ignore_ascii_case(y.trim()))
}

/// Split a sheet range into its header row (first non-empty row) and the raw
/// data rows below it.
fn lower_sheet_range(
    sheet: &str,
    range: &calamine::Range<Data>,
) -> DietResult<(Vec<String>, Vec<Vec<RawCell>>)> {
    let mut header_row_idx: Option<usize> = None;
    let mut headers: Vec<String> = Vec::new();

    for (idx0, row) in range.rows().enumerate() {
        if row.iter().any(|c| !matches!(c, Data::Empty)) {
            header_row_idx = Some(idx0);
            headers = row.iter().map(cell_to_header_string).collect();
            break;
        }
    }

    let header_row_idx = header_row_idx.ok_or_else(|| DietError::MissingColumn {
        message: format!("sheet '{sheet}' has no non-empty rows (no header row found)"),
    })?;

    let mut raw_rows: Vec<Vec<RawCell>> = Vec::new();
    for (idx0, row) in range.rows().enumerate() {
        if idx0 <= header_row_idx {
            continue;
        }
        raw_rows.push(row.iter().map(lower_cell).collect());
    }

    Ok((headers, raw_rows))
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(f) => f.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => "".to_string(),
    }
}

fn lower_cell(c: &Data) -> RawCell {
    match c {
        Data::Empty => RawCell::Empty,
        Data::String(s) => {
            if s.trim().is_empty() {
                RawCell::Empty
            } else {
                RawCell::Text(s.clone())
            }
        }
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Float(f) => RawCell::Number(*f),
        Data::Bool(b) => RawCell::Text(b.to_string()),
        // Native Excel dates collapse to their calendar day.
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => RawCell::Date(ndt.date()),
            None => RawCell::Empty,
        },
        Data::DateTimeIso(s) => RawCell::Text(s.clone()),
        Data::DurationIso(s) => RawCell::Text(s.clone()),
        // Cell errors (#DIV/0! and friends) read as missing values.
        Data::Error(_) => RawCell::Empty,
    }
}
