//! Column discovery and row coercion.
//!
//! Uploads carry no declared schema: the header row plus the data cells are all
//! we have. Both the CSV and Excel readers lower their input to a raw grid and
//! hand it to [`build_table`], which discovers each column's role and coerces
//! cells to typed [`Cell`]s under the caller's [`RowPolicy`].

use chrono::{NaiveDate, NaiveDateTime};

use crate::analysis::rda::RdaReference;
use crate::error::{DietError, DietResult};
use crate::types::{Cell, Column, ColumnRole, FoodTable, TableSchema};

/// Headers recognized as the date column (case-insensitive).
const DATE_HEADERS: &[&str] = &["date", "day", "entry date", "log date", "logged", "timestamp"];

/// Headers recognized as free-text descriptor columns (case-insensitive).
const TEXT_HEADERS: &[&str] = &[
    "food",
    "food name",
    "main food description",
    "food code",
    "item",
    "description",
    "meal",
    "name",
    "notes",
];

/// What to do with a row containing an unparseable date or nutrient cell.
///
/// The default is [`RowPolicy::NullFill`], matching the lenient coercion the
/// dashboard expects from hand-maintained food logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPolicy {
    /// Replace the offending cell with [`Cell::Null`]; keep the row.
    #[default]
    NullFill,
    /// Discard the whole row. Dropped counts are reported in upload stats.
    DropRow,
    /// Fail ingestion with [`DietError::Parse`] on the first bad cell.
    Strict,
}

/// Untyped cell as read from the source format, before role discovery.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawCell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

/// Result of building a table: the typed table plus how many rows the
/// [`RowPolicy::DropRow`] policy discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    /// The ingested table.
    pub table: FoodTable,
    /// Rows discarded under [`RowPolicy::DropRow`]. Always 0 otherwise.
    pub dropped_rows: usize,
}

/// Discover column roles and coerce a raw grid into a [`FoodTable`].
///
/// Fails with [`DietError::MissingColumn`] when no date column or no nutrient
/// column can be identified.
pub(crate) fn build_table(
    headers: &[String],
    raw_rows: Vec<Vec<RawCell>>,
    policy: RowPolicy,
) -> DietResult<IngestOutcome> {
    let roles = discover_roles(headers, &raw_rows)?;
    let schema = TableSchema::new(
        headers
            .iter()
            .zip(roles.iter())
            .map(|(name, role)| Column::new(name.trim(), *role))
            .collect(),
    );

    let mut rows: Vec<Vec<Cell>> = Vec::with_capacity(raw_rows.len());
    let mut dropped_rows = 0usize;

    'rows: for (row_idx0, raw) in raw_rows.into_iter().enumerate() {
        // Report 1-based row numbers; +1 again because the header is row 1.
        let user_row = row_idx0 + 2;
        let mut out: Vec<Cell> = Vec::with_capacity(headers.len());

        for (col_idx, role) in roles.iter().enumerate() {
            let cell = raw.get(col_idx).unwrap_or(&RawCell::Empty);
            match coerce_cell(cell, *role) {
                Ok(c) => out.push(c),
                Err(message) => match policy {
                    RowPolicy::NullFill => out.push(Cell::Null),
                    RowPolicy::DropRow => {
                        dropped_rows += 1;
                        continue 'rows;
                    }
                    RowPolicy::Strict => {
                        return Err(DietError::Parse {
                            row: user_row,
                            column: headers[col_idx].trim().to_string(),
                            raw: raw_display(cell),
                            message,
                        });
                    }
                },
            }
        }
        rows.push(out);
    }

    Ok(IngestOutcome {
        table: FoodTable::new(schema, rows),
        dropped_rows,
    })
}

fn discover_roles(headers: &[String], raw_rows: &[Vec<RawCell>]) -> DietResult<Vec<ColumnRole>> {
    let mut roles: Vec<ColumnRole> = Vec::with_capacity(headers.len());
    let mut date_seen = false;

    for (idx, header) in headers.iter().enumerate() {
        let key = header.trim().to_lowercase();
        let role = if !date_seen && DATE_HEADERS.contains(&key.as_str()) {
            date_seen = true;
            ColumnRole::Date
        } else if TEXT_HEADERS.contains(&key.as_str()) {
            ColumnRole::Text
        } else if is_known_nutrient_header(header) || looks_numeric(raw_rows, idx) {
            ColumnRole::Nutrient
        } else {
            ColumnRole::Text
        };
        roles.push(role);
    }

    if !date_seen {
        return Err(DietError::MissingColumn {
            message: format!("no date column found. headers={headers:?}"),
        });
    }
    if !roles.contains(&ColumnRole::Nutrient) {
        return Err(DietError::MissingColumn {
            message: format!("no numeric nutrient column found. headers={headers:?}"),
        });
    }

    Ok(roles)
}

/// A header naming a nutrient the RDA reference tracks is a nutrient column no
/// matter what its cells hold, so bad cells reach the row policy instead of
/// demoting the column to text.
fn is_known_nutrient_header(header: &str) -> bool {
    RdaReference::builtin().lookup(header).is_some()
}

/// A candidate column is numeric when at least half of its non-empty cells are
/// numbers (or number-like text). A column with no data at all counts as
/// numeric so that header-only uploads still expose their nutrient columns.
fn looks_numeric(raw_rows: &[Vec<RawCell>], col_idx: usize) -> bool {
    let mut non_empty = 0usize;
    let mut numeric = 0usize;
    for row in raw_rows {
        match row.get(col_idx) {
            None | Some(RawCell::Empty) => {}
            Some(RawCell::Number(_)) => {
                non_empty += 1;
                numeric += 1;
            }
            Some(RawCell::Text(s)) => {
                non_empty += 1;
                if s.trim().parse::<f64>().is_ok() {
                    numeric += 1;
                }
            }
            Some(RawCell::Date(_)) => {
                non_empty += 1;
            }
        }
    }
    non_empty == 0 || numeric * 2 >= non_empty
}

fn coerce_cell(cell: &RawCell, role: ColumnRole) -> Result<Cell, String> {
    match role {
        ColumnRole::Date => match cell {
            RawCell::Empty => Ok(Cell::Null),
            RawCell::Date(d) => Ok(Cell::Date(*d)),
            RawCell::Text(s) => parse_date_str(s).map(Cell::Date),
            RawCell::Number(_) => Err("expected date".to_string()),
        },
        ColumnRole::Text => match cell {
            RawCell::Empty => Ok(Cell::Null),
            RawCell::Text(s) => Ok(Cell::Text(s.trim().to_string())),
            RawCell::Number(v) => Ok(Cell::Text(display_number(*v))),
            RawCell::Date(d) => Ok(Cell::Text(d.format("%Y-%m-%d").to_string())),
        },
        ColumnRole::Nutrient => match cell {
            RawCell::Empty => Ok(Cell::Null),
            RawCell::Number(v) => Ok(Cell::Number(*v)),
            RawCell::Text(s) => s
                .trim()
                .parse::<f64>()
                .map(Cell::Number)
                .map_err(|e| e.to_string()),
            RawCell::Date(_) => Err("expected number".to_string()),
        },
    }
}

/// Parse a date from text, trying the formats seen in real food logs.
pub(crate) fn parse_date_str(s: &str) -> Result<NaiveDate, String> {
    let s = s.trim();
    const FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];
    for fmt in FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    // Timestamps ("2024-01-01 08:30:00" / ISO) collapse to their date.
    for fmt in &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    Err(format!("unrecognized date '{s}'"))
}

fn display_number(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

fn raw_display(cell: &RawCell) -> String {
    match cell {
        RawCell::Empty => String::new(),
        RawCell::Text(s) => s.clone(),
        RawCell::Number(v) => v.to_string(),
        RawCell::Date(d) => d.format("%Y-%m-%d").to_string(),
    }
}
