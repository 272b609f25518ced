//! Unified ingestion entrypoint.
//!
//! Most callers should use [`ingest_upload`], which turns an uploaded byte
//! stream into an in-memory [`crate::types::FoodTable`].
//!
//! - If [`UploadOptions::format`] is `None`, the format is inferred from the
//!   upload's file extension.
//! - If an [`super::observability::UploadObserver`] is provided,
//!   success/failure/alerts are reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{DietError, DietResult};
use crate::types::FoodTable;

use super::columns::{IngestOutcome, RowPolicy};
use super::observability::{UploadContext, UploadObserver, UploadSeverity, UploadStats};
use super::{csv, excel};

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    /// Comma-separated values.
    Csv,
    /// Spreadsheet/workbook formats.
    Excel,
}

impl UploadFormat {
    /// Parse an upload format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Excel),
            _ => None,
        }
    }
}

/// How to choose sheet(s) when ingesting a workbook.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SheetSelection {
    /// Ingest the first sheet (default).
    #[default]
    First,
    /// Ingest a single named sheet.
    Sheet(String),
    /// Ingest all sheets and concatenate rows.
    AllSheets,
    /// Ingest only the listed sheets (in order) and concatenate rows.
    Sheets(Vec<String>),
}

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct UploadOptions {
    /// If `None`, auto-detect format from the upload's file extension.
    pub format: Option<UploadFormat>,
    /// Workbook-specific sheet selection.
    pub sheets: SheetSelection,
    /// What to do with rows containing unparseable dates or nutrient cells.
    pub row_policy: RowPolicy,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn UploadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: UploadSeverity,
}

impl fmt::Debug for UploadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadOptions")
            .field("format", &self.format)
            .field("sheets", &self.sheets)
            .field("row_policy", &self.row_policy)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            format: None,
            sheets: SheetSelection::default(),
            row_policy: RowPolicy::default(),
            observer: None,
            alert_at_or_above: UploadSeverity::Critical,
        }
    }
}

/// Ingest an uploaded byte stream into a [`FoodTable`].
///
/// `name` is the upload's filename; it is used for format inference (unless
/// `options.format` is set) and in observer events.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row and dropped-row counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use diet_tracker_core::ingest::{ingest_upload, UploadOptions};
///
/// # fn main() -> Result<(), diet_tracker_core::DietError> {
/// let bytes = std::fs::read("food_log.xlsx")?;
/// let table = ingest_upload("food_log.xlsx", &bytes, &UploadOptions::default())?;
/// println!("rows={}", table.row_count());
/// # Ok(())
/// # }
/// ```
pub fn ingest_upload(
    name: &str,
    bytes: &[u8],
    options: &UploadOptions,
) -> DietResult<FoodTable> {
    let fmt = match options.format {
        Some(f) => f,
        None => infer_format_from_name(name)?,
    };
    let ctx = UploadContext {
        name: name.to_string(),
        format: fmt,
    };

    let result = match fmt {
        UploadFormat::Csv => csv::ingest_csv_bytes(bytes, options.row_policy),
        UploadFormat::Excel => ingest_excel_bytes_dispatch(bytes, options),
    };

    observe(&ctx, &result, options);
    result.map(|o| o.table)
}

/// Ingest a file on disk. Same behavior as [`ingest_upload`], with the path's
/// filename standing in for the upload name.
pub fn ingest_from_path(path: impl AsRef<Path>, options: &UploadOptions) -> DietResult<FoodTable> {
    let path = path.as_ref();
    let name = path.display().to_string();
    let fmt = match options.format {
        Some(f) => f,
        None => infer_format_from_name(&name)?,
    };
    let ctx = UploadContext {
        name,
        format: fmt,
    };

    let result = match fmt {
        UploadFormat::Csv => csv::ingest_csv_from_path(path, options.row_policy),
        UploadFormat::Excel => match &options.sheets {
            SheetSelection::First => {
                excel::ingest_excel_from_path(path, None, options.row_policy)
            }
            SheetSelection::Sheet(s) => {
                excel::ingest_excel_from_path(path, Some(s.as_str()), options.row_policy)
            }
            SheetSelection::AllSheets => {
                excel::ingest_excel_workbook_from_path(path, None, options.row_policy)
            }
            SheetSelection::Sheets(names) => {
                let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
                excel::ingest_excel_workbook_from_path(path, Some(&refs), options.row_policy)
            }
        },
    };

    observe(&ctx, &result, options);
    result.map(|o| o.table)
}

fn ingest_excel_bytes_dispatch(
    bytes: &[u8],
    options: &UploadOptions,
) -> DietResult<IngestOutcome> {
    match &options.sheets {
        SheetSelection::First => excel::ingest_excel_bytes(bytes, None, options.row_policy),
        SheetSelection::Sheet(s) => {
            excel::ingest_excel_bytes(bytes, Some(s.as_str()), options.row_policy)
        }
        SheetSelection::AllSheets => {
            excel::ingest_excel_workbook_bytes(bytes, None, options.row_policy)
        }
        SheetSelection::Sheets(names) => {
            let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
            excel::ingest_excel_workbook_bytes(bytes, Some(&refs), options.row_policy)
        }
    }
}

fn observe(ctx: &UploadContext, result: &DietResult<IngestOutcome>, options: &UploadOptions) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    match result {
        Ok(outcome) => obs.on_success(
            ctx,
            UploadStats {
                rows: outcome.table.row_count(),
                dropped_rows: outcome.dropped_rows,
            },
        ),
        Err(e) => {
            let sev = severity_for_error(e);
            obs.on_failure(ctx, sev, e);
            if sev >= options.alert_at_or_above {
                obs.on_alert(ctx, sev, e);
            }
        }
    }
}

fn severity_for_error(e: &DietError) -> UploadSeverity {
    match e {
        DietError::Io(_) => UploadSeverity::Critical,
        DietError::Excel(err) => match err {
            calamine::Error::Io(_) => UploadSeverity::Critical,
            _ => UploadSeverity::Error,
        },
        DietError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => UploadSeverity::Critical,
            _ => UploadSeverity::Error,
        },
        DietError::MissingColumn { .. } => UploadSeverity::Error,
        DietError::Parse { .. } => UploadSeverity::Error,
        // A bad custom RDA table is a config problem, not an infrastructure one.
        DietError::Rda(_) => UploadSeverity::Error,
        // Export-side errors do not originate in ingestion.
        DietError::Xlsx(_) | DietError::Export { .. } => UploadSeverity::Error,
    }
}


fn infer_format_from_name(name: &str) -> DietResult<UploadFormat> {
    let ext = Path::new(name)
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| DietError::MissingColumn {
            message: format!("cannot infer upload format: name has no extension ({name})"),
        })?;

    UploadFormat::from_extension(ext).ok_or_else(|| DietError::MissingColumn {
        message: format!("cannot infer upload format from extension '{ext}' ({name})"),
    })
}
