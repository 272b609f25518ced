use thiserror::Error;

/// Convenience result type for table operations.
pub type DietResult<T> = Result<T, DietError>;

/// Error type shared across ingestion, aggregation, and export.
///
/// Every failure surfaces directly to the caller; nothing is retried. The only
/// errors that can be swallowed are per-cell coercion failures, and only when the
/// caller opts into [`crate::ingest::RowPolicy::NullFill`] or
/// [`crate::ingest::RowPolicy::DropRow`].
#[derive(Debug, Error)]
pub enum DietError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Unreadable or malformed workbook.
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// Unreadable or malformed CSV.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook serialization error during export.
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// The upload has no recognizable date column or no numeric nutrient column.
    #[error("missing column: {message}")]
    MissingColumn { message: String },

    /// A cell could not be coerced to the type its column requires.
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    Parse {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// A custom RDA reference table failed to deserialize.
    #[error("invalid RDA table: {0}")]
    Rda(#[from] serde_json::Error),

    /// Report serialization failure. There is no partial-success mode: the whole
    /// table either serializes or it does not.
    #[error("export error: {message}")]
    Export { message: String },
}
