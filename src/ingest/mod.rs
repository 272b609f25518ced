//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ingest_upload`] (from [`unified`]) which:
//!
//! - auto-detects format by file extension (or you can override via [`UploadOptions`])
//! - discovers column roles (date / text / nutrient) from the header and data
//! - coerces cells under the configured [`RowPolicy`]
//! - optionally reports success/failure/alerts to an [`UploadObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - [`excel`]

pub mod columns;
pub mod csv;
pub mod excel;
pub mod observability;
pub mod unified;

pub use columns::{IngestOutcome, RowPolicy};
pub use observability::{
    CompositeObserver, FileObserver, StdErrObserver, UploadContext, UploadObserver,
    UploadSeverity, UploadStats,
};
pub use unified::{ingest_from_path, ingest_upload, SheetSelection, UploadFormat, UploadOptions};
