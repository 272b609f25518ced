use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::DietError;

use super::unified::UploadFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UploadSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (the upload was rejected).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

/// Context about an upload attempt.
#[derive(Debug, Clone)]
pub struct UploadContext {
    /// Upload filename (or path, for file-based ingestion).
    pub name: String,
    /// Format used for ingestion.
    pub format: UploadFormat,
}

/// Stats reported on a successful upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadStats {
    /// Number of ingested rows.
    pub rows: usize,
    /// Rows discarded by [`super::RowPolicy::DropRow`]. Always 0 under other
    /// policies.
    pub dropped_rows: usize,
}

/// Observer interface for upload outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait UploadObserver: Send + Sync {
    /// Called when an upload ingests successfully.
    fn on_success(&self, _ctx: &UploadContext, _stats: UploadStats) {}

    /// Called when an upload is rejected.
    fn on_failure(&self, _ctx: &UploadContext, _severity: UploadSeverity, _error: &DietError) {}

    /// Called when a rejection meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &UploadContext, severity: UploadSeverity, error: &DietError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn UploadObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn UploadObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl UploadObserver for CompositeObserver {
    fn on_success(&self, ctx: &UploadContext, stats: UploadStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &UploadContext, severity: UploadSeverity, error: &DietError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &UploadContext, severity: UploadSeverity, error: &DietError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs upload events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl UploadObserver for StdErrObserver {
    fn on_success(&self, ctx: &UploadContext, stats: UploadStats) {
        eprintln!(
            "[upload][ok] format={:?} name={} rows={} dropped={}",
            ctx.format, ctx.name, stats.rows, stats.dropped_rows
        );
    }

    fn on_failure(&self, ctx: &UploadContext, severity: UploadSeverity, error: &DietError) {
        eprintln!(
            "[upload][{:?}] format={:?} name={} err={}",
            severity, ctx.format, ctx.name, error
        );
    }

    fn on_alert(&self, ctx: &UploadContext, severity: UploadSeverity, error: &DietError) {
        eprintln!(
            "[ALERT][upload][{:?}] format={:?} name={} err={}",
            severity, ctx.format, ctx.name, error
        );
    }
}

/// Appends upload events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl UploadObserver for FileObserver {
    fn on_success(&self, ctx: &UploadContext, stats: UploadStats) {
        self.append_line(&format!(
            "{} ok format={:?} name={} rows={} dropped={}",
            unix_ts(),
            ctx.format,
            ctx.name,
            stats.rows,
            stats.dropped_rows
        ));
    }

    fn on_failure(&self, ctx: &UploadContext, severity: UploadSeverity, error: &DietError) {
        self.append_line(&format!(
            "{} fail severity={:?} format={:?} name={} err={}",
            unix_ts(),
            severity,
            ctx.format,
            ctx.name,
            error
        ));
    }

    fn on_alert(&self, ctx: &UploadContext, severity: UploadSeverity, error: &DietError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} format={:?} name={} err={}",
            unix_ts(),
            severity,
            ctx.format,
            ctx.name,
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
