use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use diet_tracker_core::ingest::{
    ingest_from_path, ingest_upload, CompositeObserver, FileObserver, RowPolicy, StdErrObserver,
    UploadContext, UploadObserver, UploadOptions, UploadSeverity, UploadStats,
};
use diet_tracker_core::DietError;

fn tmp_log(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("diet-tracker-core-{name}-{nanos}.log"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Success { rows: usize, dropped: usize },
    Failure { severity: UploadSeverity },
    Alert { severity: UploadSeverity },
}

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<Event>>,
}

impl RecordingObserver {
    fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

impl UploadObserver for RecordingObserver {
    fn on_success(&self, _ctx: &UploadContext, stats: UploadStats) {
        self.events.lock().unwrap().push(Event::Success {
            rows: stats.rows,
            dropped: stats.dropped_rows,
        });
    }

    fn on_failure(&self, _ctx: &UploadContext, severity: UploadSeverity, _error: &DietError) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Failure { severity });
    }

    fn on_alert(&self, _ctx: &UploadContext, severity: UploadSeverity, _error: &DietError) {
        self.events.lock().unwrap().push(Event::Alert { severity });
    }
}

#[test]
fn success_reports_row_and_dropped_counts() {
    let observer = Arc::new(RecordingObserver::default());
    let opts = UploadOptions {
        row_policy: RowPolicy::DropRow,
        observer: Some(observer.clone()),
        ..Default::default()
    };

    let input = "date,calories\n2024-01-01,500\nnot a date,700\n";
    let table = ingest_upload("log.csv", input.as_bytes(), &opts).unwrap();

    assert_eq!(table.row_count(), 1);
    assert_eq!(observer.events(), vec![Event::Success { rows: 1, dropped: 1 }]);
}

#[test]
fn rejected_upload_reports_failure_without_alert_below_threshold() {
    let observer = Arc::new(RecordingObserver::default());
    let opts = UploadOptions {
        observer: Some(observer.clone()),
        alert_at_or_above: UploadSeverity::Critical,
        ..Default::default()
    };

    // Schema problems are Error severity, below the Critical alert threshold.
    let input = "food,notes\nOatmeal,tasty\n";
    let _err = ingest_upload("log.csv", input.as_bytes(), &opts).unwrap_err();

    assert_eq!(
        observer.events(),
        vec![Event::Failure {
            severity: UploadSeverity::Error
        }]
    );
}

#[test]
fn lowered_threshold_also_fires_alert() {
    let observer = Arc::new(RecordingObserver::default());
    let opts = UploadOptions {
        observer: Some(observer.clone()),
        alert_at_or_above: UploadSeverity::Error,
        ..Default::default()
    };

    let input = "food,notes\nOatmeal,tasty\n";
    let _err = ingest_upload("log.csv", input.as_bytes(), &opts).unwrap_err();

    assert_eq!(
        observer.events(),
        vec![
            Event::Failure {
                severity: UploadSeverity::Error
            },
            Event::Alert {
                severity: UploadSeverity::Error
            },
        ]
    );
}

#[test]
fn composite_fans_out_to_every_observer() {
    let first = Arc::new(RecordingObserver::default());
    let second = Arc::new(RecordingObserver::default());
    let composite = CompositeObserver::new(vec![
        first.clone(),
        second.clone(),
        Arc::new(StdErrObserver),
    ]);
    let opts = UploadOptions {
        observer: Some(Arc::new(composite)),
        ..Default::default()
    };

    let input = "date,calories\n2024-01-01,500\n";
    ingest_upload("log.csv", input.as_bytes(), &opts).unwrap();

    let expected = vec![Event::Success { rows: 1, dropped: 0 }];
    assert_eq!(first.events(), expected);
    assert_eq!(second.events(), expected);
}

#[test]
fn file_observer_appends_success_and_alert_lines() {
    let path = tmp_log("upload-events");
    let opts = UploadOptions {
        observer: Some(Arc::new(FileObserver::new(&path))),
        alert_at_or_above: UploadSeverity::Error,
        ..Default::default()
    };

    ingest_upload("log.csv", "date,calories\n2024-01-01,500\n".as_bytes(), &opts).unwrap();
    let _err = ingest_upload("log.csv", "food,notes\nOatmeal,tasty\n".as_bytes(), &opts)
        .unwrap_err();

    let log = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert!(log.lines().any(|l| l.contains("ok") && l.contains("rows=1")));
    assert!(log.lines().any(|l| l.contains("fail severity=Error")));
    assert!(log.lines().any(|l| l.contains("ALERT severity=Error")));
}

#[test]
fn missing_file_is_critical_and_alerts_at_default_threshold() {
    let observer = Arc::new(RecordingObserver::default());
    let opts = UploadOptions {
        observer: Some(observer.clone()),
        ..Default::default()
    };

    let _err = ingest_from_path("does_not_exist.csv", &opts).unwrap_err();

    assert_eq!(
        observer.events(),
        vec![
            Event::Failure {
                severity: UploadSeverity::Critical
            },
            Event::Alert {
                severity: UploadSeverity::Critical
            },
        ]
    );
}
