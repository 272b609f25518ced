//! End-to-end flow: upload -> aggregate -> chart series -> filtered export,
//! the way a dashboard session drives the crate.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use rust_xlsxwriter::Workbook;

use diet_tracker_core::analysis::{
    analyze, compare_with_rda, daily_totals, goal_progress, macro_split, nutrient_statistics,
    nutrient_totals, AggregateMode, GoalStatus, RdaReference,
};
use diet_tracker_core::export::export_xlsx;
use diet_tracker_core::ingest::{ingest_from_path, ingest_upload, UploadOptions};
use diet_tracker_core::present::{nutrient_series, top_foods};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tmp_file(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("diet-tracker-core-{name}-{nanos}.xlsx"))
}

const WEEK_LOG: &str = "\
date,food,Energy (kcal),Protein (g),Sodium (mg)\n\
2024-01-01,Oatmeal,150,5,120\n\
2024-01-01,Chicken breast,165,31,74\n\
2024-01-02,Salmon,208,25.4,59\n\
2024-01-02,Rice,130,2.7,1\n\
2024-01-03,Banana,89,1.1,1\n";

#[test]
fn session_flow_from_upload_to_export() {
    let table = ingest_upload("week.csv", WEEK_LOG.as_bytes(), &UploadOptions::default()).unwrap();
    assert_eq!(table.row_count(), 5);

    // Aggregation: grouped sums line up with the per-day entries.
    let by_day = daily_totals(&table, AggregateMode::Sum);
    assert_eq!(by_day.len(), 3);
    assert_eq!(by_day[&d("2024-01-01")].get("Energy (kcal)"), Some(315.0));
    let day2_protein = by_day[&d("2024-01-02")].get("Protein (g)").unwrap();
    assert!((day2_protein - 28.1).abs() < 1e-9);

    // RDA comparison over the whole window.
    let totals = nutrient_totals(&table, AggregateMode::Sum);
    let comparisons = compare_with_rda(&totals, RdaReference::builtin());
    assert_eq!(comparisons.len(), 3);
    let sodium = comparisons
        .iter()
        .find(|c| c.nutrient == "Sodium (mg)")
        .unwrap();
    assert_eq!(sodium.actual, 255.0);
    assert!(sodium.percent_of_rda.unwrap() < 100.0);

    // Chart series: one per nutrient, dates ascending.
    let series = nutrient_series(&table, AggregateMode::Sum);
    assert_eq!(series.len(), 3);
    assert!(series.iter().all(|s| s.points.len() == 3));
    assert!(series[0]
        .points
        .windows(2)
        .all(|w| w[0].date < w[1].date));

    // Ranking for the "top foods" chart.
    let top = top_foods(&table, "Protein (g)", 2);
    assert_eq!(top[0].food, "Chicken breast");
    assert_eq!(top[1].food, "Salmon");

    // Filter to one day and export the report.
    let report = table.filter_by_date_range(Some(d("2024-01-02")), Some(d("2024-01-02")));
    let bytes = export_xlsx(&report).unwrap();
    let back = ingest_upload("report.xlsx", &bytes, &UploadOptions::default()).unwrap();
    assert_eq!(back.row_count(), 2);
}

#[test]
fn analysis_views_agree_on_the_same_totals() {
    let table = ingest_upload("week.csv", WEEK_LOG.as_bytes(), &UploadOptions::default()).unwrap();
    let totals = nutrient_totals(&table, AggregateMode::Sum);

    // Three logged days of light eating: calories and protein land short of
    // their targets, sodium stays under its cap.
    let analysis = analyze(&totals, RdaReference::builtin());
    assert_eq!(analysis.excesses.len(), 0);
    assert!(analysis.overall_score < 100.0);

    let progress = goal_progress(&totals, RdaReference::builtin());
    let sodium = progress
        .iter()
        .find(|g| g.nutrient == "Sodium (mg)")
        .unwrap();
    assert_eq!(sodium.status, GoalStatus::Excellent);

    // Macro split only sees calories and protein here; no carb/fat columns.
    let split = macro_split(&totals);
    assert!(split.protein > 0.0);
    assert_eq!(split.carbs, 0.0);

    let stats = nutrient_statistics(&table);
    assert_eq!(stats["Energy (kcal)"].count, 5);
    assert_eq!(stats["Energy (kcal)"].max, 208.0);
}

#[test]
fn search_narrows_the_working_report() {
    let table = ingest_upload("week.csv", WEEK_LOG.as_bytes(), &UploadOptions::default()).unwrap();
    let hits = table.search_food("chicken");
    assert_eq!(hits.row_count(), 1);
    assert_eq!(hits.entries().next().unwrap().food(), Some("Chicken breast"));
}

#[test]
fn path_based_ingestion_matches_byte_based() {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "date").unwrap();
    ws.write_string(0, 1, "calories").unwrap();
    ws.write_string(1, 0, "2024-01-01").unwrap();
    ws.write_number(1, 1, 500.0).unwrap();

    let bytes = wb.save_to_buffer().unwrap();
    let path = tmp_file("path-vs-bytes");
    std::fs::write(&path, &bytes).unwrap();

    let from_path = ingest_from_path(&path, &UploadOptions::default()).unwrap();
    let from_bytes = ingest_upload("log.xlsx", &bytes, &UploadOptions::default()).unwrap();
    assert_eq!(from_path.rows, from_bytes.rows);
    assert_eq!(from_path.schema, from_bytes.schema);

    let _ = std::fs::remove_file(&path);
}
