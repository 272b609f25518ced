use chrono::NaiveDate;

use diet_tracker_core::analysis::{nutrient_totals, AggregateMode};
use diet_tracker_core::export::{export_csv, export_xlsx};
use diet_tracker_core::ingest::{ingest_upload, UploadOptions};
use diet_tracker_core::types::FoodTable;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn ingested_log() -> FoodTable {
    let input = "date,food,calories,protein,sodium\n\
                 2024-01-01,Oatmeal,150,5,120\n\
                 2024-01-01,Chicken breast,165,31,74\n\
                 2024-01-02,Salmon,208,25.4,59\n\
                 2024-01-03,Banana,89,1.1,1\n";
    ingest_upload("log.csv", input.as_bytes(), &UploadOptions::default()).unwrap()
}

#[test]
fn xlsx_roundtrip_preserves_rows_and_values() {
    let table = ingested_log();
    let bytes = export_xlsx(&table).unwrap();
    let back = ingest_upload("report.xlsx", &bytes, &UploadOptions::default()).unwrap();

    assert_eq!(back.row_count(), table.row_count());
    assert_eq!(back.schema, table.schema);
    assert_eq!(
        nutrient_totals(&back, AggregateMode::Sum),
        nutrient_totals(&table, AggregateMode::Sum)
    );
    assert_eq!(back.rows, table.rows);
}

#[test]
fn csv_roundtrip_preserves_rows_and_values() {
    let table = ingested_log();
    let bytes = export_csv(&table).unwrap();
    let back = ingest_upload("report.csv", &bytes, &UploadOptions::default()).unwrap();

    assert_eq!(back.row_count(), table.row_count());
    assert_eq!(back.rows, table.rows);
}

#[test]
fn filtered_report_exports_only_selected_window() {
    let table = ingested_log();
    let report = table.filter_by_date_range(Some(d("2024-01-02")), Some(d("2024-01-03")));

    let bytes = export_xlsx(&report).unwrap();
    let back = ingest_upload("report.xlsx", &bytes, &UploadOptions::default()).unwrap();

    assert_eq!(back.row_count(), 2);
    let foods: Vec<_> = back.entries().filter_map(|e| e.food().map(String::from)).collect();
    assert_eq!(foods, vec!["Salmon", "Banana"]);
}

#[test]
fn nutrient_selection_narrows_exported_columns() {
    let table = ingested_log();
    let report = table.select_nutrients(&["sodium"]);

    let bytes = export_csv(&report).unwrap();
    let back = ingest_upload("report.csv", &bytes, &UploadOptions::default()).unwrap();

    assert_eq!(
        back.schema.columns.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec!["date", "food", "sodium"]
    );
    assert_eq!(back.row_count(), 4);
}

#[test]
fn null_cells_survive_the_roundtrip() {
    let input = "date,food,calories,protein\n2024-01-01,Oatmeal,150,\n";
    let table = ingest_upload("log.csv", input.as_bytes(), &UploadOptions::default()).unwrap();

    let xlsx = export_xlsx(&table).unwrap();
    let back = ingest_upload("report.xlsx", &xlsx, &UploadOptions::default()).unwrap();
    assert_eq!(back.rows, table.rows);
}

#[test]
fn empty_report_exports_header_only() {
    let table = ingested_log();
    let empty = table.filter_rows(|_| false);

    let bytes = export_csv(&empty).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with("date,food,calories"));
}
