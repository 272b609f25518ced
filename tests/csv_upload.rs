use chrono::NaiveDate;

use diet_tracker_core::ingest::{ingest_upload, RowPolicy, UploadOptions};
use diet_tracker_core::types::{Cell, ColumnRole};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn ingest_csv_upload_happy_path() {
    let input = "date,food,calories,protein\n\
                 2024-01-01,Oatmeal,150,5\n\
                 2024-01-02,Banana,89,1.1\n";
    let table = ingest_upload("log.csv", input.as_bytes(), &UploadOptions::default()).unwrap();

    assert_eq!(table.row_count(), 2);
    assert_eq!(table.rows[0][0], Cell::Date(d("2024-01-01")));
    assert_eq!(table.rows[0][1], Cell::Text("Oatmeal".to_string()));
    assert_eq!(table.rows[0][2], Cell::Number(150.0));
    assert_eq!(table.rows[1][3], Cell::Number(1.1));
}

#[test]
fn arbitrary_nutrient_columns_are_discovered() {
    let input = "date,food,Sodium (mg),Vitamin C (mg),zinc\n\
                 2024-01-01,Soup,650,12,1.5\n";
    let table = ingest_upload("log.csv", input.as_bytes(), &UploadOptions::default()).unwrap();

    assert_eq!(
        table.schema.nutrient_names(),
        vec!["Sodium (mg)", "Vitamin C (mg)", "zinc"]
    );
}

#[test]
fn empty_cells_become_nulls() {
    let input = "date,food,calories\n2024-01-01,Oatmeal,\n";
    let table = ingest_upload("log.csv", input.as_bytes(), &UploadOptions::default()).unwrap();
    assert_eq!(table.rows[0][2], Cell::Null);
}

#[test]
fn text_heavy_column_is_classified_as_text_not_nutrient() {
    let input = "date,meal,calories\n\
                 2024-01-01,breakfast,400\n\
                 2024-01-01,lunch,600\n";
    let table = ingest_upload("log.csv", input.as_bytes(), &UploadOptions::default()).unwrap();
    assert_eq!(table.schema.columns[1].role, ColumnRole::Text);
    assert_eq!(table.schema.nutrient_names(), vec!["calories"]);
}

#[test]
fn no_nutrient_column_is_rejected() {
    let input = "date,food,notes\n2024-01-01,Oatmeal,tasty\n";
    let err = ingest_upload("log.csv", input.as_bytes(), &UploadOptions::default()).unwrap_err();
    assert!(err.to_string().contains("no numeric nutrient column"));
}

#[test]
fn strict_policy_surfaces_cell_location() {
    let input = "date,calories\n2024-01-01,abc\n";
    let opts = UploadOptions {
        row_policy: RowPolicy::Strict,
        ..Default::default()
    };
    let err = ingest_upload("log.csv", input.as_bytes(), &opts).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("row 2"));
    assert!(msg.contains("column 'calories'"));
}

#[test]
fn slash_and_dotted_dates_parse() {
    let input = "date,calories\n2024/01/05,100\n01/05/2024,200\n05.01.2024,300\n";
    let table = ingest_upload("log.csv", input.as_bytes(), &UploadOptions::default()).unwrap();
    assert!(table
        .rows
        .iter()
        .all(|row| row[0] == Cell::Date(d("2024-01-05"))));
}
