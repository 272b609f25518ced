//! CSV report serialization.

use crate::error::{DietError, DietResult};
use crate::types::{Cell, FoodTable};

/// Serialize a table to CSV bytes: header row first, dates as ISO
/// `yyyy-mm-dd`, nulls as empty fields.
pub fn export_csv(table: &FoodTable) -> DietResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(table.schema.columns.iter().map(|c| c.name.as_str()))
        .map_err(export_err)?;

    for row in &table.rows {
        let record: Vec<String> = row.iter().map(cell_to_field).collect();
        writer.write_record(&record).map_err(export_err)?;
    }

    writer
        .into_inner()
        .map_err(|e| DietError::Export {
            message: e.to_string(),
        })
}

fn cell_to_field(cell: &Cell) -> String {
    match cell {
        Cell::Null => String::new(),
        Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
        Cell::Text(s) => s.clone(),
        Cell::Number(v) => v.to_string(),
    }
}

fn export_err(e: csv::Error) -> DietError {
    DietError::Export {
        message: e.to_string(),
    }
}
