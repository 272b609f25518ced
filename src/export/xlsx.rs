//! XLSX report serialization.

use rust_xlsxwriter::Workbook;

use crate::error::DietResult;
use crate::types::{Cell, FoodTable};

/// Serialize a table to XLSX bytes.
///
/// The sheet mirrors the table exactly: one header row, one data row per
/// entry. Dates are written as ISO `yyyy-mm-dd` strings so that re-ingesting
/// an exported report reproduces the original values. Null cells are left
/// blank.
pub fn export_xlsx(table: &FoodTable) -> DietResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Report")?;

    for (col, column) in table.schema.columns.iter().enumerate() {
        worksheet.write_string(0, col as u16, column.name.as_str())?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let out_row = row_idx as u32 + 1;
        for (col_idx, cell) in row.iter().enumerate() {
            let col = col_idx as u16;
            match cell {
                Cell::Null => {}
                Cell::Date(d) => {
                    worksheet.write_string(out_row, col, d.format("%Y-%m-%d").to_string())?;
                }
                Cell::Text(s) => {
                    worksheet.write_string(out_row, col, s.as_str())?;
                }
                Cell::Number(v) => {
                    worksheet.write_number(out_row, col, *v)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
