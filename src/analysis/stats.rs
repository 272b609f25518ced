//! Descriptive statistics over nutrient columns.

use std::collections::BTreeMap;

use crate::types::{Cell, FoodTable};

/// Summary statistics for one nutrient column, computed over non-null cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    /// Arithmetic mean.
    pub mean: f64,
    /// Median (midpoint average for even counts).
    pub median: f64,
    /// Sample standard deviation; 0.0 when fewer than two values.
    pub std_dev: f64,
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
    /// Number of non-null cells.
    pub count: usize,
}

/// Per-column statistics for every nutrient column with at least one non-null
/// value. Columns that are entirely null are omitted.
pub fn nutrient_statistics(table: &FoodTable) -> BTreeMap<String, ColumnStats> {
    let mut out = BTreeMap::new();
    for idx in table.schema.nutrient_indexes() {
        let mut values: Vec<f64> = table
            .rows
            .iter()
            .filter_map(|row| match row.get(idx) {
                Some(Cell::Number(v)) => Some(*v),
                _ => None,
            })
            .collect();
        if values.is_empty() {
            continue;
        }
        values.sort_by(f64::total_cmp);

        let count = values.len();
        let sum: f64 = values.iter().sum();
        let mean = sum / count as f64;
        let median = if count % 2 == 1 {
            values[count / 2]
        } else {
            (values[count / 2 - 1] + values[count / 2]) / 2.0
        };
        let std_dev = if count < 2 {
            0.0
        } else {
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            var.sqrt()
        };

        out.insert(
            table.schema.columns[idx].name.clone(),
            ColumnStats {
                mean,
                median,
                std_dev,
                min: values[0],
                max: values[count - 1],
                count,
            },
        );
    }
    out
}
