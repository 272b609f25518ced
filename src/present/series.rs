//! Time series and ranking views over a food table.

use chrono::NaiveDate;

use crate::analysis::{daily_totals, AggregateMode};
use crate::types::FoodTable;

/// One `(date, value)` point of a nutrient series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    /// Day the value belongs to.
    pub date: NaiveDate,
    /// Aggregated value for that day.
    pub value: f64,
}

/// An ordered per-day series for one nutrient, dates ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientSeries {
    /// Nutrient column name as uploaded.
    pub nutrient: String,
    /// One point per day present in the table.
    pub points: Vec<SeriesPoint>,
}

/// Build one chart-ready series per nutrient column.
///
/// Each series has a point for every date in the table (rows with a null date
/// contribute nothing), ordered ascending. Series appear in nutrient-column
/// order.
pub fn nutrient_series(table: &FoodTable, mode: AggregateMode) -> Vec<NutrientSeries> {
    let by_day = daily_totals(table, mode);

    table
        .schema
        .nutrient_names()
        .into_iter()
        .map(|nutrient| NutrientSeries {
            nutrient: nutrient.to_string(),
            points: by_day
                .iter()
                .map(|(date, totals)| SeriesPoint {
                    date: *date,
                    value: totals.get(nutrient).unwrap_or(0.0),
                })
                .collect(),
        })
        .collect()
}

/// A food row ranked by one nutrient's value.
#[derive(Debug, Clone, PartialEq)]
pub struct TopFood {
    /// Food description.
    pub food: String,
    /// The nutrient value for that row.
    pub value: f64,
}

/// The `limit` food entries highest in `nutrient`, descending.
///
/// Rows with a zero or null value, or without a food description, are
/// excluded. Ties order alphabetically so the ranking is stable.
pub fn top_foods(table: &FoodTable, nutrient: &str, limit: usize) -> Vec<TopFood> {
    let mut ranked: Vec<TopFood> = table
        .entries()
        .filter_map(|entry| {
            let value = entry.nutrient(nutrient)?;
            if value <= 0.0 {
                return None;
            }
            Some(TopFood {
                food: entry.food()?.to_string(),
                value,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.food.cmp(&b.food))
    });
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, Column, ColumnRole, TableSchema};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn week_table() -> FoodTable {
        let schema = TableSchema::new(vec![
            Column::new("date", ColumnRole::Date),
            Column::new("food", ColumnRole::Text),
            Column::new("calories", ColumnRole::Nutrient),
            Column::new("protein", ColumnRole::Nutrient),
        ]);
        let rows = vec![
            vec![
                Cell::Date(d("2024-01-03")),
                Cell::Text("Rice".to_string()),
                Cell::Number(130.0),
                Cell::Number(2.7),
            ],
            vec![
                Cell::Date(d("2024-01-01")),
                Cell::Text("Salmon".to_string()),
                Cell::Number(208.0),
                Cell::Number(25.4),
            ],
            vec![
                Cell::Date(d("2024-01-01")),
                Cell::Text("Bread".to_string()),
                Cell::Number(265.0),
                Cell::Number(9.0),
            ],
            vec![
                Cell::Date(d("2024-01-02")),
                Cell::Text("Broccoli".to_string()),
                Cell::Number(34.0),
                Cell::Number(2.8),
            ],
        ];
        FoodTable::new(schema, rows)
    }

    #[test]
    fn series_are_date_ordered_per_nutrient() {
        let series = nutrient_series(&week_table(), AggregateMode::Sum);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].nutrient, "calories");

        let dates: Vec<NaiveDate> = series[0].points.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![d("2024-01-01"), d("2024-01-02"), d("2024-01-03")]);
        // two entries on day one sum together
        assert_eq!(series[0].points[0].value, 473.0);
        assert!((series[1].points[0].value - 34.4).abs() < 1e-9);
    }

    #[test]
    fn series_of_empty_table_have_no_points() {
        let empty = week_table().filter_rows(|_| false);
        let series = nutrient_series(&empty, AggregateMode::Sum);
        assert_eq!(series.len(), 2);
        assert!(series.iter().all(|s| s.points.is_empty()));
    }

    #[test]
    fn top_foods_ranks_descending_and_truncates() {
        let top = top_foods(&week_table(), "protein", 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].food, "Salmon");
        assert_eq!(top[1].food, "Bread");
    }

    #[test]
    fn top_foods_excludes_zero_and_unknown_nutrients() {
        let mut table = week_table();
        table.rows[0][3] = Cell::Number(0.0);
        let top = top_foods(&table, "protein", 10);
        assert!(top.iter().all(|t| t.food != "Rice"));

        assert!(top_foods(&table, "zinc", 10).is_empty());
    }
}
