//! Nutrient aggregation and RDA comparison.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::types::{Cell, FoodTable};

use super::rda::RdaReference;

/// How nutrient columns are collapsed across rows.
///
/// The mode is caller-selected, never a per-row decision. `Sum` fits intake
/// totals; `Mean` fits per-day averages over a multi-day window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregateMode {
    /// Sum values, ignoring nulls.
    #[default]
    Sum,
    /// Average non-null values. An all-null column averages to 0.0.
    Mean,
}

/// Aggregated nutrient values for one grouping (a day, or the whole table).
///
/// Contains exactly one entry per nutrient column of the source table, keyed
/// by the column header as uploaded. A column whose cells are all null holds
/// 0.0, so it still compares as 0% of RDA rather than disappearing.
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientTotals {
    /// Nutrient column name → aggregated value.
    pub values: BTreeMap<String, f64>,
}

impl NutrientTotals {
    /// Aggregated value for a nutrient column, if the column exists.
    pub fn get(&self, nutrient: &str) -> Option<f64> {
        self.values.get(nutrient).copied()
    }
}

/// Aggregate every nutrient column over the whole table.
pub fn nutrient_totals(table: &FoodTable, mode: AggregateMode) -> NutrientTotals {
    aggregate_rows(table, mode, None)
}

/// Aggregate every nutrient column per day, ordered by date.
///
/// Rows with a null/unparsed date cannot be attributed to a day and are
/// excluded from the grouping.
pub fn daily_totals(table: &FoodTable, mode: AggregateMode) -> BTreeMap<NaiveDate, NutrientTotals> {
    let Some(date_idx) = table.schema.date_index() else {
        return BTreeMap::new();
    };

    let mut groups: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
    for (i, row) in table.rows.iter().enumerate() {
        if let Some(Cell::Date(d)) = row.get(date_idx) {
            groups.entry(*d).or_default().push(i);
        }
    }

    groups
        .into_iter()
        .map(|(date, rows)| (date, aggregate_rows(table, mode, Some(&rows))))
        .collect()
}

fn aggregate_rows(table: &FoodTable, mode: AggregateMode, row_set: Option<&[usize]>) -> NutrientTotals {
    let mut values = BTreeMap::new();
    for idx in table.schema.nutrient_indexes() {
        let name = table.schema.columns[idx].name.clone();

        let mut sum = 0.0f64;
        let mut count = 0usize;
        let mut visit = |row: &Vec<Cell>| {
            if let Some(Cell::Number(v)) = row.get(idx) {
                sum += v;
                count += 1;
            }
        };
        match row_set {
            Some(rows) => rows.iter().for_each(|&r| visit(&table.rows[r])),
            None => table.rows.iter().for_each(&mut visit),
        }

        let value = match mode {
            AggregateMode::Sum => sum,
            AggregateMode::Mean => {
                if count == 0 {
                    0.0
                } else {
                    sum / count as f64
                }
            }
        };
        values.insert(name, value);
    }
    NutrientTotals { values }
}

/// One nutrient total measured against the RDA reference.
#[derive(Debug, Clone, PartialEq)]
pub struct RdaComparison {
    /// Nutrient column name as uploaded.
    pub nutrient: String,
    /// Aggregated value.
    pub actual: f64,
    /// Recommended daily value, `None` when the reference has no entry for
    /// this nutrient (reported without comparison, not an error).
    pub recommended: Option<f64>,
    /// `actual / recommended * 100`. A zero total is 0%, not missing.
    pub percent_of_rda: Option<f64>,
}

/// Compare aggregated totals against an RDA reference.
///
/// Produces one comparison per totals entry, in key order.
pub fn compare_with_rda(totals: &NutrientTotals, rda: &RdaReference) -> Vec<RdaComparison> {
    totals
        .values
        .iter()
        .map(|(nutrient, &actual)| {
            let recommended = rda.lookup(nutrient).filter(|r| *r > 0.0);
            RdaComparison {
                nutrient: nutrient.clone(),
                actual,
                recommended,
                percent_of_rda: recommended.map(|r| actual / r * 100.0),
            }
        })
        .collect()
}
