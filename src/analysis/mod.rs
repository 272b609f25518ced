//! Aggregation and nutritional analysis.
//!
//! Everything here is a pure, single-pass transformation over an ingested
//! [`crate::types::FoodTable`]:
//!
//! - [`nutrient_totals`] / [`daily_totals`]: sum or average nutrient columns,
//!   whole-table or grouped by day
//! - [`compare_with_rda`]: percentage-of-RDA comparison against an immutable
//!   [`RdaReference`]
//! - [`analyze`] / [`goal_progress`] / [`macro_split`]: classification against
//!   acceptable intake ranges, goal tracking, and the macronutrient calorie
//!   split
//! - [`nutrient_statistics`]: descriptive stats per nutrient column
//!
//! ## Example: daily sums against the built-in RDA table
//!
//! ```rust
//! use chrono::NaiveDate;
//! use diet_tracker_core::analysis::{compare_with_rda, daily_totals, AggregateMode, RdaReference};
//! use diet_tracker_core::types::{Cell, Column, ColumnRole, FoodTable, TableSchema};
//!
//! let schema = TableSchema::new(vec![
//!     Column::new("date", ColumnRole::Date),
//!     Column::new("sodium", ColumnRole::Nutrient),
//! ]);
//! let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let table = FoodTable::new(schema, vec![
//!     vec![Cell::Date(day), Cell::Number(650.0)],
//!     vec![Cell::Date(day), Cell::Number(500.0)],
//! ]);
//!
//! let by_day = daily_totals(&table, AggregateMode::Sum);
//! let comparisons = compare_with_rda(&by_day[&day], RdaReference::builtin());
//! assert_eq!(comparisons[0].percent_of_rda, Some(50.0));
//! ```

pub mod rda;
pub mod score;
pub mod stats;
pub mod totals;

pub use rda::{unit_for_column, RdaReference};
pub use score::{
    acceptable_range, analyze, goal_progress, macro_split, AcceptableRange, GoalProgress,
    GoalStatus, MacroSplit, NutrientStatus, NutritionAnalysis,
};
pub use stats::{nutrient_statistics, ColumnStats};
pub use totals::{
    compare_with_rda, daily_totals, nutrient_totals, AggregateMode, NutrientTotals, RdaComparison,
};
