//! Chart-ready reshaping.
//!
//! No aggregation logic lives here: series building delegates to
//! [`crate::analysis::daily_totals`] and only reorders the result into the
//! `(date, value)` point lists a line/bar renderer wants.

pub mod recommend;
pub mod series;

pub use recommend::{recommend_for_deficiencies, FoodRecommendation};
pub use series::{nutrient_series, top_foods, NutrientSeries, SeriesPoint, TopFood};
