//! Food recommendations for deficient nutrients.

use crate::analysis::NutritionAnalysis;
use crate::types::FoodTable;

use super::series::{top_foods, TopFood};

/// Foods from the current log that are rich in one deficient nutrient.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodRecommendation {
    /// Deficient nutrient column name as uploaded.
    pub nutrient: String,
    /// Display unit recovered from the column header.
    pub unit: &'static str,
    /// Logged foods ranked by that nutrient, descending.
    pub foods: Vec<TopFood>,
}

/// For each deficiency in `analysis`, the `limit` logged foods richest in that
/// nutrient.
///
/// Deficient nutrients with no positive entries in the table yield no
/// recommendation; there is nothing in the log to suggest eating more of.
pub fn recommend_for_deficiencies(
    analysis: &NutritionAnalysis,
    table: &FoodTable,
    limit: usize,
) -> Vec<FoodRecommendation> {
    analysis
        .deficiencies
        .iter()
        .filter_map(|status| {
            let foods = top_foods(table, &status.nutrient, limit);
            if foods.is_empty() {
                return None;
            }
            Some(FoodRecommendation {
                nutrient: status.nutrient.clone(),
                unit: status.unit,
                foods,
            })
        })
        .collect()
}
