//! Intake classification and scoring.
//!
//! Ranges and scoring mirror the dashboard's analysis view: each tracked
//! nutrient has an acceptable band expressed as a fraction of its daily
//! target, totals are binned into deficiencies / excesses / within-range, and
//! the bins roll up into a single 0-100 score.

use crate::analysis::rda::{normalize_nutrient, unit_for_column, RdaReference};
use crate::analysis::totals::NutrientTotals;

/// Acceptable intake band as a fraction of the daily target.
/// `max` of `None` means "no upper bound".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptableRange {
    /// Lower bound, fraction of target.
    pub min: f64,
    /// Upper bound, fraction of target; unbounded when `None`.
    pub max: Option<f64>,
}

const DEFAULT_RANGE: AcceptableRange = AcceptableRange {
    min: 0.8,
    max: Some(1.2),
};

/// Band for a nutrient, by normalized key. Unknown nutrients fall back to
/// 80-120% of target.
pub fn acceptable_range(nutrient: &str) -> AcceptableRange {
    let (min, max) = match normalize_nutrient(nutrient).as_str() {
        "calories" => (0.8, Some(1.2)),
        "protein" => (0.8, Some(2.0)),
        "carbs" => (0.45, Some(1.3)),
        "fat" => (0.7, Some(1.5)),
        "fiber" => (0.8, None),
        "sodium" => (0.0, Some(1.0)),
        "calcium" => (0.8, None),
        "iron" => (0.8, None),
        "vitamin_c" => (0.8, None),
        _ => return DEFAULT_RANGE,
    };
    AcceptableRange { min, max }
}

/// One nutrient's intake measured against its target and acceptable band.
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientStatus {
    /// Nutrient column name as uploaded.
    pub nutrient: String,
    /// Aggregated intake.
    pub actual: f64,
    /// Daily target from the reference table.
    pub target: f64,
    /// `actual / target * 100`.
    pub percent: f64,
    /// Display unit recovered from the column header.
    pub unit: &'static str,
}

/// Totals binned against acceptable ranges, with an overall score.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NutritionAnalysis {
    /// Nutrients below the acceptable band.
    pub deficiencies: Vec<NutrientStatus>,
    /// Nutrients above the acceptable band.
    pub excesses: Vec<NutrientStatus>,
    /// Nutrients inside the acceptable band.
    pub within_range: Vec<NutrientStatus>,
    /// 0-100; 100 means every tracked nutrient is within its band.
    pub overall_score: f64,
}

/// Bin aggregated totals against the reference's acceptable ranges.
///
/// Nutrients with no reference entry are skipped entirely; they carry no
/// target to measure against.
pub fn analyze(totals: &NutrientTotals, rda: &RdaReference) -> NutritionAnalysis {
    let mut analysis = NutritionAnalysis::default();
    let mut scores: Vec<f64> = Vec::new();

    for (nutrient, &actual) in &totals.values {
        let Some(target) = rda.lookup(nutrient).filter(|t| *t > 0.0) else {
            continue;
        };

        let percent = actual / target * 100.0;
        let range = acceptable_range(nutrient);
        let min_pct = range.min * 100.0;
        let max_pct = range.max.map(|m| m * 100.0);

        let status = NutrientStatus {
            nutrient: nutrient.clone(),
            actual,
            target,
            percent,
            unit: unit_for_column(nutrient),
        };

        if percent < min_pct {
            scores.push(percent / 100.0);
            analysis.deficiencies.push(status);
        } else if let Some(max_pct) = max_pct.filter(|m| percent > *m) {
            scores.push((max_pct / percent).min(1.0));
            analysis.excesses.push(status);
        } else {
            scores.push(1.0);
            analysis.within_range.push(status);
        }
    }

    if !scores.is_empty() {
        analysis.overall_score = scores.iter().sum::<f64>() / scores.len() as f64 * 100.0;
    }
    analysis
}

/// Macronutrient share of total calories, in percent.
///
/// Gram totals convert at 4 kcal/g for protein and carbs, 9 kcal/g for fat.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MacroSplit {
    /// Percent of calories from protein.
    pub protein: f64,
    /// Percent of calories from carbohydrate.
    pub carbs: f64,
    /// Percent of calories from fat.
    pub fat: f64,
}

/// Compute the macronutrient calorie split from aggregated totals.
///
/// Returns all zeros when the calorie total is missing or zero.
pub fn macro_split(totals: &NutrientTotals) -> MacroSplit {
    let by_key = |key: &str| {
        totals
            .values
            .iter()
            .find(|(name, _)| normalize_nutrient(name) == key)
            .map(|(_, v)| *v)
            .unwrap_or(0.0)
    };

    let calories = by_key("calories");
    if calories <= 0.0 {
        return MacroSplit::default();
    }

    MacroSplit {
        protein: by_key("protein") * 4.0 / calories * 100.0,
        carbs: by_key("carbs") * 4.0 / calories * 100.0,
        fat: by_key("fat") * 9.0 / calories * 100.0,
    }
}

/// Status label for progress toward one nutrient goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalStatus {
    /// Limit-style nutrient at or below half the cap.
    Excellent,
    /// Limit-style nutrient at or below 75% of the cap.
    Good,
    /// Limit-style nutrient approaching the cap.
    Caution,
    /// Limit-style nutrient above the cap.
    Exceeded,
    /// Target met or surpassed.
    Achieved,
    /// At least 80% of target.
    Close,
    /// At least 50% of target.
    Moderate,
    /// Below half the target.
    Low,
}

/// Progress toward one nutrient's daily goal.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgress {
    /// Nutrient column name as uploaded.
    pub nutrient: String,
    /// Aggregated intake.
    pub actual: f64,
    /// Daily target.
    pub target: f64,
    /// Percent of goal achieved, capped at 100 for display.
    pub percent: f64,
    /// Amount still to consume to hit the target (0 once met).
    pub remaining: f64,
    /// Display unit recovered from the column header.
    pub unit: &'static str,
    /// Status label; sodium and sugar grade downward (they are caps, not
    /// targets).
    pub status: GoalStatus,
}

/// Per-nutrient goal progress for every totals entry with a reference target.
pub fn goal_progress(totals: &NutrientTotals, rda: &RdaReference) -> Vec<GoalProgress> {
    totals
        .values
        .iter()
        .filter_map(|(nutrient, &actual)| {
            let target = rda.lookup(nutrient).filter(|t| *t > 0.0)?;
            let raw_percent = actual / target * 100.0;
            Some(GoalProgress {
                nutrient: nutrient.clone(),
                actual,
                target,
                percent: raw_percent.min(100.0),
                remaining: (target - actual).max(0.0),
                unit: unit_for_column(nutrient),
                status: goal_status(raw_percent, nutrient),
            })
        })
        .collect()
}

fn goal_status(percent: f64, nutrient: &str) -> GoalStatus {
    let limit_style = matches!(normalize_nutrient(nutrient).as_str(), "sodium" | "sugar");
    if limit_style {
        if percent <= 50.0 {
            GoalStatus::Excellent
        } else if percent <= 75.0 {
            GoalStatus::Good
        } else if percent <= 100.0 {
            GoalStatus::Caution
        } else {
            GoalStatus::Exceeded
        }
    } else if percent >= 100.0 {
        GoalStatus::Achieved
    } else if percent >= 80.0 {
        GoalStatus::Close
    } else if percent >= 50.0 {
        GoalStatus::Moderate
    } else {
        GoalStatus::Low
    }
}
