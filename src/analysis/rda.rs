//! Recommended-daily-allowance reference table.
//!
//! The reference is immutable configuration: loaded once per process (the
//! built-in table sits behind a `OnceLock`), never mutated at runtime, so no
//! synchronization is needed anywhere downstream.

use std::collections::BTreeMap;
use std::io::Read;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::error::DietResult;

/// Immutable nutrient → recommended daily value mapping.
///
/// Keys are normalized nutrient names (`calories`, `protein`, `carbs`, `fat`,
/// `fiber`, `sugar`, `sodium`, `calcium`, `iron`, `vitamin_c`, ...). Lookups by
/// spreadsheet column header go through [`RdaReference::lookup`], which
/// normalizes headers like `"Energy (kcal)"` or `"Sodium (mg)"` first.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RdaReference {
    values: BTreeMap<String, f64>,
}

impl RdaReference {
    /// Create a reference from already-normalized keys.
    pub fn new(values: BTreeMap<String, f64>) -> Self {
        Self { values }
    }

    /// The built-in daily targets, initialized once per process.
    ///
    /// Values: calories 2000 kcal, protein 150 g, carbs 250 g, fat 65 g,
    /// fiber 25 g, sugar 50 g (max), sodium 2300 mg (max), calcium 1000 mg,
    /// iron 18 mg, vitamin_c 90 mg.
    pub fn builtin() -> &'static RdaReference {
        static BUILTIN: OnceLock<RdaReference> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let values = BTreeMap::from(
                [
                    ("calories", 2000.0),
                    ("protein", 150.0),
                    ("carbs", 250.0),
                    ("fat", 65.0),
                    ("fiber", 25.0),
                    ("sugar", 50.0),
                    ("sodium", 2300.0),
                    ("calcium", 1000.0),
                    ("iron", 18.0),
                    ("vitamin_c", 90.0),
                ]
                .map(|(k, v)| (k.to_string(), v)),
            );
            RdaReference { values }
        })
    }

    /// Load a custom reference from a JSON object of `{"nutrient": value}`.
    pub fn from_json_reader<R: Read>(reader: R) -> DietResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Recommended daily value for a spreadsheet column header, if the
    /// nutrient is in the table.
    pub fn lookup(&self, column_header: &str) -> Option<f64> {
        self.values.get(&normalize_nutrient(column_header)).copied()
    }

    /// Recommended daily value by normalized key.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Iterate `(normalized name, daily value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Normalize a spreadsheet column header to an RDA key.
///
/// Lowercases, strips a trailing parenthesized unit, and maps the column names
/// used by USDA-style exports onto the short keys of the reference table.
pub(crate) fn normalize_nutrient(header: &str) -> String {
    let stripped = strip_unit(header).trim().to_lowercase();
    let aliased = match stripped.as_str() {
        "energy" | "kcal" | "calorie" => "calories",
        "carbohydrate" | "carbohydrates" | "carb" => "carbs",
        "total fat" | "fats" => "fat",
        "fiber, total dietary" | "dietary fiber" | "fibre" => "fiber",
        "sugars, total" | "sugars" => "sugar",
        "vitamin c" => "vitamin_c",
        other => other,
    };
    aliased.replace(' ', "_")
}

/// Unit suffix recovered from a column header, e.g. `"Protein (g)"` → `"g"`.
/// Empty when the header carries no recognizable unit.
pub fn unit_for_column(header: &str) -> &'static str {
    let h = header.to_lowercase();
    if h.contains("(kcal)") || h.contains("calorie") {
        "kcal"
    } else if h.contains("(mcg)") {
        "mcg"
    } else if h.contains("(mg)") || matches!(normalize_nutrient(header).as_str(), "sodium" | "calcium" | "iron" | "vitamin_c") {
        "mg"
    } else if h.contains("(g)") || matches!(normalize_nutrient(header).as_str(), "protein" | "carbs" | "fat" | "fiber" | "sugar") {
        "g"
    } else if normalize_nutrient(header) == "calories" {
        "kcal"
    } else {
        ""
    }
}

fn strip_unit(header: &str) -> &str {
    match header.rfind('(') {
        Some(idx) if header.trim_end().ends_with(')') => &header[..idx],
        _ => header,
    }
}
