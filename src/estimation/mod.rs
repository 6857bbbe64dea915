pub mod tables;

pub use tables::EstimationTables;

use serde::Serialize;
use tables::NutritionRow;

pub const DEFAULT_SERVINGS: u32 = 4;

// Values assumed for ingredients missing from the nutrition table.
const DEFAULT_CALORIES: f64 = 50.0;
const DEFAULT_PROTEIN: f64 = 2.0;
const DEFAULT_CARBS: f64 = 8.0;
const DEFAULT_FAT: f64 = 1.0;

// Base minutes assumed for ingredients missing from the time table.
const DEFAULT_COOKING_MINUTES: u32 = 10;

/// Per-serving nutrition computed over a set of ingredients. Totals are
/// divided by `servings` before being stored here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionEstimate {
    pub calories_per_serving: u32,
    pub protein_grams: f64,
    pub carb_grams: f64,
    pub fat_grams: f64,
    pub servings: u32,
}

impl EstimationTables {
    /// Estimate per-serving nutrition for a list of ingredient names.
    ///
    /// Each ingredient resolves against the nutrition table by exact
    /// case-insensitive match, then substring match in either direction in
    /// row order, then a default entry. Matched values are summed across
    /// ingredients and divided by `servings` (clamped to at least 1), so the
    /// result is independent of ingredient order. Total function: an empty
    /// list yields an all-zero estimate.
    pub fn estimate_nutrition(&self, ingredients: &[String], servings: u32) -> NutritionEstimate {
        let servings = servings.max(1);

        let mut total_calories = 0.0;
        let mut total_protein = 0.0;
        let mut total_carbs = 0.0;
        let mut total_fat = 0.0;

        for ingredient in ingredients {
            let cleaned = ingredient.trim().to_lowercase();
            let (calories, protein, carbs, fat) = match self.match_nutrition(&cleaned) {
                Some(row) => (row.calories, row.protein, row.carbs, row.fat),
                None => (DEFAULT_CALORIES, DEFAULT_PROTEIN, DEFAULT_CARBS, DEFAULT_FAT),
            };
            // 100g-equivalent assumed per ingredient; amounts are not tracked.
            total_calories += calories;
            total_protein += protein;
            total_carbs += carbs;
            total_fat += fat;
        }

        let servings_f = f64::from(servings);
        NutritionEstimate {
            calories_per_serving: (total_calories / servings_f).round() as u32,
            protein_grams: round_one_decimal(total_protein / servings_f),
            carb_grams: round_one_decimal(total_carbs / servings_f),
            fat_grams: round_one_decimal(total_fat / servings_f),
            servings,
        }
    }

    /// Estimate a total cooking time string for a list of ingredient names.
    ///
    /// The dish base time is the maximum per-ingredient time (the dish
    /// finishes when its slowest component finishes); unmatched ingredients
    /// count 10 minutes. The base is scaled by the complexity tier and a
    /// fixed prep offset is added. Total function: an empty list yields the
    /// prep offset alone.
    pub fn estimate_cooking_time(&self, ingredients: &[String], complexity: &str) -> String {
        let mut max_minutes: u32 = 0;
        for ingredient in ingredients {
            let cleaned = ingredient.trim().to_lowercase();
            let minutes = self
                .cooking_times
                .iter()
                .find(|row| cleaned.contains(row.name.as_str()))
                .map(|row| row.minutes)
                .unwrap_or(DEFAULT_COOKING_MINUTES);
            max_minutes = max_minutes.max(minutes);
        }

        let (multiplier, prep_minutes) = match complexity.to_lowercase().as_str() {
            "easy" => (1.0, 5),
            "medium" => (1.3, 10),
            "hard" => (1.8, 15),
            _ => (1.0, 10), // unrecognized tiers behave like an unscaled medium prep
        };

        let total = (f64::from(max_minutes) * multiplier) as u32 + prep_minutes;
        format!("{} minutes", total)
    }

    fn match_nutrition(&self, cleaned: &str) -> Option<&NutritionRow> {
        if let Some(row) = self.nutrition.iter().find(|row| row.name == cleaned) {
            return Some(row);
        }
        // First match in row order wins; a short table key can therefore
        // claim a longer ingredient that merely contains it.
        self.nutrition
            .iter()
            .find(|row| cleaned.contains(row.name.as_str()) || row.name.contains(cleaned))
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
