use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::estimation::NutritionEstimate;

/// A response never carries more recipes than this.
pub const MAX_RECIPES: usize = 3;
/// Instruction lists longer than this are truncated during validation.
pub const MAX_INSTRUCTIONS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Labels outside the known set coerce to `Easy` instead of rejecting
    /// the record.
    pub fn coerce(label: Option<&str>) -> Self {
        match label {
            Some("Easy") => Difficulty::Easy,
            Some("Medium") => Difficulty::Medium,
            Some("Hard") => Difficulty::Hard,
            _ => Difficulty::Easy,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// Display nutrition carried by a recipe. Macro amounts are display strings
/// like "12g"; `fat` is optional because generated records routinely omit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeNutrition {
    pub calories: u32,
    pub protein: String,
    pub carbs: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<String>,
}

impl RecipeNutrition {
    pub fn from_estimate(estimate: &NutritionEstimate) -> Self {
        Self {
            calories: estimate.calories_per_serving,
            protein: format!("{:.1}g", estimate.protein_grams),
            carbs: format!("{:.1}g", estimate.carb_grams),
            fat: Some(format!("{:.1}g", estimate.fat_grams)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(rename = "cookingTime")]
    pub cooking_time: String,
    pub difficulty: Difficulty,
    pub nutrition: RecipeNutrition,
}

/// A candidate record violated the recipe schema and was dropped.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationFailure {
    #[error("candidate record is not a JSON object")]
    NotAnObject,
    #[error("missing or invalid `{0}` field")]
    Field(&'static str),
}

/// Check one extracted candidate record against the recipe schema.
///
/// The only repairs performed are coercing an unknown `difficulty` to `Easy`
/// and truncating over-long instruction lists; any other missing or
/// wrong-typed field rejects the whole record. Rejected records are dropped
/// by the caller, never substituted individually.
pub fn validate_candidate(candidate: &Value) -> Result<Recipe, ValidationFailure> {
    let record = candidate.as_object().ok_or(ValidationFailure::NotAnObject)?;

    let name = record
        .get("name")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or(ValidationFailure::Field("name"))?
        .to_string();

    let ingredients =
        string_sequence(record.get("ingredients")).ok_or(ValidationFailure::Field("ingredients"))?;

    let mut instructions = string_sequence(record.get("instructions"))
        .ok_or(ValidationFailure::Field("instructions"))?;
    instructions.truncate(MAX_INSTRUCTIONS);

    let cooking_time = record
        .get("cookingTime")
        .and_then(Value::as_str)
        .ok_or(ValidationFailure::Field("cookingTime"))?
        .to_string();

    let difficulty = Difficulty::coerce(record.get("difficulty").and_then(Value::as_str));

    let nutrition = record
        .get("nutrition")
        .and_then(Value::as_object)
        .ok_or(ValidationFailure::Field("nutrition"))?;
    let calories = nutrition
        .get("calories")
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or(ValidationFailure::Field("nutrition.calories"))?;
    let protein = nutrition
        .get("protein")
        .and_then(Value::as_str)
        .ok_or(ValidationFailure::Field("nutrition.protein"))?
        .to_string();
    let carbs = nutrition
        .get("carbs")
        .and_then(Value::as_str)
        .ok_or(ValidationFailure::Field("nutrition.carbs"))?
        .to_string();
    let fat = nutrition
        .get("fat")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(Recipe {
        name,
        ingredients,
        instructions,
        cooking_time,
        difficulty,
        nutrition: RecipeNutrition {
            calories,
            protein,
            carbs,
            fat,
        },
    })
}

/// A non-empty JSON array whose elements are all strings, or None.
fn string_sequence(value: Option<&Value>) -> Option<Vec<String>> {
    let items = value?.as_array()?;
    if items.is_empty() {
        return None;
    }
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_candidate() -> Value {
        json!({
            "name": "Garlic Butter Pasta",
            "ingredients": ["pasta", "garlic", "butter"],
            "instructions": ["Boil pasta", "Saute garlic in butter", "Toss together"],
            "cookingTime": "20 minutes",
            "difficulty": "Medium",
            "nutrition": {
                "calories": 450,
                "protein": "12g",
                "carbs": "60g"
            }
        })
    }

    #[test]
    fn test_valid_candidate_is_accepted() {
        let recipe = validate_candidate(&valid_candidate()).unwrap();
        assert_eq!(recipe.name, "Garlic Butter Pasta");
        assert_eq!(recipe.ingredients.len(), 3);
        assert_eq!(recipe.difficulty, Difficulty::Medium);
        assert_eq!(recipe.nutrition.calories, 450);
        assert_eq!(recipe.nutrition.fat, None);
    }

    #[test]
    fn test_missing_instructions_is_rejected() {
        let mut candidate = valid_candidate();
        candidate.as_object_mut().unwrap().remove("instructions");
        assert_eq!(
            validate_candidate(&candidate),
            Err(ValidationFailure::Field("instructions"))
        );
    }

    #[test]
    fn test_unknown_difficulty_is_coerced_to_easy() {
        let mut candidate = valid_candidate();
        candidate["difficulty"] = json!("Extreme");
        let recipe = validate_candidate(&candidate).unwrap();
        assert_eq!(recipe.difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_absent_difficulty_is_coerced_to_easy() {
        let mut candidate = valid_candidate();
        candidate.as_object_mut().unwrap().remove("difficulty");
        let recipe = validate_candidate(&candidate).unwrap();
        assert_eq!(recipe.difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_instructions_are_truncated_to_six() {
        let mut candidate = valid_candidate();
        candidate["instructions"] =
            json!(["1", "2", "3", "4", "5", "6", "7", "8"]);
        let recipe = validate_candidate(&candidate).unwrap();
        assert_eq!(recipe.instructions.len(), MAX_INSTRUCTIONS);
    }

    #[test]
    fn test_empty_ingredients_is_rejected() {
        let mut candidate = valid_candidate();
        candidate["ingredients"] = json!([]);
        assert_eq!(
            validate_candidate(&candidate),
            Err(ValidationFailure::Field("ingredients"))
        );
    }

    #[test]
    fn test_non_string_ingredients_are_rejected() {
        let mut candidate = valid_candidate();
        candidate["ingredients"] = json!(["pasta", 42]);
        assert_eq!(
            validate_candidate(&candidate),
            Err(ValidationFailure::Field("ingredients"))
        );
    }

    #[test]
    fn test_missing_nutrition_subfield_is_rejected() {
        let mut candidate = valid_candidate();
        candidate["nutrition"].as_object_mut().unwrap().remove("carbs");
        assert_eq!(
            validate_candidate(&candidate),
            Err(ValidationFailure::Field("nutrition.carbs"))
        );
    }

    #[test]
    fn test_negative_or_non_integer_calories_is_rejected() {
        let mut candidate = valid_candidate();
        candidate["nutrition"]["calories"] = json!(-5);
        assert!(validate_candidate(&candidate).is_err());
        candidate["nutrition"]["calories"] = json!("450");
        assert!(validate_candidate(&candidate).is_err());
    }

    #[test]
    fn test_optional_fat_is_kept_when_present() {
        let mut candidate = valid_candidate();
        candidate["nutrition"]["fat"] = json!("9g");
        let recipe = validate_candidate(&candidate).unwrap();
        assert_eq!(recipe.nutrition.fat.as_deref(), Some("9g"));
    }

    #[test]
    fn test_non_object_candidate_is_rejected() {
        assert_eq!(
            validate_candidate(&json!("just a string")),
            Err(ValidationFailure::NotAnObject)
        );
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut candidate = valid_candidate();
        candidate["name"] = json!("   ");
        assert_eq!(
            validate_candidate(&candidate),
            Err(ValidationFailure::Field("name"))
        );
    }

    #[test]
    fn test_nutrition_from_estimate_formatting() {
        let estimate = NutritionEstimate {
            calories_per_serving: 74,
            protein_grams: 8.5,
            carb_grams: 7.0,
            fat_grams: 1.0,
            servings: 4,
        };
        let nutrition = RecipeNutrition::from_estimate(&estimate);
        assert_eq!(nutrition.calories, 74);
        assert_eq!(nutrition.protein, "8.5g");
        assert_eq!(nutrition.carbs, "7.0g");
        assert_eq!(nutrition.fat.as_deref(), Some("1.0g"));
    }

    #[test]
    fn test_recipe_wire_format_field_names() {
        let recipe = validate_candidate(&valid_candidate()).unwrap();
        let serialized = serde_json::to_value(&recipe).unwrap();
        assert!(serialized.get("cookingTime").is_some());
        assert_eq!(serialized["difficulty"], "Medium");
        // Absent fat stays off the wire entirely.
        assert!(serialized["nutrition"].get("fat").is_none());
    }
}
