use futures::future::join_all;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::api_connection::{GenerationBackend, GenerationTask};
use crate::estimation::{EstimationTables, DEFAULT_SERVINGS};
use crate::ingredient_normalizer::{normalize_ingredients, title_case};
use crate::record_extractor::extract_candidates;
use crate::recipe_model::{validate_candidate, Difficulty, Recipe, RecipeNutrition, MAX_RECIPES};

/// The one contract violation `synthesize` surfaces to its caller: the
/// supplied text contained no usable ingredient content at all.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("ingredient text is empty")]
pub struct EmptyInputError;

const FALLBACK_INSTRUCTIONS: [&str; 4] = [
    "Prepare all ingredients",
    "Cook ingredients together",
    "Season to taste",
    "Serve when ready",
];

/// Sequences normalization, generation, extraction, validation, optional
/// enhancement and fallback into the "always 1-3 valid recipes" contract.
pub struct RecipeSynthesizer {
    backend: Arc<dyn GenerationBackend>,
    tables: Arc<EstimationTables>,
}

impl RecipeSynthesizer {
    pub fn new(backend: Arc<dyn GenerationBackend>, tables: Arc<EstimationTables>) -> Self {
        Self { backend, tables }
    }

    /// Turn free-text ingredients into 1-3 validated recipes.
    ///
    /// Generation, extraction and validation failures are all recovered
    /// internally; when nothing usable survives, a deterministic fallback
    /// recipe is built from the estimation tables without touching the
    /// backend again. Identical inputs against a backend returning identical
    /// text yield identical output.
    pub async fn synthesize(
        &self,
        ingredients_text: &str,
        dietary_restrictions: Option<&str>,
    ) -> Result<Vec<Recipe>, EmptyInputError> {
        let mut ingredients = normalize_ingredients(ingredients_text);
        if ingredients.is_empty() {
            // Last resort: treat the raw text as a single ingredient rather
            // than blocking the pipeline on an over-aggressive cleanup.
            let last_resort = title_case(&ingredients_text.trim().to_lowercase());
            if last_resort.is_empty() {
                return Err(EmptyInputError);
            }
            ingredients = vec![last_resort];
        }
        debug!(count = ingredients.len(), "Normalized ingredients");

        let task = GenerationTask::GenerateRecipes {
            ingredients: ingredients.clone(),
            dietary_restrictions: dietary_restrictions.map(str::to_string),
        };
        let raw_text = match self.backend.generate(&task).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Generation call failed, continuing without text: {}", e);
                String::new()
            }
        };

        let candidates = match extract_candidates(&raw_text) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("No structured payload extracted: {}", e);
                Vec::new()
            }
        };

        let mut recipes = Vec::new();
        for candidate in &candidates {
            match validate_candidate(candidate) {
                Ok(recipe) => recipes.push(recipe),
                Err(e) => warn!("Dropping candidate record: {}", e),
            }
        }

        if let Some(restrictions) = dietary_restrictions {
            if !recipes.is_empty() {
                recipes = self.enhance_recipes(recipes, restrictions).await;
            }
        }

        if recipes.is_empty() {
            warn!("No valid recipes from generation, using deterministic fallback");
            recipes.push(self.fallback_recipe(&ingredients));
        }
        recipes.truncate(MAX_RECIPES);
        Ok(recipes)
    }

    /// Re-run generation per recipe to substitute ingredients for the given
    /// dietary restrictions. Calls are issued concurrently and failures are
    /// isolated: a recipe whose enhancement pass fails is kept unmodified.
    async fn enhance_recipes(&self, recipes: Vec<Recipe>, restrictions: &str) -> Vec<Recipe> {
        join_all(
            recipes
                .into_iter()
                .map(|recipe| self.enhance_one(recipe, restrictions)),
        )
        .await
    }

    async fn enhance_one(&self, recipe: Recipe, restrictions: &str) -> Recipe {
        let recipe_json = match serde_json::to_string(&recipe) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize recipe for enhancement: {}", e);
                return recipe;
            }
        };

        let task = GenerationTask::EnhanceRecipe {
            recipe_json,
            dietary_restrictions: restrictions.to_string(),
        };
        let raw_text = match self.backend.generate(&task).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Enhancement call failed for '{}': {}", recipe.name, e);
                return recipe;
            }
        };

        let enhanced = extract_candidates(&raw_text)
            .ok()
            .and_then(|candidates| candidates.into_iter().next())
            .and_then(|candidate| validate_candidate(&candidate).ok());
        match enhanced {
            Some(enhanced_recipe) => enhanced_recipe,
            None => {
                warn!(
                    "Enhancement produced no valid recipe for '{}', keeping original",
                    recipe.name
                );
                recipe
            }
        }
    }

    /// Deterministic single-recipe fallback built entirely from the
    /// estimation tables. Never calls the generation backend.
    fn fallback_recipe(&self, ingredients: &[String]) -> Recipe {
        let nutrition = self.tables.estimate_nutrition(ingredients, DEFAULT_SERVINGS);
        let cooking_time = self.tables.estimate_cooking_time(ingredients, "easy");
        Recipe {
            name: format!("Simple {} Dish", ingredients[0]),
            ingredients: ingredients.to_vec(),
            instructions: FALLBACK_INSTRUCTIONS.iter().map(|s| s.to_string()).collect(),
            cooking_time,
            difficulty: Difficulty::Easy,
            nutrition: RecipeNutrition::from_estimate(&nutrition),
        }
    }
}
