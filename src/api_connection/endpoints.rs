use serde::{Deserialize, Serialize};

/// The two prompt shapes the synthesis pipeline sends to the generation
/// backend. The backend turns a task into free-form text; everything
/// downstream treats that text as untrusted.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationTask {
    /// Primary call: produce recipe records for a set of ingredients.
    GenerateRecipes {
        ingredients: Vec<String>,
        dietary_restrictions: Option<String>,
    },
    /// Secondary call: adapt one already-valid recipe to dietary
    /// restrictions via ingredient substitution.
    EnhanceRecipe {
        recipe_json: String,
        dietary_restrictions: String,
    },
}

impl GenerationTask {
    pub fn system_prompt(&self) -> String {
        match self {
            GenerationTask::GenerateRecipes { .. } => "\
You are a recipe generation assistant. Given a list of available ingredients, respond with a JSON array of 2-3 recipes.
Each recipe must be a JSON object with the following properties:
- \"name\": The recipe name.
- \"ingredients\": An array of ingredient strings used by the recipe.
- \"instructions\": An array of step-by-step instruction strings (at most 6).
- \"cookingTime\": The estimated time as a string (e.g., \"20 minutes\").
- \"difficulty\": One of \"Easy\", \"Medium\" or \"Hard\".
- \"nutrition\": An object with \"calories\" (a number), \"protein\" (a string, e.g., \"12g\") and \"carbs\" (a string, e.g., \"60g\").
The JSON array must be the only content in your response. Do not include any explanatory text, comments, or markdown formatting (like ```json) before or after the JSON array."
                .to_string(),
            GenerationTask::EnhanceRecipe { .. } => "\
You are a recipe enhancement assistant. Adapt the given recipe to the stated dietary restrictions, substituting ingredients where needed and keeping the rest of the recipe intact.
Respond with a single JSON recipe object with the same properties as the input recipe.
The JSON object must be the only content in your response. Do not include any explanatory text, comments, or markdown formatting (like ```json) before or after the JSON object."
                .to_string(),
        }
    }

    pub fn user_prompt(&self) -> String {
        match self {
            GenerationTask::GenerateRecipes {
                ingredients,
                dietary_restrictions,
            } => {
                let mut prompt = format!("Available ingredients: {}", ingredients.join(", "));
                if let Some(restrictions) = dietary_restrictions {
                    prompt.push_str(&format!("\nDietary restrictions: {}", restrictions));
                }
                prompt
            }
            GenerationTask::EnhanceRecipe {
                recipe_json,
                dietary_restrictions,
            } => {
                format!(
                    "Recipe:\n{}\n\nDietary restrictions: {}",
                    recipe_json, dietary_restrictions
                )
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionResponseMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionChoice {
    pub message: ChatCompletionResponseMessage,
    pub finish_reason: Option<String>,
    pub index: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: Option<u32>,
    pub total_tokens: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub object: Option<String>,
    pub created: u64,
    pub model: String,
    pub choices: Vec<ChatCompletionChoice>,
    pub usage: Option<ChatCompletionUsage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_prompt_includes_ingredients_and_restrictions() {
        let task = GenerationTask::GenerateRecipes {
            ingredients: vec!["Chicken".to_string(), "Rice".to_string()],
            dietary_restrictions: Some("gluten-free".to_string()),
        };
        let prompt = task.user_prompt();
        assert!(prompt.contains("Chicken, Rice"));
        assert!(prompt.contains("gluten-free"));
    }

    #[test]
    fn test_generate_prompt_omits_absent_restrictions() {
        let task = GenerationTask::GenerateRecipes {
            ingredients: vec!["Rice".to_string()],
            dietary_restrictions: None,
        };
        assert!(!task.user_prompt().contains("Dietary restrictions"));
    }

    #[test]
    fn test_enhance_prompt_carries_recipe_json() {
        let task = GenerationTask::EnhanceRecipe {
            recipe_json: "{\"name\":\"Stir Fry\"}".to_string(),
            dietary_restrictions: "vegan".to_string(),
        };
        let prompt = task.user_prompt();
        assert!(prompt.contains("Stir Fry"));
        assert!(prompt.contains("vegan"));
        assert!(task.system_prompt().contains("single JSON recipe object"));
    }
}
