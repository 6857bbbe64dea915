use async_trait::async_trait;
use dotenv::dotenv;
use reqwest::Client;
use std::env;
use std::error::Error;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use super::endpoints::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, GenerationTask,
};

/// Environment variable holding the OpenRouter API key.
pub const API_KEY_ENV_VAR: &str = "OPENROUTER_API_KEY";

const MODEL_ENV_VAR: &str = "GENERATION_MODEL";
const TIMEOUT_ENV_VAR: &str = "GENERATION_TIMEOUT_SECS";
const DEFAULT_MODEL: &str = "qwen/qwen3-32b";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

#[derive(Debug)]
pub enum GenerationError {
    MissingApiKey(String),
    Network(reqwest::Error),
    Api {
        status: reqwest::StatusCode,
        error_body: String,
    },
    EmptyResponse,
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::MissingApiKey(key_name) => {
                write!(f, "API key not found in environment: {}", key_name)
            }
            GenerationError::Network(err) => write!(f, "Network error: {}", err),
            GenerationError::Api { status, error_body } => {
                write!(f, "API error {}: {}", status, error_body)
            }
            GenerationError::EmptyResponse => write!(f, "API returned no usable content"),
        }
    }
}

impl Error for GenerationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GenerationError::Network(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Network(err)
    }
}

/// The sole external capability the synthesis pipeline depends on: turn a
/// task into free-form text. Implementations may be slow, time out, or
/// return garbage; callers recover from every failure mode.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, task: &GenerationTask) -> Result<String, GenerationError>;
}

/// OpenRouter-backed chat-completion implementation of `GenerationBackend`.
pub struct OpenRouterBackend {
    client: Client,
    api_key_env_var: String,
    model: String,
}

impl OpenRouterBackend {
    /// Build a backend from environment configuration. The API key itself is
    /// read per call, so a missing key surfaces as a generation failure
    /// rather than a startup failure.
    ///
    /// Honors `GENERATION_MODEL` and `GENERATION_TIMEOUT_SECS`; every
    /// request carries the configured timeout so a stalled upstream cannot
    /// hold a synthesis request indefinitely.
    pub fn from_env(api_key_env_var: &str) -> Result<Self, GenerationError> {
        dotenv().ok();
        let model = env::var(MODEL_ENV_VAR).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let timeout_secs = env::var(TIMEOUT_ENV_VAR)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(GenerationError::Network)?;

        Ok(Self {
            client,
            api_key_env_var: api_key_env_var.to_string(),
            model,
        })
    }
}

#[async_trait]
impl GenerationBackend for OpenRouterBackend {
    async fn generate(&self, task: &GenerationTask) -> Result<String, GenerationError> {
        dotenv().ok();
        let api_key = env::var(&self.api_key_env_var)
            .map_err(|_| GenerationError::MissingApiKey(self.api_key_env_var.clone()))?;

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: task.system_prompt(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: task.user_prompt(),
                },
            ],
            temperature: Some(0.2),
            max_tokens: Some(2048),
        };

        let site_url = env::var("SITE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let app_name = env::var("APP_NAME").unwrap_or_else(|_| "RecipeSynth".to_string());

        debug!(model = %self.model, "Sending generation request");
        let response = self
            .client
            .post(OPENROUTER_URL)
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", site_url)
            .header("X-Title", app_name)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(GenerationError::Api { status, error_body });
        }

        let chat_response = response.json::<ChatCompletionResponse>().await?;
        let content = chat_response
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or(GenerationError::EmptyResponse)?;
        if content.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(content)
    }
}
