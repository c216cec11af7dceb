use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::domain::QuestionRecord,
};

/// Prompt plus the response schema the generation service must follow.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub schema_name: String,
    pub schema: Value,
}

/// Boundary to the hosted text-generation service. Returns the raw JSON text
/// of the structured response.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> AppResult<String>;
}

/// Chat-completions client for any OpenAI-compatible endpoint, Gemini's by default.
pub struct OpenAiQuestionGenerator {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiQuestionGenerator {
    /// `None` when no API key is configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        let api_key = config.generation_api_key.as_ref()?;

        let openai_config = OpenAIConfig::new()
            .with_api_base(config.generation_api_base.clone())
            .with_api_key(api_key.expose_secret().to_string());

        Some(Self {
            client: Client::with_config(openai_config),
            model: config.generation_model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(&self, request: &GenerationRequest) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": request.prompt }
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": request.schema_name,
                    "schema": request.schema,
                }
            }
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionBody {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl QuestionGenerator for OpenAiQuestionGenerator {
    async fn generate(&self, request: &GenerationRequest) -> AppResult<String> {
        log::info!(
            "Requesting structured generation from model {} ({} prompt chars)",
            self.model,
            request.prompt.len()
        );

        let response: ChatCompletionBody = self
            .client
            .chat()
            .create_byot(self.request_body(request))
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AppError::GenerationError("Response did not contain any content".to_string())
            })
    }
}

#[derive(Debug, Deserialize)]
struct GeneratedExam {
    #[serde(rename = "soal_dan_kisi_kisi", default)]
    questions: Option<Vec<QuestionRecord>>,
}

/// Parses the generation service's JSON text into records.
///
/// A response without the question array yields an empty list; the caller
/// decides whether that is a failure.
pub fn parse_generated_exam(content: &str) -> AppResult<Vec<QuestionRecord>> {
    let exam: GeneratedExam = serde_json::from_str(strip_code_fence(content))?;
    Ok(exam.questions.unwrap_or_default())
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}
