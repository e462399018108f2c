//! Google Gemini provider

use std::time::Duration;

use recipebook_core::errors::RecipeBookError;
use recipebook_core::generation::GenerationRequest;
use recipebook_core_types::Sensitive;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::RecipeGenerator;
use crate::config::AiConfig;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Blocking Gemini client with a hard request timeout and no retries
#[derive(Debug)]
pub struct GeminiGenerator {
    api_key: Sensitive<String>,
    model: String,
    base_url: String,
    timeout_secs: u64,
    client: reqwest::blocking::Client,
}

impl GeminiGenerator {
    /// # Errors
    /// `InvalidInput` if no API key is configured, `Collaborator` if the
    /// HTTP client cannot be built.
    pub fn from_config(config: &AiConfig) -> Result<Self, RecipeBookError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| RecipeBookError::InvalidInput {
                reason: "GEMINI_API_KEY is not set".to_string(),
            })?;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RecipeBookError::Collaborator {
                message: e.to_string(),
            })?;

        Ok(Self {
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// The URL is stripped so request details never reach error messages
    fn map_transport(&self, err: reqwest::Error) -> RecipeBookError {
        let err = err.without_url();
        if err.is_timeout() {
            RecipeBookError::CollaboratorTimeout {
                seconds: self.timeout_secs,
            }
        } else {
            RecipeBookError::Collaborator {
                message: err.to_string(),
            }
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_p: f64,
    top_k: u32,
    max_output_tokens: u32,
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Schema the provider must answer with; mirrors `GeneratedRecipe`
fn recipe_schema() -> Value {
    json!({
        "type": "OBJECT",
        "required": [
            "name",
            "description",
            "cooking_time_in_minutes",
            "category",
            "steps",
            "ingredients"
        ],
        "properties": {
            "name": {"type": "STRING"},
            "description": {"type": "STRING"},
            "cooking_time_in_minutes": {"type": "INTEGER"},
            "category": {"type": "STRING"},
            "steps": {"type": "ARRAY", "items": {"type": "STRING"}},
            "ingredients": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "required": ["name", "volume", "volume_measure"],
                    "properties": {
                        "name": {"type": "STRING"},
                        "volume": {"type": "NUMBER"},
                        "volume_measure": {"type": "STRING"}
                    }
                }
            }
        }
    })
}

fn build_request(request: &GenerationRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: Some(request.prompt()),
            }],
        }],
        generation_config: GenerationConfig {
            temperature: 1.0,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8192,
            response_mime_type: "application/json",
            response_schema: recipe_schema(),
        },
    }
}

/// First text part of the first candidate
fn extract_text(body: &str) -> Result<String, RecipeBookError> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| RecipeBookError::Collaborator {
            message: format!("unreadable provider response: {}", e),
        })?;

    response
        .candidates
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .find_map(|part| part.text)
        .ok_or_else(|| RecipeBookError::Collaborator {
            message: "provider returned no content".to_string(),
        })
}

impl RecipeGenerator for GeminiGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, RecipeBookError> {
        tracing::debug!(model = %self.model, "requesting recipe generation");

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, self.api_key.expose().as_str())
            .json(&build_request(request))
            .send()
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        let body = response.text().map_err(|e| self.map_transport(e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            return Err(RecipeBookError::Collaborator {
                message: format!("provider answered {}: {}", status.as_u16(), message),
            });
        }

        extract_text(&body)
    }
}
