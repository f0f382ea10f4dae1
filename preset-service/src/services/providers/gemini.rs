//! Gemini AI provider implementation.
//!
//! Generates preset text via the `generateContent` endpoint. When no fixed
//! model is configured, models are discovered fresh per request and ranked by
//! a name-substring preference; generation gets exactly one fallback attempt
//! against the next-ranked model.

use super::{ProviderError, TextProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Generation capability a model must advertise to be usable.
const GENERATE_METHOD: &str = "generateContent";

/// Ranked name-substring preference for discovered models. Earlier tiers
/// win; capable models matching no tier keep provider order after the tiers.
const MODEL_PREFERENCE: &[&str] = &["flash", "pro"];

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub api_base: String,
    /// Fixed model identifier. When set, discovery is skipped and no
    /// fallback attempt exists.
    pub model: Option<String>,
}

/// Gemini text provider.
pub struct GeminiTextProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiTextProvider {
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Build the API URL for the given model and method. Discovered model
    /// names carry a `models/` prefix that the URL path already provides.
    fn model_url(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            self.config.api_base,
            model.trim_start_matches("models/"),
            method,
            self.config.api_key
        )
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, ProviderError> {
        let url = format!("{}/models?key={}", self.config.api_base, self.config.api_key);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                message: format!("model listing failed with {}: {}", status, body),
                code: Some(status.as_u16() as i32),
            });
        }

        let listing: ListModelsResponse = response.json().await.map_err(|e| ProviderError::Api {
            message: format!("Failed to parse model listing: {}", e),
            code: None,
        })?;

        Ok(listing.models)
    }

    /// Resolve candidate models in preference order: the configured model
    /// alone, or the top two discovered models.
    async fn candidate_models(&self) -> Result<Vec<String>, ProviderError> {
        if let Some(model) = &self.config.model {
            return Ok(vec![model.clone()]);
        }

        let models = self.list_models().await?;
        let ranked = rank_models(&models);
        if ranked.is_empty() {
            return Err(ProviderError::NoUsableModel);
        }

        Ok(ranked.into_iter().take(2).collect())
    }

    async fn generate_with_model(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![ContentPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let url = self.model_url(model, GENERATE_METHOD);

        tracing::debug!(
            model = %model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        // The API reports failures inside the body envelope, so the body is
        // parsed regardless of the HTTP status.
        let body: GenerateContentResponse =
            response.json().await.map_err(|e| ProviderError::Api {
                message: format!("Failed to parse response: {}", e),
                code: None,
            })?;

        if let Some(error) = body.error {
            tracing::error!(model = %model, code = ?error.code, "Gemini API returned an error");
            return Err(ProviderError::Api {
                message: error.message,
                code: error.code,
            });
        }

        body.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|text| !text.is_empty())
            .ok_or(ProviderError::NoContent)
    }
}

#[async_trait]
impl TextProvider for GeminiTextProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key not configured".to_string(),
            ));
        }

        let candidates = self.candidate_models().await?;
        let primary = &candidates[0];

        match self.generate_with_model(primary, prompt).await {
            Ok(text) => Ok(text),
            Err(primary_err) => match candidates.get(1) {
                Some(fallback) => {
                    tracing::warn!(
                        model = %primary,
                        fallback = %fallback,
                        error = %primary_err,
                        "Primary model failed, retrying with fallback"
                    );
                    self.generate_with_model(fallback, prompt).await
                }
                None => Err(primary_err),
            },
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key not configured".to_string(),
            ));
        }

        self.list_models().await.map(|_| ())
    }
}

/// Model descriptor returned by the listing endpoint. Fetched fresh per
/// request, never cached.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

/// Order generation-capable models by tier preference, then provider order.
pub fn rank_models(models: &[ModelInfo]) -> Vec<String> {
    let capable: Vec<&ModelInfo> = models
        .iter()
        .filter(|m| {
            m.supported_generation_methods
                .iter()
                .any(|method| method == GENERATE_METHOD)
        })
        .collect();

    let mut ranked: Vec<String> = Vec::with_capacity(capable.len());
    for tier in MODEL_PREFERENCE {
        for model in &capable {
            if model.name.contains(tier) && !ranked.contains(&model.name) {
                ranked.push(model.name.clone());
            }
        }
    }
    for model in &capable {
        if !ranked.contains(&model.name) {
            ranked.push(model.name.clone());
        }
    }

    ranked
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(default)]
    code: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}
