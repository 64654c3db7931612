use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::app_config::{Config, Formality};
use crate::errors::ProviderError;
use crate::providers::{normalize_endpoint, Provider};

/// Gemini client for the generateContent API.
///
/// The generation parameters are fixed at construction time: translation
/// wants near-deterministic output, a bounded response length, and safety
/// thresholds that do not block ordinary conversational phrases.
#[derive(Debug)]
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL
    endpoint: String,
    /// Model name to use for generation
    model: String,
    /// Temperature for generation
    temperature: f32,
    /// Maximum number of tokens to generate
    max_output_tokens: u32,
}

/// Generate request for the Gemini API
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    /// The conversation content
    contents: Vec<GeminiContent>,

    /// Generation parameters
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,

    /// Content-safety thresholds
    #[serde(rename = "safetySettings", skip_serializing_if = "Vec::is_empty")]
    safety_settings: Vec<SafetySetting>,
}

/// A content block in a Gemini request or response
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    /// Message parts
    pub parts: Vec<GeminiPart>,

    /// Role of the content producer (user, model)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// A single text part
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    /// The text content
    pub text: String,
}

/// Generation parameters for the Gemini API
#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    /// Temperature for generation
    temperature: f32,

    /// Maximum number of tokens to generate
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

/// A single content-safety threshold
#[derive(Debug, Serialize)]
pub struct SafetySetting {
    /// Harm category identifier
    category: String,

    /// Blocking threshold for the category
    threshold: String,
}

/// Harm categories the request relaxes to BLOCK_ONLY_HIGH; everyday
/// phrases were getting caught by the default thresholds
const SAFETY_CATEGORIES: &[&str] = &[
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Generate response from the Gemini API
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    /// Generated candidates
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

/// A single response candidate
#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    /// Generated content
    pub content: Option<GeminiContent>,
}

impl GeminiRequest {
    /// Create a new request around a single user prompt
    pub fn new(prompt: impl Into<String>, temperature: f32, max_output_tokens: u32) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt.into() }],
                role: Some("user".to_string()),
            }],
            generation_config: GenerationConfig {
                temperature,
                max_output_tokens,
            },
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|category| SafetySetting {
                    category: category.to_string(),
                    threshold: "BLOCK_ONLY_HIGH".to_string(),
                })
                .collect(),
        }
    }
}

impl Gemini {
    /// Create a new Gemini client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
        max_output_tokens: u32,
        timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        let endpoint = normalize_endpoint(&endpoint.into())?;

        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint,
            model: model.into(),
            temperature,
            max_output_tokens,
        })
    }

    /// Create a client from the application configuration
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        Self::new(
            config.api_key.clone(),
            config.get_endpoint(),
            config.get_model(),
            config.temperature,
            config.max_tokens,
            config.timeout_secs,
        )
    }

    /// Fixed instruction template embedding the source text
    fn build_prompt(text: &str, formality: Formality) -> String {
        format!(
            "You are a professional translator. Translate this English text to Runyakitara \
             (a Bantu language spoken in western Uganda). Use a {} tone in the translation. \
             Respond with only the Runyakitara translation, without explanations or notes.\n\
             English: {}\n\
             Runyakitara:",
            formality.as_tone(),
            text
        )
    }

    /// Issue a generateContent request and return the concatenated
    /// candidate text
    async fn generate(&self, request: GeminiRequest) -> Result<String, ProviderError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Gemini API error ({}): {}", status, message);

            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(ProviderError::AuthenticationError(message));
            }
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let gemini_response = response
            .json::<GeminiResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let text: String = gemini_response
            .candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        Ok(text)
    }
}

#[async_trait]
impl Provider for Gemini {
    async fn translate(&self, text: &str, formality: Formality) -> Result<String, ProviderError> {
        let prompt = Self::build_prompt(text, formality);
        let request = GeminiRequest::new(prompt, self.temperature, self.max_output_tokens);

        debug!("Sending generateContent request to model '{}'", self.model);
        self.generate(request).await
    }

    fn name(&self) -> &'static str {
        "Gemini"
    }
}
