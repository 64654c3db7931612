use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::app_config::{Config, Formality};
use crate::errors::ProviderError;
use crate::providers::{normalize_endpoint, Provider};

/// System instruction sent with every chat request
const SYSTEM_PROMPT: &str = "You are a professional translator specializing in Runyakitara, \
     a Bantu language spoken in western Uganda. Provide direct, accurate translations only.";

/// OpenRouter client for the OpenAI-compatible chat-completions API
#[derive(Debug)]
pub struct OpenRouter {
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
    max_tokens: u32,
}

/// Chat completion request
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    /// The model to use
    model: String,

    /// The messages for the conversation
    messages: Vec<ChatMessage>,

    /// Temperature for generation
    temperature: f32,

    /// Maximum number of tokens to generate
    max_tokens: u32,
}

/// Chat message object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,

    /// Content of the message
    pub content: String,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    /// Generated choices
    #[serde(default)]
    pub choices: Vec<ChatChoice>,

    /// Token usage information
    pub usage: Option<TokenUsage>,
}

/// A single response choice
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    /// Response message
    pub message: ChatMessage,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct TokenUsage {
    /// Total number of tokens consumed by the request
    pub total_tokens: u32,
}

impl ChatRequest {
    /// Create a new chat request
    pub fn new(model: impl Into<String>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature,
            max_tokens,
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }
}

impl OpenRouter {
    /// Create a new OpenRouter client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
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
            max_tokens,
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

    /// User message carrying the source text and the requested tone
    fn build_user_prompt(text: &str, formality: Formality) -> String {
        format!(
            "Translate this English text to Runyakitara language (spoken in western Uganda).\n\n\
             Use a {} tone in the translation.\n\n\
             IMPORTANT: Your response must contain ONLY the Runyakitara translation.\n\
             DO NOT include explanations, notes, or anything other than the direct translation.\n\
             DO NOT use quotes or formatting.\n\n\
             English text to translate:\n{}",
            formality.as_tone(),
            text
        )
    }

    /// Issue a chat-completions request and return the first choice's content
    async fn complete(&self, request: ChatRequest) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.endpoint);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("HTTP-Referer", "https://github.com/omuvunuzi")
            .header("X-Title", "English-Runyakitara Translator")
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
            error!("OpenRouter API error ({}): {}", status, message);

            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(ProviderError::AuthenticationError(message));
            }
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let chat_response = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        if let Some(usage) = &chat_response.usage {
            info!("Translation used {} tokens", usage.total_tokens);
        }

        let content = chat_response
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        Ok(content)
    }
}

#[async_trait]
impl Provider for OpenRouter {
    async fn translate(&self, text: &str, formality: Formality) -> Result<String, ProviderError> {
        let request = ChatRequest::new(&self.model, self.temperature, self.max_tokens)
            .add_message("system", SYSTEM_PROMPT)
            .add_message("user", Self::build_user_prompt(text, formality));

        debug!("Sending chat completion request to model '{}'", self.model);
        self.complete(request).await
    }

    fn name(&self) -> &'static str {
        "OpenRouter"
    }
}
