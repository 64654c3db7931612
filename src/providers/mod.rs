/*!
 * Provider implementations for remote translation backends.
 *
 * This module contains client implementations for the supported backends:
 * - Gemini: direct generation-model API
 * - OpenRouter: OpenAI-compatible chat-completion API
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::app_config::{Config, Formality, ProviderKind};
use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must
/// follow, allowing them to be used interchangeably by the resolver. Both
/// backends must produce functionally equivalent raw text for equivalent
/// inputs; which one is used is purely a configuration concern.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Translate English text to Runyakitara with the requested tone.
    ///
    /// Returns the provider's raw response text, which may still carry
    /// decoration for the extractor to remove. A single failure is
    /// surfaced once per call; providers do not retry.
    async fn translate(&self, text: &str, formality: Formality) -> Result<String, ProviderError>;

    /// Short provider name for logging
    fn name(&self) -> &'static str;
}

/// Build the configured provider.
///
/// Fails when the configuration cannot produce a working client (for
/// example, an unparseable endpoint); missing credentials are caught
/// earlier by `Config::validate`.
pub fn create_provider(config: &Config) -> Result<Box<dyn Provider>, ProviderError> {
    match config.provider {
        ProviderKind::Gemini => Ok(Box::new(gemini::Gemini::from_config(config)?)),
        ProviderKind::OpenRouter => Ok(Box::new(openrouter::OpenRouter::from_config(config)?)),
    }
}

/// Validate an endpoint string, returning it with any trailing slash removed
pub(crate) fn normalize_endpoint(endpoint: &str) -> Result<String, ProviderError> {
    url::Url::parse(endpoint)
        .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint '{}': {}", endpoint, e)))?;
    Ok(endpoint.trim_end_matches('/').to_string())
}

pub mod gemini;
pub mod openrouter;
