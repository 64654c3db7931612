/*!
 * Tests for application configuration functionality
 */

use std::str::FromStr;

use omuvunuzi::app_config::{Config, Formality, LogLevel, ProviderKind};
use tempfile::tempdir;

/// Test default configuration values
#[test]
fn test_config_default_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.provider, ProviderKind::OpenRouter);
    assert_eq!(config.formality, Formality::Neutral);
    assert!((config.temperature - 0.1).abs() < f32::EPSILON);
    assert_eq!(config.max_tokens, 1000);
    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.history_size, 5);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.api_key.is_empty());
}

#[test]
fn test_config_getModel_shouldFallBackPerProvider() {
    let mut config = Config::default();

    config.provider = ProviderKind::OpenRouter;
    assert_eq!(config.get_model(), "anthropic/claude-3-5-sonnet");

    config.provider = ProviderKind::Gemini;
    assert_eq!(config.get_model(), "gemini-1.5-flash");

    config.model = "my-model".to_string();
    assert_eq!(config.get_model(), "my-model");
}

#[test]
fn test_config_getEndpoint_shouldFallBackPerProvider() {
    let mut config = Config::default();

    config.provider = ProviderKind::OpenRouter;
    assert_eq!(config.get_endpoint(), "https://openrouter.ai/api/v1");

    config.provider = ProviderKind::Gemini;
    assert_eq!(config.get_endpoint(), "https://generativelanguage.googleapis.com");

    config.endpoint = "http://localhost:8080".to_string();
    assert_eq!(config.get_endpoint(), "http://localhost:8080");
}

#[test]
fn test_config_validate_shouldRequireApiKey() {
    let mut config = Config::default();
    assert!(config.validate().is_err());

    config.api_key = "sk-or-1234567890".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validate_shouldRejectOutOfRangeValues() {
    let mut config = Config::default();
    config.api_key = "sk-or-1234567890".to_string();

    config.temperature = 1.5;
    assert!(config.validate().is_err());
    config.temperature = 0.1;

    config.history_size = 0;
    assert!(config.validate().is_err());
    config.history_size = 5;

    assert!(config.validate().is_ok());
}

#[test]
fn test_config_loadOrDefault_withMissingFile_shouldCreateDefaultFile() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");

    let config = Config::load_or_default(&path);

    assert_eq!(config.provider, ProviderKind::OpenRouter);
    assert!(path.exists());
}

#[test]
fn test_config_loadOrDefault_withCorruptFile_shouldFallBackToDefaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not valid json").unwrap();

    let config = Config::load_or_default(&path);

    assert_eq!(config.provider, ProviderKind::OpenRouter);
    assert_eq!(config.history_size, 5);
}

#[test]
fn test_config_saveAndReload_shouldRoundTrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");

    let mut config = Config::default();
    config.api_key = "sk-or-test".to_string();
    config.model = "anthropic/claude-3-opus".to_string();
    config.provider = ProviderKind::Gemini;
    config.formality = Formality::Formal;
    config.save(&path).unwrap();

    let reloaded = Config::load_or_default(&path);

    assert_eq!(reloaded.api_key, "sk-or-test");
    assert_eq!(reloaded.model, "anthropic/claude-3-opus");
    assert_eq!(reloaded.provider, ProviderKind::Gemini);
    assert_eq!(reloaded.formality, Formality::Formal);
}

#[test]
fn test_config_loadOrDefault_shouldAcceptPartialFile() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    // Only the fields the original config dialog wrote
    std::fs::write(&path, r#"{"api_key": "sk-or-abc", "model": "anthropic/claude-3-5-sonnet"}"#).unwrap();

    let config = Config::load_or_default(&path);

    assert_eq!(config.api_key, "sk-or-abc");
    assert_eq!(config.history_size, 5);
    assert_eq!(config.formality, Formality::Neutral);
}

#[test]
fn test_formality_fromStrAndDisplay_shouldRoundTrip() {
    for formality in [Formality::Formal, Formality::Neutral, Formality::Informal] {
        let parsed = Formality::from_str(&formality.to_string()).unwrap();
        assert_eq!(parsed, formality);
    }

    assert!(Formality::from_str("shouty").is_err());
}

#[test]
fn test_providerKind_fromStr_shouldParseKnownProviders() {
    assert_eq!(ProviderKind::from_str("gemini").unwrap(), ProviderKind::Gemini);
    assert_eq!(ProviderKind::from_str("OpenRouter").unwrap(), ProviderKind::OpenRouter);
    assert!(ProviderKind::from_str("cohere").is_err());
}
