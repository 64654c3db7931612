use std::default::Default;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::PersistenceError;
use crate::file_utils::FileManager;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Translation provider to use
    #[serde(default)]
    pub provider: ProviderKind,

    /// API key for the active provider
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Model identifier (e.g. "anthropic/claude-3-5-sonnet" or "gemini-1.5-flash")
    #[serde(default = "String::new")]
    pub model: String,

    /// Service endpoint URL override; empty means the provider default
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Requested tone of the translation
    #[serde(default)]
    pub formality: Formality,

    /// Temperature parameter for text generation (0.0 to 1.0)
    /// Translation wants near-deterministic output, so the default is low
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum number of tokens the provider may generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Number of resolved (source, translation) pairs to keep in session history
    #[serde(default = "default_history_size")]
    pub history_size: usize,

    /// Glossary file path; empty means the default location
    #[serde(default = "String::new")]
    pub glossary_path: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Direct generation-model backend (Google Gemini)
    Gemini,
    /// REST chat-completion backend (OpenRouter, OpenAI-compatible)
    #[default]
    OpenRouter,
}

impl ProviderKind {
    /// Capitalized provider name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gemini => "Gemini",
            Self::OpenRouter => "OpenRouter",
        }
    }

    /// Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Gemini => "gemini".to_string(),
            Self::OpenRouter => "openrouter".to_string(),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "openrouter" => Ok(Self::OpenRouter),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Tone requested from the provider
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Formality {
    Formal,
    #[default]
    Neutral,
    Informal,
}

impl Formality {
    /// The word used for this tone inside provider prompts
    pub fn as_tone(&self) -> &'static str {
        match self {
            Self::Formal => "formal",
            Self::Neutral => "neutral",
            Self::Informal => "informal",
        }
    }
}

impl std::fmt::Display for Formality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_tone())
    }
}

impl std::str::FromStr for Formality {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "formal" => Ok(Self::Formal),
            "neutral" => Ok(Self::Neutral),
            "informal" => Ok(Self::Informal),
            _ => Err(anyhow!("Invalid formality: {}", s)),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_temperature() -> f32 {
    0.1
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_history_size() -> usize {
    5
}

fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_openrouter_endpoint() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_openrouter_model() -> String {
    "anthropic/claude-3-5-sonnet".to_string()
}

impl Config {
    /// Load configuration from a file, falling back to defaults.
    ///
    /// A missing file yields the default configuration and writes it back so
    /// the user has something to edit. A corrupt file is logged and replaced
    /// by defaults in memory; the file on disk is left untouched. Neither
    /// case is an error for the caller.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !FileManager::file_exists(path) {
            warn!("Config file not found at '{}', creating default config.", path.display());
            let config = Config::default();
            if let Err(e) = config.save(path) {
                warn!("Could not write default config: {}", e);
            }
            return config;
        }

        match FileManager::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Config>(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Config file '{}' is malformed ({}), using defaults.", path.display(), e);
                    Config::default()
                }
            },
            Err(e) => {
                warn!("Could not read config file '{}' ({}), using defaults.", path.display(), e);
                Config::default()
            }
        }
    }

    /// Save the configuration, rewriting the whole file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self).map_err(|e| PersistenceError::Malformed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        FileManager::write_to_file(path, &content).map_err(|e| PersistenceError::Write {
            path: path.display().to_string(),
            source: std::io::Error::other(e.to_string()),
        })
    }

    /// Default config file location (`~/.config/omuvunuzi/config.json`,
    /// falling back to the working directory)
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("omuvunuzi").join("config.json"))
            .unwrap_or_else(|| PathBuf::from("omuvunuzi_config.json"))
    }

    /// Default glossary file location, next to the config file
    pub fn default_glossary_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("omuvunuzi").join("glossary.json"))
            .unwrap_or_else(|| PathBuf::from("runyakitara_glossary.json"))
    }

    /// Resolved glossary path for this configuration
    pub fn glossary_path(&self) -> PathBuf {
        if self.glossary_path.is_empty() {
            Self::default_glossary_path()
        } else {
            PathBuf::from(&self.glossary_path)
        }
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if !self.model.is_empty() {
            return self.model.clone();
        }

        // Default fallback based on provider type
        match self.provider {
            ProviderKind::Gemini => default_gemini_model(),
            ProviderKind::OpenRouter => default_openrouter_model(),
        }
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if !self.endpoint.is_empty() {
            return self.endpoint.clone();
        }

        // Default fallback based on provider type
        match self.provider {
            ProviderKind::Gemini => default_gemini_endpoint(),
            ProviderKind::OpenRouter => default_openrouter_endpoint(),
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Both backends are remote services and need a key
        if self.api_key.trim().is_empty() {
            return Err(anyhow!(
                "API key is required for the {} provider; set one with 'omuvunuzi config set --api-key <KEY>'",
                self.provider.display_name()
            ));
        }

        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(anyhow!("Temperature must be between 0.0 and 1.0, got {}", self.temperature));
        }

        if self.history_size == 0 {
            return Err(anyhow!("History size must be at least 1"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            provider: ProviderKind::default(),
            api_key: String::new(),
            model: String::new(),
            endpoint: String::new(),
            formality: Formality::default(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            history_size: default_history_size(),
            glossary_path: String::new(),
            log_level: LogLevel::default(),
        }
    }
}
