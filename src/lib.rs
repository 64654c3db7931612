/*!
 * # Omuvunuzi - English to Runyakitara translator
 *
 * A Rust library for translating free-form English text to Runyakitara,
 * resolving phrases from a user-maintained glossary before delegating to
 * a remote AI provider.
 *
 * ## Features
 *
 * - Glossary of known phrase translations with exact and whole-word
 *   substitution, persisted as a human-editable JSON file
 * - Two interchangeable provider backends:
 *   - Gemini (direct generation-model API)
 *   - OpenRouter (OpenAI-compatible chat-completion API)
 * - Heuristic extraction of the single intended translation line from
 *   verbose model output
 * - Bounded session history of resolved translations
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `glossary`: Persistent phrase-to-translation store
 * - `extraction`: Pattern-based response cleanup
 * - `history`: Bounded FIFO of resolved translations
 * - `resolver`: Orchestration of the resolution pipeline
 * - `providers`: Client implementations for the translation backends:
 *   - `providers::gemini`: Gemini API client
 *   - `providers::openrouter`: OpenRouter API client
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod extraction;
pub mod file_utils;
pub mod glossary;
pub mod history;
pub mod providers;
pub mod resolver;

// Re-export main types for easier usage
pub use app_config::{Config, Formality, ProviderKind};
pub use errors::{AppError, PersistenceError, ProviderError, ResolveError};
pub use extraction::{Extraction, ResponseExtractor};
pub use glossary::GlossaryStore;
pub use history::{HistoryBuffer, HistoryRecord};
pub use resolver::{Resolution, ResolutionOrigin, TranslationResolver};
