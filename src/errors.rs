/*!
 * Error types for the omuvunuzi application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The provider answered successfully but returned no usable content
    #[error("Provider returned an empty response")]
    EmptyResponse,
}

/// Errors that can occur when reading or writing persisted state
/// (glossary file, configuration file, saved translations)
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// A persisted file could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path of the file
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A persisted file could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Path of the file
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A persisted file exists but does not contain what we expect
    #[error("Malformed content in {path}: {message}")]
    Malformed {
        /// Path of the file
        path: String,
        /// Description of the parse failure
        message: String,
    },
}

/// Errors surfaced by a single resolution attempt
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Source text was empty after trimming; rejected before any provider call
    #[error("Nothing to translate: input is empty")]
    EmptyInput,

    /// The provider call failed; terminal for this resolution, never auto-retried
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from persisted state
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Error from a resolution attempt
    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
