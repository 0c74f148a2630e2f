/*!
 * Error types for the vttsync library.
 *
 * This module contains custom error types for the different parts of the crate,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while decoding or selecting captions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubtitleError {
    /// A timestamp token could not be decoded
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(String),

    /// No caption track satisfied the language/kind constraints
    #[error("No caption track found for language: {language}")]
    NoCaptionTrackFound {
        /// Requested language code
        language: String,
    },
}

/// Errors that can occur when talking to a caption provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making a request fails
    #[error("Caption request failed: {0}")]
    RequestFailed(String),

    /// Error when a provider payload cannot be understood
    #[error("Failed to parse provider response: {0}")]
    ParseError(String),

    /// Error status returned by the provider
    #[error("Provider responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message or body excerpt
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Errors that can occur while reading or writing the video store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem failure
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store file is not valid JSON of the expected shape
    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No record with the given id
    #[error("Video not found: {0}")]
    NotFound(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from a caption provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the video store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Store(StoreError::Io(error))
    }
}
