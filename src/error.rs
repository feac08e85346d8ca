//! Error types for pravka.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PravkaError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Dictionary errors
    #[error("Frequency dictionary not found at {path}")]
    DictionaryNotFound { path: String },

    #[error("Failed to read frequency dictionary '{path}': {message}")]
    DictionaryRead { path: String, message: String },

    // Morphology errors
    #[error("Failed to load morphology data '{path}': {message}")]
    MorphologyLoad { path: String, message: String },

    // Custom dictionary store errors
    #[error("Custom dictionary store error: {message}")]
    CustomDictStore { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, PravkaError>;
