//! Domain error types

use thiserror::Error;

/// Error when a language code is not a well-formed locale tag
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid language code: \"{input}\". Expected a locale tag such as en, en-US or hi-IN")]
pub struct InvalidLanguageCodeError {
    pub input: String,
}

/// Error when an unsupported audio encoding is provided
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid audio encoding: \"{input}\". Valid encodings are: webm_opus, ogg_opus, flac, linear16, mp3")]
pub struct InvalidEncodingError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),

    #[error("Missing required setting '{key}'. {hint}")]
    Missing { key: String, hint: String },
}
