//! Language detection port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::transcription::LanguageCode;

/// Language detection errors
#[derive(Debug, Clone, Error)]
pub enum DetectionError {
    #[error("Translation backend rejected the credentials")]
    InvalidCredentials,

    #[error("Translation backend token unavailable: {0}")]
    Unauthenticated(String),

    #[error("Translation backend rate limit exceeded")]
    RateLimited,

    #[error("Detection request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse detection response: {0}")]
    ParseError(String),

    #[error("Translation API error: {0}")]
    ApiError(String),
}

/// Port for identifying the language of a transcript
#[async_trait]
pub trait LanguageDetector: Send + Sync {
    /// Detect the language of non-empty `text`.
    ///
    /// Returns the highest-confidence candidate, or `None` if the backend
    /// offered no candidates. Callers apply their own default.
    async fn detect(&self, text: &str) -> Result<Option<LanguageCode>, DetectionError>;
}
