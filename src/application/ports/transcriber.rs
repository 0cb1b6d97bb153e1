//! Speech transcription port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::transcription::AudioClip;

/// Transcription errors
#[derive(Debug, Clone, Error)]
pub enum TranscriptionError {
    #[error("Speech backend rejected the credentials")]
    InvalidCredentials,

    #[error("Speech backend token unavailable: {0}")]
    Unauthenticated(String),

    #[error("Speech backend rate limit exceeded")]
    RateLimited,

    #[error("Speech request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse speech response: {0}")]
    ParseError(String),

    #[error("Speech API error: {0}")]
    ApiError(String),
}

/// Port for speech-to-text
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe one clip.
    ///
    /// Returns the first alternative of the first result, or an empty
    /// string when the backend recognized nothing. Empty is not an error.
    async fn transcribe(&self, audio: &AudioClip) -> Result<String, TranscriptionError>;
}
