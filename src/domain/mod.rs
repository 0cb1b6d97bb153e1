//! Domain layer - Core business logic
//!
//! Contains value objects and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod recommendation;
pub mod transcription;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use recommendation::{CompletionParseError, Place, RecommendationPrompt, RecommendationSet};
pub use transcription::{
    AudioClip, AudioEncoding, AudioFormat, LanguageCode, RecognitionLanguages,
    TranscriptionResult,
};
