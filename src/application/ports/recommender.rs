//! Recommendation generation port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recommendation::RecommendationSet;

/// Faults reaching the generative backend.
///
/// Completions that cannot be parsed are not errors; generators
/// return an empty set for those.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("Generative backend rejected the API key")]
    InvalidApiKey,

    #[error("Generative backend rate limit exceeded")]
    RateLimited,

    #[error("Generation request failed: {0}")]
    RequestFailed(String),

    #[error("Generative API error: {0}")]
    ApiError(String),
}

/// Port for turning a spoken query into place recommendations
#[async_trait]
pub trait RecommendationGenerator: Send + Sync {
    /// Ask the backend for places matching `query`, answered in `language_code`.
    async fn generate(
        &self,
        query: &str,
        language_code: &str,
    ) -> Result<RecommendationSet, GenerationError>;
}
