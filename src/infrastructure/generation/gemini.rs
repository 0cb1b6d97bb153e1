//! Gemini API recommendation adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::fallback::{recover_or, Stage};
use crate::application::ports::{GenerationError, RecommendationGenerator};
use crate::domain::config::DEFAULT_GEMINI_MODEL;
use crate::domain::recommendation::{CompletionParseError, RecommendationPrompt, RecommendationSet};
use crate::infrastructure::http_status::{check_status, redact_transport, StatusFault};

/// Gemini API base URL
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Header carrying the API key, so it never appears in a URL
const API_KEY_HEADER: &str = "x-goog-api-key";

// Request types for Gemini API

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

// Response types for Gemini API

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Reasons a 2xx response still yields no places
#[derive(Debug, Error)]
enum CompletionFault {
    #[error("{0}")]
    Api(String),

    #[error("response envelope is not JSON: {0}")]
    Envelope(String),

    #[error("no text at candidates[0].content.parts[0].text")]
    MissingText,

    #[error(transparent)]
    Completion(#[from] CompletionParseError),
}

impl From<StatusFault> for GenerationError {
    fn from(fault: StatusFault) -> Self {
        match fault {
            StatusFault::Unauthorized => Self::InvalidApiKey,
            StatusFault::RateLimited => Self::RateLimited,
            StatusFault::Other(message) => Self::ApiError(message),
        }
    }
}

/// Gemini API recommendation generator
pub struct GeminiRecommender {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiRecommender {
    /// Create a new Gemini recommender with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_model(api_key, DEFAULT_GEMINI_MODEL)
    }

    /// Create a new Gemini recommender with a custom model
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the API URL
    fn api_url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Build the request body
    fn build_request(prompt: RecommendationPrompt) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![TextPart {
                    text: prompt.into_content(),
                }],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
            }),
        }
    }

    /// Text of the first part of the first candidate
    fn extract_text(response: &GenerateContentResponse) -> Option<&str> {
        response
            .candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?
            .first()?
            .text
            .as_deref()
    }

    /// Envelope JSON to places, total over any body. The envelope is decoded
    /// once; an embedded `error` object wins over any candidates.
    fn parse_body(body: &str) -> Result<RecommendationSet, CompletionFault> {
        let envelope: GenerateContentResponse =
            serde_json::from_str(body).map_err(|e| CompletionFault::Envelope(e.to_string()))?;
        if let Some(error) = envelope.error {
            return Err(CompletionFault::Api(error.message));
        }
        let text = Self::extract_text(&envelope).ok_or(CompletionFault::MissingText)?;
        Ok(RecommendationSet::parse_completion(text)?)
    }
}

#[async_trait]
impl RecommendationGenerator for GeminiRecommender {
    async fn generate(
        &self,
        query: &str,
        language_code: &str,
    ) -> Result<RecommendationSet, GenerationError> {
        let prompt = RecommendationPrompt::build(query, language_code);
        let body = Self::build_request(prompt);

        let response = self
            .client
            .post(self.api_url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::RequestFailed(redact_transport(e)))?;

        let response = check_status(response).await?;

        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::RequestFailed(redact_transport(e)))?;

        match Self::parse_body(&body) {
            Err(CompletionFault::Api(message)) => Err(GenerationError::ApiError(message)),
            parsed => Ok(recover_or(
                Stage::Generating,
                parsed,
                RecommendationSet::empty(),
            )),
        }
    }
}
