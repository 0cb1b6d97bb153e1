//! Google Cloud Translation language detection adapter

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{DetectionError, LanguageDetector};
use crate::domain::transcription::LanguageCode;
use crate::infrastructure::credentials::GoogleCredentials;
use crate::infrastructure::http_status::{check_status, redact_transport, StatusFault};

/// Translation API base URL
const API_BASE_URL: &str = "https://translation.googleapis.com";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectLanguageRequest<'a> {
    content: &'a str,
    mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct DetectLanguageResponse {
    languages: Option<Vec<DetectedLanguage>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetectedLanguage {
    language_code: Option<String>,
    confidence: Option<f32>,
}

impl From<StatusFault> for DetectionError {
    fn from(fault: StatusFault) -> Self {
        match fault {
            StatusFault::Unauthorized => Self::InvalidCredentials,
            StatusFault::RateLimited => Self::RateLimited,
            StatusFault::Other(message) => Self::ApiError(message),
        }
    }
}

/// Translation v3 `detectLanguage` client, scoped to one project and location
pub struct GoogleLanguageDetector {
    credentials: Arc<GoogleCredentials>,
    location: String,
    base_url: String,
    client: reqwest::Client,
}

impl GoogleLanguageDetector {
    pub fn new(credentials: Arc<GoogleCredentials>, location: impl Into<String>) -> Self {
        Self {
            credentials,
            location: location.into(),
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// `projects/{project}/locations/{location}` scope
    fn parent(&self) -> String {
        format!(
            "projects/{}/locations/{}",
            self.credentials.project_id(),
            self.location
        )
    }

    fn api_url(&self) -> String {
        format!(
            "{}/v3/{}:detectLanguage",
            self.base_url.trim_end_matches('/'),
            self.parent()
        )
    }

    /// Highest-confidence candidate; ties keep backend order
    fn best_candidate(response: &DetectLanguageResponse) -> Option<&str> {
        let mut best: Option<(&str, f32)> = None;
        for candidate in response.languages.as_deref().unwrap_or_default() {
            let Some(code) = candidate.language_code.as_deref().filter(|c| !c.is_empty()) else {
                continue;
            };
            let confidence = candidate.confidence.unwrap_or(0.0);
            match best {
                Some((_, top)) if top >= confidence => {}
                _ => best = Some((code, confidence)),
            }
        }
        best.map(|(code, _)| code)
    }
}

#[async_trait]
impl LanguageDetector for GoogleLanguageDetector {
    async fn detect(&self, text: &str) -> Result<Option<LanguageCode>, DetectionError> {
        let body = DetectLanguageRequest {
            content: text,
            mime_type: "text/plain",
        };

        let request = self.client.post(self.api_url()).json(&body);
        let response = self
            .credentials
            .authorize(request)
            .await
            .map_err(|e| DetectionError::Unauthenticated(e.to_string()))?
            .send()
            .await
            .map_err(|e| DetectionError::RequestFailed(redact_transport(e)))?;

        let response = check_status(response).await?;

        let response: DetectLanguageResponse = response
            .json()
            .await
            .map_err(|e| DetectionError::ParseError(e.to_string()))?;

        Self::best_candidate(&response)
            .map(|code| {
                code.parse::<LanguageCode>()
                    .map_err(|e| DetectionError::ParseError(e.to_string()))
            })
            .transpose()
    }
}
