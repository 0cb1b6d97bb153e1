//! Google Cloud Speech-to-Text adapter

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{Transcriber, TranscriptionError};
use crate::domain::transcription::{AudioClip, RecognitionLanguages};
use crate::infrastructure::credentials::GoogleCredentials;
use crate::infrastructure::http_status::{check_status, redact_transport, StatusFault};

/// Speech API base URL
const API_BASE_URL: &str = "https://speech.googleapis.com";

/// Recognize endpoint; v1p1beta1 supports alternative language codes
const RECOGNIZE_PATH: &str = "/v1p1beta1/speech:recognize";

// Request types for the Speech API

#[derive(Debug, Serialize)]
struct RecognizeRequest {
    config: RecognitionConfig,
    audio: RecognitionAudio,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig {
    encoding: &'static str,
    sample_rate_hertz: u32,
    language_code: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    alternative_language_codes: Vec<String>,
    enable_automatic_punctuation: bool,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio {
    content: String,
}

// Response types for the Speech API

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    results: Option<Vec<SpeechRecognitionResult>>,
}

#[derive(Debug, Deserialize)]
struct SpeechRecognitionResult {
    alternatives: Option<Vec<SpeechRecognitionAlternative>>,
}

#[derive(Debug, Deserialize)]
struct SpeechRecognitionAlternative {
    transcript: Option<String>,
}

impl From<StatusFault> for TranscriptionError {
    fn from(fault: StatusFault) -> Self {
        match fault {
            StatusFault::Unauthorized => Self::InvalidCredentials,
            StatusFault::RateLimited => Self::RateLimited,
            StatusFault::Other(message) => Self::ApiError(message),
        }
    }
}

/// Speech-to-Text transcriber
pub struct GoogleSpeechTranscriber {
    credentials: Arc<GoogleCredentials>,
    languages: RecognitionLanguages,
    punctuation: bool,
    base_url: String,
    client: reqwest::Client,
}

impl GoogleSpeechTranscriber {
    pub fn new(credentials: Arc<GoogleCredentials>, languages: RecognitionLanguages) -> Self {
        Self {
            credentials,
            languages,
            punctuation: true,
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Point at a different host (used by tests and regional endpoints)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_punctuation(mut self, enabled: bool) -> Self {
        self.punctuation = enabled;
        self
    }

    fn api_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), RECOGNIZE_PATH)
    }

    fn build_request(&self, audio: &AudioClip) -> RecognizeRequest {
        let format = audio.format();
        RecognizeRequest {
            config: RecognitionConfig {
                encoding: format.encoding.api_name(),
                sample_rate_hertz: format.sample_rate_hertz,
                language_code: self.languages.primary().to_string(),
                alternative_language_codes: self
                    .languages
                    .alternatives()
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
                enable_automatic_punctuation: self.punctuation,
            },
            audio: RecognitionAudio {
                content: audio.to_base64(),
            },
        }
    }

    /// First alternative of the first result
    fn extract_transcript(response: &RecognizeResponse) -> Option<&str> {
        response
            .results
            .as_ref()?
            .first()?
            .alternatives
            .as_ref()?
            .first()?
            .transcript
            .as_deref()
    }
}

#[async_trait]
impl Transcriber for GoogleSpeechTranscriber {
    async fn transcribe(&self, audio: &AudioClip) -> Result<String, TranscriptionError> {
        let body = self.build_request(audio);

        let request = self.client.post(self.api_url()).json(&body);
        let response = self
            .credentials
            .authorize(request)
            .await
            .map_err(|e| TranscriptionError::Unauthenticated(e.to_string()))?
            .send()
            .await
            .map_err(|e| TranscriptionError::RequestFailed(redact_transport(e)))?;

        let response = check_status(response).await?;

        let response: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ParseError(e.to_string()))?;

        let transcript = Self::extract_transcript(&response).unwrap_or_default();
        Ok(transcript.trim().to_string())
    }
}
