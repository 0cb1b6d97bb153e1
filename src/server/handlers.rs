use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::ports::{LanguageDetector, RecommendationGenerator, Transcriber};
use crate::application::RecommendOutput;
use crate::domain::recommendation::Place;
use crate::domain::transcription::AudioClip;

use super::state::AppState;

/// Multipart field carrying the recording
pub const AUDIO_FIELD: &str = "audio";

/// 502 body when the generative backend fails
pub const BACKEND_UNAVAILABLE: &str = "Recommendation backend unavailable";

/// Body of a successful transcribe call. `places` is `null` when nothing was said.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryResponse {
    pub places: Option<Vec<Place>>,
}

impl From<RecommendOutput> for QueryResponse {
    fn from(output: RecommendOutput) -> Self {
        match output {
            RecommendOutput::NoSpeech => Self { places: None },
            RecommendOutput::Recommended { places, .. } => Self {
                places: Some(places.into_places()),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler<T, D, G>(
    State(state): State<AppState<T, D, G>>,
    mut multipart: Multipart,
) -> Response
where
    T: Transcriber + 'static,
    D: LanguageDetector + 'static,
    G: RecommendationGenerator + 'static,
{
    let data = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some(AUDIO_FIELD) => {
                tracing::debug!(
                    filename = field.file_name().unwrap_or("unknown"),
                    content_type = field.content_type().unwrap_or("unknown"),
                    "Receiving audio upload"
                );
                match field.bytes().await {
                    Ok(data) => break data,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read audio bytes");
                        return error_response(e.status(), e.body_text());
                    }
                }
            }
            Ok(Some(_)) => continue,
            Ok(None) => {
                tracing::warn!("Transcribe request without an audio field");
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Missing multipart field '{}'", AUDIO_FIELD),
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return error_response(e.status(), e.body_text());
            }
        }
    };

    let clip = AudioClip::new(data.to_vec(), state.audio_format);
    tracing::debug!(size = %clip.human_readable_size(), "Audio upload received");

    match state.use_case.execute(clip).await {
        Ok(output) => Json(QueryResponse::from(output)).into_response(),
        // Upstream detail stays in the logs
        Err(_) => error_response(StatusCode::BAD_GATEWAY, BACKEND_UNAVAILABLE.to_string()),
    }
}
