//! Recommend places use case
//!
//! Runs one upload through `TRANSCRIBING -> DETECTING -> GENERATING`.
//! Each stage consumes the previous stage's output; an empty transcript
//! ends the pipeline before any further backend is called.

use std::time::Duration;

use thiserror::Error;

use crate::domain::recommendation::RecommendationSet;
use crate::domain::transcription::{AudioClip, LanguageCode, TranscriptionResult};

use super::fallback::{attempt, attempt_or_fallback, Stage, StageFault};
use super::ports::{GenerationError, LanguageDetector, RecommendationGenerator, Transcriber};

/// Errors the pipeline lets through to the caller
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Recommendation backend failed: {0}")]
    Generation(#[from] GenerationError),
}

/// Terminal states of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendOutput {
    /// Nothing was transcribed; no further backend was called
    NoSpeech,
    /// Generation ran; the set may still be empty
    Recommended {
        transcription: TranscriptionResult,
        places: RecommendationSet,
    },
}

impl RecommendOutput {
    /// Places for the response body, `None` for `NoSpeech`
    pub fn places(&self) -> Option<&RecommendationSet> {
        match self {
            Self::NoSpeech => None,
            Self::Recommended { places, .. } => Some(places),
        }
    }
}

/// Settings for one pipeline instance
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Used when detection fails or finds nothing
    pub default_language: LanguageCode,
    /// Bound applied to every outbound call
    pub call_timeout: Duration,
    /// Turn generation backend faults into an empty set instead of an error
    pub contain_generation_faults: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            default_language: LanguageCode::en_us(),
            call_timeout: Duration::from_secs(30),
            contain_generation_faults: false,
        }
    }
}

/// Non-empty transcript text
#[derive(Debug, Clone, PartialEq, Eq)]
struct Transcript(String);

impl Transcript {
    fn new(text: String) -> Option<Self> {
        if text.is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }
}

/// Voice query to recommendations use case
pub struct RecommendPlacesUseCase<T, D, G>
where
    T: Transcriber,
    D: LanguageDetector,
    G: RecommendationGenerator,
{
    transcriber: T,
    detector: D,
    generator: G,
    settings: PipelineSettings,
}

impl<T, D, G> RecommendPlacesUseCase<T, D, G>
where
    T: Transcriber,
    D: LanguageDetector,
    G: RecommendationGenerator,
{
    pub fn new(transcriber: T, detector: D, generator: G, settings: PipelineSettings) -> Self {
        Self {
            transcriber,
            detector,
            generator,
            settings,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Execute the pipeline for one clip
    pub async fn execute(&self, audio: AudioClip) -> Result<RecommendOutput, RecommendError> {
        tracing::debug!(size = %audio.human_readable_size(), "Pipeline started");

        let Some(transcript) = self.transcribe_stage(&audio).await else {
            tracing::info!("Empty transcript, skipping detection and generation");
            return Ok(RecommendOutput::NoSpeech);
        };
        drop(audio);

        let transcription = self.detect_stage(transcript).await;
        tracing::info!(
            chars = transcription.text().chars().count(),
            language = %transcription.language_code(),
            "Transcription complete"
        );
        tracing::debug!(transcript = %transcription.text(), "Transcript");

        let places = self.generate_stage(&transcription).await?;
        tracing::info!(places = places.len(), "Recommendations ready");

        Ok(RecommendOutput::Recommended {
            transcription,
            places,
        })
    }

    async fn transcribe_stage(&self, audio: &AudioClip) -> Option<Transcript> {
        let text = attempt_or_fallback(
            Stage::Transcribing,
            self.settings.call_timeout,
            String::new(),
            self.transcriber.transcribe(audio),
        )
        .await;
        Transcript::new(text)
    }

    async fn detect_stage(&self, transcript: Transcript) -> TranscriptionResult {
        let detected = attempt_or_fallback(
            Stage::Detecting,
            self.settings.call_timeout,
            None,
            self.detector.detect(&transcript.0),
        )
        .await;

        let language = detected.unwrap_or_else(|| {
            tracing::debug!(
                default = %self.settings.default_language,
                "No language detected, using default"
            );
            self.settings.default_language.clone()
        });

        TranscriptionResult::new(transcript.0, language.to_string())
    }

    async fn generate_stage(
        &self,
        transcription: &TranscriptionResult,
    ) -> Result<RecommendationSet, RecommendError> {
        let call = self
            .generator
            .generate(transcription.text(), transcription.language_code());

        match attempt(self.settings.call_timeout, call).await {
            Ok(places) => Ok(places),
            Err(fault @ StageFault::TimedOut(_)) => {
                tracing::warn!(stage = %Stage::Generating, error = %fault, "Stage failed, using fallback");
                Ok(RecommendationSet::empty())
            }
            Err(StageFault::Failed(e)) if self.settings.contain_generation_faults => {
                tracing::warn!(stage = %Stage::Generating, error = %e, "Stage failed, using fallback");
                Ok(RecommendationSet::empty())
            }
            Err(StageFault::Failed(e)) => {
                tracing::error!(stage = %Stage::Generating, error = %e, "Generation backend failed");
                Err(RecommendError::Generation(e))
            }
        }
    }
}
