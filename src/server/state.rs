use std::sync::Arc;

use crate::application::ports::{LanguageDetector, RecommendationGenerator, Transcriber};
use crate::application::RecommendPlacesUseCase;
use crate::domain::transcription::AudioFormat;

/// Shared, read-only state handed to every request
pub struct AppState<T, D, G>
where
    T: Transcriber,
    D: LanguageDetector,
    G: RecommendationGenerator,
{
    pub use_case: Arc<RecommendPlacesUseCase<T, D, G>>,
    /// Format every upload is declared to be in
    pub audio_format: AudioFormat,
    pub max_upload_bytes: usize,
}

impl<T, D, G> AppState<T, D, G>
where
    T: Transcriber,
    D: LanguageDetector,
    G: RecommendationGenerator,
{
    pub fn new(
        use_case: RecommendPlacesUseCase<T, D, G>,
        audio_format: AudioFormat,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            use_case: Arc::new(use_case),
            audio_format,
            max_upload_bytes,
        }
    }
}

impl<T, D, G> Clone for AppState<T, D, G>
where
    T: Transcriber,
    D: LanguageDetector,
    G: RecommendationGenerator,
{
    fn clone(&self) -> Self {
        Self {
            use_case: Arc::clone(&self.use_case),
            audio_format: self.audio_format,
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}
