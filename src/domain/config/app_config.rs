//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::transcription::{
    AudioEncoding, AudioFormat, LanguageCode, RecognitionLanguages,
};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_DETECTION_LOCATION: &str = "global";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_UPLOAD_MB: usize = 10;
/// Upper bound on `max_upload_mb`, wherever it was set
pub const MAX_UPLOAD_MB: usize = 1024;

/// Speech recognition section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeechConfig {
    pub encoding: Option<String>,
    pub sample_rate_hertz: Option<u32>,
    pub primary_language: Option<String>,
    pub alternative_languages: Option<Vec<String>>,
    pub punctuation: Option<bool>,
}

/// Language detection section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    pub default_language: Option<String>,
    pub location: Option<String>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub credentials_path: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_upload_mb: Option<usize>,
    pub contain_generation_faults: Option<bool>,
    pub log_format: Option<String>,
    pub speech: Option<SpeechConfig>,
    pub detection: Option<DetectionConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        let languages = RecognitionLanguages::default();
        Self {
            host: Some(DEFAULT_HOST.to_string()),
            port: Some(DEFAULT_PORT),
            gemini_api_key: None,
            gemini_model: Some(DEFAULT_GEMINI_MODEL.to_string()),
            credentials_path: None,
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            max_upload_mb: Some(DEFAULT_MAX_UPLOAD_MB),
            contain_generation_faults: Some(false),
            log_format: Some("text".to_string()),
            speech: Some(SpeechConfig {
                encoding: Some(AudioEncoding::default().to_string()),
                sample_rate_hertz: Some(AudioFormat::DEFAULT_SAMPLE_RATE_HERTZ),
                primary_language: Some(languages.primary().to_string()),
                alternative_languages: Some(
                    languages
                        .alternatives()
                        .iter()
                        .map(|c| c.to_string())
                        .collect(),
                ),
                punctuation: Some(true),
            }),
            detection: Some(DetectionConfig {
                default_language: Some(LanguageCode::en_us().to_string()),
                location: Some(DEFAULT_DETECTION_LOCATION.to_string()),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            host: other.host.or(self.host),
            port: other.port.or(self.port),
            gemini_api_key: other.gemini_api_key.or(self.gemini_api_key),
            gemini_model: other.gemini_model.or(self.gemini_model),
            credentials_path: other.credentials_path.or(self.credentials_path),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            max_upload_mb: other.max_upload_mb.or(self.max_upload_mb),
            contain_generation_faults: other
                .contain_generation_faults
                .or(self.contain_generation_faults),
            log_format: other.log_format.or(self.log_format),
            speech: Self::merge_speech(self.speech, other.speech),
            detection: Self::merge_detection(self.detection, other.detection),
        }
    }

    fn merge_speech(base: Option<SpeechConfig>, other: Option<SpeechConfig>) -> Option<SpeechConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(SpeechConfig {
                encoding: o.encoding.or(b.encoding),
                sample_rate_hertz: o.sample_rate_hertz.or(b.sample_rate_hertz),
                primary_language: o.primary_language.or(b.primary_language),
                alternative_languages: o.alternative_languages.or(b.alternative_languages),
                punctuation: o.punctuation.or(b.punctuation),
            }),
        }
    }

    fn merge_detection(
        base: Option<DetectionConfig>,
        other: Option<DetectionConfig>,
    ) -> Option<DetectionConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(DetectionConfig {
                default_language: o.default_language.or(b.default_language),
                location: o.location.or(b.location),
            }),
        }
    }

    pub fn host_or_default(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn gemini_model_or_default(&self) -> &str {
        self.gemini_model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL)
    }

    pub fn timeout_or_default(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb
            .unwrap_or(DEFAULT_MAX_UPLOAD_MB)
            .min(MAX_UPLOAD_MB)
            .saturating_mul(1024 * 1024)
    }

    pub fn contain_generation_faults_or_default(&self) -> bool {
        self.contain_generation_faults.unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.log_format
            .as_deref()
            .map(|f| f.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }

    /// Get audio format, falling back per field on missing or invalid values
    pub fn audio_format_or_default(&self) -> AudioFormat {
        let speech = self.speech.as_ref();
        AudioFormat {
            encoding: speech
                .and_then(|s| s.encoding.as_ref())
                .and_then(|e| e.parse().ok())
                .unwrap_or_default(),
            sample_rate_hertz: speech
                .and_then(|s| s.sample_rate_hertz)
                .unwrap_or(AudioFormat::DEFAULT_SAMPLE_RATE_HERTZ),
        }
    }

    /// Get recognition languages; invalid alternatives are skipped
    pub fn recognition_languages_or_default(&self) -> RecognitionLanguages {
        let speech = self.speech.as_ref();
        let primary = speech
            .and_then(|s| s.primary_language.as_ref())
            .and_then(|l| l.parse().ok())
            .unwrap_or_else(LanguageCode::en_us);
        let alternatives = match speech.and_then(|s| s.alternative_languages.as_ref()) {
            Some(list) => list.iter().filter_map(|l| l.parse().ok()).collect(),
            None => RecognitionLanguages::default_alternatives(),
        };
        RecognitionLanguages::new(primary, alternatives)
    }

    pub fn punctuation_or_default(&self) -> bool {
        self.speech
            .as_ref()
            .and_then(|s| s.punctuation)
            .unwrap_or(true)
    }

    pub fn default_language_or_default(&self) -> LanguageCode {
        self.detection
            .as_ref()
            .and_then(|d| d.default_language.as_ref())
            .and_then(|l| l.parse().ok())
            .unwrap_or_else(LanguageCode::en_us)
    }

    pub fn detection_location_or_default(&self) -> &str {
        self.detection
            .as_ref()
            .and_then(|d| d.location.as_deref())
            .unwrap_or(DEFAULT_DETECTION_LOCATION)
    }
}
