//! Configuration domain module

mod app_config;

pub use app_config::{
    AppConfig, DetectionConfig, SpeechConfig, DEFAULT_DETECTION_LOCATION, DEFAULT_GEMINI_MODEL,
    DEFAULT_HOST, DEFAULT_MAX_UPLOAD_MB, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS, MAX_UPLOAD_MB,
};
