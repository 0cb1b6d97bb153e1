//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod language_detector;
pub mod recommender;
pub mod transcriber;

// Re-export common types
pub use config::ConfigStore;
pub use language_detector::{DetectionError, LanguageDetector};
pub use recommender::{GenerationError, RecommendationGenerator};
pub use transcriber::{Transcriber, TranscriptionError};
