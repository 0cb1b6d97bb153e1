//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with Google Cloud Speech, Cloud Translation and Gemini.

pub mod config;
pub mod credentials;
pub mod generation;
pub mod http_status;
pub mod observability;
pub mod speech;
pub mod translation;

// Re-export adapters
pub use config::XdgConfigStore;
pub use credentials::{CredentialsError, GoogleAuth, GoogleCredentials};
pub use generation::GeminiRecommender;
pub use observability::{init_tracing, TracingConfig};
pub use speech::GoogleSpeechTranscriber;
pub use translation::GoogleLanguageDetector;
