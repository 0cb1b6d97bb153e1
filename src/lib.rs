//! Voice of the City - spoken travel queries to place recommendations
//!
//! An HTTP relay that accepts a short audio recording, transcribes it with
//! Google Cloud Speech-to-Text, detects the spoken language with Cloud
//! Translation, and asks Gemini for two nearby places with map links.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects (audio clips, language codes, places), config and errors
//! - **Application**: The recommendation pipeline and port interfaces (traits)
//! - **Infrastructure**: Google Cloud and Gemini REST adapters, config store, tracing
//! - **Server**: axum router, multipart handler and shared state
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod server;
