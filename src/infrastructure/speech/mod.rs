//! Speech recognition adapters

mod google_speech;

pub use google_speech::GoogleSpeechTranscriber;
