//! Transcription domain module

mod audio_clip;
mod language_code;
mod transcription_result;

pub use audio_clip::{AudioClip, AudioEncoding, AudioFormat};
pub use language_code::{LanguageCode, RecognitionLanguages};
pub use transcription_result::TranscriptionResult;
