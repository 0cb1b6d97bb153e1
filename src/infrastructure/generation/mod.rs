//! Generative backend adapters

mod gemini;

pub use gemini::GeminiRecommender;
