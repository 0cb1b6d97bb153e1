//! Recommendation domain module

mod place;
mod prompt;

pub use place::{CompletionParseError, Place, RecommendationSet};
pub use prompt::{RecommendationPrompt, REQUESTED_PLACES};
