//! Application layer - Use cases and port interfaces
//!
//! Contains the recommendation pipeline and trait definitions
//! for the speech, translation and generative backends.

pub mod fallback;
pub mod ports;
pub mod recommend;

// Re-export use cases
pub use fallback::{attempt, attempt_or_fallback, recover_or, Stage, StageFault};
pub use recommend::{PipelineSettings, RecommendError, RecommendOutput, RecommendPlacesUseCase};
