//! HTTP layer - axum router, handlers and shared state

mod handlers;
mod router;
mod state;

pub use handlers::{
    health_handler, transcribe_handler, ErrorResponse, QueryResponse, AUDIO_FIELD,
    BACKEND_UNAVAILABLE,
};
pub use router::{create_router, TRANSCRIBE_ROUTE};
pub use state::AppState;
