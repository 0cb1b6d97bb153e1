use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{LanguageDetector, RecommendationGenerator, Transcriber};

use super::handlers::{health_handler, transcribe_handler};
use super::state::AppState;

pub const TRANSCRIBE_ROUTE: &str = "/api/v1/transcribe";

pub fn create_router<T, D, G>(state: AppState<T, D, G>) -> Router
where
    T: Transcriber + 'static,
    D: LanguageDetector + 'static,
    G: RecommendationGenerator + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/health", get(health_handler))
        .route(TRANSCRIBE_ROUTE, post(transcribe_handler::<T, D, G>))
        .layer(body_limit)
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
