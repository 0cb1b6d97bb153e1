//! HTTP layer tests: the axum router driven with mock ports

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use voice_of_the_city::application::ports::{
    DetectionError, GenerationError, LanguageDetector, RecommendationGenerator, Transcriber,
    TranscriptionError,
};
use voice_of_the_city::application::{PipelineSettings, RecommendPlacesUseCase};
use voice_of_the_city::domain::recommendation::{Place, RecommendationSet};
use voice_of_the_city::domain::transcription::{AudioClip, AudioFormat, LanguageCode};
use voice_of_the_city::server::{
    create_router, AppState, AUDIO_FIELD, BACKEND_UNAVAILABLE, TRANSCRIBE_ROUTE,
};

const BOUNDARY: &str = "X-VOICE-OF-THE-CITY-BOUNDARY";

struct MockTranscriber {
    text: String,
    received: Arc<Mutex<Vec<Vec<u8>>>>,
}

#[async_trait::async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, audio: &AudioClip) -> Result<String, TranscriptionError> {
        self.received.lock().unwrap().push(audio.data().to_vec());
        Ok(self.text.clone())
    }
}

struct MockDetector;

#[async_trait::async_trait]
impl LanguageDetector for MockDetector {
    async fn detect(&self, _text: &str) -> Result<Option<LanguageCode>, DetectionError> {
        Ok(Some("en-US".parse().unwrap()))
    }
}

struct MockGenerator {
    result: Result<RecommendationSet, GenerationError>,
}

#[async_trait::async_trait]
impl RecommendationGenerator for MockGenerator {
    async fn generate(
        &self,
        _query: &str,
        _language_code: &str,
    ) -> Result<RecommendationSet, GenerationError> {
        self.result.clone()
    }
}

fn two_cafes() -> RecommendationSet {
    RecommendationSet::new(vec![
        Place::new("Cafe One", "https://maps.google.com/?q=Cafe+One"),
        Place::new("Cafe Two", "https://maps.google.com/?q=Cafe+Two"),
    ])
}

struct TestApp {
    router: Router,
    received: Arc<Mutex<Vec<Vec<u8>>>>,
}

fn create_test_app(
    transcript: &str,
    generated: Result<RecommendationSet, GenerationError>,
    max_upload_bytes: usize,
) -> TestApp {
    let received = Arc::new(Mutex::new(Vec::new()));
    let use_case = RecommendPlacesUseCase::new(
        MockTranscriber {
            text: transcript.to_string(),
            received: Arc::clone(&received),
        },
        MockDetector,
        MockGenerator { result: generated },
        PipelineSettings {
            call_timeout: Duration::from_secs(5),
            ..Default::default()
        },
    );
    let state = AppState::new(use_case, AudioFormat::default(), max_upload_bytes);
    TestApp {
        router: create_router(state),
        received,
    }
}

fn multipart_body(field: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"clip.webm\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: audio/webm\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload(field: &str, data: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(TRANSCRIBE_ROUTE)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(field, data)))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn given_running_server_when_health_check_then_returns_ok() {
    let app = create_test_app("", Ok(RecommendationSet::empty()), 1024);

    let response = app
        .router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!({"status": "ok"}));
}

#[tokio::test]
async fn given_spoken_query_when_transcribe_then_returns_places() {
    let app = create_test_app("find me a cafe", Ok(two_cafes()), 1024 * 1024);

    let response = app
        .router
        .oneshot(upload(AUDIO_FIELD, b"\x1a\x45\xdf\xa3webm"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({"places": [
            {"name": "Cafe One", "mapLink": "https://maps.google.com/?q=Cafe+One"},
            {"name": "Cafe Two", "mapLink": "https://maps.google.com/?q=Cafe+Two"}
        ]})
    );
    assert_eq!(
        app.received.lock().unwrap().as_slice(),
        &[b"\x1a\x45\xdf\xa3webm".to_vec()]
    );
}

#[tokio::test]
async fn given_silence_when_transcribe_then_places_is_null() {
    let app = create_test_app("", Ok(two_cafes()), 1024);

    let response = app.router.oneshot(upload(AUDIO_FIELD, b"quiet")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert!(json["places"].is_null(), "{json}");
}

#[tokio::test]
async fn given_unparseable_completion_when_transcribe_then_places_is_empty_list() {
    let app = create_test_app("find me a cafe", Ok(RecommendationSet::empty()), 1024);

    let response = app.router.oneshot(upload(AUDIO_FIELD, b"clip")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!({"places": []}));
}

#[tokio::test]
async fn given_generation_outage_when_transcribe_then_returns_bad_gateway() {
    let app = create_test_app(
        "find me a cafe",
        Err(GenerationError::RequestFailed("connection refused".to_string())),
        1024,
    );

    let response = app.router.oneshot(upload(AUDIO_FIELD, b"clip")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({"error": BACKEND_UNAVAILABLE})
    );
}

#[tokio::test]
async fn given_upstream_error_body_when_transcribe_then_it_is_not_echoed() {
    let app = create_test_app(
        "find me a cafe",
        Err(GenerationError::ApiError(
            "HTTP 503 Service Unavailable: internal routing detail".to_string(),
        )),
        1024,
    );

    let response = app.router.oneshot(upload(AUDIO_FIELD, b"clip")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = json_body(response).await;
    assert!(!json.to_string().contains("internal routing detail"), "{json}");
}

#[tokio::test]
async fn given_wrong_field_name_when_transcribe_then_returns_bad_request() {
    let app = create_test_app("find me a cafe", Ok(two_cafes()), 1024);

    let response = app.router.oneshot(upload("file", b"clip")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn given_non_multipart_body_when_transcribe_then_rejected() {
    let app = create_test_app("find me a cafe", Ok(two_cafes()), 1024);

    let response = app
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(TRANSCRIBE_ROUTE)
                .header("content-type", "application/json")
                .body(Body::from(r#"{"audio": "AAAA"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert!(app.received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn given_oversized_upload_when_transcribe_then_returns_payload_too_large() {
    let app = create_test_app("find me a cafe", Ok(two_cafes()), 64);

    let response = app
        .router
        .oneshot(upload(AUDIO_FIELD, &[0u8; 4096]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(app.received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn given_get_request_when_transcribe_route_then_method_not_allowed() {
    let app = create_test_app("", Ok(RecommendationSet::empty()), 1024);

    let response = app
        .router
        .oneshot(
            Request::builder()
                .uri(TRANSCRIBE_ROUTE)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
