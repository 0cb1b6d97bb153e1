//! Speech-to-Text adapter tests against a mock backend

use std::sync::Arc;

use serde_json::json;
use voice_of_the_city::application::ports::{Transcriber, TranscriptionError};
use voice_of_the_city::domain::transcription::{
    AudioClip, AudioEncoding, AudioFormat, RecognitionLanguages,
};
use voice_of_the_city::infrastructure::{GoogleAuth, GoogleCredentials, GoogleSpeechTranscriber};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RECOGNIZE: &str = "/v1p1beta1/speech:recognize";

fn transcriber(server: &MockServer, auth: GoogleAuth) -> GoogleSpeechTranscriber {
    let credentials = Arc::new(GoogleCredentials::new("city-guide", auth));
    GoogleSpeechTranscriber::new(credentials, RecognitionLanguages::default())
        .with_base_url(server.uri())
}

fn clip() -> AudioClip {
    AudioClip::new(vec![0x1a, 0x45, 0xdf, 0xa3], AudioFormat::default())
}

#[tokio::test]
async fn returns_first_alternative_of_first_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RECOGNIZE))
        .and(header("x-goog-api-key", "gcp-key"))
        .and(body_partial_json(json!({
            "config": {
                "encoding": "WEBM_OPUS",
                "sampleRateHertz": 48000,
                "languageCode": "en-US",
                "alternativeLanguageCodes": ["hi-IN", "or-IN", "es-ES", "fr-FR"]
            },
            "audio": { "content": "GkXfow==" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "alternatives": [
                    { "transcript": "find me a cafe near the river", "confidence": 0.93 },
                    { "transcript": "find me a cafe near the liver" }
                ]},
                { "alternatives": [{ "transcript": "second result" }] }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = transcriber(&server, GoogleAuth::ApiKey("gcp-key".to_string()))
        .transcribe(&clip())
        .await
        .unwrap();

    assert_eq!(text, "find me a cafe near the river");
}

#[tokio::test]
async fn api_key_is_sent_as_header_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RECOGNIZE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "alternatives": [{ "transcript": "hola" }] }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = transcriber(&server, GoogleAuth::ApiKey("gcp-key".to_string()))
        .transcribe(&clip())
        .await
        .unwrap();

    assert_eq!(text, "hola");
    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].url.query().is_none());
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn unreachable_backend_error_has_no_url() {
    let server = MockServer::builder().start().await;
    let uri = server.uri();
    drop(server);

    let err = GoogleSpeechTranscriber::new(
        Arc::new(GoogleCredentials::new(
            "city-guide",
            GoogleAuth::ApiKey("SECRET-GCP-KEY".to_string()),
        )),
        RecognitionLanguages::default(),
    )
    .with_base_url(uri.clone())
    .transcribe(&clip())
    .await
    .unwrap_err();

    assert!(matches!(err, TranscriptionError::RequestFailed(_)));
    let message = err.to_string();
    assert!(!message.contains("SECRET-GCP-KEY"), "{message}");
    assert!(!message.contains(&uri), "{message}");
}

#[tokio::test]
async fn no_results_is_empty_transcript() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RECOGNIZE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let text = transcriber(&server, GoogleAuth::ApiKey("k".to_string()))
        .transcribe(&clip())
        .await
        .unwrap();

    assert_eq!(text, "");
}

#[tokio::test]
async fn configured_format_reaches_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RECOGNIZE))
        .and(body_partial_json(json!({
            "config": { "encoding": "OGG_OPUS", "sampleRateHertz": 16000 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "alternatives": [{ "transcript": "  museums open late  " }] }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let audio = AudioClip::new(
        vec![1, 2, 3],
        AudioFormat {
            encoding: AudioEncoding::OggOpus,
            sample_rate_hertz: 16_000,
        },
    );
    let text = transcriber(&server, GoogleAuth::ApiKey("k".to_string()))
        .transcribe(&audio)
        .await
        .unwrap();

    assert_eq!(text, "museums open late");
}

#[tokio::test]
async fn unauthorized_maps_to_invalid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RECOGNIZE))
        .respond_with(ResponseTemplate::new(403).set_body_string("denied"))
        .mount(&server)
        .await;

    let err = transcriber(&server, GoogleAuth::ApiKey("k".to_string()))
        .transcribe(&clip())
        .await
        .unwrap_err();

    assert!(matches!(err, TranscriptionError::InvalidCredentials));
}

#[tokio::test]
async fn rate_limit_maps_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RECOGNIZE))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = transcriber(&server, GoogleAuth::ApiKey("k".to_string()))
        .transcribe(&clip())
        .await
        .unwrap_err();

    assert!(matches!(err, TranscriptionError::RateLimited));
}

#[tokio::test]
async fn server_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RECOGNIZE))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;

    let err = transcriber(&server, GoogleAuth::ApiKey("k".to_string()))
        .transcribe(&clip())
        .await
        .unwrap_err();

    match err {
        TranscriptionError::ApiError(message) => {
            assert!(message.contains("500"), "{message}");
            assert!(message.contains("backend exploded"), "{message}");
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RECOGNIZE))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = transcriber(&server, GoogleAuth::ApiKey("k".to_string()))
        .transcribe(&clip())
        .await
        .unwrap_err();

    assert!(matches!(err, TranscriptionError::ParseError(_)));
}
