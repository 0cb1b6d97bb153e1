//! Server runner: config merge, adapter wiring and the serve loop

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::application::ports::ConfigStore;
use crate::application::{PipelineSettings, RecommendPlacesUseCase};
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::infrastructure::{
    init_tracing, CredentialsError, GeminiRecommender, GoogleCredentials, GoogleLanguageDetector,
    GoogleSpeechTranscriber, TracingConfig, XdgConfigStore,
};
use crate::server::{create_router, AppState};

use super::presenter::Presenter;
use super::signals::shutdown_signal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Everything that can stop the server before it accepts connections
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    #[error("Failed to bind {addr}: {message}")]
    Bind { addr: String, message: String },
}

impl StartupError {
    fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => EXIT_USAGE_ERROR,
            Self::Credentials(_) | Self::Bind { .. } => EXIT_ERROR,
        }
    }
}

/// Run the HTTP relay until SIGINT/SIGTERM
pub async fn run_server(config: AppConfig) -> ExitCode {
    let presenter = Presenter::new();

    init_tracing(&TracingConfig {
        json_format: config.json_logs(),
    });

    let router = match build_router(&config).await {
        Ok(router) => router,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(e.exit_code());
        }
    };

    let addr = format!("{}:{}", config.host_or_default(), config.port_or_default());
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            let e = StartupError::Bind {
                addr,
                message: e.to_string(),
            };
            presenter.error(&e.to_string());
            return ExitCode::from(e.exit_code());
        }
    };

    presenter.listening(&addr);
    tracing::info!(
        addr = %addr,
        model = %config.gemini_model_or_default(),
        timeout_secs = config.timeout_or_default().as_secs(),
        "Server listening"
    );

    match axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        Ok(()) => {
            tracing::info!("Server stopped");
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            tracing::error!(error = %e, "Server error");
            presenter.error(&format!("Server error: {}", e));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Wire adapters, use case and router from a merged config
pub async fn build_router(config: &AppConfig) -> Result<Router, StartupError> {
    let api_key = config
        .gemini_api_key
        .clone()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ConfigError::Missing {
            key: "gemini_api_key".to_string(),
            hint: "Set GEMINI_API_KEY or run 'voice-of-the-city config set gemini_api_key <key>'"
                .to_string(),
        })?;

    let credentials_path = config
        .credentials_path
        .clone()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ConfigError::Missing {
            key: "credentials_path".to_string(),
            hint: "Set GOOGLE_APPLICATION_CREDENTIALS or pass --credentials <path>".to_string(),
        })?;

    let credentials = Arc::new(GoogleCredentials::load(&credentials_path).await?);
    credentials.verify().await?;
    tracing::info!(
        project = %credentials.project_id(),
        path = %credentials_path,
        "Google Cloud credentials loaded"
    );

    let transcriber = GoogleSpeechTranscriber::new(
        Arc::clone(&credentials),
        config.recognition_languages_or_default(),
    )
    .with_punctuation(config.punctuation_or_default());
    let detector = GoogleLanguageDetector::new(
        Arc::clone(&credentials),
        config.detection_location_or_default(),
    );
    let generator = GeminiRecommender::with_model(api_key, config.gemini_model_or_default());

    let settings = PipelineSettings {
        default_language: config.default_language_or_default(),
        call_timeout: config.timeout_or_default(),
        contain_generation_faults: config.contain_generation_faults_or_default(),
    };
    let use_case = RecommendPlacesUseCase::new(transcriber, detector, generator, settings);

    let state = AppState::new(
        use_case,
        config.audio_format_or_default(),
        config.max_upload_bytes(),
    );
    Ok(create_router(state))
}

/// Config layer read from the process environment
pub fn env_config() -> AppConfig {
    env_config_from(|name| env::var(name).ok())
}

fn env_config_from(lookup: impl Fn(&str) -> Option<String>) -> AppConfig {
    let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
    AppConfig {
        gemini_api_key: var("GEMINI_API_KEY"),
        credentials_path: var("GOOGLE_APPLICATION_CREDENTIALS"),
        port: var("PORT").and_then(|p| p.parse().ok()),
        log_format: var("LOG_FORMAT").map(|f| f.to_lowercase()),
        ..Default::default()
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            Presenter::new().warn(&format!("Ignoring config file: {}", e));
            AppConfig::empty()
        }
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}
