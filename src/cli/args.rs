//! CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand};

use crate::domain::config::AppConfig;

/// Voice of the City - spoken travel queries to place recommendations
#[derive(Parser, Debug)]
#[command(name = "voice-of-the-city")]
#[command(version)]
#[command(about = "Voice-driven travel recommendation relay using Google Cloud Speech and Gemini")]
#[command(long_about = None)]
pub struct Cli {
    /// Subcommand (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP relay
    Serve(ServeArgs),
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Options for `serve`; each overrides the config file and environment
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short = 'p', long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Google Cloud credentials JSON
    #[arg(short = 'c', long, value_name = "PATH")]
    pub credentials: Option<String>,

    /// Gemini model name
    #[arg(short = 'm', long, value_name = "MODEL", env = "GEMINI_MODEL")]
    pub model: Option<String>,

    /// Emit JSON logs
    #[arg(long)]
    pub json_logs: bool,
}

impl ServeArgs {
    /// Config layer holding only the flags that were given
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            host: self.host.clone(),
            port: self.port,
            credentials_path: self.credentials.clone(),
            gemini_model: self.model.clone(),
            log_format: self.json_logs.then(|| "json".to_string()),
            ..Default::default()
        }
    }
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "host",
    "port",
    "gemini_api_key",
    "gemini_model",
    "credentials_path",
    "timeout_secs",
    "max_upload_mb",
    "contain_generation_faults",
    "log_format",
    "speech.encoding",
    "speech.sample_rate_hertz",
    "speech.primary_language",
    "speech.alternative_languages",
    "speech.punctuation",
    "detection.default_language",
    "detection.location",
];

/// Valid log formats
pub const VALID_LOG_FORMATS: &[&str] = &["text", "json"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
