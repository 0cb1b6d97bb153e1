//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, DetectionConfig, SpeechConfig, MAX_UPLOAD_MB};
use crate::domain::error::ConfigError;
use crate::domain::transcription::{AudioEncoding, LanguageCode};

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS, VALID_LOG_FORMATS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;

    store.save(&config).await?;
    let shown = if key == "gemini_api_key" {
        mask_api_key(value)
    } else {
        value.to_string()
    };
    presenter.success(&format!("{} = {}", key, shown));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;

    let config = store.load().await?;
    match read_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = read_value(&config, key).unwrap_or_else(|| NOT_SET.to_string());
        presenter.key_value(key, &value);
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_valid_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.into(),
    }
}

/// Validate `value` for `key` and store it in `config`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "host" => {
            if value.trim().is_empty() {
                return Err(invalid(key, "Value must not be empty"));
            }
            config.host = Some(value.to_string());
        }
        "port" => {
            let port = value
                .parse::<u16>()
                .ok()
                .filter(|p| *p > 0)
                .ok_or_else(|| invalid(key, "Value must be a port number between 1 and 65535"))?;
            config.port = Some(port);
        }
        "gemini_api_key" => config.gemini_api_key = Some(value.to_string()),
        "gemini_model" => config.gemini_model = Some(value.to_string()),
        "credentials_path" => config.credentials_path = Some(value.to_string()),
        "timeout_secs" => config.timeout_secs = Some(parse_positive(key, value)?),
        "max_upload_mb" => {
            let mb = parse_positive(key, value)?;
            if mb > MAX_UPLOAD_MB as u64 {
                return Err(invalid(key, format!("Value must be at most {}", MAX_UPLOAD_MB)));
            }
            config.max_upload_mb = Some(mb as usize)
        }
        "contain_generation_faults" => {
            config.contain_generation_faults = Some(parse_bool_value(key, value)?)
        }
        "log_format" => {
            let lower = value.to_lowercase();
            if !VALID_LOG_FORMATS.contains(&lower.as_str()) {
                return Err(invalid(
                    key,
                    format!(
                        "Invalid value '{}'. Valid options: {}",
                        value,
                        VALID_LOG_FORMATS.join(", ")
                    ),
                ));
            }
            config.log_format = Some(lower);
        }
        "speech.encoding" => {
            let encoding = value
                .parse::<AudioEncoding>()
                .map_err(|e| invalid(key, e.to_string()))?;
            speech_mut(config).encoding = Some(encoding.to_string());
        }
        "speech.sample_rate_hertz" => {
            let rate = parse_positive(key, value)?;
            let rate = u32::try_from(rate).map_err(|_| invalid(key, "Value is too large"))?;
            speech_mut(config).sample_rate_hertz = Some(rate);
        }
        "speech.primary_language" => {
            let code = parse_language(key, value)?;
            speech_mut(config).primary_language = Some(code);
        }
        "speech.alternative_languages" => {
            let codes = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| parse_language(key, s))
                .collect::<Result<Vec<_>, _>>()?;
            speech_mut(config).alternative_languages = Some(codes);
        }
        "speech.punctuation" => {
            let enabled = parse_bool_value(key, value)?;
            speech_mut(config).punctuation = Some(enabled);
        }
        "detection.default_language" => {
            let code = parse_language(key, value)?;
            detection_mut(config).default_language = Some(code);
        }
        "detection.location" => {
            if value.trim().is_empty() {
                return Err(invalid(key, "Value must not be empty"));
            }
            detection_mut(config).location = Some(value.to_string());
        }
        _ => return Err(invalid(key, "Unknown key")),
    }
    Ok(())
}

/// Display form of the stored value for `key`
fn read_value(config: &AppConfig, key: &str) -> Option<String> {
    let speech = config.speech.as_ref();
    let detection = config.detection.as_ref();
    match key {
        "host" => config.host.clone(),
        "port" => config.port.map(|p| p.to_string()),
        "gemini_api_key" => config.gemini_api_key.as_deref().map(mask_api_key),
        "gemini_model" => config.gemini_model.clone(),
        "credentials_path" => config.credentials_path.clone(),
        "timeout_secs" => config.timeout_secs.map(|t| t.to_string()),
        "max_upload_mb" => config.max_upload_mb.map(|m| m.to_string()),
        "contain_generation_faults" => config.contain_generation_faults.map(|b| b.to_string()),
        "log_format" => config.log_format.clone(),
        "speech.encoding" => speech.and_then(|s| s.encoding.clone()),
        "speech.sample_rate_hertz" => speech
            .and_then(|s| s.sample_rate_hertz)
            .map(|r| r.to_string()),
        "speech.primary_language" => speech.and_then(|s| s.primary_language.clone()),
        "speech.alternative_languages" => speech
            .and_then(|s| s.alternative_languages.as_ref())
            .map(|codes| codes.join(",")),
        "speech.punctuation" => speech.and_then(|s| s.punctuation).map(|b| b.to_string()),
        "detection.default_language" => detection.and_then(|d| d.default_language.clone()),
        "detection.location" => detection.and_then(|d| d.location.clone()),
        _ => None,
    }
}

fn speech_mut(config: &mut AppConfig) -> &mut SpeechConfig {
    config.speech.get_or_insert_with(SpeechConfig::default)
}

fn detection_mut(config: &mut AppConfig) -> &mut DetectionConfig {
    config.detection.get_or_insert_with(DetectionConfig::default)
}

fn parse_language(key: &str, value: &str) -> Result<String, ConfigError> {
    value
        .parse::<LanguageCode>()
        .map(String::from)
        .map_err(|e| invalid(key, e.to_string()))
}

fn parse_positive(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .parse::<u64>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| invalid(key, "Value must be a positive integer"))
}

fn parse_bool_value(key: &str, value: &str) -> Result<bool, ConfigError> {
    parse_bool(value).map_err(|_| invalid(key, "Value must be 'true' or 'false'"))
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

/// Mask API key for display (show first 4 and last 4 chars)
fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
