//! TOML config file under the user's config directory

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

const APP_DIR: &str = "voice-of-the-city";
const FILE_NAME: &str = "config.toml";

/// `$XDG_CONFIG_HOME/voice-of-the-city/config.toml`, or `~/.config/...`
/// when the platform reports no config dir.
fn default_path() -> PathBuf {
    let base = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join(APP_DIR).join(FILE_NAME)
}

fn decode(content: &str) -> Result<AppConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn encode(config: &AppConfig) -> Result<String, ConfigError> {
    toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
}

fn write_error(path: &Path, e: std::io::Error) -> ConfigError {
    ConfigError::WriteError(format!("{}: {}", path.display(), e))
}

/// The file holds the Gemini key, so it is kept owner-only.
#[cfg(unix)]
async fn restrict(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await
}

#[cfg(not(unix))]
async fn restrict(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Config store backed by one TOML file
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    pub fn new() -> Self {
        Self::with_path(default_path())
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn staging_path(&self) -> PathBuf {
        self.path.with_extension("toml.tmp")
    }

    async fn ensure_parent(&self) -> Result<(), ConfigError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
                .await
                .map_err(|e| write_error(dir, e)),
            _ => Ok(()),
        }
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => decode(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(AppConfig::empty()),
            Err(e) => Err(ConfigError::ReadError(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    /// Written to a sibling file first and renamed over the target, so a
    /// crash never leaves a half-written config behind.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let content = encode(config)?;
        self.ensure_parent().await?;

        let staging = self.staging_path();
        fs::write(&staging, content)
            .await
            .map_err(|e| write_error(&staging, e))?;
        restrict(&staging)
            .await
            .map_err(|e| write_error(&staging, e))?;
        fs::rename(&staging, &self.path)
            .await
            .map_err(|e| write_error(&self.path, e))
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        let content = encode(&AppConfig::defaults())?;
        self.ensure_parent().await?;

        // create_new makes the existence check and the create one step
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(ConfigError::AlreadyExists(
                    self.path.display().to_string(),
                ))
            }
            Err(e) => return Err(write_error(&self.path, e)),
        };

        file.write_all(content.as_bytes())
            .await
            .map_err(|e| write_error(&self.path, e))?;
        file.flush().await.map_err(|e| write_error(&self.path, e))?;
        restrict(&self.path)
            .await
            .map_err(|e| write_error(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_ends_in_app_dir() {
        let path = XdgConfigStore::new().path();
        assert!(path.ends_with(Path::new(APP_DIR).join(FILE_NAME)));
    }

    #[test]
    fn decode_reads_sections() {
        let content = r#"
port = 9090
gemini_api_key = "test-key"
contain_generation_faults = true

[speech]
encoding = "flac"
sample_rate_hertz = 16000
alternative_languages = ["de-DE", "it-IT"]

[detection]
default_language = "de-DE"
"#;

        let config = decode(content).unwrap();
        assert_eq!(config.port, Some(9090));
        assert_eq!(config.gemini_api_key.as_deref(), Some("test-key"));
        assert_eq!(config.contain_generation_faults, Some(true));
        let speech = config.speech.as_ref().unwrap();
        assert_eq!(speech.encoding.as_deref(), Some("flac"));
        assert_eq!(speech.sample_rate_hertz, Some(16_000));
        assert_eq!(
            speech.alternative_languages,
            Some(vec!["de-DE".to_string(), "it-IT".to_string()])
        );
        assert_eq!(config.default_language_or_default().as_str(), "de-DE");
    }

    #[test]
    fn decode_rejects_wrong_types() {
        assert!(matches!(
            decode("port = \"eighty\""),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn defaults_survive_encoding() {
        let defaults = AppConfig::defaults();
        assert_eq!(decode(&encode(&defaults).unwrap()).unwrap(), defaults);
    }

    #[tokio::test]
    async fn save_leaves_no_staging_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join(FILE_NAME));

        store.save(&AppConfig::defaults()).await.unwrap();
        store.save(&AppConfig::defaults()).await.unwrap();

        assert!(store.exists());
        assert!(!store.staging_path().exists());
    }

    #[tokio::test]
    async fn directory_at_path_is_read_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = XdgConfigStore::with_path(dir.path()).load().await.unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join(FILE_NAME));
        store.init().await.unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
