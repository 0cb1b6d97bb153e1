//! Google Cloud credentials loaded once at startup

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use gcp_auth::{CustomServiceAccount, TokenProvider};
use serde::Deserialize;
use thiserror::Error;
use tokio::fs;

/// OAuth scope covering Speech-to-Text and Cloud Translation
const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Header carrying an API key, so it never appears in a URL
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Credential loading and token errors
#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("Failed to read credentials file {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to parse credentials file: {0}")]
    ParseError(String),

    #[error("Credentials file has no project_id")]
    MissingProject,

    #[error("Credentials file must be a service account key or carry an api_key")]
    MissingAuth,

    #[error("Invalid service account key: {0}")]
    ServiceAccount(String),

    #[error("Failed to obtain an access token: {0}")]
    Token(String),
}

/// How requests to Google Cloud are authorized
#[derive(Clone)]
pub enum GoogleAuth {
    /// Service account key; bearer tokens are minted and refreshed on demand
    ServiceAccount(Arc<CustomServiceAccount>),
    /// `x-goog-api-key` header
    ApiKey(String),
}

impl fmt::Debug for GoogleAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServiceAccount(_) => f.write_str("ServiceAccount(..)"),
            Self::ApiKey(_) => f.write_str("ApiKey(..)"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CredentialsFile {
    #[serde(rename = "type")]
    kind: Option<String>,
    project_id: Option<String>,
    api_key: Option<String>,
}

/// Read-only credentials shared by the speech and translation adapters.
#[derive(Debug, Clone)]
pub struct GoogleCredentials {
    project_id: String,
    auth: GoogleAuth,
}

impl GoogleCredentials {
    pub fn new(project_id: impl Into<String>, auth: GoogleAuth) -> Self {
        Self {
            project_id: project_id.into(),
            auth,
        }
    }

    /// Load a service account key file, or a JSON file with `project_id`
    /// and `api_key`.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CredentialsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| CredentialsError::ReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self, CredentialsError> {
        let file: CredentialsFile =
            serde_json::from_str(content).map_err(|e| CredentialsError::ParseError(e.to_string()))?;

        let project_id = file
            .project_id
            .filter(|p| !p.trim().is_empty())
            .ok_or(CredentialsError::MissingProject)?;

        let auth = if file.kind.as_deref() == Some("service_account") {
            let account = CustomServiceAccount::from_json(content)
                .map_err(|e| CredentialsError::ServiceAccount(e.to_string()))?;
            GoogleAuth::ServiceAccount(Arc::new(account))
        } else {
            match file.api_key.filter(|k| !k.trim().is_empty()) {
                Some(key) => GoogleAuth::ApiKey(key),
                None => return Err(CredentialsError::MissingAuth),
            }
        };

        Ok(Self { project_id, auth })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn auth(&self) -> &GoogleAuth {
        &self.auth
    }

    /// Fetch one token up front so a revoked or malformed key fails at startup
    pub async fn verify(&self) -> Result<(), CredentialsError> {
        if let GoogleAuth::ServiceAccount(account) = &self.auth {
            account
                .token(&[CLOUD_PLATFORM_SCOPE])
                .await
                .map_err(|e| CredentialsError::Token(e.to_string()))?;
        }
        Ok(())
    }

    /// Attach credentials to an outbound request. Service account tokens are
    /// cached and refreshed by `gcp_auth` before they expire.
    pub async fn authorize(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, CredentialsError> {
        match &self.auth {
            GoogleAuth::ServiceAccount(account) => {
                let token = account
                    .token(&[CLOUD_PLATFORM_SCOPE])
                    .await
                    .map_err(|e| CredentialsError::Token(e.to_string()))?;
                Ok(request.bearer_auth(token.as_str()))
            }
            GoogleAuth::ApiKey(key) => Ok(request.header(API_KEY_HEADER, key)),
        }
    }
}
