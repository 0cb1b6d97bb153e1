//! Place and recommendation set value objects

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One recommended place with a navigation link.
///
/// Fields the backend omits deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "mapLink", default)]
    pub map_link: String,
}

impl Place {
    pub fn new(name: impl Into<String>, map_link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            map_link: map_link.into(),
        }
    }
}

/// Why a completion could not be turned into places
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionParseError {
    #[error("Completion is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Completion does not match the places schema: {0}")]
    SchemaMismatch(String),
}

/// Shape the generative backend is asked to emit
#[derive(Debug, Deserialize)]
struct CompletionPayload {
    places: Option<Vec<Place>>,
}

/// Ordered places returned to the caller.
///
/// Two entries are requested from the backend but any count is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationSet(Vec<Place>);

impl RecommendationSet {
    pub fn new(places: Vec<Place>) -> Self {
        Self(places)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn places(&self) -> &[Place] {
        &self.0
    }

    pub fn into_places(self) -> Vec<Place> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse completion text of the form `{"places": [{"name", "mapLink"}]}`.
    ///
    /// A JSON object without `places` (or with `places: null`) yields an empty set.
    pub fn parse_completion(text: &str) -> Result<Self, CompletionParseError> {
        let payload: CompletionPayload = serde_json::from_str(text).map_err(|e| {
            if e.is_data() {
                CompletionParseError::SchemaMismatch(e.to_string())
            } else {
                CompletionParseError::InvalidJson(e.to_string())
            }
        })?;

        Ok(Self(payload.places.unwrap_or_default()))
    }
}

impl From<Vec<Place>> for RecommendationSet {
    fn from(places: Vec<Place>) -> Self {
        Self(places)
    }
}
