//! Recommendation prompt value object

/// Role framing for every recommendation request
const ROLE: &str = "Role: 'Voice of the City', a local travel guide.";

/// JSON schema the completion must follow
const SCHEMA: &str = r#"{"places": [{"name": "string", "mapLink": "string"}]}"#;

/// Number of places requested per query
pub const REQUESTED_PLACES: usize = 2;

/// Prompt sent to the generative backend for one spoken query.
///
/// The language code appears twice: once as the input language and
/// once as the language the answer must be written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationPrompt {
    content: String,
}

impl RecommendationPrompt {
    pub fn build(query: &str, language_code: &str) -> Self {
        let content = format!(
            "{ROLE} \
             Input: lang={language_code}, query='{query}'. \
             Task: Generate a strict JSON response in language {language_code}. \
             The JSON must contain a 'places' array with exactly {count} recommendation objects. \
             Each mapLink must be a Google Maps URL for the place. \
             Schema: {SCHEMA}. \
             Output only the raw JSON, with no other text and no markdown code fences.",
            count = number_word(REQUESTED_PLACES),
        );
        Self { content }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

fn number_word(n: usize) -> String {
    match n {
        1 => "one".to_string(),
        2 => "two".to_string(),
        3 => "three".to_string(),
        other => other.to_string(),
    }
}
