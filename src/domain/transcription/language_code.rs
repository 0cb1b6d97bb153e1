//! Language code value objects

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::InvalidLanguageCodeError;

/// A locale tag such as `en`, `en-US` or `zh-Hans-CN`.
///
/// Only the shape is checked: a 2-3 letter primary subtag followed by
/// alphanumeric subtags of 1-8 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn en_us() -> Self {
        Self("en-US".to_string())
    }
}

impl FromStr for LanguageCode {
    type Err = InvalidLanguageCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || InvalidLanguageCodeError {
            input: s.to_string(),
        };

        let mut subtags = trimmed.split(['-', '_']);
        let primary = subtags.next().ok_or_else(invalid)?;
        if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }
        for subtag in subtags {
            if subtag.is_empty()
                || subtag.len() > 8
                || !subtag.chars().all(|c| c.is_ascii_alphanumeric())
            {
                return Err(invalid());
            }
        }

        Ok(Self(trimmed.replace('_', "-")))
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = InvalidLanguageCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Languages passed to the recognizer to bias recognition:
/// one primary plus an ordered list of alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionLanguages {
    primary: LanguageCode,
    alternatives: Vec<LanguageCode>,
}

impl RecognitionLanguages {
    pub fn new(primary: LanguageCode, alternatives: Vec<LanguageCode>) -> Self {
        Self {
            primary,
            alternatives,
        }
    }

    pub fn primary(&self) -> &LanguageCode {
        &self.primary
    }

    pub fn alternatives(&self) -> &[LanguageCode] {
        &self.alternatives
    }

    /// Default alternatives when nothing is configured
    pub fn default_alternatives() -> Vec<LanguageCode> {
        ["hi-IN", "or-IN", "es-ES", "fr-FR"]
            .iter()
            .map(|code| LanguageCode(code.to_string()))
            .collect()
    }
}

impl Default for RecognitionLanguages {
    fn default() -> Self {
        Self::new(LanguageCode::en_us(), Self::default_alternatives())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_tags() {
        assert_eq!("en".parse::<LanguageCode>().unwrap().as_str(), "en");
        assert_eq!("hi-IN".parse::<LanguageCode>().unwrap().as_str(), "hi-IN");
        assert_eq!(
            "zh-Hans-CN".parse::<LanguageCode>().unwrap().as_str(),
            "zh-Hans-CN"
        );
    }

    #[test]
    fn normalizes_underscore_separator() {
        assert_eq!("es_ES".parse::<LanguageCode>().unwrap().as_str(), "es-ES");
    }

    #[test]
    fn rejects_malformed_tags() {
        assert!("".parse::<LanguageCode>().is_err());
        assert!("e".parse::<LanguageCode>().is_err());
        assert!("english".parse::<LanguageCode>().is_err());
        assert!("en-".parse::<LanguageCode>().is_err());
        assert!("en US".parse::<LanguageCode>().is_err());
    }

    #[test]
    fn deserializes_through_validation() {
        let code: LanguageCode = serde_json::from_str("\"fr-FR\"").unwrap();
        assert_eq!(code.as_str(), "fr-FR");
        assert!(serde_json::from_str::<LanguageCode>("\"not a code\"").is_err());
    }

    #[test]
    fn default_recognition_languages_keep_order() {
        let languages = RecognitionLanguages::default();
        assert_eq!(languages.primary().as_str(), "en-US");
        let alternatives: Vec<&str> = languages.alternatives().iter().map(|c| c.as_str()).collect();
        assert_eq!(alternatives, vec!["hi-IN", "or-IN", "es-ES", "fr-FR"]);
    }
}
