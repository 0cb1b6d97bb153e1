//! Transcription result value object

/// Transcript text plus the language it was detected in.
/// Both fields may be empty; an empty transcript is a normal outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptionResult {
    text: String,
    language_code: String,
}

impl TranscriptionResult {
    pub fn new(text: impl Into<String>, language_code: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language_code: language_code.into(),
        }
    }

    /// Empty text and empty language, used when transcription fails
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_text_and_no_language() {
        let result = TranscriptionResult::empty();
        assert!(result.is_empty());
        assert_eq!(result.language_code(), "");
    }

    #[test]
    fn new_keeps_fields() {
        let result = TranscriptionResult::new("find me a cafe", "en-US");
        assert!(!result.is_empty());
        assert_eq!(result.text(), "find me a cafe");
        assert_eq!(result.language_code(), "en-US");
    }
}
