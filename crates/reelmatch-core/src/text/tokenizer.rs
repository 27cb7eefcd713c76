//! Word tokenizer.

use super::stopwords::StopWords;

/// Minimum token length in characters.
const MIN_TOKEN_CHARS: usize = 2;

/// Splits text into lowercase word tokens, dropping stop words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tokenizer {
    stop_words: StopWords,
}

impl Tokenizer {
    /// Creates a tokenizer removing the given stop-word list.
    #[must_use]
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words }
    }

    /// Stop-word list in use.
    #[must_use]
    pub fn stop_words(&self) -> StopWords {
        self.stop_words
    }

    /// Tokenizes `text`, preserving token order and duplicates.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        tokenize(text)
            .into_iter()
            .filter(|t| !self.stop_words.contains(t))
            .collect()
    }
}

/// Lowercases and splits `text` without stop-word removal.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| w.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}
