use vocab_types::WordInfo;

pub mod openai;
pub mod score;

pub use openai::OpenAiEnricher;

/// Enrichment provider interface
#[async_trait::async_trait]
pub trait Enricher: Send + Sync {
    /// Fetch translation/phonetic/example data for one word.
    ///
    /// Exactly one upstream call per invocation; no internal retries.
    /// Retry policy belongs to the caller so it stays visible per word.
    async fn enrich(&self, word: &str) -> Result<WordInfo, EnrichError>;

    fn provider_name(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("rate limit exceeded")]
    RateLimited,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("invalid word: {0}")]
    InvalidWord(String),
}

const MIN_WORD_LEN: usize = 2;
const MAX_WORD_LEN: usize = 50;

const PLACEHOLDER_WORDS: [&str; 4] = ["test", "example", "sample", "demo"];

/// Client-side check before spending an upstream call on a token.
///
/// Accepts ASCII letters plus hyphen and apostrophe, length 2..=50.
pub fn validate_word(word: &str) -> Result<(), EnrichError> {
    let word = word.trim();

    if word.is_empty() {
        return Err(EnrichError::InvalidWord("word is empty".to_string()));
    }

    if word.chars().count() < MIN_WORD_LEN {
        return Err(EnrichError::InvalidWord(format!(
            "word must be at least {MIN_WORD_LEN} characters"
        )));
    }

    if word.chars().count() > MAX_WORD_LEN {
        return Err(EnrichError::InvalidWord(format!(
            "word must be at most {MAX_WORD_LEN} characters"
        )));
    }

    if !word
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c == '-' || c == '\'')
    {
        return Err(EnrichError::InvalidWord(
            "word may only contain letters, hyphens and apostrophes".to_string(),
        ));
    }

    if PLACEHOLDER_WORDS.contains(&word.to_lowercase().as_str()) {
        return Err(EnrichError::InvalidWord(
            "placeholder word, enter a real English word".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_punctuated_words() {
        assert!(validate_word("serendipity").is_ok());
        assert!(validate_word("don't").is_ok());
        assert!(validate_word("well-known").is_ok());
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(matches!(
            validate_word(""),
            Err(EnrichError::InvalidWord(_))
        ));
        assert!(matches!(
            validate_word("   "),
            Err(EnrichError::InvalidWord(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_lengths() {
        assert!(matches!(
            validate_word("x"),
            Err(EnrichError::InvalidWord(_))
        ));

        let long = "a".repeat(51);
        assert!(matches!(
            validate_word(&long),
            Err(EnrichError::InvalidWord(_))
        ));

        assert!(validate_word(&"a".repeat(50)).is_ok());
    }

    #[test]
    fn rejects_placeholder_words_case_insensitively() {
        for word in ["test", "Example", "SAMPLE", "demo"] {
            assert!(
                matches!(validate_word(word), Err(EnrichError::InvalidWord(_))),
                "{word} should be rejected"
            );
        }
        // real words that merely contain a placeholder still pass
        assert!(validate_word("testament").is_ok());
    }

    #[test]
    fn rejects_non_letter_characters() {
        assert!(matches!(
            validate_word("hello123"),
            Err(EnrichError::InvalidWord(_))
        ));
        assert!(matches!(
            validate_word("two words"),
            Err(EnrichError::InvalidWord(_))
        ));
    }
}
