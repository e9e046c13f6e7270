use serde::Deserialize;
use serde_json::json;
use vocab_config::enrich::EnrichConfig;
use vocab_types::WordInfo;

use crate::score::confidence_score;
use crate::{EnrichError, Enricher, validate_word};

/// Enricher backed by an OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct OpenAiEnricher {
    config: EnrichConfig,
    client: reqwest::Client,
}

impl OpenAiEnricher {
    pub fn new(config: EnrichConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_default();

        Self { config, client }
    }

    /// Minimal authenticated round trip to verify the key and endpoint.
    pub async fn check_connection(&self) -> Result<(), EnrichError> {
        if self.config.api_key.is_empty() {
            return Err(EnrichError::Auth("API key not configured".to_string()));
        }

        let payload = json!({
            "model": self.config.model,
            "messages": [{"role": "user", "content": "ping"}],
            "max_tokens": 1,
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !(200..=299).contains(&status) {
            return Err(status_error(status, truncated_body(response).await));
        }

        Ok(())
    }

    fn prompt(word: &str) -> String {
        format!(
            "Provide the following information for the English word \"{word}\" \
             as a single JSON object with exactly these keys:\n\
             {{\n\
             \"chinese_meaning\": \"concise Traditional Chinese translation\",\n\
             \"english_meaning\": \"plain-English definition\",\n\
             \"phonetic\": \"IPA transcription with slashes\",\n\
             \"example_sentence\": \"a natural sentence using the word\",\n\
             \"synonyms\": [\"two or three synonyms\"],\n\
             \"antonyms\": [\"one or two antonyms\"]\n\
             }}\n\
             For polysemous words use the most common sense. \
             Respond with the JSON object only."
        )
    }
}

#[async_trait::async_trait]
impl Enricher for OpenAiEnricher {
    async fn enrich(&self, word: &str) -> Result<WordInfo, EnrichError> {
        validate_word(word)?;

        if self.config.api_key.is_empty() {
            return Err(EnrichError::Auth("API key not configured".to_string()));
        }

        let payload = json!({
            "model": self.config.model,
            "messages": [
                {
                    "role": "system",
                    "content": "You are a dictionary assistant. Respond strictly \
                                in the requested JSON format.",
                },
                {
                    "role": "user",
                    "content": Self::prompt(word),
                },
            ],
            "max_tokens": 500,
            "temperature": 0.3,
            "response_format": {"type": "json_object"},
        });

        tracing::debug!(word, model = %self.config.model, "enrichment request");

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !(200..=299).contains(&status) {
            return Err(status_error(status, truncated_body(response).await));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| EnrichError::Malformed(format!("undecodable body: {e}")))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| EnrichError::Malformed("no choices in response".to_string()))?;

        parse_word_payload(word, &content, self.provider_name())
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}

/// Map a non-2xx upstream status to its error kind.
fn status_error(status: u16, message: String) -> EnrichError {
    match status {
        401 | 403 => EnrichError::Auth("API key rejected".to_string()),
        429 => EnrichError::RateLimited,
        status => EnrichError::Api { status, message },
    }
}

async fn truncated_body(response: reqwest::Response) -> String {
    error_snippet(&response.text().await.unwrap_or_default())
}

/// First 200 chars of an error body; bodies can carry multi-byte text, so
/// cutting on a byte index is not safe.
fn error_snippet(text: &str) -> String {
    text.chars().take(200).collect()
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

#[derive(Deserialize)]
struct WordPayload {
    #[serde(default)]
    chinese_meaning: String,
    #[serde(default)]
    english_meaning: String,
    #[serde(default)]
    phonetic: String,
    #[serde(default)]
    example_sentence: String,
    #[serde(default)]
    synonyms: Vec<String>,
    #[serde(default)]
    antonyms: Vec<String>,
}

/// Validate the model's JSON before treating it as a success.
///
/// A payload without a non-empty `chinese_meaning` is malformed, never a
/// partial success.
fn parse_word_payload(word: &str, content: &str, provider: &str) -> Result<WordInfo, EnrichError> {
    let payload: WordPayload = serde_json::from_str(content)
        .map_err(|e| EnrichError::Malformed(format!("invalid JSON content: {e}")))?;

    if payload.chinese_meaning.trim().is_empty() {
        return Err(EnrichError::Malformed(
            "missing required field chinese_meaning".to_string(),
        ));
    }

    let mut info = WordInfo {
        word: word.to_string(),
        chinese_meaning: payload.chinese_meaning,
        english_meaning: payload.english_meaning,
        phonetic: payload.phonetic,
        example_sentence: payload.example_sentence,
        synonyms: payload.synonyms,
        antonyms: payload.antonyms,
        provider: provider.to_string(),
        confidence_score: 0.0,
    };
    info.confidence_score = confidence_score(&info);

    Ok(info)
}
