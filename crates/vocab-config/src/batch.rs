use std::env;

use serde::{Deserialize, Serialize};

fn default_delay_ms() -> u64 {
    500
}

fn default_max_words() -> usize {
    20
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct BatchConfig {
    /// Pause between consecutive enrichment calls
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Candidate count above which a batch is refused
    #[serde(default = "default_max_words")]
    pub max_words: usize,
}

impl BatchConfig {
    pub fn from_env() -> Self {
        let delay_ms = env::var("BATCH_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_delay_ms);

        let max_words = env::var("BATCH_MAX_WORDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_max_words);

        Self {
            delay_ms,
            max_words,
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            max_words: default_max_words(),
        }
    }
}
