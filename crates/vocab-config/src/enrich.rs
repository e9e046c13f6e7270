use std::env;

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct EnrichConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Total per-call timeout, connect included
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl EnrichConfig {
    pub fn from_env() -> Self {
        let api_key = env::var("ENRICH_API_KEY").unwrap_or_default();
        let api_url = env::var("ENRICH_API_URL").unwrap_or_else(|_| default_api_url());
        let model = env::var("ENRICH_MODEL").unwrap_or_else(|_| default_model());

        let timeout_seconds = env::var("ENRICH_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_seconds);

        Self {
            api_key,
            api_url,
            model,
            timeout_seconds,
        }
    }
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_api_url(),
            model: default_model(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
