use std::env;

use serde::{Deserialize, Serialize};

fn default_url() -> String {
    "http://localhost:8090/api/words".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    #[serde(default = "default_url")]
    pub url: String,
    /// Bearer credential; the store scopes rows per user from this
    #[serde(default)]
    pub api_key: String,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        let url = env::var("STORE_URL").unwrap_or_else(|_| default_url());
        let api_key = env::var("STORE_API_KEY").unwrap_or_default();

        Self { url, api_key }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            api_key: String::new(),
        }
    }
}
