use serde::Serialize;
use vocab_config::store::StoreConfig;
use vocab_types::WordRecord;

use crate::{BulkOutcome, StoreError, WordStore};

/// Store client for the managed words backend.
#[derive(Clone)]
pub struct RestStore {
    config: StoreConfig,
    client: reqwest::Client,
}

impl RestStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Serialize)]
struct BulkInsertRequest<'a> {
    rows: &'a [WordRecord],
}

#[async_trait::async_trait]
impl WordStore for RestStore {
    async fn bulk_insert(&self, rows: &[WordRecord]) -> Result<BulkOutcome, StoreError> {
        if self.config.api_key.is_empty() {
            return Err(StoreError::Auth("store credential not configured".to_string()));
        }

        tracing::debug!(count = rows.len(), "bulk insert request");

        let response = self
            .client
            .post(&self.config.url)
            .bearer_auth(&self.config.api_key)
            .json(&BulkInsertRequest { rows })
            .send()
            .await?;

        match response.status().as_u16() {
            200..=299 => {
                let outcome: BulkOutcome = response
                    .json()
                    .await
                    .map_err(|e| StoreError::Malformed(format!("undecodable body: {e}")))?;

                tracing::info!(
                    inserted = outcome.inserted.len(),
                    rejected = outcome.rejected.len(),
                    "bulk insert completed"
                );

                Ok(outcome)
            }
            401 | 403 => Err(StoreError::Auth("store credential rejected".to_string())),
            status => {
                let message = error_snippet(&response.text().await.unwrap_or_default());
                Err(StoreError::Api { status, message })
            }
        }
    }
}

/// First 200 chars of an error body; bodies can carry multi-byte text, so
/// cutting on a byte index is not safe.
fn error_snippet(text: &str) -> String {
    text.chars().take(200).collect()
}
