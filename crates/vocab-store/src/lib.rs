use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vocab_types::WordRecord;

pub mod rest;

pub use rest::RestStore;

/// Persistent word storage, scoped per user by the client's credential.
#[async_trait::async_trait]
pub trait WordStore: Send + Sync {
    /// Insert many rows in one request.
    ///
    /// Row-independent: the store enforces a per-user uniqueness constraint
    /// on `word`, so some rows may be rejected while the rest persist.
    /// Rejections never roll back the rows that succeeded.
    async fn bulk_insert(&self, rows: &[WordRecord]) -> Result<BulkOutcome, StoreError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkOutcome {
    pub inserted: Vec<InsertedRow>,
    pub rejected: Vec<RejectedRow>,
}

impl BulkOutcome {
    pub fn inserted_words(&self) -> Vec<String> {
        self.inserted.iter().map(|r| r.word.clone()).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertedRow {
    pub id: Uuid,
    pub word: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedRow {
    pub word: String,
    pub reason: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("store error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed store response: {0}")]
    Malformed(String),
}
