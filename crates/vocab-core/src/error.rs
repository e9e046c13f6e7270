use vocab_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("input contains no words")]
    EmptyInput,

    #[error("too many words: {count} given, limit is {limit}")]
    TooManyWords { count: usize, limit: usize },

    #[error("a run is already in progress")]
    AlreadyRunning,

    #[error("no active batch")]
    NoActiveBatch,

    #[error("word not in this batch: {0}")]
    UnknownWord(String),

    #[error("word is not in an error state: {0}")]
    NotRetryable(String),

    #[error("commit failed: {0}")]
    Commit(#[from] StoreError),
}
