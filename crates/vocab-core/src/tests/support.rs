use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use vocab_enrich::{EnrichError, Enricher};
use vocab_store::{BulkOutcome, InsertedRow, RejectedRow, StoreError, WordStore};
use vocab_types::{WordInfo, WordRecord};

pub fn info(word: &str) -> WordInfo {
    WordInfo {
        word: word.to_string(),
        chinese_meaning: "意思".to_string(),
        english_meaning: format!("meaning of {word}"),
        phonetic: String::new(),
        example_sentence: String::new(),
        synonyms: vec![],
        antonyms: vec![],
        provider: "scripted".to_string(),
        confidence_score: 0.5,
    }
}

/// Enricher whose per-word outcomes are scripted up front.
///
/// Each word pops its next scripted outcome per call; words without a
/// script always succeed. Every call is logged in order. Optionally
/// cancels a token after a given number of calls, to exercise the
/// runner's word-boundary cancellation check.
pub struct ScriptedEnricher {
    scripts: Mutex<HashMap<String, VecDeque<Result<(), String>>>>,
    pub calls: Mutex<Vec<String>>,
    cancel_after: Mutex<Option<(usize, CancellationToken)>>,
}

impl ScriptedEnricher {
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            cancel_after: Mutex::new(None),
        }
    }

    pub fn script(self, word: &str, outcomes: Vec<Result<(), String>>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(word.to_string(), outcomes.into());
        self
    }

    pub fn fail(self, word: &str, message: &str) -> Self {
        self.script(word, vec![Err(message.to_string())])
    }

    pub fn cancel_after(self, calls: usize, token: CancellationToken) -> Self {
        self.set_cancel_after(calls, token);
        self
    }

    pub fn set_cancel_after(&self, calls: usize, token: CancellationToken) {
        *self.cancel_after.lock().unwrap() = Some((calls, token));
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call_log(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Enricher for ScriptedEnricher {
    async fn enrich(&self, word: &str) -> Result<WordInfo, EnrichError> {
        let count = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(word.to_string());
            calls.len()
        };

        if let Some((after, token)) = self.cancel_after.lock().unwrap().as_ref() {
            if count >= *after {
                token.cancel();
            }
        }

        let outcome = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(word)
            .and_then(|q| q.pop_front())
            .unwrap_or(Ok(()));

        match outcome {
            Ok(()) => Ok(info(word)),
            Err(message) => Err(EnrichError::Api {
                status: 500,
                message,
            }),
        }
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}

pub enum StoreScript {
    AllOk,
    /// Reject these words as per-user duplicates; insert the rest.
    RejectWords(Vec<String>),
    /// Transport-level failure; nothing persists.
    Unavailable,
}

pub struct ScriptedStore {
    script: StoreScript,
    pub calls: Mutex<usize>,
    pub last_rows: Mutex<Vec<WordRecord>>,
}

impl ScriptedStore {
    pub fn new(script: StoreScript) -> Self {
        Self {
            script,
            calls: Mutex::new(0),
            last_rows: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    pub fn last_words(&self) -> Vec<String> {
        self.last_rows
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.word.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl WordStore for ScriptedStore {
    async fn bulk_insert(&self, rows: &[WordRecord]) -> Result<BulkOutcome, StoreError> {
        *self.calls.lock().unwrap() += 1;
        *self.last_rows.lock().unwrap() = rows.to_vec();

        match &self.script {
            StoreScript::AllOk => Ok(BulkOutcome {
                inserted: rows
                    .iter()
                    .map(|r| InsertedRow {
                        id: Uuid::new_v4(),
                        word: r.word.clone(),
                    })
                    .collect(),
                rejected: vec![],
            }),
            StoreScript::RejectWords(words) => {
                let mut outcome = BulkOutcome::default();
                for row in rows {
                    if words.contains(&row.word) {
                        outcome.rejected.push(RejectedRow {
                            word: row.word.clone(),
                            reason: "word already exists for this user".to_string(),
                        });
                    } else {
                        outcome.inserted.push(InsertedRow {
                            id: Uuid::new_v4(),
                            word: row.word.clone(),
                        });
                    }
                }
                Ok(outcome)
            }
            StoreScript::Unavailable => Err(StoreError::Api {
                status: 503,
                message: "store unavailable".to_string(),
            }),
        }
    }
}
