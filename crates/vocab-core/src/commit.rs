use vocab_store::{StoreError, WordStore};
use vocab_types::WordRecord;

use crate::ledger::Ledger;

#[derive(Debug, Clone)]
pub enum CommitOutcome {
    /// No Success entries; no network call was made.
    NothingToCommit,
    Committed(CommitReport),
}

#[derive(Debug, Clone, Default)]
pub struct CommitReport {
    pub inserted_words: Vec<String>,
    pub failed_words: Vec<(String, String)>,
}

impl CommitReport {
    pub fn is_full_success(&self) -> bool {
        self.failed_words.is_empty()
    }
}

/// Push the current Success subset to the store as one bulk insert.
///
/// The store inserts row-independently under a per-user uniqueness
/// constraint on word, so the call may partially fail. Inserted rows are
/// removed from the ledger; rejected rows keep their entries untouched so
/// the user can retry, edit or discard them. Error and Pending entries are
/// never touched.
pub async fn commit_success<S>(ledger: &mut Ledger, store: &S) -> Result<CommitOutcome, StoreError>
where
    S: WordStore + ?Sized,
{
    let records: Vec<WordRecord> = ledger
        .success_entries()
        .map(|(_, info)| WordRecord::from(info.clone()))
        .collect();

    if records.is_empty() {
        tracing::info!("nothing to commit");
        return Ok(CommitOutcome::NothingToCommit);
    }

    tracing::info!(rows = records.len(), "committing batch");
    let outcome = store.bulk_insert(&records).await?;

    let inserted_words = outcome.inserted_words();
    for word in &inserted_words {
        ledger.remove(word);
    }

    let failed_words: Vec<(String, String)> = outcome
        .rejected
        .into_iter()
        .map(|r| (r.word, r.reason))
        .collect();

    for (word, reason) in &failed_words {
        tracing::warn!(word, reason, "row rejected by store");
    }

    Ok(CommitOutcome::Committed(CommitReport {
        inserted_words,
        failed_words,
    }))
}
