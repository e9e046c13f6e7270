use std::time::Duration;

use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;
use vocab_enrich::Enricher;

use crate::ledger::{EntryState, Ledger};
use crate::tokenize::Candidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStage {
    Started,
    Succeeded,
    Failed,
}

/// Emitted after every ledger transition, Error transitions included;
/// `completed` counts processed words, not successful ones.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub word: String,
    pub completed: usize,
    pub total: usize,
    pub stage: ProgressStage,
}

/// Drive the enrichment client over `words`, strictly one at a time, with
/// a fixed pause between consecutive calls.
///
/// The upstream service is rate-limited and calls are not cheap, so the
/// loop serializes requests instead of dispatching in parallel. An Error
/// on one word never aborts the run; every word reaches Success or Error.
/// Used unchanged for the initial batch and for targeted retries, where
/// `words` is the Error subset and each transition replaces the existing
/// entry in place.
///
/// Returns false when the cancellation token fired; the loop stops at the
/// next word boundary and remaining words stay Pending.
pub async fn run_over<E>(
    ledger: &mut Ledger,
    words: &[Candidate],
    client: &E,
    delay: Duration,
    cancel: &CancellationToken,
    progress: Option<&AsyncSender<ProgressUpdate>>,
) -> bool
where
    E: Enricher + ?Sized,
{
    let total = ledger.total();

    for (i, word) in words.iter().enumerate() {
        if cancel.is_cancelled() {
            tracing::info!(word = %word, "run cancelled before next word");
            return false;
        }

        ledger.set_state(word.as_str(), EntryState::InFlight);
        emit(progress, word, ledger.completed(), total, ProgressStage::Started).await;

        match client.enrich(word.as_str()).await {
            Ok(info) => {
                tracing::debug!(word = %word, confidence = info.confidence_score, "enriched");
                ledger.set_state(word.as_str(), EntryState::Success(info));
                emit(progress, word, ledger.completed(), total, ProgressStage::Succeeded).await;
            }
            Err(e) => {
                tracing::warn!(word = %word, error = %e, "enrichment failed");
                ledger.set_state(word.as_str(), EntryState::Error(e.to_string()));
                emit(progress, word, ledger.completed(), total, ProgressStage::Failed).await;
            }
        }

        if i + 1 < words.len() {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("run cancelled during inter-word delay");
                    return false;
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }

    true
}

async fn emit(
    progress: Option<&AsyncSender<ProgressUpdate>>,
    word: &Candidate,
    completed: usize,
    total: usize,
    stage: ProgressStage,
) {
    if let Some(tx) = progress {
        // A dropped receiver just means nobody is watching
        let _ = tx
            .send(ProgressUpdate {
                word: word.as_str().to_string(),
                completed,
                total,
                stage,
            })
            .await;
    }
}
