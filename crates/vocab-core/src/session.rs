use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;
use vocab_config::batch::BatchConfig;
use vocab_enrich::Enricher;
use vocab_store::WordStore;

use crate::commit::{CommitOutcome, commit_success};
use crate::error::BatchError;
use crate::ledger::{EntryState, Ledger};
use crate::runner::{ProgressUpdate, run_over};
use crate::tokenize::{Candidate, tokenize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Idle,
    Running,
    AwaitingReview,
    Committing,
    Done,
    Failed,
}

/// Run-level state for one batch: the candidate list, its ledger and the
/// cancellation token that guards the run. Exactly one exists at a time;
/// starting a new batch or clearing discards it wholesale.
struct BatchJob {
    candidates: Vec<Candidate>,
    ledger: Ledger,
    status: RunStatus,
    cancel: CancellationToken,
}

/// The batch-enrichment facade the UI talks to.
///
/// Owns the current job, the enrichment client and the store client.
/// Single-owner, single-active-run: callers are expected not to start a
/// second run while one is in progress, and get `AlreadyRunning` if they
/// do.
pub struct BatchSession<E, S> {
    enricher: E,
    store: S,
    config: BatchConfig,
    job: Option<BatchJob>,
    progress: Option<AsyncSender<ProgressUpdate>>,
    cancel_root: CancellationToken,
}

impl<E, S> BatchSession<E, S>
where
    E: Enricher,
    S: WordStore,
{
    pub fn new(enricher: E, store: S, config: BatchConfig) -> Self {
        Self {
            enricher,
            store,
            config,
            job: None,
            progress: None,
            cancel_root: CancellationToken::new(),
        }
    }

    pub fn enricher_ref(&self) -> &E {
        &self.enricher
    }

    pub fn store_ref(&self) -> &S {
        &self.store
    }

    /// Create the channel progress updates are delivered on.
    pub fn progress_channel(&mut self) -> AsyncReceiver<ProgressUpdate> {
        let (tx, rx) = kanal::unbounded_async();
        self.progress = Some(tx);
        rx
    }

    pub fn status(&self) -> RunStatus {
        self.job.as_ref().map_or(RunStatus::Idle, |j| j.status)
    }

    pub fn ledger(&self) -> Option<&Ledger> {
        self.job.as_ref().map(|j| &j.ledger)
    }

    /// Token a caller can hold to cancel the current run from another
    /// task. Each job runs under a child of this token; the runner stops
    /// at the next word boundary and the cancelled job is discarded,
    /// results included.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_root.clone()
    }

    /// Discard the current batch entirely, cancelling any run in flight.
    pub fn clear(&mut self) {
        if let Some(job) = self.job.take() {
            job.cancel.cancel();
            tracing::info!("batch discarded");
        }
    }

    /// Tokenize `raw`, refuse invalid input, then enrich every candidate
    /// sequentially. Replaces the previous batch; returns with every
    /// candidate in a terminal state and status AwaitingReview, unless the
    /// run was cancelled, in which case the job is gone.
    pub async fn start_batch(&mut self, raw: &str) -> Result<(), BatchError> {
        if matches!(self.status(), RunStatus::Running | RunStatus::Committing) {
            return Err(BatchError::AlreadyRunning);
        }

        let candidates = tokenize(raw);

        if candidates.is_empty() {
            return Err(BatchError::EmptyInput);
        }

        if candidates.len() > self.config.max_words {
            return Err(BatchError::TooManyWords {
                count: candidates.len(),
                limit: self.config.max_words,
            });
        }

        // No partial carry-over across batches
        self.clear();

        // A root cancelled by an earlier shutdown would kill the new run
        // before its first word
        if self.cancel_root.is_cancelled() {
            self.cancel_root = CancellationToken::new();
        }

        let ledger = Ledger::new(&candidates);
        self.job = Some(BatchJob {
            candidates,
            ledger,
            status: RunStatus::Running,
            cancel: self.cancel_root.child_token(),
        });

        let Self {
            job,
            enricher,
            config,
            progress,
            ..
        } = self;
        let active = job.as_mut().expect("job was just created");

        tracing::info!(words = active.candidates.len(), "batch started");

        let words = active.candidates.clone();
        let finished = run_over(
            &mut active.ledger,
            &words,
            enricher,
            Duration::from_millis(config.delay_ms),
            &active.cancel,
            progress.as_ref(),
        )
        .await;

        if !finished {
            *job = None;
            return Ok(());
        }

        active.status = RunStatus::AwaitingReview;
        tracing::info!(
            succeeded = active.ledger.success_count(),
            failed = active.ledger.error_count(),
            "batch processed"
        );

        Ok(())
    }

    /// Rerun enrichment for one word currently in Error state. The entry
    /// is replaced in place; every other entry is untouched.
    pub async fn retry_word(&mut self, word: &str) -> Result<(), BatchError> {
        let candidate =
            Candidate::new(word).ok_or_else(|| BatchError::UnknownWord(word.to_string()))?;

        self.retry(vec![candidate]).await
    }

    /// Rerun enrichment for every word currently in Error state. A batch
    /// with no errors is a no-op.
    pub async fn retry_all_errors(&mut self) -> Result<(), BatchError> {
        let job = self.job.as_ref().ok_or(BatchError::NoActiveBatch)?;

        let errored: Vec<Candidate> = job
            .ledger
            .error_entries()
            .map(|(c, _)| c.clone())
            .collect();

        if errored.is_empty() {
            return Ok(());
        }

        self.retry(errored).await
    }

    async fn retry(&mut self, words: Vec<Candidate>) -> Result<(), BatchError> {
        if matches!(self.status(), RunStatus::Running | RunStatus::Committing) {
            return Err(BatchError::AlreadyRunning);
        }

        let Self {
            job,
            enricher,
            config,
            progress,
            ..
        } = self;
        let active = job.as_mut().ok_or(BatchError::NoActiveBatch)?;

        for word in &words {
            match active.ledger.get(word.as_str()) {
                Some(entry) if matches!(entry.state, EntryState::Error(_)) => {}
                Some(_) => return Err(BatchError::NotRetryable(word.as_str().to_string())),
                None => return Err(BatchError::UnknownWord(word.as_str().to_string())),
            }
        }

        active.status = RunStatus::Running;
        tracing::info!(words = words.len(), "retrying errored words");

        let finished = run_over(
            &mut active.ledger,
            &words,
            enricher,
            Duration::from_millis(config.delay_ms),
            &active.cancel,
            progress.as_ref(),
        )
        .await;

        if !finished {
            *job = None;
            return Ok(());
        }

        active.status = RunStatus::AwaitingReview;
        Ok(())
    }

    /// Bulk-insert the Success subset. Zero Success entries is a no-op,
    /// reported as such without a network call. Inserted entries leave the
    /// ledger; rejected ones stay visible for manual action. A transport
    /// failure leaves the whole ledger untouched and marks the batch
    /// Failed; commit can simply be retried.
    pub async fn commit_all(&mut self) -> Result<CommitOutcome, BatchError> {
        if matches!(self.status(), RunStatus::Running | RunStatus::Committing) {
            return Err(BatchError::AlreadyRunning);
        }

        let Self { job, store, .. } = self;
        let Some(active) = job.as_mut() else {
            return Ok(CommitOutcome::NothingToCommit);
        };

        if active.ledger.success_count() == 0 {
            tracing::info!("commit requested with no successes");
            return Ok(CommitOutcome::NothingToCommit);
        }

        active.status = RunStatus::Committing;

        match commit_success(&mut active.ledger, store).await {
            Ok(outcome) => {
                active.status = if active.ledger.is_empty() {
                    RunStatus::Done
                } else {
                    RunStatus::AwaitingReview
                };
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!(error = %e, "bulk insert failed");
                active.status = RunStatus::Failed;
                Err(BatchError::Commit(e))
            }
        }
    }
}
