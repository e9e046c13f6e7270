use std::io::Read;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use vocab_config::Config;
use vocab_core::{BatchSession, CommitOutcome, EntryState, ProgressStage, RunStatus};
use vocab_enrich::OpenAiEnricher;
use vocab_store::RestStore;

/// Batch word enrichment for the vocabulary notebook.
#[derive(Parser)]
#[command(name = "vocab-batch")]
struct Args {
    /// Raw word input; tokenized, case-folded and deduplicated. Reads
    /// stdin when omitted.
    words: Vec<String>,

    /// Verify the enrichment credential and exit
    #[arg(long)]
    check: bool,

    /// Rerun the error set once before committing
    #[arg(long)]
    retry_errors: bool,

    /// Enrich and report without committing to the store
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let config = Config::from_env();

    let enricher = OpenAiEnricher::new(config.enrich.clone());

    if args.check {
        enricher
            .check_connection()
            .await
            .context("enrichment service check failed")?;
        tracing::info!("enrichment service reachable, credential accepted");
        return Ok(());
    }

    let raw = if args.words.is_empty() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read words from stdin")?;
        buf
    } else {
        args.words.join(" ")
    };

    let store = RestStore::new(config.store.clone());
    let mut session = BatchSession::new(enricher, store, config.batch.clone());

    let progress = session.progress_channel();
    tokio::spawn(async move {
        while let Ok(update) = progress.recv().await {
            let stage = match update.stage {
                ProgressStage::Started => "...",
                ProgressStage::Succeeded => "ok",
                ProgressStage::Failed => "failed",
            };
            println!("[{}/{}] {} {}", update.completed, update.total, update.word, stage);
        }
    });

    // Ctrl+C stops the run at the next word boundary
    let cancel = session.cancel_token();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, stopping after the current word");
            cancel.cancel();
        }
    });

    session.start_batch(&raw).await?;

    if session.status() == RunStatus::Idle {
        tracing::warn!("batch cancelled, nothing committed");
        return Ok(());
    }

    if args.retry_errors {
        session.retry_all_errors().await?;
    }

    if let Some(ledger) = session.ledger() {
        for entry in ledger.entries() {
            match &entry.state {
                EntryState::Success(info) => println!(
                    "{}: {} {} (confidence {:.2})",
                    entry.candidate, info.chinese_meaning, info.phonetic, info.confidence_score
                ),
                EntryState::Error(message) => println!("{}: error: {message}", entry.candidate),
                EntryState::Pending | EntryState::InFlight => {}
            }
        }
    }

    if args.dry_run {
        tracing::info!("dry run, skipping commit");
        return Ok(());
    }

    match session.commit_all().await? {
        CommitOutcome::NothingToCommit => tracing::info!("nothing to commit"),
        CommitOutcome::Committed(report) => {
            tracing::info!(inserted = report.inserted_words.len(), "words saved");
            for (word, reason) in &report.failed_words {
                tracing::warn!(word, reason, "word not saved");
            }
        }
    }

    Ok(())
}
