pub mod commit;
pub mod error;
pub mod ledger;
pub mod runner;
pub mod session;
pub mod tokenize;

#[cfg(test)]
mod tests;

pub use commit::{CommitOutcome, CommitReport};
pub use error::BatchError;
pub use ledger::{EntryState, Ledger, ResultEntry};
pub use runner::{ProgressStage, ProgressUpdate};
pub use session::{BatchSession, RunStatus};
pub use tokenize::{Candidate, tokenize};
