use vocab_types::WordInfo;

use crate::tokenize::Candidate;

/// Per-word processing state.
///
/// Tagged so the record travels with Success and the message with Error;
/// a Success without a record is unrepresentable.
#[derive(Debug, Clone)]
pub enum EntryState {
    Pending,
    InFlight,
    Success(WordInfo),
    Error(String),
}

impl EntryState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, EntryState::Success(_) | EntryState::Error(_))
    }
}

#[derive(Debug, Clone)]
pub struct ResultEntry {
    pub candidate: Candidate,
    pub state: EntryState,
}

/// Insertion-ordered map from candidate to its entry, one per word.
///
/// Mutation is reserved to the batch runner (state transitions) and the
/// commit path (removal of persisted entries). State and payload change
/// together as one enum value, so readers never see a half-updated entry.
#[derive(Debug, Default)]
pub struct Ledger {
    entries: Vec<ResultEntry>,
}

impl Ledger {
    pub fn new(candidates: &[Candidate]) -> Self {
        let entries = candidates
            .iter()
            .map(|candidate| ResultEntry {
                candidate: candidate.clone(),
                state: EntryState::Pending,
            })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }

    pub fn get(&self, word: &str) -> Option<&ResultEntry> {
        self.entries.iter().find(|e| e.candidate.as_str() == word)
    }

    /// Replace the state of an existing entry. Returns false when the word
    /// is not in this batch.
    pub fn set_state(&mut self, word: &str, state: EntryState) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|e| e.candidate.as_str() == word)
        {
            Some(entry) => {
                entry.state = state;
                true
            }
            None => false,
        }
    }

    /// Drop the entry for a word that has been persisted.
    pub fn remove(&mut self, word: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.candidate.as_str() != word);
        self.entries.len() != before
    }

    pub fn success_entries(&self) -> impl Iterator<Item = (&Candidate, &WordInfo)> {
        self.entries.iter().filter_map(|e| match &e.state {
            EntryState::Success(info) => Some((&e.candidate, info)),
            _ => None,
        })
    }

    pub fn error_entries(&self) -> impl Iterator<Item = (&Candidate, &str)> {
        self.entries.iter().filter_map(|e| match &e.state {
            EntryState::Error(message) => Some((&e.candidate, message.as_str())),
            _ => None,
        })
    }

    pub fn success_count(&self) -> usize {
        self.success_entries().count()
    }

    pub fn error_count(&self) -> usize {
        self.error_entries().count()
    }

    /// Entries that have reached a terminal state.
    pub fn completed(&self) -> usize {
        self.entries.iter().filter(|e| e.state.is_terminal()).count()
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
