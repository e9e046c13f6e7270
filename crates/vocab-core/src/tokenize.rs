use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;

/// A normalized word awaiting enrichment.
///
/// Invariant: NFKC-normalized, lower-cased, trimmed, non-empty. Original
/// casing is not preserved; the folded form is both the dedup key and the
/// stored value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate(String);

impl Candidate {
    /// Fold a raw token into its canonical form. `None` when nothing is
    /// left after trimming.
    pub fn new(raw: &str) -> Option<Self> {
        let folded: String = raw.trim().nfkc().collect::<String>().to_lowercase();

        if folded.is_empty() {
            None
        } else {
            Some(Self(folded))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split raw input into an ordered, duplicate-free candidate list.
///
/// Splits on whitespace runs, drops empty segments, dedups on the folded
/// form keeping the first occurrence. Does not enforce any maximum count;
/// that check belongs to the caller so an oversized batch is refused
/// visibly rather than truncated.
pub fn tokenize(raw: &str) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for token in raw.split_whitespace() {
        let Some(candidate) = Candidate::new(token) else {
            continue;
        };

        if seen.insert(candidate.clone()) {
            candidates.push(candidate);
        }
    }

    candidates
}
