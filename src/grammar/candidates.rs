use indexmap::{IndexMap, IndexSet};
use std::hash::Hash;

/// Result of a candidate collection pass.
///
/// `tokens` maps each possible next token to the follow-on tokens that must
/// come right after it (for example `GROUP` to `[BY]`). `rules` holds the
/// preferred rules the caret was found in. Both keep discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet<K: Hash + Eq, R: Hash + Eq> {
    pub tokens: IndexMap<K, Vec<K>>,
    pub rules: IndexSet<R>,
}

impl<K: Hash + Eq, R: Hash + Eq> CandidateSet<K, R> {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.rules.is_empty()
    }
}

impl<K: Hash + Eq, R: Hash + Eq> Default for CandidateSet<K, R> {
    fn default() -> Self {
        Self {
            tokens: IndexMap::new(),
            rules: IndexSet::new(),
        }
    }
}
