//! Corpus-size-adaptive removal of non-discriminative terms.
//!
//! The fraction of documents a term may appear in shrinks as the corpus grows:
//! `threshold = 1 / sqrt(max(docs, min_docs) / min_docs)`, never below
//! `min_threshold`. A term whose document fraction (`1 / idf`) reaches the
//! threshold is dropped from the index.

use crate::config::{PRUNE_MIN_DOCS, PRUNE_MIN_THRESHOLD};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PruningPolicy {
    pub min_docs: usize,
    pub min_threshold: f64,
}

impl Default for PruningPolicy {
    fn default() -> Self {
        Self { min_docs: PRUNE_MIN_DOCS, min_threshold: PRUNE_MIN_THRESHOLD }
    }
}

impl PruningPolicy {
    /// A policy that keeps every term.
    pub fn disabled() -> Self {
        Self { min_docs: PRUNE_MIN_DOCS, min_threshold: f64::INFINITY }
    }

    /// Maximum document fraction a term may reach before it is pruned.
    pub fn threshold(&self, doc_count: usize) -> f64 {
        let min_docs = self.min_docs.max(1) as f64;
        let effective = (doc_count as f64).max(min_docs);
        (1.0 / (effective / min_docs).sqrt()).max(self.min_threshold)
    }

    pub fn should_prune(&self, idf: f64, doc_count: usize) -> bool {
        1.0 / idf >= self.threshold(doc_count)
    }
}
