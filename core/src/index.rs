use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::document::{DocId, Document};
use crate::normalize::{DefaultNormalizer, Normalizer};
use crate::prune::PruningPolicy;
use crate::tokenizer::tokenize;

/// Statistics for one unigram, bigram or trigram.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermEntry {
    /// Total documents / documents containing the term; always >= 1.
    pub idf: f64,
    /// Per-document term frequency, normalized by document length.
    pub tf: BTreeMap<DocId, f64>,
    /// L2 norm of `ln(idf) * tf` over the documents containing the term.
    #[serde(skip)]
    norm: f64,
}

impl TermEntry {
    pub fn new(idf: f64, tf: BTreeMap<DocId, f64>) -> Self {
        let mut entry = Self { idf, tf, norm: 0.0 };
        entry.refresh_norm();
        entry
    }

    pub fn tf(&self, doc: DocId) -> f64 {
        self.tf.get(&doc).copied().unwrap_or(0.0)
    }

    /// Normalization factor for this term's scores; 1.0 when the raw norm is zero.
    pub fn norm(&self) -> f64 {
        if self.norm == 0.0 { 1.0 } else { self.norm }
    }

    /// Length-normalized, IDF-weighted relevance of this term for `doc`.
    pub fn tf_log_idf(&self, doc: DocId) -> f64 {
        self.tf(doc) * self.idf.ln() / self.norm()
    }

    pub(crate) fn refresh_norm(&mut self) {
        let log_idf = self.idf.ln();
        self.norm = self
            .tf
            .values()
            .map(|tf| {
                let w = log_idf * tf;
                w * w
            })
            .sum::<f64>()
            .sqrt();
    }
}

/// An immutable term index over a fixed set of documents.
///
/// Build it once with [`Index::build`] or [`IndexBuilder`]; share it across
/// threads behind an `Arc` for concurrent searches.
pub struct Index {
    pub(crate) docs: Vec<Document>,
    pub(crate) terms: HashMap<String, TermEntry>,
    pub(crate) normalizer: Arc<dyn Normalizer>,
}

impl fmt::Debug for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Index")
            .field("docs", &self.docs.len())
            .field("terms", &self.terms.len())
            .finish()
    }
}

impl Index {
    /// Build with the default normalizer and pruning policy.
    pub fn build(documents: Vec<Document>) -> Self {
        IndexBuilder::new().build(documents)
    }

    pub fn builder() -> IndexBuilder {
        IndexBuilder::new()
    }

    /// Reassemble an index from previously built parts, recomputing cached norms.
    pub(crate) fn from_parts(
        docs: Vec<Document>,
        mut terms: HashMap<String, TermEntry>,
        normalizer: Arc<dyn Normalizer>,
    ) -> Self {
        for entry in terms.values_mut() {
            entry.refresh_norm();
        }
        Self { docs, terms, normalizer }
    }

    pub fn doc_count(&self) -> usize {
        self.docs.len()
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Sum of the word counts of all indexed documents.
    pub fn total_words(&self) -> usize {
        self.docs.iter().map(|d| d.length).sum()
    }

    pub fn documents(&self) -> &[Document] {
        &self.docs
    }

    pub fn document(&self, id: DocId) -> Option<&Document> {
        self.docs.get(id as usize)
    }

    pub fn terms(&self) -> &HashMap<String, TermEntry> {
        &self.terms
    }

    pub fn term(&self, term: &str) -> Option<&TermEntry> {
        self.terms.get(term)
    }

    /// IDF of `term`, or the neutral 1.0 for terms the index does not know.
    pub fn idf(&self, term: &str) -> f64 {
        self.terms.get(term).map_or(1.0, |e| e.idf)
    }

    pub fn tf(&self, term: &str, doc: DocId) -> f64 {
        self.terms.get(term).map_or(0.0, |e| e.tf(doc))
    }

    pub fn tf_norm(&self, term: &str) -> f64 {
        self.terms.get(term).map_or(1.0, TermEntry::norm)
    }

    pub fn tf_log_idf(&self, term: &str, doc: DocId) -> f64 {
        self.terms.get(term).map_or(0.0, |e| e.tf_log_idf(doc))
    }

    pub fn normalizer(&self) -> &dyn Normalizer {
        self.normalizer.as_ref()
    }
}

/// Configures how an [`Index`] is built.
pub struct IndexBuilder {
    normalizer: Arc<dyn Normalizer>,
    pruning: PruningPolicy,
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self { normalizer: Arc::new(DefaultNormalizer), pruning: PruningPolicy::default() }
    }
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalizer(mut self, normalizer: impl Normalizer + 'static) -> Self {
        self.normalizer = Arc::new(normalizer);
        self
    }

    pub fn shared_normalizer(mut self, normalizer: Arc<dyn Normalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn pruning(mut self, policy: PruningPolicy) -> Self {
        self.pruning = policy;
        self
    }

    pub fn build(self, documents: Vec<Document>) -> Index {
        let docs = admit(documents);
        let n = docs.len();

        let mut terms: HashMap<String, TermEntry> = HashMap::new();
        for (doc_id, doc) in docs.iter().enumerate() {
            let doc_id = doc_id as DocId;
            let inc = 1.0 / doc.length as f64;
            for term in tokenize(&self.normalizer.normalize(&doc.content)) {
                *terms.entry(term).or_default().tf.entry(doc_id).or_insert(0.0) += inc;
            }
        }
        let ingested = terms.len();

        let policy = self.pruning;
        terms.retain(|_, entry| {
            entry.idf = n as f64 / entry.tf.len() as f64;
            !policy.should_prune(entry.idf, n)
        });
        for entry in terms.values_mut() {
            entry.refresh_norm();
        }

        tracing::info!(
            num_docs = n,
            num_terms = terms.len(),
            pruned = ingested - terms.len(),
            "index built"
        );
        Index { docs, terms, normalizer: self.normalizer }
    }
}

/// Drop documents that cannot be indexed: empty ones and repeated names.
fn admit(documents: Vec<Document>) -> Vec<Document> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut docs = Vec::with_capacity(documents.len());
    for doc in documents {
        if doc.length == 0 {
            tracing::debug!(name = %doc.name, "skipping empty document");
            continue;
        }
        if !seen.insert(doc.name.clone()) {
            tracing::warn!(name = %doc.name, "skipping document with duplicate name");
            continue;
        }
        docs.push(doc);
    }
    docs
}
