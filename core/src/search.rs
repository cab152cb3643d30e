use ordered_float::OrderedFloat;
use std::collections::BTreeSet;

use crate::document::{DocId, Document};
use crate::index::Index;
use crate::score::score;
use crate::tokenizer::tokenize;
use crate::topk::{Ranked, TopK};

/// A ranked hit borrowing its document from the index.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<'a> {
    pub doc_id: DocId,
    pub document: &'a Document,
    pub score: f64,
}

impl Index {
    /// Normalize query words and expand them into the index's term space.
    pub fn query_terms<S: AsRef<str>>(&self, words: &[S]) -> Vec<String> {
        let joined = words.iter().map(|w| w.as_ref()).collect::<Vec<&str>>().join(" ");
        tokenize(&self.normalizer.normalize(&joined))
    }

    /// Documents containing at least one of the expanded query terms.
    pub fn candidates(&self, query_terms: &[String]) -> BTreeSet<DocId> {
        query_terms
            .iter()
            .filter_map(|t| self.terms.get(t))
            .flat_map(|entry| entry.tf.keys().copied())
            .collect()
    }

    /// Up to `limit` documents ordered by descending score, ties by name.
    ///
    /// Documents that match no expanded query term never appear.
    pub fn search<S: AsRef<str>>(&self, words: &[S], limit: usize) -> Vec<SearchResult<'_>> {
        self.search_with_total(words, limit).0
    }

    /// Like [`Index::search`], also returning how many documents scored above zero
    /// before the result list was cut to `limit`.
    pub fn search_with_total<S: AsRef<str>>(&self, words: &[S], limit: usize) -> (Vec<SearchResult<'_>>, usize) {
        if limit == 0 {
            return (Vec::new(), 0);
        }
        let query_terms = self.query_terms(words);
        let candidates = self.candidates(&query_terms);

        let mut total = 0;
        let mut top = TopK::new(limit);
        for doc_id in candidates {
            let s = score(self, &query_terms, doc_id);
            if s <= 0.0 {
                continue;
            }
            let Some(doc) = self.document(doc_id) else { continue };
            total += 1;
            top.push(Ranked { score: OrderedFloat(s), name: &doc.name, doc_id });
        }

        let results = top
            .into_sorted_vec()
            .into_iter()
            .filter_map(|r| {
                self.document(r.doc_id)
                    .map(|document| SearchResult { doc_id: r.doc_id, document, score: r.score.0 })
            })
            .collect();
        (results, total)
    }

    /// Split free text on whitespace and run [`Index::search`].
    pub fn search_text(&self, query: &str, limit: usize) -> Vec<SearchResult<'_>> {
        self.search_text_with_total(query, limit).0
    }

    pub fn search_text_with_total(&self, query: &str, limit: usize) -> (Vec<SearchResult<'_>>, usize) {
        let words: Vec<&str> = query.split_whitespace().collect();
        self.search_with_total(&words, limit)
    }
}
