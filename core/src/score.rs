//! Per-document relevance scoring.
//!
//! Each expanded query term contributes `ln(tf_log_idf)` weighted by
//! `ln(idf)`, and the document score is the exponential of the weighted mean:
//! a weighted geometric mean of the per-term signals in which rarer terms
//! dominate. Only terms with a strictly positive signal take part.

use crate::document::DocId;
use crate::index::Index;

/// Score `doc` against already expanded query terms; 0.0 when no term matches.
pub fn score(index: &Index, query_terms: &[String], doc: DocId) -> f64 {
    let mut weighted = 0.0;
    let mut total = 0.0;
    for term in query_terms {
        let Some(entry) = index.term(term) else { continue };
        let signal = entry.tf_log_idf(doc);
        if signal > 0.0 {
            let weight = entry.idf.ln();
            weighted += weight * signal.ln();
            total += weight;
        }
    }
    if total > 0.0 {
        (weighted / total).exp()
    } else {
        0.0
    }
}
