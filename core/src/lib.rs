//! N-gram TF-IDF retrieval engine.
//!
//! Documents are tokenized into unigrams, bigrams and trigrams, weighted by
//! length-normalized term frequency and inverse document frequency, and ranked
//! per query with a weighted geometric mean of per-term relevance signals.

pub mod config;
pub mod document;
pub mod index;
pub mod loader;
pub mod normalize;
pub mod persist;
pub mod prune;
pub mod score;
pub mod search;
pub mod tokenizer;
pub mod topk;

pub use document::{DocId, Document};
pub use index::{Index, IndexBuilder, TermEntry};
pub use loader::{DirectorySource, DocumentSource};
pub use normalize::{DefaultNormalizer, NfkcNormalizer, Normalizer};
pub use persist::{load_index, load_index_with, save_index, IndexFormat, IndexPaths, MetaFile};
pub use prune::PruningPolicy;
pub use search::SearchResult;
