//! Compile-time defaults for indexing, pruning and retrieval.
//!
//! Runtime knobs (input/output paths, result limits, index format) are CLI
//! flags on the `indexer` and `server` binaries.

/// Largest n-gram length produced by the tokenizer.
pub const MAX_NGRAM: usize = 3;

/// Corpus sizes below this are treated as this many documents when pruning,
/// so tiny corpora only lose terms that appear everywhere.
pub const PRUNE_MIN_DOCS: usize = 10;

/// Lower bound on the pruning threshold (fraction of documents containing a term).
pub const PRUNE_MIN_THRESHOLD: f64 = 0.05;

/// Number of results returned when the caller does not ask for a limit.
pub const DEFAULT_LIMIT: usize = 10;

/// Upper bound on the result limit accepted by the HTTP service.
pub const MAX_LIMIT: usize = 100;

/// Approximate number of characters kept in a document preview.
pub const DEFAULT_PREVIEW_LEN: usize = 200;

/// File extensions picked up by the directory document source.
pub const DEFAULT_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// On-disk index layout version written to `meta.json`.
pub const INDEX_VERSION: u32 = 1;
