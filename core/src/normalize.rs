//! Text normalization applied to document content and queries before tokenization.

use std::sync::Arc;
use unicode_normalization::UnicodeNormalization;

/// Converts raw text into the form the tokenizer expects.
///
/// The same normalizer must be used for indexing and querying, so an
/// [`Index`](crate::Index) owns the one it was built with.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, text: &str) -> String;

    /// Identifier recorded in `meta.json` so a saved index reloads with the
    /// same normalizer. Only the built-in normalizers resolve by name.
    fn name(&self) -> &str {
        "custom"
    }
}

/// Resolve a built-in normalizer from the name it reports.
pub fn by_name(name: &str) -> Option<Arc<dyn Normalizer>> {
    match name {
        "default" => Some(Arc::new(DefaultNormalizer)),
        "nfkc" => Some(Arc::new(NfkcNormalizer)),
        _ => None,
    }
}

impl<F> Normalizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn normalize(&self, text: &str) -> String {
        self(text)
    }
}

/// Lowercases and drops every character that is not a letter, digit or whitespace.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultNormalizer;

impl Normalizer for DefaultNormalizer {
    fn normalize(&self, text: &str) -> String {
        text.to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect()
    }

    fn name(&self) -> &str {
        "default"
    }
}

/// NFKC compatibility folding followed by [`DefaultNormalizer`].
///
/// Folds ligatures, full-width forms and similar variants onto their plain
/// equivalents, so "ﬁle" and "file" index to the same term.
#[derive(Debug, Default, Clone, Copy)]
pub struct NfkcNormalizer;

impl Normalizer for NfkcNormalizer {
    fn normalize(&self, text: &str) -> String {
        let folded: String = text.nfkc().collect();
        DefaultNormalizer.normalize(&folded)
    }

    fn name(&self) -> &str {
        "nfkc"
    }
}
