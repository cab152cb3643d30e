use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_PREVIEW_LEN;

/// Position of a document inside an [`Index`](crate::Index).
pub type DocId = u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier within a corpus, e.g. a path relative to the corpus root.
    pub name: String,
    pub title: String,
    /// Source location, if the document came from disk.
    pub path: Option<String>,
    pub date: Option<String>,
    /// Full text used for indexing.
    pub content: String,
    /// Word count used to normalize term frequencies. Zero-length documents are not indexed.
    pub length: usize,
    pub preview: String,
}

impl Document {
    /// Build an in-memory document; `length` is the whitespace word count of `content`.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let name = name.into();
        let content = content.into();
        let length = content.split_whitespace().count();
        let preview = truncate_words(content.split_whitespace(), DEFAULT_PREVIEW_LEN);
        Self { title: name.clone(), name, path: None, date: None, content, length, preview }
    }
}

/// Join words until roughly `max_len` characters, appending an ellipsis when cut short.
pub(crate) fn truncate_words<'a>(words: impl IntoIterator<Item = &'a str>, max_len: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;
    for word in words {
        let sep = usize::from(!out.is_empty());
        let wlen = word.chars().count();
        if used + sep + wlen > max_len {
            if out.is_empty() {
                out.extend(word.chars().take(max_len));
            }
            out.push_str("...");
            return out;
        }
        if sep == 1 {
            out.push(' ');
        }
        out.push_str(word);
        used += sep + wlen;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_counts_words() {
        let d = Document::new("a.txt", "the moral  law binds");
        assert_eq!(d.length, 4);
        assert_eq!(d.preview, "the moral law binds");
    }

    #[test]
    fn truncates_on_word_boundary() {
        let p = truncate_words("alpha beta gamma delta".split_whitespace(), 11);
        assert_eq!(p, "alpha beta...");
        let long = truncate_words(["abcdefghij"], 4);
        assert_eq!(long, "abcd...");
    }
}
