//! Loading documents from a directory of markdown or plain-text files.

use anyhow::{bail, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use time::macros::format_description;
use time::OffsetDateTime;
use walkdir::WalkDir;

use crate::config::{DEFAULT_EXTENSIONS, DEFAULT_PREVIEW_LEN};
use crate::document::{truncate_words, Document};

lazy_static! {
    static ref DATE_MARKER: Regex = Regex::new(r#"<p style="color:gray">(.*?)</p>"#).expect("valid regex");
    static ref DATE_WORD: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex");
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]*>").expect("valid regex");
    static ref MD_MARKUP: Regex = Regex::new(r"[#*_`>~|]+").expect("valid regex");
    static ref SPLIT_PUNCT: Regex = Regex::new(r"[\s.,;:!?()\[\]]+").expect("valid regex");
    static ref PUNCT: Regex = Regex::new(r"[^\p{L}\p{M}\p{N}\s-]").expect("valid regex");
}

/// Produces the corpus an index is built from.
pub trait DocumentSource {
    fn load(&self) -> Result<Vec<Document>>;
}

/// Reads every matching file under `root`, in file-name order.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    pub root: PathBuf,
    pub preview_len: usize,
    pub extensions: Vec<String>,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            preview_len: DEFAULT_PREVIEW_LEN,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn preview_len(mut self, len: usize) -> Self {
        self.preview_len = len;
        self
    }

    pub fn extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = exts.into_iter().map(Into::into).collect();
        self
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

impl DocumentSource for DirectorySource {
    fn load(&self) -> Result<Vec<Document>> {
        if !self.root.is_dir() {
            bail!("corpus directory {} does not exist", self.root.display());
        }
        let mut docs = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.with_context(|| format!("failed to walk {}", self.root.display()))?;
            let path = entry.path();
            if !entry.file_type().is_file() || !self.accepts(path) {
                continue;
            }
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let modified = entry.metadata().ok().and_then(|m| m.modified().ok());
            let rel = path.strip_prefix(&self.root).unwrap_or(path);
            let mut doc = parse_document(rel, &raw, modified, self.preview_len);
            doc.path = Some(path.display().to_string());
            docs.push(doc);
        }
        tracing::info!(root = %self.root.display(), num_docs = docs.len(), "loaded documents");
        Ok(docs)
    }
}

/// Turn one file's raw text into a [`Document`] named by its relative path.
///
/// Only markup and punctuation are removed from the content; case folding and
/// Unicode normalization belong to the index's [`Normalizer`](crate::Normalizer).
pub fn parse_document(rel: &Path, raw: &str, modified: Option<SystemTime>, preview_len: usize) -> Document {
    let name = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    let title = rel
        .file_stem()
        .map(|s| title_from_stem(&s.to_string_lossy()))
        .unwrap_or_default();

    let marked_date = DATE_MARKER
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty());
    let date = marked_date.or_else(|| modified.and_then(format_date));

    let text = DATE_MARKER.replace_all(raw, " ");
    let text = HTML_TAG.replace_all(&text, " ");
    let text = MD_MARKUP.replace_all(&text, "");

    let body = SPLIT_PUNCT.replace_all(&text, " ");
    let body = PUNCT.replace_all(&body, "");
    let body_words: Vec<&str> = body.split_whitespace().collect();

    let title_words: Vec<&str> = title.split_whitespace().collect();
    let content = title_words.iter().chain(body_words.iter()).copied().collect::<Vec<_>>().join(" ");

    let title_lower = title.to_lowercase();
    let title_lower_words: Vec<&str> = title_lower.split_whitespace().collect();
    let preview = preview_words(&text, &title_lower_words, preview_len);

    Document { name, title, path: None, date, content, length: body_words.len(), preview }
}

fn title_from_stem(stem: &str) -> String {
    let spaced = stem.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn format_date(t: SystemTime) -> Option<String> {
    OffsetDateTime::from(t).format(format_description!("[year]-[month]-[day]")).ok()
}

/// Leading body words, skipping a date stamp and a repeated title.
fn preview_words(text: &str, title_words: &[&str], max_len: usize) -> String {
    let mut words: Vec<&str> = text.split_whitespace().collect();
    if words.first().is_some_and(|w| DATE_WORD.is_match(w)) {
        words.remove(0);
    }
    let repeats_title = !title_words.is_empty()
        && words.len() >= title_words.len()
        && words.iter().zip(title_words).all(|(w, t)| w.to_lowercase() == *t);
    let skip = if repeats_title { title_words.len() } else { 0 };
    truncate_words(words.into_iter().skip(skip), max_len)
}
