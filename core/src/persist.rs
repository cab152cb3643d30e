use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, create_dir_all, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;

use crate::config::INDEX_VERSION;
use crate::document::Document;
use crate::index::{Index, TermEntry};
use crate::normalize::{by_name, Normalizer};

const BROTLI_BUFFER: usize = 4096;
const BROTLI_QUALITY: u32 = 9;
const BROTLI_LGWIN: u32 = 22;

/// Encoding of the document and term files. `meta.json` is always JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexFormat {
    #[default]
    Bincode,
    Json,
    /// Brotli-compressed JSON.
    Brotli,
}

impl IndexFormat {
    fn extension(self) -> &'static str {
        match self {
            IndexFormat::Bincode => "bin",
            IndexFormat::Json => "json",
            IndexFormat::Brotli => "json.br",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaFile {
    pub version: u32,
    pub format: IndexFormat,
    pub num_docs: u32,
    pub num_terms: u32,
    pub created_at: String,
    /// Name reported by the normalizer the index was built with.
    #[serde(default = "default_normalizer")]
    pub normalizer: String,
}

fn default_normalizer() -> String { "default".to_string() }

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn meta(&self) -> PathBuf { self.root.join("meta.json") }
    pub fn docs(&self, format: IndexFormat) -> PathBuf { self.root.join(format!("docs.{}", format.extension())) }
    pub fn terms(&self, format: IndexFormat) -> PathBuf { self.root.join(format!("terms.{}", format.extension())) }
}

fn write_data<T: Serialize>(path: &Path, value: &T, format: IndexFormat) -> Result<()> {
    let f = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    match format {
        IndexFormat::Bincode => bincode::serialize_into(&mut w, value)?,
        IndexFormat::Json => serde_json::to_writer(&mut w, value)?,
        IndexFormat::Brotli => {
            let mut enc = brotli::CompressorWriter::new(&mut w, BROTLI_BUFFER, BROTLI_QUALITY, BROTLI_LGWIN);
            serde_json::to_writer(&mut enc, value)?;
            enc.flush()?;
        }
    }
    w.flush()?;
    Ok(())
}

fn read_data<T: DeserializeOwned>(path: &Path, format: IndexFormat) -> Result<T> {
    let f = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let r = BufReader::new(f);
    let value = match format {
        IndexFormat::Bincode => bincode::deserialize_from(r)
            .with_context(|| format!("failed to decode {}", path.display()))?,
        IndexFormat::Json => serde_json::from_reader(r)
            .with_context(|| format!("failed to decode {}", path.display()))?,
        IndexFormat::Brotli => serde_json::from_reader(brotli::Decompressor::new(r, BROTLI_BUFFER))
            .with_context(|| format!("failed to decode {}", path.display()))?,
    };
    Ok(value)
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let json = serde_json::to_string_pretty(meta)?;
    fs::write(paths.meta(), json).with_context(|| format!("failed to write {}", paths.meta().display()))?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let buf = fs::read_to_string(paths.meta())
        .with_context(|| format!("failed to read {}", paths.meta().display()))?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}

/// Write documents, term table and `meta.json` under `paths.root`.
pub fn save_index(paths: &IndexPaths, index: &Index, format: IndexFormat) -> Result<()> {
    create_dir_all(&paths.root)
        .with_context(|| format!("failed to create {}", paths.root.display()))?;
    write_data(&paths.docs(format), &index.docs, format)?;
    write_data(&paths.terms(format), &index.terms, format)?;
    let meta = MetaFile {
        version: INDEX_VERSION,
        format,
        num_docs: u32::try_from(index.doc_count())?,
        num_terms: u32::try_from(index.term_count())?,
        created_at: time::OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default(),
        normalizer: index.normalizer().name().to_string(),
    };
    save_meta(paths, &meta)?;
    tracing::info!(root = %paths.root.display(), ?format, num_docs = meta.num_docs, num_terms = meta.num_terms, "index saved");
    Ok(())
}

/// Read an index written by [`save_index`] with the normalizer named in `meta.json`.
///
/// Indexes built with a custom normalizer must be opened with [`load_index_with`].
pub fn load_index(paths: &IndexPaths) -> Result<Index> {
    let meta = load_meta(paths)?;
    let Some(normalizer) = by_name(&meta.normalizer) else {
        bail!("index was built with normalizer {:?}; open it with load_index_with", meta.normalizer);
    };
    read_index(paths, meta, normalizer)
}

/// Read an index written by [`save_index`], querying it through `normalizer`.
pub fn load_index_with(paths: &IndexPaths, normalizer: Arc<dyn Normalizer>) -> Result<Index> {
    let meta = load_meta(paths)?;
    read_index(paths, meta, normalizer)
}

fn read_index(paths: &IndexPaths, meta: MetaFile, normalizer: Arc<dyn Normalizer>) -> Result<Index> {
    if meta.version != INDEX_VERSION {
        bail!("unsupported index version {} (expected {})", meta.version, INDEX_VERSION);
    }
    let docs: Vec<Document> = read_data(&paths.docs(meta.format), meta.format)?;
    let terms: HashMap<String, TermEntry> = read_data(&paths.terms(meta.format), meta.format)?;
    validate(&docs, &terms)?;
    let index = Index::from_parts(docs, terms, normalizer);
    tracing::info!(
        root = %paths.root.display(),
        num_docs = index.doc_count(),
        num_terms = index.term_count(),
        normalizer = index.normalizer().name(),
        "index loaded"
    );
    Ok(index)
}

fn validate(docs: &[Document], terms: &HashMap<String, TermEntry>) -> Result<()> {
    for (term, entry) in terms {
        if !(entry.idf >= 1.0) {
            bail!("term {term:?} has invalid idf {}", entry.idf);
        }
        if let Some(&doc_id) = entry.tf.keys().find(|&&id| id as usize >= docs.len()) {
            bail!("term {term:?} references unknown document {doc_id}");
        }
    }
    Ok(())
}
