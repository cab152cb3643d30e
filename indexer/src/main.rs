use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use lexis::config::{DEFAULT_LIMIT, DEFAULT_PREVIEW_LEN};
use lexis::persist::{load_index, save_index, IndexFormat, IndexPaths};
use lexis::{DefaultNormalizer, DirectorySource, DocumentSource, Index, NfkcNormalizer, Normalizer};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build and query an n-gram TF-IDF index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from a directory of markdown/text files
    Build {
        /// Corpus directory
        #[arg(long)]
        input: String,
        /// Output index directory
        #[arg(long)]
        output: String,
        /// Encoding of the document and term files
        #[arg(long, value_enum, default_value_t = FormatArg::Bincode)]
        format: FormatArg,
        /// Approximate preview length in characters
        #[arg(long, default_value_t = DEFAULT_PREVIEW_LEN)]
        preview_len: usize,
        /// Apply Unicode NFKC folding before the default normalization (recorded in meta.json)
        #[arg(long, default_value_t = false)]
        nfkc: bool,
    },
    /// Search a built index
    Search {
        /// Index directory
        #[arg(long, default_value = "./index")]
        index: String,
        /// Maximum number of results
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
        /// Print results as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Query words
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Print index statistics
    Stats {
        #[arg(long, default_value = "./index")]
        index: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Bincode,
    Json,
    Brotli,
}

impl From<FormatArg> for IndexFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Bincode => IndexFormat::Bincode,
            FormatArg::Json => IndexFormat::Json,
            FormatArg::Brotli => IndexFormat::Brotli,
        }
    }
}

#[derive(Serialize)]
struct Hit<'a> {
    doc_id: u32,
    name: &'a str,
    title: &'a str,
    score: f64,
    preview: &'a str,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, format, preview_len, nfkc } => {
            build_index(&input, &output, format.into(), preview_len, nfkc)
        }
        Commands::Search { index, limit, json, words } => search(&index, &words, limit, json),
        Commands::Stats { index } => stats(&index),
    }
}

fn normalizer(nfkc: bool) -> Arc<dyn Normalizer> {
    if nfkc { Arc::new(NfkcNormalizer) } else { Arc::new(DefaultNormalizer) }
}

fn build_index(input: &str, output: &str, format: IndexFormat, preview_len: usize, nfkc: bool) -> Result<()> {
    let source = DirectorySource::new(input).preview_len(preview_len);
    let start = Instant::now();
    let docs = source.load()?;
    let index = Index::builder().shared_normalizer(normalizer(nfkc)).build(docs);
    let elapsed = start.elapsed();
    tracing::info!(elapsed_ms = elapsed.as_millis() as u64, input, "build finished");

    let paths = IndexPaths::new(output);
    save_index(&paths, &index, format)?;
    let size_kb = dir_size(&paths.root) as f64 / 1024.0;

    println!("Index built in {} milliseconds.", elapsed.as_millis());
    println!("The index is {size_kb:.0} KB on disk.\n");
    print_stats(&index);
    Ok(())
}

fn search(index_dir: &str, words: &[String], limit: usize, json: bool) -> Result<()> {
    let index = load_index(&IndexPaths::new(index_dir))?;
    let start = Instant::now();
    let (results, total) = index.search_with_total(words, limit);
    let elapsed = start.elapsed();

    if json {
        let hits: Vec<Hit> = results
            .iter()
            .map(|r| Hit {
                doc_id: r.doc_id,
                name: &r.document.name,
                title: &r.document.title,
                score: r.score,
                preview: &r.document.preview,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    println!("Search: {words:?}");
    for r in &results {
        println!("{:<40} (Score: {:.3})", r.document.name, r.score);
    }
    println!("\n{} of {total} matching documents shown.", results.len());
    println!("Search completed in {} microseconds.", elapsed.as_micros());
    Ok(())
}

fn stats(index_dir: &str) -> Result<()> {
    let index = load_index(&IndexPaths::new(index_dir))?;
    println!("Normalizer: {}", index.normalizer().name());
    print_stats(&index);
    Ok(())
}

fn print_stats(index: &Index) {
    println!("Documents: {}", index.doc_count());
    println!("Indexed ngrams: {}", index.term_count());
    println!("Total words in corpus: {}", index.total_words());
}

fn dir_size(root: &Path) -> u64 {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter_map(|e| e.metadata().ok())
        .filter(|m| m.is_file())
        .map(|m| m.len())
        .sum()
}
