use anyhow::Result;
use clap::Parser;
use lexis::persist::{load_index, IndexPaths};
use server::router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(about = "Serve an on-disk lexis index over HTTP")]
struct Args {
    /// Directory written by `indexer build`
    #[arg(long, default_value = "./index")]
    index: String,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let index = load_index(&IndexPaths::new(&args.index))?;
    tracing::info!(
        index = %args.index,
        normalizer = index.normalizer().name(),
        num_docs = index.doc_count(),
        num_terms = index.term_count(),
        "index ready"
    );
    let app = router(Arc::new(index));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
