use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use lexis::config::{DEFAULT_LIMIT, MAX_LIMIT};
use lexis::persist::{load_index, IndexPaths};
use lexis::{DocId, Index};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { DEFAULT_LIMIT }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_ms: u128,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub name: String,
    pub title: String,
    pub score: f64,
    pub preview: String,
}

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<Index>,
}

/// Load the index under `index_dir` and build the router around it.
///
/// Queries go through the normalizer recorded in the index's `meta.json`.
pub fn build_app(index_dir: String) -> Result<Router> {
    let index = load_index(&IndexPaths::new(&index_dir))?;
    Ok(router(Arc::new(index)))
}

pub fn router(index: Arc<Index>) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .with_state(AppState { index })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let k = params.k.clamp(1, MAX_LIMIT);
    let (results, total_hits) = state.index.search_text_with_total(&params.q, k);

    let raw_terms: Vec<String> = params.q.split_whitespace().map(|s| s.to_string()).collect();
    let hits: Vec<SearchHit> = results
        .into_iter()
        .map(|r| SearchHit {
            doc_id: r.doc_id,
            name: r.document.name.clone(),
            title: r.document.title.clone(),
            score: r.score,
            preview: highlight_terms(&r.document.preview, &raw_terms),
        })
        .collect();

    let elapsed = start.elapsed();
    Json(SearchResponse {
        query: params.q,
        took_ms: elapsed.as_millis(),
        took_s: elapsed.as_secs_f64(),
        total_hits,
        results: hits,
    })
}

pub async fn doc_handler(
    State(state): State<AppState>,
    Path(doc_id): Path<DocId>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    match state.index.document(doc_id) {
        Some(doc) => Ok(Json(serde_json::json!({
            "doc_id": doc_id,
            "name": doc.name,
            "title": doc.title,
            "date": doc.date,
            "length": doc.length,
            "preview": doc.preview,
            "text": doc.content,
        }))),
        None => Err((StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": "not found" })))),
    }
}

/// Wrap case-insensitive occurrences of each query word in `<em>` tags.
fn highlight_terms(snippet: &str, terms: &[String]) -> String {
    let mut s = snippet.to_string();
    for t in terms {
        if t.trim().is_empty() { continue; }
        let Ok(pat) = regex::RegexBuilder::new(&regex::escape(t)).case_insensitive(true).build() else { continue };
        s = pat.replace_all(&s, |caps: &regex::Captures| format!("<em>{}</em>", &caps[0])).to_string();
    }
    s
}
