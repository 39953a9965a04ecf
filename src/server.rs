//! Portfolio HTTP server.
//!
//! Serves the site pages and the embeddings proxy from one axum router.
//! The projects routes invoke the content loader synchronously at render
//! time; the proxy is an independent request/response endpoint.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Home page |
//! | `GET`  | `/projects` | Project listing from the content directory |
//! | `GET`  | `/projects/{slug}` | Single project page |
//! | `GET`  | `/case-studies` | Static shell page |
//! | `GET`  | `/about` | Static shell page |
//! | `POST` | `/api/embeddings` | Embeddings proxy |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! All error responses share one schema:
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "texts must be an array of strings" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404),
//! `embeddings_disabled` (400), `timeout` (408), `provider_error` (502),
//! `internal` (500).
//!
//! # Proxy Semantics
//!
//! `POST /api/embeddings` takes `{ "texts": [...] }` and responds
//! `{ "embeddings": [[...], ...] }`, one vector per input text, in input
//! order. Per-text provider calls run concurrently and are joined before
//! responding; any single failure fails the whole request with no partial
//! results. An empty `texts` array yields an empty `embeddings` array.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so browser-based pages
//! can call the embeddings endpoint directly.

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use futures::future::try_join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::content::{self, Document};
use crate::embedding::{create_provider, EmbeddingProvider};
use crate::render;

/// Shared application state passed to all route handlers via Axum's `State`
/// extractor.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration (wrapped in `Arc` for cheap cloning across handlers).
    config: Arc<Config>,
    /// Embedding provider, constructed once at startup.
    provider: Arc<dyn EmbeddingProvider>,
}

impl AppState {
    pub fn new(config: Arc<Config>, provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { config, provider }
    }
}

/// Starts the portfolio HTTP server.
///
/// Builds the embedding provider from configuration, binds to the address
/// in `[server].bind`, and runs until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let provider = create_provider(&config.embedding)?;
    run_server_with_provider(config, provider).await
}

/// Like [`run_server`], but with an injected embedding provider.
///
/// Tests use this to substitute a stub provider for the real API client.
pub async fn run_server_with_provider(
    config: &Config,
    provider: Arc<dyn EmbeddingProvider>,
) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let app = build_router(AppState::new(Arc::new(config.clone()), provider));

    tracing::info!("portfolio server listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the site router with CORS and request tracing layers.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_home))
        .route("/projects", get(handle_projects))
        .route("/projects/{slug}", get(handle_project))
        .route("/case-studies", get(handle_case_studies))
        .route("/about", get(handle_about))
        .route("/api/embeddings", post(handle_embeddings))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

/// Inner error detail with a machine-readable code and human-readable message.
#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

/// Constructs a 400 Bad Request error.
fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

/// Constructs a 404 Not Found error.
fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

/// Constructs a 400 error for proxy calls made with no provider configured.
fn embeddings_disabled(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "embeddings_disabled".to_string(),
        message: message.into(),
    }
}

/// Constructs a 408 Request Timeout error.
fn timeout_error(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::REQUEST_TIMEOUT,
        code: "timeout".to_string(),
        message: message.into(),
    }
}

/// Constructs a 502 error for upstream provider failures.
fn provider_error(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_GATEWAY,
        code: "provider_error".to_string(),
        message: message.into(),
    }
}

/// Constructs a 500 error for internal failures (e.g. a broken content
/// directory, which is fatal for the page render).
fn internal_error(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

// ============ Page handlers ============

fn page(state: &AppState, title: &str, content: &str) -> Html<String> {
    Html(render::render_shell(
        &state.config.site,
        title,
        content,
        render::current_year(),
    ))
}

async fn handle_home(State(state): State<AppState>) -> Html<String> {
    let fragment = render::render_home(&state.config.site);
    page(&state, "Home", &fragment)
}

/// Handler for `GET /projects`.
///
/// Scans the content directory at request time. Any file-system or parse
/// error fails the whole render; no partial listing is produced.
async fn handle_projects(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let documents = load_documents(&state)?;
    let fragment = render::render_projects(&documents);
    Ok(page(&state, "Projects", &fragment))
}

/// Handler for `GET /projects/{slug}`.
async fn handle_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, AppError> {
    let documents = load_documents(&state)?;
    let document = documents
        .iter()
        .find(|d| d.slug == slug)
        .ok_or_else(|| not_found(format!("no project with slug: {}", slug)))?;

    let fragment = render::render_project(document);
    Ok(page(&state, &document.title, &fragment))
}

async fn handle_case_studies(State(state): State<AppState>) -> Html<String> {
    page(&state, "Case Studies", &render::render_case_studies())
}

async fn handle_about(State(state): State<AppState>) -> Html<String> {
    let fragment = render::render_about(&state.config.site);
    page(&state, "About", &fragment)
}

fn load_documents(state: &AppState) -> Result<Vec<Document>, AppError> {
    content::scan_content(&state.config.content).map_err(|e| {
        tracing::error!("content load failed: {:#}", e);
        internal_error(format!("content load failed: {:#}", e))
    })
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    /// Always `"ok"` when the server is running.
    status: String,
    /// The crate version from `Cargo.toml`.
    version: String,
}

/// Handler for `GET /health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ POST /api/embeddings ============

/// JSON response body for `POST /api/embeddings`.
#[derive(Serialize)]
struct EmbedResponse {
    /// One vector per input text, in input order.
    embeddings: Vec<Vec<f32>>,
}

/// Handler for `POST /api/embeddings`.
///
/// Validates the request shape explicitly, fans out one provider call per
/// text, and joins them all before responding. All-or-nothing: a single
/// provider failure fails the batch with a 502 and no partial results.
async fn handle_embeddings(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<EmbedResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| bad_request(format!("invalid JSON body: {}", e)))?;
    let texts = parse_embed_request(&payload).map_err(bad_request)?;

    if !state.config.embedding.is_enabled() {
        return Err(embeddings_disabled(
            "no embedding provider is configured; set embedding.provider in the config",
        ));
    }

    let overall = Duration::from_secs(state.config.embedding.request_timeout_secs);
    let provider = &state.provider;
    let fanout = try_join_all(texts.iter().map(|text| provider.embed(text)));

    let embeddings = match tokio::time::timeout(overall, fanout).await {
        Err(_) => return Err(timeout_error("embedding request timed out")),
        Ok(Err(e)) => return Err(provider_error(format!("provider call failed: {:#}", e))),
        Ok(Ok(vectors)) => vectors,
    };

    Ok(Json(EmbedResponse { embeddings }))
}

/// Validate the proxy request body: an object with a `texts` field holding
/// an array of strings. Anything else is a client error, not a crash.
fn parse_embed_request(payload: &serde_json::Value) -> Result<Vec<String>, String> {
    let texts = payload
        .get("texts")
        .ok_or_else(|| "missing required field: texts".to_string())?;

    let items = texts
        .as_array()
        .ok_or_else(|| "texts must be an array of strings".to_string())?;

    items
        .iter()
        .map(|value| {
            value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| "texts must contain only strings".to_string())
        })
        .collect()
}
