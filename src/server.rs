//! JSON HTTP server over the catalog engine.
//!
//! A thin presentation adapter for browser frontends: the catalog is loaded
//! once at startup and shared read-only across handlers; every endpoint
//! calls the same pure library surface the CLI uses.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Version and pattern count |
//! | `GET`  | `/patterns` | Filtered catalog (`search`, `domain`, `complexity`, `maturity`) |
//! | `GET`  | `/patterns/{id}` | One pattern by id |
//! | `GET`  | `/domains` | Distinct domain facet values |
//! | `POST` | `/analyze` | Compatibility analysis for `{"ids": [...]}` |
//! | `POST` | `/export/json` | Structured stack export (download) |
//! | `POST` | `/export/html` | HTML stack export (download) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "unknown complexity: extreme" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404), `internal` (500).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so static frontends can
//! call the API directly.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::filter::{complexity_counts, filter, Complexity, FilterCriteria, Maturity};
use crate::models::Pattern;
use crate::{catalog, export, resolver};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    /// The catalog, loaded once at startup and never mutated.
    catalog: Arc<Vec<Pattern>>,
}

/// Start the HTTP server on the configured bind address.
///
/// Loads the catalog before binding; a load failure aborts startup rather
/// than serving an empty catalog.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let patterns = catalog::load(&config.catalog.path)?;
    let pattern_count = patterns.len();
    let bind_addr = config.server.bind.clone();

    let state = AppState {
        config: Arc::new(config.clone()),
        catalog: Arc::new(patterns),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/patterns", get(handle_patterns))
        .route("/patterns/{id}", get(handle_pattern))
        .route("/domains", get(handle_domains))
        .route("/analyze", post(handle_analyze))
        .route("/export/json", post(handle_export_json))
        .route("/export/html", post(handle_export_html))
        .layer(cors)
        .with_state(state);

    println!(
        "Catalog server listening on http://{} ({} patterns)",
        bind_addr, pattern_count
    );

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

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

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

// ============ Handlers ============

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    patterns: usize,
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        patterns: state.catalog.len(),
    })
}

#[derive(Deserialize, Default)]
struct PatternsQuery {
    search: Option<String>,
    /// Comma-separated list of domains.
    domain: Option<String>,
    complexity: Option<String>,
    maturity: Option<String>,
}

#[derive(Serialize)]
struct PatternsResponse {
    patterns: Vec<Pattern>,
    total: usize,
    complexity_counts: ComplexityCountsBody,
}

#[derive(Serialize)]
struct ComplexityCountsBody {
    low: usize,
    medium: usize,
    high: usize,
}

async fn handle_patterns(
    State(state): State<AppState>,
    Query(query): Query<PatternsQuery>,
) -> Result<Json<PatternsResponse>, AppError> {
    let criteria = criteria_from_query(&query)?;
    let view = filter(&state.catalog, &criteria);
    let counts = complexity_counts(&view);

    Ok(Json(PatternsResponse {
        total: view.len(),
        complexity_counts: ComplexityCountsBody {
            low: counts.low,
            medium: counts.medium,
            high: counts.high,
        },
        patterns: view.into_iter().cloned().collect(),
    }))
}

fn criteria_from_query(query: &PatternsQuery) -> Result<FilterCriteria, AppError> {
    let complexity = match query.complexity.as_deref() {
        None => None,
        Some(s) if s.eq_ignore_ascii_case("all") => None,
        Some(s) => Some(
            Complexity::from_str(s, true)
                .map_err(|_| bad_request(format!("unknown complexity: {}", s)))?,
        ),
    };

    let maturity = match query.maturity.as_deref() {
        None => None,
        Some(s) if s.eq_ignore_ascii_case("all") => None,
        Some(s) => Some(
            Maturity::from_str(s, true)
                .map_err(|_| bad_request(format!("unknown maturity: {}", s)))?,
        ),
    };

    let domains = query
        .domain
        .as_deref()
        .map(|d| {
            d.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(FilterCriteria {
        search: query.search.clone().unwrap_or_default(),
        domains,
        complexity,
        maturity,
    })
}

async fn handle_pattern(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Pattern>, AppError> {
    catalog::find(&state.catalog, &id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(format!("pattern not found: {}", id)))
}

#[derive(Serialize)]
struct DomainsResponse {
    domains: Vec<String>,
}

async fn handle_domains(State(state): State<AppState>) -> Json<DomainsResponse> {
    Json(DomainsResponse {
        domains: catalog::domains(&state.catalog),
    })
}

#[derive(Deserialize)]
struct SelectionBody {
    ids: Vec<String>,
}

#[derive(Serialize)]
struct AnalyzeResponse {
    compatible_pairs: Vec<String>,
    missing_prerequisites: Vec<String>,
    incompatibilities: Vec<String>,
    names: Vec<String>,
    components: Vec<String>,
    efforts: Vec<String>,
}

async fn handle_analyze(
    State(state): State<AppState>,
    Json(body): Json<SelectionBody>,
) -> Json<AnalyzeResponse> {
    let analysis = resolver::analyze(&body.ids, &state.catalog);
    let selected = select(&state.catalog, &body.ids);
    let summary = resolver::summarize(&selected);

    Json(AnalyzeResponse {
        compatible_pairs: analysis.compatible_pairs.into_iter().collect(),
        missing_prerequisites: analysis.missing_prerequisites.into_iter().collect(),
        incompatibilities: analysis.incompatibilities.into_iter().collect(),
        names: summary.names,
        components: summary.components,
        efforts: summary.efforts,
    })
}

async fn handle_export_json(
    State(state): State<AppState>,
    Json(body): Json<SelectionBody>,
) -> Result<Response, AppError> {
    let selected = select(&state.catalog, &body.ids);
    let content =
        export::to_stack_json(&selected).map_err(|e| internal(format!("export failed: {}", e)))?;
    Ok(download(
        content,
        "application/json",
        &state.config.export.json_filename,
    ))
}

async fn handle_export_html(
    State(state): State<AppState>,
    Json(body): Json<SelectionBody>,
) -> Response {
    let selected = select(&state.catalog, &body.ids);
    let content = export::to_stack_html(&selected);
    download(content, "text/html; charset=utf-8", &state.config.export.html_filename)
}

/// Resolve selected ids to pattern references, skipping unknown ids.
fn select<'a>(catalog: &'a [Pattern], ids: &[String]) -> Vec<&'a Pattern> {
    ids.iter()
        .filter_map(|id| catalog::find(catalog, id))
        .collect()
}

fn download(content: String, content_type: &str, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        content,
    )
        .into_response()
}
