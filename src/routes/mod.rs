//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the annotation REST endpoints, the CSRF cookie endpoint
//! and an optional static directory (where the host page, PDF.js and the
//! viewer's WASM bundle can be served from) under a single Axum router.


pub mod annotations;
pub mod csrf;

use std::path::Path;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, patch};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// API routes, plus `/static` when a directory is configured.
///
/// Annotation paths are routed with and without a trailing slash; the viewer
/// builds slash-terminated detail URLs.
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let collection = || get(annotations::list).post(annotations::create);
    let detail = || patch(annotations::update).delete(annotations::delete);

    let router = Router::new()
        .route("/api/documents/{document}/annotations", collection())
        .route("/api/documents/{document}/annotations/", collection())
        .route("/api/documents/{document}/annotations/{id}", detail())
        .route("/api/documents/{document}/annotations/{id}/", detail())
        .route("/api/csrf", get(csrf::issue))
        .route("/healthz", get(healthz))
        .with_state(state);

    let router = match static_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "serving static files at /static");
            router.nest_service("/static", ServeDir::new(dir))
        }
        None => router,
    };
    router.layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
