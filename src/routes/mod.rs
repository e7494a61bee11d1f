//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the contact API, a health probe, and the built
//! single-page site. Any path that is not an API route or a file on disk
//! falls back to `index.html` so client-side routes resolve on reload.

pub mod contact;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// API routes plus static site hosting.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let site = ServeDir::new(&state.site_dir)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(state.site_dir.join("index.html")));

    Router::new()
        .route("/api/contact", post(contact::submit))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
        .fallback_service(site)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
