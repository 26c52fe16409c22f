//! # Formbuilder Server
//!
//! HTTP surface over the document store, renderer and form capture.
//!
//! | Route | Purpose |
//! |---|---|
//! | `GET /api/components` | Registry schema for the editor UI |
//! | `GET /api/documents` | Stored keys |
//! | `GET/PUT/DELETE /api/documents/*key` | Load (new page when absent), replace, delete |
//! | `POST /api/forms` | Create a draft form keyed by a slug of its title |
//! | `GET/PUT /api/settings/*key` | Read or change `published` and `requireEmail` |
//! | `GET /api/issues/*key` | Advisory prop issues |
//! | `GET /p/*key` | Published HTML |
//! | `GET /canvas/*key` | Editor canvas HTML |
//! | `POST /f/*key` | Urlencoded form submission |
//! | `GET /api/submissions/*key` | Kept submissions |
//! | `GET /api/submission-count/*key` | Submissions received |
//! | `GET /api/stats` | Document, published and submission totals |
//!
//! The wildcard path maps to the storage key `"/" + path`. `/p` and `/f` answer 404 for
//! drafts exactly as for missing documents.

mod error;
mod handlers;
mod state;

use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub use error::ApiError;
pub use state::{AppState, SubmissionLog, DEFAULT_SUBMISSION_LIMIT};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/components", get(handlers::components))
        .route("/api/documents", get(handlers::list_documents))
        .route(
            "/api/documents/*key",
            get(handlers::get_document)
                .put(handlers::put_document)
                .delete(handlers::delete_document),
        )
        .route("/api/forms", post(handlers::create_form))
        .route(
            "/api/settings/*key",
            get(handlers::get_settings).put(handlers::put_settings),
        )
        .route("/api/issues/*key", get(handlers::document_issues))
        .route("/api/submissions/*key", get(handlers::list_submissions))
        .route("/api/submission-count/*key", get(handlers::submission_count))
        .route("/api/stats", get(handlers::stats))
        .route("/p/*key", get(handlers::public_page))
        .route("/canvas/*key", get(handlers::canvas_page))
        .route("/f/*key", post(handlers::submit_form))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until the process stops
pub async fn serve(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Formbuilder server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}
