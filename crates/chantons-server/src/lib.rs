//! HTTP API over the chantonseneglise.fr song catalogue.
//!
//! - `GET /chants?query=<title>` searches by title
//! - `GET /chant/:id` returns a song with segmented lyrics
//! - `GET /health` reports liveness

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod service;

pub use error::CatalogueError;
pub use service::CatalogueService;

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalogue: Arc<CatalogueService>,
}

impl AppState {
    pub fn new(catalogue: CatalogueService) -> Self {
        Self {
            catalogue: Arc::new(catalogue),
        }
    }
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/chants", get(api::search_songs))
        .route("/chant/:id", get(api::get_song))
        .route("/health", get(api::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
