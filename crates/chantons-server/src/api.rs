use axum::{
    extract::{Path, Query, State},
    Json,
};
use chantons_model::{SearchResult, SongDetail};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::CatalogueError;
use crate::AppState;

/// Query parameters for `GET /chants`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Title fragment to search for. Missing or blank is a 400.
    pub query: Option<String>,
}

/// GET /chants?query=<title>
pub async fn search_songs(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchResult>>, CatalogueError> {
    let results = state.catalogue.search_songs(params.query.as_deref()).await?;
    Ok(Json(results))
}

/// GET /chant/:id
pub async fn get_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SongDetail>, CatalogueError> {
    let song = state.catalogue.get_song(&id).await?;
    Ok(Json(song))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "build": env!("BUILD_HASH"),
    }))
}
