use chantons_acquire::{detail, results, SessionClient};
use chantons_model::{SearchResult, SongDetail};

use crate::error::CatalogueError;

/// Search and lyrics retrieval on top of one catalogue session.
pub struct CatalogueService {
    session: SessionClient,
}

impl CatalogueService {
    pub fn new(session: SessionClient) -> Self {
        Self { session }
    }

    /// Search the catalogue by title. Zero matches is an empty list.
    pub async fn search_songs(&self, query: Option<&str>) -> Result<Vec<SearchResult>, CatalogueError> {
        let query = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| CatalogueError::Validation("query param required".to_string()))?;

        let page = self.session.search(query).await?;
        let found = results::extract_results(&page);
        tracing::info!(query = %query, results = found.len(), "Catalogue search complete");

        Ok(found)
    }

    /// Fetch one song and segment its lyrics.
    pub async fn get_song(&self, id: &str) -> Result<SongDetail, CatalogueError> {
        let page = self.session.fetch_detail(id).await?;
        let detail = detail::extract_detail(&page);
        let lyrics = chantons_parse::segment(&detail.lyrics_text);

        tracing::info!(
            id = %id,
            name = %detail.name,
            couplets = lyrics.couplets.len(),
            has_refrain = !lyrics.refrain.is_empty(),
            "Song retrieved"
        );

        Ok(SongDetail {
            id: id.to_string(),
            name: detail.name,
            lyrics,
            attribution: detail.attribution,
        })
    }
}
