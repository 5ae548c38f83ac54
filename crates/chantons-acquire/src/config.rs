use reqwest::Url;
use std::time::Duration;

use crate::error::AcquireError;

pub const DEFAULT_BASE_URL: &str = "https://www.chantonseneglise.fr";
pub const DEFAULT_USER_AGENT: &str = "chantons/0.1 (church song catalogue tool)";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the catalogue lives and how to talk to it.
#[derive(Debug, Clone)]
pub struct CatalogueConfig {
    /// Scheme and host, without a trailing slash.
    pub base_url: String,
    pub user_agent: String,
    /// Deadline applied to every upstream request.
    pub timeout: Duration,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl CatalogueConfig {
    /// Search form page; the same URL accepts the form POST.
    pub fn search_url(&self) -> String {
        format!("{}/catalogue/recherche", self.base())
    }

    /// Lyrics page for one song.
    ///
    /// `id` is not validated but always stays a single path segment:
    /// `/`, `?` and `#` are percent-encoded.
    pub fn detail_url(&self, id: &str) -> Result<String, AcquireError> {
        let invalid = || AcquireError::Upstream(format!("invalid catalogue URL: {}", self.base_url));

        let mut url = Url::parse(self.base()).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .push("voir-texte")
            .push(id);

        Ok(url.into())
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
