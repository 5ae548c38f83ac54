use async_trait::async_trait;

use crate::config::CatalogueConfig;
use crate::error::AcquireError;

/// The HTTP operations the session needs from the outside world.
///
/// Implementations own the cookie state; every call may update it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET a page and return its body.
    async fn get(&self, url: &str) -> Result<String, AcquireError>;

    /// POST `fields` as `application/x-www-form-urlencoded` and return the body.
    async fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<String, AcquireError>;
}

/// reqwest-backed transport with a process-wide cookie jar.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &CatalogueConfig) -> Result<Self, AcquireError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String, AcquireError> {
        tracing::debug!(url = %url, "GET");
        let response = self.client.get(url).send().await?;
        read_body(response, url).await
    }

    async fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<String, AcquireError> {
        tracing::debug!(url = %url, fields = fields.len(), "POST form");
        let response = self.client.post(url).form(fields).send().await?;
        read_body(response, url).await
    }
}

async fn read_body(response: reqwest::Response, url: &str) -> Result<String, AcquireError> {
    let status = response.status();
    if !status.is_success() {
        return Err(AcquireError::Upstream(format!("HTTP {status} for {url}")));
    }

    let body = response.text().await?;
    tracing::debug!(url = %url, bytes = body.len(), "Received HTML");
    Ok(body)
}
