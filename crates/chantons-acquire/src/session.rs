use scraper::Html;
use std::sync::{Arc, LazyLock};
use tokio::sync::Mutex;

use crate::config::CatalogueConfig;
use crate::error::AcquireError;
use crate::markup::{Extract, Field};
use crate::transport::{HttpTransport, Transport};

const TITLE_FIELD: &str = "catalogue_search[titre]";
const TOKEN_FIELD: &str = "catalogue_search[_token]";

static TOKEN: LazyLock<Field> = LazyLock::new(|| {
    Field::new(
        r#"input[name="catalogue_search[_token]"]"#,
        Extract::Attr("value"),
    )
});

/// A cookie-bearing session against the catalogue.
///
/// One session is shared by all callers. Token fetch and form submission
/// run under a lock so concurrent searches cannot interleave their
/// cookie and token updates; detail fetches are not serialized.
pub struct SessionClient {
    transport: Arc<dyn Transport>,
    config: CatalogueConfig,
    search_lock: Mutex<()>,
}

impl SessionClient {
    pub fn new(transport: Arc<dyn Transport>, config: CatalogueConfig) -> Self {
        Self {
            transport,
            config,
            search_lock: Mutex::new(()),
        }
    }

    /// Session over a real HTTP client built from `config`.
    pub fn connect(config: CatalogueConfig) -> Result<Self, AcquireError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::new(Arc::new(transport), config))
    }

    /// Run a title search and return the results page HTML.
    ///
    /// A fresh CSRF token is read from the search form on every call.
    /// A missing token is a protocol error and nothing is submitted.
    pub async fn search(&self, query: &str) -> Result<String, AcquireError> {
        let url = self.config.search_url();
        let _guard = self.search_lock.lock().await;

        let form_page = self.transport.get(&url).await?;
        let token = extract_token(&form_page)
            .ok_or_else(|| AcquireError::Protocol("token not found".to_string()))?;
        tracing::debug!(url = %url, "Acquired search token");

        let fields = [(TITLE_FIELD, query), (TOKEN_FIELD, token.as_str())];
        let results = self.transport.post_form(&url, &fields).await?;
        tracing::info!(query = %query, bytes = results.len(), "Submitted catalogue search");

        Ok(results)
    }

    /// Fetch the lyrics page for `id`.
    pub async fn fetch_detail(&self, id: &str) -> Result<String, AcquireError> {
        let url = self.config.detail_url(id)?;
        let page = self.transport.get(&url).await?;
        tracing::info!(id = %id, bytes = page.len(), "Fetched song detail");
        Ok(page)
    }
}

/// Read the search form's hidden CSRF token.
pub fn extract_token(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    TOKEN
        .first(document.root_element())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Get(String),
        Post(String, Vec<(String, String)>),
    }

    /// Replays canned bodies in order and records every request.
    struct ScriptedTransport {
        bodies: StdMutex<VecDeque<Result<String, AcquireError>>>,
        calls: StdMutex<Vec<Call>>,
    }

    impl ScriptedTransport {
        fn new(bodies: Vec<Result<String, AcquireError>>) -> Arc<Self> {
            Arc::new(Self {
                bodies: StdMutex::new(bodies.into()),
                calls: StdMutex::default(),
            })
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn next_body(&self) -> Result<String, AcquireError> {
            self.bodies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(String::new()))
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn get(&self, url: &str) -> Result<String, AcquireError> {
            self.calls.lock().unwrap().push(Call::Get(url.to_string()));
            self.next_body()
        }

        async fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<String, AcquireError> {
            let fields = fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            self.calls.lock().unwrap().push(Call::Post(url.to_string(), fields));
            self.next_body()
        }
    }

    const FORM_PAGE: &str = r#"
    <form name="catalogue_search" method="post">
      <input type="text" name="catalogue_search[titre]">
      <input type="hidden" name="catalogue_search[_token]" value="tok-123">
    </form>
    "#;

    fn config() -> CatalogueConfig {
        CatalogueConfig {
            base_url: "http://catalogue.test".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_search_replays_token() {
        let transport = ScriptedTransport::new(vec![
            Ok(FORM_PAGE.to_string()),
            Ok("<html>results</html>".to_string()),
        ]);
        let session = SessionClient::new(transport.clone(), config());

        let body = session.search("Peuple de Dieu").await.unwrap();
        assert_eq!(body, "<html>results</html>");

        let url = "http://catalogue.test/catalogue/recherche".to_string();
        assert_eq!(
            transport.calls(),
            vec![
                Call::Get(url.clone()),
                Call::Post(
                    url,
                    vec![
                        (TITLE_FIELD.to_string(), "Peuple de Dieu".to_string()),
                        (TOKEN_FIELD.to_string(), "tok-123".to_string()),
                    ]
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_token_is_protocol_error() {
        let transport = ScriptedTransport::new(vec![Ok("<form></form>".to_string())]);
        let session = SessionClient::new(transport.clone(), config());

        let err = session.search("x").await.unwrap_err();
        assert!(matches!(err, AcquireError::Protocol(_)));
        assert_eq!(transport.calls().len(), 1, "no POST after a missing token");
    }

    #[tokio::test]
    async fn test_token_fetched_on_every_search() {
        let transport = ScriptedTransport::new(vec![
            Ok(FORM_PAGE.to_string()),
            Ok(String::new()),
            Ok(FORM_PAGE.replace("tok-123", "tok-456")),
            Ok(String::new()),
        ]);
        let session = SessionClient::new(transport.clone(), config());

        session.search("a").await.unwrap();
        session.search("b").await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls.len(), 4);
        match &calls[3] {
            Call::Post(_, fields) => assert_eq!(fields[1].1, "tok-456"),
            other => panic!("expected POST, got {other:?}"),
        }
    }

    /// Hands out a new token on every form GET and yields at each await
    /// point, so unserialized searches would interleave.
    struct RotatingTokenTransport {
        issued: AtomicUsize,
        calls: StdMutex<Vec<Call>>,
    }

    #[async_trait]
    impl Transport for RotatingTokenTransport {
        async fn get(&self, url: &str) -> Result<String, AcquireError> {
            let n = self.issued.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            self.calls.lock().unwrap().push(Call::Get(url.to_string()));
            tokio::task::yield_now().await;
            Ok(FORM_PAGE.replace("tok-123", &format!("tok-{n}")))
        }

        async fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<String, AcquireError> {
            tokio::task::yield_now().await;
            let fields = fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            self.calls.lock().unwrap().push(Call::Post(url.to_string(), fields));
            tokio::task::yield_now().await;
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn test_concurrent_searches_do_not_interleave() {
        let transport = Arc::new(RotatingTokenTransport {
            issued: AtomicUsize::new(0),
            calls: StdMutex::default(),
        });
        let session = SessionClient::new(transport.clone(), config());

        let (a, b) = tokio::join!(session.search("a"), session.search("b"));
        a.unwrap();
        b.unwrap();

        let calls = transport.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 4);
        // Each POST replays the token issued by the GET just before it.
        for (n, pair) in calls.chunks(2).enumerate() {
            let (Call::Get(_), Call::Post(_, fields)) = (&pair[0], &pair[1]) else {
                panic!("expected GET then POST, got {pair:?}");
            };
            assert_eq!(fields[1].1, format!("tok-{n}"));
        }
    }

    #[tokio::test]
    async fn test_upstream_error_propagates() {
        let transport = ScriptedTransport::new(vec![Err(AcquireError::Upstream(
            "connection refused".to_string(),
        ))]);
        let session = SessionClient::new(transport, config());

        let err = session.search("x").await.unwrap_err();
        assert!(matches!(err, AcquireError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_fetch_detail_url() {
        let transport = ScriptedTransport::new(vec![Ok("<h1>Chant</h1>".to_string())]);
        let session = SessionClient::new(transport.clone(), config());

        let body = session.fetch_detail("4512").await.unwrap();
        assert_eq!(body, "<h1>Chant</h1>");
        assert_eq!(
            transport.calls(),
            vec![Call::Get("http://catalogue.test/voir-texte/4512".to_string())]
        );
    }

    #[test]
    fn test_extract_token() {
        assert_eq!(extract_token(FORM_PAGE).as_deref(), Some("tok-123"));
        assert_eq!(extract_token("<input name=\"other\" value=\"x\">"), None);
        assert_eq!(
            extract_token(r#"<input name="catalogue_search[_token]" value="">"#),
            None
        );
    }
}
