//! External word-lookup backends

use super::LookupError;
use crate::config::AutocompleteSettings;
use crate::network::{FetchResponse, HttpClient};
use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

/// External word-lookup collaborator consulted on a local miss
///
/// No ordering, casing or deduplication is promised for the returned words.
#[async_trait]
pub trait WordLookup: Send + Sync {
    /// Backend name
    fn name(&self) -> &str;

    /// Fetch candidate words for a query
    async fn lookup(&self, query: &str) -> Result<Vec<String>, LookupError>;
}

const DUCKDUCKGO_ENDPOINT: &str = "https://duckduckgo.com/ac/";
const BRAVE_ENDPOINT: &str = "https://search.brave.com/api/suggest";

/// Resolve a backend by name or alias
pub fn get_backend(
    name: &str,
    client: HttpClient,
    settings: &AutocompleteSettings,
) -> Result<Arc<dyn WordLookup>, LookupError> {
    let base_url = settings.base_url.as_deref();

    let backend: Arc<dyn WordLookup> = match name.to_lowercase().as_str() {
        "wikipedia" | "wiki" => {
            let mut wiki = Wikipedia::new(client, &settings.language, settings.limit)?;
            if let Some(url) = base_url {
                wiki = wiki.with_endpoint(url)?;
            }
            Arc::new(wiki)
        }
        "duckduckgo" | "ddg" => {
            let mut ddg = DuckDuckGo::new(client)?;
            if let Some(url) = base_url {
                ddg = ddg.with_endpoint(url)?;
            }
            Arc::new(ddg)
        }
        "brave" => {
            let mut brave = Brave::new(client)?;
            if let Some(url) = base_url {
                brave = brave.with_endpoint(url)?;
            }
            Arc::new(brave)
        }
        _ => return Err(LookupError::UnknownBackend(name.to_string())),
    };

    Ok(backend)
}

/// List available backends
pub fn list_backends() -> Vec<&'static str> {
    vec!["wikipedia", "duckduckgo", "brave"]
}

/// Extract the suggestion list from an OpenSearch body: `[query, [words...], ...]`
pub fn parse_opensearch(response: &FetchResponse) -> Result<Vec<String>, LookupError> {
    if !response.is_success() {
        return Err(LookupError::Status(response.status));
    }

    let json: serde_json::Value = response.json()?;

    let words = json
        .as_array()
        .and_then(|arr| arr.get(1))
        .and_then(|v| v.as_array())
        .ok_or_else(|| LookupError::Parse("expected [query, [suggestions...]]".to_string()))?;

    Ok(words
        .iter()
        .filter_map(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(String::from)
        .collect())
}

/// Wikipedia OpenSearch backend
pub struct Wikipedia {
    client: HttpClient,
    endpoint: Url,
    limit: String,
}

impl Wikipedia {
    /// Backend for the language-specific Wikipedia
    pub fn new(client: HttpClient, lang: &str, limit: u32) -> Result<Self, LookupError> {
        let wiki_lang = lang
            .get(..2)
            .filter(|code| code.chars().all(|c| c.is_ascii_alphabetic()))
            .unwrap_or("en");
        let endpoint = Url::parse(&format!("https://{}.wikipedia.org/w/api.php", wiki_lang))?;

        Ok(Self {
            client,
            endpoint,
            limit: limit.to_string(),
        })
    }

    /// Point at a different MediaWiki API endpoint
    pub fn with_endpoint(mut self, url: &str) -> Result<Self, LookupError> {
        self.endpoint = Url::parse(url)?;
        Ok(self)
    }
}

#[async_trait]
impl WordLookup for Wikipedia {
    fn name(&self) -> &str {
        "wikipedia"
    }

    async fn lookup(&self, query: &str) -> Result<Vec<String>, LookupError> {
        let params = [
            ("action", "opensearch"),
            ("format", "json"),
            ("namespace", "0"),
            ("search", query),
            ("limit", self.limit.as_str()),
        ];

        let response = self
            .client
            .get_with_params(self.endpoint.as_str(), &params)
            .await?;

        parse_opensearch(&response)
    }
}

/// DuckDuckGo autocomplete backend
pub struct DuckDuckGo {
    client: HttpClient,
    endpoint: Url,
}

impl DuckDuckGo {
    pub fn new(client: HttpClient) -> Result<Self, LookupError> {
        Ok(Self {
            client,
            endpoint: Url::parse(DUCKDUCKGO_ENDPOINT)?,
        })
    }

    pub fn with_endpoint(mut self, url: &str) -> Result<Self, LookupError> {
        self.endpoint = Url::parse(url)?;
        Ok(self)
    }
}

#[async_trait]
impl WordLookup for DuckDuckGo {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn lookup(&self, query: &str) -> Result<Vec<String>, LookupError> {
        let params = [("q", query), ("type", "list")];

        let response = self
            .client
            .get_with_params(self.endpoint.as_str(), &params)
            .await?;

        parse_opensearch(&response)
    }
}

/// Brave autocomplete backend
pub struct Brave {
    client: HttpClient,
    endpoint: Url,
}

impl Brave {
    pub fn new(client: HttpClient) -> Result<Self, LookupError> {
        Ok(Self {
            client,
            endpoint: Url::parse(BRAVE_ENDPOINT)?,
        })
    }

    pub fn with_endpoint(mut self, url: &str) -> Result<Self, LookupError> {
        self.endpoint = Url::parse(url)?;
        Ok(self)
    }
}

#[async_trait]
impl WordLookup for Brave {
    fn name(&self) -> &str {
        "brave"
    }

    async fn lookup(&self, query: &str) -> Result<Vec<String>, LookupError> {
        let response = self
            .client
            .get_with_params(self.endpoint.as_str(), &[("q", query)])
            .await?;

        parse_opensearch(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn response(status: u16, text: &str) -> FetchResponse {
        FetchResponse {
            status,
            text: text.to_string(),
            url: "http://localhost/".to_string(),
        }
    }

    #[test]
    fn test_list_backends() {
        let backends = list_backends();
        assert!(backends.contains(&"wikipedia"));
        assert!(backends.contains(&"duckduckgo"));
        assert!(backends.contains(&"brave"));
    }

    #[test]
    fn test_get_backend() {
        let client = HttpClient::new().unwrap();
        let settings = AutocompleteSettings::default();

        assert_eq!(
            get_backend("wiki", client.clone(), &settings).unwrap().name(),
            "wikipedia"
        );
        assert_eq!(
            get_backend("DDG", client.clone(), &settings).unwrap().name(),
            "duckduckgo"
        );
        assert!(matches!(
            get_backend("unknown", client, &settings),
            Err(LookupError::UnknownBackend(_))
        ));
    }

    #[test]
    fn test_parse_opensearch() {
        let body = r#"["xyz", ["Xylophone", "XYZ Files", ""], ["", ""], ["u1", "u2"]]"#;
        let words = parse_opensearch(&response(200, body)).unwrap();
        assert_eq!(words, vec!["Xylophone", "XYZ Files"]);
    }

    #[test]
    fn test_parse_opensearch_errors() {
        assert!(matches!(
            parse_opensearch(&response(503, "")),
            Err(LookupError::Status(503))
        ));
        assert!(matches!(
            parse_opensearch(&response(200, "<html>")),
            Err(LookupError::Parse(_))
        ));
        assert!(matches!(
            parse_opensearch(&response(200, r#"{"items": []}"#)),
            Err(LookupError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_wikipedia_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("action", "opensearch"))
            .and(query_param("search", "xyz"))
            .and(query_param("limit", "10"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"["xyz", ["Xylophone"], [""], ["https://en.wikipedia.org/wiki/Xylophone"]]"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let wiki = Wikipedia::new(HttpClient::new().unwrap(), "en", 10)
            .unwrap()
            .with_endpoint(&format!("{}/w/api.php", server.uri()))
            .unwrap();

        let words = wiki.lookup("xyz").await.unwrap();
        assert_eq!(words, vec!["Xylophone"]);
    }

    #[tokio::test]
    async fn test_duckduckgo_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ac/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let ddg = DuckDuckGo::new(HttpClient::new().unwrap())
            .unwrap()
            .with_endpoint(&format!("{}/ac/", server.uri()))
            .unwrap();

        assert!(matches!(
            ddg.lookup("rust").await,
            Err(LookupError::Status(500))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let brave = Brave::new(HttpClient::new().unwrap())
            .unwrap()
            .with_endpoint("http://127.0.0.1:9/suggest")
            .unwrap();

        assert!(matches!(
            brave.lookup("rust").await,
            Err(LookupError::Network(_)) | Err(LookupError::Timeout)
        ));
    }

    #[test]
    fn test_wikipedia_language_fallback() {
        let client = HttpClient::new().unwrap();
        let de = Wikipedia::new(client.clone(), "de-DE", 10).unwrap();
        assert_eq!(de.endpoint.host_str(), Some("de.wikipedia.org"));

        let bad = Wikipedia::new(client, "?", 10).unwrap();
        assert_eq!(bad.endpoint.host_str(), Some("en.wikipedia.org"));
    }
}
