// src/fetch/page.rs
// =============================================================================
// Fetching a page over HTTP.
//
// Steps:
// 1. Validate the address (must parse, must be http/https, must have a host)
// 2. GET it, following redirects
// 3. Anything but 200 OK is an error carrying the status code
// 4. Read the whole body as text
//
// Each failure maps onto one FetchError variant so the analyzer can word a
// message for it. Nothing here retries.
// =============================================================================

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::config::AnalyzerConfig;
use crate::error::FetchError;

/// Something that can turn an address into the page's markup
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, address: &str) -> Result<String, FetchError>;
}

/// Fetches pages with reqwest
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &AnalyzerConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, address: &str) -> Result<String, FetchError> {
        let url = validate_address(address)?;

        debug!("Fetching {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Unreachable(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(FetchError::UnexpectedStatus(response.status().as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::BodyRead(e.to_string()))?;

        debug!("Fetched {} bytes from {}", body.len(), address);
        Ok(body)
    }
}

// Checks that an address is something we can actually request
//
// Examples:
//   "https://example.com"  -> Ok
//   "example.com"          -> InvalidUrl (no scheme, so it doesn't parse)
//   "mailto:me@example.com" -> MissingSchemeOrHost (parses, but no host)
fn validate_address(address: &str) -> Result<Url, FetchError> {
    let url = Url::parse(address.trim()).map_err(|e| FetchError::InvalidUrl {
        address: address.to_string(),
        reason: e.to_string(),
    })?;

    let fetchable_scheme = matches!(url.scheme(), "http" | "https");
    if !fetchable_scheme || url.host_str().map_or(true, str::is_empty) {
        return Err(FetchError::MissingSchemeOrHost);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(&AnalyzerConfig::default()).unwrap()
    }

    #[test]
    fn test_validate_accepts_http_and_https() {
        assert!(validate_address("http://example.com").is_ok());
        assert!(validate_address("https://example.com/path?q=1").is_ok());
    }

    #[test]
    fn test_validate_rejects_unparseable() {
        let result = validate_address("example.com");
        assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
    }

    #[test]
    fn test_validate_rejects_missing_host() {
        let result = validate_address("mailto:someone@example.com");
        assert!(matches!(result, Err(FetchError::MissingSchemeOrHost)));
    }

    #[test]
    fn test_validate_rejects_other_schemes() {
        let result = validate_address("ftp://example.com/file");
        assert!(matches!(result, Err(FetchError::MissingSchemeOrHost)));
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Success!"))
            .mount(&server)
            .await;

        let body = fetcher().fetch(&server.uri()).await.unwrap();
        assert_eq!(body, "Success!");
    }

    #[tokio::test]
    async fn test_fetch_unexpected_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = fetcher().fetch(&server.uri()).await;
        assert!(matches!(result, Err(FetchError::UnexpectedStatus(404))));
    }

    #[tokio::test]
    async fn test_fetch_non_200_success_is_still_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let result = fetcher().fetch(&server.uri()).await;
        assert!(matches!(result, Err(FetchError::UnexpectedStatus(204))));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Nothing listens on port 1
        let result = fetcher().fetch("http://127.0.0.1:1/").await;
        assert!(matches!(result, Err(FetchError::Unreachable(_))));
    }

    #[tokio::test]
    async fn test_fetch_truncated_body() {
        // 200 OK and headers arrive, then the connection drops mid-body
        let address = crate::fetch::testing::truncated_body_server().await;

        let result = fetcher().fetch(&address).await;
        assert!(matches!(result, Err(FetchError::BodyRead(_))), "got {:?}", result);
    }
}
