//! HTTP retrieval of the rates page through a CORS-style relay proxy.
//!
//! The proxy is queried as `<proxy>?url=<encoded target>` and answers with a
//! JSON envelope whose `contents` field carries the relayed page HTML.

use std::time::Duration;

use serde::Deserialize;

use crate::error::FetchError;

/// Default rates page.
pub const DEFAULT_TARGET_URL: &str = "https://www.goodreturns.in/gold-rates/chennai.html";

/// Default relay proxy endpoint.
pub const DEFAULT_PROXY_URL: &str = "https://api.allorigins.win/get";

/// Response envelope returned by the relay proxy.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    contents: Option<String>,
}

/// Builds the proxy request URL for `target`.
///
/// ```
/// let url = gold_rates::proxy_request_url("https://proxy.test/get", "https://a.test/x?y=1");
/// assert_eq!(url, "https://proxy.test/get?url=https%3A%2F%2Fa.test%2Fx%3Fy%3D1");
/// ```
pub fn proxy_request_url(proxy: &str, target: &str) -> String {
    format!("{}?url={}", proxy, urlencoding::encode(target))
}

/// Extracts the relayed HTML from a proxy response body.
///
/// A missing, null or empty `contents` field is [`FetchError::NoContent`].
pub fn decode_envelope(body: &str) -> Result<String, FetchError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| FetchError::Envelope(e.to_string()))?;
    match envelope.contents {
        Some(html) if !html.is_empty() => Ok(html),
        _ => Err(FetchError::NoContent),
    }
}

/// Async client for the relayed rates page.
#[derive(Debug, Clone)]
pub struct GoldClient {
    http: reqwest::Client,
    proxy_url: String,
    target_url: String,
}

impl GoldClient {
    /// Creates a client with a per-request timeout.
    pub fn new(
        proxy_url: impl Into<String>,
        target_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self {
            http,
            proxy_url: proxy_url.into(),
            target_url: target_url.into(),
        })
    }

    /// Full URL that [`fetch_page`](Self::fetch_page) requests.
    pub fn request_url(&self) -> String {
        proxy_request_url(&self.proxy_url, &self.target_url)
    }

    /// Fetches the rates page HTML through the proxy.
    pub async fn fetch_page(&self) -> Result<String, FetchError> {
        let response = self
            .http
            .get(self.request_url())
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        decode_envelope(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        assert_eq!(
            DEFAULT_TARGET_URL,
            "https://www.goodreturns.in/gold-rates/chennai.html"
        );
        assert_eq!(DEFAULT_PROXY_URL, "https://api.allorigins.win/get");
    }

    #[test]
    fn test_proxy_request_url_encodes_target() {
        let url = proxy_request_url(DEFAULT_PROXY_URL, DEFAULT_TARGET_URL);
        assert_eq!(
            url,
            "https://api.allorigins.win/get?url=https%3A%2F%2Fwww.goodreturns.in%2Fgold-rates%2Fchennai.html"
        );
    }

    #[test]
    fn test_decode_envelope_returns_contents() {
        let body = r#"{"contents":"<table></table>","status":{"http_code":200}}"#;
        assert_eq!(decode_envelope(body).expect("valid"), "<table></table>");
    }

    #[test]
    fn test_decode_envelope_missing_contents() {
        assert!(matches!(
            decode_envelope(r#"{"status":{}}"#),
            Err(FetchError::NoContent)
        ));
        assert!(matches!(
            decode_envelope(r#"{"contents":null}"#),
            Err(FetchError::NoContent)
        ));
        assert!(matches!(
            decode_envelope(r#"{"contents":""}"#),
            Err(FetchError::NoContent)
        ));
    }

    #[test]
    fn test_decode_envelope_rejects_non_json() {
        assert!(matches!(
            decode_envelope("<html>rate limited</html>"),
            Err(FetchError::Envelope(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_proxy_is_network_error() {
        let client = GoldClient::new(
            "http://127.0.0.1:9/get",
            DEFAULT_TARGET_URL,
            Duration::from_millis(500),
        )
        .expect("client should build");
        let err = client.fetch_page().await.expect_err("port 9 is closed");
        assert!(matches!(err, FetchError::Network(_)), "got {err:?}");
    }
}
