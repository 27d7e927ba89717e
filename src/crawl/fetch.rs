// src/crawl/fetch.rs
// =============================================================================
// This module downloads index pages.
//
// Key functionality:
// - One shared reqwest Client for the whole crawl (connection pooling)
// - TLS certificate validation is OFF: open directories are very often
//   served with self-signed, expired or mismatched certificates
// - Any non-2xx response is a failure; there is no retry
// - Transport errors are sorted into FetchError variants for the report
// =============================================================================

use std::time::Duration;

use reqwest::Client;

use crate::error::FetchError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A cheap-to-clone handle on the shared HTTP client
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Builds the client; `timeout` of None means a request may hang forever
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder()
            .danger_accept_invalid_certs(true)
            .user_agent(USER_AGENT);

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Fetcher { client })
    }

    /// GETs `url` and returns the raw body
    pub async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await.map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        Ok(body.to_vec())
    }
}

// Sorts a reqwest error into the FetchError we report
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure or refused connection
// - Too many redirects
// - etc.
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else if error.is_body() || error.is_decode() {
        FetchError::Body(error.to_string())
    } else {
        FetchError::Request(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ListingServer;

    #[tokio::test]
    async fn test_get_returns_body() {
        let server = ListingServer::start(vec![("/", "<a href=\"a/\">a/</a>".to_string())]);
        let fetcher = Fetcher::new(Some(Duration::from_secs(5))).unwrap();

        let body = fetcher.get(&server.url("/")).await.unwrap();
        assert_eq!(body, b"<a href=\"a/\">a/</a>");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = ListingServer::start(Vec::new());
        let fetcher = Fetcher::new(Some(Duration::from_secs(5))).unwrap();

        let err = fetcher.get(&server.url("/missing/")).await.unwrap_err();
        assert_eq!(err, FetchError::Status(404));
    }

    #[tokio::test]
    async fn test_refused_connection_is_a_connect_error() {
        let fetcher = Fetcher::new(Some(Duration::from_secs(5))).unwrap();

        // Port 1 is reserved (tcpmux) and never listening on a test box
        let err = fetcher.get("http://127.0.0.1:1/").await.unwrap_err();
        assert!(matches!(err, FetchError::Connect(_)), "got {:?}", err);
    }
}
