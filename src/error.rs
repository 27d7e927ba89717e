// src/error.rs
// =============================================================================
// Error types for a crawl.
//
// There are exactly two ways a directory node can fail:
// - FetchError: the GET itself failed (network, timeout, non-2xx, body read)
// - ParseError: we got bytes back but could not scan them for anchors
//
// Both are wrapped in CrawlError together with the URL of the node that
// failed. The walker decides what a failure means: fatal at the root, logged
// and skipped everywhere else.
// =============================================================================

use thiserror::Error;

/// Why a GET against an index page failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("could not read body: {0}")]
    Body(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("could not build HTTP client: {0}")]
    Client(String),
}

/// Why a fetched body could not be scanned for anchors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("body is binary, not an HTML document")]
    Binary,
    #[error("invalid anchor selector: {0}")]
    Selector(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrawlError {
    #[error("error getting index {url}: {cause}")]
    Fetch { url: String, cause: FetchError },
    #[error("error parsing index {url}: {cause}")]
    Parse { url: String, cause: ParseError },
}

impl CrawlError {
    pub fn fetch(url: &str, cause: FetchError) -> Self {
        CrawlError::Fetch {
            url: url.to_string(),
            cause,
        }
    }

    pub fn parse(url: &str, cause: ParseError) -> Self {
        CrawlError::Parse {
            url: url.to_string(),
            cause,
        }
    }

    /// The index URL whose fetch or parse failed
    pub fn url(&self) -> &str {
        match self {
            CrawlError::Fetch { url, .. } | CrawlError::Parse { url, .. } => url,
        }
    }
}
