//! Cover URL normalization and HTTP retrieval.

use std::time::Duration;

/// Failure retrieving or decoding one cover.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CoverError {
    /// Network or HTTP-level failure.
    #[error("fetch failed: {0}")]
    Fetch(String),
    /// Bytes were retrieved but are not a supported raster.
    #[error("decode failed: {0}")]
    Decode(String),
}

/// Source of raw cover bytes.
///
/// Implementations make exactly one attempt per call; retry policy belongs to the caller.
pub trait CoverFetcher: Send + Sync {
    /// Retrieve the bytes behind `url`.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, CoverError>;
}

/// Blocking HTTP fetcher backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpCoverFetcher {
    client: reqwest::blocking::Client,
}

impl HttpCoverFetcher {
    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

    /// Build a fetcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, CoverError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("bingo-board/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CoverError::Fetch(format!("build http client: {e}")))?;
        Ok(Self { client })
    }
}

impl CoverFetcher for HttpCoverFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, CoverError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| CoverError::Fetch(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoverError::Fetch(format!("http status {status}")));
        }
        let bytes = resp
            .bytes()
            .map_err(|e| CoverError::Fetch(format!("read body: {e}")))?;
        Ok(bytes.to_vec())
    }
}

/// Canonicalize a cover URL before fetching.
///
/// Protocol-relative links (`//host/path`) become `https://`, and IGDB thumbnail sizes are swapped
/// for the full cover size.
pub fn normalize_cover_url(url: &str) -> String {
    let url = url.trim();
    let url = match url.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => url.to_string(),
    };
    if url.contains("images.igdb.com") {
        url.replace("t_thumb", "t_cover_big")
    } else {
        url
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cover/fetch.rs"]
mod tests;
