//! Fetch, re-encode and decode of one cover.

use std::sync::Arc;

use crate::{
    assets::decode::{RasterImage, decode_image, normalize_to_png},
    cover::fetch::{CoverError, CoverFetcher, normalize_cover_url},
};

/// Fetches covers and normalizes them to PNG before decoding.
#[derive(Clone)]
pub struct CoverPipeline {
    fetcher: Arc<dyn CoverFetcher>,
}

impl std::fmt::Debug for CoverPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoverPipeline").finish_non_exhaustive()
    }
}

impl CoverPipeline {
    /// Pipeline over `fetcher`.
    pub fn new(fetcher: Arc<dyn CoverFetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetch `url` once, re-encode it as PNG and decode it for drawing.
    pub fn fetch_and_normalize(&self, url: &str) -> Result<RasterImage, CoverError> {
        let url = normalize_cover_url(url);
        if url.is_empty() {
            return Err(CoverError::Fetch("cover link is empty".to_string()));
        }

        let bytes = self.fetcher.fetch(&url)?;
        tracing::debug!(%url, len = bytes.len(), "fetched cover");
        let png = normalize_to_png(&bytes).map_err(|e| CoverError::Decode(e.to_string()))?;
        decode_image(&png).map_err(|e| CoverError::Decode(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cover/pipeline.rs"]
mod tests;
