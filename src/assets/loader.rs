//! Memoized loading of templates, icons and fonts from the asset directory.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use anyhow::Context;

use crate::{
    assets::decode::{RasterImage, decode_image},
    foundation::error::{BoardError, BoardResult},
};

/// Memoizing loader for background templates, icons and fonts under one root directory.
///
/// Entries are loaded on first use and kept for the lifetime of the loader. Lookups take a short
/// lock, so a loader can be shared by concurrent renders.
#[derive(Debug)]
pub struct AssetLoader {
    root: PathBuf,
    images: Mutex<HashMap<String, Arc<RasterImage>>>,
    fonts: Mutex<HashMap<String, Arc<Vec<u8>>>>,
    loads: Mutex<HashMap<String, u32>>,
}

impl AssetLoader {
    /// Create a loader resolving names relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            images: Mutex::new(HashMap::new()),
            fonts: Mutex::new(HashMap::new()),
            loads: Mutex::new(HashMap::new()),
        }
    }

    /// Root directory used when resolving asset names.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Decoded image for `name`, reading and decoding it on first request.
    pub fn image(&self, name: &str) -> BoardResult<Arc<RasterImage>> {
        let key = normalize_rel_path(name)?;
        if let Some(img) = lock(&self.images)?.get(&key) {
            return Ok(Arc::clone(img));
        }

        let bytes = self.read_bytes(&key)?;
        let img = Arc::new(decode_image(&bytes)?);
        self.record_load(&key)?;
        tracing::debug!(asset = %key, width = img.width, height = img.height, "decoded image asset");

        // Two renders may race to the first load; keep whichever landed first.
        let mut images = lock(&self.images)?;
        Ok(Arc::clone(images.entry(key).or_insert(img)))
    }

    /// Raw font bytes for `name`, read on first request.
    pub fn font(&self, name: &str) -> BoardResult<Arc<Vec<u8>>> {
        let key = normalize_rel_path(name)?;
        if let Some(bytes) = lock(&self.fonts)?.get(&key) {
            return Ok(Arc::clone(bytes));
        }

        let bytes = Arc::new(self.read_bytes(&key)?);
        self.record_load(&key)?;
        tracing::debug!(asset = %key, len = bytes.len(), "loaded font asset");

        let mut fonts = lock(&self.fonts)?;
        Ok(Arc::clone(fonts.entry(key).or_insert(bytes)))
    }

    /// Number of times `name` was read from disk.
    pub fn load_count(&self, name: &str) -> u32 {
        let Ok(key) = normalize_rel_path(name) else {
            return 0;
        };
        self.loads
            .lock()
            .map(|loads| loads.get(&key).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    fn record_load(&self, key: &str) -> BoardResult<()> {
        *lock(&self.loads)?.entry(key.to_string()).or_insert(0) += 1;
        Ok(())
    }

    fn read_bytes(&self, norm_path: &str) -> BoardResult<Vec<u8>> {
        let path = self.root.join(Path::new(norm_path));
        std::fs::read(&path)
            .with_context(|| format!("read asset bytes from '{}'", path.display()))
            .map_err(BoardError::from)
    }
}

fn lock<T>(m: &Mutex<T>) -> BoardResult<std::sync::MutexGuard<'_, T>> {
    m.lock()
        .map_err(|_| BoardError::asset("asset cache lock poisoned"))
}

/// Normalize and validate loader-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> BoardResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(BoardError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(BoardError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(BoardError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(BoardError::validation("asset path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
