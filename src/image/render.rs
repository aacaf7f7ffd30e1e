//! Network images rendered inline, going through the on-disk cache.

use std::path::{Path, PathBuf};

use super::cache::ImageCache;
use super::fetch::ImageFetcher;
use super::protocol::{inline_path, DEFAULT_IMAGE_HEIGHT};
use super::ImageError;

/// Something that can turn an image reference into an inline escape sequence.
pub trait InlineImageSource {
    /// Terminal rows each image occupies. Zero disables images.
    fn rows(&self) -> u16;

    /// Escape sequence for the image behind `reference`.
    fn inline(&self, reference: &str) -> Result<String, ImageError>;
}

/// Renders images from URLs, downloading them into an [`ImageCache`].
#[derive(Debug, Clone)]
pub struct NetImage {
    cache: ImageCache,
    fetcher: ImageFetcher,
    height: u16,
    use_cache: bool,
}

impl NetImage {
    pub fn new(cache: ImageCache, fetcher: ImageFetcher) -> Self {
        Self {
            cache,
            fetcher,
            height: DEFAULT_IMAGE_HEIGHT,
            use_cache: false,
        }
    }

    pub fn height(mut self, height: u16) -> Self {
        self.height = height;
        self
    }

    /// Reuse a cached download instead of fetching again.
    pub fn use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    pub fn cache(&self) -> &ImageCache {
        &self.cache
    }

    /// Make sure the image behind `url` is on disk and return its path.
    ///
    /// With caching disabled the image is downloaded every time, overwriting
    /// the cached copy.
    pub fn load(&self, url: &str) -> Result<PathBuf, ImageError> {
        if self.use_cache {
            if let Some(path) = self.cache.get(url) {
                log::debug!("Image cache hit: {}", path.display());
                return Ok(path);
            }
        }

        let bytes = self.fetcher.fetch(url)?;
        self.cache.store(url, &bytes)
    }

    /// Escape sequence for an image already on disk.
    pub fn inline_file(&self, path: &Path) -> Result<String, ImageError> {
        Ok(inline_path(path, self.height)?)
    }
}

impl InlineImageSource for NetImage {
    fn rows(&self) -> u16 {
        self.height
    }

    fn inline(&self, reference: &str) -> Result<String, ImageError> {
        let path = self.load(reference)?;
        self.inline_file(&path)
    }
}
