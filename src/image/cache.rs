//! ImageCache - flat on-disk cache for downloaded images.

use std::path::{Path, PathBuf};

use reqwest::Url;

use super::ImageError;

/// Flat directory of downloaded images, keyed by the last URL path segment.
#[derive(Debug, Clone)]
pub struct ImageCache {
    cache_dir: PathBuf,
}

impl ImageCache {
    /// Create an ImageCache with the given cache directory.
    /// Does not create the directory - call `ensure_dir_exists()` to create it.
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Create an ImageCache with the default cache directory.
    /// Default: ~/.cache/vto/images/ (or the platform equivalent)
    pub fn with_default_dir() -> Self {
        Self::new(default_dir())
    }

    /// Create an ImageCache with a custom directory and ensure it exists.
    pub fn new_initialized(cache_dir: PathBuf) -> Result<Self, std::io::Error> {
        let cache = Self::new(cache_dir);
        cache.ensure_dir_exists()?;
        Ok(cache)
    }

    /// Ensure the cache directory exists, creating it if necessary.
    pub fn ensure_dir_exists(&self) -> Result<(), std::io::Error> {
        std::fs::create_dir_all(&self.cache_dir)
    }

    /// Get the cache directory path.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// File name an image URL is cached under.
    ///
    /// Query strings and fragments are ignored. Fails when the URL has no
    /// usable last segment (e.g. ends with `/`).
    pub fn file_name_for(url: &str) -> Result<String, ImageError> {
        let segment = match Url::parse(url) {
            Ok(parsed) => parsed
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .map(str::to_string),
            Err(_) => url.rsplit('/').next().map(str::to_string),
        };

        match segment {
            Some(name) if !name.is_empty() && name != "." && name != ".." => Ok(name),
            _ => Err(ImageError::InvalidUrl(url.to_string())),
        }
    }

    /// Path an image URL maps to inside the cache.
    pub fn path_for(&self, url: &str) -> Result<PathBuf, ImageError> {
        Ok(self.cache_dir.join(Self::file_name_for(url)?))
    }

    /// Get the cached image for `url`, if present and non-empty.
    pub fn get(&self, url: &str) -> Option<PathBuf> {
        let path = self.path_for(url).ok()?;
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() && meta.len() > 0 => Some(path),
            _ => None,
        }
    }

    /// Store downloaded bytes for `url`, replacing any previous copy.
    pub fn store(&self, url: &str, bytes: &[u8]) -> Result<PathBuf, ImageError> {
        std::fs::create_dir_all(&self.cache_dir)?;
        let path = self.path_for(url)?;
        std::fs::write(&path, bytes)?;
        Ok(path)
    }

    /// List all cached images with their sizes, sorted by name.
    pub fn list_entries(&self) -> Result<Vec<CacheEntry>, std::io::Error> {
        let mut entries = Vec::new();

        if !self.cache_dir.exists() {
            return Ok(entries);
        }

        for entry in std::fs::read_dir(&self.cache_dir)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }

            entries.push(CacheEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                size_bytes: metadata.len(),
                path: entry.path(),
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(entries)
    }

    /// Get total size of all cached images in bytes.
    pub fn total_size_bytes(&self) -> Result<u64, std::io::Error> {
        Ok(self.list_entries()?.iter().map(|e| e.size_bytes).sum())
    }

    /// Remove a cached image by file name.
    /// Returns true if a file was removed, false if it didn't exist.
    pub fn remove(&self, name: &str) -> Result<bool, std::io::Error> {
        if name.contains(['/', '\\']) || name == ".." {
            return Ok(false);
        }
        let path = self.cache_dir.join(name);
        if path.is_file() {
            std::fs::remove_file(&path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Remove every cached image.
    /// Returns the number of files removed.
    pub fn clear_all(&self) -> Result<usize, std::io::Error> {
        let mut count = 0;
        for entry in self.list_entries()? {
            if std::fs::remove_file(&entry.path).is_ok() {
                count += 1;
            }
        }
        Ok(count)
    }
}

/// Default cache directory: `<cache dir>/vto/images`, falling back to the
/// system temp directory.
pub fn default_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("vto")
        .join("images")
}

/// Information about a cached image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// File name (last URL segment)
    pub name: String,
    /// Size of the file in bytes
    pub size_bytes: u64,
    /// Full path to the cached file
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_new_with_custom_dir() {
        let custom_path = PathBuf::from("/tmp/test-cache/vto");
        let cache = ImageCache::new(custom_path.clone());
        assert_eq!(cache.cache_dir(), custom_path);
    }

    #[test]
    fn test_default_dir_path_structure() {
        let cache = ImageCache::with_default_dir();
        let names: Vec<_> = cache
            .cache_dir()
            .components()
            .filter_map(|c| c.as_os_str().to_str().map(str::to_string))
            .collect();
        assert_eq!(&names[names.len() - 2..], ["vto", "images"]);
    }

    #[test]
    fn test_new_initialized_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let cache_path = temp_dir.path().join("nested").join("images");

        assert!(!cache_path.exists());
        let cache = ImageCache::new_initialized(cache_path.clone()).unwrap();

        assert!(cache_path.is_dir());
        assert_eq!(cache.cache_dir(), cache_path);
    }

    #[test]
    fn test_file_name_is_last_segment() {
        assert_eq!(
            ImageCache::file_name_for("https://example.com/a/b/cat.png").unwrap(),
            "cat.png"
        );
        assert_eq!(
            ImageCache::file_name_for("https://example.com/cat.png?size=2#top").unwrap(),
            "cat.png"
        );
    }

    #[test]
    fn test_file_name_for_plain_path() {
        assert_eq!(ImageCache::file_name_for("images/dog.jpg").unwrap(), "dog.jpg");
    }

    #[test]
    fn test_file_name_rejects_trailing_slash() {
        let err = ImageCache::file_name_for("https://example.com/dir/").unwrap_err();
        assert!(matches!(err, ImageError::InvalidUrl(_)));
    }

    #[test]
    fn test_get_miss_when_absent() {
        let temp_dir = TempDir::new().unwrap();
        let cache = ImageCache::new(temp_dir.path().to_path_buf());
        assert!(cache.get("https://example.com/cat.png").is_none());
    }

    #[test]
    fn test_get_miss_when_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let cache = ImageCache::new(temp_dir.path().to_path_buf());
        fs::write(temp_dir.path().join("cat.png"), b"").unwrap();
        assert!(cache.get("https://example.com/cat.png").is_none());
    }

    #[test]
    fn test_store_then_get_hit() {
        let temp_dir = TempDir::new().unwrap();
        let cache = ImageCache::new(temp_dir.path().join("images"));

        let stored = cache.store("https://example.com/x/cat.png", b"png").unwrap();
        assert_eq!(stored, temp_dir.path().join("images").join("cat.png"));
        assert_eq!(cache.get("https://other.org/cat.png"), Some(stored));
    }

    #[test]
    fn test_list_total_and_clear() {
        let temp_dir = TempDir::new().unwrap();
        let cache = ImageCache::new(temp_dir.path().to_path_buf());
        cache.store("https://example.com/b.png", b"bb").unwrap();
        cache.store("https://example.com/a.png", b"a").unwrap();

        let names: Vec<_> = cache
            .list_entries()
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["a.png", "b.png"]);
        assert_eq!(cache.total_size_bytes().unwrap(), 3);

        assert!(cache.remove("a.png").unwrap());
        assert!(!cache.remove("a.png").unwrap());
        assert_eq!(cache.clear_all().unwrap(), 1);
        assert!(cache.list_entries().unwrap().is_empty());
    }

    #[test]
    fn test_list_entries_missing_dir() {
        let cache = ImageCache::new(PathBuf::from("/nonexistent/vto/images"));
        assert!(cache.list_entries().unwrap().is_empty());
        assert_eq!(cache.clear_all().unwrap(), 0);
    }
}
