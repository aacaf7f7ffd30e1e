//! Inline terminal images.
//!
//! Images are fetched over HTTP, kept in a flat on-disk cache and printed with
//! the iTerm2 inline image protocol.

mod cache;
mod fetch;
mod protocol;
mod render;

pub use cache::{default_dir, CacheEntry, ImageCache};
pub use fetch::{ImageFetcher, DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT};
pub use protocol::{escape_sequence, inline_base64, inline_bytes, inline_path, DEFAULT_IMAGE_HEIGHT};
pub use render::{InlineImageSource, NetImage};

/// Errors that can occur while loading or rendering an image.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot derive a cache file name from '{0}'")]
    InvalidUrl(String),
}
