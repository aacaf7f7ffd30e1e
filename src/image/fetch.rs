//! ImageFetcher - downloads image bytes over HTTP.

use std::time::Duration;

use super::ImageError;

/// Default timeout for HTTP requests (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout (10 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking HTTP client for image downloads. No retries are attempted.
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    http_client: reqwest::blocking::Client,
}

impl ImageFetcher {
    /// Create a fetcher with the default timeouts.
    pub fn new() -> Result<Self, ImageError> {
        Self::with_timeouts(DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    pub fn with_timeouts(timeout: Duration, connect_timeout: Duration) -> Result<Self, ImageError> {
        let http_client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self { http_client })
    }

    /// Download the body at `url`.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::Status` for non-success responses and
    /// `ImageError::Http` when the request itself fails.
    pub fn fetch(&self, url: &str) -> Result<Vec<u8>, ImageError> {
        log::debug!("Fetching image: {}", url);
        let response = self.http_client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Image request to {} failed with status {}", url, status);
            return Err(ImageError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes()?.to_vec())
    }
}
