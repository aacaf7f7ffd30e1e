//! Integration tests for the NetImage + ImageCache flow.
//!
//! Covers:
//! - first load downloads and stores the image under its URL file name
//! - with caching enabled a second load is a cache hit (no request)
//! - with caching disabled every load downloads again
//! - HTTP failures surface as errors

use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vto::image::{ImageCache, ImageError, ImageFetcher, InlineImageSource, NetImage};

const IMAGE_BYTES: &[u8] = b"fake-png-content-for-testing";

/// Test helper: mock server serving one image.
async fn setup_image_server() -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/img/cat.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(IMAGE_BYTES.to_vec())
                .insert_header("content-type", "image/png"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/img/missing.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    mock_server
}

async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or(0)
}

/// The blocking client must live outside the async runtime's threads.
async fn blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking task panicked")
}

#[tokio::test]
async fn test_cache_hit_skips_download() {
    let server = setup_image_server().await;
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let cache_dir = temp_dir.path().join("images");
    let url = format!("{}/img/cat.png", server.uri());

    let (first, second) = blocking({
        let cache_dir = cache_dir.clone();
        let url = url.clone();
        move || {
            let fetcher = ImageFetcher::new().expect("Failed to create fetcher");
            let images = NetImage::new(ImageCache::new(cache_dir), fetcher).use_cache(true);
            let first = images.load(&url).expect("first load");
            let second = images.load(&url).expect("second load");
            (first, second)
        }
    })
    .await;

    assert_eq!(first, cache_dir.join("cat.png"));
    assert_eq!(first, second);
    assert_eq!(std::fs::read(&first).unwrap(), IMAGE_BYTES);
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_disabled_cache_always_downloads() {
    let server = setup_image_server().await;
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let cache_dir = temp_dir.path().to_path_buf();
    let url = format!("{}/img/cat.png", server.uri());

    blocking(move || {
        let fetcher = ImageFetcher::new().expect("Failed to create fetcher");
        let images = NetImage::new(ImageCache::new(cache_dir), fetcher).use_cache(false);
        images.load(&url).expect("first load");
        images.load(&url).expect("second load");
    })
    .await;

    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn test_preexisting_cache_file_is_used() {
    let server = setup_image_server().await;
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    std::fs::write(temp_dir.path().join("cat.png"), b"cached").unwrap();
    let cache_dir = temp_dir.path().to_path_buf();
    let url = format!("{}/img/cat.png", server.uri());

    let sequence = blocking(move || {
        let fetcher = ImageFetcher::new().expect("Failed to create fetcher");
        let images = NetImage::new(ImageCache::new(cache_dir), fetcher)
            .use_cache(true)
            .height(3);
        images.inline(&url).expect("inline")
    })
    .await;

    // base64("cached") == "Y2FjaGVk"
    assert!(sequence.contains(";inline=1;height=3:Y2FjaGVk"));
    assert!(sequence.starts_with("\x1b]1337;File=name="));
    assert!(sequence.ends_with('\x07'));
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_http_error_is_reported() {
    let server = setup_image_server().await;
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let cache_dir = temp_dir.path().to_path_buf();
    let url = format!("{}/img/missing.png", server.uri());

    let result = blocking(move || {
        let fetcher = ImageFetcher::new().expect("Failed to create fetcher");
        NetImage::new(ImageCache::new(cache_dir), fetcher).load(&url)
    })
    .await;

    match result {
        Err(ImageError::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected status error, got {:?}", other),
    }
    assert!(!temp_dir.path().join("missing.png").exists());
}
