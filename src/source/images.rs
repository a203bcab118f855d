use crate::config::Timeouts;
use crate::error::ExportError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use reqwest::blocking::Client;

/// A downloaded recipe image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    /// Raw image bytes as served
    pub bytes: Vec<u8>,
    /// Standard base64 encoding of `bytes`
    pub encoded: String,
}

impl FetchedImage {
    pub fn new(bytes: Vec<u8>) -> Self {
        let encoded = STANDARD.encode(&bytes);
        FetchedImage { bytes, encoded }
    }
}

/// Downloads recipe thumbnails.
///
/// Uses its own client so the API token is never sent to the image host.
pub struct ImageFetcher {
    client: Client,
}

impl ImageFetcher {
    pub fn new(timeouts: Timeouts) -> Result<Self, ExportError> {
        let client = Client::builder()
            .timeout(timeouts.request)
            .connect_timeout(timeouts.connect)
            .pool_idle_timeout(timeouts.idle)
            .build()
            .map_err(|e| ExportError::network("create image client", e))?;

        Ok(ImageFetcher { client })
    }

    /// Fetch an image and encode it for embedding. No retries.
    pub fn fetch(&self, url: &str) -> Result<FetchedImage, ExportError> {
        debug!("Fetching image {}", url);
        let operation = || format!("fetch image `{}`", url);

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| ExportError::network(operation(), e))?;
        let bytes = response
            .bytes()
            .map_err(|e| ExportError::network(operation(), e))?;

        Ok(FetchedImage::new(bytes.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[test]
    fn test_fetch_encodes_image() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/img/pad-thai.jpg")
            .with_status(200)
            .with_header("content-type", "image/jpeg")
            .with_body([0xFF, 0xD8, 0xFF, 0xE0])
            .create();

        let fetcher = ImageFetcher::new(Timeouts::default()).unwrap();
        let image = fetcher
            .fetch(&format!("{}/img/pad-thai.jpg", server.url()))
            .unwrap();

        assert_eq!(image.bytes, vec![0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(image.encoded, "/9j/4A==");
        mock.assert();
    }

    #[test]
    fn test_fetch_fails_on_error_status() {
        let mut server = Server::new();
        let mock = server.mock("GET", "/missing.png").with_status(404).create();

        let fetcher = ImageFetcher::new(Timeouts::default()).unwrap();
        let result = fetcher.fetch(&format!("{}/missing.png", server.url()));

        match result {
            Err(ExportError::Network { operation, .. }) => {
                assert!(operation.contains("/missing.png"));
            }
            other => panic!("expected network error, got {:?}", other),
        }
        mock.assert();
    }

    #[test]
    fn test_fetch_fails_on_invalid_url() {
        let fetcher = ImageFetcher::new(Timeouts::default()).unwrap();
        assert!(fetcher.fetch("not a url").is_err());
    }
}
