//! Image Loading
//!
//! Resolves an `ImageRef` into raw image bytes. Supported locators:
//!
//! - `http://` and `https://` URLs, fetched with reqwest
//! - `file://` URLs and plain filesystem paths
//! - `data:<mime>;base64,<payload>` inline images (in-memory handles)

use art_deco::{EmbeddingError, ImageRef};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;
use reqwest::{Client, Url};
use std::path::PathBuf;

/// Formats embedders accept
const SUPPORTED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::WebP,
    ImageFormat::Gif,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
];

/// Where an image reference points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Remote(Url),
    File(PathBuf),
    Inline(Vec<u8>),
}

impl ImageSource {
    /// Classify an image reference without touching the network or disk
    pub fn parse(image: &ImageRef) -> Result<Self, EmbeddingError> {
        let locator = image.as_str().trim();
        if locator.is_empty() {
            return Err(EmbeddingError::image_unavailable(locator, "empty image reference"));
        }

        if let Some(rest) = locator.strip_prefix("data:") {
            return parse_data_uri(locator, rest).map(Self::Inline);
        }

        if let Ok(url) = Url::parse(locator) {
            match url.scheme() {
                "http" | "https" => return Ok(Self::Remote(url)),
                "file" => {
                    return url
                        .to_file_path()
                        .map(Self::File)
                        .map_err(|_| EmbeddingError::image_unavailable(locator, "not a local file URL"));
                }
                // Single letters are Windows drive prefixes, not schemes
                scheme if scheme.len() > 1 => {
                    return Err(EmbeddingError::image_unavailable(
                        locator,
                        format!("unsupported scheme `{scheme}`"),
                    ));
                }
                _ => {}
            }
        }

        Ok(Self::File(PathBuf::from(locator)))
    }
}

fn parse_data_uri(locator: &str, rest: &str) -> Result<Vec<u8>, EmbeddingError> {
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| EmbeddingError::image_unavailable(locator, "data URI has no payload"))?;

    if !meta.ends_with(";base64") {
        return Err(EmbeddingError::image_unavailable(
            locator,
            "only base64 data URIs are supported",
        ));
    }

    STANDARD
        .decode(payload.as_bytes())
        .map_err(|e| EmbeddingError::image_unavailable(locator, e))
}

/// Check that the bytes are an image format embedders can read
pub fn check_format(bytes: &[u8]) -> Result<ImageFormat, EmbeddingError> {
    let format = image::guess_format(bytes)
        .map_err(|e| EmbeddingError::UnsupportedFormat(e.to_string()))?;

    if SUPPORTED_FORMATS.contains(&format) {
        Ok(format)
    } else {
        Err(EmbeddingError::UnsupportedFormat(format!("{format:?}")))
    }
}

/// Loads image bytes for embedders
#[derive(Clone, Default)]
pub struct ImageLoader {
    client: Client,
}

impl ImageLoader {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Resolve the reference and return bytes in a supported format
    pub async fn load(&self, image: &ImageRef) -> Result<Vec<u8>, EmbeddingError> {
        let bytes = match ImageSource::parse(image)? {
            ImageSource::Remote(url) => self.fetch(image, url).await?,
            ImageSource::File(path) => tokio::fs::read(&path)
                .await
                .map_err(|e| EmbeddingError::image_unavailable(image.as_str(), e))?,
            ImageSource::Inline(bytes) => bytes,
        };

        let format = check_format(&bytes)?;
        tracing::debug!(bytes = bytes.len(), ?format, "Image loaded");

        Ok(bytes)
    }

    async fn fetch(&self, image: &ImageRef, url: Url) -> Result<Vec<u8>, EmbeddingError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| EmbeddingError::image_unavailable(image.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EmbeddingError::image_unavailable(
                image.as_str(),
                format!("HTTP {status}"),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| EmbeddingError::image_unavailable(image.as_str(), e))?;

        Ok(bytes.to_vec())
    }
}
