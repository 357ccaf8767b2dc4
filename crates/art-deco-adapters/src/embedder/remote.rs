//! Remote Image Embedder - Vector generation over HTTP
//!
//! Posts base64 image bytes to an inference endpoint:
//!
//! - `POST {endpoint}/embeddings` with `{"model": ..., "input": <base64 image>}`
//! - `200` with `{"data": [{"embedding": [f32, ...]}]}`

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use art_deco::{Embedding, EmbeddingError, ImageEmbedder, ImageRef};

use super::DimensionGuard;
use crate::image_source::ImageLoader;

const DEFAULT_MODEL: &str = "clip-vit-base-patch32";

/// Embedder backed by a remote inference service
pub struct RemoteImageEmbedder {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    loader: ImageLoader,
    guard: DimensionGuard,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: String,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl RemoteImageEmbedder {
    /// Create a new embedder for the given endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(endpoint, Client::new())
    }

    /// Create a new embedder sharing an existing HTTP client
    pub fn with_client(endpoint: impl Into<String>, client: Client) -> Self {
        Self {
            loader: ImageLoader::with_client(client.clone()),
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            guard: DimensionGuard::default(),
        }
    }

    /// Overrides the model name if needed.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Reject any vector that is not exactly `dimensions` long
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.guard = DimensionGuard::fixed(dimensions);
        self
    }

    async fn request_embedding(&self, image_bytes: &[u8]) -> Result<Vec<f32>, EmbeddingError> {
        let request = EmbeddingRequest {
            model: &self.model,
            input: STANDARD.encode(image_bytes),
        };

        let mut builder = self
            .client
            .post(format!("{}/embeddings", self.endpoint))
            .json(&request);

        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| EmbeddingError::Model(format!("Inference request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Model(format!(
                "Inference API error ({status}): {body}"
            )));
        }

        let embedding_response: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::Model(format!("Failed to parse inference response: {e}")))?;

        embedding_response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| EmbeddingError::Model("No embedding returned".to_string()))
    }
}

#[async_trait]
impl ImageEmbedder for RemoteImageEmbedder {
    async fn embed(&self, image: &ImageRef) -> Result<Embedding, EmbeddingError> {
        let bytes = self.loader.load(image).await?;
        let vector = self.request_embedding(&bytes).await?;
        self.guard.check(&vector)?;

        tracing::debug!(
            model = %self.model,
            dimensions = vector.len(),
            "Remote embedding generated"
        );

        Ok(Embedding::from_vector(&vector))
    }
}
