//! REST Artwork Store
//!
//! Talks to the artwork backend over HTTP:
//!
//! - `GET {endpoint}/items/{id}`: one record, `404` when absent
//! - `POST {endpoint}/items/search` with form field `embedding`: ranked records
//! - `GET {endpoint}/items/{id}/embedding`: the stored embedding as a JSON string

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, Response, StatusCode};
use serde_json::Value;

use art_deco::{Artwork, ArtworkStore, Embedding, StoreError};

use super::WireSchema;

/// Artwork store backed by the REST API
#[derive(Clone)]
pub struct RestArtworkStore {
    client: Client,
    endpoint: String,
    schema: WireSchema,
}

impl RestArtworkStore {
    /// Create an instance with the given endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(endpoint, Client::new())
    }

    /// Create an instance sharing an existing HTTP client
    pub fn with_client(endpoint: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            schema: WireSchema::default(),
        }
    }

    pub fn with_schema(mut self, schema: WireSchema) -> Self {
        self.schema = schema;
        self
    }

    fn item_url(&self, id: &str) -> Result<String, StoreError> {
        if id.is_empty() {
            return Err(StoreError::InvalidRequest("artwork id is empty".to_string()));
        }
        Ok(format!("{}/items/{}", self.endpoint, urlencoding::encode(id)))
    }

    async fn invoke_get(&self, url: &str) -> Result<Response, StoreError> {
        self.client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))
    }

    async fn invoke_post(&self, url: &str, embedding: &Embedding) -> Result<Response, StoreError> {
        self.client
            .post(url)
            .header(ACCEPT, "application/json")
            .form(&[("embedding", embedding.as_str())])
            .send()
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))
    }

    /// Read the body of a successful response, or turn the status into an error
    async fn read_json(response: Response) -> Result<Value, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                body
            };
            return Err(StoreError::status(status.as_u16(), message));
        }

        response.json().await.map_err(StoreError::malformed)
    }
}

#[async_trait]
impl ArtworkStore for RestArtworkStore {
    async fn fetch_by_id(&self, id: &str) -> Result<Option<Artwork>, StoreError> {
        let response = self.invoke_get(&self.item_url(id)?).await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(id, "Artwork not found");
            return Ok(None);
        }

        let json = Self::read_json(response).await?;
        self.schema.to_artwork(&json).map(Some)
    }

    async fn search_by_embedding(
        &self,
        embedding: &Embedding,
    ) -> Result<Vec<Artwork>, StoreError> {
        let url = format!("{}/items/search", self.endpoint);
        let response = self.invoke_post(&url, embedding).await?;

        let json = Self::read_json(response).await?;
        let artworks = self.schema.to_artworks(&json)?;

        tracing::debug!(count = artworks.len(), "Artwork search returned");
        Ok(artworks)
    }

    async fn fetch_embedding_by_id(&self, id: &str) -> Result<Option<Embedding>, StoreError> {
        let url = format!("{}/embedding", self.item_url(id)?);
        let response = self.invoke_get(&url).await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(id, "Stored embedding not found");
            return Ok(None);
        }

        match Self::read_json(response).await? {
            Value::String(encoded) => Embedding::from_encoded(encoded)
                .map(Some)
                .map_err(StoreError::malformed),
            _ => Err(StoreError::malformed("expected the embedding as a JSON string")),
        }
    }
}
