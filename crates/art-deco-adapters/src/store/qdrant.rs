//! Qdrant Artwork Store
//!
//! Searches a Qdrant collection directly. Point payloads carry the same fields
//! as the REST backend's records, so translation goes through `WireSchema` too.

use async_trait::async_trait;
use qdrant_client::qdrant::{
    vector_output, Condition, Filter, RetrievedPoint, ScrollPointsBuilder, SearchPointsBuilder,
    VectorsOutput,
};
use qdrant_client::Qdrant;
use serde_json::Value;
use std::collections::HashMap;

use art_deco::{Artwork, ArtworkStore, Embedding, StoreError};

use super::WireSchema;

const DEFAULT_LIMIT: u64 = 5;

/// Qdrant client wrapper serving artwork lookups
pub struct QdrantArtworkStore {
    client: Qdrant,
    collection: String,
    limit: u64,
    schema: WireSchema,
}

impl QdrantArtworkStore {
    /// Initialize connection to Qdrant
    pub fn new(
        url: &str,
        api_key: Option<String>,
        collection: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let client = if let Some(key) = api_key {
            Qdrant::from_url(url).api_key(key).build()
        } else {
            Qdrant::from_url(url).build()
        }
        .map_err(|e| StoreError::Unreachable(e.to_string()))?;

        let collection = collection.into();
        tracing::info!(%collection, "Connected to Qdrant");

        Ok(Self {
            client,
            collection,
            limit: DEFAULT_LIMIT,
            schema: WireSchema::default(),
        })
    }

    /// Maximum number of matches per search
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_schema(mut self, schema: WireSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Point whose payload id equals `id`
    async fn find_point(
        &self,
        id: &str,
        with_vectors: bool,
    ) -> Result<Option<RetrievedPoint>, StoreError> {
        if id.is_empty() {
            return Err(StoreError::InvalidRequest("artwork id is empty".to_string()));
        }

        let filter = Filter::must([Condition::matches(
            self.schema.fields().id,
            id.to_string(),
        )]);

        let response = self
            .client
            .scroll(
                ScrollPointsBuilder::new(&self.collection)
                    .filter(filter)
                    .limit(1)
                    .with_payload(true)
                    .with_vectors(with_vectors),
            )
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(response.result.into_iter().next())
    }

    fn payload_to_json<T: serde::Serialize>(
        payload: &HashMap<String, T>,
    ) -> Result<Value, StoreError> {
        serde_json::to_value(payload).map_err(StoreError::malformed)
    }
}

/// The default dense vector of a point
fn dense_vector(vectors: Option<&VectorsOutput>) -> Result<Vec<f32>, StoreError> {
    match vectors.and_then(VectorsOutput::get_vector) {
        Some(vector_output::Vector::Dense(dense)) => Ok(dense.data),
        Some(_) => Err(StoreError::malformed("stored vector is not dense")),
        None => Err(StoreError::malformed("point has no default vector")),
    }
}

#[async_trait]
impl ArtworkStore for QdrantArtworkStore {
    async fn fetch_by_id(&self, id: &str) -> Result<Option<Artwork>, StoreError> {
        match self.find_point(id, false).await? {
            Some(point) => {
                let record = Self::payload_to_json(&point.payload)?;
                self.schema.to_artwork(&record).map(Some)
            }
            None => {
                tracing::debug!(id, "Artwork not found");
                Ok(None)
            }
        }
    }

    async fn search_by_embedding(
        &self,
        embedding: &Embedding,
    ) -> Result<Vec<Artwork>, StoreError> {
        let vector = embedding
            .to_vector()
            .map_err(|e| StoreError::InvalidRequest(e.to_string()))?;

        let search_result = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection, vector, self.limit).with_payload(true),
            )
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        // Qdrant already ranks by score; keep its order
        let records = search_result
            .result
            .iter()
            .map(|point| Self::payload_to_json(&point.payload))
            .collect::<Result<Vec<_>, _>>()?;

        let artworks = self.schema.to_artworks(&Value::Array(records))?;
        tracing::debug!(count = artworks.len(), "Qdrant search returned");

        Ok(artworks)
    }

    async fn fetch_embedding_by_id(&self, id: &str) -> Result<Option<Embedding>, StoreError> {
        match self.find_point(id, true).await? {
            Some(point) => {
                let vector = dense_vector(point.vectors.as_ref())?;
                Ok(Some(Embedding::from_vector(&vector)))
            }
            None => {
                tracing::debug!(id, "Stored embedding not found");
                Ok(None)
            }
        }
    }
}
