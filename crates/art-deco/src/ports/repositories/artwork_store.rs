//! Artwork Store Port
//!
//! Abstract interface for the similarity search backend.
//! Adapters own the translation from the backend's record shape to `Artwork`.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Artwork, Embedding, StoreError};

/// Repository interface for Artwork lookup
#[async_trait]
pub trait ArtworkStore: Send + Sync {
    /// Find an artwork by its exact id
    ///
    /// Returns `Ok(None)` when the backend reports no such artwork.
    async fn fetch_by_id(&self, id: &str) -> Result<Option<Artwork>, StoreError>;

    /// Search artwork by embedding
    ///
    /// Results come back most similar first, in exactly the order the backend
    /// ranked them. An empty list is a normal outcome.
    async fn search_by_embedding(&self, embedding: &Embedding)
        -> Result<Vec<Artwork>, StoreError>;

    /// Fetch the embedding stored for an artwork
    ///
    /// Returns `Ok(None)` when the artwork is unknown.
    async fn fetch_embedding_by_id(&self, _id: &str) -> Result<Option<Embedding>, StoreError> {
        Err(StoreError::Unsupported(
            "fetching stored embeddings".to_string(),
        ))
    }
}

#[async_trait]
impl<T: ArtworkStore + ?Sized> ArtworkStore for Arc<T> {
    async fn fetch_by_id(&self, id: &str) -> Result<Option<Artwork>, StoreError> {
        (**self).fetch_by_id(id).await
    }

    async fn search_by_embedding(
        &self,
        embedding: &Embedding,
    ) -> Result<Vec<Artwork>, StoreError> {
        (**self).search_by_embedding(embedding).await
    }

    async fn fetch_embedding_by_id(&self, id: &str) -> Result<Option<Embedding>, StoreError> {
        (**self).fetch_embedding_by_id(id).await
    }
}
