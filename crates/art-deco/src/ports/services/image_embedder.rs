//! Image Embedder Port
//!
//! Abstract interface for turning an image into a feature vector.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Embedding, EmbeddingError, ImageRef};

/// Service interface for generating image embeddings
///
/// Every embedding produced by one instance has the same dimensionality.
/// Implementations that need a model loaded do it in an async constructor,
/// so an instance is always ready to `embed`. Failures are not retried here.
#[async_trait]
pub trait ImageEmbedder: Send + Sync {
    /// Generate the embedding for the referenced image
    async fn embed(&self, image: &ImageRef) -> Result<Embedding, EmbeddingError>;
}

#[async_trait]
impl<T: ImageEmbedder + ?Sized> ImageEmbedder for Arc<T> {
    async fn embed(&self, image: &ImageRef) -> Result<Embedding, EmbeddingError> {
        (**self).embed(image).await
    }
}
