//! Timeout Wrappers
//!
//! Bound each port call in time without changing its error kind: an embedder
//! timeout is an `EmbeddingError`, a store timeout is a `StoreError`.

use async_trait::async_trait;
use std::time::Duration;

use art_deco::{
    Artwork, ArtworkStore, Embedding, EmbeddingError, ImageEmbedder, ImageRef, StoreError,
};

/// Image embedder with a per-call time limit
pub struct TimeoutEmbedder<E> {
    inner: E,
    limit: Duration,
}

impl<E: ImageEmbedder> TimeoutEmbedder<E> {
    pub fn new(inner: E, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl<E: ImageEmbedder> ImageEmbedder for TimeoutEmbedder<E> {
    async fn embed(&self, image: &ImageRef) -> Result<Embedding, EmbeddingError> {
        match tokio::time::timeout(self.limit, self.inner.embed(image)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(limit = ?self.limit, "Embedding timed out");
                Err(EmbeddingError::Timeout(self.limit))
            }
        }
    }
}

/// Artwork store with a per-call time limit
pub struct TimeoutStore<S> {
    inner: S,
    limit: Duration,
}

impl<S: ArtworkStore> TimeoutStore<S> {
    pub fn new(inner: S, limit: Duration) -> Self {
        Self { inner, limit }
    }

    async fn bounded<T, F>(&self, operation: &str, call: F) -> Result<T, StoreError>
    where
        F: std::future::Future<Output = Result<T, StoreError>> + Send,
    {
        match tokio::time::timeout(self.limit, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(operation, limit = ?self.limit, "Store call timed out");
                Err(StoreError::Timeout(self.limit))
            }
        }
    }
}

#[async_trait]
impl<S: ArtworkStore> ArtworkStore for TimeoutStore<S> {
    async fn fetch_by_id(&self, id: &str) -> Result<Option<Artwork>, StoreError> {
        self.bounded("fetch_by_id", self.inner.fetch_by_id(id)).await
    }

    async fn search_by_embedding(
        &self,
        embedding: &Embedding,
    ) -> Result<Vec<Artwork>, StoreError> {
        self.bounded("search_by_embedding", self.inner.search_by_embedding(embedding))
            .await
    }

    async fn fetch_embedding_by_id(&self, id: &str) -> Result<Option<Embedding>, StoreError> {
        self.bounded("fetch_embedding_by_id", self.inner.fetch_embedding_by_id(id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowEmbedder(Duration);

    #[async_trait]
    impl ImageEmbedder for SlowEmbedder {
        async fn embed(&self, _image: &ImageRef) -> Result<Embedding, EmbeddingError> {
            tokio::time::sleep(self.0).await;
            Ok(Embedding::from_vector(&[1.0]))
        }
    }

    struct SlowStore(Duration);

    #[async_trait]
    impl ArtworkStore for SlowStore {
        async fn fetch_by_id(&self, _id: &str) -> Result<Option<Artwork>, StoreError> {
            tokio::time::sleep(self.0).await;
            Ok(None)
        }

        async fn search_by_embedding(
            &self,
            _embedding: &Embedding,
        ) -> Result<Vec<Artwork>, StoreError> {
            tokio::time::sleep(self.0).await;
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_embedder_timeout_is_embedding_error() {
        let limit = Duration::from_millis(10);
        let embedder = TimeoutEmbedder::new(SlowEmbedder(Duration::from_secs(5)), limit);

        let err = embedder.embed(&ImageRef::new("cat.png")).await.unwrap_err();
        assert_eq!(err, EmbeddingError::Timeout(limit));
    }

    #[tokio::test]
    async fn test_fast_embedder_passes_through() {
        let embedder = TimeoutEmbedder::new(SlowEmbedder(Duration::ZERO), Duration::from_secs(5));

        let embedding = embedder.embed(&ImageRef::new("cat.png")).await.unwrap();
        assert_eq!(embedding, Embedding::from_vector(&[1.0]));
    }

    #[tokio::test]
    async fn test_store_timeout_is_store_error() {
        let limit = Duration::from_millis(10);
        let store = TimeoutStore::new(SlowStore(Duration::from_secs(5)), limit);

        let err = store
            .search_by_embedding(&Embedding::from_vector(&[1.0]))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::Timeout(limit));
        assert_eq!(store.fetch_by_id("A1").await, Err(StoreError::Timeout(limit)));
    }

    #[tokio::test]
    async fn test_unsupported_default_passes_through() {
        let store = TimeoutStore::new(SlowStore(Duration::ZERO), Duration::from_secs(5));

        assert!(matches!(
            store.fetch_embedding_by_id("A1").await,
            Err(StoreError::Unsupported(_))
        ));
    }
}
