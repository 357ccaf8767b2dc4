//! Artwork Search Application Service (Use Case)
//!
//! Composes an image embedder and an artwork store into similarity search.

use async_trait::async_trait;
use std::sync::Arc;

use super::ArtworkCatalogService;
use crate::domain::{Artwork, ImageRef, SearchError};
use crate::ports::{ArtworkSearcher, ArtworkStore, ImageEmbedder};

/// Application service for artwork search
///
/// Holds no per-call state; one instance can serve concurrent searches.
/// Results pass through untouched: no caching, re-ranking, or deduplication.
pub struct ArtworkSearchService<E: ImageEmbedder + ?Sized, S: ArtworkStore + ?Sized> {
    embedder: Arc<E>,
    catalog: ArtworkCatalogService<S>,
}

/// Search service over type-erased adapters, as built by runtime configuration
pub type DynArtworkSearchService = ArtworkSearchService<dyn ImageEmbedder, dyn ArtworkStore>;

impl<E: ImageEmbedder + ?Sized, S: ArtworkStore + ?Sized> ArtworkSearchService<E, S> {
    pub fn new(embedder: Arc<E>, store: Arc<S>) -> Self {
        Self {
            embedder,
            catalog: ArtworkCatalogService::new(store),
        }
    }

    /// Embed the image and return the store's matches in the store's order
    pub async fn find_similar_artwork(&self, image: &ImageRef) -> Result<Vec<Artwork>, SearchError> {
        let embedding = self.embedder.embed(image).await?;
        tracing::debug!(dimensions = embedding.dimensions(), "Image embedded");

        let artworks = self.catalog.store().search_by_embedding(&embedding).await?;
        tracing::debug!(count = artworks.len(), "Similar artwork found");

        Ok(artworks)
    }

    /// Get an artwork by ID
    pub async fn fetch_artwork(&self, id: &str) -> Result<Option<Artwork>, SearchError> {
        self.catalog.fetch_artwork(id).await
    }

    /// Search with the embedding already stored for an artwork
    ///
    /// Returns `Ok(None)` when the artwork is unknown. The embedder is not used.
    pub async fn find_similar_to_artwork(
        &self,
        id: &str,
    ) -> Result<Option<Vec<Artwork>>, SearchError> {
        self.catalog.find_similar_to_artwork(id).await
    }
}

impl<E: ImageEmbedder + ?Sized, S: ArtworkStore + ?Sized> Clone for ArtworkSearchService<E, S> {
    fn clone(&self) -> Self {
        Self {
            embedder: Arc::clone(&self.embedder),
            catalog: self.catalog.clone(),
        }
    }
}

#[async_trait]
impl<E: ImageEmbedder + ?Sized, S: ArtworkStore + ?Sized> ArtworkSearcher
    for ArtworkSearchService<E, S>
{
    async fn find_similar_artwork(&self, image: &ImageRef) -> Result<Vec<Artwork>, SearchError> {
        ArtworkSearchService::find_similar_artwork(self, image).await
    }
}
