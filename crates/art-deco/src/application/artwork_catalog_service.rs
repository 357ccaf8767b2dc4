//! Artwork Catalog Application Service (Use Case)
//!
//! Lookups that only need the artwork store: fetching one artwork and
//! searching with an embedding the store already holds.

use std::sync::Arc;

use crate::domain::{Artwork, SearchError};
use crate::ports::ArtworkStore;

/// Application service for store-only artwork lookups
pub struct ArtworkCatalogService<S: ArtworkStore + ?Sized> {
    store: Arc<S>,
}

/// Catalog service over a type-erased store
pub type DynArtworkCatalogService = ArtworkCatalogService<dyn ArtworkStore>;

impl<S: ArtworkStore + ?Sized> ArtworkCatalogService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    /// Get an artwork by ID
    pub async fn fetch_artwork(&self, id: &str) -> Result<Option<Artwork>, SearchError> {
        Ok(self.store.fetch_by_id(id).await?)
    }

    /// Search with the embedding already stored for an artwork
    ///
    /// Returns `Ok(None)` when the artwork is unknown.
    pub async fn find_similar_to_artwork(
        &self,
        id: &str,
    ) -> Result<Option<Vec<Artwork>>, SearchError> {
        let embedding = match self.store.fetch_embedding_by_id(id).await? {
            Some(e) => e,
            None => return Ok(None),
        };

        let artworks = self.store.search_by_embedding(&embedding).await?;
        tracing::debug!(id, count = artworks.len(), "Artwork similar to stored artwork found");

        Ok(Some(artworks))
    }
}

impl<S: ArtworkStore + ?Sized> Clone for ArtworkCatalogService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}
