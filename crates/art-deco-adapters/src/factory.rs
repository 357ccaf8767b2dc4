//! Default Wiring
//!
//! Builds production adapters from configuration and composes them into a
//! search service. Model warm-up happens here, before the service exists.

use std::sync::Arc;

use art_deco::{
    ArtworkCatalogService, ArtworkSearchService, ArtworkStore, DynArtworkCatalogService,
    DynArtworkSearchService, EmbeddingError, ImageEmbedder, SearchError, StoreError,
};

use crate::config::{ArtDecoConfig, EmbedderConfig, EmbedderKind, StoreBackend, StoreConfig};
use crate::embedder::RemoteImageEmbedder;
use crate::store::RestArtworkStore;
use crate::timeout::{TimeoutEmbedder, TimeoutStore};

/// Create a search service with the configured adapters
pub async fn create_search_service(
    config: &ArtDecoConfig,
) -> Result<DynArtworkSearchService, SearchError> {
    let store = create_store(&config.store)?;
    let embedder = create_embedder(&config.embedder).await?;

    tracing::info!(
        embedder = %config.embedder.kind,
        store = %config.store.backend,
        "Artwork search service ready"
    );

    Ok(ArtworkSearchService::new(embedder, store))
}

/// Create a catalog service over the configured store
///
/// Store-only lookups never build or load an embedder.
pub fn create_catalog_service(
    config: &StoreConfig,
) -> Result<DynArtworkCatalogService, StoreError> {
    let store = create_store(config)?;
    tracing::debug!(store = %config.backend, "Artwork catalog ready");

    Ok(ArtworkCatalogService::new(store))
}

/// Create and warm up the configured image embedder
pub async fn create_embedder(
    config: &EmbedderConfig,
) -> Result<Arc<dyn ImageEmbedder>, EmbeddingError> {
    let embedder: Arc<dyn ImageEmbedder> = match config.kind {
        EmbedderKind::Remote => {
            let mut remote = RemoteImageEmbedder::new(&config.endpoint).with_model(&config.model);
            if let Some(key) = &config.api_key {
                remote = remote.with_api_key(key);
            }
            if let Some(dimensions) = config.dimensions {
                remote = remote.with_dimensions(dimensions);
            }
            Arc::new(remote)
        }
        EmbedderKind::Clip => create_clip_embedder(config).await?,
    };

    Ok(match config.timeout() {
        Some(limit) => Arc::new(TimeoutEmbedder::new(embedder, limit)),
        None => embedder,
    })
}

#[cfg(feature = "clip")]
async fn create_clip_embedder(
    config: &EmbedderConfig,
) -> Result<Arc<dyn ImageEmbedder>, EmbeddingError> {
    use crate::embedder::{parse_image_model, ClipImageEmbedder};

    let model = parse_image_model(&config.model)?;
    Ok(Arc::new(ClipImageEmbedder::with_model(model).await?))
}

#[cfg(not(feature = "clip"))]
async fn create_clip_embedder(
    _config: &EmbedderConfig,
) -> Result<Arc<dyn ImageEmbedder>, EmbeddingError> {
    Err(EmbeddingError::Model(
        "local CLIP embedder requires the `clip` feature".to_string(),
    ))
}

/// Create the configured artwork store
pub fn create_store(config: &StoreConfig) -> Result<Arc<dyn ArtworkStore>, StoreError> {
    let store: Arc<dyn ArtworkStore> = match config.backend {
        StoreBackend::Rest => {
            Arc::new(RestArtworkStore::new(&config.endpoint).with_schema(config.schema))
        }
        StoreBackend::Qdrant => create_qdrant_store(config)?,
    };

    Ok(match config.timeout() {
        Some(limit) => Arc::new(TimeoutStore::new(store, limit)),
        None => store,
    })
}

#[cfg(feature = "qdrant")]
fn create_qdrant_store(config: &StoreConfig) -> Result<Arc<dyn ArtworkStore>, StoreError> {
    use crate::store::QdrantArtworkStore;

    let url = config
        .qdrant_url
        .as_deref()
        .ok_or_else(|| StoreError::InvalidRequest("QDRANT_URL is not set".to_string()))?;

    let store = QdrantArtworkStore::new(url, config.qdrant_api_key.clone(), &config.collection)?
        .with_limit(config.search_limit)
        .with_schema(config.schema);

    Ok(Arc::new(store))
}

#[cfg(not(feature = "qdrant"))]
fn create_qdrant_store(_config: &StoreConfig) -> Result<Arc<dyn ArtworkStore>, StoreError> {
    Err(StoreError::Unsupported(
        "Qdrant store requires the `qdrant` feature".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use art_deco::ImageRef;

    #[tokio::test]
    async fn test_default_config_builds_without_network() {
        let service = create_search_service(&ArtDecoConfig::default()).await;
        assert!(service.is_ok());
    }

    #[cfg(not(feature = "clip"))]
    #[tokio::test]
    async fn test_clip_without_feature_is_embedding_error() {
        let config = EmbedderConfig {
            kind: EmbedderKind::Clip,
            ..EmbedderConfig::default()
        };

        assert!(matches!(
            create_embedder(&config).await,
            Err(EmbeddingError::Model(_))
        ));
    }

    #[cfg(not(feature = "qdrant"))]
    #[test]
    fn test_qdrant_without_feature_is_store_error() {
        let config = StoreConfig {
            backend: StoreBackend::Qdrant,
            ..StoreConfig::default()
        };

        assert!(matches!(create_store(&config), Err(StoreError::Unsupported(_))));
    }

    #[cfg(not(feature = "clip"))]
    #[tokio::test]
    async fn test_catalog_ignores_unbuildable_embedder() {
        let mut config = ArtDecoConfig::default();
        config.embedder.kind = EmbedderKind::Clip;

        assert!(create_search_service(&config).await.is_err());
        assert!(create_catalog_service(&config.store).is_ok());
    }

    #[tokio::test]
    async fn test_unreadable_image_fails_before_network() {
        let service = create_search_service(&ArtDecoConfig::default()).await.unwrap();

        let err = service
            .find_similar_artwork(&ImageRef::new("/no/such/image.png"))
            .await
            .unwrap_err();

        assert!(err.is_embedding());
    }
}
