//! Art Deco Search Core
//!
//! Core domain types and interfaces for finding artwork that looks like a given image.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Artwork)
//!   - `value_objects/`: Immutable value types (Embedding, ImageRef)
//!   - `errors/`: Embedding, store, and search error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Artwork store interface
//!   - `services/`: Image embedder interface
//!   - `searcher`: The capability exposed to presentation layers
//!
//! - **Application** (`application/`): The search service composing the ports,
//!   and the store-only catalog service
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use art_deco::{ArtworkSearchService, ArtworkSearcher, ImageRef};
//!
//! let service = ArtworkSearchService::new(Arc::new(embedder), Arc::new(store));
//! let similar = service.find_similar_artwork(&ImageRef::new("cat.png")).await?;
//! ```

pub mod application;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use application::{
    ArtworkCatalogService, ArtworkSearchService, DynArtworkCatalogService, DynArtworkSearchService,
};
pub use domain::{Artwork, Embedding, EmbeddingError, ImageRef, SearchError, StoreError};
pub use ports::{ArtworkSearcher, ArtworkStore, ImageEmbedder};
