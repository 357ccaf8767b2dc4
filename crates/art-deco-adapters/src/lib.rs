//! Art Deco Search Adapters
//!
//! Infrastructure implementations of the ports defined in `art_deco`:
//!
//! - `embedder/`: image embedders (remote inference service, local CLIP)
//! - `store/`: artwork stores (REST backend, Qdrant) and wire schema translation
//! - `image_source`: resolving image references to bytes
//! - `timeout`: per-call time limits that keep error kinds intact
//! - `config` / `factory`: configuration and default wiring
//!
//! # Features
//!
//! - `clip`: local CLIP inference through fastembed
//! - `qdrant`: Qdrant-backed artwork store

pub mod config;
pub mod embedder;
pub mod factory;
pub mod image_source;
pub mod store;
pub mod timeout;

pub use config::{ArtDecoConfig, EmbedderConfig, EmbedderKind, StoreBackend, StoreConfig};
#[cfg(feature = "clip")]
pub use embedder::ClipImageEmbedder;
pub use embedder::{DimensionGuard, RemoteImageEmbedder};
pub use factory::{create_catalog_service, create_embedder, create_search_service, create_store};
pub use image_source::{ImageLoader, ImageSource};
#[cfg(feature = "qdrant")]
pub use store::QdrantArtworkStore;
pub use store::{RestArtworkStore, WireSchema};
pub use timeout::{TimeoutEmbedder, TimeoutStore};
