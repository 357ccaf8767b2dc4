//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! the artwork store and the image embedder.

mod artwork_catalog_service;
mod artwork_search_service;

pub use artwork_catalog_service::{ArtworkCatalogService, DynArtworkCatalogService};
pub use artwork_search_service::{ArtworkSearchService, DynArtworkSearchService};
