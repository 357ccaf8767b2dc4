//! Artwork Store Adapters
//!
//! - `RestArtworkStore`: the artwork backend's REST API
//! - `QdrantArtworkStore` (feature `qdrant`): a Qdrant collection

#[cfg(feature = "qdrant")]
mod qdrant;
mod rest;
mod schema;

#[cfg(feature = "qdrant")]
pub use qdrant::QdrantArtworkStore;
pub use rest::RestArtworkStore;
pub use schema::{FieldNames, WireSchema};
