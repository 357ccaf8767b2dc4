//! Image Embedder Adapters
//!
//! - `RemoteImageEmbedder`: calls an HTTP inference endpoint
//! - `ClipImageEmbedder` (feature `clip`): runs CLIP locally through fastembed

#[cfg(feature = "clip")]
mod clip;
mod remote;

#[cfg(feature = "clip")]
pub use clip::{parse_image_model, ClipImageEmbedder};
pub use remote::RemoteImageEmbedder;

use art_deco::EmbeddingError;
use std::sync::OnceLock;

/// Pins an embedder to one dimensionality for its whole lifetime
///
/// The first accepted vector fixes the dimension unless one was given up front.
#[derive(Debug, Default)]
pub struct DimensionGuard {
    pinned: OnceLock<usize>,
}

impl DimensionGuard {
    /// Guard with a dimension known ahead of the first call
    pub fn fixed(dimensions: usize) -> Self {
        let pinned = OnceLock::new();
        let _ = pinned.set(dimensions);
        Self { pinned }
    }

    pub fn dimensions(&self) -> Option<usize> {
        self.pinned.get().copied()
    }

    pub fn check(&self, vector: &[f32]) -> Result<(), EmbeddingError> {
        if vector.is_empty() {
            return Err(EmbeddingError::Model("model returned an empty vector".to_string()));
        }

        let expected = *self.pinned.get_or_init(|| vector.len());
        if expected != vector.len() {
            return Err(EmbeddingError::DimensionMismatch {
                expected,
                actual: vector.len(),
            });
        }

        Ok(())
    }
}
