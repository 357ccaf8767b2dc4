//! Artwork Searcher Port
//!
//! The single capability presentation layers depend on.

use async_trait::async_trait;

use crate::domain::{Artwork, ImageRef, SearchError};

/// Find artwork that looks like an image
///
/// # Example
///
/// ```rust,ignore
/// use art_deco::{ArtworkSearcher, ImageRef};
///
/// async fn show(searcher: &dyn ArtworkSearcher) -> Result<(), SearchError> {
///     for artwork in searcher.find_similar_artwork(&ImageRef::new("cat.png")).await? {
///         println!("{} - {}", artwork.title(), artwork.author());
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait ArtworkSearcher: Send + Sync {
    /// Ranked artwork similar to the referenced image, most similar first
    async fn find_similar_artwork(&self, image: &ImageRef) -> Result<Vec<Artwork>, SearchError>;
}
