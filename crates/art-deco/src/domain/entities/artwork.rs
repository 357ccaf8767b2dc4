//! Artwork - A catalogued piece returned by similarity search
//!
//! Pure domain entity without infrastructure dependencies.
//! Store adapters build it from their backend records; nothing mutates it afterwards.

use serde::{Deserialize, Serialize};

/// Artwork - An immutable search result
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Artwork {
    /// Backend primary key
    id: String,
    /// Display title (may be empty)
    title: String,
    /// Display author (may be empty)
    author: String,
    /// Absolute location of the artwork image
    url: String,
}

impl Artwork {
    /// Create a new artwork
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            url: url.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}
