//! Terminal rendering for search results

use art_deco::{Artwork, Embedding};
use colored::Colorize;

const TITLE_WIDTH: usize = 40;

/// One line per artwork, in rank order
pub fn render_artworks(artworks: &[Artwork]) -> String {
    if artworks.is_empty() {
        return "No similar artworks found.".to_string();
    }

    let mut lines = vec![format!(
        "{} similar artworks:",
        artworks.len().to_string().green()
    )];

    for (rank, artwork) in artworks.iter().enumerate() {
        lines.push(format!(
            "  {:>2}. {} {} {}",
            rank + 1,
            truncate_string(artwork.title(), TITLE_WIDTH).cyan().bold(),
            format!("by {}", artwork.author()).dimmed(),
            format!("[{}]", artwork.id()).dimmed()
        ));
        lines.push(format!("      {}", artwork.url()));
    }

    lines.join("\n")
}

pub fn render_artwork(artwork: &Artwork) -> String {
    [
        format!("{}", artwork.title().cyan().bold()),
        format!("  ID:     {}", artwork.id()),
        format!("  Author: {}", artwork.author()),
        format!("  Image:  {}", artwork.url()),
    ]
    .join("\n")
}

pub fn render_embedding(embedding: &Embedding) -> String {
    format!(
        "{} {}\n{}",
        "Dimensions:".bold(),
        embedding.dimensions(),
        embedding.as_str()
    )
}

/// Truncate string safely for UTF-8 (by char count, not bytes)
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    } else {
        s.to_string()
    }
}
