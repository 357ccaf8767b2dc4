//! Embedding - Transport-safe image feature vector
//!
//! The vector travels between ports as standard base64 over the little-endian
//! `f32` bytes, so it fits in text-only parameters (form fields, JSON strings).
//! The encoding is lossless: every bit of every component survives.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::domain::errors::EmbeddingError;

const F32_BYTES: usize = std::mem::size_of::<f32>();

/// Encoded feature vector produced by an image embedder
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Embedding {
    encoded: String,
    dimensions: usize,
}

impl Embedding {
    /// Encode a raw vector
    pub fn from_vector(vector: &[f32]) -> Self {
        let bytes: Vec<u8> = vector.iter().flat_map(|v| v.to_le_bytes()).collect();
        Self {
            encoded: STANDARD.encode(bytes),
            dimensions: vector.len(),
        }
    }

    /// Wrap an already encoded vector, checking that it decodes to whole `f32` values
    pub fn from_encoded(encoded: impl Into<String>) -> Result<Self, EmbeddingError> {
        let encoded = encoded.into();
        let bytes = STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| EmbeddingError::Encoding(e.to_string()))?;

        if bytes.len() % F32_BYTES != 0 {
            return Err(EmbeddingError::Encoding(format!(
                "{} bytes is not a whole number of f32 values",
                bytes.len()
            )));
        }

        Ok(Self {
            dimensions: bytes.len() / F32_BYTES,
            encoded,
        })
    }

    /// The text-safe encoding
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Decode back into the raw vector
    pub fn to_vector(&self) -> Result<Vec<f32>, EmbeddingError> {
        let bytes = STANDARD
            .decode(self.encoded.as_bytes())
            .map_err(|e| EmbeddingError::Encoding(e.to_string()))?;

        Ok(bytes
            .chunks_exact(F32_BYTES)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }
}

impl TryFrom<String> for Embedding {
    type Error = EmbeddingError;

    fn try_from(encoded: String) -> Result<Self, Self::Error> {
        Self::from_encoded(encoded)
    }
}

impl From<Embedding> for String {
    fn from(embedding: Embedding) -> Self {
        embedding.encoded
    }
}

impl std::fmt::Display for Embedding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encoded)
    }
}
