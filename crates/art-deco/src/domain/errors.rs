//! Domain Errors
//!
//! Error types for embedding, store, and search operations.

use std::time::Duration;

use thiserror::Error;

/// Failures raised by an image embedder
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EmbeddingError {
    #[error("Image unavailable: {reference}: {reason}")]
    ImageUnavailable { reference: String, reason: String },

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Model invocation failed: {0}")]
    Model(String),

    #[error("Embedding dimension changed: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid embedding encoding: {0}")]
    Encoding(String),

    #[error("Embedding timed out after {0:?}")]
    Timeout(Duration),
}

impl EmbeddingError {
    pub fn image_unavailable<R: AsRef<str>, E: std::fmt::Display>(reference: R, reason: E) -> Self {
        Self::ImageUnavailable {
            reference: reference.as_ref().to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Failures raised by an artwork store
///
/// A missing artwork is not an error; `fetch_by_id` reports it as `None`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Store unreachable: {0}")]
    Unreachable(String),

    #[error("Store returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed store payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid store request: {0}")]
    InvalidRequest(String),

    #[error("Store backend error: {0}")]
    Backend(String),

    #[error("Store operation not supported: {0}")]
    Unsupported(String),

    #[error("Store timed out after {0:?}")]
    Timeout(Duration),
}

impl StoreError {
    pub fn status<T: Into<String>>(status: u16, message: T) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    pub fn malformed<T: std::fmt::Display>(reason: T) -> Self {
        Self::MalformedPayload(reason.to_string())
    }
}

/// Failures surfaced by the search service
///
/// Each variant carries the failing collaborator's error unchanged.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SearchError {
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SearchError {
    pub fn is_embedding(&self) -> bool {
        matches!(self, Self::Embedding(_))
    }

    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}
