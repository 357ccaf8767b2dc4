//! Service Ports
//!
//! Abstract interfaces for external services.

mod image_embedder;

pub use image_embedder::*;
