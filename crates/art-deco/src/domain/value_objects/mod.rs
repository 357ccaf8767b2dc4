//! Value Objects
//!
//! Immutable types defined by their values rather than identity.

mod embedding;
mod image_ref;

pub use embedding::*;
pub use image_ref::*;
