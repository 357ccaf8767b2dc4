//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with external systems (stores, embedders) and
//! what it offers to presentation layers (searcher).
//!
//! Implementations of the driven ports live in the adapters crate.

pub mod repositories;
pub mod searcher;
pub mod services;

// Re-exports
pub use repositories::*;
pub use searcher::*;
pub use services::*;
