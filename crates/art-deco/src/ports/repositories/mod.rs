//! Repository Ports
//!
//! Abstract interfaces for artwork lookup.

mod artwork_store;

pub use artwork_store::*;
