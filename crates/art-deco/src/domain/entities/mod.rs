//! Domain Entities

mod artwork;

pub use artwork::*;
