//! Content-Addressable Storage implementation
//!
//! @author @darianrosebrook

pub mod blob;
pub mod diff;
pub mod normalization;
// pub mod compression;  // TODO: Implement compression module
pub mod chunking;
pub mod concurrency;
pub mod restore;

pub use blob::*;
pub use diff::*;
pub use normalization::*;
// pub use compression::*;  // TODO: Implement compression module
pub use chunking::*;
pub use concurrency::*;
pub use restore::*;
