//! Quality validation and gates for parallel execution

pub mod gates;
pub mod validators;
pub mod runner;

pub use gates::*;
pub use validators::*;
pub use runner::*;

// Re-export types from types module that are used in validation
pub use crate::types::ValidationContext;
