//! Policy enforcement and secret scanning
//!
//! @author @darianrosebrook

pub mod redaction;
pub mod content_strategy;
pub mod caws;
pub mod enforcement;

pub use redaction::*;
pub use content_strategy::*;
pub use caws::*;
pub use enforcement::*;
