//! Garbage collection and packing
//!
//! @author @darianrosebrook

pub mod collector;
pub mod pack;

pub use collector::*;
pub use pack::*;
