//! Integration modules for recovery system
//!
//! @author @darianrosebrook

pub mod self_prompting;
pub mod worker;

pub use self_prompting::*;
pub use worker::*;
