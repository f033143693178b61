//! Communication protocols and message passing infrastructure

pub mod messages;
pub mod channels;
pub mod hub;

pub use messages::*;
pub use channels::*;
pub use hub::*;


