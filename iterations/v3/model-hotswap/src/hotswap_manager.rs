//! Hotswap Manager - Main Orchestration Component
//!
//! Re-exports the main ModelHotSwapOrchestrator as HotswapManager
//! for backward compatibility.

pub use crate::ModelHotSwapOrchestrator as HotswapManager;
