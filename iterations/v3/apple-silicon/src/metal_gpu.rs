//! Metal GPU Manager
//!
//! Manages Metal GPU acceleration for Apple Silicon inference.

use crate::types::*;
use anyhow::Result;

/// Metal GPU manager for GPU-accelerated inference
#[derive(Debug)]
pub struct MetalGPUManager {
    // TODO: Add Metal GPU implementation
}

impl MetalGPUManager {
    /// Create a new Metal GPU manager
    pub fn new() -> Self {
        Self {}
    }

    /// Initialize Metal GPU resources
    pub async fn initialize(&mut self) -> Result<()> {
        // TODO: Implement Metal GPU initialization
        Ok(())
    }

    /// Run inference on Metal GPU
    pub async fn run_inference(&self, request: InferenceRequest) -> Result<InferenceResult> {
        // TODO: Implement Metal GPU inference
        todo!("Metal GPU inference not yet implemented")
    }
}

impl Default for MetalGPUManager {
    fn default() -> Self {
        Self::new()
    }
}
