//! Quantization Manager
//!
//! Manages model quantization for Apple Silicon optimization.

use crate::types::*;
use anyhow::Result;

/// Quantization manager for model optimization
#[derive(Debug)]
pub struct QuantizationManager {
    // TODO: Add quantization implementation
}

impl QuantizationManager {
    /// Create a new quantization manager
    pub fn new() -> Self {
        Self {}
    }

    /// Quantize a model
    pub async fn quantize_model(
        &self,
        model_path: &str,
        method: QuantizationMethod,
    ) -> Result<String> {
        // TODO: Implement model quantization
        todo!("Model quantization not yet implemented")
    }
}

impl Default for QuantizationManager {
    fn default() -> Self {
        Self::new()
    }
}
