//! Core ML backend for macOS

use crate::{ComputeUnit, TensorMap, TensorSpec};
use crate::inference::{DType, IoSchema};
#[cfg(feature = "candle")]
use candle_core::DType as CandleDType;
use crate::inference::{CapabilityReport, InferenceEngine, PrepareOptions, PreparedModel, ModelArtifact, PreparedCandleModel};
use async_trait::async_trait;
use anyhow::Result;
use std::collections::HashMap;
use std::time::Duration;

/// Core ML backend for inference
#[derive(Debug)]
pub struct CoreMLBackend {
    // Placeholder fields
}

impl CoreMLBackend {
    /// Create a new Core ML backend
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl InferenceEngine for CoreMLBackend {
    async fn prepare(
        &self,
        artifact: &ModelArtifact,
        _opts: PrepareOptions,
    ) -> Result<Box<dyn PreparedModel>> {
        match artifact {
            ModelArtifact::Authoring { path, .. } => {
                // Load model from path
                let cache_key = format!("coreml:{}", path.display());
                let schema = IoSchema {
                    inputs: vec![],
                    outputs: vec![],
                };

                Ok(Box::new(PreparedCandleModel { cache_key, schema }))
            }
            ModelArtifact::Compiled { .. } => {
                Err(anyhow::anyhow!("Compiled models not supported in CoreML backend"))
            }
        }
    }

    async fn infer(
        &self,
        _mdl: &dyn PreparedModel,
        inputs: &TensorMap,
        _timeout: Duration,
    ) -> Result<TensorMap> {
        // Placeholder inference
        let mut outputs = TensorMap::new();
        outputs.insert("output".to_string(), vec![0.0f32; 4]);
        Ok(outputs)
    }

    fn capabilities(&self, _mdl: &dyn PreparedModel) -> CapabilityReport {
        CapabilityReport {
            device_class: "ANE/GPU".to_string(),
            supported_dtypes: vec![DType::F32, DType::F16, DType::U8],
            max_batch_size: 1,
            ane_op_coverage_pct: 80,
            compute_units_requested: ComputeUnit::All,
            compute_units_actual: ComputeUnit::All,
            compile_p99_ms: 2000,
            infer_p99_ms: 15,
        }
    }

}
