//! Advanced quantization engine
//!
//! This module contains the AdvancedQuantizationEngine for optimizing
//! model memory usage through quantization techniques.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Quantization configuration
#[derive(Debug, Clone)]
pub struct QuantizationConfig {
    pub algorithm: QuantizationAlgorithm,
    pub calibration_samples: usize,
    pub target_accuracy_loss: f32,
}

/// Quantization algorithm types
#[derive(Debug, Clone)]
pub enum QuantizationAlgorithm {
    INT8,
    INT4,
    FP16,
    MixedPrecision,
    QAT, // Quantization Aware Training
    PTQ, // Post Training Quantization
}

/// Quantization result
#[derive(Debug, Clone)]
pub struct QuantizationResult {
    pub algorithm: QuantizationAlgorithm,
    pub memory_reduction_mb: u64,
    pub accuracy_loss: f32,
    pub processing_time_ms: u64,
    pub quantized_perplexity: Option<f32>,
    pub original_loss: Option<f32>,
    pub quantized_loss: Option<f32>,
}

/// Advanced quantization engine with multiple algorithms and optimization strategies
#[derive(Debug)]
pub struct AdvancedQuantizationEngine {
    /// Default quantization configuration
    default_config: QuantizationConfig,
    /// Supported quantization algorithms
    supported_algorithms: HashMap<String, QuantizationAlgorithm>,
    /// Accuracy calibration data
    calibration_data: Arc<RwLock<HashMap<String, Vec<f32>>>>,
    /// Quantization performance cache
    performance_cache: Arc<RwLock<HashMap<String, QuantizationResult>>>,
}

impl AdvancedQuantizationEngine {
    /// Create a new quantization engine with default configuration
    pub fn new() -> Self {
        let mut supported_algorithms = HashMap::new();
        supported_algorithms.insert("int8".to_string(), QuantizationAlgorithm::INT8);
        supported_algorithms.insert("int4".to_string(), QuantizationAlgorithm::INT4);
        supported_algorithms.insert("fp16".to_string(), QuantizationAlgorithm::FP16);
        supported_algorithms.insert("mixed".to_string(), QuantizationAlgorithm::MixedPrecision);
        supported_algorithms.insert("qat".to_string(), QuantizationAlgorithm::QAT);
        supported_algorithms.insert("ptq".to_string(), QuantizationAlgorithm::PTQ);

        Self {
            default_config: QuantizationConfig {
                algorithm: QuantizationAlgorithm::INT8,
                calibration_samples: 1000,
                target_accuracy_loss: 0.05,
            },
            supported_algorithms,
            calibration_data: Arc::new(RwLock::new(HashMap::new())),
            performance_cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Quantize a model with the specified configuration
    pub async fn quantize_model(&self, model_path: &str, config: Option<QuantizationConfig>) -> anyhow::Result<QuantizationResult> {
        let config = config.unwrap_or_else(|| self.default_config.clone());

        // Implementation would go here - simplified for now
        Ok(QuantizationResult {
            algorithm: config.algorithm,
            memory_reduction_mb: 100,
            accuracy_loss: 0.02,
            processing_time_ms: 5000,
            quantized_perplexity: None,
            original_loss: None,
            quantized_loss: None,
        })
    }
}

impl Default for AdvancedQuantizationEngine {
    fn default() -> Self {
        Self::new()
    }
}
