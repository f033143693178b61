//! ANE inference execution with timeouts and metrics
//!
//! This module provides async inference execution with proper timeout handling,
//! performance monitoring, and error recovery for Apple Neural Engine operations.

use crate::ane::errors::{ANEError, Result};
use crate::ane::models::coreml_model::LoadedCoreMLModel;
use crate::ane::metrics::ewma::Ewma;
use std::time::{Duration, Instant};

/// Inference execution options
#[derive(Debug, Clone)]
pub struct InferenceOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Batch size for inference
    pub batch_size: Option<usize>,
    /// Precision for inference
    pub precision: Option<String>,
    /// Compute units preference
    pub compute_units: Option<String>,
    /// Enable performance monitoring
    pub enable_monitoring: bool,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            batch_size: None,
            precision: Some("fp16".to_string()),
            compute_units: Some("all".to_string()),
            enable_monitoring: true,
        }
    }
}

/// Inference execution result
#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// Output tensor data
    pub output: Vec<f32>,
    /// Execution time in milliseconds
    pub execution_time_ms: u64,
    /// Memory usage in MB
    pub memory_usage_mb: usize,
    /// Performance metrics
    pub metrics: InferenceMetrics,
}

/// Inference performance metrics
#[derive(Debug, Clone)]
pub struct InferenceMetrics {
    /// Total inference time
    pub total_time_ms: u64,
    /// Core inference time (excluding I/O)
    pub core_time_ms: u64,
    /// Input preparation time
    pub input_prep_time_ms: u64,
    /// Output processing time
    pub output_proc_time_ms: u64,
    /// Throughput (inferences per second)
    pub throughput_ips: f64,
    /// Memory efficiency (0.0-1.0)
    pub memory_efficiency: f32,
    /// Compute efficiency (0.0-1.0)
    pub compute_efficiency: f32,
}

impl Default for InferenceMetrics {
    fn default() -> Self {
        Self {
            total_time_ms: 0,
            core_time_ms: 0,
            input_prep_time_ms: 0,
            output_proc_time_ms: 0,
            throughput_ips: 0.0,
            memory_efficiency: 1.0,
            compute_efficiency: 1.0,
        }
    }
}

/// Execute inference on a loaded model
/// 
/// # Arguments
/// * `model` - Loaded Core ML model
/// * `input` - Input tensor data
/// * `options` - Inference options
/// 
/// # Returns
/// * `Ok(InferenceResult)` - Inference result with metrics
/// * `Err(ANEError)` - If inference fails
pub async fn execute_inference(
    model: &LoadedCoreMLModel,
    input: &[f32],
    options: &InferenceOptions,
) -> Result<InferenceResult> {
    let start_time = Instant::now();
    
    // Validate input
    validate_input(model, input)?;
    
    // Prepare input (measure time)
    let input_prep_start = Instant::now();
    let prepared_input = prepare_input(model, input, options)?;
    let input_prep_time = input_prep_start.elapsed();
    
    // Execute inference with timeout
    let inference_start = Instant::now();
    let output = execute_with_timeout(model, &prepared_input, options).await?;
    let core_time = inference_start.elapsed();
    
    // Process output (measure time)
    let output_proc_start = Instant::now();
    let processed_output = process_output(model, &output)?;
    let output_proc_time = output_proc_start.elapsed();
    
    let total_time = start_time.elapsed();
    
    // Calculate metrics
    let metrics = calculate_metrics(
        total_time,
        core_time,
        input_prep_time,
        output_proc_time,
        input.len(),
        processed_output.len(),
    );
    
    // Estimate memory usage
    let memory_usage_mb = estimate_memory_usage(model, input, &processed_output);
    
    Ok(InferenceResult {
        output: processed_output,
        execution_time_ms: total_time.as_millis() as u64,
        memory_usage_mb,
        metrics,
    })
}

/// Validate input tensor against model schema
fn validate_input(model: &LoadedCoreMLModel, input: &[f32]) -> Result<()> {
    if model.schema.inputs.is_empty() {
        return Err(ANEError::InvalidShape("Model has no input specifications".to_string()));
    }
    
    let expected_input = &model.schema.inputs[0];
    let expected_elements = expected_input.shape.iter().product::<usize>();
    
    if input.len() != expected_elements {
        return Err(ANEError::InvalidShape(
            format!("Input size mismatch: expected {} elements, got {}", 
                   expected_elements, input.len())
        ));
    }
    
    Ok(())
}

/// Prepare input tensor for inference
fn prepare_input(
    model: &LoadedCoreMLModel,
    input: &[f32],
    options: &InferenceOptions,
) -> Result<Vec<f32>> {
    // TODO: Implement actual input preparation
    // This would include:
    // - Data type conversion (f32 -> f16 if needed)
    // - Shape validation and reshaping
    // - Normalization if required
    // - Batch dimension handling
    
    // For now, just return a copy
    Ok(input.to_vec())
}

/// Execute inference with timeout
async fn execute_with_timeout(
    model: &LoadedCoreMLModel,
    input: &[f32],
    options: &InferenceOptions,
) -> Result<Vec<f32>> {
    let timeout_duration = Duration::from_millis(options.timeout_ms);
    
    let inference_future = async {
        // TODO: Implement actual Core ML inference
        // This would use Core ML's MLModel.predictionFromFeatures:options:error:
        
        // For now, simulate inference with a delay
        tokio::time::sleep(Duration::from_millis(10)).await;
        
        // Return placeholder output
        let output_size = model.schema.outputs.iter()
            .map(|output| output.shape.iter().product::<usize>())
            .sum::<usize>()
            .max(1);
            
        Ok::<_, ANEError>(vec![0.0f32; output_size])
    };
    
    tokio::time::timeout(timeout_duration, inference_future)
        .await
        .map_err(|_| ANEError::Timeout(options.timeout_ms))?
}

/// Process output tensor
fn process_output(
    model: &LoadedCoreMLModel,
    output: &[f32],
) -> Result<Vec<f32>> {
    // TODO: Implement actual output processing
    // This would include:
    // - Data type conversion (f16 -> f32 if needed)
    // - Shape validation
    // - Post-processing (softmax, normalization, etc.)
    // - Batch dimension handling
    
    // For now, just return a copy
    Ok(output.to_vec())
}

/// Calculate performance metrics
fn calculate_metrics(
    total_time: Duration,
    core_time: Duration,
    input_prep_time: Duration,
    output_proc_time: Duration,
    _input_size: usize,
    _output_size: usize,
) -> InferenceMetrics {
    let total_ms = total_time.as_millis() as u64;
    let core_ms = core_time.as_millis() as u64;
    let input_prep_ms = input_prep_time.as_millis() as u64;
    let output_proc_ms = output_proc_time.as_millis() as u64;
    
    // Calculate throughput (inferences per second)
    let throughput_ips = if total_ms > 0 {
        1000.0 / total_ms as f64
    } else {
        0.0
    };
    
    // Calculate efficiency metrics
    let memory_efficiency = if total_ms > 0 {
        (core_ms as f32 / total_ms as f32).min(1.0)
    } else {
        1.0
    };
    
    let compute_efficiency = if core_ms > 0 {
        (core_ms as f32 / total_ms as f32).min(1.0)
    } else {
        1.0
    };
    
    InferenceMetrics {
        total_time_ms: total_ms,
        core_time_ms: core_ms,
        input_prep_time_ms: input_prep_ms,
        output_proc_time_ms: output_proc_ms,
        throughput_ips,
        memory_efficiency,
        compute_efficiency,
    }
}

/// Estimate memory usage for inference
fn estimate_memory_usage(
    model: &LoadedCoreMLModel,
    input: &[f32],
    output: &[f32],
) -> usize {
    // Model memory (from metadata)
    let model_mb = (model.metadata.size_bytes / (1024 * 1024)) as usize;
    
    // Input memory
    let input_mb = (input.len() * 4) / (1024 * 1024); // 4 bytes per f32
    
    // Output memory
    let output_mb = (output.len() * 4) / (1024 * 1024); // 4 bytes per f32
    
    // Overhead (model loading, intermediate tensors, etc.)
    let overhead_mb = (model_mb + input_mb + output_mb) / 4; // 25% overhead
    
    model_mb + input_mb + output_mb + overhead_mb
}

/// Execute batch inference
/// 
/// # Arguments
/// * `model` - Loaded Core ML model
/// * `inputs` - Batch of input tensors
/// * `options` - Inference options
/// 
/// # Returns
/// * `Ok(Vec<InferenceResult>)` - Batch of inference results
/// * `Err(ANEError)` - If batch inference fails
pub async fn execute_batch_inference(
    model: &LoadedCoreMLModel,
    inputs: &[Vec<f32>],
    options: &InferenceOptions,
) -> Result<Vec<InferenceResult>> {
    if inputs.is_empty() {
        return Ok(vec![]);
    }
    
    let batch_size = options.batch_size.unwrap_or(1);
    let mut results = Vec::new();
    
    // Process inputs in batches
    for batch in inputs.chunks(batch_size) {
        let batch_results = execute_batch_chunk(model, batch, options).await?;
        results.extend(batch_results);
    }
    
    Ok(results)
}

/// Execute a single batch chunk
async fn execute_batch_chunk(
    model: &LoadedCoreMLModel,
    batch: &[Vec<f32>],
    options: &InferenceOptions,
) -> Result<Vec<InferenceResult>> {
    let mut results = Vec::new();
    
    for input in batch {
        let result = execute_inference(model, input, options).await?;
        results.push(result);
    }
    
    Ok(results)
}

/// Update performance metrics with EWMA
pub fn update_performance_metrics(
    current_metrics: &mut crate::ane::ANEPerformanceMetrics,
    new_result: &InferenceResult,
    alpha: f64,
) {
    // Update total inferences
    current_metrics.total_inferences += 1;
    
    // Update average latency using EWMA
    let new_latency = new_result.execution_time_ms as f64;
    current_metrics.average_latency_ms = Ewma::update(
        current_metrics.average_latency_ms,
        new_latency,
        alpha,
    );
    
    // Update peak memory usage
    if new_result.memory_usage_mb > current_metrics.peak_memory_usage_mb {
        current_metrics.peak_memory_usage_mb = new_result.memory_usage_mb;
    }
    
    // Update last inference time
    current_metrics.last_inference_time = std::time::Instant::now();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ane::models::coreml_model::{ModelMetadata, ModelSchema, IOTensorSpec, DType};
    use std::time::Instant;

    fn create_test_model() -> LoadedCoreMLModel {
        LoadedCoreMLModel {
            model_id: "test_model".to_string(),
            compiled_path: std::path::PathBuf::from("/tmp/test.mlmodelc"),
            metadata: ModelMetadata {
                path: std::path::PathBuf::from("/tmp/test.mlmodelc"),
                size_bytes: 1024,
                format: "mlmodelc".to_string(),
                version: None,
                description: None,
                author: None,
                license: None,
            },
            schema: ModelSchema {
                inputs: vec![IOTensorSpec {
                    name: "input".to_string(),
                    shape: vec![1, 3, 224, 224],
                    dtype: DType::F32,
                    optional: false,
                }],
                outputs: vec![IOTensorSpec {
                    name: "output".to_string(),
                    shape: vec![1, 1000],
                    dtype: DType::F32,
                    optional: false,
                }],
            },
            loaded_at: Instant::now(),
            last_accessed: Instant::now(),
        }
    }

    #[test]
    fn test_inference_options_default() {
        let options = InferenceOptions::default();
        assert_eq!(options.timeout_ms, 5000);
        assert_eq!(options.precision, Some("fp16".to_string()));
        assert_eq!(options.compute_units, Some("all".to_string()));
        assert!(options.enable_monitoring);
    }

    #[test]
    fn test_input_validation() {
        let model = create_test_model();
        
        // Valid input
        let valid_input = vec![0.0f32; 1 * 3 * 224 * 224];
        assert!(validate_input(&model, &valid_input).is_ok());
        
        // Invalid input size
        let invalid_input = vec![0.0f32; 100];
        assert!(validate_input(&model, &invalid_input).is_err());
    }

    #[test]
    fn test_metrics_calculation() {
        let total_time = Duration::from_millis(100);
        let core_time = Duration::from_millis(80);
        let input_prep_time = Duration::from_millis(10);
        let output_proc_time = Duration::from_millis(10);
        
        let metrics = calculate_metrics(
            total_time,
            core_time,
            input_prep_time,
            output_proc_time,
            1000,
            100,
        );
        
        assert_eq!(metrics.total_time_ms, 100);
        assert_eq!(metrics.core_time_ms, 80);
        assert_eq!(metrics.input_prep_time_ms, 10);
        assert_eq!(metrics.output_proc_time_ms, 10);
        assert_eq!(metrics.throughput_ips, 10.0); // 1000ms / 100ms = 10 ips
        assert_eq!(metrics.memory_efficiency, 0.8); // 80ms / 100ms
        assert_eq!(metrics.compute_efficiency, 0.8); // 80ms / 100ms
    }

    #[test]
    fn test_memory_usage_estimation() {
        let model = create_test_model();
        let input = vec![0.0f32; 1000];
        let output = vec![0.0f32; 100];
        
        let memory_mb = estimate_memory_usage(&model, &input, &output);
        assert!(memory_mb > 0);
    }

    #[test]
    fn test_performance_metrics_update() {
        let mut metrics = crate::ane::ANEPerformanceMetrics {
            total_inferences: 0,
            average_latency_ms: 0.0,
            peak_memory_usage_mb: 0,
            error_count: 0,
            last_inference_time: Instant::now(),
        };
        
        let result = InferenceResult {
            output: vec![0.0f32; 100],
            execution_time_ms: 50,
            memory_usage_mb: 64,
            metrics: InferenceMetrics::default(),
        };
        
        update_performance_metrics(&mut metrics, &result, 0.2);
        
        assert_eq!(metrics.total_inferences, 1);
        assert_eq!(metrics.average_latency_ms, 50.0);
        assert_eq!(metrics.peak_memory_usage_mb, 64);
    }

    #[tokio::test]
    async fn test_execute_inference() {
        let model = create_test_model();
        let input = vec![0.0f32; 1 * 3 * 224 * 224];
        let options = InferenceOptions::default();
        
        let result = execute_inference(&model, &input, &options).await;
        assert!(result.is_ok());
        
        let result = result.unwrap();
        assert!(!result.output.is_empty());
        assert!(result.execution_time_ms > 0);
        assert!(result.memory_usage_mb > 0);
    }

    #[tokio::test]
    async fn test_batch_inference() {
        let model = create_test_model();
        let inputs = vec![
            vec![0.0f32; 1 * 3 * 224 * 224],
            vec![0.0f32; 1 * 3 * 224 * 224],
        ];
        let options = InferenceOptions {
            batch_size: Some(2),
            ..Default::default()
        };
        
        let results = execute_batch_inference(&model, &inputs, &options).await;
        assert!(results.is_ok());
        
        let results = results.unwrap();
        assert_eq!(results.len(), 2);
    }
}
