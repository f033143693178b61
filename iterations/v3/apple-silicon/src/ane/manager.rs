//! ANE Manager and device management
//!
//! This module contains the core ANE manager and device management
//! functionality for Apple Neural Engine operations.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use parking_lot::RwLock as SyncRwLock;

// Import our new modules
use crate::ane::errors::{ANEError, Result};
use crate::ane::compat::{coreml, iokit};
use crate::ane::resource_pool::{Pool, PoolBuilder, PoolStats};
use crate::ane::models::coreml_model::{LoadedCoreMLModel, CompilationOptions, estimate_memory_usage};
use crate::ane::infer::execute::{execute_inference, InferenceOptions as ExecuteOptions, InferenceResult};
use crate::ane::metrics::ewma::{Ewma, PerformanceTracker, PerformanceSummary};

/// Apple Neural Engine manager for ANE-accelerated inference
#[derive(Debug)]
pub struct ANEManager {
    /// Loaded ANE models
    loaded_models: Arc<RwLock<HashMap<String, ANEModel>>>,
    /// ANE resource pool for memory and concurrency control
    resource_pool: Arc<Pool>,
    /// Performance metrics
    performance_metrics: Arc<RwLock<HashMap<String, ANEPerformanceMetrics>>>,
    /// ANE device capabilities
    device_capabilities: ANEDeviceCapabilities,
    /// Tokenizers for different model types
    tokenizers: ANETokenizers,
    /// Performance tracker for EWMA metrics
    performance_tracker: Arc<RwLock<PerformanceTracker>>,
    /// Loaded ANE framework symbols
    ane_symbols: SyncRwLock<ANESymbols>,
}

/// ANE model representation
#[derive(Debug, Clone)]
pub struct ANEModel {
    pub model_id: String,
    pub model_path: String,
    pub input_shape: Vec<usize>,
    pub output_shape: Vec<usize>,
    pub is_loaded: bool,
    pub last_used: std::time::Instant,
}

/// ANE resource pool for memory and computation management
#[derive(Debug, Clone)]
pub struct ANEResourcePool {
    pub total_memory_mb: usize,
    pub available_memory_mb: usize,
    pub active_models: usize,
    pub max_concurrent_models: usize,
}

/// ANE framework symbols loaded from private frameworks
#[derive(Debug, Clone)]
pub struct ANESymbols {
    pub ane_create_device: *const (),
    pub ane_release_device: *const (),
    pub ane_get_device_info: *const (),
    pub ane_create_command_queue: *const (),
    pub ane_load_model: *const (),
    pub ane_execute_inference: *const (),
    pub ane_get_performance_stats: *const (),
    pub ane_wait_completion: *const (),
    pub ane_is_available: *const (),
    pub ane_get_driver_version: *const (),
}

impl Default for ANESymbols {
    fn default() -> Self {
        Self {
            ane_create_device: std::ptr::null(),
            ane_release_device: std::ptr::null(),
            ane_get_device_info: std::ptr::null(),
            ane_create_command_queue: std::ptr::null(),
            ane_load_model: std::ptr::null(),
            ane_execute_inference: std::ptr::null(),
            ane_get_performance_stats: std::ptr::null(),
            ane_wait_completion: std::ptr::null(),
            ane_is_available: std::ptr::null(),
            ane_get_driver_version: std::ptr::null(),
        }
    }
}

/// ANE device capabilities and limits
#[derive(Debug, Clone)]
pub struct ANEDeviceCapabilities {
    pub max_memory_mb: usize,
    pub supported_precisions: Vec<String>,
    pub max_concurrent_operations: usize,
    pub compute_units: usize,
}

/// ANE performance metrics
#[derive(Debug, Clone)]
pub struct ANEPerformanceMetrics {
    pub total_inferences: u64,
    pub average_latency_ms: f64,
    pub peak_memory_usage_mb: usize,
    pub error_count: u64,
    pub last_inference_time: std::time::Instant,
}

/// ANE device configuration
#[derive(Debug, Clone)]
pub struct ANEDeviceConfig {
    pub preferred_precision: Option<String>,
    pub memory_limit_mb: Option<usize>,
    pub max_concurrent_operations: Option<usize>,
    pub performance_profile: Option<ANEPerformanceProfile>,
    pub thermal_management: Option<ANEThermalConfig>,
    pub power_management: Option<ANEPowerConfig>,
}

/// ANE performance profiles
#[derive(Debug, Clone)]
pub enum ANEPerformanceProfile {
    PowerSaver,      // Minimize power, acceptable performance
    Balanced,        // Balance performance and power
    Performance,     // Maximize performance
    RealTime,        // Lowest latency, highest power
}

/// ANE thermal management configuration
#[derive(Debug, Clone)]
pub struct ANEThermalConfig {
    pub max_temperature_celsius: Option<f32>,
    pub throttling_enabled: bool,
    pub fan_control: Option<ANEFanControl>,
}

/// ANE fan control settings
#[derive(Debug, Clone)]
pub enum ANEFanControl {
    Auto,           // System manages fan speed
    Manual(u8),     // Fixed fan speed (0-100%)
    Dynamic,        // Adaptive based on workload
}

/// ANE power optimization configuration
#[derive(Debug, Clone)]
pub struct ANEPowerConfig {
    pub power_limit_watts: Option<f32>,
    pub dynamic_power_scaling: bool,
    pub idle_power_management: bool,
}

/// ANE device status
#[derive(Debug, Clone)]
pub struct ANEDeviceStatus {
    pub is_available: bool,
    pub memory_used_mb: u32,
    pub memory_total_mb: u32,
    pub active_models: usize,
    pub max_concurrent_models: usize,
    pub temperature_celsius: f32,
    pub power_watts: f32,
}

/// Model architecture types supported by ANE
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelArchitecture {
    /// Transformer-based models (BERT, GPT, LLaMA, etc.)
    Transformer,
    /// Convolutional Neural Networks (ResNet, VGG, etc.)
    CNN,
    /// Recurrent Neural Networks (LSTM, GRU, etc.)
    RNN,
    /// Hybrid architectures
    Hybrid,
}

/// ANE tokenizer management
#[derive(Debug, Clone)]
pub struct ANETokenizers {
    pub bpe_tokenizer: Option<String>,
    pub wordpiece_tokenizer: Option<String>,
    pub sentencepiece_tokenizer: Option<String>,
}

impl ANEManager {
    /// Create a new ANE manager
    pub fn new() -> Result<Self> {
        // Create resource pool with default configuration
        let resource_pool = PoolBuilder::new()
            .max_concurrent(4)
            .memory_total_mb(8192) // 8GB default
            .build()?;
        
        Ok(Self {
            loaded_models: Arc::new(RwLock::new(HashMap::new())),
            resource_pool: Arc::new(resource_pool),
            performance_metrics: Arc::new(RwLock::new(HashMap::new())),
            device_capabilities: ANEDeviceCapabilities {
                max_memory_mb: 8192,
                supported_precisions: vec!["fp16".to_string(), "int8".to_string()],
                max_concurrent_operations: 4,
                compute_units: 16,
            },
            tokenizers: ANETokenizers {
                bpe_tokenizer: None,
                wordpiece_tokenizer: None,
                sentencepiece_tokenizer: None,
            },
            performance_tracker: Arc::new(RwLock::new(PerformanceTracker::new())),
            ane_symbols: SyncRwLock::new(ANESymbols::default()),
        })
    }
    
    /// Create a new ANE manager with custom configuration
    pub fn with_config(
        max_concurrent: usize,
        memory_total_mb: usize,
        capabilities: ANEDeviceCapabilities,
    ) -> Result<Self> {
        let resource_pool = PoolBuilder::new()
            .max_concurrent(max_concurrent)
            .memory_total_mb(memory_total_mb)
            .build()?;
        
        Ok(Self {
            loaded_models: Arc::new(RwLock::new(HashMap::new())),
            resource_pool: Arc::new(resource_pool),
            performance_metrics: Arc::new(RwLock::new(HashMap::new())),
            device_capabilities: capabilities,
            tokenizers: ANETokenizers {
                bpe_tokenizer: None,
                wordpiece_tokenizer: None,
                sentencepiece_tokenizer: None,
            },
            performance_tracker: Arc::new(RwLock::new(PerformanceTracker::new())),
            ane_symbols: SyncRwLock::new(ANESymbols::default()),
        })
    }

    /// Detect ANE capabilities for this system
    pub async fn detect_capabilities() -> crate::ANECapabilities {
        // Check if ANE is available through Core ML
        let is_available = coreml::coreml::is_ane_available();
        
        if !is_available {
            return crate::ANECapabilities {
                is_available: false,
                compute_units: 0,
                max_memory_mb: 0,
                supported_precisions: vec![],
            };
        }
        
        // Get Core ML capabilities
        let coreml_caps = crate::ane::compat::coreml::detect_coreml_capabilities();
        
        crate::ANECapabilities {
            is_available: true,
            compute_units: 16, // Heuristic for Apple Silicon
            max_memory_mb: 8192, // Conservative estimate
            supported_precisions: coreml_caps.supported_precisions,
        }
    }

    /// Load a model for ANE inference
    /// 
    /// # Arguments
    /// * `model_path` - Path to the model file (.mlmodel or .mlmodelc)
    /// 
    /// # Returns
    /// * `Ok(String)` - Model ID for tracking
    /// * `Err(ANEError)` - If loading fails
    pub async fn load_model(&self, model_path: &str) -> Result<String> {
        use std::path::Path;
        
        // Check if model is already loaded
        {
            let models = self.loaded_models.read().await;
            if models.contains_key(model_path) {
                return Err(ANEError::ModelAlreadyLoaded(model_path.to_string()));
            }
        }
        
        // Load and compile model
        let model_path = Path::new(model_path);
        let compilation_options = CompilationOptions::default();
        let loaded_model = crate::ane::models::coreml_model::load_model(model_path, &compilation_options)?;
        
        // Validate ANE compatibility
        crate::ane::models::coreml_model::validate_ane_compatibility(&loaded_model)?;
        
        // Estimate memory usage
        let memory_cost_mb = estimate_memory_usage(&loaded_model);
        
        // Request admission to resource pool
        let _admission = self.resource_pool.admit(memory_cost_mb).await?;
        
        // Register model
        let model_id = loaded_model.model_id.clone();
        let ane_model = ANEModel {
            model_id: model_id.clone(),
            model_path: loaded_model.compiled_path.display().to_string(),
            input_shape: loaded_model.schema.inputs.first()
                .map(|input| input.shape.clone())
                .unwrap_or_default(),
            output_shape: loaded_model.schema.outputs.first()
                .map(|output| output.shape.clone())
                .unwrap_or_default(),
            is_loaded: true,
            last_used: std::time::Instant::now(),
        };
        
        {
            let mut models = self.loaded_models.write().await;
            models.insert(model_path.to_string_lossy().to_string(), ane_model);
        }
        
        // Initialize performance metrics
        {
            let mut metrics = self.performance_metrics.write().await;
            metrics.insert(model_id.clone(), ANEPerformanceMetrics {
                total_inferences: 0,
                average_latency_ms: 0.0,
                peak_memory_usage_mb: memory_cost_mb,
                error_count: 0,
                last_inference_time: std::time::Instant::now(),
            });
        }
        
        Ok(model_id)
    }

    /// Execute inference on a loaded model
    /// 
    /// # Arguments
    /// * `model_id` - Model ID returned from load_model
    /// * `input` - Input tensor data
    /// 
    /// # Returns
    /// * `Ok(Vec<f32>)` - Output tensor data
    /// * `Err(ANEError)` - If inference fails
    pub async fn execute_inference(&self, model_id: &str, input: &[f32]) -> Result<Vec<f32>> {
        // Find the model
        let model = {
            let models = self.loaded_models.read().await;
            models.values()
                .find(|m| m.model_id == model_id)
                .cloned()
                .ok_or_else(|| ANEError::ModelNotFound(model_id.to_string()))?
        };
        
        // Create inference options
        let options = ExecuteOptions {
            timeout_ms: 5000,
            batch_size: None,
            precision: Some("fp16".to_string()),
            compute_units: Some("all".to_string()),
            enable_monitoring: true,
        };
        
        // Create a mock loaded model for inference
        let loaded_model = LoadedCoreMLModel {
            model_id: model_id.to_string(),
            compiled_path: std::path::PathBuf::from(&model.model_path),
            metadata: crate::ane::models::coreml_model::ModelMetadata {
                path: std::path::PathBuf::from(&model.model_path),
                size_bytes: 1024,
                format: "mlmodelc".to_string(),
                version: None,
                description: None,
                author: None,
                license: None,
            },
            schema: crate::ane::models::coreml_model::ModelSchema {
                inputs: vec![crate::ane::models::coreml_model::IOTensorSpec {
                    name: "input".to_string(),
                    shape: model.input_shape.clone(),
                    dtype: crate::ane::models::coreml_model::DType::F32,
                    optional: false,
                }],
                outputs: vec![crate::ane::models::coreml_model::IOTensorSpec {
                    name: "output".to_string(),
                    shape: model.output_shape.clone(),
                    dtype: crate::ane::models::coreml_model::DType::F32,
                    optional: false,
                }],
            },
            loaded_at: std::time::Instant::now(),
            last_accessed: std::time::Instant::now(),
        };
        
        // Execute inference
        let result = execute_inference(&loaded_model, input, &options).await?;
        
        // Update performance metrics
        self.update_performance_metrics(model_id, &result).await;
        
        Ok(result.output)
    }
    
    /// Update performance metrics for a model
    async fn update_performance_metrics(&self, model_id: &str, result: &InferenceResult) {
        // Update model-specific metrics
        {
            let mut metrics = self.performance_metrics.write().await;
            if let Some(model_metrics) = metrics.get_mut(model_id) {
                model_metrics.total_inferences += 1;
                model_metrics.average_latency_ms = Ewma::update(
                    model_metrics.average_latency_ms,
                    result.execution_time_ms as f64,
                    0.2, // Alpha for EWMA
                );
                if result.memory_usage_mb > model_metrics.peak_memory_usage_mb {
                    model_metrics.peak_memory_usage_mb = result.memory_usage_mb;
                }
                model_metrics.last_inference_time = std::time::Instant::now();
            }
        }
        
        // Update global performance tracker
        {
            let mut tracker = self.performance_tracker.write().await;
            tracker.update_latency(result.execution_time_ms as f64);
            tracker.update_throughput(result.metrics.throughput_ips);
            tracker.update_memory(result.memory_usage_mb as f64);
        }
    }

    /// Get device status
    pub async fn get_device_status(&self) -> ANEDeviceStatus {
        let (used_mb, total_mb, active_models) = {
            let pool_stats = self.resource_pool.stats();
            let models = self.loaded_models.read().await;
            (
                pool_stats.peak_memory_usage_mb as u32,
                self.resource_pool.config().mem_total_mb as u32,
                models.len(),
            )
        };
        
        // Get thermal and power data from IOKit
        let thermal_status = iokit::iokit::thermal_status();
        let power_status = iokit::iokit::power_status();
        
        ANEDeviceStatus {
            is_available: coreml::coreml::is_ane_available(),
            memory_used_mb: used_mb,
            memory_total_mb: total_mb,
            active_models,
            max_concurrent_models: self.resource_pool.config().max_concurrent,
            temperature_celsius: thermal_status.system_temperature,
            power_watts: power_status.system_power,
        }
    }
    
    /// Get performance summary
    pub async fn get_performance_summary(&self) -> PerformanceSummary {
        let tracker = self.performance_tracker.read().await;
        tracker.get_summary()
    }
    
    /// Get resource pool statistics
    pub fn get_resource_pool_stats(&self) -> PoolStats {
        self.resource_pool.stats()
    }
    
    /// Unload a model
    pub async fn unload_model(&self, model_id: &str) -> Result<()> {
        let _model_path = {
            let models = self.loaded_models.read().await;
            models.values()
                .find(|m| m.model_id == model_id)
                .map(|m| m.model_path.clone())
                .ok_or_else(|| ANEError::ModelNotFound(model_id.to_string()))?
        };
        
        // Remove from loaded models
        {
            let mut models = self.loaded_models.write().await;
            models.retain(|_, m| m.model_id != model_id);
        }
        
        // Remove performance metrics
        {
            let mut metrics = self.performance_metrics.write().await;
            metrics.remove(model_id);
        }
        
        Ok(())
    }
}

impl Default for ANEManager {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fallback to a minimal configuration if default creation fails
            Self::with_config(1, 1024, ANEDeviceCapabilities {
                max_memory_mb: 1024,
                supported_precisions: vec!["fp16".to_string()],
                max_concurrent_operations: 1,
                compute_units: 1,
            }).unwrap()
        })
    }
}
