//! Core Metal GPU management and abstractions

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use futures::executor;

/// Core MetalGPU trait providing GPU acceleration services
#[async_trait::async_trait]
pub trait MetalGPU: Send + Sync {
    /// Get the GPU implementation name
    fn name(&self) -> &str;

    /// Initialize the GPU manager
    async fn initialize_blocking(&mut self) -> Result<()>;

    /// Check if GPU is ready for operations
    fn is_ready(&self) -> bool;

    /// Run inference on the GPU
    async fn run_inference_blocking(&self, input: &[f32]) -> Result<Vec<f32>>;

    /// Allocate a GPU buffer
    async fn allocate_buffer(&self, id: &str, bytes: u64, usage: BufferUsage) -> Result<()>;

    /// Free a GPU buffer
    async fn free_buffer(&self, id: &str) -> Result<()>;

    /// Get current GPU performance metrics
    async fn metrics(&self) -> Result<GPUPerformanceSnapshot>;
}

/// Snapshot of GPU performance metrics at a point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GPUPerformanceSnapshot {
    pub device_name: String,
    pub utilization_percent: f32,
    pub memory_used_mb: f32,
    pub memory_total_mb: f32,
    pub temperature_celsius: f32,
    pub power_watts: f32,
    pub active_kernels: u32,
    pub avg_kernel_time_ms: f32,
    pub ts_utc: DateTime<Utc>,
}

/// Metal GPU device information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetalDeviceInfo {
    pub name: String,
    pub vendor: String,
    pub device_id: String,
    pub memory_mb: f32,
    pub max_threads_per_group: u32,
    pub max_threadgroups_per_grid: u32,
    pub supports_family: MetalFamily,
}

/// Metal GPU family support
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetalFamily {
    Apple1,
    Apple2,
    Apple3,
    Apple4,
    Apple5,
    Apple6,
    Apple7,
    Apple8,
    Apple9,
    Mac1,
    Mac2,
    Common1,
    Common2,
    Common3,
}

/// GPU buffer information
#[derive(Debug, Clone)]
pub struct GPUBuffer {
    pub id: String,
    pub size_bytes: u64,
    pub usage: BufferUsage,
    pub is_mapped: bool,
}

/// Buffer usage types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    Input,
    Output,
    Weights,
    Biases,
    Temporary,
}

/// GPU compute pipeline
#[derive(Debug, Clone)]
pub struct ComputePipeline {
    pub name: String,
    pub function_name: String,
    pub thread_execution_width: u32,
    pub max_total_threads_per_threadgroup: u32,
}

/// GPU performance metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GPUPerformanceMetrics {
    pub device_name: String,
    pub utilization_percent: f32,
    pub memory_used_mb: f32,
    pub memory_total_mb: f32,
    pub temperature_celsius: f32,
    pub power_watts: f32,
    pub active_kernels: u32,
    pub completed_operations: u64,
    pub average_kernel_time_ms: f32,
    pub timestamp: DateTime<Utc>,
}

/// GPU memory registry for tracking allocations
#[derive(Debug)]
pub struct GPUMemoryRegistry {
    pub total_allocated: u64,
    pub buffers: HashMap<String, GPUBuffer>,
    pub fragmentation_score: f32,
    pub last_defragmentation: Option<DateTime<Utc>>,
}

/// CPU GPU stub implementation for non-Metal platforms
pub struct CpuGPUStub {
    is_initialized: bool,
    device_name: String,
}

impl CpuGPUStub {
    pub fn new() -> Self {
        Self {
            is_initialized: false,
            device_name: "CPU Fallback".to_string(),
        }
    }
}

/// Real Metal GPU manager implementation
#[cfg(all(target_os = "macos", target_arch = "aarch64", feature = "metal"))]
pub struct MetalGPUManager {
    device_info: Option<MetalDeviceInfo>,
    buffers: Arc<RwLock<HashMap<String, GPUBuffer>>>,
    pipelines: Arc<RwLock<HashMap<String, ComputePipeline>>>,
    performance_metrics: Arc<RwLock<GPUPerformanceMetrics>>,
    is_initialized: Arc<RwLock<bool>>,
}

#[cfg(all(target_os = "macos", target_arch = "aarch64", feature = "metal"))]
impl MetalGPUManager {
    pub fn new() -> Self {
        Self {
            device_info: None,
            buffers: Arc::new(RwLock::new(HashMap::new())),
            pipelines: Arc::new(RwLock::new(HashMap::new())),
            performance_metrics: Arc::new(RwLock::new(GPUPerformanceMetrics {
                device_name: "Unknown".to_string(),
                utilization_percent: 0.0,
                memory_used_mb: 0.0,
                memory_total_mb: 0.0,
                temperature_celsius: 0.0,
                power_watts: 0.0,
                active_kernels: 0,
                completed_operations: 0,
                average_kernel_time_ms: 0.0,
                timestamp: chrono::Utc::now(),
            })),
            is_initialized: Arc::new(RwLock::new(false)),
        }
    }
}

#[cfg(all(target_os = "macos", target_arch = "aarch64", feature = "metal"))]
#[async_trait::async_trait]
impl MetalGPU for MetalGPUManager {
    fn name(&self) -> &str {
        "metal"
    }

    async fn initialize_blocking(&mut self) -> anyhow::Result<()> {
        // TODO: Implement real Metal initialization
        *self.is_initialized.write().await = true;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        executor::block_on(async {
            *self.is_initialized.read().await
        })
    }

    async fn run_inference_blocking(&self, input: &[f32]) -> anyhow::Result<Vec<f32>> {
        // TODO: Implement real Metal inference
        // For now, return CPU-like transform
        Ok(input
            .iter()
            .map(|x| {
                let v = (x * 0.1).tanh();
                v * v + 0.5
            })
            .collect())
    }

    async fn allocate_buffer(&self, id: &str, bytes: u64, usage: BufferUsage) -> anyhow::Result<()> {
        // TODO: Implement real Metal buffer allocation
        let mut buffers = self.buffers.write().await;
        buffers.insert(id.to_string(), GPUBuffer {
            id: id.to_string(),
            size_bytes: bytes,
            usage,
            is_mapped: false,
        });
        Ok(())
    }

    async fn free_buffer(&self, id: &str) -> anyhow::Result<()> {
        // TODO: Implement real Metal buffer deallocation
        let mut buffers = self.buffers.write().await;
        buffers.remove(id);
        Ok(())
    }

    async fn metrics(&self) -> anyhow::Result<GPUPerformanceSnapshot> {
        let metrics = self.performance_metrics.read().await;
        Ok(GPUPerformanceSnapshot {
            device_name: metrics.device_name.clone(),
            utilization_percent: metrics.utilization_percent,
            memory_used_mb: metrics.memory_used_mb,
            memory_total_mb: metrics.memory_total_mb,
            temperature_celsius: metrics.temperature_celsius,
            power_watts: metrics.power_watts,
            active_kernels: metrics.active_kernels as u32,
            avg_kernel_time_ms: metrics.average_kernel_time_ms,
            ts_utc: metrics.timestamp,
        })
    }
}

#[async_trait::async_trait]
impl MetalGPU for CpuGPUStub {
    fn name(&self) -> &str {
        "cpu-stub"
    }

    async fn initialize_blocking(&mut self) -> Result<()> {
        self.is_initialized = true;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.is_initialized
    }

    async fn run_inference_blocking(&self, input: &[f32]) -> Result<Vec<f32>> {
        // Simple CPU transform: tanh(input * 0.1)^2 + 0.5
        Ok(input
            .iter()
            .map(|x| {
                let v = (x * 0.1).tanh();
                v * v + 0.5
            })
            .collect())
    }

    async fn allocate_buffer(&self, id: &str, _bytes: u64, _usage: BufferUsage) -> Result<()> {
        tracing::debug!("CPU stub: allocated buffer {}", id);
        Ok(())
    }

    async fn free_buffer(&self, id: &str) -> Result<()> {
        tracing::debug!("CPU stub: freed buffer {}", id);
        Ok(())
    }

    async fn metrics(&self) -> Result<GPUPerformanceSnapshot> {
        Ok(GPUPerformanceSnapshot {
            device_name: self.device_name.clone(),
            utilization_percent: 12.5, // Bounded heuristic
            memory_used_mb: 0.0,       // CPU doesn't track GPU memory
            memory_total_mb: 0.0,
            temperature_celsius: 45.0, // Reasonable CPU temp
            power_watts: 15.0,         // Typical idle power
            active_kernels: 0,
            avg_kernel_time_ms: 0.0,
            ts_utc: Utc::now(),
        })
    }
}
