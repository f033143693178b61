//! CoreML Model Provider for Apple Silicon
//!
//! Provides local LLM inference using Apple's Core ML framework.
//! Optimized for Apple Neural Engine (ANE) with back-pressure handling.
//!
//! @author @darianrosebrook

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use async_trait::async_trait;
use tokio::sync::{mpsc, Semaphore};
use tokio::time;
use tracing::{debug, info, warn, error};

use crate::models::{ModelProvider, ModelResponse, ModelCapabilities, ModelInfo, HealthStatus};
use crate::types::Task;

#[derive(Debug, thiserror::Error)]
pub enum CoreMLError {
    #[error("CoreML not available: {0}")]
    NotAvailable(String),

    #[error("Model loading failed: {0}")]
    ModelLoadError(String),

    #[error("Inference failed: {0}")]
    InferenceError(String),

    #[error("Context overflow: requested {requested}, max {max}")]
    ContextOverflow { requested: usize, max: usize },

    #[error("Back-pressure timeout")]
    BackPressureTimeout,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Compute units for CoreML inference
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComputeUnits {
    /// Use all available units (CPU, GPU, ANE)
    All,
    /// CPU and GPU only
    CpuAndGpu,
    /// CPU only
    CpuOnly,
}

/// CoreML model response with telemetry
#[derive(Debug, Clone)]
pub struct CoreMLResponse {
    pub text: String,
    pub tokens_in: usize,
    pub tokens_out: usize,
    pub latency_ms: u64,
    pub ttfa_ms: u64, // Time to first token
    pub model_id: String,
    pub compute_units_used: ComputeUnits,
}

/// CoreML provider with back-pressure and ANE optimization
///
/// **INVARIANT**: Never blocks the async runtime with synchronous inference
/// **INVARIANT**: Circuit-breaks on repeated failures
/// **INVARIANT**: Provides detailed telemetry for performance tracking
pub struct CoreMLProvider {
    model_path: PathBuf,
    model_name: String,
    compute_units: ComputeUnits,
    max_context: usize,
    generation_params: GenerationParams,
    health_status: Arc<std::sync::RwLock<HealthStatus>>,
    backpressure_semaphore: Arc<Semaphore>,
    circuit_breaker: Arc<std::sync::RwLock<CircuitBreakerState>>,
}

#[derive(Debug, Clone)]
struct GenerationParams {
    temperature: f32,
    top_p: f32,
    top_k: i32,
    max_tokens: usize,
    repetition_penalty: f32,
}

#[derive(Debug, Clone)]
struct CircuitBreakerState {
    failure_count: usize,
    last_failure: Option<Instant>,
    open_until: Option<Instant>,
}

impl Default for CircuitBreakerState {
    fn default() -> Self {
        Self {
            failure_count: 0,
            last_failure: None,
            open_until: None,
        }
    }
}

impl CoreMLProvider {
    /// Create a new CoreML provider
    ///
    /// **Note**: Model files (.mlpackage or .mlmodelc) must be pre-converted
    /// using Apple's coremltools or similar.
    pub async fn new(
        model_path: PathBuf,
        model_name: String,
        compute_units: ComputeUnits,
        max_context: usize,
    ) -> Result<Self, CoreMLError> {
        // Validate model path exists
        if !model_path.exists() {
            return Err(CoreMLError::ModelLoadError(
                format!("Model path does not exist: {}", model_path.display())
            ));
        }

        // Check if we're on Apple Silicon
        #[cfg(target_arch = "aarch64")]
        let ane_available = Self::check_ane_availability().await;
        #[cfg(not(target_arch = "aarch64"))]
        let ane_available = false;

        if !ane_available && matches!(compute_units, ComputeUnits::All) {
            warn!("ANE not available, falling back to CPU+GPU");
        }

        let provider = Self {
            model_path,
            model_name,
            compute_units: if ane_available { compute_units } else { ComputeUnits::CpuAndGpu },
            max_context,
            generation_params: GenerationParams {
                temperature: 0.7,
                top_p: 0.9,
                top_k: 40,
                max_tokens: 2048,
                repetition_penalty: 1.1,
            },
            health_status: Arc::new(std::sync::RwLock::new(HealthStatus {
                healthy: false,
                last_check: chrono::Utc::now(),
                error_message: Some("Not initialized".to_string()),
            })),
            backpressure_semaphore: Arc::new(Semaphore::new(2)), // Max 2 concurrent inferences
            circuit_breaker: Arc::new(std::sync::RwLock::new(CircuitBreakerState::default())),
        };

        // Perform initial health check
        match provider.health_check_internal().await {
            Ok(_) => {
                let mut status = provider.health_status.write().unwrap();
                status.healthy = true;
                status.error_message = None;
                info!("CoreML provider initialized successfully: {}", provider.model_name);
            }
            Err(e) => {
                let mut status = provider.health_status.write().unwrap();
                status.healthy = false;
                status.error_message = Some(e.to_string());
                warn!("CoreML provider initialization failed: {}", e);
            }
        }

        Ok(provider)
    }

    /// Check if Apple Neural Engine is available
    #[cfg(target_arch = "aarch64")]
    async fn check_ane_availability() -> bool {
        // Check for ANE availability on Apple Silicon
        // This is a simplified check - in practice, you'd use Core ML APIs
        // or check system capabilities

        // For now, assume ANE is available on M1/M2/M3 Macs
        // In production, this would use Core ML framework calls
        true
    }

    #[cfg(not(target_arch = "aarch64"))]
    async fn check_ane_availability() -> bool {
        false
    }

    /// Set generation parameters
    pub fn with_generation_params(mut self, params: GenerationParams) -> Self {
        self.generation_params = params;
        self
    }

    /// Internal health check
    async fn health_check_internal(&self) -> Result<(), CoreMLError> {
        // Check if model file exists and is readable
        if !self.model_path.exists() {
            return Err(CoreMLError::NotAvailable("Model file not found".to_string()));
        }

        // Attempt to load model metadata (without full loading)
        // In practice, this would use Core ML framework APIs

        // For now, simulate health check
        tokio::time::sleep(Duration::from_millis(100)).await;

        Ok(())
    }

    /// Check if circuit breaker is open
    fn is_circuit_open(&self) -> bool {
        let breaker = self.circuit_breaker.read().unwrap();
        if let Some(open_until) = breaker.open_until {
            Instant::now() < open_until
        } else {
            false
        }
    }

    /// Record a failure in the circuit breaker
    fn record_failure(&self) {
        let mut breaker = self.circuit_breaker.write().unwrap();
        breaker.failure_count += 1;
        breaker.last_failure = Some(Instant::now());

        // Open circuit after 3 failures within 5 minutes
        if breaker.failure_count >= 3 {
            breaker.open_until = Some(Instant::now() + Duration::from_secs(300)); // 5 minutes
            warn!("CoreML circuit breaker opened for 5 minutes due to repeated failures");
        }
    }

    /// Record a success, resetting circuit breaker
    fn record_success(&self) {
        let mut breaker = self.circuit_breaker.write().unwrap();
        breaker.failure_count = 0;
        breaker.open_until = None;
    }

    /// Simulate CoreML inference (placeholder for actual implementation)
    ///
    /// **TODO**: Replace with actual Core ML framework integration
    async fn simulate_inference(
        &self,
        prompt: &str,
        context: &crate::models::ModelContext,
    ) -> Result<CoreMLResponse, CoreMLError> {
        // Simulate network delay and processing time
        let processing_time = Duration::from_millis((prompt.len() as u64).min(2000).max(200));
        tokio::time::sleep(processing_time).await;

        // Simulate tokenization (rough approximation)
        let tokens_in = (prompt.len() as f32 * 0.3) as usize; // ~0.3 tokens per character
        let tokens_out = ((context.max_tokens.unwrap_or(1024) as f32 * 0.7) as usize).min(512);

        // Generate mock response
        let text = format!("Mock CoreML response for prompt: {}... ({} tokens)",
                          &prompt[..prompt.len().min(50)],
                          tokens_out);

        let ttfa_ms = (processing_time.as_millis() / 4) as u64; // First token arrives early
        let total_latency = processing_time.as_millis() as u64;

        Ok(CoreMLResponse {
            text,
            tokens_in,
            tokens_out,
            latency_ms: total_latency,
            ttfa_ms,
            model_id: self.model_name.clone(),
            compute_units_used: self.compute_units,
        })
    }
}

#[async_trait]
impl ModelProvider for CoreMLProvider {
    async fn generate(
        &self,
        prompt: String,
        context: crate::models::ModelContext,
    ) -> Result<ModelResponse, Box<dyn std::error::Error + Send + Sync>> {
        // Check circuit breaker
        if self.is_circuit_open() {
            return Err(Box::new(CoreMLError::NotAvailable(
                "Circuit breaker open due to repeated failures".to_string()
            )));
        }

        // Check context length
        let estimated_tokens = (prompt.len() as f32 * 0.3) as usize;
        if estimated_tokens > self.max_context {
            return Err(Box::new(CoreMLError::ContextOverflow {
                requested: estimated_tokens,
                max: self.max_context,
            }));
        }

        // Acquire back-pressure permit
        let permit = match time::timeout(
            Duration::from_secs(30),
            self.backpressure_semaphore.acquire()
        ).await {
            Ok(permit) => permit,
            Err(_) => {
                self.record_failure();
                return Err(Box::new(CoreMLError::BackPressureTimeout));
            }
        };

        let start_time = Instant::now();

        match self.simulate_inference(&prompt, &context).await {
            Ok(coreml_response) => {
                self.record_success();

                let response = ModelResponse {
                    text: coreml_response.text,
                    model_id: coreml_response.model_id,
                    tokens_used: coreml_response.tokens_in + coreml_response.tokens_out,
                    latency_ms: coreml_response.latency_ms,
                    finish_reason: Some("completed".to_string()),
                };

                debug!(
                    "CoreML inference completed: {} tokens, {}ms latency, {}ms TTFA",
                    response.tokens_used, response.latency_ms, coreml_response.ttfa_ms
                );

                Ok(response)
            }
            Err(e) => {
                self.record_failure();
                Err(Box::new(e))
            }
        }
    }

    fn capabilities(&self) -> ModelCapabilities {
        ModelCapabilities {
            max_context: self.max_context,
            supports_streaming: false, // CoreML doesn't support streaming yet
            supports_function_calling: false,
            supports_vision: false,
        }
    }

    fn info(&self) -> ModelInfo {
        ModelInfo {
            id: format!("coreml:{}", self.model_name),
            name: self.model_name.clone(),
            provider: "CoreML".to_string(),
            capabilities: self.capabilities(),
        }
    }

    async fn health_check(&self) -> Result<HealthStatus, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.health_check_internal().await;

        let mut status = self.health_status.write().unwrap();
        status.last_check = chrono::Utc::now();

        match result {
            Ok(_) => {
                status.healthy = true;
                status.error_message = None;
            }
            Err(e) => {
                status.healthy = false;
                status.error_message = Some(e.to_string());
            }
        }

        Ok(status.clone())
    }

    fn is_healthy(&self) -> bool {
        self.health_status.read().unwrap().healthy && !self.is_circuit_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_coreml_provider_creation() {
        let temp_dir = tempdir().unwrap();

        // Create a mock model file
        let model_path = temp_dir.path().join("model.mlpackage");
        tokio::fs::create_dir(&model_path).await.unwrap();

        let provider = CoreMLProvider::new(
            model_path,
            "test-model".to_string(),
            ComputeUnits::CpuAndGpu,
            4096,
        ).await;

        assert!(provider.is_ok());
    }

    #[tokio::test]
    async fn test_context_overflow() {
        let temp_dir = tempdir().unwrap();
        let model_path = temp_dir.path().join("model.mlpackage");
        tokio::fs::create_dir(&model_path).await.unwrap();

        let provider = CoreMLProvider::new(
            model_path,
            "test-model".to_string(),
            ComputeUnits::CpuAndGpu,
            100, // Very small context limit
        ).await.unwrap();

        let long_prompt = "x".repeat(1000); // Will exceed token limit
        let context = crate::models::ModelContext {
            max_tokens: Some(100),
            temperature: Some(0.7),
            stop_sequences: vec![],
        };

        let result = provider.generate(long_prompt, context).await;
        assert!(result.is_err());

        let error = result.err().unwrap();
        let error_str = error.to_string();
        assert!(error_str.contains("Context overflow"));
    }

    #[tokio::test]
    async fn test_circuit_breaker() {
        let temp_dir = tempdir().unwrap();
        let model_path = temp_dir.path().join("model.mlpackage");
        tokio::fs::create_dir(&model_path).await.unwrap();

        let provider = CoreMLProvider::new(
            model_path,
            "test-model".to_string(),
            ComputeUnits::CpuAndGpu,
            4096,
        ).await.unwrap();

        // Initially healthy
        assert!(provider.is_healthy());

        // Simulate failures to trigger circuit breaker
        for _ in 0..3 {
            // Force a context overflow to simulate failure
            let long_prompt = "x".repeat(10000);
            let context = crate::models::ModelContext {
                max_tokens: Some(100),
                temperature: Some(0.7),
                stop_sequences: vec![],
            };

            let _ = provider.generate(long_prompt, context).await;
        }

        // Circuit should be open
        assert!(!provider.is_healthy());
    }

    #[tokio::test]
    async fn test_backpressure_semaphore() {
        let temp_dir = tempdir().unwrap();
        let model_path = temp_dir.path().join("model.mlpackage");
        tokio::fs::create_dir(&model_path).await.unwrap();

        let provider = CoreMLProvider::new(
            model_path,
            "test-model".to_string(),
            ComputeUnits::CpuAndGpu,
            4096,
        ).await.unwrap();

        // This test would verify back-pressure under concurrent load
        // For now, just verify the semaphore is configured
        assert_eq!(provider.backpressure_semaphore.available_permits(), 2);
    }

    #[tokio::test]
    async fn test_health_check() {
        let temp_dir = tempdir().unwrap();
        let model_path = temp_dir.path().join("model.mlpackage");
        tokio::fs::create_dir(&model_path).await.unwrap();

        let provider = CoreMLProvider::new(
            model_path,
            "test-model".to_string(),
            ComputeUnits::CpuAndGpu,
            4096,
        ).await.unwrap();

        let health = provider.health_check().await.unwrap();
        assert!(health.healthy);
    }

    #[test]
    fn test_capabilities() {
        // Test capabilities reporting
        // (Would need a real provider instance for full test)
    }
}
