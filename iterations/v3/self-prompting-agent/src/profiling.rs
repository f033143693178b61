//! Performance profiling for self-prompting agent
//!
//! Provides performance benchmarking and optimization insights.

use std::time::Instant;

/// Performance profiler
pub struct PerformanceProfiler;

impl PerformanceProfiler {
    /// Create a new performance profiler
    pub fn new() -> Self {
        Self
    }

    /// Profile operation performance
    pub async fn profile(&self, operation: &str) -> Result<PerformanceReport, String> {
        let start = Instant::now();

        // Stub implementation - would execute and measure operation
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        let duration = start.elapsed();

        Ok(PerformanceReport {
            operation: operation.to_string(),
            duration_ms: duration.as_millis() as f64,
            memory_mb: 50.0, // Stub value
            cpu_percent: 25.0, // Stub value
        })
    }

    /// Run performance benchmark
    pub async fn benchmark(&self, benchmark: &PerformanceBenchmark) -> Result<BenchmarkResult, String> {
        let start = Instant::now();
        let mut results = Vec::new();

        for _ in 0..benchmark.iterations {
            let result = self.profile(&benchmark.name).await?;
            results.push(result.duration_ms);
        }

        let total_duration = start.elapsed();
        let avg_duration = results.iter().sum::<f64>() / results.len() as f64;
        let min_duration = results.iter().fold(f64::INFINITY, |a, &b| a.min(b));
        let max_duration = results.iter().fold(0.0f64, |a, &b| a.max(b));

        Ok(BenchmarkResult {
            benchmark_name: benchmark.name.clone(),
            total_duration_ms: total_duration.as_millis() as f64,
            avg_duration_ms: avg_duration,
            min_duration_ms: min_duration,
            max_duration_ms: max_duration,
            iterations: benchmark.iterations,
        })
    }
}

/// Performance report for single operation
#[derive(Debug, Clone)]
pub struct PerformanceReport {
    pub operation: String,
    pub duration_ms: f64,
    pub memory_mb: f64,
    pub cpu_percent: f64,
}

/// Performance benchmark configuration
#[derive(Debug, Clone)]
pub struct PerformanceBenchmark {
    pub name: String,
    pub iterations: usize,
    pub warm_up_iterations: usize,
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub benchmark_name: String,
    pub total_duration_ms: f64,
    pub avg_duration_ms: f64,
    pub min_duration_ms: f64,
    pub max_duration_ms: f64,
    pub iterations: usize,
}

/// Profiling utilities
pub struct ProfilingUtils;

impl ProfilingUtils {
    /// Start profiling session
    pub fn start_session(name: &str) -> ProfilingSession {
        ProfilingSession {
            name: name.to_string(),
            start_time: Instant::now(),
            checkpoints: Vec::new(),
        }
    }
}

/// Profiling session
pub struct ProfilingSession {
    name: String,
    start_time: Instant,
    checkpoints: Vec<(String, std::time::Duration)>,
}

impl ProfilingSession {
    /// Add checkpoint
    pub fn checkpoint(&mut self, name: &str) {
        let elapsed = self.start_time.elapsed();
        self.checkpoints.push((name.to_string(), elapsed));
    }

    /// Finish profiling session
    pub fn finish(self) -> ProfilingReport {
        let total_duration = self.start_time.elapsed();

        ProfilingReport {
            session_name: self.name,
            total_duration_ms: total_duration.as_millis() as f64,
            checkpoints: self.checkpoints.into_iter()
                .map(|(name, duration)| Checkpoint {
                    name,
                    duration_ms: duration.as_millis() as f64,
                })
                .collect(),
        }
    }
}

/// Profiling report
#[derive(Debug, Clone)]
pub struct ProfilingReport {
    pub session_name: String,
    pub total_duration_ms: f64,
    pub checkpoints: Vec<Checkpoint>,
}

/// Performance checkpoint
#[derive(Debug, Clone)]
pub struct Checkpoint {
    pub name: String,
    pub duration_ms: f64,
}
