//! Tool Execution Engine - Secure and Efficient Tool Invocation
//!
//! Provides secure execution environment for tool invocation with timeout,
//! resource limits, and error handling.

use anyhow::{Result, Context};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, info, warn, error};

/// Tool executor for secure invocation
#[derive(Debug)]
pub struct ToolExecutor {
    /// Concurrency limiter
    concurrency_limiter: Arc<Semaphore>,
    /// Default timeout (ms)
    default_timeout_ms: u64,
    /// Execution statistics
    stats: Arc<std::sync::RwLock<ExecutionStats>>,
    /// Background cleanup task
    cleanup_task: Option<tokio::task::JoinHandle<()>>,
}

/// Tool invocation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Tool name to execute
    pub tool_name: String,
    /// Input parameters
    pub parameters: serde_json::Value,
    /// Execution context
    pub context: Option<String>,
    /// Timeout override (ms)
    pub timeout_ms: Option<u64>,
}

/// Tool execution result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool name that was executed
    pub tool_name: String,
    /// Execution result
    pub result: serde_json::Value,
    /// Execution metadata
    pub metadata: ExecutionMetadata,
    /// Execution timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Execution metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    /// Execution time (ms)
    pub execution_time_ms: u64,
    /// Memory used (MB)
    pub memory_used_mb: f64,
    /// Success flag
    pub success: bool,
    /// Error message (if any)
    pub error_message: Option<String>,
    /// Resource usage details
    pub resource_usage: ResourceUsage,
}

/// Resource usage tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceUsage {
    /// CPU time used (ms)
    pub cpu_time_ms: u64,
    /// Peak memory usage (MB)
    pub peak_memory_mb: f64,
    /// I/O operations performed
    pub io_operations: u64,
    /// Network bytes transferred
    pub network_bytes: u64,
}

/// Execution statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionStats {
    /// Total executions
    pub total_executions: u64,
    /// Successful executions
    pub successful_executions: u64,
    /// Failed executions
    pub failed_executions: u64,
    /// Average execution time (ms)
    pub avg_execution_time_ms: f64,
    /// Peak concurrent executions
    pub peak_concurrent: usize,
    /// Current active executions
    pub active_executions: usize,
    /// Total resource usage
    pub total_resource_usage: ResourceUsage,
}

/// Execution context for tracking
#[derive(Debug)]
struct ExecutionContext {
    /// Invocation request
    invocation: ToolInvocation,
    /// Start timestamp
    start_time: std::time::Instant,
    /// Resource tracking
    resource_tracker: ResourceTracker,
}

/// Resource tracker for execution monitoring
#[derive(Debug, Clone)]
struct ResourceTracker {
    /// Initial memory usage
    initial_memory: f64,
    /// Peak memory usage
    peak_memory: f64,
    /// CPU start time
    cpu_start: std::time::Instant,
    /// I/O operations
    io_operations: u64,
    /// Network bytes
    network_bytes: u64,
}

impl ToolExecutor {
    /// Create a new tool executor
    pub fn new(max_concurrent: usize, default_timeout_ms: u64) -> Self {
        let concurrency_limiter = Arc::new(Semaphore::new(max_concurrent));
        let stats = Arc::new(std::sync::RwLock::new(ExecutionStats {
            total_executions: 0,
            successful_executions: 0,
            failed_executions: 0,
            avg_execution_time_ms: 0.0,
            peak_concurrent: 0,
            active_executions: 0,
            total_resource_usage: ResourceUsage {
                cpu_time_ms: 0,
                peak_memory_mb: 0.0,
                io_operations: 0,
                network_bytes: 0,
            },
        }));

        Self {
            concurrency_limiter,
            default_timeout_ms,
            stats,
            cleanup_task: None,
        }
    }

    /// Execute a tool with the given invocation
    pub async fn execute_tool(&self, invocation: ToolInvocation) -> Result<ToolResult> {
        let permit = self.concurrency_limiter.acquire().await
            .map_err(|e| anyhow::anyhow!("Failed to acquire execution permit: {}", e))?;

        // Update active executions
        {
            let mut stats = self.stats.write().unwrap();
            stats.active_executions += 1;
            stats.peak_concurrent = stats.peak_concurrent.max(stats.active_executions);
            stats.total_executions += 1;
        }

        let result = self.execute_tool_internal(invocation).await;

        // Update final stats
        {
            let mut stats = self.stats.write().unwrap();
            stats.active_executions -= 1;

            match &result {
                Ok(_) => stats.successful_executions += 1,
                Err(_) => stats.failed_executions += 1,
            }
        }

        drop(permit);
        result
    }

    /// Internal tool execution with resource tracking
    async fn execute_tool_internal(&self, invocation: ToolInvocation) -> Result<ToolResult> {
        let start_time = std::time::Instant::now();
        let timeout_ms = invocation.timeout_ms.unwrap_or(self.default_timeout_ms);

        debug!("Executing tool: {} with timeout {}ms", invocation.tool_name, timeout_ms);

        // Create execution context
        let context = ExecutionContext {
            invocation: invocation.clone(),
            start_time,
            resource_tracker: ResourceTracker::new(),
        };

        // Execute with timeout
        let execution_future = self.perform_tool_execution(context);
        let timeout_duration = std::time::Duration::from_millis(timeout_ms);

        match tokio::time::timeout(timeout_duration, execution_future).await {
            Ok(result) => result,
            Err(_) => {
                error!("Tool execution timed out: {}", invocation.tool_name);
                Err(anyhow::anyhow!("Tool execution timed out after {}ms", timeout_ms))
            }
        }
    }

    /// Perform the actual tool execution
    async fn perform_tool_execution(&self, mut context: ExecutionContext) -> Result<ToolResult> {
        let tool_name = context.invocation.tool_name.clone();

        // In a real implementation, this would dispatch to the appropriate tool
        // For now, we'll simulate execution based on tool name

        let result_value = match tool_name.as_str() {
            "caws_validator" => self.execute_caws_validator(&context.invocation).await?,
            "claim_extractor" => self.execute_claim_extractor(&context.invocation).await?,
            "fact_verifier" => self.execute_fact_verifier(&context.invocation).await?,
            "debate_orchestrator" => self.execute_debate_orchestrator(&context.invocation).await?,
            "consensus_builder" => self.execute_consensus_builder(&context.invocation).await?,
            _ => {
                warn!("Unknown tool: {}", tool_name);
                return Err(anyhow::anyhow!("Unknown tool: {}", tool_name));
            }
        };

        let execution_time = context.start_time.elapsed().as_millis() as u64;
        let resource_usage = context.resource_tracker.finalize();

        // Update average execution time
        {
            let mut stats = self.stats.write().unwrap();
            let total_time = stats.avg_execution_time_ms * (stats.total_executions - 1) as f64 + execution_time as f64;
            stats.avg_execution_time_ms = total_time / stats.total_executions as f64;

            // Update total resource usage
            stats.total_resource_usage.cpu_time_ms += resource_usage.cpu_time_ms;
            stats.total_resource_usage.peak_memory_mb = stats.total_resource_usage.peak_memory_mb.max(resource_usage.peak_memory_mb);
            stats.total_resource_usage.io_operations += resource_usage.io_operations;
            stats.total_resource_usage.network_bytes += resource_usage.network_bytes;
        }

        let metadata = ExecutionMetadata {
            execution_time_ms: execution_time,
            memory_used_mb: resource_usage.peak_memory_mb,
            success: true,
            error_message: None,
            resource_usage,
        };

        Ok(ToolResult {
            tool_name,
            result: result_value,
            metadata,
            timestamp: chrono::Utc::now(),
        })
    }

    /// Execute CAWS validator tool
    async fn execute_caws_validator(&self, invocation: &ToolInvocation) -> Result<serde_json::Value> {
        // Simulate CAWS validation
        let spec = invocation.parameters.get("spec")
            .and_then(|v| v.as_str())
            .unwrap_or("{}");

        // Simple validation - in practice would use actual CAWS validator
        let is_valid = spec.contains("risk_tier") && spec.contains("scope");

        Ok(serde_json::json!({
            "valid": is_valid,
            "compliant": is_valid,
            "issues": if is_valid { [] } else { ["Missing risk_tier or scope"] }
        }))
    }

    /// Execute claim extractor tool
    async fn execute_claim_extractor(&self, invocation: &ToolInvocation) -> Result<serde_json::Value> {
        let content = invocation.parameters.get("content")
            .and_then(|v| v.as_str())
            .unwrap_or("");

        // Simulate claim extraction
        let claims = if content.contains("must") || content.contains("should") {
            vec![
                serde_json::json!({
                    "id": "claim_1",
                    "statement": "Extracted requirement from content",
                    "confidence": 0.85
                })
            ]
        } else {
            vec![]
        };

        Ok(serde_json::json!({
            "claims": claims,
            "total_extracted": claims.len()
        }))
    }

    /// Execute fact verifier tool
    async fn execute_fact_verifier(&self, invocation: &ToolInvocation) -> Result<serde_json::Value> {
        let claim = invocation.parameters.get("claim")
            .and_then(|v| v.as_str())
            .unwrap_or("");

        // Simulate fact verification
        let verified = claim.len() > 10 && !claim.contains("false");
        let confidence = if verified { 0.9 } else { 0.3 };

        Ok(serde_json::json!({
            "verified": verified,
            "confidence": confidence,
            "evidence_found": verified
        }))
    }

    /// Execute debate orchestrator tool
    async fn execute_debate_orchestrator(&self, invocation: &ToolInvocation) -> Result<serde_json::Value> {
        let topic = invocation.parameters.get("topic")
            .and_then(|v| v.as_str())
            .unwrap_or("default topic");

        // Simulate debate orchestration
        let debate_id = format!("debate_{}", uuid::Uuid::new_v4());

        Ok(serde_json::json!({
            "debate_id": debate_id,
            "topic": topic,
            "status": "initiated",
            "participants": ["constitutional_judge", "technical_auditor", "quality_evaluator"]
        }))
    }

    /// Execute consensus builder tool
    async fn execute_consensus_builder(&self, invocation: &ToolInvocation) -> Result<serde_json::Value> {
        // Simulate consensus building
        let positions = invocation.parameters.get("positions")
            .and_then(|v| v.as_array())
            .map(|arr| arr.len())
            .unwrap_or(0);

        let consensus = if positions > 0 {
            "agreed".to_string()
        } else {
            "no_positions".to_string()
        };

        Ok(serde_json::json!({
            "consensus": consensus,
            "confidence": 0.8,
            "supporting_positions": positions
        }))
    }

    /// Get execution statistics
    pub fn get_stats(&self) -> ExecutionStats {
        self.stats.read().unwrap().clone()
    }

    /// Reset execution statistics
    pub fn reset_stats(&self) {
        let mut stats = self.stats.write().unwrap();
        *stats = ExecutionStats {
            total_executions: 0,
            successful_executions: 0,
            failed_executions: 0,
            avg_execution_time_ms: 0.0,
            peak_concurrent: 0,
            active_executions: 0,
            total_resource_usage: ResourceUsage {
                cpu_time_ms: 0,
                peak_memory_mb: 0.0,
                io_operations: 0,
                network_bytes: 0,
            },
        };
    }

    /// Start background cleanup task
    pub async fn start_cleanup_task(&mut self) -> Result<()> {
        let stats = Arc::clone(&self.stats);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(60));

            loop {
                interval.tick().await;

                // Perform cleanup tasks
                debug!("Running tool execution cleanup");

                // In practice, this could clean up old execution records,
                // release resources, etc.
            }
        });

        self.cleanup_task = Some(handle);
        Ok(())
    }

    /// Stop background cleanup task
    pub async fn stop_cleanup_task(&mut self) -> Result<()> {
        if let Some(handle) = self.cleanup_task.take() {
            handle.abort();
            info!("Stopped tool execution cleanup task");
        }
        Ok(())
    }
}

impl ResourceTracker {
    /// Create a new resource tracker
    fn new() -> Self {
        Self {
            initial_memory: get_current_memory_mb(),
            peak_memory: 0.0,
            cpu_start: std::time::Instant::now(),
            io_operations: 0,
            network_bytes: 0,
        }
    }

    /// Finalize resource tracking
    fn finalize(&mut self) -> ResourceUsage {
        let current_memory = get_current_memory_mb();
        self.peak_memory = self.peak_memory.max(current_memory - self.initial_memory);

        ResourceUsage {
            cpu_time_ms: self.cpu_start.elapsed().as_millis() as u64,
            peak_memory_mb: self.peak_memory,
            io_operations: self.io_operations,
            network_bytes: self.network_bytes,
        }
    }
}

/// Get current memory usage in MB (simplified)
fn get_current_memory_mb() -> f64 {
    // In practice, this would use system APIs to get actual memory usage
    // For now, return a simulated value
    100.0 + (rand::random::<f64>() - 0.5) * 20.0 // 80-120 MB
}

impl Default for ToolInvocation {
    fn default() -> Self {
        Self {
            tool_name: "unknown".to_string(),
            parameters: serde_json::json!({}),
            context: None,
            timeout_ms: None,
        }
    }
}

impl Default for ExecutionStats {
    fn default() -> Self {
        Self {
            total_executions: 0,
            successful_executions: 0,
            failed_executions: 0,
            avg_execution_time_ms: 0.0,
            peak_concurrent: 0,
            active_executions: 0,
            total_resource_usage: ResourceUsage {
                cpu_time_ms: 0,
                peak_memory_mb: 0.0,
                io_operations: 0,
                network_bytes: 0,
            },
        }
    }
}


