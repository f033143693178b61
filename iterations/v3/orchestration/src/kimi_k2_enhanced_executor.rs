//! Kimi K2 Enhanced Autonomous Executor
//!
//! Wraps the standard AutonomousExecutor with Kimi K2 enhancements:
//! - Enhanced tool chains with DAG planning
//! - Hierarchical context management
//! - MoE expert routing with consensus
//! - Multimodal ingestion and enrichment

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn, error};

use crate::autonomous_executor::{AutonomousExecutor, AutonomousExecutorConfig, TaskExecutionState};
use crate::caws_runtime::TaskDescriptor;
use crate::kimi_k2_multimodal_orchestrator::{
    KimiK2MultimodalOrchestrator, MultimodalTask, OrchestratorConfig
};

// Kimi K2 enhanced components
use self_prompting_agent::{
    SelfPromptingAgent,
    HierarchicalContextManager,
    ExpertSelectionRouter,
    ConsensusBuilder,
};

/// Enhanced autonomous executor with Kimi K2 capabilities
pub struct KimiK2EnhancedExecutor {
    base_executor: Arc<AutonomousExecutor>,
    kimi_k2_orchestrator: Arc<KimiK2MultimodalOrchestrator>,
    enhancement_config: EnhancementConfig,
    enhancement_stats: Arc<RwLock<EnhancementStats>>,
}

#[derive(Clone, Debug)]
pub struct EnhancementConfig {
    pub enable_multimodal_enrichment: bool,
    pub enable_enhanced_tool_chains: bool,
    pub enable_expert_routing: bool,
    pub enable_parallel_execution: bool,
    pub fallback_to_base_executor: bool,
}

impl Default for EnhancementConfig {
    fn default() -> Self {
        Self {
            enable_multimodal_enrichment: true,
            enable_enhanced_tool_chains: true,
            enable_expert_routing: true,
            enable_parallel_execution: true,
            fallback_to_base_executor: true,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct EnhancementStats {
    pub tasks_enhanced: usize,
    pub multimodal_enrichments: usize,
    pub tool_chains_planned: usize,
    pub experts_routed: usize,
    pub parallel_executions: usize,
    pub fallbacks_to_base: usize,
    pub enhancement_errors: usize,
}

impl KimiK2EnhancedExecutor {
    pub async fn new(
        base_config: AutonomousExecutorConfig,
        orchestrator_config: OrchestratorConfig,
        enhancement_config: EnhancementConfig,
    ) -> Result<Self, EnhancementError> {
        info!("Initializing Kimi K2 Enhanced Executor");

        // Initialize base executor
        let base_executor = Arc::new(AutonomousExecutor::new(base_config).await?);

        // Initialize Kimi K2 orchestrator
        let kimi_k2_orchestrator = Arc::new(KimiK2MultimodalOrchestrator::new(orchestrator_config).await?);

        Ok(Self {
            base_executor,
            kimi_k2_orchestrator,
            enhancement_config,
            enhancement_stats: Arc::new(RwLock::new(EnhancementStats::default())),
        })
    }

    /// Submit task with Kimi K2 enhancements
    pub async fn submit_enhanced_task(
        &self,
        task_descriptor: TaskDescriptor,
        multimodal_sources: Option<HashMap<String, Vec<String>>>,
    ) -> Result<uuid::Uuid, EnhancementError> {
        // Check if we should use enhancements
        if self.should_use_enhancements(&task_descriptor) {
            info!("Using Kimi K2 enhancements for task {}", task_descriptor.task_id);

            // Convert to multimodal task
            let multimodal_task = self.create_multimodal_task(task_descriptor, multimodal_sources)?;

            // Submit to Kimi K2 orchestrator
            match self.kimi_k2_orchestrator.execute_multimodal_task(multimodal_task).await {
                Ok(result) => {
                    self.record_enhancement_success().await;
                    // Convert result back to base executor format
                    // This would need additional integration work
                    Ok(result.task_id.parse().unwrap_or(uuid::Uuid::new_v4()))
                }
                Err(e) => {
                    warn!("Kimi K2 enhancement failed, falling back to base executor: {}", e);
                    self.record_enhancement_error().await;

                    if self.enhancement_config.fallback_to_base_executor {
                        self.base_executor.submit_task(task_descriptor).await
                            .map_err(EnhancementError::BaseExecutor)
                    } else {
                        Err(EnhancementError::EnhancementFailed(e.to_string()))
                    }
                }
            }
        } else {
            info!("Using base executor for task {}", task_descriptor.task_id);
            self.base_executor.submit_task(task_descriptor).await
                .map_err(EnhancementError::BaseExecutor)
        }
    }

    /// Enhanced task execution with monitoring
    pub async fn execute_enhanced_task(&self, task_descriptor: TaskDescriptor) -> Result<(), EnhancementError> {
        let start_time = std::time::Instant::now();

        info!("Starting enhanced execution for task {}", task_descriptor.task_id);

        // Determine execution strategy
        let strategy = self.determine_execution_strategy(&task_descriptor).await;

        match strategy {
            ExecutionStrategy::FullKimiK2 => {
                self.execute_with_full_kimi_k2(&task_descriptor).await?;
            }
            ExecutionStrategy::PartialEnhancements => {
                self.execute_with_partial_enhancements(&task_descriptor).await?;
            }
            ExecutionStrategy::BaseExecutor => {
                self.base_executor.execute_task(task_descriptor).await
                    .map_err(EnhancementError::BaseExecutor)?;
            }
        }

        let execution_time = start_time.elapsed();
        info!("Enhanced execution completed in {:.2}s", execution_time.as_secs_f64());

        Ok(())
    }

    /// Execute with full Kimi K2 enhancements
    async fn execute_with_full_kimi_k2(&self, task_descriptor: &TaskDescriptor) -> Result<(), EnhancementError> {
        // Create multimodal task from descriptor
        let multimodal_task = self.create_multimodal_task(
            task_descriptor.clone(),
            None, // Would extract from task metadata
        )?;

        // Execute with full Kimi K2 pipeline
        let result = self.kimi_k2_orchestrator.execute_multimodal_task(multimodal_task).await?;

        // Update base executor state to maintain compatibility
        self.sync_execution_state(task_descriptor, &result).await?;

        self.record_full_enhancement().await;
        Ok(())
    }

    /// Execute with partial enhancements
    async fn execute_with_partial_enhancements(&self, task_descriptor: &TaskDescriptor) -> Result<(), EnhancementError> {
        // Start with base executor
        let base_result = self.base_executor.execute_task(task_descriptor.clone()).await;

        match base_result {
            Ok(()) => {
                // Base execution succeeded - try to enhance post-execution
                if let Err(e) = self.apply_post_execution_enhancements(task_descriptor).await {
                    warn!("Post-execution enhancement failed: {}", e);
                }
                Ok(())
            }
            Err(e) => {
                // Base execution failed - try enhanced execution as fallback
                warn!("Base execution failed, attempting enhanced execution: {}", e);

                match self.execute_with_full_kimi_k2(task_descriptor).await {
                    Ok(()) => {
                        info!("Enhanced execution succeeded as fallback");
                        Ok(())
                    }
                    Err(enhance_e) => {
                        error!("Both base and enhanced execution failed");
                        Err(EnhancementError::FallbackFailed {
                            base_error: e.to_string(),
                            enhance_error: enhance_e.to_string(),
                        })
                    }
                }
            }
        }
    }

    /// Apply enhancements after successful base execution
    async fn apply_post_execution_enhancements(&self, task_descriptor: &TaskDescriptor) -> Result<(), EnhancementError> {
        // This could include:
        // - Enhanced result analysis
        // - Context learning from execution
        // - Performance profiling updates

        info!("Applying post-execution enhancements for task {}", task_descriptor.task_id);

        // Update context manager with execution learnings
        // Update expert router with performance data
        // Update tool learning system with outcomes

        Ok(())
    }

    /// Determine execution strategy based on task characteristics
    async fn determine_execution_strategy(&self, task_descriptor: &TaskDescriptor) -> ExecutionStrategy {
        // Simple strategy selection - could be made more sophisticated
        if self.enhancement_config.enable_multimodal_enrichment &&
           self.enhancement_config.enable_enhanced_tool_chains &&
           self.enhancement_config.enable_expert_routing {
            ExecutionStrategy::FullKimiK2
        } else if self.enhancement_config.enable_multimodal_enrichment ||
                  self.enhancement_config.enable_enhanced_tool_chains {
            ExecutionStrategy::PartialEnhancements
        } else {
            ExecutionStrategy::BaseExecutor
        }
    }

    /// Check if task should use enhancements
    fn should_use_enhancements(&self, task_descriptor: &TaskDescriptor) -> bool {
        // Check task type, complexity, available resources, etc.
        // For now, use simple heuristics

        match task_descriptor.task_type.as_str() {
            "multimodal_analysis" | "complex_reasoning" | "code_generation" => true,
            _ => self.enhancement_config.enable_multimodal_enrichment ||
                 self.enhancement_config.enable_enhanced_tool_chains ||
                 self.enhancement_config.enable_expert_routing,
        }
    }

    /// Create multimodal task from task descriptor
    fn create_multimodal_task(
        &self,
        task_descriptor: TaskDescriptor,
        multimodal_sources: Option<HashMap<String, Vec<String>>>,
    ) -> Result<MultimodalTask, EnhancementError> {
        Ok(MultimodalTask {
            id: task_descriptor.task_id.to_string(),
            description: task_descriptor.description,
            task_type: task_descriptor.task_type,
            multimodal_sources: multimodal_sources.unwrap_or_default(),
            project_scope: task_descriptor.project_scope,
            expected_latency_ms: Some(task_descriptor.expected_latency_ms),
            expected_cost_cents: task_descriptor.expected_cost_cents,
        })
    }

    /// Sync execution state between enhanced and base executor
    async fn sync_execution_state(
        &self,
        task_descriptor: &TaskDescriptor,
        result: &crate::kimi_k2_multimodal_orchestrator::MultimodalProcessingResult,
    ) -> Result<(), EnhancementError> {
        // Update the base executor's internal state to maintain compatibility
        // This ensures monitoring, progress tracking, etc. work correctly

        // In a real implementation, this would update the base executor's
        // TaskExecutionState to reflect the enhanced execution

        debug!("Synced execution state for task {}", task_descriptor.task_id);
        Ok(())
    }

    /// Register CoreML experts
    pub async fn register_coreml_experts(&self, models_dir: &str) -> Result<usize, EnhancementError> {
        self.kimi_k2_orchestrator.register_coreml_experts(models_dir).await
            .map_err(EnhancementError::CoreMLError)
    }

    /// Get enhancement statistics
    pub async fn get_enhancement_stats(&self) -> EnhancementStats {
        self.enhancement_stats.read().await.clone()
    }

    /// Start enhanced execution loop
    pub async fn start_enhanced_execution_loop(self: Arc<Self>) -> Result<(), EnhancementError> {
        info!("Starting enhanced execution loop");

        // Start base executor loop
        self.base_executor.clone().start_execution_loop().await
            .map_err(EnhancementError::BaseExecutor)?;

        // Additional enhancement-specific loops could be started here
        // - Context learning loop
        // - Performance monitoring loop
        // - Expert router updates

        Ok(())
    }

    // Statistics recording methods
    async fn record_enhancement_success(&self) {
        let mut stats = self.enhancement_stats.write().await;
        stats.tasks_enhanced += 1;
    }

    async fn record_enhancement_error(&self) {
        let mut stats = self.enhancement_stats.write().await;
        stats.enhancement_errors += 1;
    }

    async fn record_full_enhancement(&self) {
        let mut stats = self.enhancement_stats.write().await;
        stats.tasks_enhanced += 1;
        stats.multimodal_enrichments += 1;
        stats.tool_chains_planned += 1;
        stats.experts_routed += 1;
        stats.parallel_executions += 1;
    }
}

/// Execution strategy determination
#[derive(Clone, Debug)]
enum ExecutionStrategy {
    FullKimiK2,
    PartialEnhancements,
    BaseExecutor,
}

/// Enhancement errors
#[derive(Debug, thiserror::Error)]
pub enum EnhancementError {
    #[error("Base executor error: {0}")]
    BaseExecutor(#[from] Box<dyn std::error::Error + Send + Sync>),

    #[error("Kimi K2 orchestrator error: {0}")]
    OrchestratorError(#[from] Box<dyn std::error::Error + Send + Sync>),

    #[error("CoreML registration error: {0}")]
    CoreMLError(#[from] Box<dyn std::error::Error + Send + Sync>),

    #[error("Enhancement failed: {0}")]
    EnhancementFailed(String),

    #[error("Fallback failed - base: {base_error}, enhance: {enhance_error}")]
    FallbackFailed { base_error: String, enhance_error: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
