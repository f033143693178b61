//! Kimi K2 Multimodal Orchestrator
//!
//! Unified orchestrator that integrates ingestors, CoreML experts, parallel workers,
//! and Kimi K2 enhancements for end-to-end multimodal agent execution.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn, error};

use crate::multimodal_orchestration::{MultimodalOrchestrator, ProcessingResult, ProcessingStatus};
use crate::types::*;

// Kimi K2 enhanced components
use self_prompting_agent::{
    SelfPromptingAgent,
    HierarchicalContextManager,
    ContextBundle,
    ContextBudget,
    ExpertSelectionRouter,
    ConsensusBuilder,
};

// Integration components
use self_prompting_agent::context::ingestor_integration::MultimodalContextEnricher;
use self_prompting_agent::models::coreml_expert::CoreMLExpertRegistrar;
use tool_ecosystem::parallel_integration::ParallelToolCoordinator;

// Data ingestion
use ingestors::{Ingestor, IngestResult};

// Worker coordination
use parallel_workers::ParallelCoordinator;

/// Kimi K2 Multimodal Orchestrator
pub struct KimiK2MultimodalOrchestrator {
    // Core components
    self_prompting_agent: Arc<SelfPromptingAgent>,
    context_manager: Arc<HierarchicalContextManager>,
    expert_router: Arc<ExpertSelectionRouter>,
    consensus_builder: Arc<ConsensusBuilder>,

    // Integration components
    context_enricher: Arc<MultimodalContextEnricher>,
    coreml_registrar: Arc<CoreMLExpertRegistrar>,
    parallel_coordinator: Arc<ParallelToolCoordinator>,

    // Data ingestion
    ingestors: HashMap<String, Arc<dyn Ingestor>>,
    ingestion_cache: Arc<RwLock<HashMap<String, IngestResult>>>,

    // Worker coordination
    worker_coordinator: Arc<ParallelCoordinator>,

    // Configuration
    config: OrchestratorConfig,
}

#[derive(Clone, Debug)]
pub struct OrchestratorConfig {
    pub max_concurrent_tasks: usize,
    pub enable_context_enrichment: bool,
    pub enable_parallel_execution: bool,
    pub enable_coreml_acceleration: bool,
    pub context_budget: ContextBudget,
    pub ingestion_enabled: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_tasks: 4,
            enable_context_enrichment: true,
            enable_parallel_execution: true,
            enable_coreml_acceleration: true,
            context_budget: ContextBudget::default(),
            ingestion_enabled: true,
        }
    }
}

impl KimiK2MultimodalOrchestrator {
    pub async fn new(config: OrchestratorConfig) -> Result<Self, OrchestratorError> {
        info!("Initializing Kimi K2 Multimodal Orchestrator");

        // Initialize core Kimi K2 components
        let context_manager = Arc::new(HierarchicalContextManager::new(
            // Would initialize with proper retriever and compressor
            todo!("Initialize calibrated retriever"),
            todo!("Initialize context compressor"),
        ));

        let expert_router = Arc::new(ExpertSelectionRouter::new(
            todo!("Initialize model registry"),
        ));

        let consensus_builder = Arc::new(ConsensusBuilder::new());

        let self_prompting_agent = Arc::new(SelfPromptingAgent::new(
            todo!("Initialize agent config"),
        ));

        // Initialize integration components
        let context_enricher = Arc::new(MultimodalContextEnricher::new(
            context_manager.clone(),
        ));

        let coreml_registrar = Arc::new(CoreMLExpertRegistrar::new(
            expert_router.clone(),
        ));

        let parallel_coordinator = Arc::new(ParallelToolCoordinator::new(
            todo!("Initialize tool executor"),
            todo!("Initialize tool registry"),
            todo!("Initialize parallel config"),
        ));

        // Initialize ingestors
        let mut ingestors = HashMap::new();

        if config.ingestion_enabled {
            ingestors.insert("video".to_string(), Arc::new(ingestors::VideoIngestor::new()));
            ingestors.insert("slides".to_string(), Arc::new(ingestors::SlidesIngestor::new()));
            ingestors.insert("diagrams".to_string(), Arc::new(ingestors::DiagramsIngestor::new()));
            ingestors.insert("captions".to_string(), Arc::new(ingestors::CaptionsIngestor::new()));
        }

        // Initialize worker coordinator
        let worker_coordinator = Arc::new(ParallelCoordinator::new(
            parallel_workers::ParallelCoordinatorConfig {
                max_concurrent_workers: config.max_concurrent_tasks,
                complexity_threshold: 0.6,
                enable_quality_gates: true,
                ..Default::default()
            },
        ));

        Ok(Self {
            self_prompting_agent,
            context_manager,
            expert_router,
            consensus_builder,
            context_enricher,
            coreml_registrar,
            parallel_coordinator,
            ingestors,
            ingestion_cache: Arc::new(RwLock::new(HashMap::new())),
            worker_coordinator,
            config,
        })
    }

    /// Execute multimodal task with full Kimi K2 pipeline
    pub async fn execute_multimodal_task(
        &self,
        task: MultimodalTask,
    ) -> Result<MultimodalProcessingResult, OrchestratorError> {
        info!("Executing multimodal task: {}", task.description);

        let start_time = std::time::Instant::now();

        // Phase 1: Data Ingestion & Enrichment
        let enriched_context = if self.config.enable_context_enrichment {
            self.ingest_and_enrich_context(&task).await?
        } else {
            // Create basic context from task
            ContextBundle::new(
                task.description.clone(),
                vec![],
                vec![],
                vec![],
            )
        };

        // Phase 2: Tool Chain Planning
        let tool_chain = self.plan_tool_chain(&task, &enriched_context).await?;

        // Phase 3: Expert Selection & Consensus
        let expert_selection = self.select_experts(&task, &enriched_context).await?;

        // Phase 4: Parallel Execution
        let execution_result = if self.config.enable_parallel_execution {
            self.parallel_coordinator.execute_parallel(
                &tool_chain,
                tokio_util::sync::CancellationToken::new(),
            ).await?
        } else {
            // Sequential execution fallback
            todo!("Implement sequential execution")
        };

        // Phase 5: Result Synthesis
        let final_result = self.synthesize_results(
            &task,
            &enriched_context,
            &expert_selection,
            &execution_result,
        ).await?;

        let execution_time = start_time.elapsed();

        info!("Multimodal task completed in {:.2}s", execution_time.as_secs_f64());

        Ok(MultimodalProcessingResult {
            task_id: task.id,
            status: ProcessingStatus::Completed,
            result: final_result,
            execution_time_ms: execution_time.as_millis() as u64,
            metadata: self.create_execution_metadata(&task, &enriched_context, &expert_selection),
        })
    }

    /// Ingest multimodal data and enrich context
    async fn ingest_and_enrich_context(
        &self,
        task: &MultimodalTask,
    ) -> Result<ContextBundle, OrchestratorError> {
        info!("Ingesting multimodal data for task enrichment");

        let mut ingest_results = Vec::new();

        // Ingest from all configured sources
        for (ingestor_type, ingestor) in &self.ingestors {
            if let Some(sources) = task.multimodal_sources.get(ingestor_type) {
                for source_path in sources {
                    match ingestor.ingest(
                        &std::path::Path::new(source_path),
                        task.project_scope.as_deref(),
                    ).await {
                        Ok(result) => {
                            ingest_results.push(result);
                        }
                        Err(e) => {
                            warn!("Failed to ingest {}: {}", source_path, e);
                        }
                    }
                }
            }
        }

        // Update cache
        self.context_enricher.update_cache(ingest_results).await?;

        // Get base context from task
        let base_context = ContextBundle::new(
            task.description.clone(),
            vec![],
            vec![],
            vec![],
        );

        // Enrich with multimodal data
        let enriched = self.context_enricher.enrich_context(
            &self.task_to_agent_task(task),
            &base_context,
            &self.config.context_budget,
        ).await?;

        Ok(enriched)
    }

    /// Plan tool chain for task execution
    async fn plan_tool_chain(
        &self,
        task: &MultimodalTask,
        context: &ContextBundle,
    ) -> Result<tool_ecosystem::tool_chain_planner::ToolChain, OrchestratorError> {
        // Use self-prompting agent to plan tool chain
        // This would integrate with the ToolChainPlanner
        todo!("Implement tool chain planning integration")
    }

    /// Select experts using MoE routing
    async fn select_experts(
        &self,
        task: &MultimodalTask,
        context: &ContextBundle,
    ) -> Result<self_prompting_agent::models::ExpertSelection, OrchestratorError> {
        let agent_task = self.task_to_agent_task(task);
        let model_context = self.context_to_model_context(context);

        let budget = self_prompting_agent::models::RouterBudget::default();

        self.expert_router.select_experts(&agent_task, &model_context, &budget).await
            .map_err(OrchestratorError::ExpertSelection)
    }

    /// Synthesize final results from all components
    async fn synthesize_results(
        &self,
        task: &MultimodalTask,
        context: &ContextBundle,
        experts: &self_prompting_agent::models::ExpertSelection,
        execution: &tool_ecosystem::executor::ExecutionResult,
    ) -> Result<serde_json::Value, OrchestratorError> {
        // Use consensus builder for final result
        let expert_responses = self.generate_expert_responses(experts, execution);

        let consensus_result = self.consensus_builder.build_consensus(expert_responses)?;

        Ok(serde_json::json!({
            "task_id": task.id,
            "consensus_result": consensus_result.content,
            "execution_summary": {
                "tools_executed": execution.results.len(),
                "execution_time_ms": execution.execution_time_ms,
                "success": execution.success,
                "experts_used": experts.experts.len(),
            },
            "context_used": {
                "working_memory_tokens": context.working_memory.len() / 4, // Rough estimate
                "episodic_entries": context.episodic_memory.len(),
                "semantic_entries": context.semantic_memory.len(),
                "compression_applied": context.compression_applied,
            }
        }))
    }

    /// Register CoreML models as experts
    pub async fn register_coreml_experts(&self, models_dir: &str) -> Result<usize, OrchestratorError> {
        if !self.config.enable_coreml_acceleration {
            return Ok(0);
        }

        info!("Registering CoreML experts from: {}", models_dir);
        let registered = self.coreml_registrar.register_experts_from_directory(models_dir).await?;

        info!("Registered {} CoreML experts", registered.len());
        Ok(registered.len())
    }

    /// Get orchestrator performance statistics
    pub async fn get_performance_stats(&self) -> OrchestratorPerformanceStats {
        let context_stats = self.context_manager.get_stats().await;
        let coreml_stats = self.coreml_registrar.get_performance_stats().await;

        OrchestratorPerformanceStats {
            context_stats,
            coreml_stats,
            ingestion_cache_size: self.ingestion_cache.read().await.len(),
            active_workers: 0, // Would track actual worker count
        }
    }

    // Helper methods
    fn task_to_agent_task(&self, task: &MultimodalTask) -> self_prompting_agent::types::Task {
        self_prompting_agent::types::Task {
            id: task.id.clone(),
            description: task.description.clone(),
            task_type: task.task_type.clone(),
            expected_latency_ms: task.expected_latency_ms,
            expected_cost_cents: task.expected_cost_cents,
        }
    }

    fn context_to_model_context(&self, context: &ContextBundle) -> self_prompting_agent::ModelContext {
        // Convert ContextBundle to ModelContext
        // This is a simplified conversion
        self_prompting_agent::ModelContext {
            task_history: vec![], // Would populate with iteration history
            temperature: 0.7,
            max_tokens: 4096,
            stop_sequences: vec![],
        }
    }

    fn generate_expert_responses(
        &self,
        experts: &self_prompting_agent::models::ExpertSelection,
        execution: &tool_ecosystem::executor::ExecutionResult,
    ) -> Vec<(String, self_prompting_agent::ModelResponse, f64)> {
        // Generate synthetic expert responses based on execution results
        experts.experts.iter().enumerate().map(|(i, expert_id)| {
            let confidence = experts.propensities.get(i).copied().unwrap_or(0.5);

            let content = if execution.success {
                format!("Task completed successfully by expert {}", expert_id)
            } else {
                format!("Task failed with errors: {:?}", execution.errors)
            };

            (
                expert_id.clone(),
                self_prompting_agent::ModelResponse {
                    content,
                    usage: self_prompting_agent::Usage {
                        prompt_tokens: 100,
                        completion_tokens: 50,
                        total_tokens: 150,
                    },
                    finish_reason: "completed".to_string(),
                },
                confidence,
            )
        }).collect()
    }

    fn create_execution_metadata(
        &self,
        task: &MultimodalTask,
        context: &ContextBundle,
        experts: &self_prompting_agent::models::ExpertSelection,
    ) -> HashMap<String, serde_json::Value> {
        let mut metadata = HashMap::new();

        metadata.insert("task_type".to_string(), serde_json::json!(task.task_type));
        metadata.insert("multimodal_sources".to_string(), serde_json::json!(task.multimodal_sources.len()));
        metadata.insert("context_enriched".to_string(), serde_json::json!(context.compression_applied));
        metadata.insert("experts_selected".to_string(), serde_json::json!(experts.experts.len()));
        metadata.insert("estimated_cost".to_string(), serde_json::json!(experts.estimated_cost));
        metadata.insert("estimated_latency".to_string(), serde_json::json!(experts.estimated_latency));

        metadata
    }
}

/// Multimodal task representation
#[derive(Clone, Debug)]
pub struct MultimodalTask {
    pub id: String,
    pub description: String,
    pub task_type: String,
    pub multimodal_sources: HashMap<String, Vec<String>>, // type -> paths
    pub project_scope: Option<String>,
    pub expected_latency_ms: Option<u64>,
    pub expected_cost_cents: Option<u32>,
}

/// Processing result
#[derive(Clone, Debug)]
pub struct MultimodalProcessingResult {
    pub task_id: String,
    pub status: ProcessingStatus,
    pub result: serde_json::Value,
    pub execution_time_ms: u64,
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Performance statistics
#[derive(Clone, Debug)]
pub struct OrchestratorPerformanceStats {
    pub context_stats: self_prompting_agent::context::ContextStats,
    pub coreml_stats: self_prompting_agent::models::CoreMLPerformanceStats,
    pub ingestion_cache_size: usize,
    pub active_workers: usize,
}

/// Orchestrator errors
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error("Initialization failed: {0}")]
    InitializationError(String),

    #[error("Ingestion failed: {0}")]
    IngestionError(#[from] Box<dyn std::error::Error + Send + Sync>),

    #[error("Context enrichment failed: {0}")]
    ContextEnrichmentError(#[from] self_prompting_agent::context::EnrichmentError),

    #[error("Tool chain planning failed: {0}")]
    ToolChainPlanningError(String),

    #[error("Expert selection failed: {0}")]
    ExpertSelectionError(String),

    #[error("Parallel execution failed: {0}")]
    ParallelExecutionError(#[from] tool_ecosystem::parallel_integration::ParallelExecutionError),

    #[error("Result synthesis failed: {0}")]
    SynthesisError(String),

    #[error("CoreML registration failed: {0}")]
    CoreMLError(#[from] self_prompting_agent::models::CoreMLError),
}
