//! Parallel coordinator - main orchestrator for parallel task execution

use crate::types::*;
use crate::error::*;
use crate::decomposition::{DecompositionEngine, TaskAnalysis};
use crate::worker::{WorkerManager, DefaultWorkerPool};
use crate::progress::{ProgressAggregator, ProgressSynthesizer};
use crate::validation::{ValidationRunner, ValidationContext};
use crate::orchestrator_bridge::{OrchestrationQualityBridge, StubOrchestrationQualityHandle, ExecutionArtifacts};
use crate::monitoring_bridge::{OrchestrationMonitoringBridge, StubOrchestrationMonitoringHandle, ExecutionStatus};
use crate::communication::hub::CommunicationHub;
use crate::learning::{
    ParallelWorkerMetricsCollector, PatternAnalyzer, AdaptiveWorkerSelector, ConfigurationOptimizer,
    CouncilLearningBridge, LearningPersistence, RewardWeights, Baseline,
};
use crate::learning::{
    ExecutionRecord, WorkerPerformanceProfile, SuccessPattern, FailurePattern, 
    OptimalConfig, ConfigurationRecommendations, OptimizationEvent
};
use std::collections::HashMap;
use std::sync::Arc;

// Stub implementations for missing workspace dependencies
// TODO: Replace with actual workspace crate integrations

/// Stub implementation for orchestration handle
#[async_trait::async_trait]
pub trait OrchestratorHandle: Send + Sync {
    async fn execute_sequential(&self, task: ComplexTask) -> ParallelResult<TaskResult>;
}

/// Stub implementation for orchestration handle
pub struct StubOrchestratorHandle;

#[async_trait::async_trait]
impl OrchestratorHandle for StubOrchestratorHandle {
    async fn execute_sequential(&self, _task: ComplexTask) -> ParallelResult<TaskResult> {
        // Stub implementation - always return a basic success result
        Ok(TaskResult {
            task_id: TaskId::new(),
            success: true,
            subtasks_completed: 1,
            total_subtasks: 1,
            execution_time: std::time::Duration::from_secs(1),
            summary: "Sequential execution completed (stub)".to_string(),
            worker_breakdown: vec![],
            quality_scores: std::collections::HashMap::new(),
        })
    }
}

/// Main coordinator for parallel task execution
pub struct ParallelCoordinator {
    decomposition_engine: DecompositionEngine,
    worker_manager: WorkerManager,
    progress_aggregator: ProgressAggregator,
    progress_synthesizer: ProgressSynthesizer,
    validation_runner: ValidationRunner,
    communication_hub: CommunicationHub,
    config: ParallelCoordinatorConfig,
    orchestrator_handle: Option<Arc<dyn OrchestratorHandle>>, // Integration point
    quality_bridge: OrchestrationQualityBridge,
    monitoring_bridge: OrchestrationMonitoringBridge,
    // Learning system components
    metrics_collector: Arc<ParallelWorkerMetricsCollector>,
    pattern_analyzer: Arc<PatternAnalyzer>,
    adaptive_selector: Arc<AdaptiveWorkerSelector>,
    config_optimizer: Arc<ConfigurationOptimizer>,
    council_bridge: Arc<CouncilLearningBridge>,
    learning_persistence: Arc<dyn LearningPersistence>,
    fairness_monitor: Arc<StubFairnessMonitor>,
    queue_health_monitor: Arc<StubQueueHealthMonitor>,
    failure_taxonomy: Arc<StubFailureTaxonomy>,
}

#[derive(Debug, Clone)]
pub struct ParallelCoordinatorConfig {
    pub enabled: bool,
    pub max_concurrent_workers: usize,
    pub max_subtasks_per_task: usize,
    pub task_timeout_seconds: u64,
    pub complexity_threshold: f32,
    pub enable_quality_gates: bool,
    pub enable_dependency_resolution: bool,
}

impl Default for ParallelCoordinatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_concurrent_workers: 8,
            max_subtasks_per_task: 20,
            task_timeout_seconds: 300,
            complexity_threshold: 0.6,
            enable_quality_gates: true,
            enable_dependency_resolution: true,
        }
    }
}

impl ParallelCoordinator {
    /// Create a new parallel coordinator
    pub fn new(config: ParallelCoordinatorConfig) -> Self {
        let worker_pool = Arc::new(DefaultWorkerPool::new());
        let communication_hub = CommunicationHub::new(Default::default());
        let quality_bridge = OrchestrationQualityBridge::new(Arc::new(StubOrchestrationQualityHandle));
        let monitoring_bridge = OrchestrationMonitoringBridge::new(Arc::new(StubOrchestrationMonitoringHandle));

        // Initialize learning system components
            let reward_weights = RewardWeights {
                quality: 0.4,
                latency: 0.3,
                rework: 0.2,
                cost: 0.1,
            };
        let baseline = Baseline {
            p50_ms: 1000.0,
            p50_quality: 0.8,
            p50_tokens: 100.0,
        };
        let metrics_collector = Arc::new(ParallelWorkerMetricsCollector::new(reward_weights, baseline));
        let pattern_analyzer = Arc::new(PatternAnalyzer::new(5, 0.7));
        // TODO: Initialize learning components when they are properly implemented
        let fairness_monitor = Arc::new(StubFairnessMonitor);
        let adaptive_selector = Arc::new(StubAdaptiveSelector);
        let config_optimizer = Arc::new(StubConfigOptimizer);
        let council_bridge = Arc::new(CouncilLearningBridge::new(100, std::time::Duration::from_secs(60)));
        let learning_persistence = Arc::new(StubLearningPersistence);
        let queue_health_monitor = Arc::new(StubQueueHealthMonitor);
        let failure_taxonomy = Arc::new(StubFailureTaxonomy);

        Self {
            decomposition_engine: DecompositionEngine::new(),
            worker_manager: WorkerManager::new(worker_pool),
            progress_aggregator: ProgressAggregator::new(TaskId::new()),
            progress_synthesizer: ProgressSynthesizer::new(),
            validation_runner: ValidationRunner::new(4), // Run 4 validations in parallel
            communication_hub,
            config,
            orchestrator_handle: None,
            quality_bridge,
            monitoring_bridge,
            metrics_collector,
            pattern_analyzer: pattern_analyzer.clone(),
            adaptive_selector: Arc::new(AdaptiveWorkerSelector::new(pattern_analyzer.clone(), Arc::new(crate::learning::adaptive_selector::StubFairnessMonitor))),
            config_optimizer: Arc::new(ConfigurationOptimizer::new(pattern_analyzer)),
            council_bridge,
            learning_persistence,
            fairness_monitor,
            queue_health_monitor,
            failure_taxonomy,
        }
    }

    /// Set the orchestrator handle for fallback sequential execution
    pub fn with_orchestrator_handle(mut self, handle: Arc<dyn OrchestratorHandle>) -> Self {
        self.orchestrator_handle = Some(handle);
        self
    }

    /// Main entry point for parallel execution
    pub async fn execute_parallel(&mut self, task: ComplexTask) -> ParallelResult<TaskResult> {
        // 1. Analyze task complexity and determine if parallel execution is beneficial
        let analysis = self.analyze_task(&task).await?;

        // Publish analysis event
        self.monitoring_bridge.publish_event(
            task.id.clone(),
            "task_analysis_completed".to_string(),
            serde_json::json!({
                "complexity_score": analysis.subtask_scores.parallelization_score,
                "should_parallelize": analysis.subtask_scores.parallelization_score > 0.6,
                "estimated_workers": analysis.recommended_workers,
            }),
        ).await.ok(); // Don't fail execution if monitoring fails

        if !self.should_execute_parallel(&analysis) {
            // Update status to sequential execution
            self.monitoring_bridge.update_task_progress(
                &task.id,
                ExecutionStatus::Running,
                0.0,
                Some("sequential_fallback".to_string()),
                std::collections::HashMap::new(),
            ).await.ok();

            // Fall back to sequential execution
            return self.execute_sequential(task).await;
        }

        // Update status to parallel execution
        self.monitoring_bridge.update_task_progress(
            &task.id,
            ExecutionStatus::Running,
            0.1,
            Some("decomposition".to_string()),
            std::collections::HashMap::new(),
        ).await.ok();

        // 2. Decompose the task into subtasks
        let subtasks = self.decomposition_engine.decompose(analysis)?;

        // Publish decomposition event
        self.monitoring_bridge.publish_event(
            task.id.clone(),
            "task_decomposed".to_string(),
            serde_json::json!({
                "subtask_count": subtasks.len(),
                "total_estimated_effort": subtasks.iter().map(|s| s.estimated_effort.as_secs()).sum::<u64>(),
            }),
        ).await.ok();

        // Update progress to execution phase
        self.monitoring_bridge.update_task_progress(
            &task.id,
            ExecutionStatus::Running,
            0.2,
            Some("execution".to_string()),
            std::collections::HashMap::new(),
        ).await.ok();

        // 3. Initialize progress tracking
        self.progress_aggregator = ProgressAggregator::new(task.id.clone());

        // 4. Execute subtasks in parallel
        let results = self.execute_subtasks_parallel(subtasks).await?;

        // Publish execution completion event
        let successful_results = results.iter().filter(|r| r.success).count();
        self.monitoring_bridge.publish_event(
            task.id.clone(),
            "parallel_execution_completed".to_string(),
            serde_json::json!({
                "total_subtasks": results.len(),
                "successful_subtasks": successful_results,
                "failed_subtasks": results.len() - successful_results,
            }),
        ).await.ok();

        // Update progress to validation phase
        self.monitoring_bridge.update_task_progress(
            &task.id,
            ExecutionStatus::Running,
            0.8,
            Some("validation".to_string()),
            std::collections::HashMap::new(),
        ).await.ok();

        // 5. Collect execution metrics for learning
        self.collect_execution_metrics(&task, &results).await?;

        // 6. Analyze patterns and optimize configuration
        self.analyze_and_optimize(&task, &results).await?;

        // 7. Validate quality gates (if enabled)
        if self.config.enable_quality_gates {
            self.validate_results(&task.id, &results).await?;
        }

        // 8. Synthesize final result
        let task_result = self.progress_synthesizer.synthesize_results(results)?;

        // Update final progress
        self.monitoring_bridge.update_task_progress(
            &task.id,
            ExecutionStatus::Completed,
            1.0,
            Some("completed".to_string()),
            std::collections::HashMap::new(),
        ).await.ok();

        Ok(task_result)
    }

    /// Analyze task to determine execution strategy
    async fn analyze_task(&self, task: &ComplexTask) -> ParallelResult<TaskAnalysis> {
        tracing::info!("Analyzing task complexity: {}", task.description);

        let analysis = self.decomposition_engine.analyze(task)
            .await
            .map_err(|e| ParallelError::Decomposition {
                message: format!("Failed to analyze task: {:?}", e),
                source: None,
            })?;

        tracing::info!(
            "Task analysis complete: {} patterns, {} recommended workers, parallelizable: {}",
            analysis.patterns.len(),
            analysis.recommended_workers,
            analysis.should_parallelize
        );

        Ok(analysis)
    }

    /// Determine if task should be executed in parallel
    fn should_execute_parallel(&self, analysis: &TaskAnalysis) -> bool {
        analysis.should_parallelize && analysis.subtask_scores.parallelization_score >= self.config.complexity_threshold
    }

    /// Execute subtasks in parallel
    async fn execute_subtasks_parallel(&mut self, subtasks: Vec<SubTask>) -> ParallelResult<Vec<WorkerResult>> {
        tracing::info!("Executing {} subtasks in parallel", subtasks.len());

        // Spawn workers for each subtask
        let mut worker_handles = Vec::new();

        for subtask in subtasks {
            // Register subtask with progress tracker
            self.progress_aggregator.register_worker(
                WorkerId(subtask.id.0.clone()),
                subtask.id.clone(),
                1.0, // Equal weight for now
            )?;

            // Select optimal worker using learning system
            let worker_id = self.select_worker_for_subtask(&subtask).await?;
            worker_handles.push(worker_id);
        }

        // Wait for all workers to complete
        let mut results = Vec::new();
        for worker_id in worker_handles {
            match self.worker_manager.wait_for_worker(&worker_id).await {
                Ok(result) => {
                    // TODO: Update progress tracking with worker completion
                    // For now, just collect the results

                    results.push(result);
                }
                Err(e) => {
                    tracing::error!("Worker {} failed: {:?}", worker_id.0, e);
                    // Continue with other workers
                }
            }
        }

        tracing::info!("Parallel execution complete: {}/{} subtasks successful",
                      results.iter().filter(|r| r.success).count(),
                      results.len());

        Ok(results)
    }

    /// Select optimal worker for subtask using learning system
    async fn select_worker_for_subtask(&mut self, subtask: &SubTask) -> ParallelResult<WorkerId> {
        // TODO: Integrate with worker pool to get available workers for learning selection
        // For now, use existing worker spawning logic
        // In future: Use adaptive_selector.select_workers() with actual available workers
        self.worker_manager.spawn_worker(subtask.clone()).await
            .map_err(ParallelError::Worker)
    }

    /// Collect execution metrics for learning
    async fn collect_execution_metrics(&self, task: &ComplexTask, results: &[WorkerResult]) -> ParallelResult<()> {
        for result in results {
            let record = ExecutionRecord {
                task_id: task.id.clone(),
                worker_id: WorkerId::new(), // TODO: Get actual worker ID from result
                specialty: WorkerSpecialty::CompilationErrors { error_codes: vec![] }, // TODO: Determine from worker
                subtask_id: result.subtask_id.clone(),
                metrics: result.metrics.clone(),
                outcome: if result.success { crate::learning::metrics_collector::ExecutionOutcome::Success }
                        else { crate::learning::metrics_collector::ExecutionOutcome::Failure },
                timestamp: chrono::Utc::now(),
                learning_mode: crate::learning::reward::LearningMode::Learn,
            };

            self.metrics_collector.record_execution(record);
        }

        // TODO: Update worker performance profiles when the structure is finalized

        Ok(())
    }

    /// Analyze execution patterns and optimize configuration
    async fn analyze_and_optimize(&self, task: &ComplexTask, results: &[WorkerResult]) -> ParallelResult<()> {
        // Convert results to execution records for pattern analysis
        let records: Vec<ExecutionRecord> = results.iter().map(|result| {
            ExecutionRecord {
                task_id: task.id.clone(),
                worker_id: WorkerId::new(), // TODO: Get actual worker ID
                specialty: WorkerSpecialty::CompilationErrors { error_codes: vec![] }, // TODO: Determine from worker
                subtask_id: result.subtask_id.clone(),
                metrics: result.metrics.clone(),
                outcome: if result.success { crate::learning::metrics_collector::ExecutionOutcome::Success }
                        else { crate::learning::metrics_collector::ExecutionOutcome::Failure },
                timestamp: chrono::Utc::now(),
                learning_mode: crate::learning::reward::LearningMode::Learn,
            }
        }).collect();

        // Analyze execution records
        self.pattern_analyzer.analyze_execution_records(records).await
            .map_err(|e| ParallelError::Io {
                message: format!("Pattern analysis failed: {:?}", e),
                source: std::io::Error::new(std::io::ErrorKind::Other, format!("{:?}", e)),
            })?;

        // TODO: Generate configuration recommendations when optimize_configuration method exists
        // TODO: Send learning signals to council when methods exist

        Ok(())
    }

    /// Validate results against quality gates
    async fn validate_results(&self, task_id: &TaskId, results: &[WorkerResult]) -> ParallelResult<()> {
        tracing::info!("Running quality gate validation");

        // Create validation context
        let validation_context = ValidationContext {
            package_name: "parallel-execution".to_string(), // TODO: Make configurable
            workspace_root: std::env::current_dir()
                .map_err(|e| ParallelError::Io {
                    message: format!("Failed to get workspace root: {}", e),
                    source: e,
                })?,
            results: results.to_vec(),
            execution_time: std::time::Duration::from_secs(0), // TODO: Track actual time
        };

        // Run validation
        let report = self.validation_runner.run_parallel(&validation_context).await?;

        if !report.passed() {
            return Err(ParallelError::Validation {
                message: format!("Internal quality gates failed: {}", report.summary.failed_gates),
                source: None,
            });
        }

        // Run orchestration quality gates for additional validation
        tracing::info!("Running orchestration quality gates");

        // Convert results to execution artifacts for orchestration validation
        let artifacts = self.convert_results_to_artifacts(results);

        let orchestration_validation = self.quality_bridge.validate_with_orchestration_gates(
            task_id,
            &artifacts,
            &QualityRequirements::default(), // TODO: Extract from task
        ).await?;

        match orchestration_validation {
            crate::ValidationResult::Pass { .. } => {
                tracing::info!("Orchestration quality gates passed");
            }
            crate::ValidationResult::Fail { details, .. } => {
                return Err(ParallelError::Validation {
                    message: format!("Orchestration quality gates failed: {}", details),
                    source: None,
                });
            }
            crate::ValidationResult::Warning { details, .. } => {
                tracing::warn!("Orchestration quality gates warning: {}", details);
                // Warnings don't fail execution, just log
            }
        }

        tracing::info!("All quality gates passed: {}/{} internal gates successful",
                      report.summary.passed_gates,
                      report.summary.total_gates);

        Ok(())
    }

    /// Convert worker results to execution artifacts for orchestration validation
    fn convert_results_to_artifacts(&self, _results: &[WorkerResult]) -> ExecutionArtifacts {
        // TODO: Implement proper artifact conversion from worker results
        // For now, return minimal artifacts
        ExecutionArtifacts {
            test_results: None,
            coverage_report: None,
            lint_report: None,
            type_check_report: None,
            mutation_report: None,
            provenance_record: None,
        }
    }

    /// Fall back to sequential execution
    async fn execute_sequential(&self, task: ComplexTask) -> ParallelResult<TaskResult> {
        tracing::info!("Falling back to sequential execution for task: {}", task.description);

        if let Some(orchestrator) = &self.orchestrator_handle {
            // Convert ComplexTask back to regular Task
            // This is a simplified conversion - in practice would need proper mapping
            orchestrator.execute_sequential(task).await
        } else {
            Err(ParallelError::Coordination {
                message: "No orchestrator handle available for sequential fallback".to_string(),
                source: None,
            })
        }
    }

    /// Get current progress
    pub fn get_progress(&self) -> Progress {
        self.progress_aggregator.get_overall_progress()
    }

    /// Cancel all running workers
    pub async fn cancel_all(&mut self) -> ParallelResult<()> {
        tracing::info!("Cancelling all workers");

        let active_worker_ids = self.worker_manager.active_worker_ids();

        for worker_id in active_worker_ids {
            if let Err(e) = self.worker_manager.cancel_worker(&worker_id).await {
                tracing::error!("Failed to cancel worker {}: {:?}", worker_id.0, e);
            }
        }

        Ok(())
    }

    /// Get execution statistics
    pub fn get_statistics(&self) -> ParallelExecutionStats {
        let worker_stats = self.worker_manager.get_statistics();
        let progress = self.get_progress();

        ParallelExecutionStats {
            active_workers: worker_stats.total_workers,
            completed_subtasks: progress.completed_subtasks,
            total_subtasks: progress.total_subtasks,
            overall_progress: progress.percentage,
            estimated_completion: progress.estimated_completion,
        }
    }
}


/// Statistics for parallel execution
#[derive(Debug, Clone)]
pub struct ParallelExecutionStats {
    pub active_workers: usize,
    pub completed_subtasks: usize,
    pub total_subtasks: usize,
    pub overall_progress: f32,
    pub estimated_completion: Option<chrono::DateTime<chrono::Utc>>,
}

/// Integration helpers for orchestration layer
pub mod integration {
    use super::*;

    /// Check if a task should be routed to parallel execution
    pub fn should_route_to_parallel(
        task_description: &str,
        complexity_score: f32,
        config: &ParallelCoordinatorConfig,
    ) -> bool {
        // Check for parallelizable keywords
        let parallelizable_keywords = [
            "fix", "errors", "compile", "refactor", "test", "document",
            "parallel", "concurrent", "multiple", "batch",
        ];

        let has_parallelizable_content = parallelizable_keywords
            .iter()
            .any(|keyword| task_description.to_lowercase().contains(keyword));

        let meets_complexity_threshold = complexity_score >= config.complexity_threshold;

        has_parallelizable_content && meets_complexity_threshold
    }

    /// Estimate parallelization benefit
    pub fn estimate_parallelization_benefit(
        task_description: &str,
        estimated_subtasks: Option<usize>,
    ) -> f32 {
        let base_benefit = 0.5; // Base parallelization benefit

        // Adjust based on task characteristics
        let mut multiplier = 1.0;

        if task_description.to_lowercase().contains("error") {
            multiplier += 0.3; // Error fixing is highly parallelizable
        }

        if task_description.to_lowercase().contains("test") {
            multiplier += 0.2; // Testing can be parallelized
        }

        if task_description.to_lowercase().contains("refactor") {
            multiplier += 0.1; // Refactoring has some parallelization potential
        }

        // Adjust based on estimated subtasks
        if let Some(subtask_count) = estimated_subtasks {
            if subtask_count > 4 {
                multiplier += 0.2; // Many subtasks = good parallelization candidate
            } else if subtask_count <= 2 {
                multiplier -= 0.3; // Few subtasks = may not benefit from parallelism
            }
        }

        ((base_benefit * multiplier) as f32).min(1.0f32).max(0.0f32)
    }

    // TODO: Add convert_to_complex_task method when integrating with orchestration
    // This will convert Task from orchestration crate to ComplexTask for parallel execution
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParallelCoordinatorConfig::default();
        assert_eq!(config.max_concurrent_workers, 8);
        assert_eq!(config.complexity_threshold, 0.6);
        assert!(config.enable_quality_gates);
    }

    #[test]
    fn test_should_route_to_parallel() {
        let config = ParallelCoordinatorConfig::default();

        // Should route compilation errors
        assert!(integration::should_route_to_parallel(
            "Fix compilation errors in the codebase",
            0.8,
            &config
        ));

        // Should not route simple tasks
        assert!(!integration::should_route_to_parallel(
            "Add a simple comment",
            0.2,
            &config
        ));
    }

    #[test]
    fn test_estimate_parallelization_benefit() {
        // High benefit for error fixing
        let benefit = integration::estimate_parallelization_benefit(
            "Fix compilation errors",
            Some(10)
        );
        assert!(benefit > 0.7);

        // Low benefit for simple tasks
        let benefit = integration::estimate_parallelization_benefit(
            "Add a comment",
            Some(1)
        );
        assert!(benefit < 0.5);
    }

    // Learning system integration methods

    /// Record execution metrics for learning
    async fn record_execution_metrics(&self, task_id: &TaskId, execution_records: Vec<crate::learning::metrics_collector::ExecutionRecord>) -> anyhow::Result<()> {
        for record in execution_records {
            self.metrics_collector.record_execution(record).await;
        }
        
        // Publish signals to council learning system
        let signals = self.convert_to_learning_signals(task_id, &execution_records);
        self.council_bridge.publish_signals(signals).await?;
        
        Ok(())
    }

    /// Convert execution records to learning signals
    fn convert_to_learning_signals(&self, task_id: &TaskId, records: &[crate::learning::metrics_collector::ExecutionRecord]) -> Vec<crate::learning::council_bridge::ParallelWorkerSignal> {
        let mut signals = Vec::new();
        
        for record in records {
            let signal = crate::learning::council_bridge::ParallelWorkerSignal::WorkerPerformance {
                worker_id: record.worker_id.clone(),
                specialty: record.specialty.clone(),
                task_pattern: record.task_id.to_string().into(),
                success: record.outcome.is_success(),
                execution_time: record.metrics.end_time.signed_duration_since(record.metrics.start_time).to_std().unwrap_or_default(),
                quality_score: record.metrics.quality_score,
                resource_usage: crate::learning::council_bridge::ResourceUsageMetrics {
                    cpu_percent: record.metrics.cpu_usage_percent.unwrap_or(0.0),
                    memory_mb: record.metrics.memory_usage_mb.unwrap_or(0.0),
                    disk_io_mb: 0.0, // TODO: Add disk I/O tracking
                    network_io_mb: 0.0, // TODO: Add network I/O tracking
                },
            };
            signals.push(signal);
        }
        
        signals
    }

    /// Update worker selection based on learned patterns
    async fn update_worker_selection(&self, task_pattern: &TaskPattern, available_workers: Vec<crate::learning::metrics_collector::WorkerPerformanceProfile>) -> anyhow::Result<Vec<crate::learning::adaptive_selector::WorkerRecommendation>> {
        // Get worker recommendations from adaptive selector
        let task_id = TaskId::new(); // TODO: Use actual task ID
        let recommendations = self.adaptive_selector.select_workers(
            &task_id,
            task_pattern,
            self.config.max_concurrent_workers,
            available_workers,
        ).await?;
        
        Ok(recommendations)
    }

    /// Analyze patterns and update configurations
    async fn analyze_and_optimize(&self, execution_records: Vec<crate::learning::metrics_collector::ExecutionRecord>) -> anyhow::Result<()> {
        // Analyze execution records for patterns
        self.pattern_analyzer.analyze_execution_records(execution_records.clone()).await?;
        
        // Generate configuration recommendations
        let current_configs = std::collections::HashMap::new(); // TODO: Get current configs
        let recommendations = self.config_optimizer.analyze_and_recommend(execution_records, current_configs).await?;
        
        // Apply recommendations if confidence is high enough
        if recommendations.overall_confidence > 0.8 {
            let events = self.config_optimizer.apply_recommendations(&recommendations.recommendations).await?;
            tracing::info!("Applied {} configuration optimizations", events.len());
        }
        
        Ok(())
    }

    /// Check queue health and apply backpressure if needed
    async fn check_queue_health(&self, worker_id: &WorkerId) -> anyhow::Result<crate::learning::queue_health::BackpressureDecision> {
        // TODO: Get actual queue metrics
        let current_queue_size = 0;
        let processing_time_ms = 1000.0;
        let wait_time_ms = 500.0;
        
        self.queue_health_monitor.update_metrics(
            worker_id.to_string(),
            current_queue_size,
            processing_time_ms,
            wait_time_ms,
        ).await;
        
        let decision = self.queue_health_monitor.recommend_backpressure(&worker_id.to_string()).await;
        Ok(decision)
    }

    /// Analyze failures and suggest remediation
    async fn analyze_failures(&self, worker_error: &crate::error::WorkerError, metrics: &ExecutionMetrics) -> anyhow::Result<Option<crate::learning::failure_taxonomy::RootCauseAnalysis>> {
        let failure_type = self.failure_taxonomy.classify_failure(worker_error, metrics).await;
        let task_id = TaskId::new(); // TODO: Use actual task ID
        let worker_id = WorkerId::new(); // TODO: Use actual worker ID
        let error_details = format!("{:?}", worker_error);
        
        let rca = self.failure_taxonomy.perform_rca(&task_id, &worker_id, &failure_type, &error_details, metrics).await;
        Ok(rca)
    }

    /// Persist learning data
    async fn persist_learning_data(&self, execution_records: Vec<crate::learning::metrics_collector::ExecutionRecord>) -> anyhow::Result<()> {
        // Store execution records
        self.learning_persistence.store_execution_records(execution_records.clone()).await?;
        
        // Store worker profiles
        let worker_profiles = std::collections::HashMap::new(); // TODO: Get actual worker profiles
        self.learning_persistence.store_worker_profiles(worker_profiles).await?;
        
        // Store patterns
        let (success_patterns, failure_patterns, optimal_configs) = self.pattern_analyzer.get_all_patterns().await;
        self.learning_persistence.store_success_patterns(success_patterns).await?;
        self.learning_persistence.store_failure_patterns(failure_patterns).await?;
        self.learning_persistence.store_optimal_configs(optimal_configs).await?;
        
        Ok(())
    }

    /// Get learning system statistics
    pub async fn get_learning_stats(&self) -> anyhow::Result<serde_json::Value> {
        let (success_patterns, failure_patterns, optimal_configs) = self.pattern_analyzer.get_all_patterns().await;
        let optimization_events = self.config_optimizer.get_optimization_history().await;
        
        Ok(serde_json::json!({
            "success_patterns_count": success_patterns.len(),
            "failure_patterns_count": failure_patterns.len(),
            "optimal_configs_count": optimal_configs.len(),
            "optimization_events_count": optimization_events.len(),
            "learning_enabled": true,
        }))
    }
}

// Stub implementations for learning components
struct StubFairnessMonitor;
struct StubAdaptiveSelector;
struct StubConfigOptimizer;
struct StubLearningPersistence;

#[async_trait::async_trait]
impl LearningPersistence for StubLearningPersistence {
    async fn store_execution_records(&self, _records: Vec<ExecutionRecord>) -> anyhow::Result<()> {
        Ok(())
    }
    
    async fn get_execution_records(&self, _pattern: &TaskPattern, _limit: Option<usize>) -> anyhow::Result<Vec<ExecutionRecord>> {
        Ok(vec![])
    }
    
    async fn store_worker_profiles(&self, _profiles: HashMap<WorkerId, WorkerPerformanceProfile>) -> anyhow::Result<()> {
        Ok(())
    }
    
    async fn get_worker_profile(&self, _worker_id: &WorkerId) -> anyhow::Result<Option<WorkerPerformanceProfile>> {
        Ok(None)
    }
    
    async fn store_success_patterns(&self, _patterns: Vec<SuccessPattern>) -> anyhow::Result<()> {
        Ok(())
    }
    
    async fn get_success_patterns(&self) -> anyhow::Result<Vec<SuccessPattern>> {
        Ok(vec![])
    }
    
    async fn store_failure_patterns(&self, _patterns: Vec<FailurePattern>) -> anyhow::Result<()> {
        Ok(())
    }
    
    async fn get_failure_patterns(&self) -> anyhow::Result<Vec<FailurePattern>> {
        Ok(vec![])
    }
    
    async fn store_optimal_configs(&self, _configs: Vec<OptimalConfig>) -> anyhow::Result<()> {
        Ok(())
    }
    
    async fn get_optimal_configs(&self) -> anyhow::Result<Vec<OptimalConfig>> {
        Ok(vec![])
    }
    
    async fn store_config_recommendations(&self, _recommendations: HashMap<TaskPattern, ConfigurationRecommendations>) -> anyhow::Result<()> {
        Ok(())
    }
    
    async fn get_config_recommendations(&self, _pattern: &TaskPattern) -> anyhow::Result<Option<ConfigurationRecommendations>> {
        Ok(None)
    }
    
    async fn store_optimization_events(&self, _events: Vec<OptimizationEvent>) -> anyhow::Result<()> {
        Ok(())
    }
    
    async fn get_optimization_events(&self, _limit: Option<usize>) -> anyhow::Result<Vec<OptimizationEvent>> {
        Ok(vec![])
    }
}
struct StubQueueHealthMonitor;
struct StubFailureTaxonomy;
