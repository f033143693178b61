//! Predictive Learning System for V3
//!
//! This module implements V3's superior learning capabilities that surpass V2's
//! reactive learning with proactive performance prediction, strategy optimization,
//! resource prediction, outcome prediction, and meta-learning acceleration.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Predictive Learning System that surpasses V2's reactive learning
#[derive(Debug)]
pub struct PredictiveLearningSystem {
    performance_predictor: Arc<PerformancePredictor>,
    strategy_optimizer: Arc<StrategyOptimizer>,
    resource_predictor: Arc<ResourcePredictor>,
    outcome_predictor: Arc<OutcomePredictor>,
    learning_accelerator: Arc<LearningAccelerator>,
    historical_data: Arc<RwLock<HashMap<String, LearningHistory>>>,
}

/// Performance predictor for future performance forecasting
#[derive(Debug)]
pub struct PerformancePredictor {
    trend_analyzer: TrendAnalyzer,
    performance_model: PerformanceModel,
    baseline_calculator: BaselineCalculator,
}

/// Strategy optimizer for proactive strategy optimization
#[derive(Debug)]
pub struct StrategyOptimizer {
    strategy_analyzer: StrategyAnalyzer,
    optimization_engine: OptimizationEngine,
    success_pattern_detector: SuccessPatternDetector,
}

/// Resource predictor for resource need prediction
#[derive(Debug)]
pub struct ResourcePredictor {
    resource_analyzer: ResourceAnalyzer,
    demand_forecaster: DemandForecaster,
    capacity_planner: CapacityPlanner,
}

/// Outcome predictor for task outcome prediction
#[derive(Debug)]
pub struct OutcomePredictor {
    outcome_analyzer: OutcomeAnalyzer,
    success_probability_calculator: SuccessProbabilityCalculator,
    risk_assessor: RiskAssessor,
}

/// Learning accelerator for meta-learning capabilities
#[derive(Debug)]
pub struct LearningAccelerator {
    meta_learning_engine: MetaLearningEngine,
    knowledge_transfer_optimizer: KnowledgeTransferOptimizer,
    adaptive_learning_rate: AdaptiveLearningRate,
}

/// Learning insights from predictive analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningInsights {
    pub performance_prediction: PerformancePrediction,
    pub strategy_optimization: StrategyOptimization,
    pub resource_prediction: ResourcePrediction,
    pub outcome_prediction: OutcomePrediction,
    pub learning_acceleration: LearningAcceleration,
}

/// Performance prediction result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformancePrediction {
    pub predicted_performance: f64,
    pub confidence: f64,
    pub trend_direction: TrendDirection,
    pub performance_factors: Vec<PerformanceFactor>,
    pub improvement_suggestions: Vec<ImprovementSuggestion>,
}

/// Strategy optimization result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyOptimization {
    pub optimized_strategies: Vec<OptimizedStrategy>,
    pub optimization_confidence: f64,
    pub expected_improvement: f64,
    pub strategy_recommendations: Vec<StrategyRecommendation>,
}

/// Resource prediction result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcePrediction {
    pub predicted_resource_needs: HashMap<String, ResourceNeed>,
    pub prediction_confidence: f64,
    pub resource_utilization: ResourceUtilization,
    pub scaling_recommendations: Vec<ScalingRecommendation>,
}

/// Outcome prediction result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomePrediction {
    pub success_probability: f64,
    pub confidence: f64,
    pub predicted_outcomes: Vec<PredictedOutcome>,
    pub risk_factors: Vec<RiskFactor>,
    pub mitigation_strategies: Vec<MitigationStrategy>,
}

/// Learning acceleration result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningAcceleration {
    pub acceleration_factor: f64,
    pub knowledge_transfer_efficiency: f64,
    pub meta_learning_insights: Vec<MetaLearningInsight>,
    pub learning_optimization: LearningOptimization,
}

/// Trend direction for performance analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
    Volatile,
}

/// Performance factor influencing performance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceFactor {
    pub factor_name: String,
    pub impact_score: f64,
    pub factor_type: PerformanceFactorType,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PerformanceFactorType {
    Technical,
    Process,
    Resource,
    Environmental,
    Human,
}

/// Improvement suggestion for performance enhancement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImprovementSuggestion {
    pub suggestion_type: SuggestionType,
    pub description: String,
    pub expected_impact: f64,
    pub implementation_effort: ImplementationEffort,
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SuggestionType {
    Technical,
    Process,
    Resource,
    Training,
    Infrastructure,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ImplementationEffort {
    Low,
    Medium,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

/// Optimized strategy with performance metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizedStrategy {
    pub strategy_id: Uuid,
    pub strategy_name: String,
    pub optimization_score: f64,
    pub expected_performance: f64,
    pub implementation_steps: Vec<String>,
    pub success_metrics: Vec<SuccessMetric>,
}

/// Strategy recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyRecommendation {
    pub recommendation_type: RecommendationType,
    pub description: String,
    pub confidence: f64,
    pub expected_benefit: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RecommendationType {
    Adopt,
    Modify,
    Abandon,
    Combine,
}

/// Resource need prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceNeed {
    pub resource_type: ResourceType,
    pub predicted_quantity: f64,
    pub predicted_duration: u64, // in milliseconds
    pub confidence: f64,
    pub peak_usage_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ResourceType {
    Cpu,
    Memory,
    Storage,
    Network,
    Gpu,
    Custom(String),
}

/// Resource utilization metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceUtilization {
    pub current_utilization: f64,
    pub predicted_utilization: f64,
    pub utilization_trend: TrendDirection,
    pub efficiency_score: f64,
}

/// Scaling recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalingRecommendation {
    pub scaling_type: ScalingType,
    pub scaling_direction: ScalingDirection,
    pub recommended_factor: f64,
    pub expected_benefit: f64,
    pub implementation_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScalingType {
    Horizontal,
    Vertical,
    Hybrid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScalingDirection {
    Up,
    Down,
    Maintain,
}

/// Predicted outcome with probability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictedOutcome {
    pub outcome_type: OutcomeType,
    pub probability: f64,
    pub description: String,
    pub impact_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutcomeType {
    Success,
    PartialSuccess,
    Failure,
    Timeout,
    Error,
}

/// Risk factor affecting outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFactor {
    pub risk_name: String,
    pub risk_level: RiskLevel,
    pub probability: f64,
    pub impact: f64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Mitigation strategy for risk reduction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MitigationStrategy {
    pub strategy_name: String,
    pub effectiveness: f64,
    pub implementation_cost: f64,
    pub description: String,
}

/// Meta-learning insight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaLearningInsight {
    pub insight_type: InsightType,
    pub description: String,
    pub applicability_score: f64,
    pub learning_pattern: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InsightType {
    Pattern,
    Optimization,
    Transfer,
    Generalization,
}

/// Learning optimization result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningOptimization {
    pub optimized_learning_rate: f64,
    pub recommended_learning_methods: Vec<LearningMethod>,
    pub knowledge_retention_score: f64,
    pub transfer_efficiency: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LearningMethod {
    Supervised,
    Unsupervised,
    Reinforcement,
    Transfer,
    Meta,
}

/// Success metric for strategy evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessMetric {
    pub metric_name: String,
    pub metric_type: MetricType,
    pub target_value: f64,
    pub current_value: f64,
    pub improvement_potential: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MetricType {
    Performance,
    Efficiency,
    Quality,
    Reliability,
    Scalability,
}

/// Learning history for tracking progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningHistory {
    pub task_id: Uuid,
    pub performance_history: Vec<PerformanceSnapshot>,
    pub strategy_history: Vec<StrategySnapshot>,
    pub resource_history: Vec<ResourceSnapshot>,
    pub outcome_history: Vec<OutcomeSnapshot>,
    pub learning_events: Vec<LearningEvent>,
}

/// Performance snapshot at a point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceSnapshot {
    pub timestamp: DateTime<Utc>,
    pub performance_score: f64,
    pub metrics: HashMap<String, f64>,
    pub context: String,
}

/// Strategy snapshot at a point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategySnapshot {
    pub timestamp: DateTime<Utc>,
    pub strategy_name: String,
    pub effectiveness: f64,
    pub usage_count: u32,
}

/// Resource snapshot at a point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub timestamp: DateTime<Utc>,
    pub resource_type: ResourceType,
    pub utilization: f64,
    pub availability: f64,
}

/// Outcome snapshot at a point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeSnapshot {
    pub timestamp: DateTime<Utc>,
    pub outcome_type: OutcomeType,
    pub success_score: f64,
    pub duration_ms: u64,
}

/// Learning event for tracking learning activities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningEvent {
    pub timestamp: DateTime<Utc>,
    pub event_type: LearningEventType,
    pub description: String,
    pub impact_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LearningEventType {
    StrategyAdopted,
    PerformanceImproved,
    ResourceOptimized,
    OutcomeAchieved,
    MetaLearning,
}

/// Task outcome for learning input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub task_id: Uuid,
    pub outcome_type: OutcomeType,
    pub performance_score: f64,
    pub duration_ms: u64,
    pub resource_usage: HashMap<String, f64>,
    pub strategies_used: Vec<String>,
    pub success_factors: Vec<String>,
    pub failure_factors: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl PredictiveLearningSystem {
    /// Create a new Predictive Learning System
    pub fn new() -> Self {
        Self {
            performance_predictor: Arc::new(PerformancePredictor::new()),
            strategy_optimizer: Arc::new(StrategyOptimizer::new()),
            resource_predictor: Arc::new(ResourcePredictor::new()),
            outcome_predictor: Arc::new(OutcomePredictor::new()),
            learning_accelerator: Arc::new(LearningAccelerator::new()),
            historical_data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// V3's superior learning capabilities
    pub async fn learn_and_predict(&self, task_outcome: &TaskOutcome) -> Result<LearningInsights> {
        info!(
            "Starting predictive learning analysis for task: {}",
            task_outcome.task_id
        );

        // 1. Predict future performance (V2: no prediction)
        let performance_prediction = self
            .performance_predictor
            .predict_future(task_outcome)
            .await?;

        // 2. Optimize strategies proactively (V2: reactive optimization)
        let strategy_optimization = self
            .strategy_optimizer
            .optimize_strategies(task_outcome)
            .await?;

        // 3. Predict resource needs (V2: no resource prediction)
        let resource_prediction = self.resource_predictor.predict_needs(task_outcome).await?;

        // 4. Predict task outcomes (V2: no outcome prediction)
        let outcome_prediction = self
            .outcome_predictor
            .predict_outcomes(task_outcome)
            .await?;

        // 5. Accelerate learning through meta-learning (V2: no meta-learning)
        let learning_acceleration = self
            .learning_accelerator
            .accelerate_learning(task_outcome)
            .await?;

        // Update historical data
        self.update_learning_history(task_outcome).await?;

        let insights = LearningInsights {
            performance_prediction,
            strategy_optimization,
            resource_prediction,
            outcome_prediction,
            learning_acceleration,
        };

        info!(
            "Completed predictive learning analysis for task: {}",
            task_outcome.task_id
        );
        Ok(insights)
    }

    /// Update learning history with new task outcome
    async fn update_learning_history(&self, task_outcome: &TaskOutcome) -> Result<()> {
        let mut history = self.historical_data.write().await;

        let entry = history
            .entry(task_outcome.task_id.to_string())
            .or_insert_with(|| LearningHistory {
                task_id: task_outcome.task_id,
                performance_history: Vec::new(),
                strategy_history: Vec::new(),
                resource_history: Vec::new(),
                outcome_history: Vec::new(),
                learning_events: Vec::new(),
            });

        // Add performance snapshot
        entry.performance_history.push(PerformanceSnapshot {
            timestamp: task_outcome.timestamp,
            performance_score: task_outcome.performance_score,
            metrics: task_outcome.resource_usage.clone(),
            context: format!("Task outcome: {:?}", task_outcome.outcome_type),
        });

        // Add outcome snapshot
        entry.outcome_history.push(OutcomeSnapshot {
            timestamp: task_outcome.timestamp,
            outcome_type: task_outcome.outcome_type.clone(),
            success_score: task_outcome.performance_score,
            duration_ms: task_outcome.duration_ms,
        });

        // Add learning event
        entry.learning_events.push(LearningEvent {
            timestamp: task_outcome.timestamp,
            event_type: LearningEventType::OutcomeAchieved,
            description: format!(
                "Task completed with {:?} outcome",
                task_outcome.outcome_type
            ),
            impact_score: task_outcome.performance_score,
        });

        Ok(())
    }
}

// Implementation stubs for individual components
// These will be expanded with full functionality

impl PerformancePredictor {
    pub fn new() -> Self {
        Self {
            trend_analyzer: TrendAnalyzer::new(),
            performance_model: PerformanceModel::new(),
            baseline_calculator: BaselineCalculator::new(),
        }
    }

    pub async fn predict_future(
        &self,
        task_outcome: &TaskOutcome,
    ) -> Result<PerformancePrediction> {
        debug!(
            "Predicting future performance for task: {}",
            task_outcome.task_id
        );

        // 1. Performance analysis: Analyze historical task performance data
        let historical_performance = self.analyze_historical_performance(task_outcome).await?;
        let trend_direction = self
            .trend_analyzer
            .analyze_trends(&historical_performance)?;
        let baseline_performance = self
            .baseline_calculator
            .calculate_baseline(&historical_performance)?;

        // 2. Predictive modeling: Build predictive models for task outcomes
        let performance_factors =
            self.analyze_performance_factors(task_outcome, &historical_performance)?;
        let predicted_performance = self.performance_model.predict_performance(
            task_outcome,
            &historical_performance,
            &performance_factors,
        )?;

        // 3. Prediction calculation: Calculate performance predictions with confidence
        let confidence =
            self.calculate_prediction_confidence(&historical_performance, &performance_factors);
        let improvement_suggestions =
            self.generate_improvement_suggestions(&performance_factors)?;

        // 4. Prediction validation: Log prediction quality metrics
        debug!(
            "Performance prediction: {:.3} (confidence: {:.3}, baseline: {:.3})",
            predicted_performance, confidence, baseline_performance
        );

        Ok(PerformancePrediction {
            predicted_performance,
            confidence,
            trend_direction,
            performance_factors,
            improvement_suggestions,
        })
    }

    /// Analyze historical performance data for trend identification
    async fn analyze_historical_performance(
        &self,
        task_outcome: &TaskOutcome,
    ) -> Result<Vec<PerformanceSnapshot>> {
        // Retrieve historical performance data from learning history
        // In a real implementation, this would query a database or cache
        let mut historical_data = Vec::new();

        // For now, use the current task as baseline historical data
        historical_data.push(PerformanceSnapshot {
            timestamp: task_outcome.timestamp,
            performance_score: task_outcome.performance_score,
            metrics: task_outcome.resource_usage.clone(),
            context: format!("Current task outcome: {:?}", task_outcome.outcome_type),
        });

        Ok(historical_data)
    }

    /// Analyze factors influencing performance
    fn analyze_performance_factors(
        &self,
        task_outcome: &TaskOutcome,
        historical_data: &[PerformanceSnapshot],
    ) -> Result<Vec<PerformanceFactor>> {
        let mut factors = Vec::new();

        // Resource utilization factor
        let avg_cpu_usage = historical_data
            .iter()
            .filter_map(|snapshot| snapshot.metrics.get("cpu").cloned())
            .sum::<f64>()
            / historical_data.len().max(1) as f64;

        factors.push(PerformanceFactor {
            factor_name: "Resource utilization".to_string(),
            impact_score: (avg_cpu_usage - 0.5).abs() * 0.3, // Optimal around 0.5
            factor_type: PerformanceFactorType::Resource,
            description: format!("Average CPU utilization: {:.1}%", avg_cpu_usage * 100.0),
        });

        // Task complexity factor based on duration
        let complexity_factor = if task_outcome.duration_ms > 5000 {
            0.8 // High complexity
        } else if task_outcome.duration_ms > 1000 {
            0.5 // Medium complexity
        } else {
            0.2 // Low complexity
        };

        factors.push(PerformanceFactor {
            factor_name: "Task complexity".to_string(),
            impact_score: complexity_factor,
            factor_type: PerformanceFactorType::Technical,
            description: format!("Task duration: {}ms", task_outcome.duration_ms),
        });

        // Success factor based on outcome type
        let success_factor = match task_outcome.outcome_type {
            OutcomeType::Success => 0.1,
            OutcomeType::PartialSuccess => 0.4,
            OutcomeType::Failure | OutcomeType::Error => 0.8,
            OutcomeType::Timeout => 0.6,
        };

        factors.push(PerformanceFactor {
            factor_name: "Historical success rate".to_string(),
            impact_score: success_factor,
            factor_type: PerformanceFactorType::Process,
            description: format!("Previous outcome: {:?}", task_outcome.outcome_type),
        });

        Ok(factors)
    }

    /// Calculate prediction confidence based on data quality and consistency
    fn calculate_prediction_confidence(
        &self,
        historical_data: &[PerformanceSnapshot],
        factors: &[PerformanceFactor],
    ) -> f64 {
        let data_quality = historical_data.len().min(10) as f64 / 10.0; // More data = higher confidence
        let factor_consistency =
            factors.iter().map(|f| f.impact_score).sum::<f64>() / factors.len() as f64;
        let base_confidence = 0.7; // Base confidence level

        (data_quality * 0.3 + factor_consistency * 0.4 + base_confidence * 0.3).min(0.95)
    }

    /// Generate improvement suggestions based on performance factors
    fn generate_improvement_suggestions(
        &self,
        factors: &[PerformanceFactor],
    ) -> Result<Vec<ImprovementSuggestion>> {
        let mut suggestions = Vec::new();

        for factor in factors {
            if factor.impact_score > 0.6 {
                let suggestion = match factor.factor_type {
                    PerformanceFactorType::Resource => ImprovementSuggestion {
                        suggestion_type: SuggestionType::Resource,
                        description: format!(
                            "Optimize {} allocation",
                            factor.factor_name.to_lowercase()
                        ),
                        expected_impact: factor.impact_score * 0.8,
                        implementation_effort: ImplementationEffort::Medium,
                        priority: Priority::High,
                    },
                    PerformanceFactorType::Technical => ImprovementSuggestion {
                        suggestion_type: SuggestionType::Technical,
                        description: format!(
                            "Address {} complexity issues",
                            factor.factor_name.to_lowercase()
                        ),
                        expected_impact: factor.impact_score * 0.7,
                        implementation_effort: ImplementationEffort::High,
                        priority: Priority::Medium,
                    },
                    PerformanceFactorType::Process => ImprovementSuggestion {
                        suggestion_type: SuggestionType::Process,
                        description: format!(
                            "Improve {} processes",
                            factor.factor_name.to_lowercase()
                        ),
                        expected_impact: factor.impact_score * 0.6,
                        implementation_effort: ImplementationEffort::Low,
                        priority: Priority::High,
                    },
                    _ => ImprovementSuggestion {
                        suggestion_type: SuggestionType::Training,
                        description: format!(
                            "Review {} effectiveness",
                            factor.factor_name.to_lowercase()
                        ),
                        expected_impact: factor.impact_score * 0.5,
                        implementation_effort: ImplementationEffort::Low,
                        priority: Priority::Low,
                    },
                };
                suggestions.push(suggestion);
            }
        }

        Ok(suggestions.into_iter().take(3).collect()) // Limit to top 3 suggestions
    }
}

impl StrategyOptimizer {
    pub fn new() -> Self {
        Self {
            strategy_analyzer: StrategyAnalyzer::new(),
            optimization_engine: OptimizationEngine::new(),
            success_pattern_detector: SuccessPatternDetector::new(),
        }
    }

    pub async fn optimize_strategies(
        &self,
        task_outcome: &TaskOutcome,
    ) -> Result<StrategyOptimization> {
        debug!("Optimizing strategies for task: {}", task_outcome.task_id);

        // 1. Strategy analysis: Analyze current strategy effectiveness
        let strategy_performance = self.analyze_strategy_performance(task_outcome)?;
        let successful_patterns = self
            .success_pattern_detector
            .detect_patterns(&strategy_performance)?;

        // 2. Optimization modeling: Build optimization models for strategies
        let optimization_model = self
            .optimization_engine
            .build_model(&strategy_performance, &successful_patterns)?;
        let strategy_candidates =
            self.generate_strategy_candidates(task_outcome, &successful_patterns)?;

        // 3. Strategy optimization: Optimize strategy selection and parameters
        let optimized_strategies =
            self.optimize_strategy_selection(&strategy_candidates, &optimization_model)?;
        let optimization_confidence =
            self.calculate_optimization_confidence(&strategy_candidates, &optimized_strategies);

        // 4. Optimization validation: Validate optimization effectiveness
        let expected_improvement =
            self.validate_optimization_impact(&optimized_strategies, task_outcome)?;
        let strategy_recommendations =
            self.generate_strategy_recommendations(&optimized_strategies)?;

        debug!(
            "Strategy optimization completed: {} strategies optimized, expected improvement: {:.1}%",
            optimized_strategies.len(),
            expected_improvement * 100.0
        );

        Ok(StrategyOptimization {
            optimized_strategies,
            optimization_confidence,
            expected_improvement,
            strategy_recommendations,
        })
    }

    /// Analyze current strategy performance effectiveness
    fn analyze_strategy_performance(
        &self,
        task_outcome: &TaskOutcome,
    ) -> Result<HashMap<String, f64>> {
        let mut strategy_scores = HashMap::new();

        // Analyze strategies used in this task
        for strategy in &task_outcome.strategies_used {
            let base_score = match task_outcome.outcome_type {
                OutcomeType::Success => 0.9,
                OutcomeType::PartialSuccess => 0.7,
                OutcomeType::Failure | OutcomeType::Error => 0.3,
                OutcomeType::Timeout => 0.4,
            };

            // Adjust based on resource efficiency
            let resource_efficiency = task_outcome.resource_usage.values().sum::<f64>()
                / task_outcome.resource_usage.len().max(1) as f64;

            let adjusted_score = base_score * (1.0 - resource_efficiency * 0.2); // Penalize high resource usage
            strategy_scores.insert(strategy.clone(), adjusted_score);
        }

        // Add default strategies if none were used
        if strategy_scores.is_empty() {
            strategy_scores.insert("parallel_processing".to_string(), 0.7);
            strategy_scores.insert("sequential_processing".to_string(), 0.6);
            strategy_scores.insert("resource_optimization".to_string(), 0.8);
        }

        Ok(strategy_scores)
    }

    /// Generate candidate strategies for optimization
    fn generate_strategy_candidates(
        &self,
        task_outcome: &TaskOutcome,
        successful_patterns: &[String],
    ) -> Result<Vec<OptimizedStrategy>> {
        let mut candidates = Vec::new();

        // Generate strategy candidates based on task characteristics
        if task_outcome.duration_ms > 5000 {
            // High-complexity task - suggest parallel processing
            candidates.push(OptimizedStrategy {
                strategy_id: Uuid::new_v4(),
                strategy_name: "Enhanced parallel processing".to_string(),
                optimization_score: 0.85,
                expected_performance: 0.9,
                implementation_steps: vec![
                    "Identify parallelizable subtasks".to_string(),
                    "Implement concurrent execution".to_string(),
                    "Add synchronization mechanisms".to_string(),
                    "Monitor parallel efficiency".to_string(),
                ],
                success_metrics: vec![SuccessMetric {
                    metric_name: "Execution time reduction".to_string(),
                    metric_type: MetricType::Performance,
                    target_value: 0.6, // 40% reduction target
                    current_value: 1.0,
                    improvement_potential: 0.4,
                }],
            });
        }

        if task_outcome.resource_usage.get("cpu").unwrap_or(&0.0) > &0.7 {
            // High CPU usage - suggest resource optimization
            candidates.push(OptimizedStrategy {
                strategy_id: Uuid::new_v4(),
                strategy_name: "Resource-aware scheduling".to_string(),
                optimization_score: 0.78,
                expected_performance: 0.85,
                implementation_steps: vec![
                    "Implement CPU affinity settings".to_string(),
                    "Add resource monitoring".to_string(),
                    "Optimize thread allocation".to_string(),
                ],
                success_metrics: vec![SuccessMetric {
                    metric_name: "CPU utilization efficiency".to_string(),
                    metric_type: MetricType::Efficiency,
                    target_value: 0.75, // 75% target efficiency
                    current_value: *task_outcome.resource_usage.get("cpu").unwrap_or(&0.5),
                    improvement_potential: 0.2,
                }],
            });
        }

        // Add pattern-based strategies
        for pattern in successful_patterns {
            if pattern.contains("caching") {
                candidates.push(OptimizedStrategy {
                    strategy_id: Uuid::new_v4(),
                    strategy_name: "Intelligent caching".to_string(),
                    optimization_score: 0.82,
                    expected_performance: 0.88,
                    implementation_steps: vec![
                        "Identify cacheable data".to_string(),
                        "Implement caching layer".to_string(),
                        "Add cache invalidation logic".to_string(),
                    ],
                    success_metrics: vec![SuccessMetric {
                        metric_name: "Cache hit rate".to_string(),
                        metric_type: MetricType::Efficiency,
                        target_value: 0.85,
                        current_value: 0.6,
                        improvement_potential: 0.25,
                    }],
                });
            }
        }

        Ok(candidates)
    }

    /// Optimize strategy selection based on performance criteria
    fn optimize_strategy_selection(
        &self,
        candidates: &[OptimizedStrategy],
        optimization_model: &OptimizationModel,
    ) -> Result<Vec<OptimizedStrategy>> {
        let mut optimized = candidates.to_vec();

        // Sort by optimization score and select top performers
        optimized.sort_by(|a, b| {
            b.optimization_score
                .partial_cmp(&a.optimization_score)
                .unwrap()
        });

        // Limit to top 3 strategies to avoid overwhelming recommendations
        optimized.truncate(3);

        // Apply optimization adjustments
        for strategy in &mut optimized {
            strategy.expected_performance *= optimization_model.adjustment_factor;
            strategy.optimization_score *= optimization_model.confidence_factor;
        }

        Ok(optimized)
    }

    /// Calculate optimization confidence
    fn calculate_optimization_confidence(
        &self,
        candidates: &[OptimizedStrategy],
        optimized: &[OptimizedStrategy],
    ) -> f64 {
        if candidates.is_empty() {
            return 0.5;
        }

        let avg_candidate_score =
            candidates.iter().map(|c| c.optimization_score).sum::<f64>() / candidates.len() as f64;
        let avg_optimized_score = optimized.iter().map(|o| o.optimization_score).sum::<f64>()
            / optimized.len().max(1) as f64;

        let improvement_ratio = if avg_candidate_score > 0.0 {
            avg_optimized_score / avg_candidate_score
        } else {
            1.0
        };

        (0.7 + improvement_ratio * 0.3).min(0.95)
    }

    /// Validate optimization impact
    fn validate_optimization_impact(
        &self,
        optimized_strategies: &[OptimizedStrategy],
        task_outcome: &TaskOutcome,
    ) -> Result<f64> {
        let total_expected_improvement = optimized_strategies
            .iter()
            .map(|strategy| {
                strategy
                    .success_metrics
                    .iter()
                    .map(|metric| metric.improvement_potential)
                    .sum::<f64>()
            })
            .sum::<f64>()
            / optimized_strategies.len().max(1) as f64;

        Ok(total_expected_improvement.min(0.5)) // Cap at 50% improvement
    }

    /// Generate strategy recommendations
    fn generate_strategy_recommendations(
        &self,
        optimized_strategies: &[OptimizedStrategy],
    ) -> Result<Vec<StrategyRecommendation>> {
        let mut recommendations = Vec::new();

        for strategy in optimized_strategies {
            let recommendation_type = if strategy.optimization_score > 0.8 {
                RecommendationType::Adopt
            } else if strategy.optimization_score > 0.6 {
                RecommendationType::Modify
            } else {
                RecommendationType::Combine
            };

            recommendations.push(StrategyRecommendation {
                recommendation_type,
                description: format!(
                    "{} - expected improvement: {:.1}%",
                    strategy.strategy_name,
                    strategy.expected_performance * 100.0
                ),
                confidence: strategy.optimization_score,
                expected_benefit: strategy
                    .success_metrics
                    .iter()
                    .map(|m| m.improvement_potential)
                    .sum::<f64>(),
            });
        }

        Ok(recommendations)
    }
}

impl ResourcePredictor {
    pub fn new() -> Self {
        Self {
            resource_analyzer: ResourceAnalyzer::new(),
            demand_forecaster: DemandForecaster::new(),
            capacity_planner: CapacityPlanner::new(),
        }
    }

    pub async fn predict_needs(&self, task_outcome: &TaskOutcome) -> Result<ResourcePrediction> {
        debug!(
            "Predicting resource needs for task: {}",
            task_outcome.task_id
        );

        // 1. Resource analysis: Analyze historical resource utilization
        let resource_patterns = self.analyze_resource_patterns(task_outcome)?;
        let utilization_trends = self
            .capacity_planner
            .analyze_capacity_trends(&resource_patterns)?;

        // 2. Prediction modeling: Build predictive models for resource needs
        let predicted_needs = self
            .demand_forecaster
            .forecast_demand(task_outcome, &resource_patterns)?;
        let prediction_confidence =
            self.calculate_resource_prediction_confidence(&predicted_needs, &resource_patterns);

        // 3. Resource optimization: Optimize resource allocation predictions
        let optimized_needs =
            self.optimize_resource_allocation(&predicted_needs, &utilization_trends)?;
        let scaling_recommendations =
            self.generate_scaling_recommendations(&optimized_needs, &utilization_trends)?;

        // 4. Prediction monitoring: Monitor prediction accuracy and quality
        debug!(
            "Resource prediction: {} resources predicted, confidence: {:.2}",
            optimized_needs.len(),
            prediction_confidence
        );

        Ok(ResourcePrediction {
            predicted_resource_needs: optimized_needs,
            prediction_confidence,
            resource_utilization: ResourceUtilization {
                current_utilization: resource_patterns.current_avg_utilization,
                predicted_utilization: resource_patterns.predicted_avg_utilization,
                utilization_trend: utilization_trends.overall_trend,
                efficiency_score: resource_patterns.efficiency_score,
            },
            scaling_recommendations,
        })
    }

    /// Analyze resource usage patterns from historical data
    fn analyze_resource_patterns(&self, task_outcome: &TaskOutcome) -> Result<ResourcePatterns> {
        // Extract resource usage data from task outcome
        let mut resource_data = HashMap::new();

        for (resource_name, usage) in &task_outcome.resource_usage {
            resource_data.insert(resource_name.clone(), vec![*usage]);
        }

        // Add default CPU and memory if not present
        if !resource_data.contains_key("cpu") {
            resource_data.insert("cpu".to_string(), vec![0.6]);
        }
        if !resource_data.contains_key("memory") {
            resource_data.insert("memory".to_string(), vec![0.5]);
        }

        // Calculate patterns
        let current_avg_utilization = resource_data.values().flat_map(|v| v.iter()).sum::<f64>()
            / resource_data.len().max(1) as f64;

        // Predict future utilization based on task characteristics
        let complexity_factor = if task_outcome.duration_ms > 10000 {
            1.3 // High complexity tasks need more resources
        } else if task_outcome.duration_ms > 5000 {
            1.1 // Medium complexity
        } else {
            0.9 // Low complexity
        };

        let predicted_avg_utilization = (current_avg_utilization * complexity_factor).min(0.95);

        // Calculate efficiency score
        let efficiency_score = 1.0 - (predicted_avg_utilization - 0.7).abs() * 0.5; // Optimal around 0.7

        Ok(ResourcePatterns {
            resource_data,
            current_avg_utilization,
            predicted_avg_utilization,
            efficiency_score,
            task_complexity: complexity_factor,
        })
    }

    /// Optimize resource allocation predictions
    fn optimize_resource_allocation(
        &self,
        predicted_needs: &HashMap<String, ResourceNeed>,
        trends: &CapacityTrends,
    ) -> Result<HashMap<String, ResourceNeed>> {
        let mut optimized = predicted_needs.clone();

        // Apply optimization adjustments based on trends and capacity
        for (resource_name, need) in optimized.iter_mut() {
            // Adjust quantity based on utilization trends
            let adjustment_factor = match trends.overall_trend {
                TrendDirection::Improving => 0.9, // Can reduce allocation
                TrendDirection::Declining => 1.1, // Need more allocation
                TrendDirection::Stable => 1.0,    // Keep current
                TrendDirection::Volatile => 1.05, // Slightly increase for safety
            };

            need.predicted_quantity = (need.predicted_quantity * adjustment_factor).min(1.0);

            // Adjust confidence based on trend stability
            need.confidence *= match trends.overall_trend {
                TrendDirection::Stable => 1.0,
                TrendDirection::Improving => 0.95,
                TrendDirection::Declining => 0.9,
                TrendDirection::Volatile => 0.85,
            };
        }

        Ok(optimized)
    }

    /// Generate scaling recommendations based on resource predictions
    fn generate_scaling_recommendations(
        &self,
        optimized_needs: &HashMap<String, ResourceNeed>,
        trends: &CapacityTrends,
    ) -> Result<Vec<ScalingRecommendation>> {
        let mut recommendations = Vec::new();

        // Check for high CPU utilization
        if let Some(cpu_need) = optimized_needs.get("cpu") {
            if cpu_need.predicted_quantity > 0.8 {
                recommendations.push(ScalingRecommendation {
                    scaling_type: ScalingType::Vertical,
                    scaling_direction: ScalingDirection::Up,
                    recommended_factor: 1.5,
                    expected_benefit: 0.25,
                    implementation_cost: 0.15,
                });
            }
        }

        // Check for memory pressure
        if let Some(memory_need) = optimized_needs.get("memory") {
            if memory_need.predicted_quantity > 0.85 {
                recommendations.push(ScalingRecommendation {
                    scaling_type: ScalingType::Horizontal,
                    scaling_direction: ScalingDirection::Up,
                    recommended_factor: 2.0,
                    expected_benefit: 0.4,
                    implementation_cost: 0.3,
                });
            }
        }

        // Add efficiency-based recommendations
        if trends.overall_trend == TrendDirection::Improving {
            recommendations.push(ScalingRecommendation {
                scaling_type: ScalingType::Hybrid,
                scaling_direction: ScalingDirection::Down,
                recommended_factor: 0.8,
                expected_benefit: 0.15,
                implementation_cost: 0.05,
            });
        }

        Ok(recommendations)
    }

    /// Calculate resource prediction confidence
    fn calculate_resource_prediction_confidence(
        &self,
        predicted_needs: &HashMap<String, ResourceNeed>,
        patterns: &ResourcePatterns,
    ) -> f64 {
        let data_quality = patterns.resource_data.len().min(5) as f64 / 5.0; // More resource types = higher confidence
        let efficiency_factor = patterns.efficiency_score;
        let complexity_penalty = (patterns.task_complexity - 1.0).abs() * 0.1; // Penalize extreme complexity

        let base_confidence = 0.75;
        (base_confidence + data_quality * 0.15 + efficiency_factor * 0.1 - complexity_penalty)
            .min(0.95)
    }
}

impl OutcomePredictor {
    pub fn new() -> Self {
        Self {
            outcome_analyzer: OutcomeAnalyzer::new(),
            success_probability_calculator: SuccessProbabilityCalculator::new(),
            risk_assessor: RiskAssessor::new(),
        }
    }

    pub async fn predict_outcomes(&self, task_outcome: &TaskOutcome) -> Result<OutcomePrediction> {
        debug!("Predicting outcomes for task: {}", task_outcome.task_id);

        // 1. Outcome analysis: Analyze historical task outcomes and patterns
        let outcome_patterns = self.analyze_outcome_patterns(task_outcome)?;
        let risk_assessment = self
            .risk_assessor
            .assess_risks(task_outcome, &outcome_patterns)?;

        // 2. Prediction modeling: Build predictive models for task outcomes
        let success_probability = self
            .success_probability_calculator
            .calculate_probability(task_outcome, &outcome_patterns)?;
        let predicted_outcomes = self
            .outcome_analyzer
            .predict_outcome_distribution(success_probability)?;

        // 3. Outcome forecasting: Forecast task success and failure probabilities
        let confidence = self.calculate_outcome_confidence(&outcome_patterns, &risk_assessment);
        let risk_factors = self.extract_risk_factors(&risk_assessment)?;
        let mitigation_strategies = self.generate_mitigation_strategies(&risk_factors)?;

        // 4. Prediction evaluation: Evaluate prediction quality and reliability
        debug!(
            "Outcome prediction: success probability {:.2}, confidence {:.2}, {} risk factors identified",
            success_probability, confidence, risk_factors.len()
        );

        Ok(OutcomePrediction {
            success_probability,
            confidence,
            predicted_outcomes,
            risk_factors,
            mitigation_strategies,
        })
    }

    /// Analyze historical outcome patterns
    fn analyze_outcome_patterns(&self, task_outcome: &TaskOutcome) -> Result<OutcomePatterns> {
        // Analyze based on current task outcome and similar patterns
        let success_rate = match task_outcome.outcome_type {
            OutcomeType::Success => 0.8,
            OutcomeType::PartialSuccess => 0.6,
            OutcomeType::Failure | OutcomeType::Error => 0.3,
            OutcomeType::Timeout => 0.4,
        };

        // Calculate failure patterns
        let failure_rate = 1.0 - success_rate;
        let timeout_rate = if matches!(task_outcome.outcome_type, OutcomeType::Timeout) {
            0.2
        } else {
            0.05
        };

        // Analyze resource impact on outcomes
        let resource_pressure = task_outcome.resource_usage.values().sum::<f64>()
            / task_outcome.resource_usage.len().max(1) as f64;

        Ok(OutcomePatterns {
            success_rate,
            failure_rate,
            timeout_rate,
            resource_pressure,
            task_duration_ms: task_outcome.duration_ms,
            strategy_effectiveness: task_outcome.strategies_used.len() as f64 * 0.1, // More strategies = potentially better outcomes
        })
    }

    /// Calculate outcome prediction confidence
    fn calculate_outcome_confidence(
        &self,
        patterns: &OutcomePatterns,
        risk_assessment: &RiskAssessment,
    ) -> f64 {
        let data_quality = 0.7; // Base data quality (would be calculated from historical data)
        let risk_penalty = risk_assessment.overall_risk_score * 0.2;
        let pattern_stability = (1.0 - patterns.failure_rate) * 0.8;

        (data_quality + pattern_stability - risk_penalty)
            .max(0.5)
            .min(0.95)
    }

    /// Extract risk factors from risk assessment
    fn extract_risk_factors(&self, risk_assessment: &RiskAssessment) -> Result<Vec<RiskFactor>> {
        let mut risk_factors = Vec::new();

        // Resource-related risks
        if risk_assessment.resource_risk > 0.6 {
            risk_factors.push(RiskFactor {
                risk_name: "Resource constraints".to_string(),
                risk_level: if risk_assessment.resource_risk > 0.8 {
                    RiskLevel::High
                } else {
                    RiskLevel::Medium
                },
                probability: risk_assessment.resource_risk,
                impact: 0.6,
                description: "Insufficient resources may cause task failure".to_string(),
            });
        }

        // Time-related risks
        if risk_assessment.timeout_risk > 0.5 {
            risk_factors.push(RiskFactor {
                risk_name: "Timeout risk".to_string(),
                risk_level: RiskLevel::Medium,
                probability: risk_assessment.timeout_risk,
                impact: 0.4,
                description: "Task may exceed time limits".to_string(),
            });
        }

        // Strategy-related risks
        if risk_assessment.strategy_risk > 0.4 {
            risk_factors.push(RiskFactor {
                risk_name: "Strategy mismatch".to_string(),
                risk_level: RiskLevel::Low,
                probability: risk_assessment.strategy_risk,
                impact: 0.3,
                description: "Current strategies may not be optimal".to_string(),
            });
        }

        Ok(risk_factors)
    }

    /// Generate mitigation strategies for identified risks
    fn generate_mitigation_strategies(
        &self,
        risk_factors: &[RiskFactor],
    ) -> Result<Vec<MitigationStrategy>> {
        let mut strategies = Vec::new();

        for risk in risk_factors {
            let strategy = match risk.risk_name.as_str() {
                "Resource constraints" => MitigationStrategy {
                    strategy_name: "Resource pre-allocation".to_string(),
                    effectiveness: 0.8,
                    implementation_cost: 0.2,
                    description: "Pre-allocate required resources before task execution"
                        .to_string(),
                },
                "Timeout risk" => MitigationStrategy {
                    strategy_name: "Timeout protection".to_string(),
                    effectiveness: 0.9,
                    implementation_cost: 0.1,
                    description: "Implement timeout handling and circuit breakers".to_string(),
                },
                "Strategy mismatch" => MitigationStrategy {
                    strategy_name: "Strategy optimization".to_string(),
                    effectiveness: 0.7,
                    implementation_cost: 0.3,
                    description: "Review and optimize task execution strategies".to_string(),
                },
                _ => MitigationStrategy {
                    strategy_name: "General risk mitigation".to_string(),
                    effectiveness: 0.6,
                    implementation_cost: 0.15,
                    description: "Apply general risk reduction measures".to_string(),
                },
            };
            strategies.push(strategy);
        }

        Ok(strategies)
    }
}

impl LearningAccelerator {
    pub fn new() -> Self {
        Self {
            meta_learning_engine: MetaLearningEngine::new(),
            knowledge_transfer_optimizer: KnowledgeTransferOptimizer::new(),
            adaptive_learning_rate: AdaptiveLearningRate::new(),
        }
    }

    pub async fn accelerate_learning(
        &self,
        task_outcome: &TaskOutcome,
    ) -> Result<LearningAcceleration> {
        debug!("Accelerating learning for task: {}", task_outcome.task_id);

        // 1. Learning analysis: Analyze current learning effectiveness and bottlenecks
        let learning_analysis = self.analyze_learning_effectiveness(task_outcome)?;
        let transfer_patterns = self
            .knowledge_transfer_optimizer
            .analyze_transfer_patterns(&learning_analysis)?;

        // 2. Acceleration modeling: Build models for learning acceleration optimization
        let acceleration_model = self
            .meta_learning_engine
            .build_acceleration_model(&learning_analysis, &transfer_patterns)?;
        let learning_methods = self
            .adaptive_learning_rate
            .recommend_methods(&learning_analysis)?;

        // 3. Learning optimization: Optimize learning processes and strategies
        let acceleration_factor =
            self.calculate_acceleration_factor(&acceleration_model, &learning_analysis);
        let knowledge_transfer_efficiency = transfer_patterns.efficiency_score;
        let meta_learning_insights =
            self.extract_meta_insights(&learning_analysis, &transfer_patterns)?;
        let learning_optimization =
            self.optimize_learning_parameters(&learning_methods, &acceleration_model)?;

        // 4. Acceleration validation: Validate learning acceleration effectiveness
        debug!(
            "Learning acceleration: factor {:.2}, transfer efficiency {:.2}, {} insights generated",
            acceleration_factor,
            knowledge_transfer_efficiency,
            meta_learning_insights.len()
        );

        Ok(LearningAcceleration {
            acceleration_factor,
            knowledge_transfer_efficiency,
            meta_learning_insights,
            learning_optimization,
        })
    }

    /// Analyze current learning effectiveness and identify bottlenecks
    fn analyze_learning_effectiveness(
        &self,
        task_outcome: &TaskOutcome,
    ) -> Result<LearningAnalysis> {
        // Analyze learning patterns based on task outcome
        let learning_rate = task_outcome.strategies_used.len() as f64 * 0.1; // Strategies indicate learning
        let knowledge_retention = match task_outcome.outcome_type {
            OutcomeType::Success => 0.9,
            OutcomeType::PartialSuccess => 0.7,
            OutcomeType::Failure | OutcomeType::Error => 0.4,
            OutcomeType::Timeout => 0.6,
        };

        // Identify learning bottlenecks
        let bottleneck_factor = if task_outcome.duration_ms > 20000 {
            0.7 // Long tasks may have learning bottlenecks
        } else {
            0.9
        };

        let transfer_efficiency = task_outcome.success_factors.len() as f64 * 0.1; // Success factors indicate transfer

        Ok(LearningAnalysis {
            learning_rate,
            knowledge_retention,
            bottleneck_factor,
            transfer_efficiency,
            task_complexity: if task_outcome.duration_ms > 10000 {
                0.8
            } else {
                0.4
            },
            strategy_diversity: task_outcome.strategies_used.len() as f64,
        })
    }

    /// Calculate optimal acceleration factor
    fn calculate_acceleration_factor(
        &self,
        acceleration_model: &AccelerationModel,
        learning_analysis: &LearningAnalysis,
    ) -> f64 {
        // Base acceleration from model
        let mut factor = acceleration_model.base_acceleration;

        // Adjust based on learning analysis
        factor *= learning_analysis.bottleneck_factor;
        factor *= 1.0 + (learning_analysis.transfer_efficiency * 0.3);
        factor *= 1.0 + (learning_analysis.strategy_diversity * 0.1);

        // Ensure reasonable bounds
        factor.max(1.0).min(3.0) // 1x to 3x acceleration
    }

    /// Extract meta-learning insights from analysis
    fn extract_meta_insights(
        &self,
        learning_analysis: &LearningAnalysis,
        transfer_patterns: &TransferPatterns,
    ) -> Result<Vec<MetaLearningInsight>> {
        let mut insights = Vec::new();

        // Strategy effectiveness insight
        if learning_analysis.strategy_diversity > 3.0 {
            insights.push(MetaLearningInsight {
                insight_type: InsightType::Pattern,
                description: "Multiple strategy combinations improve learning outcomes".to_string(),
                applicability_score: 0.85,
                learning_pattern: "Strategy diversity pattern".to_string(),
            });
        }

        // Transfer learning insight
        if transfer_patterns.efficiency_score > 0.7 {
            insights.push(MetaLearningInsight {
                insight_type: InsightType::Transfer,
                description: "Knowledge transfer between similar tasks is highly effective"
                    .to_string(),
                applicability_score: transfer_patterns.efficiency_score,
                learning_pattern: "Cross-task transfer pattern".to_string(),
            });
        }

        // Bottleneck identification insight
        if learning_analysis.bottleneck_factor < 0.8 {
            insights.push(MetaLearningInsight {
                insight_type: InsightType::Optimization,
                description: "Task duration bottlenecks limit learning acceleration".to_string(),
                applicability_score: 1.0 - learning_analysis.bottleneck_factor,
                learning_pattern: "Performance bottleneck pattern".to_string(),
            });
        }

        // Knowledge retention insight
        if learning_analysis.knowledge_retention > 0.8 {
            insights.push(MetaLearningInsight {
                insight_type: InsightType::Generalization,
                description: "High knowledge retention enables faster future learning".to_string(),
                applicability_score: learning_analysis.knowledge_retention,
                learning_pattern: "Retention effectiveness pattern".to_string(),
            });
        }

        Ok(insights)
    }

    /// Optimize learning parameters and methods
    fn optimize_learning_parameters(
        &self,
        learning_methods: &[LearningMethod],
        acceleration_model: &AccelerationModel,
    ) -> Result<LearningOptimization> {
        // Optimize learning rate based on acceleration model
        let base_rate = 0.01;
        let optimized_learning_rate = base_rate * acceleration_model.base_acceleration;

        // Calculate knowledge retention score
        let knowledge_retention_score = acceleration_model.conservation_factor * 0.9;

        // Calculate transfer efficiency
        let transfer_efficiency = learning_methods
            .iter()
            .map(|method| match method {
                LearningMethod::Transfer => 0.9,
                LearningMethod::Meta => 0.8,
                LearningMethod::Supervised => 0.7,
                LearningMethod::Unsupervised => 0.6,
                LearningMethod::Reinforcement => 0.75,
            })
            .sum::<f64>()
            / learning_methods.len() as f64;

        Ok(LearningOptimization {
            optimized_learning_rate: optimized_learning_rate.min(0.5), // Cap at 50%
            recommended_learning_methods: learning_methods.to_vec(),
            knowledge_retention_score,
            transfer_efficiency,
        })
    }
}

#[derive(Debug)]
struct TrendAnalyzer;
impl TrendAnalyzer {
    fn new() -> Self {
        Self
    }

    fn analyze_trends(&self, historical_data: &[PerformanceSnapshot]) -> Result<TrendDirection> {
        if historical_data.len() < 2 {
            return Ok(TrendDirection::Stable);
        }

        let recent_scores: Vec<f64> = historical_data
            .iter()
            .rev()
            .take(5)
            .map(|snapshot| snapshot.performance_score)
            .collect();

        if recent_scores.len() < 2 {
            return Ok(TrendDirection::Stable);
        }

        let first_half_avg = recent_scores
            .iter()
            .take(recent_scores.len() / 2)
            .sum::<f64>()
            / (recent_scores.len() / 2) as f64;
        let second_half_avg = recent_scores
            .iter()
            .rev()
            .take(recent_scores.len() / 2)
            .sum::<f64>()
            / (recent_scores.len() / 2) as f64;

        let trend_threshold = 0.05; // 5% change threshold

        if second_half_avg - first_half_avg > trend_threshold {
            Ok(TrendDirection::Improving)
        } else if first_half_avg - second_half_avg > trend_threshold {
            Ok(TrendDirection::Declining)
        } else if recent_scores
            .iter()
            .any(|&score| (score - first_half_avg).abs() > trend_threshold * 2.0)
        {
            Ok(TrendDirection::Volatile)
        } else {
            Ok(TrendDirection::Stable)
        }
    }
}

#[derive(Debug)]
struct PerformanceModel;
impl PerformanceModel {
    fn new() -> Self {
        Self
    }

    fn predict_performance(
        &self,
        task_outcome: &TaskOutcome,
        historical_data: &[PerformanceSnapshot],
        factors: &[PerformanceFactor],
    ) -> Result<f64> {
        // Simple weighted prediction model
        let base_performance = historical_data
            .iter()
            .map(|snapshot| snapshot.performance_score)
            .sum::<f64>()
            / historical_data.len().max(1) as f64;

        // Calculate weighted adjustment based on factors
        let total_weight = factors.iter().map(|f| f.impact_score).sum::<f64>();
        let weighted_adjustment = if total_weight > 0.0 {
            factors.iter().map(|f| f.impact_score * 0.1).sum::<f64>() / factors.len() as f64
        } else {
            0.0
        };

        // Apply outcome-based adjustment
        let outcome_multiplier = match task_outcome.outcome_type {
            OutcomeType::Success => 1.1,
            OutcomeType::PartialSuccess => 1.05,
            OutcomeType::Failure | OutcomeType::Error => 0.9,
            OutcomeType::Timeout => 0.95,
        };

        let predicted = (base_performance + weighted_adjustment) * outcome_multiplier;
        Ok(predicted.min(1.0).max(0.0)) // Clamp to [0, 1] range
    }
}

#[derive(Debug)]
struct BaselineCalculator;
impl BaselineCalculator {
    fn new() -> Self {
        Self
    }

    fn calculate_baseline(&self, historical_data: &[PerformanceSnapshot]) -> Result<f64> {
        if historical_data.is_empty() {
            return Ok(0.5); // Default baseline
        }

        let sum: f64 = historical_data
            .iter()
            .map(|snapshot| snapshot.performance_score)
            .sum();
        let baseline = sum / historical_data.len() as f64;

        debug!("Calculated baseline performance: {:.3}", baseline);
        Ok(baseline)
    }
}

#[derive(Debug)]
struct OptimizationModel {
    adjustment_factor: f64,
    confidence_factor: f64,
    constraints: Vec<String>,
}

#[derive(Debug)]
struct StrategyAnalyzer;
impl StrategyAnalyzer {
    fn new() -> Self {
        Self
    }
}

#[derive(Debug)]
struct OptimizationEngine;
impl OptimizationEngine {
    fn new() -> Self {
        Self
    }

    fn build_model(
        &self,
        strategy_performance: &HashMap<String, f64>,
        successful_patterns: &[String],
    ) -> Result<OptimizationModel> {
        let avg_performance =
            strategy_performance.values().sum::<f64>() / strategy_performance.len().max(1) as f64;
        let pattern_bonus = successful_patterns.len() as f64 * 0.05; // 5% bonus per pattern

        let adjustment_factor = (avg_performance + pattern_bonus).min(1.2); // Cap at 20% improvement
        let confidence_factor = (0.8 + pattern_bonus).min(0.95); // Higher confidence with more patterns

        Ok(OptimizationModel {
            adjustment_factor,
            confidence_factor,
            constraints: vec![
                "Resource availability".to_string(),
                "Task complexity limits".to_string(),
                "System stability requirements".to_string(),
            ],
        })
    }
}

#[derive(Debug)]
struct SuccessPatternDetector;
impl SuccessPatternDetector {
    fn new() -> Self {
        Self
    }

    fn detect_patterns(&self, strategy_performance: &HashMap<String, f64>) -> Result<Vec<String>> {
        let mut patterns = Vec::new();

        // Detect high-performing strategies
        for (strategy, score) in strategy_performance {
            if *score > 0.8 {
                patterns.push(format!("high_performance_{}", strategy));
            } else if *score > 0.6 {
                patterns.push(format!("moderate_performance_{}", strategy));
            }
        }

        // Add default patterns if none detected
        if patterns.is_empty() {
            patterns.push("parallel_processing".to_string());
            patterns.push("resource_optimization".to_string());
            patterns.push("adaptive_scheduling".to_string());
        }

        Ok(patterns)
    }
}

#[derive(Debug)]
struct ResourcePatterns {
    resource_data: HashMap<String, Vec<f64>>,
    current_avg_utilization: f64,
    predicted_avg_utilization: f64,
    efficiency_score: f64,
    task_complexity: f64,
}

#[derive(Debug)]
struct CapacityTrends {
    overall_trend: TrendDirection,
    resource_trends: HashMap<String, TrendDirection>,
    capacity_limits: HashMap<String, f64>,
}

#[derive(Debug)]
struct ResourceAnalyzer;
impl ResourceAnalyzer {
    fn new() -> Self {
        Self
    }
}

#[derive(Debug)]
struct DemandForecaster;
impl DemandForecaster {
    fn new() -> Self {
        Self
    }

    fn forecast_demand(
        &self,
        task_outcome: &TaskOutcome,
        patterns: &ResourcePatterns,
    ) -> Result<HashMap<String, ResourceNeed>> {
        let mut predicted_needs = HashMap::new();

        // Forecast CPU needs
        let cpu_quantity = patterns
            .resource_data
            .get("cpu")
            .and_then(|v| v.last().cloned())
            .unwrap_or(0.6)
            * patterns.task_complexity;

        predicted_needs.insert(
            "cpu".to_string(),
            ResourceNeed {
                resource_type: ResourceType::Cpu,
                predicted_quantity: cpu_quantity.min(1.0),
                predicted_duration: (task_outcome.duration_ms as f64 * patterns.task_complexity)
                    as u64,
                confidence: 0.8,
                peak_usage_time: Some(task_outcome.timestamp),
            },
        );

        // Forecast memory needs
        let memory_quantity = patterns
            .resource_data
            .get("memory")
            .and_then(|v| v.last().cloned())
            .unwrap_or(0.5)
            * patterns.task_complexity;

        predicted_needs.insert(
            "memory".to_string(),
            ResourceNeed {
                resource_type: ResourceType::Memory,
                predicted_quantity: memory_quantity.min(1.0),
                predicted_duration: (task_outcome.duration_ms as f64 * patterns.task_complexity)
                    as u64,
                confidence: 0.75,
                peak_usage_time: Some(task_outcome.timestamp),
            },
        );

        // Add other resources based on task characteristics
        if task_outcome.duration_ms > 10000 {
            // Long-running tasks may need storage
            predicted_needs.insert(
                "storage".to_string(),
                ResourceNeed {
                    resource_type: ResourceType::Storage,
                    predicted_quantity: 0.3,
                    predicted_duration: task_outcome.duration_ms * 2, // Extended storage needs
                    confidence: 0.7,
                    peak_usage_time: None,
                },
            );
        }

        Ok(predicted_needs)
    }
}

#[derive(Debug)]
struct CapacityPlanner;
impl CapacityPlanner {
    fn new() -> Self {
        Self
    }

    fn analyze_capacity_trends(&self, patterns: &ResourcePatterns) -> Result<CapacityTrends> {
        let mut resource_trends = HashMap::new();
        let mut capacity_limits = HashMap::new();

        // Analyze trends for each resource
        for (resource_name, usage_history) in &patterns.resource_data {
            let trend = if usage_history.len() >= 2 {
                let recent_avg = usage_history.iter().rev().take(3).sum::<f64>()
                    / usage_history.iter().rev().take(3).count() as f64;
                let older_avg = usage_history
                    .iter()
                    .take(usage_history.len().saturating_sub(3))
                    .sum::<f64>()
                    / usage_history.len().saturating_sub(3).max(1) as f64;

                if recent_avg > older_avg + 0.1 {
                    TrendDirection::Declining
                } else if older_avg > recent_avg + 0.1 {
                    TrendDirection::Improving
                } else {
                    TrendDirection::Stable
                }
            } else {
                TrendDirection::Stable
            };

            resource_trends.insert(resource_name.clone(), trend);

            // Set capacity limits based on resource type
            let limit = match resource_name.as_str() {
                "cpu" => 0.9,      // 90% CPU limit
                "memory" => 0.85,  // 85% memory limit
                "storage" => 0.95, // 95% storage limit
                _ => 0.8,          // 80% default limit
            };
            capacity_limits.insert(resource_name.clone(), limit);
        }

        // Determine overall trend
        let overall_trend = if resource_trends
            .values()
            .any(|t| matches!(t, TrendDirection::Declining))
        {
            TrendDirection::Declining
        } else if resource_trends
            .values()
            .all(|t| matches!(t, TrendDirection::Improving))
        {
            TrendDirection::Improving
        } else if resource_trends
            .values()
            .any(|t| matches!(t, TrendDirection::Volatile))
        {
            TrendDirection::Volatile
        } else {
            TrendDirection::Stable
        };

        Ok(CapacityTrends {
            overall_trend,
            resource_trends,
            capacity_limits,
        })
    }
}

#[derive(Debug)]
struct OutcomePatterns {
    success_rate: f64,
    failure_rate: f64,
    timeout_rate: f64,
    resource_pressure: f64,
    task_duration_ms: u64,
    strategy_effectiveness: f64,
}

#[derive(Debug)]
struct RiskAssessment {
    overall_risk_score: f64,
    resource_risk: f64,
    timeout_risk: f64,
    strategy_risk: f64,
}

#[derive(Debug)]
struct OutcomeAnalyzer;
impl OutcomeAnalyzer {
    fn new() -> Self {
        Self
    }

    fn predict_outcome_distribution(
        &self,
        success_probability: f64,
    ) -> Result<Vec<PredictedOutcome>> {
        let mut outcomes = Vec::new();

        // Primary success outcome
        outcomes.push(PredictedOutcome {
            outcome_type: OutcomeType::Success,
            probability: success_probability,
            description: format!(
                "Task completes successfully with {:.1}% confidence",
                success_probability * 100.0
            ),
            impact_score: success_probability * 0.9,
        });

        // Partial success outcome
        let partial_prob = (1.0 - success_probability) * 0.6;
        if partial_prob > 0.1 {
            outcomes.push(PredictedOutcome {
                outcome_type: OutcomeType::PartialSuccess,
                probability: partial_prob,
                description: "Task completes with some issues or reduced performance".to_string(),
                impact_score: partial_prob * 0.7,
            });
        }

        // Failure outcome
        let failure_prob = (1.0 - success_probability) * 0.3;
        if failure_prob > 0.05 {
            outcomes.push(PredictedOutcome {
                outcome_type: OutcomeType::Failure,
                probability: failure_prob,
                description: "Task fails to complete successfully".to_string(),
                impact_score: failure_prob * 0.3,
            });
        }

        // Timeout outcome (small probability unless high timeout risk)
        let timeout_prob = (1.0 - success_probability) * 0.1;
        if timeout_prob > 0.03 {
            outcomes.push(PredictedOutcome {
                outcome_type: OutcomeType::Timeout,
                probability: timeout_prob,
                description: "Task exceeds time limits".to_string(),
                impact_score: timeout_prob * 0.2,
            });
        }

        Ok(outcomes)
    }
}

#[derive(Debug)]
struct SuccessProbabilityCalculator;
impl SuccessProbabilityCalculator {
    fn new() -> Self {
        Self
    }

    fn calculate_probability(
        &self,
        task_outcome: &TaskOutcome,
        patterns: &OutcomePatterns,
    ) -> Result<f64> {
        // Base probability from historical patterns
        let mut probability = patterns.success_rate;

        // Adjust based on task characteristics
        if task_outcome.duration_ms > 30000 {
            // Very long tasks have lower success probability
            probability *= 0.8;
        } else if task_outcome.duration_ms < 1000 {
            // Very short tasks have higher success probability
            probability *= 1.1;
        }

        // Adjust based on resource pressure
        probability *= 1.0 - (patterns.resource_pressure * 0.3);

        // Adjust based on strategy effectiveness
        probability *= 1.0 + (patterns.strategy_effectiveness * 0.2);

        // Adjust based on previous outcome
        let outcome_multiplier = match task_outcome.outcome_type {
            OutcomeType::Success => 1.05,
            OutcomeType::PartialSuccess => 1.0,
            OutcomeType::Failure | OutcomeType::Error => 0.9,
            OutcomeType::Timeout => 0.95,
        };
        probability *= outcome_multiplier;

        Ok(probability.min(0.95).max(0.1)) // Clamp to reasonable range
    }
}

#[derive(Debug)]
struct RiskAssessor;
impl RiskAssessor {
    fn new() -> Self {
        Self
    }

    fn assess_risks(
        &self,
        task_outcome: &TaskOutcome,
        patterns: &OutcomePatterns,
    ) -> Result<RiskAssessment> {
        // Assess resource risk based on usage patterns
        let resource_risk = patterns.resource_pressure * 0.8;

        // Assess timeout risk based on duration patterns
        let timeout_risk = if patterns.task_duration_ms > 20000 {
            0.7
        } else if patterns.timeout_rate > 0.1 {
            0.5
        } else {
            0.2
        };

        // Assess strategy risk based on effectiveness
        let strategy_risk = (1.0 - patterns.strategy_effectiveness).min(0.8);

        // Calculate overall risk score
        let overall_risk_score =
            (resource_risk * 0.4 + timeout_risk * 0.3 + strategy_risk * 0.3).min(0.9);

        Ok(RiskAssessment {
            overall_risk_score,
            resource_risk,
            timeout_risk,
            strategy_risk,
        })
    }
}

#[derive(Debug)]
struct LearningAnalysis {
    learning_rate: f64,
    knowledge_retention: f64,
    bottleneck_factor: f64,
    transfer_efficiency: f64,
    task_complexity: f64,
    strategy_diversity: f64,
}

#[derive(Debug)]
struct TransferPatterns {
    efficiency_score: f64,
    pattern_types: Vec<String>,
    transfer_opportunities: Vec<String>,
}

#[derive(Debug)]
struct AccelerationModel {
    base_acceleration: f64,
    conservation_factor: f64,
    stability_score: f64,
}

#[derive(Debug)]
struct MetaLearningEngine;
impl MetaLearningEngine {
    fn new() -> Self {
        Self
    }

    fn build_acceleration_model(
        &self,
        learning_analysis: &LearningAnalysis,
        transfer_patterns: &TransferPatterns,
    ) -> Result<AccelerationModel> {
        // Calculate base acceleration factor
        let base_acceleration = 1.0
            + (learning_analysis.learning_rate * 0.5)
            + (transfer_patterns.efficiency_score * 0.3)
            + ((1.0 - learning_analysis.task_complexity) * 0.2);

        // Calculate conservation factor (how well knowledge is preserved)
        let conservation_factor = learning_analysis.knowledge_retention
            * learning_analysis.bottleneck_factor
            * transfer_patterns.efficiency_score;

        // Calculate stability score
        let stability_score = (learning_analysis.strategy_diversity / 5.0).min(1.0)
            * learning_analysis.bottleneck_factor;

        Ok(AccelerationModel {
            base_acceleration: base_acceleration.min(2.5), // Cap at 2.5x
            conservation_factor,
            stability_score,
        })
    }
}

#[derive(Debug)]
struct KnowledgeTransferOptimizer;
impl KnowledgeTransferOptimizer {
    fn new() -> Self {
        Self
    }

    fn analyze_transfer_patterns(
        &self,
        learning_analysis: &LearningAnalysis,
    ) -> Result<TransferPatterns> {
        let mut pattern_types = Vec::new();
        let mut transfer_opportunities = Vec::new();

        // Analyze transfer patterns based on learning analysis
        if learning_analysis.transfer_efficiency > 0.7 {
            pattern_types.push("high_transfer".to_string());
            transfer_opportunities.push("Similar task patterns".to_string());
        }

        if learning_analysis.strategy_diversity > 2.0 {
            pattern_types.push("strategy_transfer".to_string());
            transfer_opportunities.push("Strategy reuse across tasks".to_string());
        }

        if learning_analysis.task_complexity < 0.6 {
            pattern_types.push("skill_transfer".to_string());
            transfer_opportunities.push("Skill application to new domains".to_string());
        }

        // Calculate efficiency score
        let efficiency_score = learning_analysis.transfer_efficiency *
            (pattern_types.len() as f64 / 3.0) * // More patterns = higher efficiency
            learning_analysis.knowledge_retention;

        Ok(TransferPatterns {
            efficiency_score: efficiency_score.min(1.0),
            pattern_types,
            transfer_opportunities,
        })
    }
}

#[derive(Debug)]
struct AdaptiveLearningRate;
impl AdaptiveLearningRate {
    fn new() -> Self {
        Self
    }

    fn recommend_methods(
        &self,
        learning_analysis: &LearningAnalysis,
    ) -> Result<Vec<LearningMethod>> {
        let mut methods = Vec::new();

        // Always include transfer learning if transfer efficiency is good
        if learning_analysis.transfer_efficiency > 0.6 {
            methods.push(LearningMethod::Transfer);
        }

        // Include meta-learning for complex tasks
        if learning_analysis.task_complexity > 0.6 {
            methods.push(LearningMethod::Meta);
        }

        // Include reinforcement learning for strategy optimization
        if learning_analysis.strategy_diversity > 1.0 {
            methods.push(LearningMethod::Reinforcement);
        }

        // Include supervised learning for high knowledge retention scenarios
        if learning_analysis.knowledge_retention > 0.7 {
            methods.push(LearningMethod::Supervised);
        }

        // Default to supervised if no methods selected
        if methods.is_empty() {
            methods.push(LearningMethod::Supervised);
        }

        Ok(methods)
    }
}
