use anyhow::{Result, anyhow};
use serde::{Serialize, Deserialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::bandit_policy::{BanditPolicy, ParameterSet, TaskFeatures, ThompsonGaussian, LinUCB};
use crate::counterfactual_log::{LoggedDecision, TaskOutcome, OfflineEvaluator, PolicyEvaluationResult};
use crate::parameter_optimizer::{LLMParameterOptimizer, OptimizationConstraints};
use crate::reward::{RewardFunction, ObjectiveWeights, BaselineMetrics};
use crate::quality_gate_validator::{QualityGateValidator, ValidationResult};
use crate::rollout::{RolloutManager, RolloutPhase, SLOMonitor};

/// Offline test suite for LLM Parameter Feedback Loop
pub struct OfflineTestSuite {
    evaluator: Arc<OfflineEvaluator>,
    reward_function: RewardFunction,
    quality_validator: Arc<QualityGateValidator>,
    test_scenarios: Arc<RwLock<Vec<TestScenario>>>,
    test_results: Arc<RwLock<Vec<TestResult>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestScenario {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub task_type: String,
    pub historical_decisions: Vec<LoggedDecision>,
    pub expected_outcomes: Vec<ExpectedOutcome>,
    pub constraints: OptimizationConstraints,
    pub baseline_metrics: BaselineMetrics,
    pub test_type: TestType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TestType {
    ReplayTest,
    ConstraintSatisfaction,
    Reproducibility,
    PerformanceRegression,
    PolicyComparison,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedOutcome {
    pub parameter_set: ParameterSet,
    pub expected_quality: f64,
    pub expected_latency: u64,
    pub expected_tokens: u32,
    pub expected_reward: f64,
    pub confidence_interval: (f64, f64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub scenario_id: Uuid,
    pub test_name: String,
    pub passed: bool,
    pub actual_outcomes: Vec<ActualOutcome>,
    pub performance_metrics: TestPerformanceMetrics,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub execution_time_ms: u64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActualOutcome {
    pub parameter_set: ParameterSet,
    pub actual_quality: f64,
    pub actual_latency: u64,
    pub actual_tokens: u32,
    pub actual_reward: f64,
    pub quality_delta: f64,
    pub latency_delta: i64,
    pub token_delta: i64,
    pub reward_delta: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestPerformanceMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub mae: f64, // Mean Absolute Error
    pub rmse: f64, // Root Mean Square Error
    pub constraint_violations: u32,
    pub reproducibility_score: f64,
}

impl OfflineTestSuite {
    pub fn new(
        evaluator: Arc<OfflineEvaluator>,
        reward_function: RewardFunction,
        quality_validator: Arc<QualityGateValidator>,
    ) -> Self {
        Self {
            evaluator,
            reward_function,
            quality_validator,
            test_scenarios: Arc::new(RwLock::new(Vec::new())),
            test_results: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Run all test scenarios
    pub async fn run_all_tests(&self) -> Result<TestSuiteResults> {
        let scenarios = self.test_scenarios.read().await;
        let mut results = Vec::new();
        let mut total_passed = 0;
        let mut total_failed = 0;

        for scenario in scenarios.iter() {
            let result = self.run_test_scenario(scenario).await?;
            if result.passed {
                total_passed += 1;
            } else {
                total_failed += 1;
            }
            results.push(result);
        }

        Ok(TestSuiteResults {
            total_tests: scenarios.len(),
            passed: total_passed,
            failed: total_failed,
            results,
            execution_time_ms: 0, // Would be calculated
            timestamp: Utc::now(),
        })
    }

    /// Run a specific test scenario
    pub async fn run_test_scenario(&self, scenario: &TestScenario) -> Result<TestResult> {
        let start_time = Utc::now();
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut actual_outcomes = Vec::new();

        match scenario.test_type {
            TestType::ReplayTest => {
                self.run_replay_test(scenario, &mut actual_outcomes, &mut errors, &mut warnings).await?;
            }
            TestType::ConstraintSatisfaction => {
                self.run_constraint_satisfaction_test(scenario, &mut actual_outcomes, &mut errors, &mut warnings).await?;
            }
            TestType::Reproducibility => {
                self.run_reproducibility_test(scenario, &mut actual_outcomes, &mut errors, &mut warnings).await?;
            }
            TestType::PerformanceRegression => {
                self.run_performance_regression_test(scenario, &mut actual_outcomes, &mut errors, &mut warnings).await?;
            }
            TestType::PolicyComparison => {
                self.run_policy_comparison_test(scenario, &mut actual_outcomes, &mut errors, &mut warnings).await?;
            }
        }

        let performance_metrics = self.calculate_performance_metrics(&scenario.expected_outcomes, &actual_outcomes);
        let passed = errors.is_empty() && self.check_performance_thresholds(&performance_metrics);

        let execution_time = (Utc::now() - start_time).num_milliseconds() as u64;

        let result = TestResult {
            scenario_id: scenario.id,
            test_name: scenario.name.clone(),
            passed,
            actual_outcomes,
            performance_metrics,
            errors,
            warnings,
            execution_time_ms: execution_time,
            timestamp: Utc::now(),
        };

        // Store result
        let mut test_results = self.test_results.write().await;
        test_results.push(result.clone());

        Ok(result)
    }

    /// Create a replay test scenario
    pub async fn create_replay_test_scenario(
        &self,
        name: String,
        description: String,
        task_type: String,
        historical_decisions: Vec<LoggedDecision>,
        constraints: OptimizationConstraints,
        baseline_metrics: BaselineMetrics,
    ) -> Result<Uuid> {
        let scenario = TestScenario {
            id: Uuid::new_v4(),
            name,
            description,
            task_type,
            historical_decisions,
            expected_outcomes: Vec::new(), // Would be calculated from historical data
            constraints,
            baseline_metrics,
            test_type: TestType::ReplayTest,
        };

        let mut scenarios = self.test_scenarios.write().await;
        scenarios.push(scenario.clone());

        Ok(scenario.id)
    }

    /// Create a constraint satisfaction test scenario
    pub async fn create_constraint_satisfaction_test_scenario(
        &self,
        name: String,
        description: String,
        task_type: String,
        constraints: OptimizationConstraints,
        baseline_metrics: BaselineMetrics,
    ) -> Result<Uuid> {
        let scenario = TestScenario {
            id: Uuid::new_v4(),
            name,
            description,
            task_type,
            historical_decisions: Vec::new(),
            expected_outcomes: Vec::new(),
            constraints,
            baseline_metrics,
            test_type: TestType::ConstraintSatisfaction,
        };

        let mut scenarios = self.test_scenarios.write().await;
        scenarios.push(scenario.clone());

        Ok(scenario.id)
    }

    /// Create a reproducibility test scenario
    pub async fn create_reproducibility_test_scenario(
        &self,
        name: String,
        description: String,
        task_type: String,
        historical_decisions: Vec<LoggedDecision>,
        constraints: OptimizationConstraints,
        baseline_metrics: BaselineMetrics,
    ) -> Result<Uuid> {
        let scenario = TestScenario {
            id: Uuid::new_v4(),
            name,
            description,
            task_type,
            historical_decisions,
            expected_outcomes: Vec::new(),
            constraints,
            baseline_metrics,
            test_type: TestType::Reproducibility,
        };

        let mut scenarios = self.test_scenarios.write().await;
        scenarios.push(scenario.clone());

        Ok(scenario.id)
    }

    // Private test implementation methods
    async fn run_replay_test(
        &self,
        scenario: &TestScenario,
        actual_outcomes: &mut Vec<ActualOutcome>,
        errors: &mut Vec<String>,
        warnings: &mut Vec<String>,
    ) -> Result<()> {
        // Replay historical decisions and verify outcomes
        for decision in &scenario.historical_decisions {
            // Simulate the decision process
            let task_features = decision.context_features.clone();
            let parameter_set = decision.chosen_params.clone();
            
            // Validate parameters against constraints
            let constraint_check = self.reward_function.check_constraints(&parameter_set, &scenario.constraints);
            match constraint_check {
                Ok(crate::reward::ConstraintCheckResult::Passed) => {
                    // Parameters satisfy constraints
                }
                Ok(crate::reward::ConstraintCheckResult::Violated { violations }) => {
                    errors.push(format!("Constraint violations: {:?}", violations));
                }
                Err(e) => {
                    errors.push(format!("Constraint check failed: {}", e));
                }
            }

            // Simulate outcome (in real implementation, this would use the actual LLM)
            let simulated_outcome = self.simulate_outcome(&parameter_set, &task_features).await?;
            
            // Calculate reward
            let reward_result = self.reward_function.calculate(&simulated_outcome, &scenario.baseline_metrics);
            
            actual_outcomes.push(ActualOutcome {
                parameter_set: parameter_set.clone(),
                actual_quality: simulated_outcome.quality_score,
                actual_latency: simulated_outcome.latency_ms,
                actual_tokens: simulated_outcome.tokens_used as u32,
                actual_reward: reward_result.reward,
                quality_delta: simulated_outcome.quality_score - scenario.baseline_metrics.avg_quality,
                latency_delta: simulated_outcome.latency_ms as i64 - scenario.baseline_metrics.avg_latency as i64,
                token_delta: simulated_outcome.tokens_used as i64 - scenario.baseline_metrics.avg_tokens as i64,
                reward_delta: reward_result.reward,
            });
        }

        Ok(())
    }

    async fn run_constraint_satisfaction_test(
        &self,
        scenario: &TestScenario,
        actual_outcomes: &mut Vec<ActualOutcome>,
        errors: &mut Vec<String>,
        warnings: &mut Vec<String>,
    ) -> Result<()> {
        // Test various parameter combinations to ensure constraints are satisfied
        let test_parameters = self.generate_test_parameter_combinations(&scenario.constraints);
        
        for params in test_parameters {
            let constraint_check = self.reward_function.check_constraints(&params, &scenario.constraints);
            match constraint_check {
                Ok(crate::reward::ConstraintCheckResult::Passed) => {
                    // Parameters satisfy constraints - simulate outcome
                    let task_features = TaskFeatures {
                        model_name: "test-model".to_string(),
                        prompt_tokens: 100,
                        prior_failures: 0,
                        risk_tier: 2,
                    };
                    
                    let simulated_outcome = self.simulate_outcome(&params, &task_features).await?;
                    let reward_result = self.reward_function.calculate(&simulated_outcome, &scenario.baseline_metrics);
                    
                    actual_outcomes.push(ActualOutcome {
                        parameter_set: params.clone(),
                        actual_quality: simulated_outcome.quality_score,
                        actual_latency: simulated_outcome.latency_ms,
                        actual_tokens: simulated_outcome.tokens_used as u32,
                        actual_reward: reward_result.reward,
                        quality_delta: simulated_outcome.quality_score - scenario.baseline_metrics.avg_quality,
                        latency_delta: simulated_outcome.latency_ms as i64 - scenario.baseline_metrics.avg_latency as i64,
                        token_delta: simulated_outcome.tokens_used as i64 - scenario.baseline_metrics.avg_tokens as i64,
                        reward_delta: reward_result.reward,
                    });
                }
                Ok(crate::reward::ConstraintCheckResult::Violated { violations }) => {
                    errors.push(format!("Constraint violations for parameters {:?}: {:?}", params, violations));
                }
                Err(e) => {
                    errors.push(format!("Constraint check failed for parameters {:?}: {}", params, e));
                }
            }
        }

        Ok(())
    }

    async fn run_reproducibility_test(
        &self,
        scenario: &TestScenario,
        actual_outcomes: &mut Vec<ActualOutcome>,
        errors: &mut Vec<String>,
        warnings: &mut Vec<String>,
    ) -> Result<()> {
        // Run the same test multiple times to check reproducibility
        let num_runs = 10;
        let mut run_results = Vec::new();
        
        for run in 0..num_runs {
            let mut run_outcomes = Vec::new();
            
            for decision in &scenario.historical_decisions {
                let task_features = decision.context_features.clone();
                let parameter_set = decision.chosen_params.clone();
                
                let simulated_outcome = self.simulate_outcome(&parameter_set, &task_features).await?;
                let reward_result = self.reward_function.calculate(&simulated_outcome, &scenario.baseline_metrics);
                
                run_outcomes.push(ActualOutcome {
                    parameter_set: parameter_set.clone(),
                    actual_quality: simulated_outcome.quality_score,
                    actual_latency: simulated_outcome.latency_ms,
                    actual_tokens: simulated_outcome.tokens_used as u32,
                    actual_reward: reward_result.reward,
                    quality_delta: simulated_outcome.quality_score - scenario.baseline_metrics.avg_quality,
                    latency_delta: simulated_outcome.latency_ms as i64 - scenario.baseline_metrics.avg_latency as i64,
                    token_delta: simulated_outcome.tokens_used as i64 - scenario.baseline_metrics.avg_tokens as i64,
                    reward_delta: reward_result.reward,
                });
            }
            
            run_results.push(run_outcomes);
        }
        
        // Check reproducibility by comparing results across runs
        let reproducibility_score = self.calculate_reproducibility_score(&run_results);
        if reproducibility_score < 0.8 {
            warnings.push(format!("Low reproducibility score: {:.3}", reproducibility_score));
        }
        
        // Use the first run's results as the actual outcomes
        *actual_outcomes = run_results[0].clone();

        Ok(())
    }

    async fn run_performance_regression_test(
        &self,
        scenario: &TestScenario,
        actual_outcomes: &mut Vec<ActualOutcome>,
        errors: &mut Vec<String>,
        warnings: &mut Vec<String>,
    ) -> Result<()> {
        // Compare current performance against baseline
        for decision in &scenario.historical_decisions {
            let task_features = decision.context_features.clone();
            let parameter_set = decision.chosen_params.clone();
            
            let simulated_outcome = self.simulate_outcome(&parameter_set, &task_features).await?;
            let reward_result = self.reward_function.calculate(&simulated_outcome, &scenario.baseline_metrics);
            
            // Check for performance regression
            if simulated_outcome.quality_score < scenario.baseline_metrics.avg_quality * 0.9 {
                warnings.push(format!("Quality regression detected: {:.3} < {:.3}", 
                    simulated_outcome.quality_score, scenario.baseline_metrics.avg_quality * 0.9));
            }
            
            if simulated_outcome.latency_ms > scenario.baseline_metrics.avg_latency * 2 {
                warnings.push(format!("Latency regression detected: {} > {}", 
                    simulated_outcome.latency_ms, scenario.baseline_metrics.avg_latency * 2));
            }
            
            actual_outcomes.push(ActualOutcome {
                parameter_set: parameter_set.clone(),
                actual_quality: simulated_outcome.quality_score,
                actual_latency: simulated_outcome.latency_ms,
                actual_tokens: simulated_outcome.tokens_used as u32,
                actual_reward: reward_result.reward,
                quality_delta: simulated_outcome.quality_score - scenario.baseline_metrics.avg_quality,
                latency_delta: simulated_outcome.latency_ms as i64 - scenario.baseline_metrics.avg_latency as i64,
                token_delta: simulated_outcome.tokens_used as i64 - scenario.baseline_metrics.avg_tokens as i64,
                reward_delta: reward_result.reward,
            });
        }

        Ok(())
    }

    async fn run_policy_comparison_test(
        &self,
        scenario: &TestScenario,
        actual_outcomes: &mut Vec<ActualOutcome>,
        errors: &mut Vec<String>,
        warnings: &mut Vec<String>,
    ) -> Result<()> {
        // Compare different bandit policies
        let thompson_policy = ThompsonGaussian::new(0.0, 1.0);
        let linucb_policy = LinUCB::new(0.1);
        
        for decision in &scenario.historical_decisions {
            let task_features = decision.context_features.clone();
            let parameter_set = decision.chosen_params.clone();
            
            // Test Thompson sampling
            let thompson_result = thompson_policy.select(&task_features, &[parameter_set.clone()]);
            
            // Test LinUCB
            let linucb_result = linucb_policy.select(&task_features, &[parameter_set.clone()]);
            
            // Compare results
            if (thompson_result.propensity - linucb_result.propensity).abs() > 0.5 {
                warnings.push("Significant difference between policy selections".to_string());
            }
            
            let simulated_outcome = self.simulate_outcome(&parameter_set, &task_features).await?;
            let reward_result = self.reward_function.calculate(&simulated_outcome, &scenario.baseline_metrics);
            
            actual_outcomes.push(ActualOutcome {
                parameter_set: parameter_set.clone(),
                actual_quality: simulated_outcome.quality_score,
                actual_latency: simulated_outcome.latency_ms,
                actual_tokens: simulated_outcome.tokens_used as u32,
                actual_reward: reward_result.reward,
                quality_delta: simulated_outcome.quality_score - scenario.baseline_metrics.avg_quality,
                latency_delta: simulated_outcome.latency_ms as i64 - scenario.baseline_metrics.avg_latency as i64,
                token_delta: simulated_outcome.tokens_used as i64 - scenario.baseline_metrics.avg_tokens as i64,
                reward_delta: reward_result.reward,
            });
        }

        Ok(())
    }

    // Helper methods
    async fn simulate_outcome(&self, parameters: &ParameterSet, features: &TaskFeatures) -> Result<TaskOutcome> {
        // Simulate LLM outcome based on parameters and features
        // This is a placeholder for actual simulation logic
        let quality_score = 0.7 + (parameters.temperature * 0.1) + (parameters.max_tokens as f64 * 0.0001);
        let latency_ms = 200 + (parameters.max_tokens / 10) as u64;
        let tokens_used = parameters.max_tokens as usize;
        
        Ok(TaskOutcome {
            quality_score: quality_score.min(1.0),
            latency_ms,
            tokens_used,
            success: true,
            caws_compliance: true,
        })
    }

    fn generate_test_parameter_combinations(&self, constraints: &OptimizationConstraints) -> Vec<ParameterSet> {
        let mut combinations = Vec::new();
        
        // Generate various parameter combinations within constraints
        for temp in [0.1, 0.3, 0.5, 0.7, 0.9] {
            for max_tokens in [100, 500, 1000, 2000] {
                if max_tokens <= constraints.max_tokens {
                    combinations.push(ParameterSet {
                        temperature: temp,
                        max_tokens,
                        top_p: Some(0.9),
                        frequency_penalty: Some(0.0),
                        presence_penalty: Some(0.0),
                        stop_sequences: vec![],
                        seed: Some(42),
                        origin: "test".to_string(),
                        policy_version: "1.0.0".to_string(),
                        created_at: Utc::now(),
                    });
                }
            }
        }
        
        combinations
    }

    fn calculate_performance_metrics(
        &self,
        expected: &[ExpectedOutcome],
        actual: &[ActualOutcome],
    ) -> TestPerformanceMetrics {
        if expected.is_empty() || actual.is_empty() {
            return TestPerformanceMetrics {
                accuracy: 0.0,
                precision: 0.0,
                recall: 0.0,
                f1_score: 0.0,
                mae: 0.0,
                rmse: 0.0,
                constraint_violations: 0,
                reproducibility_score: 0.0,
            };
        }

        // Calculate accuracy (how many predictions are within acceptable range)
        let mut correct_predictions = 0;
        let mut total_predictions = 0;
        let mut quality_errors = Vec::new();
        let mut latency_errors = Vec::new();
        let mut token_errors = Vec::new();

        for (expected, actual) in expected.iter().zip(actual.iter()) {
            total_predictions += 1;
            
            let quality_error = (actual.actual_quality - expected.expected_quality).abs();
            let latency_error = (actual.actual_latency as i64 - expected.expected_latency as i64).abs();
            let token_error = (actual.actual_tokens as i64 - expected.expected_tokens as i64).abs();
            
            quality_errors.push(quality_error);
            latency_errors.push(latency_error);
            token_errors.push(token_error);
            
            // Check if prediction is within acceptable range (10% tolerance)
            if quality_error < expected.expected_quality * 0.1
                && latency_error < expected.expected_latency as i64 / 10
                && token_error < expected.expected_tokens as i64 / 10
            {
                correct_predictions += 1;
            }
        }

        let accuracy = correct_predictions as f64 / total_predictions as f64;
        
        // Calculate MAE and RMSE
        let mae = (quality_errors.iter().sum::<f64>() + 
                  latency_errors.iter().sum::<i64>() as f64 + 
                  token_errors.iter().sum::<i64>() as f64) / (3.0 * total_predictions as f64);
        
        let rmse = ((quality_errors.iter().map(|x| x * x).sum::<f64>() + 
                    latency_errors.iter().map(|x| (x * x) as f64).sum::<f64>() + 
                    token_errors.iter().map(|x| (x * x) as f64).sum::<f64>()) / (3.0 * total_predictions as f64)).sqrt();

        TestPerformanceMetrics {
            accuracy,
            precision: accuracy, // Simplified
            recall: accuracy, // Simplified
            f1_score: accuracy, // Simplified
            mae,
            rmse,
            constraint_violations: 0, // Would be calculated from constraint checks
            reproducibility_score: 0.0, // Would be calculated from multiple runs
        }
    }

    fn check_performance_thresholds(&self, metrics: &TestPerformanceMetrics) -> bool {
        metrics.accuracy > 0.8 && metrics.mae < 0.1 && metrics.rmse < 0.2
    }

    fn calculate_reproducibility_score(&self, run_results: &[Vec<ActualOutcome>]) -> f64 {
        if run_results.len() < 2 {
            return 1.0;
        }

        let mut total_correlation = 0.0;
        let mut comparisons = 0;

        for i in 0..run_results.len() {
            for j in (i + 1)..run_results.len() {
                let correlation = self.calculate_correlation(&run_results[i], &run_results[j]);
                total_correlation += correlation;
                comparisons += 1;
            }
        }

        if comparisons > 0 {
            total_correlation / comparisons as f64
        } else {
            1.0
        }
    }

    fn calculate_correlation(&self, run1: &[ActualOutcome], run2: &[ActualOutcome]) -> f64 {
        if run1.len() != run2.len() || run1.is_empty() {
            return 0.0;
        }

        let mut sum1 = 0.0;
        let mut sum2 = 0.0;
        let mut sum1_sq = 0.0;
        let mut sum2_sq = 0.0;
        let mut p_sum = 0.0;

        for (outcome1, outcome2) in run1.iter().zip(run2.iter()) {
            let val1 = outcome1.actual_reward;
            let val2 = outcome2.actual_reward;
            
            sum1 += val1;
            sum2 += val2;
            sum1_sq += val1 * val1;
            sum2_sq += val2 * val2;
            p_sum += val1 * val2;
        }

        let n = run1.len() as f64;
        let num = p_sum - (sum1 * sum2 / n);
        let den = ((sum1_sq - sum1 * sum1 / n) * (sum2_sq - sum2 * sum2 / n)).sqrt();

        if den == 0.0 {
            0.0
        } else {
            num / den
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteResults {
    pub total_tests: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<TestResult>,
    pub execution_time_ms: u64,
    pub timestamp: DateTime<Utc>,
}
