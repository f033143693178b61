//! Refinement Strategy Implementation
//!
//! Defines and executes specific refinement strategies based on quality feedback,
//! providing targeted improvement approaches for different types of issues.

use std::collections::HashMap;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::coordinator::{RefinementStrategy, RefinementPriority, RefinementScope};

/// Refinement action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinementAction {
    pub action_type: ActionType,
    pub target: String,
    pub description: String,
    pub estimated_effort: u64, // minutes
    pub priority: RefinementPriority,
    pub dependencies: Vec<String>,
}

/// Action types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ActionType {
    /// Fix specific code issues
    CodeFix,
    /// Add or improve tests
    TestAddition,
    /// Refactor code structure
    Refactoring,
    /// Update documentation
    Documentation,
    /// Configuration changes
    Configuration,
    /// Dependency updates
    Dependencies,
    /// Tool or process changes
    ProcessImprovement,
}

/// Strategy execution result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyExecutionResult {
    pub strategy: RefinementStrategy,
    pub actions_taken: Vec<RefinementAction>,
    pub success: bool,
    pub quality_improvement: f64,
    pub time_spent: u64, // minutes
    pub issues_resolved: Vec<String>,
    pub remaining_issues: Vec<String>,
}

/// Strategy executor trait
#[async_trait]
pub trait StrategyExecutor: Send + Sync {
    /// Execute a refinement strategy
    async fn execute_strategy(
        &self,
        strategy: &RefinementStrategy,
        scope: &RefinementScope,
        quality_context: &QualityContext,
    ) -> Result<StrategyExecutionResult>;
}

/// Quality context for strategy execution
#[derive(Debug, Clone)]
pub struct QualityContext {
    pub failing_gates: Vec<String>,
    pub warning_gates: Vec<String>,
    pub overall_score: f64,
    pub risk_tier: crate::planning::types::RiskTier,
    pub available_resources: ResourceConstraints,
}

/// Resource constraints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConstraints {
    pub time_budget_minutes: u64,
    pub max_parallel_actions: usize,
    pub available_tools: Vec<String>,
}

/// Strategy executor implementation
pub struct DefaultStrategyExecutor {
    resource_constraints: ResourceConstraints,
}

impl DefaultStrategyExecutor {
    pub fn new(resource_constraints: ResourceConstraints) -> Self {
        Self {
            resource_constraints,
        }
    }
}

#[async_trait]
impl StrategyExecutor for DefaultStrategyExecutor {
    async fn execute_strategy(
        &self,
        strategy: &RefinementStrategy,
        scope: &RefinementScope,
        quality_context: &QualityContext,
    ) -> Result<StrategyExecutionResult> {
        let actions = self.generate_actions(strategy, scope, quality_context)?;

        // Simulate execution - in practice this would trigger actual refinement
        let success = self.simulate_execution(&actions).await;
        let quality_improvement = self.estimate_quality_improvement(&actions);
        let time_spent = actions.iter().map(|a| a.estimated_effort).sum();
        let issues_resolved = self.predict_resolved_issues(&actions);
        let remaining_issues = quality_context.failing_gates.iter()
            .filter(|issue| !issues_resolved.contains(issue))
            .cloned()
            .collect();

        Ok(StrategyExecutionResult {
            strategy: strategy.clone(),
            actions_taken: actions,
            success,
            quality_improvement,
            time_spent,
            issues_resolved,
            remaining_issues,
        })
    }
}

impl DefaultStrategyExecutor {
    /// Generate specific actions for a strategy
    fn generate_actions(
        &self,
        strategy: &RefinementStrategy,
        scope: &RefinementScope,
        context: &QualityContext,
    ) -> Result<Vec<RefinementAction>, StrategyExecutionError> {
        match strategy {
            RefinementStrategy::TargetedFixes(gates) => {
                self.generate_targeted_fixes(gates, scope, context)
            }
            RefinementStrategy::QualityOverhaul => {
                self.generate_quality_overhaul(scope, context)
            }
            RefinementStrategy::RefactorArchitecture => {
                self.generate_architecture_refactor(scope, context)
            }
            RefinementStrategy::EnhanceTesting => {
                self.generate_testing_enhancement(scope, context)
            }
            RefinementStrategy::PerformanceOptimization => {
                self.generate_performance_optimization(scope, context)
            }
            RefinementStrategy::SecurityEnhancement => {
                self.generate_security_enhancement(scope, context)
            }
            RefinementStrategy::DocumentationFocus => {
                self.generate_documentation_improvement(scope, context)
            }
            RefinementStrategy::CouncilSpecified(description) => {
                self.generate_council_specified_actions(description, scope, context)
            }
        }
    }

    /// Generate actions for targeted fixes
    fn generate_targeted_fixes(
        &self,
        gates: &[String],
        _scope: &RefinementScope,
        _context: &QualityContext,
    ) -> Result<Vec<RefinementAction>, StrategyExecutionError> {
        let mut actions = Vec::new();

        for gate in gates {
            match gate.as_str() {
                "caws_compliance" => {
                    actions.push(RefinementAction {
                        action_type: ActionType::CodeFix,
                        target: "CAWS violations".to_string(),
                        description: "Fix CAWS compliance violations in code".to_string(),
                        estimated_effort: 30,
                        priority: RefinementPriority::High,
                        dependencies: vec![],
                    });
                }
                "linting" => {
                    actions.push(RefinementAction {
                        action_type: ActionType::CodeFix,
                        target: "Linting issues".to_string(),
                        description: "Fix linting errors and warnings".to_string(),
                        estimated_effort: 20,
                        priority: RefinementPriority::Medium,
                        dependencies: vec![],
                    });
                }
                "type_check" => {
                    actions.push(RefinementAction {
                        action_type: ActionType::CodeFix,
                        target: "Type errors".to_string(),
                        description: "Fix TypeScript compilation errors".to_string(),
                        estimated_effort: 45,
                        priority: RefinementPriority::High,
                        dependencies: vec![],
                    });
                }
                "testing" => {
                    actions.push(RefinementAction {
                        action_type: ActionType::TestAddition,
                        target: "Test suite".to_string(),
                        description: "Add missing tests and fix failing tests".to_string(),
                        estimated_effort: 60,
                        priority: RefinementPriority::High,
                        dependencies: vec![],
                    });
                }
                "coverage" => {
                    actions.push(RefinementAction {
                        action_type: ActionType::TestAddition,
                        target: "Test coverage".to_string(),
                        description: "Add tests to increase code coverage".to_string(),
                        estimated_effort: 40,
                        priority: RefinementPriority::Medium,
                        dependencies: vec!["testing".to_string()],
                    });
                }
                "mutation" => {
                    actions.push(RefinementAction {
                        action_type: ActionType::TestAddition,
                        target: "Test quality".to_string(),
                        description: "Improve test quality to kill more mutants".to_string(),
                        estimated_effort: 50,
                        priority: RefinementPriority::Medium,
                        dependencies: vec!["testing".to_string()],
                    });
                }
                _ => {
                    actions.push(RefinementAction {
                        action_type: ActionType::CodeFix,
                        target: gate.clone(),
                        description: format!("Fix issues in {} gate", gate),
                        estimated_effort: 30,
                        priority: RefinementPriority::Medium,
                        dependencies: vec![],
                    });
                }
            }
        }

        Ok(actions)
    }

    /// Generate actions for comprehensive quality overhaul
    fn generate_quality_overhaul(
        &self,
        scope: &RefinementScope,
        context: &QualityContext,
    ) -> Result<Vec<RefinementAction>, StrategyExecutionError> {
        let mut actions = Vec::new();

        // Core quality improvements
        actions.push(RefinementAction {
            action_type: ActionType::CodeFix,
            target: "All failing gates".to_string(),
            description: "Address all failing quality gates comprehensively".to_string(),
            estimated_effort: 120,
            priority: RefinementPriority::High,
            dependencies: vec![],
        });

        actions.push(RefinementAction {
            action_type: ActionType::TestAddition,
            target: "Test suite completeness".to_string(),
            description: "Ensure comprehensive test coverage for all components".to_string(),
            estimated_effort: 90,
            priority: RefinementPriority::High,
            dependencies: vec![],
        });

        if matches!(scope, RefinementScope::Comprehensive | RefinementScope::Architectural) {
            actions.push(RefinementAction {
                action_type: ActionType::Refactoring,
                target: "Code architecture".to_string(),
                description: "Refactor code for better maintainability and quality".to_string(),
                estimated_effort: 180,
                priority: RefinementPriority::Medium,
                dependencies: vec!["All failing gates".to_string()],
            });
        }

        actions.push(RefinementAction {
            action_type: ActionType::Documentation,
            target: "Code documentation".to_string(),
            description: "Improve code documentation and comments".to_string(),
            estimated_effort: 30,
            priority: RefinementPriority::Low,
            dependencies: vec![],
        });

        Ok(actions)
    }

    /// Generate actions for architecture refactoring
    fn generate_architecture_refactor(
        &self,
        _scope: &RefinementScope,
        _context: &QualityContext,
    ) -> Result<Vec<RefinementAction>, StrategyExecutionError> {
        Ok(vec![
            RefinementAction {
                action_type: ActionType::Refactoring,
                target: "Architecture design".to_string(),
                description: "Review and redesign system architecture".to_string(),
                estimated_effort: 240,
                priority: RefinementPriority::High,
                dependencies: vec![],
            },
            RefinementAction {
                action_type: ActionType::Refactoring,
                target: "Code organization".to_string(),
                description: "Reorganize code into better modules and packages".to_string(),
                estimated_effort: 120,
                priority: RefinementPriority::Medium,
                dependencies: vec!["Architecture design".to_string()],
            },
            RefinementAction {
                action_type: ActionType::Configuration,
                target: "Build configuration".to_string(),
                description: "Update build and deployment configurations".to_string(),
                estimated_effort: 60,
                priority: RefinementPriority::Medium,
                dependencies: vec!["Code organization".to_string()],
            },
        ])
    }

    /// Generate actions for testing enhancement
    fn generate_testing_enhancement(
        &self,
        scope: &RefinementScope,
        context: &QualityContext,
    ) -> Result<Vec<RefinementAction>, StrategyExecutionError> {
        let mut actions = vec![
            RefinementAction {
                action_type: ActionType::TestAddition,
                target: "Unit tests".to_string(),
                description: "Add comprehensive unit tests".to_string(),
                estimated_effort: 60,
                priority: RefinementPriority::High,
                dependencies: vec![],
            },
            RefinementAction {
                action_type: ActionType::TestAddition,
                target: "Integration tests".to_string(),
                description: "Add integration tests for component interactions".to_string(),
                estimated_effort: 45,
                priority: RefinementPriority::High,
                dependencies: vec!["Unit tests".to_string()],
            },
        ];

        if matches!(scope, RefinementScope::Comprehensive | RefinementScope::Architectural) {
            actions.push(RefinementAction {
                action_type: ActionType::TestAddition,
                target: "End-to-end tests".to_string(),
                description: "Add end-to-end tests for complete workflows".to_string(),
                estimated_effort: 90,
                priority: RefinementPriority::Medium,
                dependencies: vec!["Integration tests".to_string()],
            });
        }

        actions.push(RefinementAction {
            action_type: ActionType::Configuration,
            target: "Test infrastructure".to_string(),
            description: "Improve test infrastructure and CI/CD integration".to_string(),
            estimated_effort: 30,
            priority: RefinementPriority::Low,
            dependencies: vec![],
        });

        Ok(actions)
    }

    /// Generate actions for performance optimization
    fn generate_performance_optimization(
        &self,
        _scope: &RefinementScope,
        _context: &QualityContext,
    ) -> Result<Vec<RefinementAction>, StrategyExecutionError> {
        Ok(vec![
            RefinementAction {
                action_type: ActionType::CodeFix,
                target: "Performance bottlenecks".to_string(),
                description: "Identify and fix performance bottlenecks".to_string(),
                estimated_effort: 90,
                priority: RefinementPriority::Medium,
                dependencies: vec![],
            },
            RefinementAction {
                action_type: ActionType::Configuration,
                target: "Resource optimization".to_string(),
                description: "Optimize memory and CPU usage".to_string(),
                estimated_effort: 60,
                priority: RefinementPriority::Medium,
                dependencies: vec!["Performance bottlenecks".to_string()],
            },
            RefinementAction {
                action_type: ActionType::ProcessImprovement,
                target: "Performance monitoring".to_string(),
                description: "Add performance monitoring and alerting".to_string(),
                estimated_effort: 30,
                priority: RefinementPriority::Low,
                dependencies: vec![],
            },
        ])
    }

    /// Generate actions for security enhancement
    fn generate_security_enhancement(
        &self,
        _scope: &RefinementScope,
        _context: &QualityContext,
    ) -> Result<Vec<RefinementAction>, StrategyExecutionError> {
        Ok(vec![
            RefinementAction {
                action_type: ActionType::CodeFix,
                target: "Security vulnerabilities".to_string(),
                description: "Fix identified security vulnerabilities".to_string(),
                estimated_effort: 120,
                priority: RefinementPriority::Critical,
                dependencies: vec![],
            },
            RefinementAction {
                action_type: ActionType::Configuration,
                target: "Security configuration".to_string(),
                description: "Update security configurations and policies".to_string(),
                estimated_effort: 45,
                priority: RefinementPriority::High,
                dependencies: vec!["Security vulnerabilities".to_string()],
            },
            RefinementAction {
                action_type: ActionType::ProcessImprovement,
                target: "Security monitoring".to_string(),
                description: "Implement security monitoring and incident response".to_string(),
                estimated_effort: 60,
                priority: RefinementPriority::High,
                dependencies: vec![],
            },
        ])
    }

    /// Generate actions for documentation improvement
    fn generate_documentation_improvement(
        &self,
        _scope: &RefinementScope,
        _context: &QualityContext,
    ) -> Result<Vec<RefinementAction>, StrategyExecutionError> {
        Ok(vec![
            RefinementAction {
                action_type: ActionType::Documentation,
                target: "API documentation".to_string(),
                description: "Document all public APIs with examples".to_string(),
                estimated_effort: 60,
                priority: RefinementPriority::Medium,
                dependencies: vec![],
            },
            RefinementAction {
                action_type: ActionType::Documentation,
                target: "Code documentation".to_string(),
                description: "Add comprehensive code comments and docstrings".to_string(),
                estimated_effort: 45,
                priority: RefinementPriority::Low,
                dependencies: vec![],
            },
            RefinementAction {
                action_type: ActionType::Documentation,
                target: "Architecture docs".to_string(),
                description: "Document system architecture and design decisions".to_string(),
                estimated_effort: 90,
                priority: RefinementPriority::Low,
                dependencies: vec![],
            },
        ])
    }

    /// Generate actions based on council specifications
    fn generate_council_specified_actions(
        &self,
        description: &str,
        _scope: &RefinementScope,
        _context: &QualityContext,
    ) -> Result<Vec<RefinementAction>, StrategyExecutionError> {
        Ok(vec![
            RefinementAction {
                action_type: ActionType::CodeFix,
                target: "Council-specified improvements".to_string(),
                description: format!("Implement council recommendations: {}", description),
                estimated_effort: 60,
                priority: RefinementPriority::High,
                dependencies: vec![],
            },
        ])
    }

    /// Simulate strategy execution
    async fn simulate_execution(&self, actions: &[RefinementAction]) -> bool {
        // In practice, this would execute the actual actions
        // For simulation, succeed if we have reasonable actions
        !actions.is_empty() && actions.len() <= self.resource_constraints.max_parallel_actions
    }

    /// Estimate quality improvement from actions
    fn estimate_quality_improvement(&self, actions: &[RefinementAction]) -> f64 {
        let total_effort: f64 = actions.iter().map(|a| a.estimated_effort as f64).sum();
        let priority_weight = actions.iter()
            .map(|a| match a.priority {
                RefinementPriority::Critical => 1.0,
                RefinementPriority::High => 0.8,
                RefinementPriority::Medium => 0.6,
                RefinementPriority::Low => 0.4,
                RefinementPriority::Optional => 0.2,
            })
            .sum::<f64>() / actions.len() as f64;

        // Rough estimation: 0.1 quality points per 10 minutes of effort, weighted by priority
        (total_effort / 10.0) * 0.01 * priority_weight
    }

    /// Predict which issues will be resolved
    fn predict_resolved_issues(&self, actions: &[RefinementAction]) -> Vec<String> {
        let mut resolved = Vec::new();

        for action in actions {
            match action.action_type {
                ActionType::CodeFix => {
                    if action.target.contains("CAWS") {
                        resolved.push("caws_compliance".to_string());
                    }
                    if action.target.contains("linting") {
                        resolved.push("linting".to_string());
                    }
                    if action.target.contains("type") {
                        resolved.push("type_check".to_string());
                    }
                }
                ActionType::TestAddition => {
                    resolved.push("testing".to_string());
                    resolved.push("coverage".to_string());
                    resolved.push("mutation".to_string());
                }
                _ => {} // Other action types may resolve different issues
            }
        }

        resolved
    }
}

pub type Result<T> = std::result::Result<T, StrategyExecutionError>;

#[derive(Debug, thiserror::Error)]
pub enum StrategyExecutionError {
    #[error("Strategy execution failed: {0}")]
    ExecutionError(String),

    #[error("Action generation failed: {0}")]
    GenerationError(String),

    #[error("Resource constraints exceeded: {0}")]
    ResourceError(String),
}
