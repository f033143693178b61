//! Policy hooks for adaptive agent behavior
//!
//! Provides hooks for policy adaptation and reinforcement learning integration.

use crate::types::SelfPromptingAgentError;

/// Adaptive agent with policy hooks
pub struct AdaptiveAgent;

impl AdaptiveAgent {
    /// Create a new adaptive agent
    pub fn new() -> Self {
        Self
    }

    /// Adapt policy based on feedback
    pub async fn adapt_policy(&self, feedback: &str) -> Result<(), SelfPromptingAgentError> {
        // Stub implementation - would adapt agent behavior
        tracing::info!("Adapting policy based on feedback: {}", feedback);
        Ok(())
    }

    /// Get current policy state
    pub fn get_policy_state(&self) -> PolicyState {
        PolicyState {
            temperature: 0.7,
            max_iterations: 5,
            risk_tolerance: 0.5,
        }
    }
}

/// Policy state snapshot
#[derive(Debug, Clone)]
pub struct PolicyState {
    pub temperature: f64,
    pub max_iterations: usize,
    pub risk_tolerance: f64,
}

/// Policy manager for rule-based adaptations
pub struct PolicyManager;

impl PolicyManager {
    /// Create a new policy manager
    pub fn new() -> Self {
        Self
    }

    /// Update policy rules
    pub async fn update_policy(&self, policy: &str) -> Result<(), SelfPromptingAgentError> {
        // Stub implementation - would update policy rules
        tracing::info!("Updated policy: {}", policy);
        Ok(())
    }

    /// Validate policy against constraints
    pub fn validate_policy(&self, policy: &str) -> Result<(), SelfPromptingAgentError> {
        if policy.trim().is_empty() {
            return Err(SelfPromptingAgentError::Validation("Policy cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Policy hook for pre-execution validation
pub trait PolicyHook: Send + Sync {
    /// Execute policy check
    async fn check(&self, context: &str) -> Result<PolicyDecision, SelfPromptingAgentError>;

    /// Get hook name
    fn name(&self) -> &str;
}

/// Policy decision
#[derive(Debug, Clone)]
pub enum PolicyDecision {
    Allow,
    Deny(String),
    Modify(String),
}

/// Safety policy hook
pub struct SafetyPolicyHook;

impl SafetyPolicyHook {
    pub fn new() -> Self {
        Self
    }
}

impl PolicyHook for SafetyPolicyHook {
    async fn check(&self, context: &str) -> Result<PolicyDecision, SelfPromptingAgentError> {
        // Stub implementation - would check safety constraints
        if context.contains("unsafe") {
            Ok(PolicyDecision::Deny("Unsafe operation detected".to_string()))
        } else {
            Ok(PolicyDecision::Allow)
        }
    }

    fn name(&self) -> &str {
        "Safety Policy Hook"
    }
}
