//! Rollback Manager - Safe Model Rollback Operations
//!
//! Provides safe rollback mechanisms for model deployments,
//! ensuring data consistency and performance stability.

use anyhow::Result;
use tracing::info;
use serde::{Deserialize, Serialize};

/// Rollback strategy options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RollbackStrategy {
    /// Immediate rollback to previous version
    Immediate,
    /// Gradual rollback with traffic shifting
    Gradual,
    /// A/B rollback with performance comparison
    ABTest,
}

/// Rollback configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollbackConfig {
    /// Rollback strategy
    pub strategy: RollbackStrategy,
    /// Traffic shift percentage for gradual rollback
    pub traffic_shift_percentage: f64,
    /// Performance threshold for rollback decision
    pub performance_threshold: f64,
}

/// Rollback manager for model operations
#[derive(Debug)]
pub struct RollbackManager {
    config: RollbackConfig,
}

impl RollbackManager {
    /// Create a new rollback manager
    pub fn new(config: RollbackConfig) -> Self {
        Self { config }
    }

    /// Execute rollback operation
    pub async fn execute_rollback(&self, model_id: &str) -> Result<()> {
        // TODO: Implement rollback logic
        Ok(())
    }

    /// Perform rollback with reason
    pub async fn perform_rollback(&self, model_id: &str, reason: String) -> Result<()> {
        info!("Performing rollback for model {}: {}", model_id, reason);
        self.execute_rollback(model_id).await
    }

    /// Validate rollback safety
    pub async fn validate_rollback(&self, model_id: &str) -> Result<bool> {
        // TODO: Implement validation logic
        Ok(true)
    }
}
