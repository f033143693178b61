//! Traffic Splitter - Intelligent Request Distribution
//!
//! Provides intelligent traffic splitting capabilities for A/B testing,
//! canary deployments, and multi-model evaluation.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Traffic split configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Model ID to traffic percentage mapping
    pub model_weights: HashMap<String, f64>,
    /// Sticky session configuration
    pub sticky_sessions: bool,
    /// Session timeout in seconds
    pub session_timeout_secs: u64,
}

/// Traffic splitter for request distribution
#[derive(Debug)]
pub struct TrafficSplitter {
    config: SplitConfig,
}

impl TrafficSplitter {
    /// Create a new traffic splitter
    pub fn new(config: SplitConfig) -> Self {
        Self { config }
    }

    /// Determine target model for request
    pub async fn get_target_model(&self, request_id: &str) -> Result<String> {
        // TODO: Implement traffic splitting logic
        // For now, return first model
        if let Some((model_id, _)) = self.config.model_weights.iter().next() {
            Ok(model_id.clone())
        } else {
            Err(anyhow::anyhow!("No models configured for traffic splitting"))
        }
    }

    /// Update traffic weights
    pub async fn update_weights(&mut self, new_weights: HashMap<String, f64>) -> Result<()> {
        self.config.model_weights = new_weights;
        Ok(())
    }
}
