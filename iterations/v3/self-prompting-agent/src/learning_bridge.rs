//! Learning bridge for connecting to reflexive learning systems
//!
//! Bridges the gap between self-prompting agent and external learning algorithms.

use crate::types::SelfPromptingAgentError;

/// Learning bridge coordinator
pub struct LearningBridge;

impl LearningBridge {
    /// Create a new learning bridge
    pub fn new() -> Self {
        Self
    }

    /// Process a learning signal
    pub async fn process_signal(&self, signal: LearningSignal) -> Result<(), SelfPromptingAgentError> {
        // Stub implementation - would forward to learning system
        tracing::info!("Processed learning signal: {:?}", signal.signal_type);
        Ok(())
    }

    /// Get learning recommendations
    pub async fn get_recommendations(&self, context: &str) -> Result<Vec<String>, SelfPromptingAgentError> {
        // Stub implementation - would query learning system
        Ok(vec![
            "Consider using more specific prompts".to_string(),
            "Try breaking complex tasks into smaller steps".to_string(),
        ])
    }
}

/// Learning signal for RL feedback
#[derive(Debug, Clone)]
pub struct LearningSignal {
    pub signal_type: String,
    pub value: f64,
    pub context: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Reflexive learning system integration
pub struct ReflexiveLearningSystem;

impl ReflexiveLearningSystem {
    /// Create a new reflexive learning system
    pub fn new() -> Self {
        Self
    }

    /// Process learning signal
    pub async fn process_signal(&self, signal: LearningSignal) -> Result<(), SelfPromptingAgentError> {
        // Stub implementation
        Ok(())
    }

    /// Generate insights from learning data
    pub async fn generate_insights(&self) -> Result<Vec<String>, SelfPromptingAgentError> {
        // Stub implementation
        Ok(vec!["Learning system operational".to_string()])
    }
}
