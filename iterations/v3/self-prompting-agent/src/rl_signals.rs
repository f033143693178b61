//! Reinforcement learning signals for agent adaptation
//!
//! Provides signals and policy adjustments for RL-based agent improvement.

use crate::types::SelfPromptingAgentError;

/// RL signal for feedback
#[derive(Debug, Clone)]
pub struct RLSignal {
    pub signal_type: String,
    pub value: f64,
    pub context: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// RL signal generator
pub struct RLSignalGenerator;

impl RLSignalGenerator {
    /// Create a new signal generator
    pub fn new() -> Self {
        Self
    }

    /// Generate signal from state
    pub async fn generate(&self, state: &str) -> Result<RLSignal, SelfPromptingAgentError> {
        // Stub implementation - would analyze state and generate RL signal
        let value = match state {
            "success" => 1.0,
            "failure" => -1.0,
            _ => 0.0,
        };

        Ok(RLSignal {
            signal_type: "task_completion".to_string(),
            value,
            context: state.to_string(),
            timestamp: chrono::Utc::now(),
        })
    }

    /// Generate signal from performance metrics
    pub fn generate_from_metrics(&self, accuracy: f64, efficiency: f64) -> RLSignal {
        let combined_value = (accuracy + efficiency) / 2.0;

        RLSignal {
            signal_type: "performance".to_string(),
            value: combined_value,
            context: format!("accuracy: {:.2}, efficiency: {:.2}", accuracy, efficiency),
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Policy adjustment based on RL signals
#[derive(Debug, Clone)]
pub struct PolicyAdjustment {
    pub parameter: String,
    pub current_value: f64,
    pub new_value: f64,
    pub reason: String,
}

/// Policy adjuster
pub struct PolicyAdjuster;

impl PolicyAdjuster {
    /// Create a new policy adjuster
    pub fn new() -> Self {
        Self
    }

    /// Adjust policy based on signal
    pub async fn adjust_policy(&self, signal: &RLSignal) -> Result<Option<PolicyAdjustment>, SelfPromptingAgentError> {
        // Stub implementation - would adjust policy based on RL signal
        if signal.value > 0.8 {
            Ok(Some(PolicyAdjustment {
                parameter: "temperature".to_string(),
                current_value: 0.7,
                new_value: 0.6, // Lower temperature for better precision
                reason: "High performance detected, optimizing for precision".to_string(),
            }))
        } else if signal.value < 0.3 {
            Ok(Some(PolicyAdjustment {
                parameter: "max_iterations".to_string(),
                current_value: 5.0,
                new_value: 7.0, // More iterations for struggling tasks
                reason: "Low performance detected, increasing iteration limit".to_string(),
            }))
        } else {
            Ok(None) // No adjustment needed
        }
    }

    /// Apply policy adjustment
    pub async fn apply_adjustment(&self, adjustment: &PolicyAdjustment) -> Result<(), SelfPromptingAgentError> {
        // Stub implementation - would apply the adjustment to the running system
        tracing::info!(
            "Applied policy adjustment: {} from {} to {} ({})",
            adjustment.parameter,
            adjustment.current_value,
            adjustment.new_value,
            adjustment.reason
        );
        Ok(())
    }
}

/// RL trainer for policy learning
pub struct RLTrainer {
    learning_rate: f64,
    discount_factor: f64,
}

impl RLTrainer {
    /// Create a new RL trainer
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            learning_rate,
            discount_factor,
        }
    }

    /// Train on experience
    pub async fn train_on_experience(&self, state: &str, action: &str, reward: f64, next_state: &str) -> Result<(), SelfPromptingAgentError> {
        // Stub implementation - would update Q-values or policy
        tracing::info!(
            "Training on experience: {} -> {} -> {} -> {} (reward: {})",
            state, action, reward, next_state, reward
        );
        Ok(())
    }

    /// Get best action for state
    pub fn get_best_action(&self, state: &str) -> String {
        // Stub implementation - would query learned policy
        match state {
            "simple_task" => "direct_execution".to_string(),
            "complex_task" => "iterative_refinement".to_string(),
            _ => "standard_approach".to_string(),
        }
    }
}

/// Experience buffer for RL training
pub struct ExperienceBuffer {
    experiences: Vec<Experience>,
    max_size: usize,
}

impl ExperienceBuffer {
    /// Create a new experience buffer
    pub fn new(max_size: usize) -> Self {
        Self {
            experiences: Vec::new(),
            max_size,
        }
    }

    /// Add experience
    pub fn add_experience(&mut self, experience: Experience) {
        self.experiences.push(experience);
        if self.experiences.len() > self.max_size {
            self.experiences.remove(0); // Remove oldest
        }
    }

    /// Sample batch of experiences
    pub fn sample_batch(&self, batch_size: usize) -> Vec<&Experience> {
        // Stub implementation - would randomly sample
        self.experiences.iter().take(batch_size).collect()
    }
}

/// RL experience tuple
#[derive(Debug, Clone)]
pub struct Experience {
    pub state: String,
    pub action: String,
    pub reward: f64,
    pub next_state: String,
    pub done: bool,
}
