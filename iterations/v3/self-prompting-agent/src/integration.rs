//! Integration layer for autonomous agent systems
//!
//! Coordinates between multiple autonomous agents and external systems.

use std::sync::Arc;
use tokio::sync::RwLock;
use async_trait::async_trait;

use crate::types::{Task, SelfPromptingAgentError};

/// Integrated autonomous agent coordinator
pub struct IntegratedAutonomousAgent {
    agents: Vec<Arc<dyn AutonomousAgent>>,
    state: Arc<RwLock<IntegrationState>>,
}

impl IntegratedAutonomousAgent {
    /// Create a new integrated agent
    pub fn new() -> Self {
        Self {
            agents: Vec::new(),
            state: Arc::new(RwLock::new(IntegrationState::default())),
        }
    }

    /// Register an autonomous agent
    pub fn register_agent(&mut self, agent: Arc<dyn AutonomousAgent>) {
        self.agents.push(agent);
    }

    /// Execute a task using integrated agents
    pub async fn execute_task(&self, task: Task) -> Result<TaskResult, SelfPromptingAgentError> {
        let mut state = self.state.write().await;

        // Select appropriate agent for the task
        let agent = self.select_agent(&task).await?;
        state.active_agent = Some(agent.name().to_string());

        // Execute with the selected agent
        let result = agent.execute_task(task.clone()).await
            .map_err(|e| SelfPromptingAgentError::Execution(format!("Agent execution failed: {}", e)))?;

        state.completed_tasks += 1;
        state.last_task = Some(task.id.to_string());

        Ok(result)
    }

    /// Get integration status
    pub async fn status(&self) -> IntegrationStatus {
        let state = self.state.read().await;

        IntegrationStatus {
            registered_agents: self.agents.len(),
            active_agent: state.active_agent.clone(),
            completed_tasks: state.completed_tasks,
            failed_tasks: state.failed_tasks,
            last_task: state.last_task.clone(),
        }
    }

    /// Select the best agent for a task
    async fn select_agent(&self, task: &Task) -> Result<Arc<dyn AutonomousAgent>, SelfPromptingAgentError> {
        // Stub implementation - would use sophisticated selection logic
        self.agents.first().cloned()
            .ok_or_else(|| SelfPromptingAgentError::Execution("No agents registered".to_string()))
    }
}

/// Autonomous agent trait
#[async_trait]
pub trait AutonomousAgent: Send + Sync {
    /// Execute a task autonomously
    async fn execute_task(&self, task: Task) -> Result<TaskResult, SelfPromptingAgentError>;

    /// Get agent name
    fn name(&self) -> &str;

    /// Get agent capabilities
    fn capabilities(&self) -> Vec<String>;

    /// Check if agent can handle a task
    fn can_handle(&self, task: &Task) -> bool;
}

/// Task execution result
#[derive(Debug, Clone)]
pub struct TaskResult {
    pub task_id: uuid::Uuid,
    pub agent_name: String,
    pub result: serde_json::Value,
    pub execution_time_ms: u64,
    pub artifacts: Vec<String>,
}

/// Integration state
#[derive(Debug, Default)]
struct IntegrationState {
    active_agent: Option<String>,
    completed_tasks: usize,
    failed_tasks: usize,
    last_task: Option<String>,
}

/// Integration status
#[derive(Debug, Clone, serde::Serialize)]
pub struct IntegrationStatus {
    pub registered_agents: usize,
    pub active_agent: Option<String>,
    pub completed_tasks: usize,
    pub failed_tasks: usize,
    pub last_task: Option<String>,
}

/// Multi-agent coordinator for complex tasks
pub struct MultiAgentCoordinator {
    agents: Vec<Arc<dyn AutonomousAgent>>,
}

impl MultiAgentCoordinator {
    pub fn new() -> Self {
        Self { agents: Vec::new() }
    }

    /// Coordinate task execution across multiple agents
    pub async fn coordinate_task(&self, task: Task) -> Result<CoordinatedResult, SelfPromptingAgentError> {
        // Stub implementation - would break task into subtasks and coordinate
        Ok(CoordinatedResult {
            task_id: task.id,
            subtasks: vec![],
            final_result: serde_json::json!({"status": "coordinated"}),
            coordination_time_ms: 1000,
        })
    }
}

/// Coordinated execution result
#[derive(Debug, Clone)]
pub struct CoordinatedResult {
    pub task_id: uuid::Uuid,
    pub subtasks: Vec<TaskResult>,
    pub final_result: serde_json::Value,
    pub coordination_time_ms: u64,
}

/// Agent communication hub
pub struct AgentCommunicationHub {
    channels: std::collections::HashMap<String, tokio::sync::mpsc::UnboundedSender<Message>>,
}

impl AgentCommunicationHub {
    pub fn new() -> Self {
        Self {
            channels: std::collections::HashMap::new(),
        }
    }

    /// Send message to agent
    pub async fn send_message(&self, agent_name: &str, message: Message) -> Result<(), SelfPromptingAgentError> {
        if let Some(sender) = self.channels.get(agent_name) {
            sender.send(message).map_err(|_| SelfPromptingAgentError::Execution("Failed to send message".to_string()))?;
            Ok(())
        } else {
            Err(SelfPromptingAgentError::Execution(format!("Agent '{}' not found", agent_name)))
        }
    }

    /// Register agent channel
    pub fn register_agent(&mut self, agent_name: String, sender: tokio::sync::mpsc::UnboundedSender<Message>) {
        self.channels.insert(agent_name, sender);
    }
}

/// Inter-agent message
#[derive(Debug, Clone)]
pub struct Message {
    pub from: String,
    pub to: String,
    pub content: serde_json::Value,
    pub message_type: MessageType,
}

/// Message types
#[derive(Debug, Clone)]
pub enum MessageType {
    TaskRequest,
    TaskResult,
    StatusUpdate,
    Coordination,
}
