/// Federation protocol implementation
///
/// Defines the communication protocol and message types used for
/// secure coordination between federation participants and coordinator.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Federation protocol handler
pub struct FederationProtocol {
    message_handlers: HashMap<String, Box<dyn MessageHandler>>,
    security_validator: SecurityValidator,
}

/// Protocol message types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProtocolMessage {
    /// Coordinator starts a new round
    RoundStart {
        round_id: u64,
        expected_participants: usize,
        timeout_seconds: u64,
    },

    /// Participant signals readiness for round
    ParticipantReady {
        participant_id: String,
    },

    /// Participant submits contribution
    Contribution {
        participant_id: String,
        contribution: ParticipantContribution,
    },

    /// Coordinator completes a round
    RoundComplete {
        round_id: u64,
        aggregated_parameters: Vec<Vec<f32>>,
        quality_metrics: QualityMetrics,
    },

    /// Error message
    Error {
        participant_id: Option<String>,
        error_code: String,
        message: String,
    },

    /// Heartbeat/keepalive
    Heartbeat {
        participant_id: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

/// Participant contribution data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantContribution {
    /// Encrypted model update
    pub encrypted_update: Vec<u8>,
    /// Zero-knowledge proof of correctness
    pub zero_knowledge_proof: ZeroKnowledgeProof,
    /// Contribution metadata
    pub metadata: ContributionMetadata,
}

/// Contribution metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionMetadata {
    /// Training samples used
    pub training_samples: usize,
    /// Computation time in seconds
    pub computation_time_seconds: f32,
    /// Device type used
    pub device_type: String,
    /// Software version
    pub software_version: String,
}

/// Quality metrics for aggregation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub convergence_score: f32,
    pub diversity_score: f32,
    pub confidence_score: f32,
    pub privacy_score: f32,
}

/// Zero-knowledge proof structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZeroKnowledgeProof {
    pub proof_data: Vec<u8>,
    pub public_inputs: Vec<u8>,
    pub proof_type: String,
}

/// Security validator for protocol messages
#[derive(Debug)]
pub struct SecurityValidator {
    trusted_participants: HashMap<String, ParticipantCredentials>,
}

/// Participant credentials for authentication
#[derive(Debug, Clone)]
struct ParticipantCredentials {
    public_key: Vec<u8>,
    certificate_chain: Vec<u8>,
    last_seen: chrono::DateTime<chrono::Utc>,
}

/// Message handler trait
#[async_trait::async_trait]
trait MessageHandler: Send + Sync {
    async fn handle_message(&self, message: &ProtocolMessage) -> Result<Option<ProtocolMessage>>;
}

impl FederationProtocol {
    /// Create a new federation protocol handler
    pub fn new() -> Self {
        let mut message_handlers = HashMap::new();

        // Register default message handlers
        message_handlers.insert(
            "round_start".to_string(),
            Box::new(RoundStartHandler) as Box<dyn MessageHandler>,
        );

        message_handlers.insert(
            "contribution".to_string(),
            Box::new(ContributionHandler) as Box<dyn MessageHandler>,
        );

        message_handlers.insert(
            "heartbeat".to_string(),
            Box::new(HeartbeatHandler) as Box<dyn MessageHandler>,
        );

        Self {
            message_handlers,
            security_validator: SecurityValidator::new(),
        }
    }

    /// Process an incoming protocol message
    pub async fn process_message(&self, message: ProtocolMessage) -> Result<Option<ProtocolMessage>> {
        debug!("Processing protocol message: {:?}", message);

        // Validate message authenticity and integrity
        self.security_validator.validate_message(&message).await?;

        // Route to appropriate handler
        let handler_key = self.get_handler_key(&message);
        if let Some(handler) = self.message_handlers.get(&handler_key) {
            handler.handle_message(&message).await
        } else {
            warn!("No handler found for message type: {}", handler_key);
            Ok(None)
        }
    }

    /// Create a protocol message
    pub fn create_message(&self, message_type: MessageType, data: MessageData) -> Result<ProtocolMessage> {
        match (message_type, data) {
            (MessageType::RoundStart, MessageData::RoundStart { round_id, expected_participants, timeout_seconds }) => {
                Ok(ProtocolMessage::RoundStart {
                    round_id,
                    expected_participants,
                    timeout_seconds,
                })
            }
            (MessageType::ParticipantReady, MessageData::ParticipantReady { participant_id }) => {
                Ok(ProtocolMessage::ParticipantReady { participant_id })
            }
            (MessageType::Contribution, MessageData::Contribution { participant_id, contribution }) => {
                Ok(ProtocolMessage::Contribution { participant_id, contribution })
            }
            (MessageType::RoundComplete, MessageData::RoundComplete { round_id, aggregated_parameters, quality_metrics }) => {
                Ok(ProtocolMessage::RoundComplete {
                    round_id,
                    aggregated_parameters,
                    quality_metrics,
                })
            }
            (MessageType::Error, MessageData::Error { participant_id, error_code, message }) => {
                Ok(ProtocolMessage::Error {
                    participant_id,
                    error_code,
                    message,
                })
            }
            (MessageType::Heartbeat, MessageData::Heartbeat { participant_id }) => {
                Ok(ProtocolMessage::Heartbeat {
                    participant_id,
                    timestamp: chrono::Utc::now(),
                })
            }
            _ => Err(anyhow::anyhow!("Invalid message type and data combination")),
        }
    }

    /// Get handler key for message routing
    fn get_handler_key(&self, message: &ProtocolMessage) -> String {
        match message {
            ProtocolMessage::RoundStart { .. } => "round_start".to_string(),
            ProtocolMessage::ParticipantReady { .. } => "participant_ready".to_string(),
            ProtocolMessage::Contribution { .. } => "contribution".to_string(),
            ProtocolMessage::RoundComplete { .. } => "round_complete".to_string(),
            ProtocolMessage::Error { .. } => "error".to_string(),
            ProtocolMessage::Heartbeat { .. } => "heartbeat".to_string(),
        }
    }

    /// Register a custom message handler
    pub fn register_handler(&mut self, message_type: String, handler: Box<dyn MessageHandler>) {
        self.message_handlers.insert(message_type, handler);
    }

    /// Get protocol statistics
    pub fn get_statistics(&self) -> ProtocolStatistics {
        ProtocolStatistics {
            handlers_registered: self.message_handlers.len(),
            messages_processed: 0, // Would track this in practice
            security_violations: 0,
            average_processing_time_ms: 0.0,
        }
    }
}

/// Message type enumeration for creation
#[derive(Debug)]
pub enum MessageType {
    RoundStart,
    ParticipantReady,
    Contribution,
    RoundComplete,
    Error,
    Heartbeat,
}

/// Message data variants
#[derive(Debug)]
pub enum MessageData {
    RoundStart {
        round_id: u64,
        expected_participants: usize,
        timeout_seconds: u64,
    },
    ParticipantReady {
        participant_id: String,
    },
    Contribution {
        participant_id: String,
        contribution: ParticipantContribution,
    },
    RoundComplete {
        round_id: u64,
        aggregated_parameters: Vec<Vec<f32>>,
        quality_metrics: QualityMetrics,
    },
    Error {
        participant_id: Option<String>,
        error_code: String,
        message: String,
    },
    Heartbeat {
        participant_id: String,
    },
}

/// Protocol statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolStatistics {
    pub handlers_registered: usize,
    pub messages_processed: u64,
    pub security_violations: u64,
    pub average_processing_time_ms: f32,
}

impl SecurityValidator {
    fn new() -> Self {
        Self {
            trusted_participants: HashMap::new(),
        }
    }

    async fn validate_message(&self, message: &ProtocolMessage) -> Result<()> {
        // Basic validation - in practice, this would verify signatures, certificates, etc.
        match message {
            ProtocolMessage::Contribution { participant_id, .. } => {
                if !self.trusted_participants.contains_key(participant_id) {
                    return Err(anyhow::anyhow!("Untrusted participant: {}", participant_id));
                }
            }
            ProtocolMessage::RoundStart { .. } => {
                // Coordinator messages need special validation
            }
            _ => {
                // Other message types have minimal validation
            }
        }

        Ok(())
    }

    pub fn add_trusted_participant(&mut self, participant_id: String, credentials: ParticipantCredentials) {
        self.trusted_participants.insert(participant_id, credentials);
    }
}

/// Message handlers
struct RoundStartHandler;

#[async_trait::async_trait]
impl MessageHandler for RoundStartHandler {
    async fn handle_message(&self, message: &ProtocolMessage) -> Result<Option<ProtocolMessage>> {
        match message {
            ProtocolMessage::RoundStart { round_id, .. } => {
                info!("Handling round start for round {}", round_id);
                // In practice, this would trigger participant preparation
                Ok(None)
            }
            _ => Err(anyhow::anyhow!("Invalid message type for RoundStartHandler")),
        }
    }
}

struct ContributionHandler;

#[async_trait::async_trait]
impl MessageHandler for ContributionHandler {
    async fn handle_message(&self, message: &ProtocolMessage) -> Result<Option<ProtocolMessage>> {
        match message {
            ProtocolMessage::Contribution { participant_id, contribution } => {
                debug!("Handling contribution from participant {}", participant_id);
                // In practice, this would validate and forward the contribution
                Ok(None)
            }
            _ => Err(anyhow::anyhow!("Invalid message type for ContributionHandler")),
        }
    }
}

struct HeartbeatHandler;

#[async_trait::async_trait]
impl MessageHandler for HeartbeatHandler {
    async fn handle_message(&self, message: &ProtocolMessage) -> Result<Option<ProtocolMessage>> {
        match message {
            ProtocolMessage::Heartbeat { participant_id, .. } => {
                debug!("Received heartbeat from participant {}", participant_id);
                // Update participant last-seen timestamp
                Ok(None)
            }
            _ => Err(anyhow::anyhow!("Invalid message type for HeartbeatHandler")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_protocol_message_creation() {
        let protocol = FederationProtocol::new();

        let message = protocol.create_message(
            MessageType::RoundStart,
            MessageData::RoundStart {
                round_id: 1,
                expected_participants: 10,
                timeout_seconds: 300,
            },
        ).unwrap();

        match message {
            ProtocolMessage::RoundStart { round_id, expected_participants, timeout_seconds } => {
                assert_eq!(round_id, 1);
                assert_eq!(expected_participants, 10);
                assert_eq!(timeout_seconds, 300);
            }
            _ => panic!("Unexpected message type"),
        }
    }

    #[tokio::test]
    async fn test_protocol_message_processing() {
        let protocol = FederationProtocol::new();

        let message = ProtocolMessage::Heartbeat {
            participant_id: "test_participant".to_string(),
            timestamp: chrono::Utc::now(),
        };

        let response = protocol.process_message(message).await.unwrap();
        assert!(response.is_none()); // Heartbeat doesn't generate response
    }
}


