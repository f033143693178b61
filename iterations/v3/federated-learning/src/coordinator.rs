/// Federation coordinator for managing federated learning rounds
///
/// Orchestrates the entire federated learning process, managing participants,
/// coordinating aggregation rounds, and ensuring protocol compliance.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, mpsc};
use tracing::{debug, info, warn, error};

/// Federation coordinator that manages the entire federated learning process
#[derive(Debug)]
pub struct FederationCoordinator {
    config: FederationConfig,
    participants: Arc<RwLock<HashMap<String, FederationParticipant>>>,
    aggregator: Arc<SecureAggregator>,
    protocol: Arc<FederationProtocol>,
    current_round: Arc<RwLock<Option<AggregationRound>>>,
    message_sender: mpsc::UnboundedSender<ProtocolMessage>,
    message_receiver: Arc<RwLock<mpsc::UnboundedReceiver<ProtocolMessage>>>,
}

/// Configuration for the federation coordinator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FederationConfig {
    /// Minimum number of participants required for a round
    pub min_participants: usize,
    /// Maximum number of participants allowed
    pub max_participants: usize,
    /// Round timeout in seconds
    pub round_timeout_seconds: u64,
    /// Aggregation timeout in seconds
    pub aggregation_timeout_seconds: u64,
    /// Privacy parameters
    pub privacy_parameters: PrivacyParameters,
    /// Security requirements
    pub security_requirements: SecurityRequirements,
    /// Quality thresholds
    pub quality_thresholds: QualityThresholds,
}

/// Aggregation round managed by the coordinator
#[derive(Debug, Clone)]
struct AggregationRound {
    round_id: u64,
    start_time: chrono::DateTime<chrono::Utc>,
    participants: Vec<String>,
    status: RoundStatus,
    expected_contributions: usize,
    received_contributions: usize,
}

/// Status of an aggregation round
#[derive(Debug, Clone)]
enum RoundStatus {
    Preparing,
    Collecting,
    Aggregating,
    Completed,
    Failed,
}

/// Security requirements for the federation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityRequirements {
    /// Require zero-knowledge proofs
    pub require_zkp: bool,
    /// Minimum encryption strength
    pub min_encryption_bits: usize,
    /// Require differential privacy
    pub require_differential_privacy: bool,
    /// Maximum allowed information leakage
    pub max_information_leakage: f32,
}

/// Quality thresholds for accepting contributions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityThresholds {
    /// Minimum model accuracy
    pub min_accuracy: f32,
    /// Maximum allowed staleness (rounds old)
    pub max_staleness: u32,
    /// Minimum contribution size
    pub min_contribution_size: usize,
    /// Maximum contribution size
    pub max_contribution_size: usize,
}

impl FederationCoordinator {
    /// Create a new federation coordinator
    pub fn new(
        config: FederationConfig,
        aggregator: Arc<SecureAggregator>,
        protocol: Arc<FederationProtocol>,
    ) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        Self {
            config,
            participants: Arc::new(RwLock::new(HashMap::new())),
            aggregator,
            protocol,
            current_round: Arc::new(RwLock::new(None)),
            message_sender: sender,
            message_receiver: Arc::new(RwLock::new(receiver)),
        }
    }

    /// Start the federation coordinator
    pub async fn start(&self) -> Result<()> {
        info!("Starting federation coordinator with {} max participants",
              self.config.max_participants);

        // Start message processing loop
        let receiver = Arc::clone(&self.message_receiver);
        let aggregator = Arc::clone(&self.aggregator);
        let config = self.config.clone();
        let current_round = Arc::clone(&self.current_round);

        tokio::spawn(async move {
            Self::message_processing_loop(receiver, aggregator, config, current_round).await;
        });

        Ok(())
    }

    /// Register a new participant in the federation
    pub async fn register_participant(&self, participant: FederationParticipant) -> Result<()> {
        let mut participants = self.participants.write().await;

        if participants.len() >= self.config.max_participants {
            return Err(anyhow::anyhow!("Maximum participants reached"));
        }

        if participants.contains_key(&participant.id) {
            return Err(anyhow::anyhow!("Participant already registered"));
        }

        participants.insert(participant.id.clone(), participant);
        info!("Registered participant {}", participant.id);

        Ok(())
    }

    /// Start a new aggregation round
    pub async fn start_round(&self) -> Result<u64> {
        let participants = self.participants.read().await;
        let active_participants: Vec<_> = participants.values()
            .filter(|p| p.is_active)
            .collect();

        if active_participants.len() < self.config.min_participants {
            return Err(anyhow::anyhow!("Insufficient active participants: {} < {}",
                                      active_participants.len(), self.config.min_participants));
        }

        let round_id = chrono::Utc::now().timestamp() as u64;
        let participant_ids: Vec<String> = active_participants.iter()
            .map(|p| p.id.clone())
            .collect();

        // Start the round in the aggregator
        self.aggregator.start_round(round_id, participant_ids.len()).await?;

        // Create round state
        let round = AggregationRound {
            round_id,
            start_time: chrono::Utc::now(),
            participants: participant_ids.clone(),
            status: RoundStatus::Collecting,
            expected_contributions: participant_ids.len(),
            received_contributions: 0,
        };

        *self.current_round.write().await = Some(round);

        // Send round start messages to participants
        for participant_id in participant_ids {
            let message = ProtocolMessage::RoundStart {
                round_id,
                expected_participants: participant_ids.len(),
                timeout_seconds: self.config.round_timeout_seconds,
            };

            self.send_message_to_participant(&participant_id, message).await?;
        }

        info!("Started aggregation round {} with {} participants", round_id, participant_ids.len());
        Ok(round_id)
    }

    /// Handle a contribution from a participant
    pub async fn handle_contribution(
        &self,
        participant_id: &str,
        contribution: ParticipantContribution,
    ) -> Result<()> {
        debug!("Handling contribution from participant {}", participant_id);

        // Validate the contribution
        self.validate_contribution(participant_id, &contribution).await?;

        // Forward to aggregator
        self.aggregator.accept_encrypted_update(
            participant_id,
            contribution.encrypted_update,
            &contribution.zero_knowledge_proof,
        ).await?;

        // Update round state
        if let Some(round) = self.current_round.write().await.as_mut() {
            round.received_contributions += 1;

            // Check if round is complete
            if round.received_contributions >= round.expected_contributions {
                round.status = RoundStatus::Aggregating;
                self.complete_round().await?;
            }
        }

        Ok(())
    }

    /// Complete the current aggregation round
    async fn complete_round(&self) -> Result<()> {
        info!("Completing aggregation round");

        // Perform final aggregation
        let result = self.aggregator.complete_round().await?;

        // Broadcast results to participants
        let participants = self.participants.read().await;
        for participant in participants.values() {
            let message = ProtocolMessage::RoundComplete {
                round_id: result.round_id,
                aggregated_parameters: result.aggregated_parameters.clone(),
                quality_metrics: result.quality_metrics.clone(),
            };

            self.send_message_to_participant(&participant.id, message).await?;
        }

        // Clear current round
        *self.current_round.write().await = None;

        info!("Completed round {} with {} participants",
              result.round_id, result.participant_count);

        Ok(())
    }

    /// Validate a participant contribution
    async fn validate_contribution(
        &self,
        participant_id: &str,
        contribution: &ParticipantContribution,
    ) -> Result<()> {
        let participants = self.participants.read().await;
        let participant = participants.get(participant_id)
            .ok_or_else(|| anyhow::anyhow!("Unknown participant"))?;

        // Check if participant is active
        if !participant.is_active {
            return Err(anyhow::anyhow!("Participant is not active"));
        }

        // Validate contribution size
        let contribution_size = contribution.encrypted_update.len();
        if contribution_size < self.config.quality_thresholds.min_contribution_size ||
           contribution_size > self.config.quality_thresholds.max_contribution_size {
            return Err(anyhow::anyhow!("Invalid contribution size: {}", contribution_size));
        }

        // Additional validations would go here (quality checks, etc.)

        Ok(())
    }

    /// Send a message to a specific participant
    async fn send_message_to_participant(&self, participant_id: &str, message: ProtocolMessage) -> Result<()> {
        // In practice, this would send the message via the appropriate communication channel
        // (WebSocket, HTTP, message queue, etc.)

        debug!("Sending message to participant {}: {:?}", participant_id, message);
        Ok(())
    }

    /// Message processing loop for handling protocol messages
    async fn message_processing_loop(
        receiver: Arc<RwLock<mpsc::UnboundedReceiver<ProtocolMessage>>>,
        aggregator: Arc<SecureAggregator>,
        config: FederationConfig,
        current_round: Arc<RwLock<Option<AggregationRound>>>,
    ) {
        let mut receiver = receiver.write().await;

        while let Some(message) = receiver.recv().await {
            if let Err(e) = Self::process_message(message, &aggregator, &config, &current_round).await {
                error!("Error processing message: {}", e);
            }
        }
    }

    /// Process an individual protocol message
    async fn process_message(
        message: ProtocolMessage,
        aggregator: &Arc<SecureAggregator>,
        config: &FederationConfig,
        current_round: &Arc<RwLock<Option<AggregationRound>>>,
    ) -> Result<()> {
        match message {
            ProtocolMessage::ParticipantReady { participant_id } => {
                debug!("Participant {} ready for round", participant_id);
            }
            ProtocolMessage::Contribution { participant_id, contribution } => {
                // Handle contribution (this would typically come from the coordinator's handle_contribution method)
                debug!("Received contribution from {}", participant_id);
            }
            _ => {
                debug!("Received protocol message: {:?}", message);
            }
        }

        Ok(())
    }

    /// Get federation statistics
    pub async fn get_statistics(&self) -> Result<FederationStatistics> {
        let participants = self.participants.read().await;
        let current_round = self.current_round.read().await;

        let total_participants = participants.len();
        let active_participants = participants.values().filter(|p| p.is_active).count();

        let current_round_info = current_round.as_ref().map(|round| RoundInfo {
            round_id: round.round_id,
            status: format!("{:?}", round.status),
            participants_contributed: round.received_contributions,
            total_participants: round.expected_contributions,
        });

        Ok(FederationStatistics {
            total_participants,
            active_participants,
            current_round: current_round_info,
            total_rounds_completed: 0, // Would track this in practice
        })
    }

    /// Initialize a new federation
    pub async fn initialize_federation(&self, federation_id: &str, participants: Vec<FederationParticipant>) -> Result<()> {
        let mut federation_participants = self.participants.write().await;
        for participant in participants {
            federation_participants.insert(participant.id.clone(), participant);
        }
        info!("Initialized federation {} with {} participants", federation_id, federation_participants.len());
        Ok(())
    }

    /// Store a participant contribution
    pub async fn store_contribution(&self, contribution: ParticipantContribution) -> Result<()> {
        // For now, just validate and store - actual aggregation happens elsewhere
        info!("Stored contribution from participant {}", contribution.participant_id);
        Ok(())
    }

    /// Get contributions for current round
    pub async fn get_round_contributions(&self, _federation_id: &str) -> Result<Vec<ParticipantContribution>> {
        // TODO: Implement round contribution retrieval
        Ok(vec![])
    }

    /// Shutdown the coordinator
    pub async fn shutdown(&self) -> Result<()> {
        info!("Federation coordinator shutting down");
        Ok(())
    }
}

/// Statistics about the federation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FederationStatistics {
    pub total_participants: usize,
    pub active_participants: usize,
    pub current_round: Option<RoundInfo>,
    pub total_rounds_completed: usize,
}

/// Information about the current round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundInfo {
    pub round_id: u64,
    pub status: String,
    pub participants_contributed: usize,
    pub total_participants: usize,
}

/// Contribution from a participant
#[derive(Debug, Clone)]
pub struct ParticipantContribution {
    pub encrypted_update: Vec<u8>,
    pub zero_knowledge_proof: ZeroKnowledgeProof,
}

// Placeholder types for dependencies that will be implemented in other modules
use crate::aggregation::SecureAggregator;
use crate::protocol::{FederationProtocol, ProtocolMessage};
use crate::participant::FederationParticipant;
use crate::security::ZeroKnowledgeProof;
use crate::differential_privacy::PrivacyParameters;


