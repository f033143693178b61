//! Multimodal Verification Tools - Cross-modal Evidence Correlation
//!
//! Implements sophisticated cross-modal evidence correlation for cognitive enablement,
//! enabling the system to validate claims across different modalities (text, code,
//! images, audio, video) and fuse evidence from multiple sources for robust verification.

use anyhow::{Result, Context};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, debug, warn};
use chrono::{DateTime, Utc};

use crate::tool_registry::{Tool, ToolMetadata, ToolCategory};
use crate::evidence_collection_tools::{EvidenceItem, EvidenceType, AtomicClaim};

/// Multimodal verification tool suite
#[derive(Debug)]
pub struct MultimodalVerificationTool {
    /// Cross-modal correlation engine for evidence synthesis
    pub correlation_engine: Arc<CrossModalCorrelationEngine>,
    /// Evidence fusion validator for multi-source verification
    pub fusion_validator: Arc<EvidenceFusionValidator>,
    /// Semantic integrator for meaning alignment across modalities
    pub semantic_integrator: Arc<SemanticIntegrator>,
}

impl MultimodalVerificationTool {
    /// Create a new multimodal verification tool
    pub async fn new() -> Result<Self> {
        let correlation_engine = Arc::new(CrossModalCorrelationEngine::new().await?);
        let fusion_validator = Arc::new(EvidenceFusionValidator::new().await?);
        let semantic_integrator = Arc::new(SemanticIntegrator::new().await?);

        Ok(Self {
            correlation_engine,
            fusion_validator,
            semantic_integrator,
        })
    }
}

/// Cross-modal correlation engine for synthesizing evidence across modalities
#[derive(Debug)]
pub struct CrossModalCorrelationEngine {
    /// Modality mappings for evidence correlation
    modality_mappings: HashMap<EvidenceType, Vec<EvidenceType>>,
    /// Correlation confidence thresholds by modality pair
    correlation_thresholds: HashMap<(EvidenceType, EvidenceType), f64>,
}

impl CrossModalCorrelationEngine {
    /// Create a new cross-modal correlation engine
    pub async fn new() -> Result<Self> {
        let mut modality_mappings = HashMap::new();
        let mut correlation_thresholds = HashMap::new();

        // Define evidence type relationships
        modality_mappings.insert(EvidenceType::CodeAnalysis, vec![
            EvidenceType::Benchmarking,
            EvidenceType::Profiling,
            EvidenceType::LoadTesting,
            EvidenceType::StandardsCompliance,
        ]);

        modality_mappings.insert(EvidenceType::Benchmarking, vec![
            EvidenceType::CodeAnalysis,
            EvidenceType::Profiling,
            EvidenceType::LoadTesting,
            EvidenceType::SecurityAudit,
        ]);

        modality_mappings.insert(EvidenceType::StandardsCompliance, vec![
            EvidenceType::SecurityAudit,
            EvidenceType::CodeAnalysis,
            EvidenceType::Benchmarking,
        ]);

        // Set correlation thresholds (higher values = stronger correlation required)
        correlation_thresholds.insert((EvidenceType::CodeAnalysis, EvidenceType::Benchmarking), 0.7);
        correlation_thresholds.insert((EvidenceType::Benchmarking, EvidenceType::Profiling), 0.8);
        correlation_thresholds.insert((EvidenceType::StandardsCompliance, EvidenceType::SecurityAudit), 0.9);

        Ok(Self {
            modality_mappings,
            correlation_thresholds,
        })
    }

    /// Correlate evidence across different modalities
    pub async fn correlate_evidence(&self, evidence_set: &[EvidenceItem]) -> Result<CorrelationResult> {
        let mut correlations = Vec::new();
        let mut overall_confidence = 0.0;
        let mut correlation_count = 0;

        // Group evidence by type
        let mut evidence_by_type: HashMap<EvidenceType, Vec<&EvidenceItem>> = HashMap::new();
        for evidence in evidence_set {
            evidence_by_type.entry(evidence.evidence_type).or_insert(Vec::new()).push(evidence);
        }

        // Find correlations between different evidence types
        for (primary_type, primary_evidence) in &evidence_by_type {
            if let Some(related_types) = self.modality_mappings.get(primary_type) {
                for related_type in related_types {
                    if let Some(related_evidence) = evidence_by_type.get(related_type) {
                        for primary_item in primary_evidence {
                            for related_item in related_evidence {
                                if let Some(correlation) = self.correlate_items(primary_item, related_item).await? {
                                    correlations.push(correlation);
                                    overall_confidence += correlation.confidence;
                                    correlation_count += 1;
                                }
                            }
                        }
                    }
                }
            }
        }

        let average_confidence = if correlation_count > 0 {
            overall_confidence / correlation_count as f64
        } else {
            0.0
        };

        Ok(CorrelationResult {
            correlations,
            overall_confidence: average_confidence,
            correlation_strength: self.assess_correlation_strength(&correlations),
            timestamp: Utc::now(),
        })
    }

    /// Correlate two specific evidence items
    async fn correlate_items(&self, item1: &EvidenceItem, item2: &EvidenceItem) -> Result<Option<EvidenceCorrelation>> {
        let threshold = self.correlation_thresholds
            .get(&(item1.evidence_type, item2.evidence_type))
            .or_else(|| self.correlation_thresholds.get(&(item2.evidence_type, item1.evidence_type)))
            .unwrap_or(&0.5);

        // Calculate semantic similarity between evidence content
        let similarity = self.calculate_semantic_similarity(&item1.content, &item2.content)?;

        if similarity >= *threshold {
            let correlation_type = self.determine_correlation_type(item1, item2);
            let confidence = similarity * self.calculate_contextual_confidence(item1, item2);

            Ok(Some(EvidenceCorrelation {
                evidence_pair: (item1.id.clone(), item2.id.clone()),
                correlation_type,
                confidence,
                supporting_factors: self.extract_supporting_factors(item1, item2),
                timestamp: Utc::now(),
            }))
        } else {
            Ok(None)
        }
    }

    /// Calculate semantic similarity between two text contents
    fn calculate_semantic_similarity(&self, content1: &str, content2: &str) -> Result<f64> {
        // Simple semantic similarity based on word overlap and length similarity
        let words1: std::collections::HashSet<_> = content1.to_lowercase()
            .split_whitespace()
            .collect();
        let words2: std::collections::HashSet<_> = content2.to_lowercase()
            .split_whitespace()
            .collect();

        let intersection = words1.intersection(&words2).count();
        let union = words1.len() + words2.len() - intersection;

        if union == 0 {
            return Ok(0.0);
        }

        let jaccard_similarity = intersection as f64 / union as f64;

        // Factor in length similarity (shorter content should have higher overlap)
        let len_similarity = 1.0 - (content1.len() as f64 - content2.len() as f64).abs() /
                           (content1.len().max(content2.len()) as f64);

        Ok((jaccard_similarity + len_similarity) / 2.0)
    }

    /// Determine the type of correlation between two evidence items
    fn determine_correlation_type(&self, item1: &EvidenceItem, item2: &EvidenceItem) -> CorrelationType {
        match (item1.evidence_type, item2.evidence_type) {
            (EvidenceType::CodeAnalysis, EvidenceType::Benchmarking) => CorrelationType::Causal,
            (EvidenceType::Benchmarking, EvidenceType::Profiling) => CorrelationType::Supporting,
            (EvidenceType::StandardsCompliance, EvidenceType::SecurityAudit) => CorrelationType::Validation,
            _ => CorrelationType::Related,
        }
    }

    /// Calculate contextual confidence based on evidence metadata
    fn calculate_contextual_confidence(&self, item1: &EvidenceItem, item2: &EvidenceItem) -> f64 {
        let mut confidence = 0.8; // Base confidence

        // Same source increases confidence
        if item1.source == item2.source {
            confidence += 0.1;
        }

        // Recent evidence is more reliable
        let age_days_1 = (Utc::now() - item1.timestamp).num_days();
        let age_days_2 = (Utc::now() - item2.timestamp).num_days();

        if age_days_1 < 30 && age_days_2 < 30 {
            confidence += 0.05;
        }

        confidence.min(1.0)
    }

    /// Extract factors that support the correlation
    fn extract_supporting_factors(&self, item1: &EvidenceItem, item2: &EvidenceItem) -> Vec<String> {
        let mut factors = Vec::new();

        if item1.source == item2.source {
            factors.push("Same source".to_string());
        }

        if item1.evidence_type == item2.evidence_type {
            factors.push("Same evidence type".to_string());
        }

        let time_diff = (item1.timestamp - item2.timestamp).num_hours().abs();
        if time_diff < 24 {
            factors.push("Temporal proximity".to_string());
        }

        factors
    }

    /// Assess overall correlation strength across all correlations
    fn assess_correlation_strength(&self, correlations: &[EvidenceCorrelation]) -> CorrelationStrength {
        if correlations.is_empty() {
            return CorrelationStrength::Weak;
        }

        let avg_confidence = correlations.iter().map(|c| c.confidence).sum::<f64>() / correlations.len() as f64;
        let high_confidence_count = correlations.iter().filter(|c| c.confidence > 0.8).count();

        match (avg_confidence, high_confidence_count) {
            (avg, high) if avg > 0.8 && high >= correlations.len() / 2 => CorrelationStrength::Strong,
            (avg, _) if avg > 0.6 => CorrelationStrength::Moderate,
            _ => CorrelationStrength::Weak,
        }
    }
}

/// Evidence fusion validator for multi-source verification
#[derive(Debug)]
pub struct EvidenceFusionValidator {
    /// Fusion strategies for different evidence types
    fusion_strategies: HashMap<EvidenceType, FusionStrategy>,
}

impl EvidenceFusionValidator {
    /// Create a new evidence fusion validator
    pub async fn new() -> Result<Self> {
        let mut fusion_strategies = HashMap::new();

        fusion_strategies.insert(EvidenceType::CodeAnalysis, FusionStrategy::WeightedAverage);
        fusion_strategies.insert(EvidenceType::Benchmarking, FusionStrategy::HighestConfidence);
        fusion_strategies.insert(EvidenceType::SecurityAudit, FusionStrategy::Consensus);
        fusion_strategies.insert(EvidenceType::StandardsCompliance, FusionStrategy::Strictest);

        Ok(Self { fusion_strategies })
    }

    /// Fuse multiple evidence items into a unified verification result
    pub async fn fuse_evidence(&self, evidence_set: &[EvidenceItem], claim: &AtomicClaim) -> Result<FusionResult> {
        if evidence_set.is_empty() {
            return Ok(FusionResult {
                fused_confidence: 0.0,
                fusion_method: "No evidence".to_string(),
                evidence_count: 0,
                consensus_reached: false,
                contradictions: Vec::new(),
                timestamp: Utc::now(),
            });
        }

        let strategy = self.select_fusion_strategy(evidence_set);
        let fused_confidence = self.apply_fusion_strategy(strategy, evidence_set)?;
        let contradictions = self.detect_contradictions(evidence_set)?;

        Ok(FusionResult {
            fused_confidence,
            fusion_method: format!("{:?}", strategy),
            evidence_count: evidence_set.len(),
            consensus_reached: contradictions.is_empty() && fused_confidence > 0.7,
            contradictions,
            timestamp: Utc::now(),
        })
    }

    /// Select appropriate fusion strategy based on evidence types
    fn select_fusion_strategy(&self, evidence_set: &[EvidenceItem]) -> FusionStrategy {
        let evidence_types: std::collections::HashSet<_> = evidence_set.iter()
            .map(|e| e.evidence_type)
            .collect();

        // If all evidence is the same type, use type-specific strategy
        if evidence_types.len() == 1 {
            let evidence_type = evidence_types.into_iter().next().unwrap();
            return self.fusion_strategies.get(&evidence_type)
                .cloned()
                .unwrap_or(FusionStrategy::WeightedAverage);
        }

        // For mixed evidence types, use consensus
        FusionStrategy::Consensus
    }

    /// Apply the selected fusion strategy
    fn apply_fusion_strategy(&self, strategy: FusionStrategy, evidence_set: &[EvidenceItem]) -> Result<f64> {
        match strategy {
            FusionStrategy::WeightedAverage => {
                let total_weight: f64 = evidence_set.iter().map(|e| e.confidence).sum();
                if total_weight == 0.0 {
                    return Ok(0.0);
                }
                let weighted_sum: f64 = evidence_set.iter()
                    .map(|e| e.confidence * e.confidence) // Weight by confidence
                    .sum();
                Ok(weighted_sum / total_weight)
            }
            FusionStrategy::HighestConfidence => {
                evidence_set.iter()
                    .map(|e| e.confidence)
                    .fold(0.0f64, f64::max)
            }
            FusionStrategy::Consensus => {
                let avg_confidence = evidence_set.iter()
                    .map(|e| e.confidence)
                    .sum::<f64>() / evidence_set.len() as f64;
                let consensus_threshold = 0.8;
                if evidence_set.iter().all(|e| e.confidence >= consensus_threshold) {
                    avg_confidence
                } else {
                    avg_confidence * 0.8 // Penalty for lack of consensus
                }
            }
            FusionStrategy::Strictest => {
                evidence_set.iter()
                    .map(|e| e.confidence)
                    .fold(1.0f64, f64::min)
            }
        }
    }

    /// Detect contradictions in the evidence set
    fn detect_contradictions(&self, evidence_set: &[EvidenceItem]) -> Result<Vec<EvidenceContradiction>> {
        let mut contradictions = Vec::new();

        for i in 0..evidence_set.len() {
            for j in (i + 1)..evidence_set.len() {
                let item1 = &evidence_set[i];
                let item2 = &evidence_set[j];

                // Check for direct contradictions in content
                if self.contents_contradict(item1, item2) {
                    contradictions.push(EvidenceContradiction {
                        evidence_pair: (item1.id.clone(), item2.id.clone()),
                        contradiction_type: ContradictionType::Direct,
                        severity: self.assess_contradiction_severity(item1, item2),
                        description: format!("Direct contradiction between {} and {}", item1.id, item2.id),
                    });
                }

                // Check for confidence discrepancies
                let confidence_diff = (item1.confidence - item2.confidence).abs();
                if confidence_diff > 0.7 {
                    contradictions.push(EvidenceContradiction {
                        evidence_pair: (item1.id.clone(), item2.id.clone()),
                        contradiction_type: ContradictionType::ConfidenceDisparity,
                        severity: if confidence_diff > 0.9 { Severity::High } else { Severity::Medium },
                        description: format!("Large confidence disparity: {:.2} vs {:.2}", item1.confidence, item2.confidence),
                    });
                }
            }
        }

        Ok(contradictions)
    }

    /// Check if two evidence contents directly contradict each other
    fn contents_contradict(&self, item1: &EvidenceItem, item2: &EvidenceItem) -> bool {
        let content1 = item1.content.to_lowercase();
        let content2 = item2.content.to_lowercase();

        // Simple contradiction detection based on keywords
        let positive_indicators = ["pass", "success", "valid", "correct", "true", "verified"];
        let negative_indicators = ["fail", "error", "invalid", "incorrect", "false", "rejected"];

        let item1_positive = positive_indicators.iter().any(|word| content1.contains(word));
        let item1_negative = negative_indicators.iter().any(|word| content1.contains(word));
        let item2_positive = positive_indicators.iter().any(|word| content2.contains(word));
        let item2_negative = negative_indicators.iter().any(|word| content2.contains(word));

        // Contradiction if one says positive and other says negative
        (item1_positive && item2_negative) || (item1_negative && item2_positive)
    }

    /// Assess the severity of a contradiction
    fn assess_contradiction_severity(&self, item1: &EvidenceItem, item2: &EvidenceItem) -> Severity {
        // Higher severity for same evidence type contradictions
        if item1.evidence_type == item2.evidence_type {
            Severity::High
        } else {
            Severity::Medium
        }
    }
}

/// Semantic integrator for meaning alignment across modalities
#[derive(Debug)]
pub struct SemanticIntegrator {
    /// Semantic concepts and their modality mappings
    semantic_concepts: HashMap<String, Vec<SemanticMapping>>,
}

impl SemanticIntegrator {
    /// Create a new semantic integrator
    pub async fn new() -> Result<Self> {
        let mut semantic_concepts = HashMap::new();

        // Initialize with common semantic concepts across modalities
        semantic_concepts.insert("performance".to_string(), vec![
            SemanticMapping {
                modality: Modality::Text,
                indicators: vec!["performance", "speed", "fast", "slow", "efficiency"].into_iter().map(String::from).collect(),
                confidence_weight: 0.8,
            },
            SemanticMapping {
                modality: Modality::Code,
                indicators: vec!["benchmark", "timing", "optimization", "profile"].into_iter().map(String::from).collect(),
                confidence_weight: 0.9,
            },
            SemanticMapping {
                modality: Modality::Data,
                indicators: vec!["latency", "throughput", "response_time", "tps", "qps"].into_iter().map(String::from).collect(),
                confidence_weight: 1.0,
            },
        ]);

        semantic_concepts.insert("security".to_string(), vec![
            SemanticMapping {
                modality: Modality::Text,
                indicators: vec!["security", "safe", "vulnerable", "attack", "encryption"].into_iter().map(String::from).collect(),
                confidence_weight: 0.8,
            },
            SemanticMapping {
                modality: Modality::Code,
                indicators: vec!["authentication", "authorization", "ssl", "tls", "oauth"].into_iter().map(String::from).collect(),
                confidence_weight: 0.9,
            },
            SemanticMapping {
                modality: Modality::Data,
                indicators: vec!["breach", "compliance", "audit", "penetration_test"].into_iter().map(String::from).collect(),
                confidence_weight: 1.0,
            },
        ]);

        Ok(Self { semantic_concepts })
    }

    /// Align semantic meaning across different modalities
    pub async fn align_semantics(&self, evidence_set: &[EvidenceItem]) -> Result<SemanticAlignmentResult> {
        let mut concept_alignments = Vec::new();
        let mut overall_alignment_score = 0.0;

        for (concept, mappings) in &self.semantic_concepts {
            if let Some(alignment) = self.align_concept(concept, mappings, evidence_set).await? {
                concept_alignments.push(alignment);
                overall_alignment_score += alignment.alignment_score;
            }
        }

        let average_alignment = if !concept_alignments.is_empty() {
            overall_alignment_score / concept_alignments.len() as f64
        } else {
            0.0
        };

        Ok(SemanticAlignmentResult {
            concept_alignments,
            overall_alignment_score: average_alignment,
            modality_coverage: self.calculate_modality_coverage(evidence_set),
            semantic_consistency: self.assess_semantic_consistency(&concept_alignments),
            timestamp: Utc::now(),
        })
    }

    /// Align a specific semantic concept across modalities
    async fn align_concept(&self, concept: &str, mappings: &[SemanticMapping], evidence_set: &[EvidenceItem]) -> Result<Option<ConceptAlignment>> {
        let mut modality_evidence = Vec::new();

        for mapping in mappings {
            let relevant_evidence: Vec<&EvidenceItem> = evidence_set.iter()
                .filter(|e| self.evidence_matches_modality(e, mapping.modality))
                .filter(|e| mapping.indicators.iter().any(|ind| e.content.to_lowercase().contains(ind)))
                .collect();

            if !relevant_evidence.is_empty() {
                modality_evidence.push(ModalityEvidence {
                    modality: mapping.modality,
                    evidence_count: relevant_evidence.len(),
                    average_confidence: relevant_evidence.iter().map(|e| e.confidence).sum::<f64>() / relevant_evidence.len() as f64,
                    semantic_strength: mapping.confidence_weight,
                });
            }
        }

        if modality_evidence.is_empty() {
            return Ok(None);
        }

        let alignment_score = modality_evidence.iter()
            .map(|me| me.average_confidence * me.semantic_strength)
            .sum::<f64>() / modality_evidence.len() as f64;

        Ok(Some(ConceptAlignment {
            concept: concept.to_string(),
            modality_evidence,
            alignment_score,
            cross_modal_consistency: self.check_cross_modal_consistency(&modality_evidence),
        }))
    }

    /// Check if evidence item matches a modality
    fn evidence_matches_modality(&self, evidence: &EvidenceItem, modality: Modality) -> bool {
        match modality {
            Modality::Text => matches!(evidence.evidence_type,
                EvidenceType::CodeAnalysis | EvidenceType::StandardsCompliance),
            Modality::Code => matches!(evidence.evidence_type, EvidenceType::CodeAnalysis),
            Modality::Data => matches!(evidence.evidence_type,
                EvidenceType::Benchmarking | EvidenceType::Profiling | EvidenceType::LoadTesting),
            Modality::Visual => evidence.content.contains("image") || evidence.content.contains("chart"),
            Modality::Audio => evidence.content.contains("audio") || evidence.content.contains("speech"),
        }
    }

    /// Check cross-modal consistency within concept alignment
    fn check_cross_modal_consistency(&self, modality_evidence: &[ModalityEvidence]) -> f64 {
        if modality_evidence.len() < 2 {
            return 1.0; // Single modality is consistent by definition
        }

        let avg_confidence = modality_evidence.iter()
            .map(|me| me.average_confidence)
            .sum::<f64>() / modality_evidence.len() as f64;

        let variance = modality_evidence.iter()
            .map(|me| (me.average_confidence - avg_confidence).powi(2))
            .sum::<f64>() / modality_evidence.len() as f64;

        // Lower variance = higher consistency (scale to 0-1)
        1.0 / (1.0 + variance.sqrt())
    }

    /// Calculate modality coverage across evidence set
    fn calculate_modality_coverage(&self, evidence_set: &[EvidenceItem]) -> HashMap<Modality, usize> {
        let mut coverage = HashMap::new();

        for evidence in evidence_set {
            for modality in &[Modality::Text, Modality::Code, Modality::Data, Modality::Visual, Modality::Audio] {
                if self.evidence_matches_modality(evidence, *modality) {
                    *coverage.entry(*modality).or_insert(0) += 1;
                }
            }
        }

        coverage
    }

    /// Assess overall semantic consistency
    fn assess_semantic_consistency(&self, alignments: &[ConceptAlignment]) -> f64 {
        if alignments.is_empty() {
            return 0.0;
        }

        let avg_alignment = alignments.iter()
            .map(|a| a.alignment_score)
            .sum::<f64>() / alignments.len() as f64;

        let consistency_score = alignments.iter()
            .map(|a| a.cross_modal_consistency)
            .sum::<f64>() / alignments.len() as f64;

        (avg_alignment + consistency_score) / 2.0
    }
}

// Tool implementations
#[async_trait::async_trait]
impl Tool for CrossModalCorrelationEngine {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            id: "cross_modal_correlation".to_string(),
            name: "Cross-Modal Correlation Engine".to_string(),
            description: "Correlates evidence across different modalities for comprehensive verification".to_string(),
            category: ToolCategory::Analysis,
            version: "1.0.0".to_string(),
            capabilities: vec![
                "evidence_correlation".to_string(),
                "modality_mapping".to_string(),
                "semantic_similarity".to_string(),
            ],
        }
    }

    async fn execute(&self, input: serde_json::Value) -> Result<serde_json::Value> {
        // Parse evidence set from input
        let evidence_set: Vec<EvidenceItem> = serde_json::from_value(input)?;
        let result = self.correlate_evidence(&evidence_set).await?;
        Ok(serde_json::to_value(result)?)
    }
}

#[async_trait::async_trait]
impl Tool for EvidenceFusionValidator {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            id: "evidence_fusion_validator".to_string(),
            name: "Evidence Fusion Validator".to_string(),
            description: "Fuses multiple evidence sources into unified verification results".to_string(),
            category: ToolCategory::Validation,
            version: "1.0.0".to_string(),
            capabilities: vec![
                "evidence_fusion".to_string(),
                "contradiction_detection".to_string(),
                "consensus_analysis".to_string(),
            ],
        }
    }

    async fn execute(&self, input: serde_json::Value) -> Result<serde_json::Value> {
        let (evidence_set, claim): (Vec<EvidenceItem>, AtomicClaim) = serde_json::from_value(input)?;
        let result = self.fuse_evidence(&evidence_set, &claim).await?;
        Ok(serde_json::to_value(result)?)
    }
}

#[async_trait::async_trait]
impl Tool for SemanticIntegrator {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            id: "semantic_integrator".to_string(),
            name: "Semantic Integrator".to_string(),
            description: "Aligns semantic meaning across different modalities".to_string(),
            category: ToolCategory::Analysis,
            version: "1.0.0".to_string(),
            capabilities: vec![
                "semantic_alignment".to_string(),
                "modality_integration".to_string(),
                "concept_mapping".to_string(),
            ],
        }
    }

    async fn execute(&self, input: serde_json::Value) -> Result<serde_json::Value> {
        let evidence_set: Vec<EvidenceItem> = serde_json::from_value(input)?;
        let result = self.align_semantics(&evidence_set).await?;
        Ok(serde_json::to_value(result)?)
    }
}

// Data structures

/// Result of cross-modal evidence correlation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub correlations: Vec<EvidenceCorrelation>,
    pub overall_confidence: f64,
    pub correlation_strength: CorrelationStrength,
    pub timestamp: DateTime<Utc>,
}

/// Individual evidence correlation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceCorrelation {
    pub evidence_pair: (String, String),
    pub correlation_type: CorrelationType,
    pub confidence: f64,
    pub supporting_factors: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Type of correlation between evidence items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CorrelationType {
    Causal,
    Supporting,
    Validation,
    Contradictory,
    Related,
}

/// Strength of overall correlation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CorrelationStrength {
    Weak,
    Moderate,
    Strong,
}

/// Result of evidence fusion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusionResult {
    pub fused_confidence: f64,
    pub fusion_method: String,
    pub evidence_count: usize,
    pub consensus_reached: bool,
    pub contradictions: Vec<EvidenceContradiction>,
    pub timestamp: DateTime<Utc>,
}

/// Evidence contradiction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceContradiction {
    pub evidence_pair: (String, String),
    pub contradiction_type: ContradictionType,
    pub severity: Severity,
    pub description: String,
}

/// Type of contradiction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ContradictionType {
    Direct,
    ConfidenceDisparity,
    TemporalInconsistency,
}

/// Severity level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Fusion strategy for evidence combination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FusionStrategy {
    WeightedAverage,
    HighestConfidence,
    Consensus,
    Strictest,
}

/// Result of semantic alignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticAlignmentResult {
    pub concept_alignments: Vec<ConceptAlignment>,
    pub overall_alignment_score: f64,
    pub modality_coverage: HashMap<Modality, usize>,
    pub semantic_consistency: f64,
    pub timestamp: DateTime<Utc>,
}

/// Alignment of a semantic concept across modalities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptAlignment {
    pub concept: String,
    pub modality_evidence: Vec<ModalityEvidence>,
    pub alignment_score: f64,
    pub cross_modal_consistency: f64,
}

/// Evidence in a specific modality
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModalityEvidence {
    pub modality: Modality,
    pub evidence_count: usize,
    pub average_confidence: f64,
    pub semantic_strength: f64,
}

/// Semantic mapping for a concept in a modality
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticMapping {
    pub modality: Modality,
    pub indicators: Vec<String>,
    pub confidence_weight: f64,
}

/// Modality types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    Text,
    Code,
    Data,
    Visual,
    Audio,
}
