//! Mistral LLM inference execution
//!
//! This module provides the inference execution logic for Mistral models,
//! including text generation, constitutional reasoning, and debate protocols.

use crate::ane::errors::{ANEError, Result};
use crate::ane::models::mistral_model::{MistralModel, reasoning_templates};
use crate::telemetry::TelemetryCollector;
use std::time::Instant;

/// Inference options for Mistral models
#[derive(Debug, Clone)]
pub struct MistralInferenceOptions {
    pub max_tokens: usize,
    pub temperature: f32,
    pub top_p: f32,
    pub timeout_ms: u64,
    pub use_kv_cache: bool,
}

impl Default for MistralInferenceOptions {
    fn default() -> Self {
        Self {
            max_tokens: 100,
            temperature: 0.7,
            top_p: 0.9,
            timeout_ms: 30000, // 30 seconds
            use_kv_cache: true,
        }
    }
}

/// Constitutional reasoning result
#[derive(Debug, Clone)]
pub struct ConstitutionalVerdict {
    pub compliance_level: ComplianceLevel,
    pub risk_assessment: RiskTier,
    pub key_concerns: Vec<String>,
    pub recommendations: Vec<String>,
    pub verdict: Verdict,
    pub justification: String,
    pub confidence_score: f32,
}

/// Compliance levels
#[derive(Debug, Clone, PartialEq)]
pub enum ComplianceLevel {
    Full,
    Partial,
    None,
}

/// Risk tiers
#[derive(Debug, Clone, PartialEq)]
pub enum RiskTier {
    Tier1,
    Tier2,
    Tier3,
}

/// Verdict types
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Approve,
    Modify,
    Reject,
}

/// Debate argument result
#[derive(Debug, Clone)]
pub struct DebateArgument {
    pub position: DebatePosition,
    pub argument: String,
    pub evidence_citations: Vec<String>,
    pub confidence_level: ConfidenceLevel,
}

/// Debate positions
#[derive(Debug, Clone, PartialEq)]
pub enum DebatePosition {
    Support,
    Challenge,
}

/// Confidence levels
#[derive(Debug, Clone, PartialEq)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

/// Execute constitutional reasoning with Mistral model
pub async fn deliberate_constitution(
    model: &mut MistralModel,
    task_spec: &str,
    evidence: &[String],
    debate_history: &[String],
    options: &MistralInferenceOptions,
) -> Result<ConstitutionalVerdict> {
    let start_time = Instant::now();

    // Generate constitutional analysis prompt
    let prompt = reasoning_templates::format_constitutional_analysis(
        task_spec,
        evidence,
        debate_history,
    )?;

    // Execute inference
    let response = generate_text(model, &prompt, options).await?;

    // Parse structured response
    let verdict = parse_constitutional_verdict(&response)?;

    // Update access time
    if let Ok(mut last_accessed) = model.last_accessed.lock() {
        *last_accessed = Instant::now();
    }

    // Record telemetry
    let duration = start_time.elapsed();
    model.telemetry.record_inference(duration.as_millis() as u64, true, "mistral_constitutional");

    Ok(verdict)
}

/// Generate debate argument with Mistral model
pub async fn generate_debate_argument(
    model: &mut MistralModel,
    debate_topic: &str,
    previous_arguments: &[String],
    evidence: &[String],
    options: &MistralInferenceOptions,
) -> Result<DebateArgument> {
    let start_time = Instant::now();

    // Generate debate argument prompt
    let prompt = reasoning_templates::format_debate_argument(
        debate_topic,
        previous_arguments,
        evidence,
    )?;

    // Execute inference
    let response = generate_text(model, &prompt, options).await?;

    // Parse structured response
    let argument = parse_debate_argument(&response)?;

    // Update access time
    if let Ok(mut last_accessed) = model.last_accessed.lock() {
        *last_accessed = Instant::now();
    }

    // Record telemetry
    let duration = start_time.elapsed();
    model.telemetry.record_inference(duration.as_millis() as u64, true, "mistral_debate");

    Ok(argument)
}

/// Generate text with Mistral model
pub async fn generate_text(
    model: &mut MistralModel,
    prompt: &str,
    options: &MistralInferenceOptions,
) -> Result<String> {
    let start_time = Instant::now();
    
    // Check if prompt fits in context
    if !model.tokenizer.fits_context(prompt, model.schema.context_length)? {
        return Err(ANEError::InvalidInput(
            format!("Prompt too long for context window ({} tokens)",
                model.schema.context_length)
        ));
    }

    // Encode prompt
    let mut tokens = model.tokenizer.encode(prompt)?;

    // Generate tokens
    let mut generated_tokens = Vec::new();

    for _ in 0..options.max_tokens {
        // Check timeout
        if start_time.elapsed().as_millis() > options.timeout_ms as u128 {
            break;
        }

        // Prepare input for model
        let input_tokens = prepare_model_input(&tokens, &model.schema)?;

        // Run inference (placeholder - needs actual CoreML integration)
        let next_token = run_inference_step(model, &input_tokens).await?;

        // Add to generated tokens
        generated_tokens.push(next_token);
        tokens.push(next_token);

        // Update KV cache if enabled
        if options.use_kv_cache {
            if let Ok(mut kv_cache) = model.kv_cache.lock() {
                kv_cache.update(&tokens); // Update with current tokens
            }
        }

        // Check for end token
        if next_token == model.tokenizer.vocab_size()? - 1 { // EOS token
            break;
        }

        // Apply sampling (simplified greedy for now)
        // TODO: Implement temperature and top-p sampling
    }

    // Decode generated tokens
    model.tokenizer.decode(&generated_tokens)
}

/// Prepare model input from tokens
fn prepare_model_input(tokens: &[i32], schema: &crate::ane::models::mistral_model::ModelSchema) -> Result<Vec<i32>> {
    // Ensure tokens fit in context window
    let max_length = schema.context_length;
    if tokens.len() > max_length {
        return Err(ANEError::InvalidInput(
            format!("Token sequence too long: {} > {}", tokens.len(), max_length)
        ));
    }

    // Pad or truncate as needed
    let mut input_tokens = tokens.to_vec();

    // Ensure minimum length for model
    if input_tokens.len() < schema.inputs[0].shape[1] {
        // Pad with zeros (simplified - should pad with EOS or specific token)
        input_tokens.resize(schema.inputs[0].shape[1], 0);
    }

    Ok(input_tokens)
}

/// Run single inference step (placeholder for actual CoreML integration)
async fn run_inference_step(_model: &MistralModel, _input_tokens: &[i32]) -> Result<i32> {
    // TODO: Implement actual CoreML inference
    // This should call the CoreML bridge to run inference

    // Placeholder: return a simple token
    // In reality, this would:
    // 1. Convert tokens to MLMultiArray
    // 2. Create MLFeatureProvider
    // 3. Call model.prediction()
    // 4. Extract logits and sample next token

    Err(ANEError::NotImplemented("Mistral inference not yet implemented".to_string()))
}

/// Parse constitutional verdict from model response
fn parse_constitutional_verdict(response: &str) -> Result<ConstitutionalVerdict> {
    // Parse structured response format
    let compliance_level = parse_compliance_level(response)?;
    let risk_assessment = parse_risk_tier(response)?;
    let key_concerns = parse_key_concerns(response)?;
    let recommendations = parse_recommendations(response)?;
    let verdict = parse_verdict(response)?;
    let justification = parse_justification(response)?;
    let confidence_score = parse_confidence_score(response)?;

    Ok(ConstitutionalVerdict {
        compliance_level,
        risk_assessment,
        key_concerns,
        recommendations,
        verdict,
        justification,
        confidence_score,
    })
}

/// Parse debate argument from model response
fn parse_debate_argument(response: &str) -> Result<DebateArgument> {
    let position = parse_debate_position(response)?;
    let argument = parse_argument_text(response)?;
    let evidence_citations = parse_evidence_citations(response)?;
    let confidence_level = parse_confidence_level(response)?;

    Ok(DebateArgument {
        position,
        argument,
        evidence_citations,
        confidence_level,
    })
}

// Parsing helper functions
fn parse_compliance_level(response: &str) -> Result<ComplianceLevel> {
    if response.contains("COMPLIANCE_LEVEL: FULL") {
        Ok(ComplianceLevel::Full)
    } else if response.contains("COMPLIANCE_LEVEL: PARTIAL") {
        Ok(ComplianceLevel::Partial)
    } else if response.contains("COMPLIANCE_LEVEL: NONE") {
        Ok(ComplianceLevel::None)
    } else {
        Ok(ComplianceLevel::Partial) // Default
    }
}

fn parse_risk_tier(response: &str) -> Result<RiskTier> {
    if response.contains("RISK_ASSESSMENT: TIER_1") {
        Ok(RiskTier::Tier1)
    } else if response.contains("RISK_ASSESSMENT: TIER_2") {
        Ok(RiskTier::Tier2)
    } else if response.contains("RISK_ASSESSMENT: TIER_3") {
        Ok(RiskTier::Tier3)
    } else {
        Ok(RiskTier::Tier2) // Default
    }
}

fn parse_key_concerns(response: &str) -> Result<Vec<String>> {
    // Extract concerns from KEY_CONCERNS section
    extract_list_section(response, "KEY_CONCERNS:")
}

fn parse_recommendations(response: &str) -> Result<Vec<String>> {
    // Extract recommendations from RECOMMENDATIONS section
    extract_list_section(response, "RECOMMENDATIONS:")
}

fn parse_verdict(response: &str) -> Result<Verdict> {
    if response.contains("VERDICT: APPROVE") {
        Ok(Verdict::Approve)
    } else if response.contains("VERDICT: MODIFY") {
        Ok(Verdict::Modify)
    } else if response.contains("VERDICT: REJECT") {
        Ok(Verdict::Reject)
    } else {
        Ok(Verdict::Modify) // Default
    }
}

fn parse_justification(response: &str) -> Result<String> {
    extract_section(response, "JUSTIFICATION:")
}

fn parse_confidence_score(response: &str) -> Result<f32> {
    // Extract confidence score (default 0.8 if not found)
    if response.contains("HIGH") {
        Ok(0.9)
    } else if response.contains("MEDIUM") {
        Ok(0.7)
    } else if response.contains("LOW") {
        Ok(0.5)
    } else {
        Ok(0.8)
    }
}

fn parse_debate_position(response: &str) -> Result<DebatePosition> {
    if response.contains("POSITION: SUPPORT") {
        Ok(DebatePosition::Support)
    } else if response.contains("POSITION: CHALLENGE") {
        Ok(DebatePosition::Challenge)
    } else {
        Ok(DebatePosition::Support) // Default
    }
}

fn parse_argument_text(response: &str) -> Result<String> {
    extract_section(response, "ARGUMENT:")
}

fn parse_evidence_citations(response: &str) -> Result<Vec<String>> {
    extract_list_section(response, "EVIDENCE_CITATIONS:")
}

fn parse_confidence_level(response: &str) -> Result<ConfidenceLevel> {
    if response.contains("CONFIDENCE_LEVEL: HIGH") {
        Ok(ConfidenceLevel::High)
    } else if response.contains("CONFIDENCE_LEVEL: MEDIUM") {
        Ok(ConfidenceLevel::Medium)
    } else if response.contains("CONFIDENCE_LEVEL: LOW") {
        Ok(ConfidenceLevel::Low)
    } else {
        Ok(ConfidenceLevel::Medium) // Default
    }
}

// Utility functions for parsing
fn extract_section(response: &str, section_header: &str) -> Result<String> {
    if let Some(start) = response.find(section_header) {
        let start_idx = start + section_header.len();
        let remaining = &response[start_idx..];

        // Find next section or end
        let end_patterns = [
            "\nCOMPLIANCE_LEVEL:",
            "\nRISK_ASSESSMENT:",
            "\nKEY_CONCERNS:",
            "\nRECOMMENDATIONS:",
            "\nVERDICT:",
            "\nJUSTIFICATION:",
            "\nPOSITION:",
            "\nARGUMENT:",
            "\nEVIDENCE_CITATIONS:",
            "\nCONFIDENCE_LEVEL:",
        ];

        let mut end_idx = remaining.len();
        for pattern in &end_patterns {
            if let Some(pos) = remaining.find(pattern) {
                end_idx = end_idx.min(pos);
            }
        }

        Ok(remaining[..end_idx].trim().to_string())
    } else {
        Ok(String::new())
    }
}

fn extract_list_section(response: &str, section_header: &str) -> Result<Vec<String>> {
    let section = extract_section(response, section_header)?;
    let items: Vec<String> = section
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inference_options_default() {
        let options = MistralInferenceOptions::default();
        assert_eq!(options.max_tokens, 100);
        assert_eq!(options.temperature, 0.7);
        assert_eq!(options.top_p, 0.9);
        assert_eq!(options.timeout_ms, 30000);
        assert!(options.use_kv_cache);
    }

    #[test]
    fn test_parse_compliance_level() {
        assert_eq!(
            parse_compliance_level("COMPLIANCE_LEVEL: FULL").unwrap(),
            ComplianceLevel::Full
        );
        assert_eq!(
            parse_compliance_level("COMPLIANCE_LEVEL: PARTIAL").unwrap(),
            ComplianceLevel::Partial
        );
        assert_eq!(
            parse_compliance_level("COMPLIANCE_LEVEL: NONE").unwrap(),
            ComplianceLevel::None
        );
    }

    #[test]
    fn test_parse_risk_tier() {
        assert_eq!(
            parse_risk_tier("RISK_ASSESSMENT: TIER_1").unwrap(),
            RiskTier::Tier1
        );
        assert_eq!(
            parse_risk_tier("RISK_ASSESSMENT: TIER_2").unwrap(),
            RiskTier::Tier2
        );
        assert_eq!(
            parse_risk_tier("RISK_ASSESSMENT: TIER_3").unwrap(),
            RiskTier::Tier3
        );
    }

    #[test]
    fn test_parse_verdict() {
        assert_eq!(
            parse_verdict("VERDICT: APPROVE").unwrap(),
            Verdict::Approve
        );
        assert_eq!(
            parse_verdict("VERDICT: MODIFY").unwrap(),
            Verdict::Modify
        );
        assert_eq!(
            parse_verdict("VERDICT: REJECT").unwrap(),
            Verdict::Reject
        );
    }

    #[test]
    fn test_parse_debate_position() {
        assert_eq!(
            parse_debate_position("POSITION: SUPPORT").unwrap(),
            DebatePosition::Support
        );
        assert_eq!(
            parse_debate_position("POSITION: CHALLENGE").unwrap(),
            DebatePosition::Challenge
        );
    }

    #[test]
    fn test_extract_section() {
        let response = "VERDICT: APPROVE\nJUSTIFICATION: Good work\nKEY_CONCERNS: None";
        assert_eq!(
            extract_section(response, "JUSTIFICATION:").unwrap(),
            "Good work"
        );
    }

    #[test]
    fn test_extract_list_section() {
        let response = "KEY_CONCERNS:\n- Issue 1\n- Issue 2\nRECOMMENDATIONS: Fix it";
        let concerns = extract_list_section(response, "KEY_CONCERNS:").unwrap();
        assert_eq!(concerns.len(), 2);
        assert_eq!(concerns[0], "- Issue 1");
        assert_eq!(concerns[1], "- Issue 2");
    }
}
