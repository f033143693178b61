//! Specification discovery, coverage and relevance analysis
//!
//! This module handles specification analysis and relevance assessment.

use anyhow::Result;
use crate::verification::types::*;

/// Specification analyzer
pub struct SpecAnalyzer;

impl SpecAnalyzer {
    /// Analyze specification coverage and relevance
    pub async fn analyze_specification(&self, _content: &str, _specs: &[String]) -> Result<SpecAnalysisResult> {
        // TODO: Implement specification analysis
        Ok(SpecAnalysisResult {
            coverage_score: 0.5,
            relevant_specs: vec![],
            gaps: vec![],
        })
    }
}

/// Specification analysis result
pub struct SpecAnalysisResult {
    pub coverage_score: f64,
    pub relevant_specs: Vec<String>,
    pub gaps: Vec<String>,
}
