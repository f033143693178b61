//! Semantic analysis and synonym generation
//!
//! This module handles semantic parsing, intent analysis, and synonym generation.

use std::collections::HashMap;
use anyhow::Result;

/// Semantic analyzer for meaning extraction
pub struct SemanticAnalyzer;

impl SemanticAnalyzer {
    /// Analyze semantic content and intent
    pub async fn analyze_semantics(&self, _text: &str) -> Result<SemanticAnalysis> {
        // TODO: Implement semantic analysis
        Ok(SemanticAnalysis {
            intent: "placeholder".to_string(),
            synonyms: vec![],
            semantic_score: 0.5,
        })
    }

    /// Generate synonyms for a term
    pub fn generate_synonyms(&self, _term: &str) -> Vec<String> {
        // TODO: Implement synonym generation
        vec![]
    }
}

/// Semantic analysis result
pub struct SemanticAnalysis {
    pub intent: String,
    pub synonyms: Vec<String>,
    pub semantic_score: f64,
}
