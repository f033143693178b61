//! Authority attribution and validation logic
//!
//! This module handles source credibility, authority scoring, and trust assessment.

use std::collections::HashMap;
use anyhow::Result;

/// Authority validator for source credibility assessment
pub struct AuthorityValidator;

impl AuthorityValidator {
    /// Validate authority attribution and source credibility
    pub async fn validate_authority(&self, _claim: &str, _sources: &[String]) -> Result<AuthorityValidation> {
        // TODO: Implement authority validation logic
        Ok(AuthorityValidation {
            overall_score: 0.5,
            source_scores: HashMap::new(),
            credibility_assessment: "placeholder".to_string(),
        })
    }
}

/// Authority validation result
pub struct AuthorityValidation {
    pub overall_score: f64,
    pub source_scores: HashMap<String, f64>,
    pub credibility_assessment: String,
}
