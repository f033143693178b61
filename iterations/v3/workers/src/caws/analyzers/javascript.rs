//! JavaScript language analyzer for CAWS
//!
//! This module provides JavaScript-specific code analysis including
//! complexity calculation, violation detection, and best practices checking.

use super::LanguageAnalyzer;
use crate::caws::language_types::{LanguageAnalysisResult, ProgrammingLanguage, ViolationSeverity, LanguageViolation, LanguageWarning, SourceLocation};
use anyhow::Result;
use std::collections::HashMap;

/// JavaScript-specific analyzer
#[derive(Debug)]
pub struct JavaScriptAnalyzer;

impl JavaScriptAnalyzer {
    /// Create a new JavaScript analyzer
    pub fn new() -> Self {
        Self
    }
}

impl LanguageAnalyzer for JavaScriptAnalyzer {
    fn analyze(&self, code: &str, file_path: &str) -> LanguageAnalysisResult {
        // TODO: Implement actual JavaScript analysis
        LanguageAnalysisResult {
            language: ProgrammingLanguage::JavaScript,
            complexity_score: 0.0,
            violations: vec![],
            warnings: vec![],
            metrics: HashMap::new(),
        }
    }

    fn language(&self) -> ProgrammingLanguage {
        ProgrammingLanguage::JavaScript
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext, "js" | "jsx" | "mjs" | "cjs")
    }

    fn analyze_file_modification(
        &self,
        modification: &super::CouncilFileModification,
    ) -> Result<LanguageAnalysisResult> {
        // TODO: Implement file modification analysis
        Ok(LanguageAnalysisResult {
            language: ProgrammingLanguage::JavaScript,
            complexity_score: 0.0,
            violations: vec![],
            warnings: vec![],
            metrics: HashMap::new(),
        })
    }

    fn calculate_change_complexity(
        &self,
        diff: &str,
        content: Option<&str>,
    ) -> Result<super::ChangeComplexity> {
        // TODO: Implement change complexity calculation
        Ok(super::ChangeComplexity {
            cyclomatic_complexity: 0,
            cognitive_complexity: 0,
            nesting_depth: 0,
            parameter_count: 0,
            line_count: 0,
            total_score: 0.0,
        })
    }
}



