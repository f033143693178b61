//! TypeScript language analyzer for CAWS
//!
//! This module provides TypeScript-specific code analysis including
//! type checking, complexity calculation, and best practices validation.

use super::LanguageAnalyzer;
use crate::caws::language_types::{LanguageAnalysisResult, ProgrammingLanguage, ViolationSeverity, LanguageViolation, LanguageWarning, SourceLocation};
use std::collections::HashMap;

/// TypeScript-specific analyzer
#[derive(Debug)]
pub struct TypeScriptAnalyzer;

impl TypeScriptAnalyzer {
    /// Create a new TypeScript analyzer
    pub fn new() -> Self {
        Self
    }
}

impl LanguageAnalyzer for TypeScriptAnalyzer {
    fn analyze(&self, code: &str, file_path: &str) -> LanguageAnalysisResult {
        // TODO: Implement actual TypeScript analysis
        LanguageAnalysisResult {
            language: ProgrammingLanguage::TypeScript,
            complexity_score: 0.0,
            violations: vec![],
            warnings: vec![],
            metrics: HashMap::new(),
        }
    }

    fn language(&self) -> ProgrammingLanguage {
        ProgrammingLanguage::TypeScript
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext, "ts" | "tsx")
    }
}
