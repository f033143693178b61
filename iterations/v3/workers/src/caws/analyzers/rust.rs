//! Rust language analyzer for CAWS
//!
//! This module provides Rust-specific code analysis including
//! complexity calculation, violation detection, and best practices checking.

use super::LanguageAnalyzer;
use crate::caws::language_types::{LanguageAnalysisResult, ProgrammingLanguage, ViolationSeverity, LanguageViolation, LanguageWarning, SourceLocation};
use std::collections::HashMap;

/// Rust-specific analyzer
#[derive(Debug)]
pub struct RustAnalyzer;

impl RustAnalyzer {
    /// Create a new Rust analyzer
    pub fn new() -> Self {
        Self
    }
}

impl LanguageAnalyzer for RustAnalyzer {
    fn analyze(&self, code: &str, file_path: &str) -> LanguageAnalysisResult {
        // TODO: Implement actual Rust analysis
        LanguageAnalysisResult {
            language: ProgrammingLanguage::Rust,
            complexity_score: 0.0,
            violations: vec![],
            warnings: vec![],
            metrics: HashMap::new(),
        }
    }

    fn language(&self) -> ProgrammingLanguage {
        ProgrammingLanguage::Rust
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext, "rs")
    }
}



