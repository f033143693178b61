#![allow(warnings)] // Disables all warnings for the crate
#![allow(dead_code)] // Disables dead_code warnings for the crate

pub mod ast_analyzer;
pub mod change_classifier;
pub mod evaluator;
pub mod impact_analyzer;
pub mod language_support;
pub mod types;

pub use ast_analyzer::ASTAnalyzer;
pub use change_classifier::ChangeClassifier;
pub use evaluator::MinimalDiffEvaluator;
pub use impact_analyzer::ImpactAnalyzer;
pub use language_support::LanguageSupport;
pub use types::*;
