//! Context Builder
//!
//! Synthesizes context from research results and builds coherent knowledge representations.

use crate::types::*;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Context builder for synthesizing research results
#[derive(Debug)]
pub struct ContextBuilder {
    config: ContextSynthesisConfig,
    cache: Arc<RwLock<std::collections::HashMap<String, SynthesizedContext>>>,
}

impl ContextBuilder {
    /// Create a new context builder
    pub fn new(config: ContextSynthesisConfig) -> Self {
        Self {
            config,
            cache: Arc::new(RwLock::new(std::collections::HashMap::new())),
        }
    }

    /// Synthesize context from research results
    pub async fn synthesize_context(
        &self,
        query_id: Uuid,
        results: Vec<ResearchResult>,
    ) -> Result<SynthesizedContext> {
        info!("Synthesizing context for query: {}", query_id);

        // TODO: Implement actual context synthesis
        let synthesized_context = SynthesizedContext {
            id: Uuid::new_v4(),
            query_id,
            context_summary: "Synthesized context placeholder".to_string(),
            key_findings: vec!["Key finding 1".to_string(), "Key finding 2".to_string()],
            supporting_evidence: results,
            confidence_score: 0.8,
            synthesized_at: chrono::Utc::now(),
            sources: vec![],
            cross_references: vec![],
        };

        info!("Context synthesis completed for query: {}", query_id);
        Ok(synthesized_context)
    }

    /// Clear synthesis cache
    pub async fn clear_cache(&self) {
        let mut cache = self.cache.write().await;
        cache.clear();
        info!("Context synthesis cache cleared");
    }
}
