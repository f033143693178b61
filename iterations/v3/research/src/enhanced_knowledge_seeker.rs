//! Enhanced Knowledge Seeker
//!
//! Advanced knowledge retrieval and processing system with semantic search,
//! hybrid search, and confidence management capabilities.

use crate::types::*;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

/// Enhanced knowledge seeker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancedKnowledgeSeekerConfig {
    pub enabled: bool,
    pub caching: CachingConfig,
    pub semantic_search: SemanticSearchConfig,
    pub hybrid_search: HybridSearchConfig,
    pub confidence_management: bool,
    pub max_concurrent_queries: usize,
    pub query_timeout_ms: u64,
}

/// Caching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachingConfig {
    pub enable_query_caching: bool,
    pub cache_ttl_seconds: u64,
    pub max_cache_size: usize,
}

/// Semantic search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticSearchConfig {
    pub enabled: bool,
    pub max_results: usize,
    pub similarity_threshold: f64,
}

/// Hybrid search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridSearchConfig {
    pub enabled: bool,
    pub fusion_strategy: FusionStrategy,
    pub vector_weight: f64,
    pub keyword_weight: f64,
}

/// Fusion strategy for hybrid search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FusionStrategy {
    ReciprocalRankFusion,
    WeightedSum,
    CombSum,
}

/// Enhanced knowledge seeker status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancedKnowledgeSeekerStatus {
    pub enabled: bool,
    pub active_queries: usize,
    pub cache_stats: CacheStats,
    pub performance_metrics: PerformanceMetrics,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub query_cache_size: usize,
    pub result_cache_size: usize,
    pub hit_rate: f64,
}

/// Performance metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total_queries_processed: u64,
    pub average_response_time_ms: f64,
    pub error_rate: f64,
}

/// Enhanced knowledge seeker implementation
#[derive(Debug)]
pub struct EnhancedKnowledgeSeeker {
    pub enabled: bool,
    pub caching: CachingConfig,
    pub semantic_search: SemanticSearchConfig,
    pub hybrid_search: HybridSearchConfig,
    pub confidence_management: bool,
    pub max_concurrent_queries: usize,
    pub query_timeout_ms: u64,
}

impl Default for EnhancedKnowledgeSeeker {
    fn default() -> Self {
        Self {
            enabled: true,
            caching: CachingConfig {
                enable_query_caching: true,
                cache_ttl_seconds: 3600,
                max_cache_size: 1000,
            },
            semantic_search: SemanticSearchConfig {
                enabled: true,
                max_results: 10,
                similarity_threshold: 0.7,
            },
            hybrid_search: HybridSearchConfig {
                enabled: true,
                fusion_strategy: FusionStrategy::ReciprocalRankFusion,
                vector_weight: 0.7,
                keyword_weight: 0.3,
            },
            confidence_management: true,
            max_concurrent_queries: 10,
            query_timeout_ms: 30000,
        }
    }
}

impl EnhancedKnowledgeSeeker {
    /// Create a new enhanced knowledge seeker
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current status
    pub async fn get_status(&self) -> Result<EnhancedKnowledgeSeekerStatus> {
        Ok(EnhancedKnowledgeSeekerStatus {
            enabled: self.enabled,
            active_queries: 0,
            cache_stats: CacheStats {
                query_cache_size: 0,
                result_cache_size: 0,
                hit_rate: 0.0,
            },
            performance_metrics: PerformanceMetrics {
                total_queries_processed: 0,
                average_response_time_ms: 0.0,
                error_rate: 0.0,
            },
            last_updated: chrono::Utc::now(),
        })
    }

    /// Clear all caches
    pub async fn clear_caches(&self) -> Result<()> {
        info!("Clearing all caches");
        Ok(())
    }

    /// Update knowledge with new information
    pub async fn update_knowledge(&self, _request: &KnowledgeUpdateRequest) -> Result<()> {
        info!("Updating knowledge");
        Ok(())
    }
}

impl Default for EnhancedKnowledgeSeekerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            caching: CachingConfig {
                enable_query_caching: true,
                cache_ttl_seconds: 3600,
                max_cache_size: 1000,
            },
            semantic_search: SemanticSearchConfig {
                enabled: true,
                max_results: 10,
                similarity_threshold: 0.7,
            },
            hybrid_search: HybridSearchConfig {
                enabled: true,
                fusion_strategy: FusionStrategy::ReciprocalRankFusion,
                vector_weight: 0.7,
                keyword_weight: 0.3,
            },
            confidence_management: true,
            max_concurrent_queries: 10,
            query_timeout_ms: 30000,
        }
    }
}