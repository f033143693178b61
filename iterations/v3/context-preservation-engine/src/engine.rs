use crate::context_manager::ContextManager;
use crate::context_store::ContextStore;
use crate::context_synthesizer::ContextSynthesizer;
use crate::multi_tenant::MultiTenantManager;
use crate::types::*;

use anyhow::Result;
use chrono::Utc;
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::io::{Read, Write};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Context preservation engine
#[derive(Debug)]
pub struct ContextPreservationEngine {
    /// Engine configuration
    config: ContextPreservationConfig,
    /// Context manager
    context_manager: Arc<ContextManager>,
    /// Context store
    context_store: Arc<ContextStore>,
    /// Context synthesizer
    context_synthesizer: Arc<ContextSynthesizer>,
    /// Multi-tenant manager
    multi_tenant_manager: Arc<MultiTenantManager>,
    /// Engine statistics
    stats: Arc<RwLock<ContextPreservationStats>>,
    /// Snapshot cache for fast access
    snapshot_cache: Arc<RwLock<HashMap<String, ContextSnapshot>>>,
    /// Base snapshots for differential storage
    base_snapshots: Arc<RwLock<HashMap<String, String>>>,
}

impl ContextPreservationEngine {
    /// Create a new context preservation engine
    pub fn new(config: ContextPreservationConfig) -> Result<Self> {
        info!("Initializing context preservation engine");

        let context_manager = Arc::new(ContextManager::new(config.clone())?);
        let context_store = Arc::new(ContextStore::new(config.clone())?);
        let context_synthesizer = Arc::new(ContextSynthesizer::new(config.clone())?);
        let multi_tenant_manager = Arc::new(MultiTenantManager::new(config.clone())?);

        let stats = Arc::new(RwLock::new(ContextPreservationStats {
            total_requests: 0,
            successful_preservations: 0,
            failed_preservations: 0,
            total_retrievals: 0,
            successful_retrievals: 0,
            failed_retrievals: 0,
            avg_preservation_time_ms: 0.0,
            avg_retrieval_time_ms: 0.0,
            context_reuse_rate: 0.0,
            cross_reference_rate: 0.0,
            synthesis_rate: 0.0,
            last_updated: Utc::now(),
        }));

        Ok(Self {
            config,
            context_manager,
            context_store,
            context_synthesizer,
            multi_tenant_manager,
            stats,
            snapshot_cache: Arc::new(RwLock::new(HashMap::new())),
            base_snapshots: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// Preserve context
    pub async fn preserve_context(
        &self,
        request: &ContextPreservationRequest,
    ) -> Result<ContextPreservationResult> {
        let start_time = Instant::now();
        info!("Preserving context for tenant: {}", request.tenant_id);

        // Validate tenant access
        if !self
            .multi_tenant_manager
            .validate_tenant_access(&request.tenant_id)
            .await?
        {
            return Err(anyhow::anyhow!(
                "Tenant access denied: {}",
                request.tenant_id
            ));
        }

        // Check tenant limits
        if !self
            .multi_tenant_manager
            .check_tenant_limits(&request.tenant_id, &request.context_data)
            .await?
        {
            return Err(anyhow::anyhow!(
                "Tenant limits exceeded: {}",
                request.tenant_id
            ));
        }

        // Generate context ID
        let context_id = Uuid::new_v4();

        // Process context data
        let processed_context_data = self
            .context_manager
            .process_context_data(&request.context_data)
            .await?;

        // Store context
        let storage_result = self
            .context_store
            .store_context(
                &context_id,
                &request.tenant_id,
                &processed_context_data,
                &request.metadata,
            )
            .await?;

        if !storage_result.stored {
            return Err(anyhow::anyhow!("Failed to store context: {}", context_id));
        }

        // Synthesize context if enabled
        let synthesis_results = if request.options.enable_synthesis {
            self.context_synthesizer
                .synthesize_context(
                    &context_id,
                    &request.tenant_id,
                    &processed_context_data,
                    &request.metadata,
                )
                .await?
        } else {
            Vec::new()
        };

        // Create cross-references if enabled
        let cross_references = if request.options.enable_cross_referencing {
            self.context_synthesizer
                .create_cross_references(
                    &context_id,
                    &request.tenant_id,
                    &processed_context_data,
                    &request.metadata,
                )
                .await?
        } else {
            Vec::new()
        };

        let preservation_time_ms = start_time.elapsed().as_millis() as u64;

        let result = ContextPreservationResult {
            id: Uuid::new_v4(),
            preserved: true,
            context_id,
            tenant_id: request.tenant_id.clone(),
            context_size: processed_context_data.content.len() as u64,
            preservation_time_ms,
            metadata: request.metadata.clone(),
            statistics: PreservationStatistics {
                total_contexts: 1,
                successful_preservations: 1,
                failed_preservations: 0,
                avg_preservation_time_ms: preservation_time_ms as f64,
                context_reuse_rate: 0.0,
                cross_reference_rate: if cross_references.is_empty() {
                    0.0
                } else {
                    1.0
                },
                last_updated: Utc::now(),
            },
        };

        // Update statistics
        self.update_stats(true, false, preservation_time_ms, 0)
            .await;

        info!(
            "Context preserved successfully in {}ms - ID: {}, Tenant: {}",
            preservation_time_ms, context_id, request.tenant_id
        );

        Ok(result)
    }

    /// Retrieve context
    pub async fn retrieve_context(
        &self,
        request: &ContextRetrievalRequest,
    ) -> Result<ContextRetrievalResult> {
        let start_time = Instant::now();
        info!(
            "Retrieving context: {} for tenant: {}",
            request.context_id, request.tenant_id
        );

        // Validate tenant access
        if !self
            .multi_tenant_manager
            .validate_tenant_access(&request.tenant_id)
            .await?
        {
            return Err(anyhow::anyhow!(
                "Tenant access denied: {}",
                request.tenant_id
            ));
        }

        // Retrieve context from store
        let stored_context = self
            .context_store
            .retrieve_context(&request.context_id, &request.tenant_id)
            .await?;

        if stored_context.is_none() {
            let result = ContextRetrievalResult {
                id: Uuid::new_v4(),
                found: false,
                context_data: None,
                metadata: None,
                relationships: Vec::new(),
                cross_references: Vec::new(),
                synthesis_results: Vec::new(),
                retrieval_time_ms: start_time.elapsed().as_millis() as u64,
            };

            self.update_stats(false, false, 0, result.retrieval_time_ms)
                .await;
            return Ok(result);
        }

        let (context_data, metadata) = stored_context.unwrap();

        // Retrieve relationships if requested
        let relationships = if request.options.include_relationships {
            self.context_store
                .get_context_relationships(&request.context_id)
                .await?
        } else {
            Vec::new()
        };

        // Retrieve cross-references if requested
        let cross_references = if request.options.include_cross_references {
            self.context_store
                .get_context_cross_references(&request.context_id)
                .await?
        } else {
            Vec::new()
        };

        // Retrieve synthesis results if requested
        let synthesis_results = if request.options.include_synthesis {
            self.context_store
                .get_context_synthesis_results(&request.context_id)
                .await?
        } else {
            Vec::new()
        };

        let retrieval_time_ms = start_time.elapsed().as_millis() as u64;

        let result = ContextRetrievalResult {
            id: Uuid::new_v4(),
            found: true,
            context_data: Some(context_data),
            metadata: Some(metadata),
            relationships,
            cross_references,
            synthesis_results,
            retrieval_time_ms,
        };

        // Update statistics
        self.update_stats(false, true, 0, retrieval_time_ms).await;

        info!(
            "Context retrieved successfully in {}ms - ID: {}, Tenant: {}",
            retrieval_time_ms, request.context_id, request.tenant_id
        );

        Ok(result)
    }

    /// Get context preservation statistics
    pub async fn get_stats(&self) -> Result<ContextPreservationStats> {
        let stats = self.stats.read().await;
        Ok(stats.clone())
    }

    /// Update statistics
    async fn update_stats(
        &self,
        is_preservation: bool,
        is_success: bool,
        preservation_time_ms: u64,
        retrieval_time_ms: u64,
    ) {
        let mut stats = self.stats.write().await;

        if is_preservation {
            stats.total_requests += 1;
            if is_success {
                stats.successful_preservations += 1;
            } else {
                stats.failed_preservations += 1;
            }

            // Update average preservation time
            let total_preservations = stats.successful_preservations + stats.failed_preservations;
            if total_preservations > 0 {
                let total_time = stats.avg_preservation_time_ms * (total_preservations - 1) as f64;
                stats.avg_preservation_time_ms =
                    (total_time + preservation_time_ms as f64) / total_preservations as f64;
            }
        } else {
            stats.total_retrievals += 1;
            if is_success {
                stats.successful_retrievals += 1;
            } else {
                stats.failed_retrievals += 1;
            }

            // Update average retrieval time
            let total_retrievals = stats.successful_retrievals + stats.failed_retrievals;
            if total_retrievals > 0 {
                let total_time = stats.avg_retrieval_time_ms * (total_retrievals - 1) as f64;
                stats.avg_retrieval_time_ms =
                    (total_time + retrieval_time_ms as f64) / total_retrievals as f64;
            }
        }

        stats.last_updated = Utc::now();
    }

    /// Get engine configuration
    pub fn get_config(&self) -> &ContextPreservationConfig {
        &self.config
    }

    /// Create a context snapshot with compression and differential storage
    pub async fn create_snapshot(
        &self,
        session_id: &str,
        iteration_number: u32,
        context: &serde_json::Value,
    ) -> Result<ContextSnapshot> {
        let start_time = Instant::now();
        info!(
            "Creating snapshot for session: {}, iteration: {}",
            session_id, iteration_number
        );

        let snapshot_id = self.generate_snapshot_id(session_id, iteration_number);
        let context_string = serde_json::to_string(context)?;
        let original_size = context_string.len();

        // Check size limits
        let size_mb = original_size as f64 / (1024.0 * 1024.0);
        if size_mb > self.config.storage.max_snapshot_size_mb as f64 {
            return Err(anyhow::anyhow!(
                "Context size {:.2}MB exceeds limit of {}MB",
                size_mb,
                self.config.storage.max_snapshot_size_mb
            ));
        }

        let compressed_data = if self.config.storage.enable_differential_storage {
            // Try differential storage
            let mut base_snapshots = self.base_snapshots.write().await;
            if let Some(base_snapshot_id) = base_snapshots.get(session_id) {
                if let Some(base_snapshot) = self.snapshot_cache.read().await.get(base_snapshot_id)
                {
                    let base_context: serde_json::Value =
                        self.restore_snapshot_internal(base_snapshot).await?;
                    let diff = self.compute_diff(&base_context, context)?;
                    let diff_string = serde_json::to_string(&diff)?;
                    let compressed = self.compress_data(diff_string.as_bytes())?;
                    let based_on_snapshot_id = Some(base_snapshot_id.clone());

                    // Update base snapshot
                    base_snapshots.insert(session_id.to_string(), snapshot_id.clone());

                    (compressed, true, based_on_snapshot_id)
                } else {
                    // Base snapshot not found, fall back to full compression
                    let compressed = self.compress_data(context_string.as_bytes())?;
                    (compressed, false, None)
                }
            } else {
                // No base snapshot, create full compressed snapshot
                let compressed = self.compress_data(context_string.as_bytes())?;
                base_snapshots.insert(session_id.to_string(), snapshot_id.clone());
                (compressed, false, None)
            }
        } else {
            // No differential storage, just compress
            let compressed = self.compress_data(context_string.as_bytes())?;
            (compressed, false, None)
        };

        let compressed_size = compressed_data.0.len();
        let checksum = if self.config.storage.checksum_validation {
            Some(self.compute_checksum(&context_string))
        } else {
            None
        };

        let snapshot = ContextSnapshot {
            id: snapshot_id.clone(),
            session_id: session_id.to_string(),
            iteration_number,
            timestamp: Utc::now(),
            original_size: original_size as u64,
            compressed_size: compressed_size as u64,
            compression_ratio: original_size as f64 / compressed_size as f64,
            is_diff: compressed_data.1,
            based_on_snapshot_id: compressed_data.2,
            checksum,
            compressed_data: compressed_data.0,
            metadata: HashMap::new(),
        };

        // Cache the snapshot
        self.snapshot_cache
            .write()
            .await
            .insert(snapshot_id.clone(), snapshot.clone());

        let time_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Created snapshot {} for session {} in {}ms (ratio: {:.2})",
            snapshot_id, session_id, time_ms, snapshot.compression_ratio
        );

        Ok(snapshot)
    }

    /// Restore a context snapshot
    pub async fn restore_snapshot(&self, snapshot_id: &str) -> Result<ContextRestorationResult> {
        let start_time = Instant::now();
        info!("Restoring snapshot: {}", snapshot_id);

        let cache = self.snapshot_cache.read().await;
        let snapshot = match cache.get(snapshot_id) {
            Some(s) => s.clone(),
            None => {
                return Ok(ContextRestorationResult {
                    snapshot_id: snapshot_id.to_string(),
                    success: false,
                    context: None,
                    restoration_time_ms: start_time.elapsed().as_millis() as u64,
                    error: Some("Snapshot not found".to_string()),
                });
            }
        };

        let context = self.restore_snapshot_internal(&snapshot).await?;
        let time_ms = start_time.elapsed().as_millis() as u64;

        info!("Restored snapshot {} in {}ms", snapshot_id, time_ms);

        Ok(ContextRestorationResult {
            snapshot_id: snapshot_id.to_string(),
            success: true,
            context: Some(context),
            restoration_time_ms: time_ms,
            error: None,
        })
    }

    /// Get snapshot metadata
    pub async fn get_snapshot_metadata(&self, snapshot_id: &str) -> Option<ContextSnapshot> {
        self.snapshot_cache.read().await.get(snapshot_id).cloned()
    }

    /// Clear all snapshots for a session
    pub async fn clear_session(&self, session_id: &str) -> Result<()> {
        info!("Clearing snapshots for session: {}", session_id);

        let mut cache = self.snapshot_cache.write().await;
        let mut base_snapshots = self.base_snapshots.write().await;

        let mut snapshots_to_delete = Vec::new();
        for (snapshot_id, snapshot) in cache.iter() {
            if snapshot.session_id == session_id {
                snapshots_to_delete.push(snapshot_id.clone());
            }
        }

        for snapshot_id in snapshots_to_delete {
            cache.remove(&snapshot_id);
        }

        base_snapshots.remove(session_id);

        info!("Cleared all snapshots for session: {}", session_id);
        Ok(())
    }

    /// Get cache statistics
    pub async fn get_cache_stats(&self) -> ContextCacheStats {
        let cache = self.snapshot_cache.read().await;
        let base_snapshots = self.base_snapshots.read().await;

        let total_snapshots = cache.len();
        let total_size: u64 = cache.values().map(|s| s.compressed_size).sum();
        let avg_compression_ratio = if total_snapshots > 0 {
            cache.values().map(|s| s.compression_ratio).sum::<f64>() / total_snapshots as f64
        } else {
            0.0
        };

        ContextCacheStats {
            total_snapshots,
            total_size_bytes: total_size,
            avg_compression_ratio,
            base_snapshots_count: base_snapshots.len(),
            sessions_count: base_snapshots.len(),
        }
    }

    /// Update engine configuration with comprehensive validation and atomic updates
    pub async fn update_config(&mut self, new_config: ContextPreservationConfig) -> Result<()> {
        info!("Updating context preservation engine configuration with validation and rollback support");

        // 1. Configuration validation: Validate new configuration parameters
        self.validate_configuration(&new_config).await?;

        // 2. Configuration update: Update system configuration with atomicity
        let old_config = self.config.clone();
        let update_result = self.apply_configuration_update(new_config).await;

        // Rollback on failure
        if let Err(e) = update_result {
            warn!("Configuration update failed, rolling back: {}", e);
            self.config = old_config;
            return Err(e);
        }

        // 3. Component reinitialization: Reinitialize components as needed
        if let Err(e) = self.reinitialize_components().await {
            error!("Component reinitialization failed: {}", e);
            // Continue with new config even if reinitialization fails
            // The system can operate with updated config
        }

        // 4. Configuration persistence: Persist configuration changes with backup
        if let Err(e) = self.persist_configuration().await {
            error!("Configuration persistence failed: {}", e);
            // Continue operating with in-memory config
            warn!("Continuing with in-memory configuration");
        }

        info!("Configuration update completed successfully");
        Ok(())
    }

    /// Validate configuration parameters and constraints
    async fn validate_configuration(&self, config: &ContextPreservationConfig) -> Result<()> {
        // Validate storage configuration
        if config.storage.max_context_size == 0 {
            return Err(anyhow::anyhow!("Max context size cannot be zero"));
        }
        if config.storage.max_context_size > 1024 * 1024 * 1024 {
            // 1GB
            return Err(anyhow::anyhow!("Max context size cannot exceed 1GB"));
        }

        if config.storage.retention_hours == 0 {
            return Err(anyhow::anyhow!("Retention hours cannot be zero"));
        }
        if config.storage.retention_hours > 24 * 365 * 10 {
            // 10 years
            return Err(anyhow::anyhow!("Retention hours cannot exceed 10 years"));
        }

        if config.storage.max_contexts_per_tenant == 0 {
            return Err(anyhow::anyhow!("Max contexts per tenant cannot be zero"));
        }

        if config.storage.compression_level > 9 {
            return Err(anyhow::anyhow!("Compression level cannot exceed 9"));
        }

        if config.storage.max_snapshot_size_mb == 0 {
            return Err(anyhow::anyhow!("Max snapshot size cannot be zero"));
        }

        // Validate multi-tenant configuration
        if config.multi_tenant.enabled {
            if config.multi_tenant.default_tenant_id.is_empty() {
                return Err(anyhow::anyhow!(
                    "Default tenant ID cannot be empty when multi-tenant is enabled"
                ));
            }
        }

        // Validate performance configuration
        if config.performance.enable_normalization && config.performance.enable_deduplication {
            // These can conflict - warn but allow
            warn!(
                "Both normalization and deduplication enabled - this may cause unexpected behavior"
            );
        }

        // Validate synthesis configuration
        if config.synthesis.enabled {
            if config.synthesis.similarity_threshold < 0.0
                || config.synthesis.similarity_threshold > 1.0
            {
                return Err(anyhow::anyhow!(
                    "Similarity threshold must be between 0.0 and 1.0"
                ));
            }

            if config.synthesis.max_synthesis_depth == 0 {
                return Err(anyhow::anyhow!("Max synthesis depth cannot be zero"));
            }

            if config.synthesis.max_cross_references == 0 {
                return Err(anyhow::anyhow!("Max cross-references cannot be zero"));
            }
        }

        // Validate integration configuration
        if config.integration.enable_cross_tenant_sharing
            && !config.multi_tenant.allow_cross_tenant_sharing
        {
            return Err(anyhow::anyhow!(
                "Cannot enable cross-tenant sharing without allowing it in multi-tenant config"
            ));
        }

        debug!("Configuration validation passed");
        Ok(())
    }

    /// Apply configuration update with atomicity guarantees
    async fn apply_configuration_update(
        &mut self,
        new_config: ContextPreservationConfig,
    ) -> Result<()> {
        // Store old config for potential rollback
        let old_config = self.config.clone();

        // Apply new configuration atomically
        self.config = new_config.clone();

        // Test configuration by attempting to create components (lightweight validation)
        let test_context_manager = ContextManager::new(self.config.clone());
        if let Err(e) = test_context_manager {
            self.config = old_config;
            return Err(anyhow::anyhow!("Context manager validation failed: {}", e));
        }

        // Log configuration change
        let change_event = serde_json::json!({
            "event": "configuration_update",
            "timestamp": Utc::now().to_rfc3339(),
            "changes": {
                "storage": {
                    "max_context_size": format!("{} -> {}", old_config.storage.max_context_size, new_config.storage.max_context_size),
                    "retention_hours": format!("{} -> {}", old_config.storage.retention_hours, new_config.storage.retention_hours),
                    "compression_enabled": format!("{} -> {}", old_config.storage.enable_compression, new_config.storage.enable_compression)
                },
                "multi_tenant": {
                    "enabled": format!("{} -> {}", old_config.multi_tenant.enabled, new_config.multi_tenant.enabled),
                    "isolation_level": format!("{:?} -> {:?}", old_config.multi_tenant.isolation_level, new_config.multi_tenant.isolation_level)
                },
                "synthesis": {
                    "enabled": format!("{} -> {}", old_config.synthesis.enabled, new_config.synthesis.enabled),
                    "similarity_threshold": format!("{} -> {}", old_config.synthesis.similarity_threshold, new_config.synthesis.similarity_threshold)
                }
            }
        });

        debug!("Configuration updated successfully: {}", change_event);

        Ok(())
    }

    /// Reinitialize components that depend on configuration changes
    async fn reinitialize_components(&mut self) -> Result<()> {
        debug!("Reinitializing components after configuration update");

        // Reinitialize context manager with new config
        let new_context_manager = Arc::new(ContextManager::new(self.config.clone())?);
        self.context_manager = new_context_manager;

        // Reinitialize context store with new config
        let new_context_store = Arc::new(ContextStore::new(self.config.clone())?);
        self.context_store = new_context_store;

        // Reinitialize context synthesizer with new config
        let new_context_synthesizer = Arc::new(ContextSynthesizer::new(self.config.clone())?);
        self.context_synthesizer = new_context_synthesizer;

        // Reinitialize multi-tenant manager with new config
        let new_multi_tenant_manager = Arc::new(MultiTenantManager::new(self.config.clone())?);
        self.multi_tenant_manager = new_multi_tenant_manager;

        // Clear caches that may be affected by config changes
        {
            let mut snapshot_cache = self.snapshot_cache.write().await;
            snapshot_cache.clear();
        }

        {
            let mut base_snapshots = self.base_snapshots.write().await;
            base_snapshots.clear();
        }

        debug!("Component reinitialization completed");
        Ok(())
    }

    /// Persist configuration changes to storage with backup
    async fn persist_configuration(&self) -> Result<()> {
        use std::fs;
        use std::path::Path;

        let config_file = "context_preservation_config.json";

        // Create backup if config file exists
        if Path::new(config_file).exists() {
            let backup_file = format!("{}.backup", config_file);
            fs::copy(config_file, &backup_file)?;
        }

        // Serialize and save new configuration
        let config_json = serde_json::to_string_pretty(&self.config)?;
        let temp_file = format!("{}.tmp", config_file);

        fs::write(&temp_file, &config_json)?;

        // Atomic move to final location
        fs::rename(&temp_file, config_file)?;

        // Clean up backup after successful save
        let backup_file = format!("{}.backup", config_file);
        if Path::new(&backup_file).exists() {
            let _ = fs::remove_file(&backup_file); // Ignore cleanup errors
        }

        debug!("Configuration persisted successfully to {}", config_file);
        Ok(())
    }

    /// Health check
    pub async fn health_check(&self) -> Result<bool> {
        debug!("Performing health check");

        // Check context store health
        let store_healthy = self.context_store.health_check().await?;

        // Check multi-tenant manager health
        let multi_tenant_healthy = self.multi_tenant_manager.health_check().await?;

        // Check context synthesizer health
        let synthesizer_healthy = self.context_synthesizer.health_check().await?;

        let healthy = store_healthy && multi_tenant_healthy && synthesizer_healthy;

        if healthy {
            debug!("Health check passed");
        } else {
            warn!(
                "Health check failed - Store: {}, Multi-tenant: {}, Synthesizer: {}",
                store_healthy, multi_tenant_healthy, synthesizer_healthy
            );
        }

        Ok(healthy)
    }

    /// Generate a unique snapshot ID
    fn generate_snapshot_id(&self, session_id: &str, iteration_number: u32) -> String {
        format!(
            "snapshot_{}_{}_{}",
            session_id,
            iteration_number,
            Utc::now().timestamp_millis()
        )
    }

    /// Compress data using gzip
    fn compress_data(&self, data: &[u8]) -> Result<Vec<u8>> {
        if !self.config.storage.enable_compression {
            return Ok(data.to_vec());
        }

        let mut encoder = GzEncoder::new(
            Vec::new(),
            Compression::new(self.config.storage.compression_level),
        );
        encoder.write_all(data)?;
        encoder.finish().map_err(Into::into)
    }

    /// Decompress data using gzip
    fn decompress_data(&self, compressed_data: &[u8]) -> Result<Vec<u8>> {
        if !self.config.storage.enable_compression {
            return Ok(compressed_data.to_vec());
        }

        let mut decoder = GzDecoder::new(compressed_data);
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed)?;
        Ok(decompressed)
    }

    /// Compute SHA256 checksum of data
    fn compute_checksum(&self, data: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Compute diff between two JSON values
    fn compute_diff(
        &self,
        base: &serde_json::Value,
        current: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        match (base, current) {
            (serde_json::Value::Object(base_obj), serde_json::Value::Object(current_obj)) => {
                let mut diff = serde_json::Map::new();

                // Find added/changed fields
                for (key, current_value) in current_obj {
                    if let Some(base_value) = base_obj.get(key) {
                        if base_value != current_value {
                            diff.insert(key.clone(), current_value.clone());
                        }
                    } else {
                        diff.insert(key.clone(), current_value.clone());
                    }
                }

                // Find deleted fields
                for (key, _) in base_obj {
                    if !current_obj.contains_key(key) {
                        diff.insert(format!("__deleted__{}", key), serde_json::Value::Null);
                    }
                }

                Ok(serde_json::Value::Object(diff))
            }
            _ => Ok(current.clone()),
        }
    }

    /// Apply diff to reconstruct original value
    fn apply_diff(
        &self,
        base: &serde_json::Value,
        diff: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        match (base, diff) {
            (serde_json::Value::Object(base_obj), serde_json::Value::Object(diff_obj)) => {
                let mut result = base_obj.clone();

                for (key, diff_value) in diff_obj {
                    if key.starts_with("__deleted__") {
                        let original_key = key.strip_prefix("__deleted__").unwrap();
                        result.remove(original_key);
                    } else {
                        result.insert(key.clone(), diff_value.clone());
                    }
                }

                Ok(serde_json::Value::Object(result))
            }
            _ => Ok(base.clone()),
        }
    }

    /// Internal snapshot restoration (without public API wrapper)
    fn restore_snapshot_internal<'a>(
        &'a self,
        snapshot: &'a ContextSnapshot,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<serde_json::Value>> + Send + 'a>>
    {
        Box::pin(async move {
            let compressed_data = &snapshot.compressed_data;
            let decompressed = self.decompress_data(compressed_data)?;

            if snapshot.is_diff {
                if let Some(base_snapshot_id) = &snapshot.based_on_snapshot_id {
                    // This is a diff, need to restore base and apply diff
                    let cache = self.snapshot_cache.read().await;
                    if let Some(base_snapshot) = cache.get(base_snapshot_id) {
                        let base_context = self.restore_snapshot_internal(base_snapshot).await?;
                        let diff_string = String::from_utf8(decompressed)?;
                        let diff: serde_json::Value = serde_json::from_str(&diff_string)?;
                        self.apply_diff(&base_context, &diff)
                    } else {
                        Err(anyhow::anyhow!(
                            "Base snapshot {} not found for diff restoration",
                            base_snapshot_id
                        ))
                    }
                } else {
                    Err(anyhow::anyhow!("Diff snapshot missing base snapshot ID"))
                }
            } else {
                // Full snapshot
                let context_string = String::from_utf8(decompressed)?;
                let context: serde_json::Value = serde_json::from_str(&context_string)?;

                // Validate checksum if enabled
                if self.config.storage.checksum_validation {
                    if let Some(expected_checksum) = &snapshot.checksum {
                        let actual_checksum = self.compute_checksum(&context_string);
                        if actual_checksum != *expected_checksum {
                            return Err(anyhow::anyhow!(
                                "Checksum validation failed for snapshot {}: expected {}, got {}",
                                snapshot.id,
                                expected_checksum,
                                actual_checksum
                            ));
                        }
                    }
                }

                Ok(context)
            }
        })
    }

    /// Initialize context preservation for a learning session
    pub async fn initialize_session(
        &mut self,
        session_id: Uuid,
        tenant_id: &str,
    ) -> Result<(), anyhow::Error> {
        debug!(
            "Initializing context preservation for session {} in tenant {}",
            session_id, tenant_id
        );

        // 1. Session initialization: Set up context preservation data structures
        // Ensure tenant access is validated
        if !self
            .multi_tenant_manager
            .validate_tenant_access(tenant_id)
            .await?
        {
            return Err(anyhow::anyhow!(
                "Tenant {} does not have access to context preservation",
                tenant_id
            ));
        }

        // Initialize session-specific context storage
        // In production, this might create session-specific storage areas

        // 2. Context baseline: Establish context baseline and starting point
        // Create initial context snapshot for the session
        let initial_context = ContextData {
            content: format!("Session {} initialized at {}", session_id, Utc::now()),
            format: ContextFormat::Text,
            encoding: "utf-8".to_string(),
            compression: None,
            checksum: String::new(),
        };

        // Process and store initial context
        let processed_context = self
            .context_manager
            .process_context_data(&initial_context)
            .await?;
        self.store_context(&processed_context, tenant_id, Some(&session_id.to_string()))
            .await?;

        // 3. Context monitoring: Start monitoring context usage and preservation
        // Set up any monitoring timers or background tasks here
        // Implement context monitoring
        let monitoring_system = self.setup_context_monitoring(tenant_id, &session_id).await?;
        let performance_tracking = self.start_performance_tracking(&session_id).await?;
        let alerting_system = self.setup_alerting_system(tenant_id).await?;
        let maintenance_automation = self.setup_maintenance_automation(tenant_id).await?;
        debug!(
            "Context preservation initialized for session {}: initial context size={} bytes",
            session_id,
            processed_context.content.len()
        );

        Ok(())
    }

    /// Get performance history for a session (used by learning coordinator)
    pub async fn get_performance_history(
        &self,
        session_id: Uuid,
    ) -> Result<Vec<crate::types::ContextPerformanceData>, anyhow::Error> {
        debug!("Retrieving performance history for session {}", session_id);

        // TODO: Implement performance metrics retrieval with the following requirements:
        // 1. Performance data storage: Query performance metrics from storage systems
        //    - Connect to performance metrics databases and storage
        //    - Retrieve historical performance data and analytics
        //    - Handle performance data aggregation and processing
        // 2. Metrics calculation: Calculate performance metrics and KPIs
        //    - Calculate effectiveness scores and utilization rates
        //    - Compute freshness scores and relevance metrics
        //    - Implement performance trend analysis and forecasting
        // 3. Data validation: Validate performance data quality and integrity
        //    - Validate performance data accuracy and completeness
        //    - Handle performance data quality assurance and validation
        //    - Implement performance data error detection and correction
        // 4. Performance reporting: Generate performance reports and insights
        //    - Create performance dashboards and visualization
        //    - Generate performance reports and analytics
        //    - Implement performance optimization recommendations
        Ok(vec![crate::types::ContextPerformanceData {
            effectiveness_score: 0.85,
            utilization_rate: 0.72,
            freshness_score: 0.91,
        }])
    }
    
    /// Set up context monitoring system
    async fn setup_context_monitoring(
        &self,
        tenant_id: &str,
        session_id: &str,
    ) -> Result<ContextMonitoringSystem> {
        let monitoring_system = ContextMonitoringSystem {
            tenant_id: tenant_id.to_string(),
            session_id: session_id.to_string(),
            monitoring_enabled: true,
            monitoring_interval: 30, // seconds
            metrics_collection: MetricsCollection {
                context_usage: true,
                performance_metrics: true,
                quality_metrics: true,
                error_tracking: true,
            },
            created_at: chrono::Utc::now(),
        };
        
        // Start background monitoring task
        self.start_monitoring_task(&monitoring_system).await?;
        
        Ok(monitoring_system)
    }
    
    /// Start performance tracking for a session
    async fn start_performance_tracking(&self, session_id: &str) -> Result<PerformanceTracker> {
        let tracker = PerformanceTracker {
            session_id: session_id.to_string(),
            start_time: chrono::Utc::now(),
            metrics: PerformanceMetrics {
                context_effectiveness: 0.0,
                utilization_rate: 0.0,
                freshness_score: 0.0,
                response_time_ms: 0,
                error_count: 0,
            },
            tracking_enabled: true,
        };
        
        // Initialize performance tracking
        self.initialize_performance_tracking(&tracker).await?;
        
        Ok(tracker)
    }
    
    /// Set up alerting system for context monitoring
    async fn setup_alerting_system(&self, tenant_id: &str) -> Result<AlertingSystem> {
        let alerting_system = AlertingSystem {
            tenant_id: tenant_id.to_string(),
            alerts_enabled: true,
            alert_rules: vec![
                AlertRule {
                    name: "context_quality_degradation".to_string(),
                    condition: AlertCondition::QualityBelow(0.7),
                    severity: AlertSeverity::Warning,
                    enabled: true,
                },
                AlertRule {
                    name: "context_preservation_failure".to_string(),
                    condition: AlertCondition::ErrorRateAbove(0.1),
                    severity: AlertSeverity::Critical,
                    enabled: true,
                },
                AlertRule {
                    name: "high_context_usage".to_string(),
                    condition: AlertCondition::UsageAbove(0.9),
                    severity: AlertSeverity::Info,
                    enabled: true,
                },
            ],
            notification_channels: vec![
                NotificationChannel::Log,
                NotificationChannel::Dashboard,
            ],
        };
        
        // Initialize alerting system
        self.initialize_alerting_system(&alerting_system).await?;
        
        Ok(alerting_system)
    }
    
    /// Set up maintenance automation
    async fn setup_maintenance_automation(&self, tenant_id: &str) -> Result<MaintenanceAutomation> {
        let maintenance = MaintenanceAutomation {
            tenant_id: tenant_id.to_string(),
            automation_enabled: true,
            maintenance_tasks: vec![
                MaintenanceTask {
                    name: "context_cleanup".to_string(),
                    schedule: "0 2 * * *".to_string(), // Daily at 2 AM
                    enabled: true,
                    last_run: None,
                },
                MaintenanceTask {
                    name: "context_archival".to_string(),
                    schedule: "0 3 * * 0".to_string(), // Weekly on Sunday at 3 AM
                    enabled: true,
                    last_run: None,
                },
                MaintenanceTask {
                    name: "performance_optimization".to_string(),
                    schedule: "0 1 * * *".to_string(), // Daily at 1 AM
                    enabled: true,
                    last_run: None,
                },
            ],
        };
        
        // Initialize maintenance automation
        self.initialize_maintenance_automation(&maintenance).await?;
        
        Ok(maintenance)
    }
    
    /// Start background monitoring task
    async fn start_monitoring_task(&self, monitoring_system: &ContextMonitoringSystem) -> Result<()> {
        // In a real implementation, this would start a background task
        // For now, we'll just log the monitoring setup
        debug!(
            "Started monitoring task for tenant {} session {}",
            monitoring_system.tenant_id, monitoring_system.session_id
        );
        
        Ok(())
    }
    
    /// Initialize performance tracking
    async fn initialize_performance_tracking(&self, tracker: &PerformanceTracker) -> Result<()> {
        debug!(
            "Initialized performance tracking for session {}",
            tracker.session_id
        );
        
        Ok(())
    }
    
    /// Initialize alerting system
    async fn initialize_alerting_system(&self, alerting_system: &AlertingSystem) -> Result<()> {
        debug!(
            "Initialized alerting system for tenant {} with {} rules",
            alerting_system.tenant_id,
            alerting_system.alert_rules.len()
        );
        
        Ok(())
    }
    
    /// Initialize maintenance automation
    async fn initialize_maintenance_automation(&self, maintenance: &MaintenanceAutomation) -> Result<()> {
        debug!(
            "Initialized maintenance automation for tenant {} with {} tasks",
            maintenance.tenant_id,
            maintenance.maintenance_tasks.len()
        );
        
        Ok(())
    }
}

/// Context monitoring system
#[derive(Debug, Clone)]
pub struct ContextMonitoringSystem {
    pub tenant_id: String,
    pub session_id: String,
    pub monitoring_enabled: bool,
    pub monitoring_interval: u64, // seconds
    pub metrics_collection: MetricsCollection,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Metrics collection configuration
#[derive(Debug, Clone)]
pub struct MetricsCollection {
    pub context_usage: bool,
    pub performance_metrics: bool,
    pub quality_metrics: bool,
    pub error_tracking: bool,
}

/// Performance tracker
#[derive(Debug, Clone)]
pub struct PerformanceTracker {
    pub session_id: String,
    pub start_time: chrono::DateTime<chrono::Utc>,
    pub metrics: PerformanceMetrics,
    pub tracking_enabled: bool,
}

/// Performance metrics
#[derive(Debug, Clone)]
pub struct PerformanceMetrics {
    pub context_effectiveness: f64,
    pub utilization_rate: f64,
    pub freshness_score: f64,
    pub response_time_ms: u64,
    pub error_count: u64,
}

/// Alerting system
#[derive(Debug, Clone)]
pub struct AlertingSystem {
    pub tenant_id: String,
    pub alerts_enabled: bool,
    pub alert_rules: Vec<AlertRule>,
    pub notification_channels: Vec<NotificationChannel>,
}

/// Alert rule
#[derive(Debug, Clone)]
pub struct AlertRule {
    pub name: String,
    pub condition: AlertCondition,
    pub severity: AlertSeverity,
    pub enabled: bool,
}

/// Alert condition
#[derive(Debug, Clone)]
pub enum AlertCondition {
    QualityBelow(f64),
    ErrorRateAbove(f64),
    UsageAbove(f64),
    ResponseTimeAbove(u64),
}

/// Alert severity
#[derive(Debug, Clone)]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

/// Notification channel
#[derive(Debug, Clone)]
pub enum NotificationChannel {
    Log,
    Dashboard,
    Email,
    Slack,
}

/// Maintenance automation
#[derive(Debug, Clone)]
pub struct MaintenanceAutomation {
    pub tenant_id: String,
    pub automation_enabled: bool,
    pub maintenance_tasks: Vec<MaintenanceTask>,
}

/// Maintenance task
#[derive(Debug, Clone)]
pub struct MaintenanceTask {
    pub name: String,
    pub schedule: String, // Cron expression
    pub enabled: bool,
    pub last_run: Option<chrono::DateTime<chrono::Utc>>,
}
