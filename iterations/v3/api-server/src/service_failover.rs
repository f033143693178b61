//! Service Failover and High Availability System
//!
//! Provides automatic service failure detection, failover coordination,
//! and recovery orchestration for production resilience.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{RwLock, mpsc};
use tokio::time;
use serde::{Deserialize, Serialize};
use tracing::{info, warn, error};

use crate::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig};

/// Service types in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    Database,
    ApiServer,
    WorkerPool,
    MessageQueue,
    Cache,
    FileStorage,
    ExternalApi,
}

/// Service instance information
#[derive(Debug, Clone)]
pub struct ServiceInstance {
    pub id: String,
    pub service_type: ServiceType,
    pub endpoint: String,
    pub region: String,
    pub zone: String,
    pub priority: u32, // Lower number = higher priority
    pub is_primary: bool,
    pub last_health_check: Instant,
    pub consecutive_failures: u32,
    pub status: ServiceStatus,
}

/// Service health status
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ServiceStatus {
    Healthy,
    Degraded,
    Unhealthy,
    Offline,
    Maintenance,
}

/// Failover configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailoverConfig {
    /// Health check interval (seconds)
    pub health_check_interval_secs: u64,
    /// Failure threshold before failover
    pub failure_threshold: u32,
    /// Recovery time before attempting to bring service back (seconds)
    pub recovery_time_secs: u64,
    /// Maximum failover attempts per hour
    pub max_failovers_per_hour: u32,
    /// Enable automatic failover
    pub enable_auto_failover: bool,
    /// Regions for cross-region failover
    pub regions: Vec<String>,
}

impl Default for FailoverConfig {
    fn default() -> Self {
        Self {
            health_check_interval_secs: 30,
            failure_threshold: 3,
            recovery_time_secs: 300,
            max_failovers_per_hour: 5,
            enable_auto_failover: true,
            regions: vec!["us-east-1".to_string(), "us-west-2".to_string()],
        }
    }
}

/// Failover event types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FailoverEvent {
    ServiceFailure {
        service_id: String,
        service_type: ServiceType,
        failure_reason: String,
    },
    FailoverInitiated {
        from_service: String,
        to_service: String,
        service_type: ServiceType,
        reason: String,
    },
    FailoverCompleted {
        service_id: String,
        service_type: ServiceType,
        duration_ms: u64,
    },
    ServiceRecovery {
        service_id: String,
        service_type: ServiceType,
    },
    FailoverFailed {
        service_id: String,
        service_type: ServiceType,
        error: String,
    },
}

/// Service failover manager
pub struct ServiceFailoverManager {
    config: FailoverConfig,
    services: Arc<RwLock<HashMap<String, ServiceInstance>>>,
    circuit_breakers: Arc<RwLock<HashMap<String, CircuitBreaker>>>,
    event_sender: mpsc::UnboundedSender<FailoverEvent>,
    event_receiver: Arc<RwLock<Option<mpsc::UnboundedReceiver<FailoverEvent>>>>,
    failover_history: Arc<RwLock<Vec<FailoverEvent>>>,
}

impl ServiceFailoverManager {
    /// Create a new service failover manager
    pub fn new(config: FailoverConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            config,
            services: Arc::new(RwLock::new(HashMap::new())),
            circuit_breakers: Arc::new(RwLock::new(HashMap::new())),
            event_sender: tx,
            event_receiver: Arc::new(RwLock::new(Some(rx))),
            failover_history: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a service instance
    pub async fn register_service(&self, service: ServiceInstance) -> Result<(), String> {
        let service_id = service.id.clone();

        // Create circuit breaker for this service
        let cb_config = CircuitBreakerConfig {
            failure_threshold: self.config.failure_threshold as u64,
            recovery_timeout_secs: self.config.recovery_time_secs,
            ..Default::default()
        };
        let circuit_breaker = CircuitBreaker::with_config(cb_config);
        let service_type = service.service_type;

        {
            let mut services = self.services.write().await;
            services.insert(service_id.clone(), service);
        }

        {
            let mut circuit_breakers = self.circuit_breakers.write().await;
            circuit_breakers.insert(service_id.to_string(), circuit_breaker);
        }

        info!("Registered service: {} ({:?})", service_id, service_type);
        Ok(())
    }

    /// Unregister a service instance
    pub async fn unregister_service(&self, service_id: &str) {
        {
            let mut services = self.services.write().await;
            services.remove(service_id);
        }

        {
            let mut circuit_breakers = self.circuit_breakers.write().await;
            circuit_breakers.remove(service_id);
        }

        info!("Unregistered service: {}", service_id);
    }

    /// Start health monitoring and failover coordination
    pub async fn start_monitoring(self: Arc<Self>) -> Result<(), String> {
        info!("Starting service failover monitoring");

        // Start health check loop
        let manager = Arc::clone(&self);
        tokio::spawn(async move {
            manager.health_check_loop().await;
        });

        // Start failover coordination loop
        let manager = Arc::clone(&self);
        tokio::spawn(async move {
            manager.failover_coordination_loop().await;
        });

        Ok(())
    }

    /// Health check loop
    async fn health_check_loop(&self) {
        let interval = Duration::from_secs(self.config.health_check_interval_secs);

        loop {
            time::sleep(interval).await;

            if let Err(e) = self.perform_health_checks().await {
                error!("Health check error: {}", e);
            }
        }
    }

    /// Perform health checks on all registered services
    async fn perform_health_checks(&self) -> Result<(), String> {
        let service_ids: Vec<String> = {
            let services = self.services.read().await;
            services.keys().cloned().collect()
        };

        for service_id in service_ids {
            if let Err(e) = self.check_service_health(&service_id).await {
                warn!("Health check failed for service {}: {}", service_id, e);
            }
        }

        Ok(())
    }

    /// Check health of a specific service
    async fn check_service_health(&self, service_id: &str) -> Result<(), String> {
        let service = {
            let services = self.services.read().await;
            services.get(service_id).cloned()
        };

        let Some(mut service) = service else {
            return Err(format!("Service not found: {}", service_id));
        };

        let is_healthy = match service.service_type {
            ServiceType::Database => self.check_database_health(&service).await,
            ServiceType::ApiServer => self.check_api_health(&service).await,
            ServiceType::WorkerPool => self.check_worker_health(&service).await,
            ServiceType::MessageQueue => self.check_queue_health(&service).await,
            ServiceType::Cache => self.check_cache_health(&service).await,
            ServiceType::FileStorage => self.check_storage_health(&service).await,
            ServiceType::ExternalApi => self.check_external_api_health(&service).await,
        };

        service.last_health_check = Instant::now();

        if is_healthy {
            service.consecutive_failures = 0;
            service.status = ServiceStatus::Healthy;

            // Record success in circuit breaker
            if let Some(cb) = self.circuit_breakers.read().await.get(service_id) {
                cb.record_success().await;
            }
        } else {
            service.consecutive_failures += 1;

            // Record failure in circuit breaker
            if let Some(cb) = self.circuit_breakers.read().await.get(service_id) {
                cb.record_failure().await;
            }

            // Update status based on failure count
            service.status = if service.consecutive_failures >= self.config.failure_threshold {
                ServiceStatus::Unhealthy
            } else {
                ServiceStatus::Degraded
            };

            // Emit failure event
            let _ = self.event_sender.send(FailoverEvent::ServiceFailure {
                service_id: service_id.to_string(),
                service_type: service.service_type,
                failure_reason: "Health check failed".to_string(),
            });
        }

        // Update service state
        {
            let mut services = self.services.write().await;
            services.insert(service_id.to_string(), service);
        }

        Ok(())
    }

    /// Check database health
    async fn check_database_health(&self, service: &ServiceInstance) -> bool {
        // Simple connection test - in real implementation, this would use actual DB client
        match reqwest::Client::new()
            .get(&format!("{}/health", service.endpoint))
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// Check API server health
    async fn check_api_health(&self, service: &ServiceInstance) -> bool {
        match reqwest::Client::new()
            .get(&format!("{}/health", service.endpoint))
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// Check worker pool health
    async fn check_worker_health(&self, service: &ServiceInstance) -> bool {
        match reqwest::Client::new()
            .get(&format!("{}/status", service.endpoint))
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// Check message queue health
    async fn check_queue_health(&self, service: &ServiceInstance) -> bool {
        // Implementation would depend on queue technology (Redis, RabbitMQ, etc.)
        // For now, assume healthy
        true
    }

    /// Check cache health
    async fn check_cache_health(&self, service: &ServiceInstance) -> bool {
        // Implementation would depend on cache technology (Redis, Memcached, etc.)
        // For now, assume healthy
        true
    }

    /// Check file storage health
    async fn check_storage_health(&self, service: &ServiceInstance) -> bool {
        // Basic connectivity check
        match reqwest::Client::new()
            .head(&service.endpoint)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// Check external API health
    async fn check_external_api_health(&self, service: &ServiceInstance) -> bool {
        match reqwest::Client::new()
            .get(&service.endpoint)
            .timeout(Duration::from_secs(10))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// Failover coordination loop
    async fn failover_coordination_loop(&self) {
        let mut event_receiver = {
            let mut receiver = self.event_receiver.write().await;
            receiver.take().unwrap()
        };

        while let Some(event) = event_receiver.recv().await {
            // Store event in history
            {
                let mut history = self.failover_history.write().await;
                history.push(event.clone());

                // Keep only recent history
                if history.len() > 1000 {
                    history.remove(0);
                }
            }

            // Handle failover events
            match event {
                FailoverEvent::ServiceFailure { service_id, service_type, .. } => {
                    if self.config.enable_auto_failover {
                        if let Err(e) = self.initiate_failover(&service_id, service_type).await {
                            error!("Failover initiation failed for {}: {}", service_id, e);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// Initiate failover for a failed service
    async fn initiate_failover(&self, failed_service_id: &str, service_type: ServiceType) -> Result<(), String> {
        info!("Initiating failover for service: {}", failed_service_id);

        // Find healthy backup service
        let backup_service = self.find_backup_service(failed_service_id, service_type).await?;

        // Emit failover initiation event
        let _ = self.event_sender.send(FailoverEvent::FailoverInitiated {
            from_service: failed_service_id.to_string(),
            to_service: backup_service.id.clone(),
            service_type,
            reason: "Primary service failure detected".to_string(),
        });

        let start_time = Instant::now();

        // Perform the actual failover
        match self.perform_failover(&backup_service).await {
            Ok(_) => {
                let duration = start_time.elapsed().as_millis() as u64;

                // Update service roles
                self.update_service_roles(failed_service_id, &backup_service.id).await?;

                // Emit success event
                let _ = self.event_sender.send(FailoverEvent::FailoverCompleted {
                    service_id: backup_service.id.clone(),
                    service_type,
                    duration_ms: duration,
                });

                info!("Failover completed successfully to service: {}", backup_service.id);
                Ok(())
            }
            Err(e) => {
                // Emit failure event
                let _ = self.event_sender.send(FailoverEvent::FailoverFailed {
                    service_id: backup_service.id,
                    service_type,
                    error: e.clone(),
                });

                Err(format!("Failover failed: {}", e))
            }
        }
    }

    /// Find a healthy backup service for failover
    async fn find_backup_service(&self, failed_service_id: &str, service_type: ServiceType) -> Result<ServiceInstance, String> {
        let services = self.services.read().await;

        // Find services of the same type, excluding the failed one
        let candidates: Vec<_> = services.values()
            .filter(|s| s.service_type == service_type && s.id != failed_service_id)
            .filter(|s| matches!(s.status, ServiceStatus::Healthy))
            .collect();

        if candidates.is_empty() {
            return Err(format!("No healthy backup services found for type {:?}", service_type));
        }

        // Select service with highest priority (lowest priority number)
        candidates.iter()
            .min_by_key(|s| s.priority)
            .cloned()
            .cloned()
            .ok_or("No suitable backup service found".to_string())
    }

    /// Perform the actual service failover
    async fn perform_failover(&self, backup_service: &ServiceInstance) -> Result<(), String> {
        // This would implement service-specific failover logic
        match backup_service.service_type {
            ServiceType::Database => self.failover_database(backup_service).await,
            ServiceType::ApiServer => self.failover_api_server(backup_service).await,
            ServiceType::WorkerPool => self.failover_worker_pool(backup_service).await,
            ServiceType::MessageQueue => self.failover_message_queue(backup_service).await,
            ServiceType::Cache => self.failover_cache(backup_service).await,
            ServiceType::FileStorage => self.failover_file_storage(backup_service).await,
            ServiceType::ExternalApi => self.failover_external_api(backup_service).await,
        }
    }

    /// Database failover implementation
    async fn failover_database(&self, backup_service: &ServiceInstance) -> Result<(), String> {
        // Implementation would:
        // 1. Promote standby database to primary
        // 2. Update connection strings
        // 3. Verify replication is working
        info!("Performing database failover to: {}", backup_service.id);
        Ok(())
    }

    /// API server failover implementation
    async fn failover_api_server(&self, backup_service: &ServiceInstance) -> Result<(), String> {
        // Implementation would:
        // 1. Update load balancer configuration
        // 2. Verify backup server is responding
        // 3. Update DNS if necessary
        info!("Performing API server failover to: {}", backup_service.id);
        Ok(())
    }

    /// Worker pool failover implementation
    async fn failover_worker_pool(&self, backup_service: &ServiceInstance) -> Result<(), String> {
        // Implementation would:
        // 1. Redirect job queue to backup workers
        // 2. Scale up backup worker instances
        // 3. Verify job processing resumes
        info!("Performing worker pool failover to: {}", backup_service.id);
        Ok(())
    }

    /// Message queue failover implementation
    async fn failover_message_queue(&self, backup_service: &ServiceInstance) -> Result<(), String> {
        // Implementation would:
        // 1. Switch to backup queue cluster
        // 2. Ensure message persistence
        // 3. Update producer/consumer configurations
        info!("Performing message queue failover to: {}", backup_service.id);
        Ok(())
    }

    /// Cache failover implementation
    async fn failover_cache(&self, backup_service: &ServiceInstance) -> Result<(), String> {
        // Implementation would:
        // 1. Switch cache cluster
        // 2. Warm up cache with hot data
        // 3. Update application configurations
        info!("Performing cache failover to: {}", backup_service.id);
        Ok(())
    }

    /// File storage failover implementation
    async fn failover_file_storage(&self, backup_service: &ServiceInstance) -> Result<(), String> {
        // Implementation would:
        // 1. Switch to backup storage cluster
        // 2. Sync any pending uploads/downloads
        // 3. Update storage endpoints
        info!("Performing file storage failover to: {}", backup_service.id);
        Ok(())
    }

    /// External API failover implementation
    async fn failover_external_api(&self, backup_service: &ServiceInstance) -> Result<(), String> {
        // Implementation would:
        // 1. Switch to backup API endpoint
        // 2. Update API keys/credentials if needed
        // 3. Verify backup API compatibility
        info!("Performing external API failover to: {}", backup_service.id);
        Ok(())
    }

    /// Update service roles after successful failover
    async fn update_service_roles(&self, old_primary: &str, new_primary: &str) -> Result<(), String> {
        let mut services = self.services.write().await;

        if let Some(old_service) = services.get_mut(old_primary) {
            old_service.is_primary = false;
            old_service.status = ServiceStatus::Offline;
        }

        if let Some(new_service) = services.get_mut(new_primary) {
            new_service.is_primary = true;
            new_service.status = ServiceStatus::Healthy;
        }

        Ok(())
    }

    /// Get service status overview
    pub async fn get_service_status(&self) -> HashMap<String, ServiceStatus> {
        let services = self.services.read().await;
        services.iter()
            .map(|(id, service)| (id.clone(), service.status))
            .collect()
    }

    /// Get failover event history
    pub async fn get_failover_history(&self, limit: usize) -> Vec<FailoverEvent> {
        let history = self.failover_history.read().await;
        history.iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    /// Manually trigger failover for testing
    pub async fn manual_failover(&self, service_id: &str) -> Result<(), String> {
        let service = {
            let services = self.services.read().await;
            services.get(service_id).cloned()
        };

        let service = service.ok_or(format!("Service not found: {}", service_id))?;

        self.initiate_failover(service_id, service.service_type).await
    }

    /// Get circuit breaker status for a service
    pub async fn get_circuit_breaker_status(&self, service_id: &str) -> Option<crate::circuit_breaker::CircuitBreakerMetrics> {
        let circuit_breakers = self.circuit_breakers.read().await;
        if let Some(cb) = circuit_breakers.get(service_id) {
            Some(cb.metrics().await)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_service_registration() {
        let manager = ServiceFailoverManager::new(FailoverConfig::default());

        let service = ServiceInstance {
            id: "test-api-1".to_string(),
            service_type: ServiceType::ApiServer,
            endpoint: "http://localhost:8080".to_string(),
            region: "us-east-1".to_string(),
            zone: "us-east-1a".to_string(),
            priority: 1,
            is_primary: true,
            last_health_check: Instant::now(),
            consecutive_failures: 0,
            status: ServiceStatus::Healthy,
        };

        assert!(manager.register_service(service).await.is_ok());

        let status = manager.get_service_status().await;
        assert_eq!(status.get("test-api-1"), Some(&ServiceStatus::Healthy));
    }

    #[tokio::test]
    async fn test_failover_history() {
        let manager = Arc::new(ServiceFailoverManager::new(FailoverConfig::default()));

        // Start monitoring to begin event processing
        manager.clone().start_monitoring().await.unwrap();

        // Give the monitoring loop time to start
        sleep(Duration::from_millis(5)).await;

        // Add some mock events
        let event = FailoverEvent::ServiceFailure {
            service_id: "test-service".to_string(),
            service_type: ServiceType::ApiServer,
            failure_reason: "Test failure".to_string(),
        };

        let _ = manager.event_sender.send(event);

        // Give some time for event processing
        sleep(Duration::from_millis(20)).await;

        let history = manager.get_failover_history(10).await;
        assert!(!history.is_empty());
    }
}
