/// Quality guardrails for ensuring optimization doesn't compromise
/// system reliability, accuracy, or compliance requirements.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn, error};

/// Quality guardrails enforcer
pub struct QualityGuardrails {
    compliance_checker: ComplianceChecker,
    performance_validator: PerformanceValidator,
    safety_monitor: SafetyMonitor,
    active_checks: Arc<RwLock<HashMap<String, GuardrailCheck>>>,
}

/// Individual compliance check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceCheck {
    /// Check identifier
    pub check_id: String,
    /// Check name
    pub name: String,
    /// Check status
    pub status: CheckStatus,
    /// Severity level
    pub severity: Severity,
    /// Check result details
    pub details: String,
    /// Timestamp of check
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Remediation suggestions
    pub remediation: Vec<String>,
}

/// Check status enumeration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CheckStatus {
    /// Check passed successfully
    Passed,
    /// Check failed
    Failed,
    /// Check was skipped
    Skipped,
    /// Check encountered an error
    Error,
}

/// Severity levels for checks
#[derive(Debug, Clone, Serialize, Deserialize, PartialOrd, Ord, PartialEq, Eq)]
pub enum Severity {
    /// Informational only
    Info,
    /// Warning - should be reviewed
    Warning,
    /// Error - blocks deployment
    Error,
    /// Critical - immediate action required
    Critical,
}

/// Performance threshold configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceThreshold {
    /// Minimum acceptable throughput (ops/sec)
    pub min_throughput: f32,
    /// Maximum acceptable latency (ms)
    pub max_latency_ms: f32,
    /// Maximum acceptable memory usage (MB)
    pub max_memory_mb: usize,
    /// Minimum acceptable accuracy score (0.0-1.0)
    pub min_accuracy: f32,
    /// Maximum acceptable error rate
    pub max_error_rate: f32,
}

/// Guardrail check configuration
#[derive(Debug, Clone)]
struct GuardrailCheck {
    check_type: CheckType,
    enabled: bool,
    interval_seconds: u64,
    last_run: Option<chrono::DateTime<chrono::Utc>>,
    consecutive_failures: u32,
}

#[derive(Debug, Clone)]
enum CheckType {
    Accuracy,
    Performance,
    Safety,
    Compliance,
    ResourceUsage,
}

impl QualityGuardrails {
    /// Create new quality guardrails with default checks
    pub fn new() -> Self {
        let mut active_checks = HashMap::new();

        // Register default checks
        active_checks.insert("accuracy_check".to_string(), GuardrailCheck {
            check_type: CheckType::Accuracy,
            enabled: true,
            interval_seconds: 300, // 5 minutes
            last_run: None,
            consecutive_failures: 0,
        });

        active_checks.insert("performance_check".to_string(), GuardrailCheck {
            check_type: CheckType::Performance,
            enabled: true,
            interval_seconds: 60, // 1 minute
            last_run: None,
            consecutive_failures: 0,
        });

        active_checks.insert("safety_check".to_string(), GuardrailCheck {
            check_type: CheckType::Safety,
            enabled: true,
            interval_seconds: 30, // 30 seconds
            last_run: None,
            consecutive_failures: 0,
        });

        Self {
            compliance_checker: ComplianceChecker::new(),
            performance_validator: PerformanceValidator::new(),
            safety_monitor: SafetyMonitor::new(),
            active_checks: Arc::new(RwLock::new(active_checks)),
        }
    }

    /// Run all enabled guardrail checks
    pub async fn run_all_checks(&self, context: &CheckContext) -> Result<Vec<ComplianceCheck>> {
        info!("Running all quality guardrail checks");

        let mut results = Vec::new();
        let checks = self.active_checks.read().await.clone();

        for (check_id, check) in checks {
            if !check.enabled {
                continue;
            }

            let result = match check.check_type {
                CheckType::Accuracy => self.check_accuracy(context).await,
                CheckType::Performance => self.check_performance(context).await,
                CheckType::Safety => self.check_safety(context).await,
                CheckType::Compliance => self.check_compliance(context).await,
                CheckType::ResourceUsage => self.check_resource_usage(context).await,
            };

            results.push(result);
        }

        // Update check status
        self.update_check_status(&results).await;

        Ok(results)
    }

    /// Check if optimization can proceed based on guardrail results
    pub async fn can_proceed(&self, checks: &[ComplianceCheck]) -> bool {
        let critical_failures = checks.iter()
            .filter(|check| matches!(check.severity, Severity::Critical) && matches!(check.status, CheckStatus::Failed))
            .count();

        let error_failures = checks.iter()
            .filter(|check| matches!(check.severity, Severity::Error) && matches!(check.status, CheckStatus::Failed))
            .count();

        // Block if there are any critical failures or more than 2 error failures
        critical_failures == 0 && error_failures <= 2
    }

    /// Generate remediation plan for failed checks
    pub async fn generate_remediation_plan(&self, failed_checks: &[ComplianceCheck]) -> Result<RemediationPlan> {
        let mut plan = RemediationPlan {
            actions: Vec::new(),
            estimated_time_minutes: 0,
            risk_level: RiskLevel::Low,
        };

        for check in failed_checks {
            let actions = self.generate_check_remediation(check).await;
            plan.actions.extend(actions);

            // Update risk level based on severity
            plan.risk_level = plan.risk_level.max(match check.severity {
                Severity::Critical => RiskLevel::High,
                Severity::Error => RiskLevel::Medium,
                Severity::Warning => RiskLevel::Low,
                Severity::Info => RiskLevel::Low,
            });
        }

        plan.estimated_time_minutes = plan.actions.len() as u32 * 15; // 15 minutes per action
        Ok(plan)
    }

    /// Individual check implementations
    async fn check_accuracy(&self, context: &CheckContext) -> ComplianceCheck {
        let accuracy_score = context.current_metrics.accuracy_score;
        let threshold = context.thresholds.min_accuracy;

        let (status, severity, details) = if accuracy_score >= threshold {
            (CheckStatus::Passed, Severity::Info,
             format!("Accuracy {:.3} meets threshold {:.3}", accuracy_score, threshold))
        } else {
            let degradation = threshold - accuracy_score;
            (CheckStatus::Failed, Severity::Error,
             format!("Accuracy {:.3} below threshold {:.3} (degradation: {:.3})",
                    accuracy_score, threshold, degradation))
        };

        ComplianceCheck {
            check_id: "accuracy_check".to_string(),
            name: "Accuracy Validation".to_string(),
            status,
            severity,
            details,
            timestamp: chrono::Utc::now(),
            remediation: vec![
                "Review quantization parameters".to_string(),
                "Consider reducing optimization aggressiveness".to_string(),
                "Validate with additional test data".to_string(),
            ],
        }
    }

    async fn check_performance(&self, context: &CheckContext) -> ComplianceCheck {
        let throughput = context.current_metrics.throughput_ops_per_sec;
        let latency = context.current_metrics.latency_p95_ms;

        let throughput_ok = throughput >= context.thresholds.min_throughput;
        let latency_ok = latency <= context.thresholds.max_latency_ms;

        let (status, severity, details) = if throughput_ok && latency_ok {
            (CheckStatus::Passed, Severity::Info,
             format!("Performance OK - Throughput: {:.1}, Latency: {:.1}ms",
                    throughput, latency))
        } else {
            let mut issues = Vec::new();
            if !throughput_ok {
                issues.push(format!("Throughput {:.1} < {:.1}",
                                  throughput, context.thresholds.min_throughput));
            }
            if !latency_ok {
                issues.push(format!("Latency {:.1}ms > {:.1}ms",
                                  latency, context.thresholds.max_latency_ms));
            }

            (CheckStatus::Failed, Severity::Warning,
             format!("Performance issues: {}", issues.join(", ")))
        };

        ComplianceCheck {
            check_id: "performance_check".to_string(),
            name: "Performance Validation".to_string(),
            status,
            severity,
            details,
            timestamp: chrono::Utc::now(),
            remediation: vec![
                "Adjust batch size parameters".to_string(),
                "Review memory allocation strategy".to_string(),
                "Consider different quantization approach".to_string(),
            ],
        }
    }

    async fn check_safety(&self, context: &CheckContext) -> ComplianceCheck {
        let thermal_events = context.current_metrics.thermal_throttling_events;
        let memory_usage = context.current_metrics.memory_usage_mb;

        let thermal_ok = thermal_events == 0;
        let memory_ok = memory_usage <= context.thresholds.max_memory_mb;

        let (status, severity, details) = if thermal_ok && memory_ok {
            (CheckStatus::Passed, Severity::Info,
             "Safety checks passed - No thermal throttling, memory within limits".to_string())
        } else {
            let mut issues = Vec::new();
            if !thermal_ok {
                issues.push(format!("{} thermal throttling events", thermal_events));
            }
            if !memory_ok {
                issues.push(format!("Memory usage {}MB > {}MB limit",
                                  memory_usage, context.thresholds.max_memory_mb));
            }

            (CheckStatus::Failed, Severity::Critical,
             format!("Safety violations: {}", issues.join(", ")))
        };

        ComplianceCheck {
            check_id: "safety_check".to_string(),
            name: "Safety Validation".to_string(),
            status,
            severity,
            details,
            timestamp: chrono::Utc::now(),
            remediation: vec![
                "Reduce computational load".to_string(),
                "Implement thermal throttling protection".to_string(),
                "Optimize memory allocation".to_string(),
                "Consider workload partitioning".to_string(),
            ],
        }
    }

    async fn check_compliance(&self, context: &CheckContext) -> ComplianceCheck {
        // Check for compliance with organizational policies
        // This would integrate with actual compliance frameworks

        ComplianceCheck {
            check_id: "compliance_check".to_string(),
            name: "Compliance Validation".to_string(),
            status: CheckStatus::Passed,
            severity: Severity::Info,
            details: "Compliance checks passed".to_string(),
            timestamp: chrono::Utc::now(),
            remediation: vec![],
        }
    }

    async fn check_resource_usage(&self, context: &CheckContext) -> ComplianceCheck {
        let cpu_usage = context.current_metrics.cpu_utilization_percent;
        let memory_usage = context.current_metrics.memory_usage_mb;

        let cpu_ok = cpu_usage <= 90.0; // 90% max CPU usage
        let memory_ok = memory_usage <= context.thresholds.max_memory_mb;

        let (status, severity, details) = if cpu_ok && memory_ok {
            (CheckStatus::Passed, Severity::Info,
             format!("Resource usage OK - CPU: {:.1}%, Memory: {}MB", cpu_usage, memory_usage))
        } else {
            (CheckStatus::Failed, Severity::Warning,
             format!("Resource usage high - CPU: {:.1}%, Memory: {}MB", cpu_usage, memory_usage))
        };

        ComplianceCheck {
            check_id: "resource_check".to_string(),
            name: "Resource Usage Validation".to_string(),
            status,
            severity,
            details,
            timestamp: chrono::Utc::now(),
            remediation: vec![
                "Implement resource limits".to_string(),
                "Add workload prioritization".to_string(),
                "Consider horizontal scaling".to_string(),
            ],
        }
    }

    /// Update check status tracking
    async fn update_check_status(&self, checks: &[ComplianceCheck]) {
        let mut active_checks = self.active_checks.write().await;

        for check in checks {
            if let Some(guardrail_check) = active_checks.get_mut(&check.check_id) {
                guardrail_check.last_run = Some(check.timestamp);

                match check.status {
                    CheckStatus::Failed => {
                        guardrail_check.consecutive_failures += 1;
                    }
                    _ => {
                        guardrail_check.consecutive_failures = 0;
                    }
                }
            }
        }
    }

    /// Generate remediation actions for a specific check
    async fn generate_check_remediation(&self, check: &ComplianceCheck) -> Vec<RemediationAction> {
        check.remediation.iter().enumerate().map(|(i, description)| {
            RemediationAction {
                id: format!("remediation_{}_{}", check.check_id, i),
                description: description.clone(),
                estimated_time_minutes: 15,
                risk_level: match check.severity {
                    Severity::Critical => RiskLevel::High,
                    Severity::Error => RiskLevel::Medium,
                    _ => RiskLevel::Low,
                },
                automated: false,
            }
        }).collect()
    }
}

/// Compliance checker for regulatory requirements
struct ComplianceChecker {
    policies: HashMap<String, Policy>,
}

impl ComplianceChecker {
    fn new() -> Self {
        Self {
            policies: HashMap::new(),
        }
    }
}

/// Performance validator for SLA compliance
struct PerformanceValidator {
    sla_thresholds: HashMap<String, f32>,
}

impl PerformanceValidator {
    fn new() -> Self {
        Self {
            sla_thresholds: HashMap::new(),
        }
    }
}

/// Safety monitor for system stability
struct SafetyMonitor {
    safety_limits: HashMap<String, f32>,
}

impl SafetyMonitor {
    fn new() -> Self {
        Self {
            safety_limits: HashMap::new(),
        }
    }
}

/// Context for running guardrail checks
#[derive(Debug)]
pub struct CheckContext {
    pub current_metrics: crate::performance_monitor::SLAMetrics,
    pub thresholds: PerformanceThreshold,
    pub optimization_config: serde_json::Value,
}

/// Remediation plan for addressing check failures
#[derive(Debug)]
pub struct RemediationPlan {
    pub actions: Vec<RemediationAction>,
    pub estimated_time_minutes: u32,
    pub risk_level: RiskLevel,
}

/// Individual remediation action
#[derive(Debug)]
pub struct RemediationAction {
    pub id: String,
    pub description: String,
    pub estimated_time_minutes: u32,
    pub risk_level: RiskLevel,
    pub automated: bool,
}

/// Risk level for remediation actions
#[derive(Debug, Clone, PartialOrd, Ord, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Policy definition for compliance checks
#[derive(Debug)]
struct Policy {
    name: String,
    requirements: Vec<String>,
    severity: Severity,
}

