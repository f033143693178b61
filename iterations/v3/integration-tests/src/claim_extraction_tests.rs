//! Integration tests for the Claim Extraction system

use anyhow::Result;
use tracing::{debug, info};

use crate::fixtures::{TestDataGenerator, TestFixtures};
use crate::mocks::{MockDatabase, MockEventEmitter, MockFactory, MockMetricsCollector};
use crate::test_utils::{TestExecutor, TestResult, DEFAULT_TEST_TIMEOUT};

/// Claim Extraction integration test suite
pub struct ClaimExtractionIntegrationTests {
    executor: TestExecutor,
    mock_db: MockDatabase,
    mock_events: MockEventEmitter,
    mock_metrics: MockMetricsCollector,
}

impl ClaimExtractionIntegrationTests {
    pub fn new() -> Self {
        Self {
            executor: TestExecutor::new(DEFAULT_TEST_TIMEOUT),
            mock_db: MockFactory::create_database(),
            mock_events: MockFactory::create_event_emitter(),
            mock_metrics: MockFactory::create_metrics_collector(),
        }
    }

    /// Run all claim extraction integration tests
    pub async fn run_all_tests(&self) -> Result<Vec<TestResult>> {
        info!("Running Claim Extraction integration tests");

        let mut results = Vec::new();

        // Test disambiguation stage
        results.push(
            self.executor
                .execute(
                    "claim_extraction_disambiguation",
                    self.test_disambiguation_stage(),
                )
                .await,
        );

        // Test qualification stage
        results.push(
            self.executor
                .execute(
                    "claim_extraction_qualification",
                    self.test_qualification_stage(),
                )
                .await,
        );

        // Test decomposition stage
        results.push(
            self.executor
                .execute(
                    "claim_extraction_decomposition",
                    self.test_decomposition_stage(),
                )
                .await,
        );

        // Test verification stage
        results.push(
            self.executor
                .execute(
                    "claim_extraction_verification",
                    self.test_verification_stage(),
                )
                .await,
        );

        // Test end-to-end pipeline
        results.push(
            self.executor
                .execute("claim_extraction_pipeline", self.test_end_to_end_pipeline())
                .await,
        );

        // Test error handling
        results.push(
            self.executor
                .execute(
                    "claim_extraction_error_handling",
                    self.test_error_handling(),
                )
                .await,
        );

        Ok(results)
    }

    /// Test disambiguation stage
    async fn test_disambiguation_stage(&self) -> Result<()> {
        debug!("Testing claim extraction disambiguation stage");

        // Setup test data with ambiguous content
        let ambiguous_input = serde_json::json!({
            "text": "The system should implement user authentication with JWT tokens. It should validate all inputs and handle errors properly.",
            "context": {
                "domain": "authentication",
                "previous_context": "We need to secure the application"
            }
        });

        // TODO: Initialize disambiguation stage
        // let disambiguation_stage = DisambiguationStage::new()
        //     .with_database(Arc::new(self.mock_db.clone()))
        //     .with_events(Arc::new(self.mock_events.clone()))
        //     .build()?;

        // TODO: Test disambiguation
        // let disambiguation_result = disambiguation_stage.process(&ambiguous_input).await?;
        // assert!(!disambiguation_result.resolved_claims.is_empty());
        // assert!(disambiguation_result.confidence > 0.0);

        // Verify disambiguation events
        let events = self.mock_events.get_events().await;
        // assert!(events.iter().any(|e| e.event_type == "disambiguation_completed"));

        info!("✅ Disambiguation stage test completed");
        Ok(())
    }

    /// Test qualification stage
    async fn test_qualification_stage(&self) -> Result<()> {
        debug!("Testing claim extraction qualification stage");

        // Setup test data with verifiable and non-verifiable content
        let mixed_input = serde_json::json!({
            "text": "The system should implement JWT authentication (verifiable) and be user-friendly (non-verifiable). It should handle 1000 concurrent users (verifiable) and provide a great user experience (non-verifiable).",
            "context": {
                "domain": "authentication",
                "verification_sources": ["documentation", "testing", "monitoring"]
            }
        });

        // TODO: Initialize qualification stage
        // let qualification_stage = QualificationStage::new()
        //     .with_database(Arc::new(self.mock_db.clone()))
        //     .with_events(Arc::new(self.mock_events.clone()))
        //     .build()?;

        // TODO: Test qualification
        // let qualification_result = qualification_stage.process(&mixed_input).await?;
        // assert!(!qualification_result.verifiable_claims.is_empty());
        // assert!(!qualification_result.non_verifiable_claims.is_empty());

        // Verify qualification events
        let events = self.mock_events.get_events().await;
        // assert!(events.iter().any(|e| e.event_type == "qualification_completed"));

        info!("✅ Qualification stage test completed");
        Ok(())
    }

    /// Test decomposition stage
    async fn test_decomposition_stage(&self) -> Result<()> {
        debug!("Testing claim extraction decomposition stage");

        // Setup test data with complex claims
        let complex_input = serde_json::json!({
            "text": "The authentication system must implement JWT tokens with RS256 signing, validate tokens on every request, store user sessions securely, and provide role-based access control.",
            "context": {
                "domain": "authentication",
                "scope": {
                    "in": ["src/auth/", "tests/auth/"],
                    "out": ["node_modules/", "dist/"]
                }
            }
        });

        // TODO: Initialize decomposition stage
        // let decomposition_stage = DecompositionStage::new()
        //     .with_database(Arc::new(self.mock_db.clone()))
        //     .with_events(Arc::new(self.mock_events.clone()))
        //     .build()?;

        // TODO: Test decomposition
        // let decomposition_result = decomposition_stage.process(&complex_input).await?;
        // assert!(!decomposition_result.atomic_claims.is_empty());
        // assert!(decomposition_result.atomic_claims.len() >= 4); // Should decompose into multiple atomic claims

        // Verify each atomic claim is properly scoped
        // for claim in &decomposition_result.atomic_claims {
        //     assert!(!claim.content.is_empty());
        //     assert!(claim.scope.is_some());
        // }

        info!("✅ Decomposition stage test completed");
        Ok(())
    }

    /// Test verification stage
    async fn test_verification_stage(&self) -> Result<()> {
        debug!("Testing claim extraction verification stage");

        // Setup test data with atomic claims
        let atomic_claims = vec![
            serde_json::json!({
                "id": "claim-001",
                "content": "JWT tokens are implemented with RS256 signing",
                "scope": {
                    "in": ["src/auth/jwt.rs"],
                    "out": []
                },
                "verification_criteria": {
                    "sources": ["code_review", "unit_tests", "integration_tests"],
                    "confidence_threshold": 0.8
                }
            }),
            serde_json::json!({
                "id": "claim-002",
                "content": "Token validation occurs on every request",
                "scope": {
                    "in": ["src/auth/middleware.rs"],
                    "out": []
                },
                "verification_criteria": {
                    "sources": ["code_review", "integration_tests"],
                    "confidence_threshold": 0.9
                }
            }),
        ];

        // TODO: Initialize verification stage
        // let verification_stage = VerificationStage::new()
        //     .with_database(Arc::new(self.mock_db.clone()))
        //     .with_events(Arc::new(self.mock_events.clone()))
        //     .build()?;

        // TODO: Test verification
        // let verification_result = verification_stage.process(&atomic_claims).await?;
        // assert!(!verification_result.verified_claims.is_empty());

        // Verify each claim has evidence
        // for claim in &verification_result.verified_claims {
        //     assert!(!claim.evidence.is_empty());
        //     assert!(claim.confidence >= 0.0);
        //     assert!(claim.confidence <= 1.0);
        // }

        info!("✅ Verification stage test completed");
        Ok(())
    }

    /// Test end-to-end pipeline
    async fn test_end_to_end_pipeline(&self) -> Result<()> {
        debug!("Testing claim extraction end-to-end pipeline");

        // Setup test data
        let claim_extraction_input = TestFixtures::claim_extraction_input();

        // TODO: Initialize complete pipeline
        // let pipeline = ClaimExtractionPipeline::new()
        //     .with_database(Arc::new(self.mock_db.clone()))
        //     .with_events(Arc::new(self.mock_events.clone()))
        //     .with_metrics(Arc::new(self.mock_metrics.clone()))
        //     .build()?;

        // TODO: Test complete pipeline
        // let pipeline_result = pipeline.process(&claim_extraction_input).await?;
        // assert!(!pipeline_result.verified_claims.is_empty());
        // assert!(pipeline_result.overall_confidence > 0.0);

        // Verify all stages were executed
        let events = self.mock_events.get_events().await;
        // assert!(events.iter().any(|e| e.event_type == "disambiguation_completed"));
        // assert!(events.iter().any(|e| e.event_type == "qualification_completed"));
        // assert!(events.iter().any(|e| e.event_type == "decomposition_completed"));
        // assert!(events.iter().any(|e| e.event_type == "verification_completed"));

        // Verify pipeline metrics
        let metrics = self.mock_metrics.get_all_metrics().await;
        // assert!(metrics.contains_key("pipeline_execution_time_ms"));
        // assert!(metrics.contains_key("claims_extracted_count"));
        // assert!(metrics.contains_key("claims_verified_count"));

        info!("✅ End-to-end pipeline test completed");
        Ok(())
    }

    /// Test error handling
    async fn test_error_handling(&self) -> Result<()> {
        debug!("Testing claim extraction error handling");

        // Setup test data with intentional errors
        let invalid_input = serde_json::json!({
            "text": "", // Invalid: empty text
            "context": {
                "domain": "", // Invalid: empty domain
            }
        });

        // TODO: Initialize pipeline
        // let pipeline = ClaimExtractionPipeline::new()
        //     .with_database(Arc::new(self.mock_db.clone()))
        //     .with_events(Arc::new(self.mock_events.clone()))
        //     .build()?;

        // TODO: Test error handling
        // let result = pipeline.process(&invalid_input).await;
        // assert!(result.is_err());

        // Verify error events were emitted
        let events = self.mock_events.get_events().await;
        // assert!(events.iter().any(|e| e.event_type == "pipeline_error"));

        // Test recovery mechanisms
        // let recovery_result = pipeline.recover_from_error(&invalid_input).await?;
        // assert!(recovery_result.recovered);

        info!("✅ Error handling test completed");
        Ok(())
    }
}

impl Default for ClaimExtractionIntegrationTests {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_claim_extraction_integration_tests_creation() {
        let tests = ClaimExtractionIntegrationTests::new();
        assert_eq!(tests.mock_db.count().await, 0);
        assert_eq!(tests.mock_events.event_count().await, 0);
    }

    #[tokio::test]
    async fn test_claim_extraction_mock_setup() {
        let tests = ClaimExtractionIntegrationTests::new();

        let claim_input = TestFixtures::claim_extraction_input();
        tests
            .mock_db
            .insert("claim-input-123".to_string(), claim_input)
            .await
            .unwrap();

        assert_eq!(tests.mock_db.count().await, 1);
    }
}
