//! Regression detection for model performance

use crate::types::*;
use anyhow::Result;

pub struct RegressionDetector {
    // TODO: Implement regression detector
}

impl RegressionDetector {
    pub fn new() -> Self {
        Self {}
    }

    pub async fn check_for_regressions(&self, _results: &[BenchmarkResult]) -> Result<Vec<RegressionAlert>> {
        // TODO: Implement regression detection
        Ok(vec![])
    }
}

