//! Multi-dimensional scoring system

use crate::types::*;
use anyhow::Result;

pub struct MultiDimensionalScoringSystem {
    // TODO: Implement scoring system
}

impl MultiDimensionalScoringSystem {
    pub fn new() -> Self {
        Self {}
    }

    pub async fn calculate_performance_summary(
        &self,
        _results: &[BenchmarkResult],
    ) -> Result<PerformanceSummary> {
        // TODO: Implement performance summary calculation
        Ok(PerformanceSummary {
            overall_performance: 0.0,
            performance_trend: PerformanceTrend::Stable,
            top_performers: vec![],
            improvement_areas: vec![],
        })
    }
}
