//! Version Manager - Model Version Control
//!
//! Manages model versions, compatibility, and upgrade paths
//! with automated compatibility testing and migration support.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use semver::Version;

/// Version information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Semantic version
    pub version: Version,
    /// Compatibility level
    pub compatibility_level: u32,
    /// Breaking changes flag
    pub has_breaking_changes: bool,
    /// Migration required
    pub migration_required: bool,
}

/// Version manager for model lifecycle
#[derive(Debug)]
pub struct VersionManager {
    // Placeholder implementation
}

impl VersionManager {
    /// Create a new version manager
    pub fn new() -> Self {
        Self {}
    }

    /// Check version compatibility
    pub async fn check_compatibility(&self, from_version: &Version, to_version: &Version) -> Result<bool> {
        // TODO: Implement compatibility checking
        Ok(from_version < to_version)
    }

    /// Check if a version exists for a model
    pub async fn version_exists(&self, _model_id: &str, _version: &str) -> Result<bool> {
        // TODO: Implement version existence checking
        Ok(true)
    }

    /// Get version information
    pub async fn get_version_info(&self, model_id: &str) -> Result<VersionInfo> {
        // TODO: Implement version info retrieval
        Ok(VersionInfo {
            version: Version::parse("1.0.0")?,
            compatibility_level: 1,
            has_breaking_changes: false,
            migration_required: false,
        })
    }
}
