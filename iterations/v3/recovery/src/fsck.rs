//! Filesystem check and verification
//!
//! @author @darianrosebrook

use anyhow::Result;
use crate::api::*;

/// Filesystem checker implementation
pub struct Fsck {
    // Implementation details will be added in later phases
}

impl Default for Fsck {
    fn default() -> Self {
        Self::new()
    }
}

impl Fsck {
    /// Create a new filesystem checker
    pub fn new() -> Self {
        Self {}
    }

    /// Run filesystem check
    pub async fn check(&self, scope: FsckScope) -> Result<FsckReport> {
        // Implementation will be added in later phases
        Ok(FsckReport {
            status: FsckStatus::Ok,
            issues: Vec::new(),
            objects_checked: 0,
            objects_corrupted: 0,
            refs_checked: 0,
            refs_dangling: 0,
        })
    }

    /// Rebuild SQLite index from Merkle trees
    pub async fn reindex(&self) -> Result<()> {
        // Implementation will be added in later phases
        Ok(())
    }
}
