use crate::types::*;
use anyhow::Result;
use tracing::debug;

/// Context manager for processing and managing context data
#[derive(Debug)]
pub struct ContextManager {
    /// Manager configuration
    config: ContextPreservationConfig,
}

impl ContextManager {
    /// Create a new context manager
    pub fn new(config: ContextPreservationConfig) -> Result<Self> {
        debug!("Initializing context manager");
        Ok(Self { config })
    }

    /// Process context data
    pub async fn process_context_data(&self, context_data: &ContextData) -> Result<ContextData> {
        debug!("Processing context data");

        // TODO: Implement context data processing with the following requirements:
        // 1. Data format validation: Validate context data format and structure
        //    - Validate context data format and schema compliance
        //    - Check data integrity and consistency
        //    - Handle data format validation error detection and reporting
        // 2. Data compression: Compress data if needed for efficiency
        //    - Implement data compression algorithms and strategies
        //    - Handle compression performance and optimization
        //    - Handle data compression error detection and reporting
        // 3. Data encryption: Encrypt data if needed for security
        //    - Implement data encryption algorithms and key management
        //    - Handle encryption performance and security
        //    - Handle data encryption error detection and reporting
        // 4. Data processing optimization: Optimize data processing performance
        //    - Implement efficient data processing algorithms
        //    - Handle large-scale data processing operations
        //    - Optimize data processing quality and reliability
        // 4. Calculate checksum
        // 5. Apply any transformations

        Ok(context_data.clone())
    }
}
