//! Core ML bridge for model loading

/// Core ML model wrapper
#[derive(Debug)]
pub struct CoreMLModel;

impl CoreMLModel {
    /// Compile a Core ML model
    pub fn compile(_path: &str, _compute_units: u32) -> Result<String> {
        // Placeholder implementation
        Ok("compiled_model.mlmodelc".to_string())
    }

    /// Load a compiled Core ML model
    pub fn load(_path: &str, _compute_units: u32) -> Result<Self> {
        // Placeholder implementation
        Ok(Self)
    }

    /// Get model schema
    pub fn schema(&self) -> Result<String> {
        // Placeholder implementation
        Ok("{}".to_string())
    }

    /// Run prediction
    pub fn predict(&self, _inputs: &str, _timeout_ms: i32) -> Result<String> {
        // Placeholder implementation
        Ok("{}".to_string())
    }
}
