//! Embedding quantization and optimization

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Embedding quantization manager
#[derive(Debug)]
pub struct EmbeddingQuantization {
    /// Quantization type
    quantization_type: QuantizationType,
    /// Quantization parameters
    params: QuantizationParams,
}

impl EmbeddingQuantization {
    /// Create new quantization with default settings
    pub fn new() -> Self {
        Self {
            quantization_type: QuantizationType::None,
            params: QuantizationParams::default(),
        }
    }

    /// Create quantization with specific type
    pub fn with_type(quantization_type: QuantizationType) -> Self {
        Self {
            quantization_type,
            params: QuantizationParams::default(),
        }
    }

    /// Quantize a single embedding vector
    pub fn quantize(&self, embedding: &[f32]) -> Result<Vec<f32>> {
        match self.quantization_type {
            QuantizationType::None => Ok(embedding.to_vec()),
            QuantizationType::Scalar8Bit => self.quantize_scalar_8bit(embedding),
            QuantizationType::Scalar4Bit => self.quantize_scalar_4bit(embedding),
            QuantizationType::ProductQuantization { .. } => {
                // Placeholder for PQ implementation
                tracing::warn!("Product quantization not implemented, returning original");
                Ok(embedding.to_vec())
            }
            QuantizationType::Binary => self.quantize_binary(embedding),
        }
    }

    /// Dequantize a quantized embedding vector
    pub fn dequantize(&self, quantized: &[f32]) -> Result<Vec<f32>> {
        match self.quantization_type {
            QuantizationType::None => Ok(quantized.to_vec()),
            QuantizationType::Scalar8Bit => self.dequantize_scalar_8bit(quantized),
            QuantizationType::Scalar4Bit => self.dequantize_scalar_4bit(quantized),
            QuantizationType::ProductQuantization { .. } => {
                // Placeholder for PQ implementation
                tracing::warn!("Product quantization not implemented, returning original");
                Ok(quantized.to_vec())
            }
            QuantizationType::Binary => self.dequantize_binary(quantized),
        }
    }

    /// Get quantization overhead (storage reduction factor)
    pub fn compression_ratio(&self) -> f32 {
        match self.quantization_type {
            QuantizationType::None => 1.0,
            QuantizationType::Scalar8Bit => 0.5, // f32 -> u8 + scale
            QuantizationType::Scalar4Bit => 0.25, // f32 -> u4 + scale
            QuantizationType::ProductQuantization { subvector_size } => {
                // Rough estimate for PQ
                (subvector_size as f32) / 32.0
            }
            QuantizationType::Binary => 0.03125, // f32 -> 1 bit
        }
    }

    fn quantize_scalar_8bit(&self, embedding: &[f32]) -> Result<Vec<f32>> {
        if embedding.is_empty() {
            return Ok(vec![]);
        }

        let min_val = embedding.iter().fold(f32::INFINITY, |a, &b| a.min(b));
        let max_val = embedding.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
        let scale = if (max_val - min_val).abs() < f32::EPSILON {
            1.0
        } else {
            255.0 / (max_val - min_val)
        };

        let quantized: Vec<f32> = embedding
            .iter()
            .map(|&x| ((x - min_val) * scale).round().max(0.0).min(255.0))
            .collect();

        // Store scale and offset as first two elements
        let mut result = vec![scale, min_val];
        result.extend(quantized);

        Ok(result)
    }

    fn dequantize_scalar_8bit(&self, quantized: &[f32]) -> Result<Vec<f32>> {
        if quantized.len() < 2 {
            return Err(anyhow::anyhow!("Invalid quantized data"));
        }

        let scale = quantized[0];
        let offset = quantized[1];
        let data = &quantized[2..];

        Ok(data
            .iter()
            .map(|&x| x / scale + offset)
            .collect())
    }

    fn quantize_scalar_4bit(&self, _embedding: &[f32]) -> Result<Vec<f32>> {
        // Placeholder - would implement 4-bit quantization
        tracing::warn!("4-bit quantization not implemented, returning original");
        Ok(_embedding.to_vec())
    }

    fn dequantize_scalar_4bit(&self, _quantized: &[f32]) -> Result<Vec<f32>> {
        // Placeholder - would implement 4-bit dequantization
        tracing::warn!("4-bit dequantization not implemented, returning original");
        Ok(_quantized.to_vec())
    }

    fn quantize_binary(&self, embedding: &[f32]) -> Result<Vec<f32>> {
        // Simple binary quantization: sign(x)
        Ok(embedding
            .iter()
            .map(|&x| if x >= 0.0 { 1.0 } else { -1.0 })
            .collect())
    }

    fn dequantize_binary(&self, quantized: &[f32]) -> Result<Vec<f32>> {
        // Binary dequantization is identity for binary vectors
        Ok(quantized.to_vec())
    }
}

impl Default for EmbeddingQuantization {
    fn default() -> Self {
        Self::new()
    }
}

/// Quantization types
#[derive(Debug, Clone, PartialEq)]
pub enum QuantizationType {
    /// No quantization
    None,
    /// 8-bit scalar quantization
    Scalar8Bit,
    /// 4-bit scalar quantization
    Scalar4Bit,
    /// Product quantization with specified subvector size
    ProductQuantization { subvector_size: usize },
    /// Binary quantization (sign function)
    Binary,
}

/// Quantization parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantizationParams {
    /// Block size for blocked quantization
    pub block_size: usize,
    /// Number of bits per value
    pub bits_per_value: usize,
    /// Whether to use symmetric quantization
    pub symmetric: bool,
    /// Quantization range (for asymmetric quantization)
    pub quant_min: Option<f32>,
    pub quant_max: Option<f32>,
}

impl Default for QuantizationParams {
    fn default() -> Self {
        Self {
            block_size: 64,
            bits_per_value: 8,
            symmetric: true,
            quant_min: None,
            quant_max: None,
        }
    }
}
