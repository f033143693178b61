//! Embedding model loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Pre-trained model loader and manager
#[derive(Debug)]
pub struct EmbeddingModelManager {
    /// Available pre-trained models
    available_models: HashMap<String, EmbeddingModelInfo>,
    /// Currently loaded models
    loaded_models: HashMap<String, LoadedEmbeddingModel>,
    /// Model loading cache
    model_cache: lru::LruCache<String, std::sync::Arc<LoadedEmbeddingModel>>,
    /// Model directory paths
    model_directories: Vec<PathBuf>,
}

impl Default for EmbeddingModelManager {
    fn default() -> Self {
        Self {
            available_models: HashMap::new(),
            loaded_models: HashMap::new(),
            model_cache: lru::LruCache::new(std::num::NonZeroUsize::new(10).unwrap()),
            model_directories: vec![
                PathBuf::from("models"),
                PathBuf::from("embeddings"),
            ],
        }
    }
}

impl EmbeddingModelManager {
    /// Load a model by name
    pub async fn load_model(&mut self, name: &str) -> Result<&LoadedEmbeddingModel> {
        if let Some(model) = self.loaded_models.get(name) {
            return Ok(model);
        }

        if let Some(info) = self.available_models.get(name) {
            // Check cache first
            if let Some(cached) = self.model_cache.get(name) {
                self.loaded_models.insert(name.to_string(), (**cached).clone());
                return self.loaded_models.get(name).unwrap();
            }

            // Load model from disk
            let loaded = self.load_model_from_disk(info).await?;
            let arc_model = std::sync::Arc::new(loaded.clone());
            self.model_cache.put(name.to_string(), arc_model);
            self.loaded_models.insert(name.to_string(), loaded);
            Ok(self.loaded_models.get(name).unwrap())
        } else {
            Err(anyhow::anyhow!("Model {} not found", name))
        }
    }

    /// Scan directories for available models
    pub async fn scan_for_models(&mut self) -> Result<()> {
        for dir in &self.model_directories {
            if dir.exists() {
                self.scan_directory(dir).await?;
            }
        }
        Ok(())
    }

    async fn scan_directory(&mut self, dir: &Path) -> Result<()> {
        // Placeholder - would scan for model files and metadata
        tracing::debug!("Scanning directory: {:?}", dir);
        Ok(())
    }

    async fn load_model_from_disk(&self, info: &EmbeddingModelInfo) -> Result<LoadedEmbeddingModel> {
        // Placeholder - would load actual model files
        tracing::warn!("Model loading not fully implemented, returning placeholder for {}", info.name);

        Ok(LoadedEmbeddingModel {
            info: info.clone(),
            embeddings: vec![], // Would load actual embeddings
            vocabulary: HashMap::new(), // Would load actual vocabulary
            config: ModelConfig::default(),
        })
    }
}

/// Information about available embedding models
#[derive(Debug, Clone)]
pub struct EmbeddingModelInfo {
    /// Model name/identifier
    pub name: String,
    /// Model type (Word2Vec, GloVe, BERT, etc.)
    pub model_type: EmbeddingModelType,
    /// Embedding dimensionality
    pub embedding_dim: usize,
    /// Vocabulary size
    pub vocab_size: usize,
    /// File path to model
    pub file_path: PathBuf,
    /// Model format (binary, text, safetensors, etc.)
    pub format: ModelFormat,
    /// Model metadata
    pub metadata: HashMap<String, String>,
}

/// Loaded embedding model
#[derive(Debug, Clone)]
pub struct LoadedEmbeddingModel {
    /// Model information
    pub info: EmbeddingModelInfo,
    /// Loaded embedding vectors
    pub embeddings: Vec<Vec<f32>>,
    /// Vocabulary mapping
    pub vocabulary: HashMap<String, usize>,
    /// Model-specific configuration
    pub config: ModelConfig,
}

/// Model configuration parameters
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Normalization applied to embeddings
    pub normalization: NormalizationType,
    /// Whether model supports subword tokenization
    pub subword_support: bool,
    /// Case sensitivity
    pub case_sensitive: bool,
    /// Language/encoding
    pub language: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            normalization: NormalizationType::L2,
            subword_support: false,
            case_sensitive: true,
            language: "en".to_string(),
        }
    }
}

/// Embedding model types
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddingModelType {
    Word2Vec,
    GloVe,
    FastText,
    BERT,
    RoBERTa,
    GPT,
    Custom,
}

/// Model file formats
#[derive(Debug, Clone, PartialEq)]
pub enum ModelFormat {
    Binary,
    Text,
    SafeTensors,
    Pickle,
    ONNX,
}

/// Normalization types for embeddings
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizationType {
    None,
    L2,
    L1,
    UnitSphere,
}
