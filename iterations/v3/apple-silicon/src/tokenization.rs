//! Tokenization utilities

use anyhow::Result;

/// Tokenizer configuration
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    pub vocab_size: usize,
    pub max_length: usize,
    pub special_tokens: SpecialTokens,
}

/// Tokenizer type
#[derive(Debug, Clone)]
pub enum TokenizerType {
    WordPiece,
    BPE,
    SentencePiece,
}

/// Special tokens
#[derive(Debug, Clone)]
pub struct SpecialTokens {
    pub pad_token: String,
    pub unk_token: String,
    pub cls_token: String,
    pub sep_token: String,
    pub mask_token: String,
}

/// Base tokenizer trait
pub trait Tokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>>;
    fn decode(&self, tokens: &[u32]) -> Result<String>;
    fn vocab_size(&self) -> usize;
}

/// Word-level tokenizer
#[derive(Debug)]
pub struct WordTokenizer {
    config: TokenizerConfig,
}

impl WordTokenizer {
    pub fn new(config: TokenizerConfig) -> Self {
        Self { config }
    }
}

impl Tokenizer for WordTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        // Simple word-level tokenization
        Ok(text.split_whitespace()
            .take(self.config.max_length)
            .enumerate()
            .map(|(i, _)| i as u32)
            .collect())
    }

    fn decode(&self, tokens: &[u32]) -> Result<String> {
        // Placeholder decode
        Ok(format!("decoded_{}_tokens", tokens.len()))
    }

    fn vocab_size(&self) -> usize {
        self.config.vocab_size
    }
}

/// HuggingFace tokenizer wrapper
#[derive(Debug)]
pub struct HfTokenizer {
    vocab_size: usize,
}

impl HfTokenizer {
    pub fn new(vocab_size: usize) -> Self {
        Self { vocab_size }
    }
}

impl Tokenizer for HfTokenizer {
    fn encode(&self, _text: &str) -> Result<Vec<u32>> {
        // Placeholder implementation
        Ok(vec![1, 2, 3])
    }

    fn decode(&self, _tokens: &[u32]) -> Result<String> {
        // Placeholder implementation
        Ok("decoded text".to_string())
    }

    fn vocab_size(&self) -> usize {
        self.vocab_size
    }
}

/// Create a tokenizer based on type
pub fn create_tokenizer(tokenizer_type: TokenizerType, config: TokenizerConfig) -> Box<dyn Tokenizer> {
    match tokenizer_type {
        TokenizerType::WordPiece => Box::new(WordTokenizer::new(config)),
        TokenizerType::BPE => Box::new(HfTokenizer::new(config.vocab_size)),
        TokenizerType::SentencePiece => Box::new(HfTokenizer::new(config.vocab_size)),
    }
}
