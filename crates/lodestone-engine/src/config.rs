//! Configuration for the retrieval engine

use serde::{Deserialize, Serialize};

/// Configuration for the retrieval engine
///
/// An immutable snapshot applied at engine construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Enable document-corpus retrieval during context assembly
    pub use_rag: bool,

    /// Cap on retrieved chunks per retrieval pass
    pub rag_num_results: usize,

    /// Minimum cosine similarity to keep a candidate, in [-1, 1]
    pub rag_similarity_threshold: f32,

    /// Maximum new tokens requested from the generation backend
    pub max_context_length: usize,

    /// Enable chunking of documents and of oversized caller context
    pub context_chunking: bool,
}

impl EngineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.rag_num_results == 0 {
            return Err("rag_num_results must be greater than 0".to_string());
        }
        if !(-1.0..=1.0).contains(&self.rag_similarity_threshold) {
            return Err(format!(
                "rag_similarity_threshold {} out of range [-1.0, 1.0]",
                self.rag_similarity_threshold
            ));
        }
        if self.max_context_length == 0 {
            return Err("max_context_length must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Strict preset: higher similarity bar, fewer retrieved chunks
    pub fn strict() -> Self {
        Self {
            rag_similarity_threshold: 0.5,
            rag_num_results: 2,
            ..Self::default()
        }
    }

    /// Preset with corpus retrieval disabled
    pub fn without_rag() -> Self {
        Self {
            use_rag: false,
            ..Self::default()
        }
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for EngineConfig {
    /// Defaults: RAG on, 3 results, 0.3 threshold, 512-token generation
    /// budget, context chunking on
    fn default() -> Self {
        Self {
            use_rag: true,
            rag_num_results: 3,
            rag_similarity_threshold: 0.3,
            max_context_length: 512,
            context_chunking: true,
        }
    }
}
