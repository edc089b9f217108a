//! Trait definitions for the model collaborators
//!
//! These traits define the boundaries between the retrieval core and the
//! model backends. Implementations live in other crates (lodestone-llm).
//! Generation and embedding are asynchronous suspension points; tokenization
//! is synchronous and owns no logic beyond the encode/decode boundary.

use async_trait::async_trait;

/// Trait for text-generation backends
///
/// Implemented by the infrastructure layer (lodestone-llm)
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Error type for generation operations
    type Error: std::fmt::Display + Send;

    /// Generate a completion for `prompt`, producing at most `max_new_tokens`
    /// new tokens
    async fn generate(&self, prompt: &str, max_new_tokens: usize)
        -> Result<String, Self::Error>;
}

/// Trait for embedding backends
///
/// Implemented by the infrastructure layer (lodestone-llm)
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Error type for embedding operations
    type Error: std::fmt::Display + Send;

    /// Embed `text` into a mean-pooled, unit-length-normalized vector
    ///
    /// An unavailable backend must fail, never return empty or zero vectors.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, Self::Error>;

    /// Dimension of the vectors this backend produces
    fn dimension(&self) -> usize;
}

/// Trait for tokenizer adapters
pub trait Tokenizer: Send + Sync {
    /// Encode text into a token-id sequence
    fn encode(&self, text: &str) -> Vec<u32>;

    /// Decode a token-id sequence back to text, stripping special and
    /// control tokens
    fn decode(&self, ids: &[u32]) -> String;
}
