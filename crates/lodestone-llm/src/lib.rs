//! Lodestone Model Backends
//!
//! Pluggable implementations of the collaborator traits from
//! `lodestone-domain`: text generation, embedding, and tokenization.
//!
//! # Backends
//!
//! - `OllamaProvider`: local Ollama API integration for both generation and
//!   embeddings
//! - `MockGenerator` / `MockEmbedder`: deterministic mocks for testing
//! - `HfTokenizer`: adapter over HuggingFace `tokenizers` files
//! - `WhitespaceTokenizer`: word-level interning tokenizer for tests
//!
//! # Examples
//!
//! ```
//! use lodestone_llm::MockGenerator;
//! use lodestone_domain::TextGenerator;
//!
//! # async fn example() {
//! let backend = MockGenerator::new("Hello from the model!");
//! let result = backend.generate("test prompt", 512).await.unwrap();
//! assert_eq!(result, "Hello from the model!");
//! # }
//! ```

#![warn(missing_docs)]

pub mod mock;
pub mod ollama;
pub mod tokenizer;

use thiserror::Error;

pub use mock::{MockEmbedder, MockGenerator};
pub use ollama::OllamaProvider;
pub use tokenizer::{HfTokenizer, WhitespaceTokenizer};

/// Errors that can occur in model backends
#[derive(Error, Debug)]
pub enum ModelError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the backend
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Backend requested before its model was loaded
    #[error("Model not initialized")]
    NotInitialized,

    /// Model not available at the endpoint
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Tokenizer file or vocabulary error
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// Generic error
    #[error("Model error: {0}")]
    Other(String),
}
