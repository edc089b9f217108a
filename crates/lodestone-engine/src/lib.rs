//! Lodestone Retrieval Engine
//!
//! The retrieval and context-assembly core: document chunking, embedding
//! storage, cosine-similarity ranking, bounded prompt construction, and the
//! generation facade. The text-generation and embedding models are external
//! collaborators reached through the `lodestone-domain` traits.
//!
//! # Architecture
//!
//! ```text
//! Documents → TextChunker → ChunkIndex
//!                               │
//! Query ────→ Embedder ──→ rank_chunks ──→ build_context ──→ generate
//! ```
//!
//! # Key Features
//!
//! - **Token-budget chunking**: paragraph-respecting splits, 512-token budget
//! - **Similarity retrieval**: thresholded, ranked, capped cosine search
//! - **Context assembly**: RAG context plus caller context, with a second
//!   retrieval pass over runaway-length caller context
//! - **Chat folding**: the last user message is the active query, the rest
//!   becomes history context
//!
//! # Example Usage
//!
//! ```no_run
//! use lodestone_engine::{EngineConfig, RagEngine};
//! use lodestone_llm::{MockEmbedder, MockGenerator, WhitespaceTokenizer};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = RagEngine::new(
//!     MockGenerator::new("It was built in 1889."),
//!     MockEmbedder::new(384),
//!     WhitespaceTokenizer::new(),
//!     EngineConfig::default(),
//! )?;
//!
//! engine
//!     .add_documents(&["The Eiffel Tower is 330 meters tall.".to_string()])
//!     .await?;
//!
//! let answer = engine.query("How tall is it?", "Answer briefly.", "").await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod chunker;
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod similarity;

// Re-exports for convenience
pub use chunker::{TextChunker, CHUNK_TOKEN_BUDGET};
pub use config::EngineConfig;
pub use engine::{RagEngine, NO_USER_MESSAGE};
pub use error::EngineError;
pub use index::ChunkIndex;
pub use similarity::{cosine_similarity, rank_chunks};
