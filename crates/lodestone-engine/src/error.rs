//! Error types for the retrieval engine
//!
//! Malformed similarity inputs are never errors: they score a neutral 0 in
//! `similarity`. An empty generation result is never an error either; it
//! surfaces as an empty string.

use thiserror::Error;

/// Errors that can occur during retrieval and generation
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration rejected by validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Embedding backend unavailable or not loaded
    #[error("Embedding backend unavailable: {0}")]
    NotInitialized(String),

    /// Generation backend failure
    #[error("Generation failed: {0}")]
    Generation(String),
}
