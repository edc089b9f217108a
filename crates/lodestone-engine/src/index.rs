//! Parallel chunk/embedding storage
//!
//! Chunk texts and their embedding vectors live in one owned struct so the
//! two arrays can only ever be rebuilt together and swapped wholesale.
//! Readers never observe chunks and embeddings from different generations.

use crate::error::EngineError;
use lodestone_domain::Embedder;
use tracing::debug;

/// Immutable parallel arrays of chunk texts and their embeddings
///
/// Invariant: `chunks.len() == embeddings.len()` at all times, with
/// `embeddings[i]` belonging to `chunks[i]`. Chunks are stored in insertion
/// order; retrieval reorders by similarity, but iteration order stays
/// deterministic for tests.
#[derive(Debug, Default)]
pub struct ChunkIndex {
    chunks: Vec<String>,
    embeddings: Vec<Vec<f32>>,
}

impl ChunkIndex {
    /// An index with no documents registered
    pub fn empty() -> Self {
        Self::default()
    }

    /// Embed every chunk, order-preserving, and build the index
    ///
    /// # Errors
    ///
    /// Fails with `NotInitialized` when the embedding backend is unavailable;
    /// a partially built index is never returned.
    pub async fn build<E: Embedder>(
        chunks: Vec<String>,
        embedder: &E,
    ) -> Result<Self, EngineError> {
        let mut embeddings = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            let embedding = embedder
                .embed(chunk)
                .await
                .map_err(|e| EngineError::NotInitialized(e.to_string()))?;
            embeddings.push(embedding);
        }

        debug!("Built chunk index with {} entries", chunks.len());
        Ok(Self { chunks, embeddings })
    }

    /// A new index holding this index's entries followed by `other`'s
    pub fn merged(&self, other: ChunkIndex) -> ChunkIndex {
        let mut chunks = self.chunks.clone();
        let mut embeddings = self.embeddings.clone();
        chunks.extend(other.chunks);
        embeddings.extend(other.embeddings);
        ChunkIndex { chunks, embeddings }
    }

    /// Chunk texts in insertion order
    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    /// Embedding vectors, parallel to `chunks`
    pub fn embeddings(&self) -> &[Vec<f32>] {
        &self.embeddings
    }

    /// Number of indexed chunks
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the index holds no chunks
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
