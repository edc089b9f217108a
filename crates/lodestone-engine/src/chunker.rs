//! Token-budget text chunking
//!
//! Splits oversized documents into model-sized pieces while respecting
//! paragraph boundaries where possible. Paragraphs are never merged to pack
//! a chunk to exactly the budget; they are only split further when a single
//! paragraph exceeds it.

use lodestone_domain::Tokenizer;
use std::sync::Arc;

/// Fixed per-chunk token budget
pub const CHUNK_TOKEN_BUDGET: usize = 512;

/// Splits text into chunks that tokenize to at most the token budget
///
/// Deterministic for identical input and tokenizer, and idempotent on text
/// that already fits the budget.
pub struct TextChunker<T: Tokenizer> {
    tokenizer: Arc<T>,
    budget: usize,
    enabled: bool,
}

impl<T: Tokenizer> TextChunker<T> {
    /// Create a chunker with the default 512-token budget
    ///
    /// When `enabled` is false, `chunk` passes text through untouched.
    pub fn new(tokenizer: Arc<T>, enabled: bool) -> Self {
        Self {
            tokenizer,
            budget: CHUNK_TOKEN_BUDGET,
            enabled,
        }
    }

    /// Override the token budget (primarily for tests)
    pub fn with_budget(mut self, budget: usize) -> Self {
        self.budget = budget;
        self
    }

    /// The token budget chunks are held to
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Split `text` into chunks of at most the token budget
    ///
    /// - Chunking disabled, or the whole text within budget: `[text]`
    ///   unchanged, no chunking overhead.
    /// - Otherwise the text is split on blank-line boundaries; paragraphs
    ///   within budget are emitted verbatim, longer ones are windowed into
    ///   non-overlapping token runs of the budget size and decoded back to
    ///   text.
    /// - Empty and whitespace-only paragraphs are dropped, as are windows
    ///   that decode to nothing.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        if !self.enabled {
            return vec![text.to_string()];
        }

        if self.tokenizer.encode(text).len() <= self.budget {
            return vec![text.to_string()];
        }

        let mut chunks = Vec::new();
        for paragraph in text.split("\n\n") {
            if paragraph.trim().is_empty() {
                continue;
            }

            let ids = self.tokenizer.encode(paragraph);
            if ids.len() <= self.budget {
                chunks.push(paragraph.to_string());
                continue;
            }

            // Non-overlapping windows over the token sequence, decoded back
            // to text with special tokens stripped
            for window in ids.chunks(self.budget) {
                let decoded = self.tokenizer.decode(window);
                if !decoded.trim().is_empty() {
                    chunks.push(decoded);
                }
            }
        }

        chunks
    }
}
