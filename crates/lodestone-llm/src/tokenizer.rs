//! Tokenizer adapters
//!
//! The chunker only needs the encode/decode boundary: text to token ids and
//! back, with special tokens stripped on decode. `HfTokenizer` adapts a
//! HuggingFace `tokenizers` file; `WhitespaceTokenizer` is a word-level
//! interning tokenizer for tests and examples.

use crate::ModelError;
use lodestone_domain::Tokenizer;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// Adapter over a HuggingFace `tokenizers` tokenizer file
pub struct HfTokenizer {
    inner: tokenizers::Tokenizer,
}

impl HfTokenizer {
    /// Load a tokenizer from a `tokenizer.json` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let inner = tokenizers::Tokenizer::from_file(path)
            .map_err(|e| ModelError::Tokenizer(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Tokenizer for HfTokenizer {
    fn encode(&self, text: &str) -> Vec<u32> {
        // No special tokens added: chunk windows must decode back to plain text
        self.inner
            .encode(text, false)
            .map(|encoding| encoding.get_ids().to_vec())
            .unwrap_or_default()
    }

    fn decode(&self, ids: &[u32]) -> String {
        self.inner.decode(ids, true).unwrap_or_default()
    }
}

/// Word-level interning tokenizer for tests
///
/// One token per whitespace-delimited word; decode joins words with single
/// spaces. Token counts are stable across calls because words are interned
/// in a shared vocabulary.
#[derive(Default)]
pub struct WhitespaceTokenizer {
    vocab: Mutex<Vocab>,
}

#[derive(Default)]
struct Vocab {
    words: Vec<String>,
    ids: HashMap<String, u32>,
}

impl WhitespaceTokenizer {
    /// Create an empty tokenizer
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn encode(&self, text: &str) -> Vec<u32> {
        let mut vocab = self.vocab.lock().unwrap();
        text.split_whitespace()
            .map(|word| {
                if let Some(&id) = vocab.ids.get(word) {
                    id
                } else {
                    let id = vocab.words.len() as u32;
                    vocab.words.push(word.to_string());
                    vocab.ids.insert(word.to_string(), id);
                    id
                }
            })
            .collect()
    }

    fn decode(&self, ids: &[u32]) -> String {
        let vocab = self.vocab.lock().unwrap();
        ids.iter()
            .filter_map(|&id| vocab.words.get(id as usize))
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }
}
