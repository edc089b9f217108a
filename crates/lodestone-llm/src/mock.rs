//! Deterministic mock backends for testing
//!
//! `MockGenerator` returns scripted responses without network calls and
//! records every prompt it sees, so tests can assert what reached the model.
//! `MockEmbedder` produces hash-based, unit-normalized vectors: deterministic
//! and diverse, without requiring model files.

use crate::ModelError;
use async_trait::async_trait;
use lodestone_domain::{Embedder, TextGenerator};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};

/// Mock text-generation backend for deterministic testing
///
/// Responses are matched by prompt substring, falling back to a fixed default.
///
/// # Examples
///
/// ```
/// use lodestone_llm::MockGenerator;
/// use lodestone_domain::TextGenerator;
///
/// # async fn example() {
/// let mut backend = MockGenerator::new("default answer");
/// backend.add_response("rent", "$2500 per month");
///
/// assert_eq!(backend.generate("what is the rent?", 512).await.unwrap(), "$2500 per month");
/// assert_eq!(backend.generate("anything else", 512).await.unwrap(), "default answer");
/// assert_eq!(backend.call_count(), 2);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockGenerator {
    default_response: String,
    responses: Arc<Mutex<Vec<(String, String)>>>,
    fail_on: Arc<Mutex<Vec<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockGenerator {
    /// Create a mock that answers every prompt with `response`
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(Vec::new())),
            fail_on: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer prompts containing `substring` with `response`
    ///
    /// Earlier registrations win when several substrings match.
    pub fn add_response(&mut self, substring: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push((substring.into(), response.into()));
    }

    /// Fail prompts containing `substring` with an error
    pub fn add_error(&mut self, substring: impl Into<String>) {
        self.fail_on.lock().unwrap().push(substring.into());
    }

    /// Number of generate calls seen so far
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// All prompts seen so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// The most recent prompt, if any call was made
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    type Error = ModelError;

    async fn generate(
        &self,
        prompt: &str,
        _max_new_tokens: usize,
    ) -> Result<String, Self::Error> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let fail_on = self.fail_on.lock().unwrap();
        if fail_on.iter().any(|needle| prompt.contains(needle)) {
            return Err(ModelError::Other("Mock error".to_string()));
        }
        drop(fail_on);

        let responses = self.responses.lock().unwrap();
        if let Some((_, response)) = responses
            .iter()
            .find(|(needle, _)| prompt.contains(needle))
        {
            return Ok(response.clone());
        }

        Ok(self.default_response.clone())
    }
}

/// Mock embedding backend producing hash-based deterministic vectors
///
/// The embeddings are:
///
/// - **Deterministic**: same text always produces the same vector
/// - **Normalized**: unit length, matching the contract real backends honor
/// - **Diverse**: different texts produce different vectors
///
/// Hash-based vectors carry no semantics; tests that need controllable
/// similarity should implement `Embedder` directly.
pub struct MockEmbedder {
    dimension: usize,
    loaded: bool,
}

impl MockEmbedder {
    /// Create a loaded mock embedder with the given dimension
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            loaded: true,
        }
    }

    /// Create a mock whose backend never finished loading
    ///
    /// Every embed call fails with `ModelError::NotInitialized`.
    pub fn unloaded(dimension: usize) -> Self {
        Self {
            dimension,
            loaded: false,
        }
    }

    /// Hash text with a seed to get a deterministic value in [-1, 1]
    fn hash_with_seed(text: &str, seed: u64) -> f32 {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        seed.hash(&mut hasher);
        let hash_value = hasher.finish();

        let normalized = (hash_value as f64 / u64::MAX as f64) * 2.0 - 1.0;
        normalized as f32
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    type Error = ModelError;

    async fn embed(&self, text: &str) -> Result<Vec<f32>, Self::Error> {
        if !self.loaded {
            return Err(ModelError::NotInitialized);
        }

        let mut embedding = Vec::with_capacity(self.dimension);
        for i in 0..self.dimension {
            embedding.push(Self::hash_with_seed(text, i as u64));
        }

        // Normalize to unit length for cosine similarity
        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut embedding {
                *value /= magnitude;
            }
        }

        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_generator_default() {
        let backend = MockGenerator::new("Test response");
        let result = backend.generate("any prompt", 512).await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_generator_substring_responses() {
        let mut backend = MockGenerator::default();
        backend.add_response("hello", "world");
        backend.add_response("foo", "bar");

        assert_eq!(backend.generate("say hello now", 512).await.unwrap(), "world");
        assert_eq!(backend.generate("foo here", 512).await.unwrap(), "bar");
        assert_eq!(
            backend.generate("unknown", 512).await.unwrap(),
            "Default mock response"
        );
    }

    #[tokio::test]
    async fn test_mock_generator_records_prompts() {
        let backend = MockGenerator::new("ok");

        assert_eq!(backend.call_count(), 0);
        backend.generate("prompt one", 512).await.unwrap();
        backend.generate("prompt two", 512).await.unwrap();

        assert_eq!(backend.call_count(), 2);
        assert_eq!(backend.prompts(), vec!["prompt one", "prompt two"]);
        assert_eq!(backend.last_prompt().unwrap(), "prompt two");
    }

    #[tokio::test]
    async fn test_mock_generator_error_injection() {
        let mut backend = MockGenerator::default();
        backend.add_error("bad");

        let result = backend.generate("a bad prompt", 512).await;
        assert!(matches!(result, Err(ModelError::Other(_))));
    }

    #[tokio::test]
    async fn test_mock_embedder_deterministic() {
        let backend = MockEmbedder::new(384);

        let text = "The quick brown fox jumps over the lazy dog";
        let a = backend.embed(text).await.unwrap();
        let b = backend.embed(text).await.unwrap();
        assert_eq!(a, b, "Same text should produce same embedding");
    }

    #[tokio::test]
    async fn test_mock_embedder_dimension() {
        let backend = MockEmbedder::new(128);
        let embedding = backend.embed("test").await.unwrap();
        assert_eq!(embedding.len(), 128);
        assert_eq!(backend.dimension(), 128);
    }

    #[tokio::test]
    async fn test_mock_embedder_normalized() {
        let backend = MockEmbedder::new(384);
        let embedding = backend.embed("test text").await.unwrap();

        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!(
            (magnitude - 1.0).abs() < 0.0001,
            "Embedding should be unit length"
        );
    }

    #[tokio::test]
    async fn test_mock_embedder_different_texts() {
        let backend = MockEmbedder::new(384);
        let a = backend.embed("hello world").await.unwrap();
        let b = backend.embed("goodbye world").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_mock_embedder_unloaded() {
        let backend = MockEmbedder::unloaded(384);
        let result = backend.embed("anything").await;
        assert!(matches!(result, Err(ModelError::NotInitialized)));
    }
}
