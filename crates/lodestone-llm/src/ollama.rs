//! Ollama Backend Implementation
//!
//! Integrates with Ollama's local API for both collaborator roles: text
//! generation (`/api/generate`) and embeddings (`/api/embeddings`).
//!
//! # Features
//!
//! - Async HTTP communication with the Ollama API
//! - Configurable endpoint and models
//! - Retry logic with exponential backoff
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use lodestone_llm::OllamaProvider;
//!
//! // Generation via llama3, embeddings via nomic-embed-text (768 dims)
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3")
//!     .with_embedding_model("nomic-embed-text", 768);
//! ```

use crate::ModelError;
use async_trait::async_trait;
use lodestone_domain::{Embedder, TextGenerator};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for model requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama API backend for local generation and embeddings
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    embedding_model: String,
    embedding_dimension: usize,
    client: reqwest::Client,
    max_retries: u32,
}

/// Request body for the Ollama generate API
#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

/// Generation options forwarded to Ollama
#[derive(Serialize)]
struct GenerateOptions {
    num_predict: i64,
}

/// Response from the Ollama generate API
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

/// Request body for the Ollama embeddings API
#[derive(Serialize)]
struct EmbeddingsRequest {
    model: String,
    prompt: String,
}

/// Response from the Ollama embeddings API
#[derive(Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: generation model to use (e.g., "llama3", "mistral")
    ///
    /// The embedding model defaults to the generation model with a 0
    /// dimension; call [`with_embedding_model`](Self::with_embedding_model)
    /// before using this provider as an `Embedder`.
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        let model = model.into();
        Self {
            endpoint: endpoint.into(),
            embedding_model: model.clone(),
            embedding_dimension: 0,
            model,
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a provider against the default local endpoint
    pub fn default_endpoint(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Use a dedicated embedding model with a known vector dimension
    pub fn with_embedding_model(
        mut self,
        model: impl Into<String>,
        dimension: usize,
    ) -> Self {
        self.embedding_model = model.into();
        self.embedding_dimension = dimension;
        self
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Generate text using the Ollama API
    ///
    /// # Errors
    ///
    /// Returns an error if Ollama is not running, the model is not
    /// available, network communication fails, or the response is malformed.
    pub async fn generate_text(
        &self,
        prompt: &str,
        max_new_tokens: usize,
    ) -> Result<String, ModelError> {
        let url = format!("{}/api/generate", self.endpoint);

        let request_body = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: GenerateOptions {
                num_predict: max_new_tokens as i64,
            },
        };

        // Retry logic with exponential backoff
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.post(&url).json(&request_body).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        return match response.json::<GenerateResponse>().await {
                            Ok(body) => {
                                debug!("Ollama generated {} chars", body.response.len());
                                Ok(body.response)
                            }
                            Err(e) => Err(ModelError::InvalidResponse(format!(
                                "Failed to parse response: {}",
                                e
                            ))),
                        };
                    } else if response.status() == reqwest::StatusCode::NOT_FOUND {
                        return Err(ModelError::ModelNotAvailable(self.model.clone()));
                    } else {
                        let status = response.status();
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(ModelError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error =
                        Some(ModelError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| ModelError::Communication("Max retries exceeded".to_string())))
    }

    /// Embed text using the Ollama embeddings API
    ///
    /// The returned vector is re-normalized to unit length; Ollama's pooled
    /// output is not guaranteed to be.
    pub async fn embed_text(&self, text: &str) -> Result<Vec<f32>, ModelError> {
        let url = format!("{}/api/embeddings", self.endpoint);

        let request_body = EmbeddingsRequest {
            model: self.embedding_model.clone(),
            prompt: text.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ModelError::Communication(format!("Request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ModelError::ModelNotAvailable(self.embedding_model.clone()));
        }
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ModelError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body = response
            .json::<EmbeddingsResponse>()
            .await
            .map_err(|e| ModelError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        if body.embedding.is_empty() {
            return Err(ModelError::NotInitialized);
        }

        let mut embedding = body.embedding;
        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut embedding {
                *value /= magnitude;
            }
        }

        Ok(embedding)
    }
}

#[async_trait]
impl TextGenerator for OllamaProvider {
    type Error = ModelError;

    async fn generate(&self, prompt: &str, max_new_tokens: usize) -> Result<String, Self::Error> {
        self.generate_text(prompt, max_new_tokens).await
    }
}

#[async_trait]
impl Embedder for OllamaProvider {
    type Error = ModelError;

    async fn embed(&self, text: &str) -> Result<Vec<f32>, Self::Error> {
        self.embed_text(text).await
    }

    fn dimension(&self) -> usize {
        self.embedding_dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = OllamaProvider::new("http://localhost:11434", "llama3");
        assert_eq!(provider.endpoint, "http://localhost:11434");
        assert_eq!(provider.model, "llama3");
        assert_eq!(provider.embedding_model, "llama3");
        assert_eq!(provider.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_provider_default_endpoint() {
        let provider = OllamaProvider::default_endpoint("mistral");
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.model, "mistral");
    }

    #[test]
    fn test_provider_embedding_model() {
        let provider = OllamaProvider::default_endpoint("llama3")
            .with_embedding_model("nomic-embed-text", 768);
        assert_eq!(provider.embedding_model, "nomic-embed-text");
        assert_eq!(provider.embedding_dimension, 768);
        assert_eq!(Embedder::dimension(&provider), 768);
    }

    #[test]
    fn test_provider_with_max_retries() {
        let provider = OllamaProvider::default_endpoint("llama3").with_max_retries(5);
        assert_eq!(provider.max_retries, 5);
    }

    // Integration tests (require a running Ollama)
    #[tokio::test]
    #[ignore] // Only run when Ollama is available
    async fn test_generate_integration() {
        let provider = OllamaProvider::default_endpoint("llama3");
        let result = provider.generate_text("Say 'hello' and nothing else", 16).await;

        if let Ok(response) = result {
            assert!(!response.is_empty());
        }
    }

    #[tokio::test]
    async fn test_error_handling() {
        // Invalid port to trigger a connection error
        let provider =
            OllamaProvider::new("http://localhost:1", "llama3").with_max_retries(1);

        let result = provider.generate_text("test", 16).await;
        match result {
            Err(ModelError::Communication(_)) => {}
            other => panic!("Expected Communication error, got {:?}", other.map(|_| ())),
        }
    }
}
