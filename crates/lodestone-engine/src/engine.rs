//! The retrieval engine: context assembly, generation facade, chat
//!
//! `RagEngine` owns the chunk index and the engine configuration, and drives
//! the external collaborators. Chunk and embedding arrays are written during
//! initialization (and `add_documents`) and only ever swapped wholesale; all
//! read paths see one consistent generation of the index.

use crate::chunker::TextChunker;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::index::ChunkIndex;
use crate::similarity::rank_chunks;
use lodestone_domain::message::split_active_query;
use lodestone_domain::{ConversationMessage, Embedder, TextGenerator, Tokenizer};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// Sentinel returned by [`RagEngine::chat`] when the conversation holds no
/// user-role message
///
/// Returned as an ordinary string, never as an error, to keep the
/// conversational interface non-throwing.
pub const NO_USER_MESSAGE: &str = "No user message found in conversation.";

/// Retrieval-augmented generation engine
///
/// Generic over the three collaborator seams: a text-generation backend, an
/// embedding backend, and a tokenizer adapter.
pub struct RagEngine<G, E, T>
where
    G: TextGenerator,
    E: Embedder,
    T: Tokenizer,
{
    generator: Arc<G>,
    embedder: Arc<E>,
    chunker: TextChunker<T>,
    config: EngineConfig,
    index: RwLock<ChunkIndex>,
}

impl<G, E, T> RagEngine<G, E, T>
where
    G: TextGenerator,
    E: Embedder,
    T: Tokenizer,
{
    /// Create an engine with no documents registered
    ///
    /// # Errors
    ///
    /// Fails with `Config` when the configuration does not validate.
    pub fn new(
        generator: G,
        embedder: E,
        tokenizer: T,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::Config)?;

        Ok(Self {
            generator: Arc::new(generator),
            embedder: Arc::new(embedder),
            chunker: TextChunker::new(Arc::new(tokenizer), config.context_chunking),
            config,
            index: RwLock::new(ChunkIndex::empty()),
        })
    }

    /// Create an engine and register an initial document corpus
    pub async fn with_documents(
        generator: G,
        embedder: E,
        tokenizer: T,
        config: EngineConfig,
        documents: &[String],
    ) -> Result<Self, EngineError> {
        let engine = Self::new(generator, embedder, tokenizer, config)?;
        engine.add_documents(documents).await?;
        Ok(engine)
    }

    /// Chunk, embed, and register documents
    ///
    /// New chunks are appended after the existing corpus. The chunk and
    /// embedding arrays are rebuilt together and swapped in one step, so
    /// concurrent readers never observe them at different generations.
    pub async fn add_documents(&self, documents: &[String]) -> Result<(), EngineError> {
        let mut chunks = Vec::new();
        for document in documents {
            chunks.extend(self.chunker.chunk(document));
        }

        info!(
            "Indexing {} chunks from {} documents",
            chunks.len(),
            documents.len()
        );
        let fresh = ChunkIndex::build(chunks, self.embedder.as_ref()).await?;

        let mut index = self.index.write().unwrap();
        let merged = index.merged(fresh);
        *index = merged;
        Ok(())
    }

    /// Retrieve the most relevant chunks for `query`
    ///
    /// Returns an empty sequence when no documents are registered, regardless
    /// of the `use_rag` setting, and when nothing clears the configured
    /// similarity threshold.
    pub async fn rag(&self, query: &str) -> Result<Vec<String>, EngineError> {
        if self.index.read().unwrap().is_empty() {
            return Ok(Vec::new());
        }

        let query_vector = self.embed(query).await?;

        let index = self.index.read().unwrap();
        let ranked = rank_chunks(
            &query_vector,
            index.chunks(),
            index.embeddings(),
            self.config.rag_similarity_threshold,
            self.config.rag_num_results,
        );
        debug!(
            "Retrieved {} of {} chunks for query",
            ranked.len(),
            index.len()
        );
        Ok(ranked)
    }

    /// Assemble the generation context for `query`
    ///
    /// 1. With RAG enabled and documents registered, retrieved chunks joined
    ///    by blank lines form the base context.
    /// 2. A non-empty `caller_context` is appended on a new line (no stray
    ///    leading separator when the retrieved context is empty).
    /// 3. With context chunking enabled, an oversized `caller_context` gets a
    ///    second, independent retrieval pass scoped to its own chunks: when
    ///    it splits into more chunks than `rag_num_results`, the ranked
    ///    subset is appended after a blank line. This caps runaway-length
    ///    caller context even when corpus RAG is disabled.
    ///
    /// No hard truncation to `max_context_length` happens here; that budget
    /// bounds the generation call's output downstream.
    pub async fn build_context(
        &self,
        query: &str,
        caller_context: &str,
    ) -> Result<String, EngineError> {
        let mut context = if self.config.use_rag {
            self.rag(query).await?.join("\n\n")
        } else {
            String::new()
        };

        if !caller_context.is_empty() {
            if !context.is_empty() {
                context.push('\n');
            }
            context.push_str(caller_context);
        }

        if self.config.context_chunking && !caller_context.is_empty() {
            let chunks = self.chunker.chunk(caller_context);
            if chunks.len() > self.config.rag_num_results {
                debug!(
                    "Caller context split into {} chunks, re-ranking against query",
                    chunks.len()
                );
                let query_vector = self.embed(query).await?;
                let mut vectors = Vec::with_capacity(chunks.len());
                for chunk in &chunks {
                    vectors.push(self.embed(chunk).await?);
                }

                let ranked = rank_chunks(
                    &query_vector,
                    &chunks,
                    &vectors,
                    self.config.rag_similarity_threshold,
                    self.config.rag_num_results,
                );
                if !ranked.is_empty() {
                    context.push_str("\n\n");
                    context.push_str(&ranked.join("\n\n"));
                }
            }
        }

        Ok(context)
    }

    /// Forward a prompt to the generation backend
    ///
    /// The prompt is the literal `"<context>\n<system_prompt>\n<query>"`; the
    /// backend is asked for at most `max_context_length` new tokens. Output
    /// is whitespace-trimmed; an empty result is an empty string, not an
    /// error.
    pub async fn generate(
        &self,
        context: &str,
        system_prompt: &str,
        query: &str,
    ) -> Result<String, EngineError> {
        let prompt = format!("{}\n{}\n{}", context, system_prompt, query);
        debug!("Generation input ({} chars): {}", prompt.len(), prompt);

        let output = self
            .generator
            .generate(&prompt, self.config.max_context_length)
            .await
            .map_err(|e| EngineError::Generation(e.to_string()))?;

        let output = output.trim().to_string();
        debug!("Generation output ({} chars): {}", output.len(), output);
        Ok(output)
    }

    /// Answer a single query: assemble context, then generate
    pub async fn query(
        &self,
        query: &str,
        system_prompt: &str,
        caller_context: &str,
    ) -> Result<String, EngineError> {
        let context = self.build_context(query, caller_context).await?;
        self.generate(&context, system_prompt, query).await
    }

    /// Answer the latest user message of a conversation
    ///
    /// The last user-role message is the active query; every other message is
    /// folded, in original order, into a `role: content` history string used
    /// as caller context. A conversation without a user message returns
    /// [`NO_USER_MESSAGE`], never an error.
    pub async fn chat(
        &self,
        messages: &[ConversationMessage],
        system_prompt: &str,
    ) -> Result<String, EngineError> {
        match split_active_query(messages) {
            Some((query, history)) => self.query(query, system_prompt, &history).await,
            None => {
                warn!("Chat called on a conversation with no user message");
                Ok(NO_USER_MESSAGE.to_string())
            }
        }
    }

    /// The engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of chunks currently indexed
    pub fn chunk_count(&self) -> usize {
        self.index.read().unwrap().len()
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EngineError> {
        self.embedder
            .embed(text)
            .await
            .map_err(|e| EngineError::NotInitialized(e.to_string()))
    }
}
