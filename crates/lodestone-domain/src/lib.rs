//! Lodestone Domain Layer
//!
//! This crate contains the core value objects and trait interfaces for
//! Lodestone. It owns no I/O: the text-generation model, the embedding model,
//! and the tokenizer are external collaborators reached through the traits
//! defined here, and infrastructure implementations live in other crates.
//!
//! ## Key Concepts
//!
//! - **ConversationMessage**: a role-tagged chat message; only the last
//!   user-role message in a conversation is the active query
//! - **Schema**: an ordered list of fields to extract from text, each with a
//!   target type and optional description
//! - **FieldValue**: the typed result of coercing a model answer
//!   (boolean, number, text, or null)
//!
//! ## Architecture
//!
//! - Pure data types and trait definitions only
//! - Model backends implement the traits in `lodestone-llm`
//! - Retrieval and context assembly live in `lodestone-engine`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod message;
pub mod schema;
pub mod traits;

// Re-exports for convenience
pub use message::{ConversationMessage, Role};
pub use schema::{FieldSpec, FieldType, FieldValue, Schema};
pub use traits::{Embedder, TextGenerator, Tokenizer};
