//! Lodestone Extractor
//!
//! Schema-driven structured extraction on top of the retrieval engine.
//!
//! # Overview
//!
//! Given an ordered schema of named fields, the extractor issues one full
//! retrieval-and-generation pass per field and coerces each raw answer into
//! a typed value: boolean, number, text, or null. Fields are independent; a
//! field that fails to extract degrades to null without aborting the rest.
//!
//! # Architecture
//!
//! ```text
//! Schema field → "Extract the field ..." prompt → RagEngine → coerce → FieldValue
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use lodestone_domain::{FieldSpec, Schema};
//! use lodestone_engine::{EngineConfig, RagEngine};
//! use lodestone_extractor::SchemaExtractor;
//! use lodestone_llm::{MockEmbedder, MockGenerator, WhitespaceTokenizer};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = Arc::new(RagEngine::new(
//!     MockGenerator::new("$2500"),
//!     MockEmbedder::new(384),
//!     WhitespaceTokenizer::new(),
//!     EngineConfig::without_rag(),
//! )?);
//!
//! let schema = Schema::new()
//!     .field("rent", FieldSpec::number().with_description("monthly rent in dollars"))
//!     .field("pets", FieldSpec::boolean());
//!
//! let extractor = SchemaExtractor::new(engine);
//! let record = extractor
//!     .extract(&schema, "You extract lease terms.", "Rent is $2500/month.")
//!     .await;
//!
//! assert_eq!(record.get("rent").unwrap().as_f64(), Some(2500.0));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod coerce;
pub mod extractor;
pub mod record;

// Re-exports for convenience
pub use coerce::coerce_answer;
pub use extractor::SchemaExtractor;
pub use record::ExtractedRecord;
