//! Schema-driven extraction

use crate::coerce::coerce_answer;
use crate::record::ExtractedRecord;
use lodestone_domain::{Embedder, FieldSpec, FieldValue, Schema, TextGenerator, Tokenizer};
use lodestone_engine::RagEngine;
use std::sync::Arc;
use tracing::{debug, warn};

/// Extracts typed records from text, one engine query per schema field
///
/// Shares the engine with other callers through an `Arc`; extraction only
/// reads the engine's corpus and configuration.
pub struct SchemaExtractor<G, E, T>
where
    G: TextGenerator,
    E: Embedder,
    T: Tokenizer,
{
    engine: Arc<RagEngine<G, E, T>>,
}

impl<G, E, T> SchemaExtractor<G, E, T>
where
    G: TextGenerator,
    E: Embedder,
    T: Tokenizer,
{
    /// Create an extractor backed by an existing engine
    pub fn new(engine: Arc<RagEngine<G, E, T>>) -> Self {
        Self { engine }
    }

    /// Extract one typed value per schema field
    ///
    /// Each field gets its own retrieval-and-generation pass against
    /// `context`, with `system_prompt` forwarded unchanged. The raw answer is
    /// coerced to the field's declared type. A failed field logs a warning
    /// and lands as `Null`; the remaining fields still extract. The record
    /// always holds exactly the schema's fields, in schema order.
    pub async fn extract(
        &self,
        schema: &Schema,
        system_prompt: &str,
        context: &str,
    ) -> ExtractedRecord {
        let mut record = ExtractedRecord::new();
        for (name, spec) in schema.iter() {
            let prompt = field_prompt(name, spec);
            let value = match self.engine.query(&prompt, system_prompt, context).await {
                Ok(answer) => {
                    debug!("Field '{}' raw answer: {}", name, answer);
                    coerce_answer(spec.field_type, &answer)
                }
                Err(e) => {
                    warn!("Extraction of field '{}' failed: {}", name, e);
                    FieldValue::Null
                }
            };
            record.push(name, value);
        }
        record
    }
}

/// The per-field extraction query sent to the engine
fn field_prompt(name: &str, spec: &FieldSpec) -> String {
    match &spec.description {
        Some(description) => format!("Extract the field {} ({})", name, description),
        None => format!("Extract the field {}", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodestone_domain::FieldType;

    #[test]
    fn test_field_prompt_with_description() {
        let spec = FieldSpec::number().with_description("monthly rent in dollars");
        assert_eq!(
            field_prompt("rent", &spec),
            "Extract the field rent (monthly rent in dollars)"
        );
    }

    #[test]
    fn test_field_prompt_without_description() {
        let spec = FieldSpec::boolean();
        assert_eq!(field_prompt("pets", &spec), "Extract the field pets");
        assert_eq!(spec.field_type, FieldType::Boolean);
    }
}
