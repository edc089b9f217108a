//! Extraction schemas and typed field values
//!
//! A schema describes the fields to pull out of text. Field order is
//! preserved as an ordered sequence of `(name, spec)` pairs, never an
//! unordered map, so extraction order stays deterministic.

use serde::{Deserialize, Serialize};

/// Target type a field's raw answer is coerced into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Whole-word yes/true or no/false answers
    Boolean,
    /// Digits-and-dot numeric answers
    Number,
    /// Free text (the default when no type is given)
    #[default]
    #[serde(rename = "string")]
    Text,
}

/// Description of a single schema field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Target type for coercion
    #[serde(rename = "type", default)]
    pub field_type: FieldType,

    /// Optional hint included in the extraction prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldSpec {
    /// Spec for a boolean field
    pub fn boolean() -> Self {
        Self {
            field_type: FieldType::Boolean,
            description: None,
        }
    }

    /// Spec for a numeric field
    pub fn number() -> Self {
        Self {
            field_type: FieldType::Number,
            description: None,
        }
    }

    /// Spec for a free-text field
    pub fn text() -> Self {
        Self {
            field_type: FieldType::Text,
            description: None,
        }
    }

    /// Attach a description hint
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Ordered set of fields to extract
///
/// # Examples
///
/// ```
/// use lodestone_domain::{FieldSpec, Schema};
///
/// let schema = Schema::new()
///     .field("rent", FieldSpec::number().with_description("monthly rent in dollars"))
///     .field("pets", FieldSpec::boolean());
///
/// assert_eq!(schema.len(), 2);
/// assert_eq!(schema.iter().next().unwrap().0, "rent");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<(String, FieldSpec)>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, preserving insertion order
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.push((name.into(), spec));
        self
    }

    /// Iterate fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Look up a field spec by name
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, spec)| spec)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, FieldSpec)> for Schema {
    fn from_iter<I: IntoIterator<Item = (String, FieldSpec)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Typed result of coercing a raw model answer
///
/// Serializes untagged, so `Null` becomes JSON `null` and the other variants
/// become plain JSON scalars.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Coerced boolean answer
    Bool(bool),
    /// Coerced numeric answer
    Number(f64),
    /// Trimmed free-text answer
    Text(String),
    /// Coercion failed or the field could not be extracted
    Null,
}

impl FieldValue {
    /// Boolean value, if this is a `Bool`
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric value, if this is a `Number`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Text value, if this is `Text`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Whether the value is `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}
