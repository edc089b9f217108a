//! Extraction results

use lodestone_domain::FieldValue;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Typed values extracted for a schema, in schema field order
///
/// Serializes as a JSON object whose keys appear in the same order as the
/// schema's fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedRecord {
    fields: Vec<(String, FieldValue)>,
}

impl ExtractedRecord {
    /// An empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field value, preserving insertion order
    pub fn push(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.push((name.into(), value));
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Iterate fields in schema order
    pub fn iter(&self) -> impl Iterator<Item = &(String, FieldValue)> {
        self.fields.iter()
    }

    /// Number of fields in the record
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record holds no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for ExtractedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl FromIterator<(String, FieldValue)> for ExtractedRecord {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_finds_fields_by_name() {
        let mut record = ExtractedRecord::new();
        record.push("rent", FieldValue::Number(2500.0));
        record.push("pets", FieldValue::Bool(true));

        assert_eq!(record.get("rent"), Some(&FieldValue::Number(2500.0)));
        assert_eq!(record.get("pets"), Some(&FieldValue::Bool(true)));
        assert_eq!(record.get("missing"), None);
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_serializes_in_field_order() {
        let mut record = ExtractedRecord::new();
        record.push("zebra", FieldValue::Text("stripes".to_string()));
        record.push("apple", FieldValue::Null);

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"zebra":"stripes","apple":null}"#);
    }

    #[test]
    fn test_empty_record() {
        let record = ExtractedRecord::new();
        assert!(record.is_empty());
        assert_eq!(serde_json::to_string(&record).unwrap(), "{}");
    }
}
